//! Sequential Sort Kernels
//!
//! Baselines for correctness and the terminal case of the parallel
//! orchestrators once a partition falls below the threshold.

/// Top-down merge sort returning a new sequence.
///
/// Every call allocates its own output; the input is never mutated. Stable:
/// the midpoint split keeps relative positions and [`merge`] prefers the
/// left run on ties.
pub fn merge_sort<T: Ord + Clone>(seq: &[T]) -> Vec<T> {
    if seq.len() <= 1 {
        return seq.to_vec();
    }

    let mid = seq.len() / 2;
    let left = merge_sort(&seq[..mid]);
    let right = merge_sort(&seq[mid..]);
    merge(left, right)
}

/// Merge two sorted runs with a linear two-pointer scan (left wins ties)
pub fn merge<T: Ord>(left: Vec<T>, right: Vec<T>) -> Vec<T> {
    let mut out = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        if l <= r {
            out.extend(left.next());
        } else {
            out.extend(right.next());
        }
    }

    out.extend(left);
    out.extend(right);
    out
}

/// In-place Lomuto quicksort. Not stable.
///
/// Recurses into the smaller side and loops on the larger one, so stack depth
/// stays logarithmic even when the pivot degenerates (sorted input still costs
/// O(n²) comparisons).
pub fn quicksort<T: Ord>(seq: &mut [T]) {
    let mut seq = seq;
    while seq.len() > 1 {
        let pivot = lomuto_partition(seq);
        let (left, right) = std::mem::take(&mut seq).split_at_mut(pivot);
        let right = &mut right[1..];

        if left.len() < right.len() {
            quicksort(left);
            seq = right;
        } else {
            quicksort(right);
            seq = left;
        }
    }
}

/// Sort the index range `[low, high]` in place.
///
/// Both bounds are inclusive: `seq[high]` is sorted along with the rest, so
/// `quicksort_range(seq, 0, seq.len() - 1)` covers the whole slice. Inverted
/// ranges are a no-op. A `high` past the end is clamped to the last index
/// rather than rejected.
pub fn quicksort_range<T: Ord>(seq: &mut [T], low: usize, high: usize) {
    if seq.is_empty() {
        return;
    }
    let high = high.min(seq.len() - 1);
    if low < high {
        quicksort(&mut seq[low..=high]);
    }
}

/// Lomuto partition around the last element; returns the pivot's final index
pub fn lomuto_partition<T: Ord>(seq: &mut [T]) -> usize {
    let high = seq.len() - 1;
    let mut store = 0;

    for j in 0..high {
        if seq[j] <= seq[high] {
            seq.swap(store, j);
            store += 1;
        }
    }

    seq.swap(store, high);
    store
}

/// Check non-decreasing order end to end
pub fn is_sorted<T: Ord>(seq: &[T]) -> bool {
    seq.windows(2).all(|w| w[0] <= w[1])
}
