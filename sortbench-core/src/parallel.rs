//! Parallel Sort Orchestrators
//!
//! Both orchestrators fall back to their sequential kernel at or below the
//! partition threshold and otherwise decompose the input into disjoint,
//! owned sub-problems handed to the [`ForkJoinPool`].

use crate::error::{SortError, Stage};
use crate::kernels::{merge, merge_sort, quicksort};
use crate::pool::{CancelToken, ForkJoinPool};
use tracing::debug;

/// Chunked parallel merge sort.
///
/// 1. Split into `pool.workers()` contiguous chunks (last absorbs the remainder)
/// 2. Sort every chunk concurrently with the sequential kernel
/// 3. Merge adjacent pairs concurrently, one round at a time, until one run remains
///
/// Takes ⌈log2(workers)⌉ merge rounds. An odd run out merges with an empty run.
pub fn parallel_merge_sort<T>(
    input: Vec<T>,
    pool: &ForkJoinPool,
    threshold: usize,
) -> Result<Vec<T>, SortError>
where
    T: Ord + Clone + Send + 'static,
{
    if input.len() <= threshold {
        return Ok(merge_sort(&input));
    }

    let cancel = CancelToken::new();
    let chunks = split_chunks(input, pool.workers());
    let runs = pool.run_stage(Stage::ChunkSort, chunks, &cancel, |chunk: Vec<T>| {
        Ok(merge_sort(&chunk))
    })?;

    let (sorted, _rounds) = merge_runs(runs, pool, &cancel)?;
    Ok(sorted)
}

/// Merge sorted runs pairwise, one pool stage per round, until one run
/// remains. Returns that run and the number of rounds taken.
pub(crate) fn merge_runs<T>(
    mut runs: Vec<Vec<T>>,
    pool: &ForkJoinPool,
    cancel: &CancelToken,
) -> Result<(Vec<T>, u32), SortError>
where
    T: Ord + Send + 'static,
{
    let mut round = 0;
    while runs.len() > 1 {
        round += 1;
        let pairs = pair_runs(runs);
        debug!(round, pairs = pairs.len(), "merge round");
        runs = pool.run_stage(
            Stage::MergeRound(round),
            pairs,
            cancel,
            |(left, right): (Vec<T>, Vec<T>)| Ok(merge(left, right)),
        )?;
    }

    Ok((runs.pop().unwrap_or_default(), round))
}

/// Three-way partition quicksort with concurrent recursion.
///
/// The pivot is the middle element. Inputs that keep producing an extreme
/// pivot degrade towards O(n²) work and deep recursion; this is a known
/// weakness of the fixed pivot rule, not something the orchestrator hides.
pub fn parallel_quicksort<T>(
    input: Vec<T>,
    pool: &ForkJoinPool,
    threshold: usize,
) -> Result<Vec<T>, SortError>
where
    T: Ord + Clone + Send + 'static,
{
    if input.len() <= threshold {
        let mut input = input;
        quicksort(&mut input);
        return Ok(input);
    }

    let cancel = CancelToken::new();
    let (less, equal, greater) = three_way_partition(input);
    debug!(
        less = less.len(),
        equal = equal.len(),
        greater = greater.len(),
        "top-level partition"
    );

    let token = cancel.clone();
    let mut sides = pool.run_stage(
        Stage::QuicksortSplit,
        vec![less, greater],
        &cancel,
        move |side: Vec<T>| quicksort_branch(side, threshold, &token),
    )?;

    let greater = sides.pop().unwrap_or_default();
    let less = sides.pop().unwrap_or_default();
    Ok(concat(less, equal, greater))
}

/// Recursive branch running on pool threads; forks with `rayon::join`
fn quicksort_branch<T>(
    input: Vec<T>,
    threshold: usize,
    cancel: &CancelToken,
) -> Result<Vec<T>, SortError>
where
    T: Ord + Clone + Send,
{
    cancel.check()?;

    if input.len() <= threshold {
        let mut input = input;
        quicksort(&mut input);
        return Ok(input);
    }

    let (less, equal, greater) = three_way_partition(input);
    let (less, greater) = rayon::join(
        || quicksort_branch(less, threshold, cancel),
        || quicksort_branch(greater, threshold, cancel),
    );

    Ok(concat(less?, equal, greater?))
}

/// Split into `parts` contiguous chunks of `len / parts` elements; the last
/// chunk takes the remainder. `parts` is clamped to `1..=len`.
pub fn split_chunks<T>(mut input: Vec<T>, parts: usize) -> Vec<Vec<T>> {
    let parts = parts.clamp(1, input.len().max(1));
    let chunk_len = input.len() / parts;

    let mut chunks = Vec::with_capacity(parts);
    for _ in 1..parts {
        let rest = input.split_off(chunk_len);
        chunks.push(input);
        input = rest;
    }
    chunks.push(input);
    chunks
}

/// Pair adjacent runs; an unpaired final run is paired with an empty run
fn pair_runs<T>(runs: Vec<Vec<T>>) -> Vec<(Vec<T>, Vec<T>)> {
    let mut pairs = Vec::with_capacity(runs.len().div_ceil(2));
    let mut runs = runs.into_iter();
    while let Some(left) = runs.next() {
        pairs.push((left, runs.next().unwrap_or_default()));
    }
    pairs
}

/// Classify around the middle element into (less, equal, greater) in one scan
pub fn three_way_partition<T: Ord + Clone>(input: Vec<T>) -> (Vec<T>, Vec<T>, Vec<T>) {
    let mut less = Vec::new();
    let mut equal = Vec::new();
    let mut greater = Vec::new();

    let Some(pivot) = input.get(input.len() / 2).cloned() else {
        return (less, equal, greater);
    };

    for item in input {
        match item.cmp(&pivot) {
            std::cmp::Ordering::Less => less.push(item),
            std::cmp::Ordering::Equal => equal.push(item),
            std::cmp::Ordering::Greater => greater.push(item),
        }
    }
    (less, equal, greater)
}

fn concat<T>(mut less: Vec<T>, equal: Vec<T>, greater: Vec<T>) -> Vec<T> {
    less.reserve(equal.len() + greater.len());
    less.extend(equal);
    less.extend(greater);
    less
}
