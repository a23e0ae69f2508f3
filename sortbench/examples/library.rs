//! Driving the engine from code instead of the CLI
//!
//! Run with:
//!   cargo run --example library

use sortbench::{
    Algorithm, DatasetGenerator, Distribution, GroupBy, HostProbe, MetricsCalculator, Sorter,
    aggregate, compute_speedups,
};

fn main() -> anyhow::Result<()> {
    let sorter = Sorter::new(sortbench::available_workers())?.with_threshold(2_000);
    let calculator = MetricsCalculator::new(HostProbe::default());
    let mut generator = DatasetGenerator::new(42, Distribution::NearlySorted);

    let mut records = Vec::new();
    for (size, data) in generator.generate_all(&[10_000, 50_000]) {
        for algorithm in Algorithm::ALL {
            let result = sorter.sort_tracked(algorithm, &data)?;
            records.push(calculator.compute(&data, &result, algorithm)?);
            println!("{:<20} n={:<6} {:?}", algorithm.name(), size, result.elapsed);
        }
    }

    let summary = aggregate(&records, GroupBy::AlgorithmAndSize);
    for group in summary.iter() {
        println!(
            "{} n={:?}: stability {:.3}, sorted {:.0}%",
            group.key.algorithm, group.key.input_size, group.mean_stability, group.success_rate
        );
    }
    for s in compute_speedups(&records) {
        println!("{} vs {} at n={}: {:.2}x", s.algorithm, s.baseline, s.input_size, s.speedup);
    }
    Ok(())
}
