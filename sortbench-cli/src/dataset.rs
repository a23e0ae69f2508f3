//! Dataset Generator
//!
//! Seeded integer arrays for the benchmark driver. The same seed and
//! distribution always produce the same datasets, in the order requested.

use rand::prelude::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Value the all-equal case is filled with
const ALL_EQUAL_VALUE: i64 = 42;

/// Shape of generated input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Distribution {
    /// Integers drawn uniformly from `[0, size * 10)`
    #[default]
    Uniform,
    /// Bell curve centred on `size * 5`, clamped at zero
    Normal,
    /// Exponential with mean `size`
    Exponential,
    Sorted,
    ReverseSorted,
    AllEqual,
    /// Ascending with `size / 20` random swaps
    NearlySorted,
}

impl Distribution {
    pub const ALL: [Distribution; 7] = [
        Distribution::Uniform,
        Distribution::Normal,
        Distribution::Exponential,
        Distribution::Sorted,
        Distribution::ReverseSorted,
        Distribution::AllEqual,
        Distribution::NearlySorted,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Distribution::Uniform => "uniform",
            Distribution::Normal => "normal",
            Distribution::Exponential => "exponential",
            Distribution::Sorted => "sorted",
            Distribution::ReverseSorted => "reverse-sorted",
            Distribution::AllEqual => "all-equal",
            Distribution::NearlySorted => "nearly-sorted",
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Distribution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Distribution::ALL
            .into_iter()
            .find(|d| d.id() == normalized)
            .ok_or_else(|| format!("Unknown distribution: {}", s))
    }
}

/// Seeded dataset generator
#[derive(Debug, Clone)]
pub struct DatasetGenerator {
    rng: StdRng,
    distribution: Distribution,
}

impl DatasetGenerator {
    pub fn new(seed: u64, distribution: Distribution) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            distribution,
        }
    }

    pub fn distribution(&self) -> Distribution {
        self.distribution
    }

    /// One dataset per size, drawn in order from the same generator
    pub fn generate_all(&mut self, sizes: &[usize]) -> Vec<(usize, Vec<i64>)> {
        sizes
            .iter()
            .map(|&size| (size, self.generate(size)))
            .collect()
    }

    pub fn generate(&mut self, size: usize) -> Vec<i64> {
        let n = size as i64;
        match self.distribution {
            Distribution::Uniform => {
                let upper = (n * 10).max(1);
                (0..size).map(|_| self.rng.gen_range(0..upper)).collect()
            }
            Distribution::Normal => {
                let mean = n as f64 * 5.0;
                let std_dev = (n as f64 * 1.5).max(1.0);
                (0..size)
                    .map(|_| (mean + std_dev * self.standard_normal()).round().max(0.0) as i64)
                    .collect()
            }
            Distribution::Exponential => {
                let scale = (n as f64).max(1.0);
                (0..size)
                    .map(|_| {
                        // 1 - u lies in (0, 1], so the log is finite
                        let u: f64 = self.rng.r#gen();
                        (-(1.0 - u).ln() * scale).round() as i64
                    })
                    .collect()
            }
            Distribution::Sorted => (0..n).collect(),
            Distribution::ReverseSorted => (0..n).rev().collect(),
            Distribution::AllEqual => vec![ALL_EQUAL_VALUE; size],
            Distribution::NearlySorted => {
                let mut data: Vec<i64> = (0..n).collect();
                for _ in 0..size / 20 {
                    let i = self.rng.gen_range(0..size);
                    let j = self.rng.gen_range(0..size);
                    data.swap(i, j);
                }
                data
            }
        }
    }

    /// Box-Muller transform
    fn standard_normal(&mut self) -> f64 {
        let u1: f64 = 1.0 - self.rng.r#gen::<f64>();
        let u2: f64 = self.rng.r#gen();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_data() {
        for dist in Distribution::ALL {
            let a = DatasetGenerator::new(42, dist).generate_all(&[100, 500]);
            let b = DatasetGenerator::new(42, dist).generate_all(&[100, 500]);
            assert_eq!(a, b, "{}", dist);
        }
        let c = DatasetGenerator::new(7, Distribution::Uniform).generate(500);
        let d = DatasetGenerator::new(42, Distribution::Uniform).generate(500);
        assert_ne!(c, d);
    }

    #[test]
    fn test_uniform_range() {
        let data = DatasetGenerator::new(42, Distribution::Uniform).generate(1000);
        assert_eq!(data.len(), 1000);
        assert!(data.iter().all(|&v| (0..10_000).contains(&v)));
    }

    #[test]
    fn test_special_cases() {
        let mut generator = DatasetGenerator::new(1, Distribution::Sorted);
        assert_eq!(generator.generate(5), vec![0, 1, 2, 3, 4]);

        let mut generator = DatasetGenerator::new(1, Distribution::ReverseSorted);
        assert_eq!(generator.generate(4), vec![3, 2, 1, 0]);

        let mut generator = DatasetGenerator::new(1, Distribution::AllEqual);
        assert_eq!(generator.generate(3), vec![42, 42, 42]);

        let mut generator = DatasetGenerator::new(1, Distribution::NearlySorted);
        let mut data = generator.generate(200);
        let displaced = data.iter().enumerate().filter(|&(i, &v)| v != i as i64).count();
        assert!(displaced <= 20);
        data.sort_unstable();
        assert_eq!(data, (0..200).collect::<Vec<i64>>());
    }

    #[test]
    fn test_skewed_distributions_non_negative() {
        for dist in [Distribution::Normal, Distribution::Exponential] {
            let data = DatasetGenerator::new(3, dist).generate(2000);
            assert_eq!(data.len(), 2000);
            assert!(data.iter().all(|&v| v >= 0), "{}", dist);
        }
    }

    #[test]
    fn test_empty_size() {
        for dist in Distribution::ALL {
            assert!(DatasetGenerator::new(0, dist).generate(0).is_empty());
        }
    }

    #[test]
    fn test_parse_distribution() {
        assert_eq!("reverse_sorted".parse(), Ok(Distribution::ReverseSorted));
        assert_eq!("Uniform".parse(), Ok(Distribution::Uniform));
        assert!("zipf".parse::<Distribution>().is_err());
    }
}
