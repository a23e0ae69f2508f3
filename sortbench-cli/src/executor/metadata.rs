//! System Metadata Collection
//!
//! Linux-specific data (CPU model, memory) degrades on other platforms to
//! "Unknown" or 0.

use super::execution::RunConfig;
use chrono::Utc;
use sortbench_core::available_workers;
use sortbench_report::{ReportConfig, ReportMeta, SCHEMA_VERSION, SystemInfo};

/// Build report metadata including system info and the run configuration
pub fn build_report_meta(config: &RunConfig) -> ReportMeta {
    let system = SystemInfo {
        os: std::env::consts::OS.to_string(),
        os_version: get_os_release().unwrap_or_else(|| "Unknown".to_string()),
        arch: std::env::consts::ARCH.to_string(),
        cpu: get_cpu_model().unwrap_or_else(|| "Unknown".to_string()),
        cpu_cores: available_workers() as u32,
        memory_gb: get_memory_gb().unwrap_or(0.0),
    };

    ReportMeta {
        schema_version: SCHEMA_VERSION,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        system,
        config: ReportConfig {
            sizes: config.sizes.clone(),
            trials: config.trials,
            workers: config.workers,
            threshold: config.threshold,
            seed: config.seed,
            distribution: config.distribution.to_string(),
            algorithms: config.algorithms.clone(),
            stage_timeout_ms: config.stage_timeout.map(|t| t.as_millis() as u64),
        },
    }
}

fn get_os_release() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string("/proc/sys/kernel/osrelease")
            .ok()
            .map(|s| s.trim().to_string())
    }
    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

/// Get CPU model name from /proc/cpuinfo (Linux only)
fn get_cpu_model() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string("/proc/cpuinfo")
            .ok()
            .and_then(|content| {
                content
                    .lines()
                    .find(|l| l.starts_with("model name"))
                    .and_then(|l| l.split(':').nth(1))
                    .map(|s| s.trim().to_string())
            })
    }
    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

/// Get total system memory in GB (Linux only)
fn get_memory_gb() -> Option<f64> {
    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string("/proc/meminfo")
            .ok()
            .and_then(|content| {
                content
                    .lines()
                    .find(|l| l.starts_with("MemTotal"))
                    .and_then(|l| l.split_whitespace().nth(1))
                    .and_then(|s| s.parse::<u64>().ok())
                    .map(|kb| kb as f64 / 1024.0 / 1024.0)
            })
    }
    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_captures_config() {
        let config = RunConfig {
            seed: 7,
            stage_timeout: None,
            ..RunConfig::default()
        };
        let meta = build_report_meta(&config);
        assert_eq!(meta.schema_version, SCHEMA_VERSION);
        assert_eq!(meta.config.seed, 7);
        assert_eq!(meta.config.distribution, "uniform");
        assert_eq!(meta.config.stage_timeout_ms, None);
        assert!(meta.system.cpu_cores >= 1);
        assert!(!meta.system.arch.is_empty());
    }
}
