//! Host Resource Probe
//!
//! Memory and CPU observations taken at metric-computation time. These are
//! inherently non-deterministic; a failed query degrades the record instead
//! of failing the run.
//!
//! Linux reads `/proc/self/status` and `/proc/stat`; other platforms report
//! [`ProbeError::Unsupported`].

use sortbench_core::available_workers;
use std::time::Duration;
use thiserror::Error;

/// Errors from querying the host
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Unexpected format in {0}")]
    Parse(&'static str),

    #[error("Resource query unsupported on this platform")]
    Unsupported,
}

/// Source of host resource observations
pub trait ResourceProbe: Send + Sync {
    /// Resident set size of this process in MiB
    fn memory_usage_mb(&self) -> Result<f64, ProbeError>;
    /// System-wide CPU utilisation in percent (0-100)
    fn cpu_utilization(&self) -> Result<f64, ProbeError>;
    /// Logical cores available to this process
    fn core_count(&self) -> usize;
}

/// Probe backed by the live operating system
#[derive(Debug, Clone)]
pub struct HostProbe {
    cpu_sample_interval: Duration,
}

impl HostProbe {
    /// CPU utilisation is measured over `cpu_sample_interval`
    pub fn new(cpu_sample_interval: Duration) -> Self {
        Self {
            cpu_sample_interval,
        }
    }
}

impl Default for HostProbe {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

impl ResourceProbe for HostProbe {
    #[cfg(target_os = "linux")]
    fn memory_usage_mb(&self) -> Result<f64, ProbeError> {
        const PATH: &str = "/proc/self/status";
        let status = std::fs::read_to_string(PATH).map_err(|source| ProbeError::Io {
            path: PATH,
            source,
        })?;
        let kb = parse_vm_rss_kb(&status).ok_or(ProbeError::Parse(PATH))?;
        Ok(kb as f64 / 1024.0)
    }

    #[cfg(not(target_os = "linux"))]
    fn memory_usage_mb(&self) -> Result<f64, ProbeError> {
        Err(ProbeError::Unsupported)
    }

    #[cfg(target_os = "linux")]
    fn cpu_utilization(&self) -> Result<f64, ProbeError> {
        const PATH: &str = "/proc/stat";
        let read = || -> Result<CpuTimes, ProbeError> {
            let stat = std::fs::read_to_string(PATH).map_err(|source| ProbeError::Io {
                path: PATH,
                source,
            })?;
            parse_cpu_times(&stat).ok_or(ProbeError::Parse(PATH))
        };

        let before = read()?;
        std::thread::sleep(self.cpu_sample_interval);
        let after = read()?;
        Ok(before.utilization_until(&after))
    }

    #[cfg(not(target_os = "linux"))]
    fn cpu_utilization(&self) -> Result<f64, ProbeError> {
        Err(ProbeError::Unsupported)
    }

    fn core_count(&self) -> usize {
        available_workers()
    }
}

/// Probe returning preset values; `None` simulates a failed query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedProbe {
    pub memory_mb: Option<f64>,
    pub cpu_percent: Option<f64>,
    pub cores: usize,
}

impl ResourceProbe for FixedProbe {
    fn memory_usage_mb(&self) -> Result<f64, ProbeError> {
        self.memory_mb.ok_or(ProbeError::Unsupported)
    }

    fn cpu_utilization(&self) -> Result<f64, ProbeError> {
        self.cpu_percent.ok_or(ProbeError::Unsupported)
    }

    fn core_count(&self) -> usize {
        self.cores
    }
}

/// Aggregate jiffies from the first `cpu` line of /proc/stat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CpuTimes {
    idle: u64,
    total: u64,
}

impl CpuTimes {
    fn utilization_until(&self, later: &CpuTimes) -> f64 {
        let total = later.total.saturating_sub(self.total);
        let idle = later.idle.saturating_sub(self.idle);
        if total == 0 {
            return 0.0;
        }
        (1.0 - idle as f64 / total as f64).clamp(0.0, 1.0) * 100.0
    }
}

fn parse_vm_rss_kb(status: &str) -> Option<u64> {
    status
        .lines()
        .find(|l| l.starts_with("VmRSS:"))
        .and_then(|l| l.split_whitespace().nth(1))
        .and_then(|kb| kb.parse().ok())
}

fn parse_cpu_times(stat: &str) -> Option<CpuTimes> {
    let line = stat.lines().find(|l| l.starts_with("cpu "))?;
    let fields: Vec<u64> = line
        .split_whitespace()
        .skip(1)
        .map(|f| f.parse().ok())
        .collect::<Option<_>>()?;
    if fields.len() < 4 {
        return None;
    }

    // idle + iowait
    let idle = fields[3] + fields.get(4).copied().unwrap_or(0);
    Some(CpuTimes {
        idle,
        total: fields.iter().sum(),
    })
}
