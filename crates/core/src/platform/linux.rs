use super::{sysinfo_load_average, sysinfo_memory, sysinfo_swap, sysinfo_uptime, MetricSource};
use crate::{
    error::{CoreError, Result},
    model::{CpuStats, LoadAverage, MemoryStats, SwapStats},
};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

/// Kernel per-interface network statistics
pub const NET_DEV_PATH: &str = "/proc/net/dev";

pub struct LinuxSource {
    net_dev_path: PathBuf,
}

impl LinuxSource {
    pub fn new() -> Self {
        Self {
            net_dev_path: PathBuf::from(NET_DEV_PATH),
        }
    }

    /// Read network counters from another file laid out like `/proc/net/dev`
    pub fn with_net_dev_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            net_dev_path: path.as_ref().to_path_buf(),
        }
    }
}

impl Default for LinuxSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricSource for LinuxSource {
    fn cpu_times(&self) -> Result<CpuStats> {
        #[cfg(feature = "linux_procfs")]
        {
            self.cpu_times_procfs()
        }

        #[cfg(not(feature = "linux_procfs"))]
        {
            Err(CoreError::unsupported_platform(
                "CPU tick counters require the linux_procfs feature",
            ))
        }
    }

    fn memory(&self) -> Result<MemoryStats> {
        sysinfo_memory()
    }

    fn swap(&self) -> Result<SwapStats> {
        sysinfo_swap()
    }

    fn uptime(&self) -> Result<f64> {
        sysinfo_uptime()
    }

    fn load_average(&self) -> Result<LoadAverage> {
        sysinfo_load_average()
    }

    fn net_dev(&self) -> Result<Box<dyn BufRead>> {
        let file = File::open(&self.net_dev_path).map_err(|e| {
            CoreError::source_unavailable(self.net_dev_path.display().to_string(), e)
        })?;

        Ok(Box::new(BufReader::new(file)))
    }

    fn platform_name(&self) -> &'static str {
        "linux"
    }
}

#[cfg(feature = "linux_procfs")]
impl LinuxSource {
    fn cpu_times_procfs(&self) -> Result<CpuStats> {
        use procfs::CurrentSI;

        // Read /proc/stat for the aggregate and per-CPU tick counters
        let stat = procfs::KernelStats::current()?;

        Ok(CpuStats {
            aggregate: cpu_times_from(&stat.total),
            per_cpu: stat.cpu_time.iter().map(cpu_times_from).collect(),
        })
    }
}

#[cfg(feature = "linux_procfs")]
fn cpu_times_from(cpu: &procfs::CpuTime) -> crate::model::CpuTimes {
    crate::model::CpuTimes {
        user: cpu.user,
        nice: cpu.nice,
        sys: cpu.system,
        idle: cpu.idle,
        wait: cpu.iowait.unwrap_or(0),
    }
}
