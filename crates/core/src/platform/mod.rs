#[cfg(any(test, feature = "test-util"))]
pub mod fake;
#[cfg(target_os = "linux")]
pub mod linux;

use crate::{
    error::{CoreError, Result},
    model::{CpuStats, LoadAverage, MemoryStats, SwapStats},
};
use std::io::BufRead;
use sysinfo::System;

/// Operating system metric provider queried by the collectors.
///
/// Every query is synchronous and may fail independently of the others.
pub trait MetricSource {
    /// Raw tick counters for the aggregate CPU and each logical CPU
    fn cpu_times(&self) -> Result<CpuStats>;

    fn memory(&self) -> Result<MemoryStats>;

    fn swap(&self) -> Result<SwapStats>;

    /// Time since boot, in seconds
    fn uptime(&self) -> Result<f64>;

    fn load_average(&self) -> Result<LoadAverage>;

    /// Open the per-interface network counter table for line-by-line reading.
    ///
    /// The returned reader is owned by the caller and closed when dropped.
    fn net_dev(&self) -> Result<Box<dyn BufRead>>;

    /// Get platform name
    fn platform_name(&self) -> &'static str;
}

/// Get the appropriate metric source for the current system
pub fn default_source() -> Box<dyn MetricSource> {
    #[cfg(target_os = "linux")]
    {
        Box::new(linux::LinuxSource::new())
    }

    #[cfg(not(target_os = "linux"))]
    {
        Box::new(GenericSource::new())
    }
}

/// Source for platforms without procfs: memory, swap, uptime and load only
pub struct GenericSource;

impl GenericSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GenericSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricSource for GenericSource {
    fn cpu_times(&self) -> Result<CpuStats> {
        Err(CoreError::unsupported_platform(
            "raw CPU tick counters are only available on Linux",
        ))
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
        Err(CoreError::unsupported_platform(
            "the network interface counter table is only available on Linux",
        ))
    }

    fn platform_name(&self) -> &'static str {
        "generic"
    }
}

fn ensure_supported() -> Result<()> {
    if sysinfo::IS_SUPPORTED_SYSTEM {
        Ok(())
    } else {
        Err(CoreError::unsupported_platform(
            "sysinfo does not support this operating system",
        ))
    }
}

pub(crate) fn sysinfo_memory() -> Result<MemoryStats> {
    ensure_supported()?;

    let mut sys = System::new();
    sys.refresh_memory();

    let total = sys.total_memory();
    if total == 0 {
        return Err(CoreError::system_info("total memory reported as zero"));
    }
    let free = sys.free_memory();
    let available = sys.available_memory();

    Ok(MemoryStats {
        total,
        free,
        used: total.saturating_sub(free),
        actual_free: available,
        actual_used: total.saturating_sub(available),
    })
}

pub(crate) fn sysinfo_swap() -> Result<SwapStats> {
    ensure_supported()?;

    let mut sys = System::new();
    sys.refresh_memory();

    // Zero swap is a valid configuration, not a failure
    Ok(SwapStats {
        total: sys.total_swap(),
        used: sys.used_swap(),
        free: sys.free_swap(),
    })
}

pub(crate) fn sysinfo_uptime() -> Result<f64> {
    ensure_supported()?;
    Ok(System::uptime() as f64)
}

#[cfg(unix)]
pub(crate) fn sysinfo_load_average() -> Result<LoadAverage> {
    ensure_supported()?;

    let load_avg = System::load_average();
    Ok(LoadAverage {
        one: load_avg.one,
        five: load_avg.five,
        fifteen: load_avg.fifteen,
    })
}

#[cfg(not(unix))]
pub(crate) fn sysinfo_load_average() -> Result<LoadAverage> {
    Err(CoreError::unsupported_platform(
        "load averages are not available on this platform",
    ))
}
