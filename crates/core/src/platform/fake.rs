use super::MetricSource;
use crate::{
    error::{CoreError, Result},
    model::{CpuStats, CpuTimes, LoadAverage, MemoryStats, SwapStats},
};
use std::io::{BufRead, Cursor};

/// In-memory metric source; a `None` field makes that query fail
#[derive(Debug, Clone)]
pub struct FakeSource {
    pub cpu: Option<CpuStats>,
    pub memory: Option<MemoryStats>,
    pub swap: Option<SwapStats>,
    pub uptime: Option<f64>,
    pub load: Option<LoadAverage>,
    /// Raw bytes of the network counter table
    pub net_dev: Option<Vec<u8>>,
}

pub const NET_DEV_SAMPLE: &str = "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
    lo:  123456     789    0    0    0     0          0         0   123456     789    0    0    0     0       0          0
  eth0: 100 2 0 0 0 0 0 0 200 3 0 0 0 0 0 0
";

impl Default for FakeSource {
    fn default() -> Self {
        Self {
            cpu: Some(CpuStats {
                aggregate: CpuTimes {
                    user: 40,
                    nice: 2,
                    sys: 20,
                    idle: 300,
                    wait: 8,
                },
                per_cpu: vec![
                    CpuTimes {
                        user: 25,
                        nice: 1,
                        sys: 10,
                        idle: 150,
                        wait: 4,
                    },
                    CpuTimes {
                        user: 15,
                        nice: 1,
                        sys: 10,
                        idle: 150,
                        wait: 4,
                    },
                ],
            }),
            memory: Some(MemoryStats {
                total: 8_000,
                free: 1_000,
                used: 7_000,
                actual_free: 5_000,
                actual_used: 3_000,
            }),
            swap: Some(SwapStats {
                total: 2_000,
                used: 500,
                free: 1_500,
            }),
            uptime: Some(3600.5),
            load: Some(LoadAverage {
                one: 0.5,
                five: 0.4,
                fifteen: 0.3,
            }),
            net_dev: Some(NET_DEV_SAMPLE.as_bytes().to_vec()),
        }
    }
}

fn unavailable<T>(what: &str) -> Result<T> {
    Err(CoreError::system_info(format!("{} unavailable", what)))
}

impl MetricSource for FakeSource {
    fn cpu_times(&self) -> Result<CpuStats> {
        self.cpu.clone().map_or_else(|| unavailable("cpu"), Ok)
    }

    fn memory(&self) -> Result<MemoryStats> {
        self.memory.map_or_else(|| unavailable("memory"), Ok)
    }

    fn swap(&self) -> Result<SwapStats> {
        self.swap.map_or_else(|| unavailable("swap"), Ok)
    }

    fn uptime(&self) -> Result<f64> {
        self.uptime.map_or_else(|| unavailable("uptime"), Ok)
    }

    fn load_average(&self) -> Result<LoadAverage> {
        self.load.map_or_else(|| unavailable("load"), Ok)
    }

    fn net_dev(&self) -> Result<Box<dyn BufRead>> {
        match &self.net_dev {
            Some(table) => Ok(Box::new(Cursor::new(table.clone()))),
            None => Err(CoreError::source_unavailable(
                "/proc/net/dev",
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            )),
        }
    }

    fn platform_name(&self) -> &'static str {
        "fake"
    }
}
