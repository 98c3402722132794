use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Columns of the `cpu` series
pub const CPU_COLUMNS: &[&str] = &["id", "user", "nice", "sys", "idle", "wait", "total"];

/// Columns of the `mem` series
pub const MEM_COLUMNS: &[&str] = &["free", "used", "actualfree", "actualused", "total"];

/// Columns of the `swap` series
pub const SWAP_COLUMNS: &[&str] = &["free", "used", "total"];

/// Columns of the `uptime` series
pub const UPTIME_COLUMNS: &[&str] = &["length"];

/// Columns of the `load` series
pub const LOAD_COLUMNS: &[&str] = &["one", "five", "fifteen"];

/// Columns of every per-interface network series, in `/proc/net/dev` order
pub const NET_COLUMNS: &[&str] = &[
    "recv_bytes",
    "recv_packets",
    "recv_errs",
    "recv_drop",
    "recv_fifo",
    "recv_frame",
    "recv_compressed",
    "recv_multicast",
    "trans_bytes",
    "trans_packets",
    "trans_errs",
    "trans_drop",
    "trans_fifo",
    "trans_colls",
    "trans_carrier",
    "trans_compressed",
];

/// A single cell of a series row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Str(v) => f.write_str(v),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        // Kernel counters never realistically exceed i64::MAX
        Self::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

/// A named table holding one metric category's snapshot.
///
/// Columns are fixed when the series is created. Every row pushed afterwards
/// must have exactly one value per column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Series {
    pub fn new<S: Into<String>>(name: S, columns: &[&str]) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(CoreError::EmptySeriesName);
        }

        Ok(Self {
            name,
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        })
    }

    /// Append a row, rejecting it when its width doesn't match the columns
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(CoreError::RowWidth {
                series: self.name.clone(),
                expected: self.columns.len(),
                actual: row.len(),
            });
        }

        self.rows.push(row);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }
}

/// Build a series name from an optional prefix and a base name.
///
/// An empty prefix yields the bare base name, otherwise `prefix.base`.
pub fn series_name(prefix: &str, base: &str) -> String {
    if prefix.is_empty() {
        base.to_string()
    } else {
        format!("{}.{}", prefix, base)
    }
}

/// Raw CPU tick counters for one CPU (or the aggregate of all CPUs)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTimes {
    pub user: u64,
    pub nice: u64,
    pub sys: u64,
    pub idle: u64,
    pub wait: u64,
}

impl CpuTimes {
    pub fn total(&self) -> u64 {
        self.user
            .saturating_add(self.nice)
            .saturating_add(self.sys)
            .saturating_add(self.idle)
            .saturating_add(self.wait)
    }
}

/// CPU counters as reported by the metric source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpuStats {
    pub aggregate: CpuTimes,
    /// One entry per logical CPU, in the order the source reports them
    pub per_cpu: Vec<CpuTimes>,
}

/// Memory information in bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryStats {
    pub total: u64,
    pub free: u64,
    pub used: u64,
    /// Free memory including reclaimable buffers and cache
    pub actual_free: u64,
    /// Used memory excluding reclaimable buffers and cache
    pub actual_used: u64,
}

/// Swap information in bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwapStats {
    pub total: u64,
    pub used: u64,
    pub free: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoadAverage {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
}
