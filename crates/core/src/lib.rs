//! Host metrics collection and shaping.
//!
//! Collectors query a [`MetricSource`] for CPU, memory, swap, uptime, load
//! average and network counters and shape each category into a [`Series`],
//! a named table with fixed columns. [`MetricsCollector`] runs them all once.

pub mod config;
pub mod error;
pub mod metrics;
pub mod model;
pub mod platform;

pub use config::{Config, SinkConfig};
pub use error::{CoreError, Result};
pub use metrics::MetricsCollector;
pub use model::*;
pub use platform::MetricSource;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_name_prefix() {
        assert_eq!(series_name("host01", "mem"), "host01.mem");
        assert_eq!(series_name("", "mem"), "mem");
    }

    #[test]
    fn test_series_rejects_empty_name() {
        assert!(matches!(
            Series::new("", MEM_COLUMNS),
            Err(CoreError::EmptySeriesName)
        ));
    }

    #[test]
    fn test_series_rejects_wrong_row_width() {
        let mut series = Series::new("swap", SWAP_COLUMNS).unwrap();

        let err = series.push_row(vec![Value::Int(1), Value::Int(2)]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::RowWidth {
                expected: 3,
                actual: 2,
                ..
            }
        ));
        assert!(series.rows().is_empty());

        series
            .push_row(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
            .unwrap();
        assert_eq!(series.rows().len(), 1);
    }

    #[test]
    fn test_net_columns_schema() {
        assert_eq!(NET_COLUMNS.len(), 16);
        assert_eq!(NET_COLUMNS[0], "recv_bytes");
        assert_eq!(NET_COLUMNS[8], "trans_bytes");
        assert_eq!(NET_COLUMNS[15], "trans_compressed");
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Int(42).to_string(), "42");
        assert_eq!(Value::Float(0.25).to_string(), "0.25");
        assert_eq!(Value::from("cpu0").to_string(), "cpu0");
    }

    #[test]
    fn test_value_from_large_counter_saturates() {
        assert_eq!(Value::from(u64::MAX), Value::Int(i64::MAX));
        assert_eq!(Value::from(7u64), Value::Int(7));
    }

    #[test]
    fn test_series_serialization() {
        let mut series = Series::new("host.cpu", &["id", "user"]).unwrap();
        series
            .push_row(vec![Value::from("cpu"), Value::Int(12)])
            .unwrap();

        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "host.cpu",
                "columns": ["id", "user"],
                "rows": [["cpu", 12]],
            })
        );
    }

    #[test]
    fn test_cpu_times_total() {
        let times = CpuTimes {
            user: 1,
            nice: 2,
            sys: 3,
            idle: 4,
            wait: 5,
        };
        assert_eq!(times.total(), 15);
    }
}
