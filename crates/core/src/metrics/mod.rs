pub mod cpu;
pub mod memory;
pub mod network;
pub mod system;

use crate::{error::Result, model::Series, platform::MetricSource};

/// Runs every collector once against a metric source and gathers the results.
///
/// Collectors are independent: one failing is logged and skipped without
/// affecting the others.
pub struct MetricsCollector {
    source: Box<dyn MetricSource>,
}

impl MetricsCollector {
    pub fn new(source: Box<dyn MetricSource>) -> Self {
        Self { source }
    }

    /// Collector using the metric source for the current platform
    pub fn for_current_platform() -> Self {
        Self::new(crate::platform::default_source())
    }

    pub fn platform_name(&self) -> &'static str {
        self.source.platform_name()
    }

    /// Collect CPU, memory, swap, uptime, load and network series, in that order
    pub fn run(&self, prefix: &str) -> Vec<Series> {
        let source = self.source.as_ref();
        let mut data = Vec::new();

        let single: [(&str, Collect); 5] = [
            (cpu::CATEGORY, cpu::collect),
            (memory::MEM_CATEGORY, memory::collect_memory),
            (memory::SWAP_CATEGORY, memory::collect_swap),
            (system::UPTIME_CATEGORY, system::collect_uptime),
            (system::LOAD_CATEGORY, system::collect_load),
        ];
        for (category, collect) in single {
            gather(&mut data, category, collect(source, prefix).map(|s| vec![s]));
        }

        // Network yields one series per interface
        gather(&mut data, network::CATEGORY, network::collect(source, prefix));

        tracing::debug!(
            platform = self.source.platform_name(),
            count = data.len(),
            "Collected series"
        );

        data
    }
}

type Collect = fn(&dyn MetricSource, &str) -> Result<Series>;

fn gather(data: &mut Vec<Series>, category: &str, result: Result<Vec<Series>>) {
    match result {
        Ok(series) => data.extend(series),
        Err(e) => tracing::error!(collector = category, error = %e, "Collection failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::fake::FakeSource;

    fn names(series: &[Series]) -> Vec<&str> {
        series.iter().map(|s| s.name()).collect()
    }

    #[test]
    fn test_run_collects_everything_in_order() {
        let collector = MetricsCollector::new(Box::new(FakeSource::default()));
        let series = collector.run("host01");

        assert_eq!(
            names(&series),
            vec![
                "host01.cpu",
                "host01.mem",
                "host01.swap",
                "host01.uptime",
                "host01.load",
                "host01.lo",
                "host01.eth0",
            ]
        );
    }

    #[test]
    fn test_failing_collector_does_not_stop_others() {
        let source = FakeSource {
            cpu: None,
            swap: None,
            ..FakeSource::default()
        };
        let series = MetricsCollector::new(Box::new(source)).run("");

        assert_eq!(names(&series), vec!["mem", "uptime", "load", "lo", "eth0"]);
    }

    #[test]
    fn test_network_failure_keeps_other_series() {
        let source = FakeSource {
            net_dev: None,
            ..FakeSource::default()
        };
        let series = MetricsCollector::new(Box::new(source)).run("");

        assert_eq!(names(&series), vec!["cpu", "mem", "swap", "uptime", "load"]);
    }

    #[test]
    fn test_every_row_matches_column_count() {
        let series = MetricsCollector::new(Box::new(FakeSource::default())).run("h");

        for s in &series {
            for row in s.rows() {
                assert_eq!(row.len(), s.columns().len(), "series {}", s.name());
            }
        }
    }

    #[test]
    fn test_everything_failing_yields_empty_list() {
        let source = FakeSource {
            cpu: None,
            memory: None,
            swap: None,
            uptime: None,
            load: None,
            net_dev: None,
        };

        assert!(MetricsCollector::new(Box::new(source)).run("").is_empty());
    }
}
