use crate::{
    error::Result,
    model::{series_name, Series, Value, NET_COLUMNS},
    platform::MetricSource,
};
use std::io::BufRead;

pub const CATEGORY: &str = "network";

/// Collect one series per interface listed in the network counter table.
///
/// Series come back in the order the interfaces appear in the table. Header
/// lines are skipped; a failure to open or read the table aborts the whole
/// collection.
pub fn collect(source: &dyn MetricSource, prefix: &str) -> Result<Vec<Series>> {
    let mut reader = source.net_dev()?;

    let mut series = Vec::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        // Interface names are arbitrary bytes; decode lossily instead of failing the table
        let line = String::from_utf8_lossy(&buf);
        if let Some(iface) = parse_iface_line(prefix, line.trim_end_matches(['\r', '\n'])) {
            series.push(iface);
        }
    }

    Ok(series)
}

/// Parse one `/proc/net/dev` line into a single-row series named after the interface.
///
/// Returns `None` for lines without a `:` separator. Counters that are
/// missing or not integers are recorded as `0`.
pub fn parse_iface_line(prefix: &str, line: &str) -> Option<Series> {
    let (label, data) = line.split_once(':')?;
    let iface = label.trim();
    if iface.is_empty() {
        return None;
    }

    let mut tokens = data.split_whitespace();
    let row: Vec<Value> = NET_COLUMNS
        .iter()
        .map(|column| {
            let token = tokens.next();
            let value = token.and_then(|t| t.parse::<i64>().ok()).unwrap_or_else(|| {
                tracing::debug!(iface, column, token, "Substituting 0 for unreadable counter");
                0
            });
            Value::Int(value)
        })
        .collect();

    let mut series = Series::new(series_name(prefix, iface), NET_COLUMNS).ok()?;
    series.push_row(row).ok()?;
    Some(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::CoreError, platform::fake::FakeSource};

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().copied().map(Value::Int).collect()
    }

    #[test]
    fn test_parse_well_formed_line() {
        let series = parse_iface_line("", "eth0: 100 2 0 0 0 0 0 0 200 3 0 0 0 0 0 0").unwrap();

        assert_eq!(series.name(), "eth0");
        assert_eq!(series.columns(), NET_COLUMNS);
        assert_eq!(
            series.rows(),
            &[ints(&[100, 2, 0, 0, 0, 0, 0, 0, 200, 3, 0, 0, 0, 0, 0, 0])]
        );
    }

    #[test]
    fn test_parse_applies_prefix() {
        let series = parse_iface_line("host01", "  eth0: 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16").unwrap();

        assert_eq!(series.name(), "host01.eth0");
        assert_eq!(series.rows()[0], ints(&(1..=16).collect::<Vec<_>>()));
    }

    #[test]
    fn test_parse_without_space_after_colon() {
        let series = parse_iface_line("", "eth1:5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20").unwrap();

        assert_eq!(series.name(), "eth1");
        assert_eq!(series.rows()[0][0], Value::Int(5));
        assert_eq!(series.rows()[0][15], Value::Int(20));
    }

    #[test]
    fn test_non_numeric_token_becomes_zero() {
        let series = parse_iface_line("", "eth0: 100 oops 0 0 0 0 0 0 200 3 0 0 0 0 0 0").unwrap();

        assert_eq!(series.rows()[0][0], Value::Int(100));
        assert_eq!(series.rows()[0][1], Value::Int(0));
        assert_eq!(series.rows()[0][8], Value::Int(200));
    }

    #[test]
    fn test_short_line_is_zero_filled() {
        let series = parse_iface_line("", "wlan0: 7 8 9").unwrap();

        let mut expected = ints(&[7, 8, 9]);
        expected.resize(NET_COLUMNS.len(), Value::Int(0));
        assert_eq!(series.rows()[0], expected);
    }

    #[test]
    fn test_extra_tokens_are_ignored() {
        let line = format!("eth0: {} 99 98", (1..=16).map(|v| v.to_string()).collect::<Vec<_>>().join(" "));
        let series = parse_iface_line("", &line).unwrap();

        assert_eq!(series.rows()[0].len(), NET_COLUMNS.len());
        assert_eq!(series.rows()[0][15], Value::Int(16));
    }

    #[test]
    fn test_header_lines_are_skipped() {
        assert!(parse_iface_line("", "Inter-|   Receive                |  Transmit").is_none());
        assert!(parse_iface_line("", " face |bytes    packets errs drop").is_none());
        assert!(parse_iface_line("", "").is_none());
        assert!(parse_iface_line("", "   : 1 2 3").is_none());
    }

    #[test]
    fn test_collect_in_table_order() {
        let source = FakeSource::default();
        let series = collect(&source, "").unwrap();

        let names: Vec<&str> = series.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["lo", "eth0"]);
        assert_eq!(series[0].rows()[0][0], Value::Int(123456));
        assert_eq!(series[0].rows()[0][9], Value::Int(789));
    }

    #[test]
    fn test_collect_survives_non_utf8_line() {
        let mut table = b"    lo: 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16\n".to_vec();
        table.extend_from_slice(b"  w\xfflan: 5 0 0 0 0 0 0 0 6 0 0 0 0 0 0 0\n");
        table.extend_from_slice(b"  eth1: 7 0 0 0 0 0 0 0 8 0 0 0 0 0 0 0\n");

        let source = FakeSource {
            net_dev: Some(table),
            ..FakeSource::default()
        };
        let series = collect(&source, "").unwrap();

        let names: Vec<&str> = series.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["lo", "w\u{fffd}lan", "eth1"]);
        assert_eq!(series[1].rows()[0][0], Value::Int(5));
        assert_eq!(series[2].rows()[0][8], Value::Int(8));
    }

    #[test]
    fn test_collect_last_line_without_newline() {
        let source = FakeSource {
            net_dev: Some(b"  eth0: 100 2 0 0 0 0 0 0 200 3 0 0 0 0 0 0".to_vec()),
            ..FakeSource::default()
        };
        let series = collect(&source, "").unwrap();

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].rows()[0][15], Value::Int(0));
        assert_eq!(series[0].rows()[0][9], Value::Int(3));
    }

    #[test]
    fn test_collect_header_only_table() {
        let source = FakeSource {
            net_dev: Some(b"Inter-|   Receive |  Transmit\n face |bytes packets\n".to_vec()),
            ..FakeSource::default()
        };

        assert!(collect(&source, "").unwrap().is_empty());
    }

    #[test]
    fn test_collect_unavailable_source() {
        let source = FakeSource {
            net_dev: None,
            ..FakeSource::default()
        };

        assert!(matches!(
            collect(&source, "").unwrap_err(),
            CoreError::SourceUnavailable { .. }
        ));
    }
}
