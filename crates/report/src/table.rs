use std::io::{self, Write};
use sysflux_core::Series;

/// Print every series as a text table, in the order given.
///
/// Each table starts with a `#<index>: <name>` heading, followed by the
/// column names and one line per row. Cells are padded to the widest value
/// in their column.
pub fn render<W: Write + ?Sized>(out: &mut W, series: &[Series]) -> io::Result<()> {
    for (index, s) in series.iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "#{}: {}", index, s.name())?;

        let rows: Vec<Vec<String>> = s
            .rows()
            .iter()
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect();

        let widths: Vec<usize> = s
            .columns()
            .iter()
            .enumerate()
            .map(|(i, column)| {
                rows.iter()
                    .map(|row| row[i].len())
                    .fold(column.len(), usize::max)
            })
            .collect();

        write_line(out, s.columns().iter().map(String::as_str), &widths)?;
        for row in &rows {
            write_line(out, row.iter().map(String::as_str), &widths)?;
        }
    }

    out.flush()
}

fn write_line<'a, W, I>(out: &mut W, cells: I, widths: &[usize]) -> io::Result<()>
where
    W: Write + ?Sized,
    I: Iterator<Item = &'a str>,
{
    for (cell, width) in cells.zip(widths) {
        write!(out, "| {:<width$} ", cell, width = *width)?;
    }
    writeln!(out, "|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sysflux_core::{Value, LOAD_COLUMNS};

    fn render_to_string(series: &[Series]) -> String {
        let mut out = Vec::new();
        render(&mut out, series).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_render_table() {
        let mut load = Series::new("host.load", LOAD_COLUMNS).unwrap();
        load.push_row(vec![Value::Float(0.5), Value::Float(1.25), Value::Float(2.0)])
            .unwrap();

        let text = render_to_string(&[load]);
        assert_eq!(
            text,
            "\n#0: host.load\n| one | five | fifteen |\n| 0.5 | 1.25 | 2       |\n"
        );
    }

    #[test]
    fn test_render_keeps_series_order_and_every_row() {
        let mut cpu = Series::new("cpu", &["id", "user"]).unwrap();
        cpu.push_row(vec![Value::from("cpu"), Value::Int(1000)]).unwrap();
        cpu.push_row(vec![Value::from("cpu0"), Value::Int(7)]).unwrap();
        let empty = Series::new("eth0", &["recv_bytes"]).unwrap();

        let text = render_to_string(&[cpu, empty]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "",
                "#0: cpu",
                "| id   | user |",
                "| cpu  | 1000 |",
                "| cpu0 | 7    |",
                "",
                "#1: eth0",
                "| recv_bytes |",
            ]
        );
    }

    #[test]
    fn test_render_nothing() {
        assert_eq!(render_to_string(&[]), "");
    }
}
