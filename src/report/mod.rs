use std::io::Write;

use chrono::{DateTime, Utc};
use tabwriter::TabWriter;
use tracing::debug;

use crate::error::TopError;
use crate::metrics::{MetricsRecord, NodeRecord, PodRecord};
use crate::parsing::Quantity;
use crate::types::{MEASURED_RESOURCES, NODE_COLUMNS, POD_COLUMNS};

const MIB: i64 = 1024 * 1024;

/// RFC 1123 with a numeric zone, e.g. `Mon, 02 Jan 2006 15:04:05 -0700`.
const TIMESTAMP_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Prints metrics tables to `out`, aligning columns on the way.
pub struct TopPrinter<W: Write> {
    out: W,
}

impl<W: Write> TopPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print a node table. Writes nothing at all for an empty list.
    pub fn print_node_metrics(&mut self, records: &[NodeRecord]) -> Result<(), TopError> {
        if records.is_empty() {
            return Ok(());
        }
        self.write_aligned(&render_node_table(records))
    }

    /// Print a pod table, optionally followed per pod by its container rows.
    /// Writes nothing at all for an empty list.
    pub fn print_pod_metrics(&mut self, records: &[PodRecord], print_containers: bool) -> Result<(), TopError> {
        if records.is_empty() {
            return Ok(());
        }
        self.write_aligned(&render_pod_table(records, print_containers))
    }

    fn write_aligned(&mut self, table: &str) -> Result<(), TopError> {
        let mut tw = TabWriter::new(&mut self.out).minwidth(10).padding(3);
        tw.write_all(table.as_bytes())?;
        tw.flush()?;
        debug!("flushed table of {} rows", table.lines().count());
        Ok(())
    }
}

/// Tab-delimited node table, header first. Empty input gives an empty string.
pub fn render_node_table(records: &[NodeRecord]) -> String {
    let mut out = String::new();
    if records.is_empty() {
        return out;
    }
    push_row(&mut out, NODE_COLUMNS.iter().map(|c| c.to_string()));
    for r in records {
        push_row(
            &mut out,
            std::iter::once(r.name().to_string())
                .chain(usage_cells(r))
                .chain(std::iter::once(format_timestamp(r.timestamp()))),
        );
    }
    out
}

/// Tab-delimited pod table, header first. Container rows carry an empty
/// namespace cell and no timestamp cell.
pub fn render_pod_table(records: &[PodRecord], include_containers: bool) -> String {
    let mut out = String::new();
    if records.is_empty() {
        return out;
    }
    push_row(&mut out, POD_COLUMNS.iter().map(|c| c.to_string()));
    for pod in records {
        push_row(
            &mut out,
            [pod.namespace().to_string(), pod.name().to_string()]
                .into_iter()
                .chain(usage_cells(pod))
                .chain(std::iter::once(format_timestamp(pod.timestamp()))),
        );
        if include_containers {
            for c in pod.containers() {
                push_row(
                    &mut out,
                    [c.namespace().to_string(), c.name().to_string()]
                        .into_iter()
                        .chain(usage_cells(c)),
                );
            }
        }
    }
    out
}

/// Format a usage value for the resource named `resource`.
///
/// CPU prints in millicores, memory and storage in whole MiB (truncated).
/// Any other resource prints its raw value.
pub fn format_usage(resource: &str, quantity: &Quantity) -> String {
    match resource {
        "cpu" => format!("{}m", quantity.milli_value()),
        "memory" | "storage" => format!("{} Mi", quantity.value() / MIB),
        _ => quantity.value().to_string(),
    }
}

/// Sample times are kept in UTC, so the zone always prints as `+0000`.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

fn usage_cells<'a, R: MetricsRecord>(record: &'a R) -> impl Iterator<Item = String> + 'a {
    MEASURED_RESOURCES
        .into_iter()
        .map(move |res| format_usage(res.as_str(), &record.resource_usage(res)))
}

fn push_row(out: &mut String, cells: impl Iterator<Item = String>) {
    let cells: Vec<String> = cells.collect();
    out.push_str(&cells.join("\t"));
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::ResourceUsage;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2017, 1, 2, 15, 4, 5).unwrap()
    }

    fn usage(pairs: &[(&str, &str)]) -> ResourceUsage {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.parse::<Quantity>().unwrap()))
            .collect()
    }

    #[test]
    fn test_format_usage() {
        assert_eq!(format_usage("cpu", &"250m".parse().unwrap()), "250m");
        assert_eq!(format_usage("cpu", &"2".parse().unwrap()), "2000m");
        assert_eq!(format_usage("memory", &"128Mi".parse().unwrap()), "128 Mi");
        assert_eq!(format_usage("memory", &"1048575".parse().unwrap()), "0 Mi");
        assert_eq!(format_usage("storage", &"1Gi".parse().unwrap()), "1024 Mi");
        assert_eq!(format_usage("nvidia.com/gpu", &"3".parse().unwrap()), "3");
    }

    #[test]
    fn test_zero_renders_with_units() {
        let zero = Quantity::default();
        assert_eq!(format_usage("cpu", &zero), "0m");
        assert_eq!(format_usage("memory", &zero), "0 Mi");
        assert_eq!(format_usage("storage", &zero), "0 Mi");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(ts()), "Mon, 02 Jan 2017 15:04:05 +0000");
    }

    #[test]
    fn test_render_node_table() {
        let record = NodeRecord::new(
            "node1",
            usage(&[("cpu", "250m"), ("memory", "134217728"), ("storage", "0")]),
            ts(),
        );
        assert_eq!(
            render_node_table(&[record]),
            "NAME\tCPU\tMEMORY\tSTORAGE\tTIMESTAMP\n\
             node1\t250m\t128 Mi\t0 Mi\tMon, 02 Jan 2017 15:04:05 +0000\n"
        );
    }

    #[test]
    fn test_render_empty_tables() {
        assert_eq!(render_node_table(&[]), "");
        assert_eq!(render_pod_table(&[], true), "");
    }

    #[test]
    fn test_printer_writes_nothing_for_empty_input() {
        let mut printer = TopPrinter::new(Vec::new());
        printer.print_node_metrics(&[]).unwrap();
        printer.print_pod_metrics(&[], true).unwrap();
        assert!(printer.into_inner().is_empty());
    }

    #[test]
    fn test_printer_aligns_columns() {
        let records = vec![
            NodeRecord::new("n", usage(&[("cpu", "1")]), ts()),
            NodeRecord::new("a-much-longer-node-name", usage(&[("cpu", "25m")]), ts()),
        ];
        let mut printer = TopPrinter::new(Vec::new());
        printer.print_node_metrics(&records).unwrap();
        let text = String::from_utf8(printer.into_inner()).unwrap();

        assert!(!text.contains('\t'));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("NAME "));
        let cpu_col = lines[0].find("CPU").unwrap();
        assert_eq!(lines[1].find("1000m"), Some(cpu_col));
        assert_eq!(lines[2].find("25m"), Some(cpu_col));
        assert!(lines[2].ends_with("Mon, 02 Jan 2017 15:04:05 +0000"));
    }
}
