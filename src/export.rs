//! Export Module
//!
//! Writes the generated flow table as CSV, JSON or JSON Lines, renders the
//! allocation summary for humans or tools, and draws the address graph as
//! Graphviz DOT.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::net::Ipv4Addr;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::records::FlowRecord;
use crate::simulator::SimulationPlan;
use crate::window::Window;

/// Output format for the record table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
    JsonLines, // One JSON object per line (JSONL)
}

impl OutputFormat {
    /// File extension used for derived output names.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::JsonLines => "jsonl",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "jsonl" | "jsonlines" => Ok(Self::JsonLines),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
            Self::JsonLines => write!(f, "jsonl"),
        }
    }
}

/// Output file name derived from the window, e.g.
/// `simulated_data_23062020_1100_to_24062020_1100.csv`.
pub fn default_file_name(window: &Window, format: OutputFormat) -> String {
    format!(
        "simulated_data_{}_to_{}.{}",
        window.start().format("%d%m%Y_%H%M"),
        window.end().format("%d%m%Y_%H%M"),
        format.extension()
    )
}

/// Writes records to any writer in the given format.
pub fn write_records<W: Write>(records: &[FlowRecord], format: OutputFormat, writer: W) -> Result<()> {
    match format {
        OutputFormat::Csv => {
            let mut csv = csv::Writer::from_writer(writer);
            for record in records {
                csv.serialize(record).context("Failed to write CSV row")?;
            }
            csv.flush().context("Failed to flush CSV output")?;
        }
        OutputFormat::Json => {
            let mut writer = writer;
            serde_json::to_writer_pretty(&mut writer, records).context("Failed to write JSON")?;
            writeln!(writer)?;
        }
        OutputFormat::JsonLines => {
            let mut writer = writer;
            for record in records {
                serde_json::to_writer(&mut writer, record).context("Failed to write JSON line")?;
                writeln!(writer)?;
            }
        }
    }
    Ok(())
}

/// Writes records to `path`, replacing any existing file.
pub fn export_records(path: &Path, records: &[FlowRecord], format: OutputFormat) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_records(records, format, &mut writer)?;
    writer
        .flush()
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;
    Ok(())
}

/// JSON-serializable allocation report
#[derive(Serialize)]
pub struct JsonSummary {
    pub version: &'static str,
    pub window_start: String,
    pub window_end: String,
    pub simulated_until: String,
    pub phase_minutes: usize,
    pub duration_minutes: usize,
    pub requested_total: u64,
    pub achieved_total: u64,
    pub discrepancy: i64,
    pub relative_discrepancy: f64,
    pub per_minute: JsonPerMinute,
}

/// Per-minute count statistics
#[derive(Serialize)]
pub struct JsonPerMinute {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

impl From<&SimulationPlan> for JsonSummary {
    fn from(plan: &SimulationPlan) -> Self {
        let summary = plan.allocation.summary();
        Self {
            version: "1.0",
            window_start: plan.window.start().format("%Y-%m-%dT%H:%M:%S").to_string(),
            window_end: plan.window.end().format("%Y-%m-%dT%H:%M:%S").to_string(),
            simulated_until: plan
                .window
                .end_exclusive()
                .format("%Y-%m-%dT%H:%M:%S")
                .to_string(),
            phase_minutes: plan.phase.minutes(),
            duration_minutes: summary.duration_minutes,
            requested_total: summary.requested_total,
            achieved_total: summary.achieved_total,
            discrepancy: summary.discrepancy,
            relative_discrepancy: summary.relative_discrepancy,
            per_minute: JsonPerMinute {
                mean: summary.mean_per_minute,
                std_dev: summary.std_dev_per_minute,
                min: summary.min_per_minute,
                max: summary.max_per_minute,
                median: summary.median_per_minute,
            },
        }
    }
}

/// Exports the allocation summary as pretty-printed JSON
pub fn export_summary_json(plan: &SimulationPlan) -> String {
    let summary = JsonSummary::from(plan);
    serde_json::to_string_pretty(&summary).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

/// Exports the allocation summary as formatted text
pub fn export_summary_text(plan: &SimulationPlan) -> String {
    let summary = plan.allocation.summary();
    let mut output = String::new();

    output.push_str(&format!(
        "--- Allocation Report ---\nWindow: {}\nPhase: {} after 11:00\nRequested: {}\nGenerated: {} ({:+}, {:+.3}%)\n",
        plan.window,
        plan.phase,
        summary.requested_total,
        summary.achieved_total,
        summary.discrepancy,
        summary.relative_discrepancy * 100.0,
    ));
    output.push_str(&"-".repeat(40));
    output.push('\n');
    output.push_str(&format!(
        "Per minute: mean {:.2} | std {:.2} | min {} | median {} | max {}\n",
        summary.mean_per_minute,
        summary.std_dev_per_minute,
        summary.min_per_minute,
        summary.median_per_minute,
        summary.max_per_minute,
    ));

    output
}

/// Renders the source → destination graph as Graphviz DOT.
///
/// Parallel flows between the same ordered pair collapse into one edge
/// labelled with the flow count.
pub fn render_dot(records: &[FlowRecord]) -> String {
    let mut edges: BTreeMap<(Ipv4Addr, Ipv4Addr), usize> = BTreeMap::new();
    for record in records {
        *edges
            .entry((record.source_ip, record.destination_ip))
            .or_default() += 1;
    }

    let mut output = String::from("digraph flows {\n    node [shape=ellipse, fontsize=7];\n");
    for ((src, dst), count) in &edges {
        output.push_str(&format!(
            "    \"{}\" -> \"{}\" [label=\"{}\"];\n",
            src, dst, count
        ));
    }
    output.push_str("}\n");
    output
}

/// Writes the DOT graph to `path`.
pub fn export_dot(path: &Path, records: &[FlowRecord]) -> Result<()> {
    std::fs::write(path, render_dot(records))
        .with_context(|| format!("Failed to write graph file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamps::FlowTimestamp;
    use chrono::NaiveDateTime;

    fn record(src: [u8; 4], dst: [u8; 4]) -> FlowRecord {
        FlowRecord {
            bytes: 4500.5,
            packets: 4,
            protocol: 6,
            source_ip: Ipv4Addr::from(src),
            destination_ip: Ipv4Addr::from(dst),
            timestamp: FlowTimestamp::new(
                NaiveDateTime::parse_from_str("2020-06-23 11:00:07.412", "%Y-%m-%d %H:%M:%S%.3f")
                    .unwrap(),
            ),
        }
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(
            "jsonl".parse::<OutputFormat>().unwrap(),
            OutputFormat::JsonLines
        );
        assert!("parquet".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::JsonLines.to_string(), "jsonl");
    }

    #[test]
    fn test_default_file_name() {
        let window = Window::parse("23/6/2020 11:00", "24/6/2020 11:00").unwrap();
        assert_eq!(
            default_file_name(&window, OutputFormat::Csv),
            "simulated_data_23062020_1100_to_24062020_1100.csv"
        );
    }

    #[test]
    fn test_csv_columns() {
        let mut buf = Vec::new();
        write_records(&[record([10, 0, 0, 1], [10, 0, 0, 2])], OutputFormat::Csv, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some("bytes,packets,protocol,sourceIP,Destination IP,timestamp")
        );
        assert_eq!(
            lines.next(),
            Some("4500.5,4,6,10.0.0.1,10.0.0.2,23/06/2020 11:00:07.412")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_jsonl_one_object_per_line() {
        let records = vec![
            record([10, 0, 0, 1], [10, 0, 0, 2]),
            record([10, 0, 0, 2], [10, 0, 0, 1]),
        ];
        let mut buf = Vec::new();
        write_records(&records, OutputFormat::JsonLines, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["sourceIP"], "10.0.0.1");
        assert_eq!(first["Destination IP"], "10.0.0.2");
        assert_eq!(first["timestamp"], "23/06/2020 11:00:07.412");
    }

    #[test]
    fn test_export_records_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flows.json");
        let records = vec![record([1, 2, 3, 4], [5, 6, 7, 8])];

        export_records(&path, &records, OutputFormat::Json).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 1);
        assert_eq!(parsed[0]["packets"], 4);
    }

    #[test]
    fn test_render_dot_collapses_pairs() {
        let records = vec![
            record([10, 0, 0, 1], [10, 0, 0, 2]),
            record([10, 0, 0, 1], [10, 0, 0, 2]),
            record([10, 0, 0, 2], [10, 0, 0, 1]),
        ];
        let dot = render_dot(&records);

        assert!(dot.starts_with("digraph flows {"));
        assert!(dot.contains("\"10.0.0.1\" -> \"10.0.0.2\" [label=\"2\"];"));
        assert!(dot.contains("\"10.0.0.2\" -> \"10.0.0.1\" [label=\"1\"];"));
        assert_eq!(dot.matches("->").count(), 2);
    }

    fn default_plan() -> SimulationPlan {
        let simulator = crate::simulator::Simulator::new(&crate::config::Config::default()).unwrap();
        simulator.plan(30_000).unwrap()
    }

    #[test]
    fn test_summary_json() {
        let parsed: serde_json::Value =
            serde_json::from_str(&export_summary_json(&default_plan())).unwrap();

        assert_eq!(parsed["window_start"], "2020-06-23T11:00:00");
        assert_eq!(parsed["simulated_until"], "2020-06-24T11:00:00");
        assert_eq!(parsed["duration_minutes"], 1440);
        assert_eq!(parsed["achieved_total"], 29_983);
        assert_eq!(parsed["discrepancy"], -17);
        assert_eq!(parsed["per_minute"]["max"], 35.0);
        assert_eq!(parsed["per_minute"]["min"], 6.0);
    }

    #[test]
    fn test_summary_text() {
        let text = export_summary_text(&default_plan());
        assert!(text.starts_with("--- Allocation Report ---"));
        assert!(text.contains("Requested: 30000"));
        assert!(text.contains("Generated: 29983 (-17,"));
        assert!(text.contains("min 6 | median"));
    }
}
