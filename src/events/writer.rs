//! Rendering of generated events
//!
//! Events are written as JSON lines or CSV to any [`std::io::Write`]. The
//! binary points this at stdout; tests point it at a buffer.

use std::io::Write;
use tracing::{debug, instrument};

use crate::events::LoginAttempt;
use crate::simulation::SimulationResult;
use crate::types::OutputFormat;

/// Header row written before CSV output
pub const CSV_HEADER: &str = "time,actor_id,status,labels";

/// Writes event records in a configured format
#[derive(Debug, Clone, Copy)]
pub struct EventWriter {
    format: OutputFormat,
}

impl EventWriter {
    /// Create a writer for the given format
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Output format this writer renders
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write all events, one record per line
    #[instrument(skip(self, events, out), fields(event_count = events.len(), format = %self.format))]
    pub fn write_all<W: Write>(&self, events: &[LoginAttempt], out: &mut W) -> SimulationResult<()> {
        if self.format == OutputFormat::Csv {
            writeln!(out, "{}", CSV_HEADER)?;
        }

        for event in events {
            let line = self.render(event)?;
            writeln!(out, "{}", line)?;
        }

        out.flush()?;
        debug!("Wrote {} events", events.len());
        Ok(())
    }

    /// Render a single event without the trailing newline
    pub fn render(&self, event: &LoginAttempt) -> SimulationResult<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string(event)?),
            OutputFormat::Csv => Ok(Self::render_csv(event)),
        }
    }

    fn render_csv(event: &LoginAttempt) -> String {
        // Label pairs share one column as key=value;key=value
        let labels = event
            .labels
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{},{},{},{}",
            event.time.to_rfc3339(),
            event.actor_id.value(),
            event.status.code(),
            csv_escape(&labels)
        )
    }
}

/// Quote a CSV field when it holds a separator, quote or line break
fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::options::Labels;
    use crate::types::ActorId;
    use chrono::{TimeZone, Utc};

    fn sample_events() -> Vec<LoginAttempt> {
        let t = Utc.with_ymd_and_hms(2023, 12, 20, 5, 10, 0).unwrap();
        let mut labels = Labels::new();
        labels.insert("env".to_string(), "test".to_string());
        vec![
            LoginAttempt::failure(ActorId(1), t),
            LoginAttempt::success(ActorId(1), t).with_labels(labels),
        ]
    }

    #[test]
    fn test_json_lines_output() {
        let mut buffer = Vec::new();
        EventWriter::new(OutputFormat::Json).write_all(&sample_events(), &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["actor_id"], 1);
        assert_eq!(first["status"], 401);

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["labels"]["env"], "test");
    }

    #[test]
    fn test_csv_output_has_header() {
        let mut buffer = Vec::new();
        EventWriter::new(OutputFormat::Csv).write_all(&sample_events(), &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "2023-12-20T05:10:00+00:00,1,401,");
        assert_eq!(lines[2], "2023-12-20T05:10:00+00:00,1,200,env=test");
    }

    #[test]
    fn test_csv_quotes_label_values() {
        let t = Utc.with_ymd_and_hms(2023, 12, 20, 5, 10, 0).unwrap();
        let mut labels = Labels::new();
        labels.insert("note".to_string(), "a,b".to_string());
        labels.insert("quote".to_string(), "say \"hi\"".to_string());
        let event = LoginAttempt::success(ActorId(1), t).with_labels(labels);

        let row = EventWriter::new(OutputFormat::Csv).render(&event).unwrap();
        assert_eq!(row, r#"2023-12-20T05:10:00+00:00,1,200,"note=a,b;quote=say ""hi""""#);
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("env=test"), "env=test");
        assert_eq!(csv_escape(""), "");
        assert_eq!(csv_escape("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn test_empty_json_output() {
        let mut buffer = Vec::new();
        EventWriter::new(OutputFormat::Json).write_all(&[], &mut buffer).unwrap();
        assert!(buffer.is_empty());
    }
}
