//! Session export documents

use chrono::NaiveDate;
use serde_json::json;

use super::sessions::Session;

pub const APP_LABEL: &str = "Time Check";
pub const AUTHOR: &str = "Daniel Nylander";
pub const WEBSITE: &str = "www.autismappar.se";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }

    /// Render `sessions` in this format
    pub fn render(&self, sessions: &[Session]) -> String {
        match self {
            ExportFormat::Csv => sessions_to_csv(sessions),
            ExportFormat::Json => sessions_to_json(sessions),
        }
    }
}

/// Suggested download name, e.g. `tidskollen_2026-05-01.csv`
pub fn export_file_name(format: ExportFormat, date: NaiveDate) -> String {
    format!("tidskollen_{}.{}", date.format("%Y-%m-%d"), format.extension())
}

/// Export sessions as CSV with a trailing footer line
pub fn sessions_to_csv(sessions: &[Session]) -> String {
    let mut out = String::new();
    push_row(&mut out, &["Date", "Duration (min)", "Completed"]);
    for s in sessions {
        let duration = s.duration.to_string();
        let completed = if s.completed { "Yes" } else { "No" };
        push_row(&mut out, &[&s.date, &duration, completed]);
    }
    out.push_str("\r\n");
    push_row(&mut out, &[&footer()]);
    out
}

/// Export sessions as pretty-printed JSON
pub fn sessions_to_json(sessions: &[Session]) -> String {
    let doc = json!({
        "sessions": sessions,
        "_exported_by": footer_label(),
        "_author": AUTHOR,
        "_website": WEBSITE,
    });
    // Serializing a json! value cannot fail
    serde_json::to_string_pretty(&doc).unwrap_or_default()
}

fn footer_label() -> String {
    format!("{} v{}", APP_LABEL, VERSION)
}

fn footer() -> String {
    format!("{} - {}", footer_label(), WEBSITE)
}

fn push_row(out: &mut String, fields: &[&str]) {
    let row: Vec<String> = fields.iter().map(|f| escape_field(f)).collect();
    out.push_str(&row.join(","));
    out.push_str("\r\n");
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sessions() -> Vec<Session> {
        vec![
            Session {
                date: "2026-05-01 08:30".to_string(),
                duration: 5,
                completed: true,
            },
            Session {
                date: "2026-05-01 09:00".to_string(),
                duration: 10,
                completed: false,
            },
        ]
    }

    #[test]
    fn csv_has_header_rows_and_footer() {
        let csv = sessions_to_csv(&sessions());
        let lines: Vec<&str> = csv.split("\r\n").collect();
        assert_eq!(lines[0], "Date,Duration (min),Completed");
        assert_eq!(lines[1], "2026-05-01 08:30,5,Yes");
        assert_eq!(lines[2], "2026-05-01 09:00,10,No");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], format!("Time Check v{} - www.autismappar.se", VERSION));
    }

    #[test]
    fn csv_quotes_special_fields() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn json_carries_sessions_and_attribution() {
        let doc: serde_json::Value = serde_json::from_str(&sessions_to_json(&sessions())).unwrap();
        assert_eq!(doc["sessions"].as_array().unwrap().len(), 2);
        assert_eq!(doc["sessions"][0]["duration"], 5);
        assert_eq!(doc["sessions"][1]["completed"], false);
        assert_eq!(doc["_author"], AUTHOR);
        assert_eq!(doc["_website"], WEBSITE);
    }

    #[test]
    fn file_name_uses_date_and_extension() {
        let date = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        assert_eq!(export_file_name(ExportFormat::Csv, date), "tidskollen_2026-05-01.csv");
        assert_eq!(export_file_name(ExportFormat::Json, date), "tidskollen_2026-05-01.json");
    }
}
