//! Output rendering for the Docmost CLI.
//!
//! This module renders API results as an aligned table, `key: value` plain
//! text, or pretty-printed JSON, and prints the one-line status markers used
//! for success, warning and error messages.

use color_print::cformat;
use serde_json::Value;
use std::cell::RefCell;
use std::io::{self, Write};
use std::str::FromStr;
use strum::{EnumIter, IntoEnumIterator};
use unicode_width::UnicodeWidthStr;

use crate::endpoints::Endpoint;
use crate::envelope::extract_collection;

pub const JSON: &str = "json";
pub const TABLE: &str = "table";
pub const PLAIN: &str = "plain";

pub const NO_RESULTS: &str = "No results";
const COLUMN_GAP: &str = "  ";

#[derive(Debug, thiserror::Error)]
pub enum FormattingError {
    #[error("invalid output format {0}")]
    UnsupportedOutputFormat(String),
    #[error("JSON serialization error: {0}")]
    JsonSerializationError(#[from] serde_json::Error),
    #[error("failed to write output: {0}")]
    WriteError(#[from] io::Error),
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter)]
pub enum OutputFormat {
    Json,
    #[default]
    Table,
    Plain,
}

impl OutputFormat {
    pub fn names() -> Vec<&'static str> {
        OutputFormat::iter().map(|format| format.name()).collect()
    }

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Json => JSON,
            OutputFormat::Table => TABLE,
            OutputFormat::Plain => PLAIN,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = FormattingError;

    fn from_str(format_str: &str) -> Result<OutputFormat, FormattingError> {
        let normalized_format = format_str.trim().to_lowercase();
        match normalized_format.as_str() {
            JSON => Ok(OutputFormat::Json),
            TABLE => Ok(OutputFormat::Table),
            PLAIN => Ok(OutputFormat::Plain),
            _ => Err(FormattingError::UnsupportedOutputFormat(normalized_format)),
        }
    }
}

/// Text of a single scalar cell. Nested values are shown as compact JSON.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

pub fn format_json(data: &Value) -> Result<String, FormattingError> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// `key: value` lines for a record, records separated by a blank line for a
/// list, and the bare text for a scalar.
pub fn format_plain(data: &Value) -> String {
    match data {
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| format!("{}: {}", key, cell_text(value)))
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Array(items) => items
            .iter()
            .map(format_plain)
            .collect::<Vec<_>>()
            .join("\n\n"),
        other => cell_text(other),
    }
}

/// Aligned table of `rows`.
///
/// Without explicit columns, the keys of the first row are used. Rows that
/// are not records are listed one per line.
pub fn format_table(rows: &[Value], columns: Option<&[&str]>) -> String {
    let Some(first) = rows.first() else {
        return NO_RESULTS.to_string();
    };

    let columns: Vec<String> = match columns {
        Some(columns) => columns.iter().map(|column| column.to_string()).collect(),
        None => match first {
            Value::Object(map) => map.keys().cloned().collect(),
            _ => return rows.iter().map(cell_text).collect::<Vec<_>>().join("\n"),
        },
    };

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| row.get(column).map(cell_text).unwrap_or_default())
                .map(|text| text.replace(['\n', '\r'], " "))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            cells
                .iter()
                .map(|row| row[index].width())
                .chain(std::iter::once(column.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(table_line(&columns, &widths));
    lines.push(
        widths
            .iter()
            .map(|width| "─".repeat(*width))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP),
    );
    lines.extend(cells.iter().map(|row| table_line(row, &widths)));
    lines.join("\n")
}

fn table_line(cells: &[String], widths: &[usize]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let padding = width.saturating_sub(cell.width());
            format!("{}{}", cell, " ".repeat(padding))
        })
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    line.trim_end().to_string()
}

/// Renders a result in `format`.
///
/// Lists become tables in table format; a single record in table format is
/// rendered as plain text.
pub fn render(
    format: OutputFormat,
    data: &Value,
    columns: Option<&[&str]>,
) -> Result<String, FormattingError> {
    match format {
        OutputFormat::Json => format_json(data),
        OutputFormat::Plain => Ok(format_plain(data)),
        OutputFormat::Table => match data {
            Value::Array(rows) => Ok(format_table(rows, columns)),
            other => Ok(format_plain(other)),
        },
    }
}

/// Writes results and status lines.
///
/// Results and success messages go to the output writer; warnings go to the
/// error writer.
pub struct Renderer {
    format: OutputFormat,
    out: RefCell<Box<dyn Write>>,
    err: RefCell<Box<dyn Write>>,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self::with_writers(format, Box::new(io::stdout()), Box::new(io::stderr()))
    }

    pub fn with_writers(format: OutputFormat, out: Box<dyn Write>, err: Box<dyn Write>) -> Self {
        Self {
            format,
            out: RefCell::new(out),
            err: RefCell::new(err),
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn output(&self, data: &Value, columns: Option<&[&str]>) -> Result<(), FormattingError> {
        let text = render(self.format, data, columns)?;
        self.text(&text)
    }

    /// Renders the rows of a listing response, falling back to the whole body
    /// when it carries no collection.
    pub fn output_listing(&self, data: &Value, endpoint: &Endpoint) -> Result<(), FormattingError> {
        match (self.format, extract_collection(data, endpoint.collection_keys)) {
            (OutputFormat::Json, _) | (_, None) => self.output(data, endpoint.table_columns()),
            (_, Some(rows)) => {
                let rows = Value::Array(rows.to_vec());
                self.output(&rows, endpoint.table_columns())
            }
        }
    }

    pub fn text(&self, text: &str) -> Result<(), FormattingError> {
        let mut out = self.out.borrow_mut();
        writeln!(out, "{}", text)?;
        out.flush()?;
        Ok(())
    }

    pub fn message(&self, message: &str) -> Result<(), FormattingError> {
        self.text(message)
    }

    pub fn success(&self, message: &str) -> Result<(), FormattingError> {
        self.text(&cformat!("<green>✓</green> {}", message))
    }

    /// Warning on the error stream; best effort, like the error report itself.
    pub fn warning(&self, message: &str) {
        self.status_line(&cformat!("<yellow>!</yellow> {}", message));
    }

    fn status_line(&self, line: &str) {
        let mut err = self.err.borrow_mut();
        let _ = writeln!(err, "{}", line);
        let _ = err.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints;
    use serde_json::json;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn renderer(format: OutputFormat) -> (Renderer, SharedBuffer, SharedBuffer) {
        let out = SharedBuffer::default();
        let err = SharedBuffer::default();
        let renderer = Renderer::with_writers(format, Box::new(out.clone()), Box::new(err.clone()));
        (renderer, out, err)
    }

    #[test]
    fn test_format_names() {
        assert_eq!(OutputFormat::names(), vec!["json", "table", "plain"]);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn test_plain_record_and_list() {
        let record = json!({"id": "p1", "settings": {"a": 1}, "icon": null});
        let text = format_plain(&record);
        assert!(text.contains("id: p1"));
        assert!(text.contains(r#"settings: {"a":1}"#));

        let list = json!([{"id": "a"}, {"id": "b"}]);
        assert_eq!(format_plain(&list), "id: a\n\nid: b");
    }

    #[test]
    fn test_table_uses_selected_columns() {
        let rows = vec![
            json!({"id": "s1", "name": "Engineering", "slug": "eng", "extra": true}),
            json!({"id": "s22", "name": "HR", "slug": "hr"}),
        ];
        let table = format_table(&rows, Some(&["id", "name"]));
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "id   name");
        assert_eq!(lines[1], "───  ───────────");
        assert_eq!(lines[2], "s1   Engineering");
        assert_eq!(lines[3], "s22  HR");
        assert!(!table.contains("extra"));
    }

    #[test]
    fn test_table_defaults_to_first_row_keys() {
        let rows = vec![json!({"id": "g1", "name": "Admins"})];
        let table = format_table(&rows, None);
        assert!(table.starts_with("id"));
        assert!(table.contains("name"));
    }

    #[test]
    fn test_table_aligns_wide_characters() {
        let rows = vec![json!({"icon": "📘", "title": "Docs"}), json!({"icon": "x", "title": "Y"})];
        let table = format_table(&rows, Some(&["icon", "title"]));
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[2], "📘    Docs");
        assert_eq!(lines[3], "x     Y");
    }

    #[test]
    fn test_empty_list_has_no_results() {
        assert_eq!(render(OutputFormat::Table, &json!([]), None).unwrap(), NO_RESULTS);
        assert_eq!(render(OutputFormat::Json, &json!([]), None).unwrap(), "[]");
    }

    #[test]
    fn test_table_format_renders_record_as_plain() {
        let text = render(OutputFormat::Table, &json!({"id": "u1", "name": "Ada"}), None).unwrap();
        assert_eq!(text, "id: u1\nname: Ada");
    }

    #[test]
    fn test_output_listing_extracts_collection() {
        let (renderer, out, _) = renderer(OutputFormat::Table);
        let body = json!({"items": [{"id": "s1", "name": "Eng", "slug": "eng", "description": "d"}], "meta": {"page": 1}});

        renderer.output_listing(&body, &endpoints::SPACES_LIST).unwrap();

        let text = out.contents();
        assert!(text.starts_with("id"));
        assert!(text.contains("Eng"));
        assert!(!text.contains("meta"));
    }

    #[test]
    fn test_output_listing_json_keeps_whole_body() {
        let (renderer, out, _) = renderer(OutputFormat::Json);
        let body = json!({"items": [], "meta": {"page": 1}});

        renderer.output_listing(&body, &endpoints::SPACES_LIST).unwrap();

        let parsed: Value = serde_json::from_str(&out.contents()).unwrap();
        assert_eq!(parsed, body);
    }

    #[test]
    fn test_status_lines_use_expected_streams() {
        let (renderer, out, err) = renderer(OutputFormat::Table);
        renderer.success("Space created").unwrap();
        renderer.warning("Page will get a new ID");

        assert!(out.contents().contains("✓"));
        assert!(out.contents().contains("Space created"));
        assert!(!out.contents().contains("new ID"));
        assert!(err.contents().contains("Page will get a new ID"));
    }

    #[test]
    fn test_status_messages_report_write_failures() {
        let renderer = Renderer::with_writers(
            OutputFormat::Table,
            Box::new(BrokenPipe),
            Box::new(SharedBuffer::default()),
        );

        assert!(matches!(
            renderer.success("Space created"),
            Err(FormattingError::WriteError(_))
        ));
        assert!(renderer.message("Cancelled").is_err());
    }
}
