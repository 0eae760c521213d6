use crate::domain::LogRecord;
use crate::port::Formatter;
use serde_json::{Map, Value};
use std::fmt::Write as _;

/// Default line template.
pub const SIMPLE_FORMAT: &str = "[%datetime%] %channel%.%level_name%: %message% %context% %extra%\n";

/// Default `%datetime%` format (chrono strftime syntax).
pub const SIMPLE_DATE: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Renders a record as a single line of text from a `%placeholder%` template.
///
/// Supported placeholders: `%datetime%`, `%channel%`, `%level_name%`,
/// `%level%`, `%message%`, `%context%`, `%extra%`, plus `%context.KEY%` and
/// `%extra.KEY%` for individual values. Text between percent signs that is not
/// a placeholder is copied through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFormatter {
    format: String,
    date_format: String,
    allow_inline_line_breaks: bool,
    ignore_empty_context_and_extra: bool,
}

impl LineFormatter {
    /// `None` for `format` or `date_format` selects the defaults.
    pub fn new(
        format: Option<&str>,
        date_format: Option<&str>,
        allow_inline_line_breaks: bool,
        ignore_empty_context_and_extra: bool,
    ) -> Self {
        Self {
            format: format.unwrap_or(SIMPLE_FORMAT).to_string(),
            date_format: date_format.unwrap_or(SIMPLE_DATE).to_string(),
            allow_inline_line_breaks,
            ignore_empty_context_and_extra,
        }
    }

    pub fn format_template(&self) -> &str {
        &self.format
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    pub fn allow_inline_line_breaks(&self) -> bool {
        self.allow_inline_line_breaks
    }

    pub fn ignore_empty_context_and_extra(&self) -> bool {
        self.ignore_empty_context_and_extra
    }

    fn omits_section(&self, name: &str, record: &LogRecord) -> bool {
        self.ignore_empty_context_and_extra
            && match name {
                "context" => record.context.is_empty(),
                "extra" => record.extra.is_empty(),
                _ => false,
            }
    }

    fn render_placeholder(&self, name: &str, record: &LogRecord) -> Option<String> {
        let rendered = match name {
            "datetime" => self.render_datetime(record),
            "channel" => self.replace_newlines(record.channel.clone()),
            "level_name" => record.level.name().to_string(),
            "level" => record.level.code().to_string(),
            "message" => self.replace_newlines(record.message.clone()),
            "context" => self.render_map(&record.context),
            "extra" => self.render_map(&record.extra),
            _ => {
                let (map, key) = if let Some(key) = name.strip_prefix("context.") {
                    (&record.context, key)
                } else if let Some(key) = name.strip_prefix("extra.") {
                    (&record.extra, key)
                } else {
                    return None;
                };
                // Missing keys render as nothing rather than leaving the placeholder behind
                map.get(key)
                    .map(|value| self.stringify(value))
                    .unwrap_or_default()
            }
        };
        Some(rendered)
    }

    fn render_datetime(&self, record: &LogRecord) -> String {
        let mut rendered = String::new();
        if write!(rendered, "{}", record.datetime.format(&self.date_format)).is_err() {
            // Invalid strftime items make chrono's Display fail
            return record.datetime.to_rfc3339();
        }
        rendered
    }

    fn render_map(&self, map: &Map<String, Value>) -> String {
        if map.is_empty() {
            return "[]".to_string();
        }
        self.replace_newlines(Value::Object(map.clone()).to_string())
    }

    fn stringify(&self, value: &Value) -> String {
        let rendered = match value {
            Value::String(s) => s.clone(),
            Value::Array(items) if items.is_empty() => "[]".to_string(),
            Value::Object(map) if map.is_empty() => "[]".to_string(),
            other => other.to_string(),
        };
        self.replace_newlines(rendered)
    }

    fn replace_newlines(&self, value: String) -> String {
        if self.allow_inline_line_breaks {
            return value;
        }
        value.replace("\r\n", " ").replace(['\r', '\n'], " ")
    }
}

impl Default for LineFormatter {
    fn default() -> Self {
        Self::new(None, None, false, false)
    }
}

impl Formatter for LineFormatter {
    fn format(&self, record: &LogRecord) -> String {
        let mut output = String::with_capacity(self.format.len() + record.message.len());
        let mut rest = self.format.as_str();

        while let Some(start) = rest.find('%') {
            output.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let Some(end) = after.find('%') else {
                output.push_str(&rest[start..]);
                rest = "";
                break;
            };
            let name = &after[..end];

            if self.omits_section(name, record) {
                // Drop the separator in front of the section as well
                if output.ends_with(' ') {
                    output.pop();
                }
                rest = &after[end + 1..];
            } else if let Some(value) = self.render_placeholder(name, record) {
                output.push_str(&value);
                rest = &after[end + 1..];
            } else {
                output.push('%');
                rest = after;
            }
        }

        output.push_str(rest);
        output
    }
}
