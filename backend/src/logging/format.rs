//! Event formatters for the two log sinks.
//!
//! Both formatters read the same fields off a `tracing` event: the
//! `severity` label, the message, and an optional `args` field holding
//! JSON text. Anything else recorded on the event is carried through as
//! an extra field.

use std::fmt;

use chrono::{Local, SecondsFormat, Utc};
use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use super::severity::Severity;

const SEVERITY_FIELD: &str = "severity";
const ARGS_FIELD: &str = "args";
const MESSAGE_FIELD: &str = "message";

const RESET: &str = "\x1b[0m";

/// Fields captured from one event.
#[derive(Debug, Default)]
struct RecordVisitor {
    severity: Option<Severity>,
    message: String,
    args: Option<Value>,
    fields: Map<String, Value>,
}

impl RecordVisitor {
    fn capture(event: &Event<'_>) -> Self {
        let mut visitor = Self::default();
        event.record(&mut visitor);
        visitor
    }

    fn severity_for(&self, event: &Event<'_>) -> Severity {
        self.severity
            .unwrap_or_else(|| Severity::from_level(*event.metadata().level()))
    }
}

impl Visit for RecordVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            SEVERITY_FIELD => self.severity = Severity::from_label(value),
            MESSAGE_FIELD => value.clone_into(&mut self.message),
            name => {
                self.fields.insert(name.to_owned(), Value::from(value));
            }
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.insert(field.name().to_owned(), Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.insert(field.name().to_owned(), Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.insert(field.name().to_owned(), Value::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{value:?}");
        match field.name() {
            MESSAGE_FIELD => self.message = rendered,
            ARGS_FIELD => {
                self.args = Some(serde_json::from_str(&rendered).unwrap_or(Value::String(rendered)));
            }
            SEVERITY_FIELD => self.severity = Severity::from_label(&rendered),
            name => {
                self.fields.insert(name.to_owned(), Value::String(rendered));
            }
        }
    }
}

/// One JSON object per line, for the persistent sink.
///
/// Object-valued `args` are flattened into the record; other values are
/// kept under `args`. Keys already present are never overwritten.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRecordFormat;

impl JsonRecordFormat {
    fn render(event: &Event<'_>) -> Value {
        let visitor = RecordVisitor::capture(event);
        let severity = visitor.severity_for(event);
        let mut record = Map::new();
        record.insert(
            "timestamp".to_owned(),
            Value::from(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        record.insert("severity".to_owned(), Value::from(severity.label()));
        record.insert("message".to_owned(), Value::from(visitor.message));
        record.insert("target".to_owned(), Value::from(event.metadata().target()));
        match visitor.args {
            Some(Value::Object(args)) => {
                for (key, value) in args {
                    record.entry(key).or_insert(value);
                }
            }
            Some(args) => {
                record.insert(ARGS_FIELD.to_owned(), args);
            }
            None => {}
        }
        for (key, value) in visitor.fields {
            record.entry(key).or_insert(value);
        }
        Value::Object(record)
    }
}

impl<S, N> FormatEvent<S, N> for JsonRecordFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        writeln!(writer, "{}", Self::render(event))
    }
}

/// Human-readable line per record, for the interactive sink.
///
/// `[YYYY-MM-DD HH:MM:SS] severity: message {args} key=value`, coloured by
/// severity when the layer enables ANSI output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleFormat;

impl ConsoleFormat {
    const fn colour(severity: Severity) -> &'static str {
        match severity {
            Severity::Fatal => "\x1b[41m",
            Severity::Error => "\x1b[31m",
            Severity::Warning => "\x1b[33m",
            Severity::Info => "\x1b[34m",
            Severity::Http => "\x1b[35m",
            Severity::Debug => "\x1b[36m",
        }
    }

    fn render(event: &Event<'_>) -> (Severity, String) {
        let visitor = RecordVisitor::capture(event);
        let severity = visitor.severity_for(event);
        let mut line = format!(
            "[{}] {}: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            severity.label(),
            visitor.message
        );
        if let Some(args) = visitor.args {
            line.push(' ');
            line.push_str(&args.to_string());
        }
        for (key, value) in visitor.fields {
            match value {
                Value::String(text) => line.push_str(&format!(" {key}={text}")),
                other => line.push_str(&format!(" {key}={other}")),
            }
        }
        (severity, line)
    }
}

impl<S, N> FormatEvent<S, N> for ConsoleFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let (severity, line) = Self::render(event);
        if writer.has_ansi_escapes() {
            writeln!(writer, "{}{line}{RESET}", Self::colour(severity))
        } else {
            writeln!(writer, "{line}")
        }
    }
}
