//! Support for formatting tracing events.
//!
//! Log messages go to stderr so they don't interleave with the line counts on stdout.

use std::fmt;

use itertools::Itertools;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;
use owo_colors::Style;
use tap::Tap;
use tracing::field::Field;
use tracing::field::Visit;
use tracing::Level;
use tracing::Subscriber;
use tracing_subscriber::field::RecordFields;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::FormatFields;
use tracing_subscriber::fmt::FormattedFields;
use tracing_subscriber::registry::LookupSpan;

#[derive(Default)]
pub struct EventFormatter;

impl<S, N> FormatEvent<S, N> for EventFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> fmt::Result {
        let visitor = EventVisitor::new(*event.metadata().level(), ctx)
            .tap_mut(|visitor| event.record(visitor));
        write!(writer, "{visitor}")
    }
}

#[derive(Debug)]
struct EventVisitor {
    style: EventStyle,
    message: String,
    fields: Vec<(String, String)>,
    /// Span names and formatted fields, in root-to-current (outside-in) order.
    spans: Vec<(&'static str, String)>,
}

impl EventVisitor {
    fn new<S, N>(level: Level, ctx: &FmtContext<'_, S, N>) -> Self
    where
        S: tracing::Subscriber,
        S: for<'lookup> LookupSpan<'lookup>,
        N: for<'writer> FormatFields<'writer> + 'static,
    {
        let spans = ctx
            .event_scope()
            .map(|scope| {
                scope
                    .from_root()
                    .map(|span| {
                        // The `fmt` layer stores each span's formatted fields in its extensions
                        // when the span is created.
                        let fields = span
                            .extensions()
                            .get::<FormattedFields<N>>()
                            .map(|fields| fields.fields.clone())
                            .unwrap_or_default();
                        (span.name(), fields)
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            style: EventStyle::new(level),
            message: String::new(),
            fields: Vec::new(),
            spans,
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields
                .push((field.name().to_owned(), format!("{value:?}")));
        }
    }
}

impl fmt::Display for EventVisitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut message = self.message.clone();
        for (name, value) in &self.fields {
            message.push_str(&format!(" {}", self.style.style_field(name, value)));
        }

        write!(
            f,
            "{}{}",
            self.style.indent_colored(),
            self.style.style_message(&message)
        )?;

        for (name, fields) in self.spans.iter().rev() {
            write!(f, "\n{}{}", self.style.subsequent_indent, style_span(name, fields))?;
        }

        writeln!(f)
    }
}

#[derive(Debug)]
struct EventStyle {
    /// First-line indent text.
    indent_text: &'static str,

    /// Subsequent indent text.
    subsequent_indent: &'static str,

    /// Style for first-line indent text.
    indent: Style,

    /// Style for message text.
    text: Style,

    /// Style for field names.
    field_name: Style,

    /// Style for field values.
    field_value: Style,
}

impl EventStyle {
    fn new(level: Level) -> Self {
        let mut style = Self {
            indent_text: "• ",
            subsequent_indent: "  ",
            indent: Style::new(),
            text: Style::new(),
            field_name: Style::new().bold(),
            field_value: Style::new(),
        };

        match level {
            Level::TRACE => {
                style.indent_text = "TRACE ";
                style.indent = style.indent.purple();
                style.dim();
            }
            Level::DEBUG => {
                style.indent_text = "DEBUG ";
                style.indent = style.indent.blue();
                style.dim();
            }
            Level::INFO => {
                style.indent = style.indent.green();
            }
            Level::WARN => {
                style.indent_text = "⚠ ";
                style.indent = style.indent.yellow();
                style.text = style.text.yellow();
            }
            Level::ERROR => {
                style.indent_text = "⚠ ";
                style.indent = style.indent.red();
                style.text = style.text.red();
            }
        }

        style
    }

    fn dim(&mut self) {
        self.text = self.text.dimmed();
        self.field_name = self.field_name.dimmed();
        self.field_value = self.field_value.dimmed();
    }

    fn style_field(&self, name: &str, value: &str) -> String {
        format!(
            "{name}{value}",
            name = name.if_supports_color(Stderr, |text| self.field_name.style(text)),
            value =
                format!("={value}").if_supports_color(Stderr, |text| self.field_value.style(text)),
        )
    }

    fn indent_colored(&self) -> String {
        self.indent_text
            .if_supports_color(Stderr, |text| self.indent.style(text))
            .to_string()
    }

    fn style_message(&self, message: &str) -> String {
        message
            .if_supports_color(Stderr, |text| self.text.style(text))
            .to_string()
    }
}

fn style_span(name: &str, fields: &str) -> String {
    format!(
        "{in_}{name}{fields}",
        in_ = "in ".if_supports_color(Stderr, |text| Style::new().dimmed().style(text)),
    )
}

struct SpanFields(Vec<(String, String)>);

impl Visit for SpanFields {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.push((field.name().to_owned(), format!("{value:?}")));
    }
}

/// Formats span fields as `{name=value name=value}`.
#[derive(Debug)]
pub struct SpanFieldFormatter {
    style: EventStyle,
}

impl Default for SpanFieldFormatter {
    fn default() -> Self {
        Self {
            style: EventStyle::new(Level::INFO),
        }
    }
}

impl<'writer> FormatFields<'writer> for SpanFieldFormatter {
    fn format_fields<R: RecordFields>(
        &self,
        mut writer: tracing_subscriber::fmt::format::Writer<'writer>,
        fields: R,
    ) -> fmt::Result {
        let mut span_fields = SpanFields(Vec::new());
        fields.record(&mut span_fields);
        if !span_fields.0.is_empty() {
            write!(
                writer,
                "{{{}}}",
                span_fields
                    .0
                    .iter()
                    .map(|(name, value)| self.style.style_field(name, value))
                    .join(" ")
            )?;
        }
        Ok(())
    }
}
