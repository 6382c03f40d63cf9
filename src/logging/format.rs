//! Console log formatting.
//!
//! Format: `LEVEL target: message [span1{field=value}][span2{field=value}]`

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, FormattedFields};
use tracing_subscriber::registry::LookupSpan;

#[cfg(feature = "pretty_logs")]
use nu_ansi_term::Color;

/// Formats events on a single line, followed by the fields of all enclosing spans.
///
/// The outermost span comes first. With the `pretty_logs` feature, the level is colored.
pub struct ConsoleLogFormat;

impl ConsoleLogFormat {
    #[cfg(feature = "pretty_logs")]
    fn format_level(writer: &mut Writer<'_>, level: Level) -> std::fmt::Result {
        let color = match level {
            Level::TRACE => Color::Purple,
            Level::DEBUG => Color::Blue,
            Level::INFO => Color::Green,
            Level::WARN => Color::Yellow,
            Level::ERROR => Color::Red,
        };

        write!(writer, "{}", color.paint(format!("{:<5}", level)))
    }

    #[cfg(not(feature = "pretty_logs"))]
    fn format_level(writer: &mut Writer<'_>, level: Level) -> std::fmt::Result {
        write!(writer, "{:<5}", level)
    }
}

impl<S, N> FormatEvent<S, N> for ConsoleLogFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();

        Self::format_level(&mut writer, *metadata.level())?;
        write!(writer, " {}: ", metadata.target())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;

        if let Some(scope) = ctx.event_scope() {
            let mut first = true;
            for span in scope.from_root() {
                write!(writer, "{}[{}", if first { " " } else { "" }, span.name())?;
                first = false;

                let ext = span.extensions();
                if let Some(fields) = ext.get::<FormattedFields<N>>()
                    && !fields.is_empty()
                {
                    write!(writer, "{{{}}}", fields)?;
                }

                write!(writer, "]")?;
            }
        }

        writeln!(writer)
    }
}
