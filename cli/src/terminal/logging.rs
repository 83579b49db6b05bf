use chrono::Local;
use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;

/// Renders every event as `[YYYY-MM-DD HH:MM:SS] [sym] message`, the line
/// shape the per-probe output contract requires.
pub struct SweeprFormatter;

impl<S, N> FormatEvent<S, N> for SweeprFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) = match *meta.level() {
            Level::TRACE => ("[ ]", |s| s.dimmed()),
            Level::DEBUG => ("[?]", |s| s.blue()),
            Level::INFO => ("[+]", |s| s.green().bold()),
            Level::WARN => ("[*]", |s| s.yellow().bold()),
            Level::ERROR => ("[-]", |s| s.red().bold()),
        };

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        write!(writer, "[{timestamp}] {} ", color_func(symbol.into()))?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Installs the global subscriber, writing to stdout.
///
/// Per-probe lines are emitted at info level from `sweepr_core::probe`;
/// `quiet` raises that module to warn while keeping coordinator progress
/// and everything else.
pub fn init(quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("info,sweepr_core::probe=warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(SweeprFormatter)
        .with_writer(std::io::stdout)
        .init();
}
