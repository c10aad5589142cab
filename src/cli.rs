//! Command-line argument parser and argument access.

use camino::Utf8PathBuf;
use clap::Parser;

use crate::clap::RustBacktrace;
use crate::line_range::LineRange;
use crate::lines::LineEndings;
use crate::normal_path::NormalPath;
use crate::write_mode::WriteMode;

/// Remove a range of lines from a text file.
///
/// Lines are numbered from 0, and the range is half-open: `--range 1819..1918` removes lines
/// 1820 through 1918 as an editor would number them. If the range runs past the end of the file,
/// every line from the start of the range onward is removed.
#[derive(Debug, Clone, Parser)]
#[command(version, author, about)]
#[command(max_term_width = 100)]
pub struct Opts {
    /// The UTF-8 text file to edit in place.
    pub path: NormalPath,

    /// The 0-indexed, half-open range of lines to remove, written `START..END`.
    #[arg(long, value_name = "START..END", default_value_t = LineRange::DEFAULT)]
    pub range: LineRange,

    /// Only remove lines if the file has exactly this many lines.
    ///
    /// Running `excise` twice on the same file removes a different set of lines the second time.
    /// Give the expected line count to make a second run fail instead.
    #[arg(long, value_name = "COUNT")]
    pub expect_lines: Option<usize>,

    /// Print the line counts without writing the file.
    #[arg(long)]
    pub dry_run: bool,

    /// Options to control how the file is read and written.
    #[command(flatten)]
    pub file: FileOpts,

    /// Options to modify logging and error-handling behavior.
    #[command(flatten)]
    pub logging: LoggingOpts,
}

/// Options to control how the file is read and written.
#[derive(Debug, Clone, clap::Args)]
#[clap(next_help_heading = "File options")]
pub struct FileOpts {
    /// How to treat line endings.
    #[arg(long, default_value_t = LineEndings::default())]
    pub line_endings: LineEndings,

    /// How to replace the file's contents.
    #[arg(long, default_value_t = WriteMode::default())]
    pub write_mode: WriteMode,
}

/// Options to modify logging and error-handling behavior.
#[derive(Debug, Clone, clap::Args)]
#[clap(next_help_heading = "Logging options")]
pub struct LoggingOpts {
    #[allow(rustdoc::bare_urls)]
    /// Tracing filter.
    ///
    /// Can be any of "error", "warn", "info", "debug", or "trace". Supports more granular
    /// filtering, as well.
    ///
    /// The grammar is: `target[span{field=value}]=level`, where `target` is a module path, `span`
    /// is a span name, and `level` is one of the levels listed above.
    ///
    /// See: https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html
    ///
    /// A nice value is "excise=debug".
    #[arg(long, default_value = "excise=info")]
    pub tracing_filter: String,

    /// How to display backtraces in error messages.
    #[arg(long, env = "RUST_BACKTRACE", default_value_t = RustBacktrace::Off)]
    pub backtrace: RustBacktrace,

    /// Path to write JSON logs to.
    #[arg(long, value_name = "PATH")]
    pub log_json: Option<Utf8PathBuf>,
}

impl Opts {
    /// Perform late initialization of the command-line arguments. If `init` isn't called before
    /// the arguments are used, the behavior is undefined.
    pub fn init(&mut self) {
        // `miette` reads this to decide whether to capture backtraces.
        std::env::set_var("RUST_BACKTRACE", self.logging.backtrace.to_string());
    }
}
