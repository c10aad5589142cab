//! Removing a range of lines from a file on disk.

use std::io::Write;

use miette::miette;
use miette::Context;
use miette::IntoDiagnostic;
use tracing::instrument;

use crate::cli::Opts;
use crate::line_range::LineRange;
use crate::lines::LineEndings;
use crate::lines::Lines;
use crate::normal_path::NormalPath;
use crate::report::ExcisionReport;
use crate::write_mode::WriteMode;

/// Options for removing a range of lines from a file. This is like a lower-effort builder
/// interface, mostly provided because Rust tragically lacks named arguments.
#[derive(Debug, Clone)]
pub struct ExciseOpts<'opts> {
    /// The file to edit. Messages show its relative path; I/O uses its absolute path.
    pub path: &'opts NormalPath,
    /// The lines to remove.
    pub range: LineRange,
    /// If given, fail unless the file has exactly this many lines.
    pub expect_lines: Option<usize>,
    /// Report the line counts but leave the file alone.
    pub dry_run: bool,
    /// How to split the file into lines.
    pub line_endings: LineEndings,
    /// How to write the file back.
    pub write_mode: WriteMode,
}

impl<'opts> ExciseOpts<'opts> {
    /// Construct options from parsed command-line interface arguments as [`Opts`].
    pub fn from_cli(opts: &'opts Opts) -> Self {
        Self {
            path: &opts.path,
            range: opts.range,
            expect_lines: opts.expect_lines,
            dry_run: opts.dry_run,
            line_endings: opts.file.line_endings,
            write_mode: opts.file.write_mode,
        }
    }

    /// Options to remove `range` from `path` with every other setting at its default.
    pub fn new(path: &'opts NormalPath, range: LineRange) -> Self {
        Self {
            path,
            range,
            expect_lines: None,
            dry_run: false,
            line_endings: LineEndings::default(),
            write_mode: WriteMode::default(),
        }
    }

    /// Read the file, remove the lines in the range, and write the file back.
    ///
    /// Progress is written to `out` as each step finishes:
    ///
    /// ```text
    /// Original lines: 2000
    /// New lines: 1901
    /// Removed: 99
    /// Done!
    /// ```
    ///
    /// The counts are written before the file is, so they're visible even if writing fails.
    #[instrument(skip_all, fields(path = %self.path, range = %self.range))]
    pub fn run(&self, out: &mut impl Write) -> miette::Result<ExcisionReport> {
        let lines = self.read()?;
        let original = lines.len();
        writeln!(out, "Original lines: {original}").into_diagnostic()?;

        if let Some(expected) = self.expect_lines {
            if expected != original {
                return Err(miette!(
                    "{} has {original} lines but {expected} were expected; has it already been edited?",
                    self.path
                ));
            }
        }

        if !self.range.is_empty() && self.range.end() > original {
            if self.range.start() < original {
                tracing::warn!(
                    lines = original,
                    "Range {} runs past the end of the file; removing every line from {} onward",
                    self.range,
                    self.range.start(),
                );
            } else {
                tracing::warn!(
                    lines = original,
                    "Range {} starts past the end of the file; no lines removed",
                    self.range,
                );
            }
        }

        let lines = self.range.remove_from(lines);
        let report = ExcisionReport {
            original,
            new: lines.len(),
        };
        writeln!(out, "{}", report.result_lines()).into_diagnostic()?;

        if self.dry_run {
            tracing::info!("Dry run; not writing {}", self.path);
            return Ok(report);
        }

        self.write_mode
            .write(self.path.absolute(), &lines)
            .wrap_err_with(|| format!("Failed to write {}", self.path))?;
        tracing::info!(
            removed = report.removed(),
            "Removed lines {} from {}",
            self.range,
            self.path
        );
        writeln!(out, "Done!").into_diagnostic()?;

        Ok(report)
    }

    fn read(&self) -> miette::Result<Lines> {
        let contents = std::fs::read_to_string(self.path.absolute())
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read {}", self.path))?;
        let lines = self.line_endings.split(&contents);
        tracing::debug!(
            bytes = contents.len(),
            lines = lines.len(),
            line_endings = %self.line_endings,
            "Read file"
        );
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use expect_test::expect;
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use super::*;

    fn numbered(len: usize) -> String {
        (1..=len).map(|n| format!("line {n}\n")).collect()
    }

    fn temp_path(dir: &tempfile::TempDir, name: &str) -> NormalPath {
        NormalPath::new(dir.path().join(name), dir.path()).unwrap()
    }

    fn temp_file(contents: &str) -> (tempfile::TempDir, NormalPath) {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "page.tsx");
        std::fs::write(path.absolute(), contents).unwrap();
        (dir, path)
    }

    fn contents(path: &NormalPath) -> String {
        std::fs::read_to_string(path.absolute()).unwrap()
    }

    fn run(opts: &ExciseOpts<'_>) -> (miette::Result<ExcisionReport>, String) {
        let mut out = Vec::new();
        let result = opts.run(&mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_default_range() {
        let original = numbered(2000);
        let (_dir, path) = temp_file(&original);

        let (report, out) = run(&ExciseOpts::new(&path, LineRange::DEFAULT));
        let report = report.unwrap();
        assert_eq!(report.removed(), 99);
        expect![[r#"
            Original lines: 2000
            New lines: 1901
            Removed: 99
            Done!
        "#]]
        .assert_eq(&out);

        let edited = contents(&path);
        let original_lines = LineEndings::Preserve.split(&original);
        let edited_lines = LineEndings::Preserve.split(&edited);
        assert_eq!(edited_lines.len(), 1901);
        assert_eq!(edited_lines[..1819], original_lines[..1819]);
        assert_eq!(edited_lines[1819..], original_lines[1918..]);
        assert_eq!(edited_lines[1818], "line 1819\n");
        assert_eq!(edited_lines[1819], "line 1919\n");
    }

    #[test]
    #[traced_test]
    fn test_range_past_end() {
        let (_dir, path) = temp_file(&numbered(1900));

        let (report, _) = run(&ExciseOpts::new(&path, LineRange::DEFAULT));
        assert_eq!(
            report.unwrap(),
            ExcisionReport {
                original: 1900,
                new: 1819
            }
        );
        assert!(logs_contain("runs past the end of the file"));

        let edited = contents(&path);
        assert_eq!(edited, numbered(1819));
    }

    #[test]
    fn test_empty_range() {
        let original = numbered(10);
        let (_dir, path) = temp_file(&original);

        let (report, _) = run(&ExciseOpts::new(&path, LineRange::new(3, 3).unwrap()));
        assert_eq!(report.unwrap().removed(), 0);
        assert_eq!(contents(&path), original);
    }

    #[test]
    fn test_crlf_preserved() {
        let (_dir, path) = temp_file("one\r\ntwo\r\nthree\r\nfour");

        let (report, _) = run(&ExciseOpts::new(&path, LineRange::new(1, 2).unwrap()));
        assert_eq!(report.unwrap().removed(), 1);
        assert_eq!(contents(&path), "one\r\nthree\r\nfour");
    }

    #[test]
    fn test_crlf_normalized() {
        let (_dir, path) = temp_file("one\r\ntwo\r\nthree\rfour");

        let opts = ExciseOpts {
            line_endings: LineEndings::Normalize,
            write_mode: WriteMode::Truncate,
            ..ExciseOpts::new(&path, LineRange::new(1, 2).unwrap())
        };
        let (report, _) = run(&opts);
        assert_eq!(
            report.unwrap(),
            ExcisionReport {
                original: 4,
                new: 3
            }
        );
        assert_eq!(contents(&path), "one\nthree\nfour");
    }

    #[test]
    #[traced_test]
    fn test_dry_run() {
        let original = numbered(2000);
        let (_dir, path) = temp_file(&original);

        let opts = ExciseOpts {
            dry_run: true,
            ..ExciseOpts::new(&path, LineRange::DEFAULT)
        };
        let (report, out) = run(&opts);
        assert_eq!(report.unwrap().removed(), 99);
        expect![[r#"
            Original lines: 2000
            New lines: 1901
            Removed: 99
        "#]]
        .assert_eq(&out);
        assert!(logs_contain("Dry run"));
        assert_eq!(contents(&path), original);
    }

    #[test]
    fn test_expect_lines_guards_second_run() {
        let (_dir, path) = temp_file(&numbered(2000));
        let opts = ExciseOpts {
            expect_lines: Some(2000),
            ..ExciseOpts::new(&path, LineRange::DEFAULT)
        };

        let (first, _) = run(&opts);
        assert_eq!(first.unwrap().new, 1901);
        let after_first = contents(&path);

        let (second, out) = run(&opts);
        let err = second.unwrap_err();
        assert!(err.to_string().contains("1901 lines but 2000 were expected"));
        assert_eq!(out, "Original lines: 1901\n");
        assert_eq!(contents(&path), after_first);
    }

    #[test]
    fn test_second_run_removes_different_lines() {
        let (_dir, path) = temp_file(&numbered(2000));
        let opts = ExciseOpts::new(&path, LineRange::DEFAULT);

        run(&opts).0.unwrap();
        let after_first = contents(&path);
        run(&opts).0.unwrap();
        let after_second = contents(&path);

        assert_ne!(after_first, after_second);
        assert_eq!(LineEndings::Preserve.split(&after_second).len(), 1819);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "missing.tsx");

        let (report, out) = run(&ExciseOpts::new(&path, LineRange::DEFAULT));
        let err = report.unwrap_err();
        assert_eq!(err.to_string(), "Failed to read missing.tsx");
        assert_eq!(out, "");
    }

    #[test]
    fn test_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "binary.bin");
        std::fs::write(path.absolute(), [0x66_u8, 0x6f, 0xff, 0x0a]).unwrap();

        let (report, _) = run(&ExciseOpts::new(&path, LineRange::DEFAULT));
        assert!(report.is_err());
        assert_eq!(std::fs::read(path.absolute()).unwrap(), [0x66_u8, 0x6f, 0xff, 0x0a]);
    }

    #[test]
    #[traced_test]
    fn test_range_starts_past_end() {
        let original = numbered(10);
        let (_dir, path) = temp_file(&original);

        let (report, _) = run(&ExciseOpts::new(&path, LineRange::new(20, 30).unwrap()));
        assert_eq!(report.unwrap().removed(), 0);
        assert!(logs_contain("starts past the end of the file; no lines removed"));
        assert!(!logs_contain("runs past the end of the file"));
        assert_eq!(contents(&path), original);
    }

    #[test]
    fn test_lone_cr_line_endings() {
        let (_dir, path) = temp_file("a\rb\rc\rd\r");

        let (report, _) = run(&ExciseOpts::new(&path, LineRange::new(1, 2).unwrap()));
        assert_eq!(
            report.unwrap(),
            ExcisionReport {
                original: 4,
                new: 3
            }
        );
        assert_eq!(contents(&path), "a\rc\rd\r");
    }

    #[test]
    #[traced_test]
    fn test_messages_use_relative_path() {
        let (_dir, path) = temp_file(&numbered(10));

        let (report, _) = run(&ExciseOpts::new(&path, LineRange::new(2, 4).unwrap()));
        report.unwrap();
        assert!(logs_contain("Removed lines 2..4 from page.tsx"));
    }

    /// `/proc/version` can be read but not written, even by root.
    #[cfg(target_os = "linux")]
    #[test]
    fn test_counts_are_printed_when_write_fails() {
        let path = NormalPath::new("/proc/version", "/").unwrap();
        let opts = ExciseOpts {
            write_mode: WriteMode::Truncate,
            ..ExciseOpts::new(&path, LineRange::new(5, 6).unwrap())
        };

        let (report, out) = run(&opts);
        let err = report.unwrap_err();
        assert_eq!(err.to_string(), "Failed to write proc/version");
        expect![[r#"
            Original lines: 1
            New lines: 1
            Removed: 0
        "#]]
        .assert_eq(&out);
    }
}
