//! Writing [`Lines`] back to disk.

use std::fmt::Display;
use std::io::Write;

use camino::Utf8Path;
use clap::builder::PossibleValue;
use miette::miette;
use miette::Context;
use miette::IntoDiagnostic;
use tempfile::NamedTempFile;

use crate::lines::Lines;

/// How to replace the contents of a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Write to a temporary file in the same directory, then rename it over the target.
    ///
    /// Readers see either the old contents or the new contents, never a partial write. Symlinks
    /// are followed, so the file they point to is replaced and the link itself is kept. The
    /// target's directory must be writable.
    #[default]
    Atomic,
    /// Truncate the target and write into it directly.
    ///
    /// If the write fails partway through, the file is left truncated.
    Truncate,
}

impl WriteMode {
    /// Write `lines` to `path`, byte-for-byte.
    #[tracing::instrument(level = "debug", skip(lines), fields(line_count = lines.len()))]
    pub fn write(self, path: &Utf8Path, lines: &Lines) -> miette::Result<()> {
        match self {
            WriteMode::Atomic => write_atomic(path, lines),
            WriteMode::Truncate => write_truncate(path, lines),
        }
    }
}

fn write_truncate(path: &Utf8Path, lines: &Lines) -> miette::Result<()> {
    let mut file = std::fs::File::create(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to open {path} for writing"))?;
    write_lines(&mut file, lines).wrap_err_with(|| format!("Failed to write {path}"))?;
    file.sync_all()
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to flush {path}"))
}

fn write_atomic(path: &Utf8Path, lines: &Lines) -> miette::Result<()> {
    // Renaming over a symlink would replace the link, not the file it points to.
    let path = &path
        .canonicalize_utf8()
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to resolve {path}"))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };

    // Dropping `tmp` before `persist` removes the temporary file.
    let mut tmp = NamedTempFile::new_in(dir).into_diagnostic().wrap_err_with(|| {
        format!(
            "Failed to create a temporary file in {dir}; \
            use `--write-mode truncate` to write {path} in place"
        )
    })?;

    write_lines(tmp.as_file_mut(), lines)
        .wrap_err_with(|| format!("Failed to write temporary file for {path}"))?;
    tmp.as_file()
        .sync_all()
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to flush temporary file for {path}"))?;

    // The temporary file is created with restrictive permissions; keep the original's.
    let permissions = std::fs::metadata(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read permissions of {path}"))?
        .permissions();
    std::fs::set_permissions(tmp.path(), permissions)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to set permissions on temporary file for {path}"))?;

    tmp.persist(path)
        .map_err(|err| miette!("{}", err.error))
        .wrap_err_with(|| format!("Failed to replace {path}"))?;

    Ok(())
}

fn write_lines(writer: &mut impl Write, lines: &Lines) -> miette::Result<()> {
    let mut writer = std::io::BufWriter::new(writer);
    for line in lines {
        writer.write_all(line.as_bytes()).into_diagnostic()?;
    }
    writer.flush().into_diagnostic()
}

impl clap::ValueEnum for WriteMode {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Atomic, Self::Truncate]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            WriteMode::Atomic => PossibleValue::new("atomic")
                .help("Write a temporary file and rename it over the original"),
            WriteMode::Truncate => {
                PossibleValue::new("truncate").help("Truncate the original and write in place")
            }
        })
    }
}

impl Display for WriteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteMode::Atomic => write!(f, "atomic"),
            WriteMode::Truncate => write!(f, "truncate"),
        }
    }
}
