//! Wrapper type for the normalized path of the file being edited.

use std::fmt::Display;
use std::path::Path;

use camino::Utf8Path;
use camino::Utf8PathBuf;
use miette::miette;
use miette::IntoDiagnostic;
use path_absolutize::Absolutize;

use crate::cwd::current_dir;

/// A normalized (absolute, dot-free) [`Utf8PathBuf`] in tandem with a path relative to the
/// directory it was resolved from.
///
/// These paths are [`Display`]ed as the relative path, so log messages and errors show the path
/// the way the user typed it, but all filesystem operations use the normalized path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalPath {
    normal: Utf8PathBuf,
    relative: Option<Utf8PathBuf>,
}

impl NormalPath {
    /// Resolve `original` against `base`.
    pub fn new(original: impl AsRef<Path>, base: impl AsRef<Path>) -> miette::Result<Self> {
        let base = base.as_ref();
        let normal: Utf8PathBuf = original
            .as_ref()
            .absolutize_from(base)
            .into_diagnostic()?
            .into_owned()
            .try_into()
            .map_err(|err| miette!("{err}"))?;
        let relative = pathdiff::diff_paths(&normal, base)
            .map(Utf8PathBuf::try_from)
            .transpose()
            .map_err(|err| miette!("{err}"))?;
        Ok(Self { normal, relative })
    }

    /// Resolve `original` against the current working directory.
    pub fn from_cwd(original: impl AsRef<Path>) -> miette::Result<Self> {
        Self::new(original, current_dir()?)
    }

    /// The absolute (normalized) path.
    pub fn absolute(&self) -> &Utf8Path {
        self.normal.as_path()
    }

    /// The relative path, or the absolute path if no relative path could be computed.
    pub fn relative(&self) -> &Utf8Path {
        self.relative.as_deref().unwrap_or_else(|| self.absolute())
    }
}

impl Display for NormalPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self.relative(), f)
    }
}
