//! The [`Lines`] type, a group of lines of text, and helpers for splitting files into lines.

use std::fmt::Display;

use clap::builder::PossibleValue;
use line_span::LineSpanExt;

/// A group of lines of text, represented as a list.
///
/// Each line includes its line terminator, if it has one. Only the last line of a file may lack
/// a terminator.
pub type Lines = Vec<String>;

/// How line terminators are treated when a file is split into [`Lines`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEndings {
    /// Keep every line terminator exactly as it appears in the file.
    ///
    /// Lines end at `\n`, `\r\n`, or a lone `\r`, the same places a universal-newline reader
    /// would end them, so line numbers agree with most editors. `\r\n` stays `\r\n`.
    #[default]
    Preserve,
    /// Treat `\r\n`, `\r`, and `\n` all as line terminators and rewrite them to `\n`.
    Normalize,
}

impl LineEndings {
    /// Split `text` into lines, keeping terminators attached to the line they end.
    pub fn split(self, text: &str) -> Lines {
        match self {
            LineEndings::Preserve => split_lines(text),
            LineEndings::Normalize => split_lines(&text.replace("\r\n", "\n").replace('\r', "\n")),
        }
    }
}

impl clap::ValueEnum for LineEndings {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Preserve, Self::Normalize]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            LineEndings::Preserve => {
                PossibleValue::new("preserve").help("Write line endings back unchanged")
            }
            LineEndings::Normalize => PossibleValue::new("normalize")
                .help("Treat `\\r\\n` and `\\r` as line endings and write them as `\\n`"),
        })
    }
}

impl Display for LineEndings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineEndings::Preserve => write!(f, "preserve"),
            LineEndings::Normalize => write!(f, "normalize"),
        }
    }
}

fn split_lines(text: &str) -> Lines {
    if text.is_empty() {
        return Lines::new();
    }

    let mut lines = Lines::new();
    for span in text.line_spans() {
        // `line_spans` only ends lines at `\n` and `\r\n`; a lone `\r` ends a line too.
        let content = span.as_str();
        let ending = span.ending_str();
        lines.extend(content.split_inclusive('\r').map(str::to_owned));
        if content.is_empty() || content.ends_with('\r') {
            if !ending.is_empty() {
                lines.push(ending.to_owned());
            }
        } else if let Some(last) = lines.last_mut() {
            last.push_str(ending);
        }
    }
    lines
}
