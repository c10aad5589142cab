//! Adapter for parsing [`LineRange`] with a [`clap::builder::Arg::value_parser`].

use clap::builder::StringValueParser;
use clap::builder::TypedValueParser;
use clap::builder::ValueParserFactory;
use miette::Report;

use super::value_validation_error;
use crate::line_range::LineRange;

/// [`clap`] parser for [`LineRange`] values.
///
/// Parse failures are rendered as [`miette`] diagnostics with the offending part of the range
/// labeled.
#[derive(Default, Clone)]
pub struct LineRangeValueParser {
    inner: StringValueParser,
}

impl TypedValueParser for LineRangeValueParser {
    type Value = LineRange;

    fn parse_ref(
        &self,
        cmd: &clap::Command,
        arg: Option<&clap::Arg>,
        value: &std::ffi::OsStr,
    ) -> Result<Self::Value, clap::Error> {
        self.inner.parse_ref(cmd, arg, value).and_then(|str_value| {
            str_value.parse::<LineRange>().map_err(|err| {
                let diagnostic = Report::new(err).with_source_code(str_value.clone());
                value_validation_error(cmd, arg, &str_value, format!("{diagnostic:?}"))
            })
        })
    }
}

impl ValueParserFactory for LineRange {
    type Parser = LineRangeValueParser;

    fn value_parser() -> Self::Parser {
        Self::Parser::default()
    }
}
