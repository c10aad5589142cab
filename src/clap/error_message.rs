use std::fmt::Display;

/// Construct a [`clap::Error`] for an argument value that failed validation.
///
/// `clap` has no public constructor for value validation errors that carry a custom message, so
/// this builds a raw error and has [`clap::Error::format`] add the usage line and whichever help
/// hint `cmd` actually supports.
pub fn value_validation_error(
    cmd: &clap::Command,
    arg: Option<&clap::Arg>,
    bad_value: &str,
    message: impl Display,
) -> clap::Error {
    let arg = arg.map_or_else(|| "...".to_owned(), ToString::to_string);
    clap::Error::raw(
        clap::error::ErrorKind::ValueValidation,
        format!("invalid value '{bad_value}' for '{arg}': {message}"),
    )
    .format(&mut cmd.clone())
}
