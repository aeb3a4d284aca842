//! Path and query segments for the three wttr.in URL grammars.
//!
//! ```text
//! line:  <location>?lang=<lang>&format=<escaped format>&<flags>
//! ascii: <location>?lang=<lang>&<flags>
//! image: <location>_lang=<lang>_<flags>.png
//! ```
//!
//! Inputs are expected to be resolved already (see [`crate::Defaults`]).
//! Only the line format template is escaped; locations and flags are
//! forwarded as given.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

pub const FLAG_SEPARATOR: &str = "_";

/// Everything but unreserved characters (`A-Z a-z 0-9 - _ . ~`).
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Join flag tokens in caller order.
pub fn join_flags<S: AsRef<str>>(flags: &[S]) -> String {
    flags.iter().map(|f| f.as_ref()).collect::<Vec<&str>>().join(FLAG_SEPARATOR)
}

/// Query component escaping with space as `+`.
pub fn escape_format(format: &str) -> String {
    // `%` is always escaped, so `%20` can only come from a space
    utf8_percent_encode(format, QUERY_COMPONENT).to_string().replace("%20", "+")
}

pub fn line_query<S: AsRef<str>>(language: &str, location: &str, format: &str, flags: &[S]) -> String {
    format!(
        "{location}?lang={language}&format={}&{}",
        escape_format(format),
        join_flags(flags)
    )
}

pub fn ascii_query<S: AsRef<str>>(language: &str, location: &str, flags: &[S]) -> String {
    format!("{location}?lang={language}&{}", join_flags(flags))
}

pub fn image_query<S: AsRef<str>>(language: &str, location: &str, flags: &[S]) -> String {
    format!("{location}_lang={language}_{}.png", join_flags(flags))
}
