/// Base endpoint every request path is appended to.
pub const BASE_URL: &str = "http://wttr.in/";

/// Request timeout applied to every GET.
pub const TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_LANGUAGE: &str = "zh";
pub const DEFAULT_LOCATION: &str = "成都";

/// Multi-line template used by line mode when the caller passes none.
pub const DEFAULT_LINE_FORMAT: &str =
    "当前%l:\n天气%c %C\n温度🌡️ %t\n风速🌬️ %w\n湿度💦 %h\n气压🧭 %P\n降水☔️ %p\n月相🌑 +%M%m";

/// Metric units, wind in m/s.
pub const DEFAULT_LINE_FLAGS: &[&str] = &["m", "M"];

/// Current conditions only, plain ASCII without colors or footer, padded.
pub const DEFAULT_ASCII_FLAGS: &[&str] = &["0", "A", "T", "F", "m", "M", "p"];

pub const DEFAULT_IMAGE_FLAGS: &[&str] = &["0", "m", "p", "q"];

/// Horizontal rule printed on the service's outage page.
pub const OUTAGE_RULE: &str =
    "======================================================================================";

/// Link that only appears on the outage page, next to [`OUTAGE_RULE`].
pub const OUTAGE_MARKER: &str = "https://twitter.com/igor_chubin";

pub const UNKNOWN_LOCATION_MARKER: &str = "Unknown location; please try";

/// Values substituted for empty request fields, plus the text signatures
/// used to classify responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    pub language: String,
    pub location: String,
    pub line_format: String,
    pub line_flags: Vec<String>,
    pub ascii_flags: Vec<String>,
    pub image_flags: Vec<String>,
    pub outage: OutageSignature,
    pub unknown_location_marker: String,
}

/// Pair of substrings that must both be present for a body to count as the
/// service's "temporarily unavailable" page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutageSignature {
    pub rule: String,
    pub marker: String,
}

impl Default for OutageSignature {
    fn default() -> Self {
        Self { rule: OUTAGE_RULE.to_string(), marker: OUTAGE_MARKER.to_string() }
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            location: DEFAULT_LOCATION.to_string(),
            line_format: DEFAULT_LINE_FORMAT.to_string(),
            line_flags: to_owned_flags(DEFAULT_LINE_FLAGS),
            ascii_flags: to_owned_flags(DEFAULT_ASCII_FLAGS),
            image_flags: to_owned_flags(DEFAULT_IMAGE_FLAGS),
            outage: OutageSignature::default(),
            unknown_location_marker: UNKNOWN_LOCATION_MARKER.to_string(),
        }
    }
}

impl Defaults {
    /// `value` unless empty, otherwise the default language.
    pub fn language<'a>(&'a self, value: &'a str) -> &'a str {
        or_default(value, &self.language)
    }

    pub fn location<'a>(&'a self, value: &'a str) -> &'a str {
        or_default(value, &self.location)
    }

    pub fn line_format<'a>(&'a self, value: &'a str) -> &'a str {
        or_default(value, &self.line_format)
    }
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() { default } else { value }
}

fn to_owned_flags(flags: &[&str]) -> Vec<String> {
    flags.iter().map(|f| (*f).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let defaults = Defaults::default();

        assert_eq!(defaults.language(""), "zh");
        assert_eq!(defaults.location(""), "成都");
        assert_eq!(defaults.line_format(""), DEFAULT_LINE_FORMAT);
    }

    #[test]
    fn non_empty_values_override_each_field_independently() {
        let defaults = Defaults::default();

        assert_eq!(defaults.language("en"), "en");
        assert_eq!(defaults.location(""), "成都");
        assert_eq!(defaults.location("Berlin"), "Berlin");
        assert_eq!(defaults.line_format("%t"), "%t");
    }

    #[test]
    fn default_flag_sets_per_mode() {
        let defaults = Defaults::default();

        assert_eq!(defaults.line_flags, vec!["m", "M"]);
        assert_eq!(defaults.ascii_flags.len(), 7);
        assert_eq!(defaults.image_flags, vec!["0", "m", "p", "q"]);
    }

    #[test]
    fn outage_rule_is_a_long_horizontal_rule() {
        assert_eq!(OUTAGE_RULE.len(), 86);
        assert!(OUTAGE_RULE.chars().all(|c| c == '='));
    }
}
