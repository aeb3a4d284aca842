use std::fmt;

use crate::{
    defaults::Defaults,
    query::{ascii_query, image_query, line_query},
    stream::ForecastStream,
};

/// Response shape requested from wttr.in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Line,
    Ascii,
    Image,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Line => "line",
            Mode::Ascii => "ascii",
            Mode::Image => "image",
        }
    }

    pub const fn all() -> &'static [Mode] {
        &[Mode::Line, Mode::Ascii, Mode::Image]
    }

    pub fn is_text(&self) -> bool {
        !matches!(self, Mode::Image)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Mode {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "line" => Ok(Mode::Line),
            "ascii" => Ok(Mode::Ascii),
            "image" | "png" => Ok(Mode::Image),
            _ => Err(anyhow::anyhow!(
                "Unknown mode '{value}'. Supported modes: line, ascii, image."
            )),
        }
    }
}

/// One forecast call. Empty fields are replaced by [`Defaults`] when the
/// query is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastRequest {
    pub mode: Mode,
    pub language: String,
    pub location: String,
    /// Only used in [`Mode::Line`].
    pub format: String,
    /// Opaque display tokens, joined in this order.
    pub flags: Vec<String>,
}

impl ForecastRequest {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            language: String::new(),
            location: String::new(),
            format: String::new(),
            flags: Vec::new(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn with_flags<S: AsRef<str>>(mut self, flags: &[S]) -> Self {
        self.flags = flags.iter().map(|f| f.as_ref().to_string()).collect();
        self
    }

    /// Location actually sent, after defaults.
    pub fn resolved_location<'a>(&'a self, defaults: &'a Defaults) -> &'a str {
        defaults.location(&self.location)
    }

    /// Path and query segment appended to the base URL.
    pub fn query(&self, defaults: &Defaults) -> String {
        let language = defaults.language(&self.language);
        let location = defaults.location(&self.location);

        match self.mode {
            Mode::Line => line_query(
                language,
                location,
                defaults.line_format(&self.format),
                flags_or(&self.flags, &defaults.line_flags),
            ),
            Mode::Ascii => ascii_query(language, location, flags_or(&self.flags, &defaults.ascii_flags)),
            Mode::Image => image_query(language, location, flags_or(&self.flags, &defaults.image_flags)),
        }
    }
}

fn flags_or<'a>(flags: &'a [String], default: &'a [String]) -> &'a [String] {
    if flags.is_empty() { default } else { flags }
}

/// Result of [`crate::WttrClient::forecast`].
#[derive(Debug)]
pub enum Forecast {
    /// Verbatim body of a line or ascii request.
    Text(String),
    /// Open PNG stream, released when dropped.
    Image(ForecastStream),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::escape_format;

    #[test]
    fn mode_as_str_roundtrip() {
        for mode in Mode::all() {
            let parsed = Mode::try_from(mode.as_str()).expect("roundtrip should succeed");
            assert_eq!(*mode, parsed);
        }
        assert_eq!(Mode::try_from("PNG").unwrap(), Mode::Image);
    }

    #[test]
    fn only_image_mode_is_binary() {
        assert!(Mode::Line.is_text());
        assert!(Mode::Ascii.is_text());
        assert!(!Mode::Image.is_text());
    }

    #[test]
    fn unknown_mode_error() {
        let err = Mode::try_from("html").unwrap_err();
        assert!(err.to_string().contains("Unknown mode"));
    }

    #[test]
    fn line_request_with_defaults() {
        let defaults = Defaults::default();
        let request = ForecastRequest::new(Mode::Line).with_language("zh").with_location("Chengdu");

        let expected = format!(
            "Chengdu?lang=zh&format={}&m_M",
            escape_format(&defaults.line_format)
        );
        assert_eq!(request.query(&defaults), expected);
    }

    #[test]
    fn ascii_request_with_flags() {
        let request = ForecastRequest::new(Mode::Ascii)
            .with_language("zh")
            .with_location("Chengdu")
            .with_flags(&["0", "A", "Q"]);

        assert_eq!(request.query(&Defaults::default()), "Chengdu?lang=zh&0_A_Q");
    }

    #[test]
    fn image_request_with_defaults() {
        let request = ForecastRequest::new(Mode::Image).with_language("zh").with_location("Chengdu");
        assert_eq!(request.query(&Defaults::default()), "Chengdu_lang=zh_0_m_p_q.png");
    }

    #[test]
    fn empty_request_uses_every_default() {
        let request = ForecastRequest::new(Mode::Ascii);
        assert_eq!(request.query(&Defaults::default()), "成都?lang=zh&0_A_T_F_m_M_p");
    }

    #[test]
    fn fields_override_defaults_independently() {
        let defaults = Defaults::default();

        let only_language = ForecastRequest::new(Mode::Image).with_language("en");
        assert_eq!(only_language.query(&defaults), "成都_lang=en_0_m_p_q.png");

        let only_location = ForecastRequest::new(Mode::Image).with_location("Paris");
        assert_eq!(only_location.query(&defaults), "Paris_lang=zh_0_m_p_q.png");

        let only_flags = ForecastRequest::new(Mode::Image).with_flags(&["t"]);
        assert_eq!(only_flags.query(&defaults), "成都_lang=zh_t.png");
    }

    #[test]
    fn custom_defaults_apply_without_touching_requests() {
        let defaults = Defaults {
            language: "de".into(),
            location: "Berlin".into(),
            ascii_flags: vec!["1".into(), "F".into()],
            ..Defaults::default()
        };

        let request = ForecastRequest::new(Mode::Ascii);
        assert_eq!(request.query(&defaults), "Berlin?lang=de&1_F");
        assert_eq!(request.resolved_location(&defaults), "Berlin");
    }

    #[test]
    fn format_is_ignored_outside_line_mode() {
        let request = ForecastRequest::new(Mode::Ascii).with_format("%t").with_flags(&["0"]);
        assert_eq!(request.query(&Defaults::default()), "成都?lang=zh&0");
    }
}
