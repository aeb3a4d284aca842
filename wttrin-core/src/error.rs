use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WttrError>;

#[derive(Debug, Error)]
pub enum WttrError {
    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("Request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("wttr.in request {url} failed with status {status}")]
    UnexpectedStatus { url: String, status: StatusCode },

    /// The body is the service's outage page; kept verbatim.
    #[error("wttr.in is temporarily unavailable")]
    ServiceUnavailable { body: String },

    #[error("wttr.in could not resolve location '{location}'")]
    LocationNotFound { location: String },

    #[error("Failed to write forecast stream")]
    Io(#[from] std::io::Error),
}

impl WttrError {
    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            WttrError::Transport { .. } => Some("Check your internet connection and try again"),
            WttrError::ServiceUnavailable { .. } => {
                Some("wttr.in is overloaded, wait a moment before making another request")
            }
            WttrError::LocationNotFound { .. } => {
                Some("Try a city name, an airport code or coordinates such as 30.66,104.06")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let err = WttrError::UnexpectedStatus {
            url: "http://wttr.in/x".into(),
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(err.to_string(), "wttr.in request http://wttr.in/x failed with status 404 Not Found");

        let err = WttrError::LocationNotFound { location: "Atlantis".into() };
        assert_eq!(err.to_string(), "wttr.in could not resolve location 'Atlantis'");
    }

    #[test]
    fn help_text() {
        assert!(WttrError::ServiceUnavailable { body: String::new() }.help_text().is_some());
        assert!(WttrError::LocationNotFound { location: String::new() }.help_text().is_some());
        let io = WttrError::from(std::io::Error::other("disk full"));
        assert!(io.help_text().is_none());
    }
}
