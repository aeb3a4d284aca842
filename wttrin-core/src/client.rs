//! HTTP client for wttr.in.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::{
    classify::{is_service_unavailable, is_unknown_location},
    config::Config,
    defaults::{BASE_URL, Defaults, TIMEOUT_SECS},
    error::{Result, WttrError},
    model::{Forecast, ForecastRequest, Mode},
    stream::ForecastStream,
};

/// Issues single GET requests against wttr.in.
///
/// No retries are attempted: every failure is returned to the caller as a
/// [`WttrError`]. The client is cheap to clone and holds no mutable state.
///
/// ```no_run
/// # async fn example() -> wttrin_core::Result<()> {
/// let client = wttrin_core::WttrClient::new()?;
/// let line = client.line("en", "Berlin", "%l: %c %t", &["m"]).await?;
/// println!("{line}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WttrClient {
    http: Client,
    base_url: String,
    defaults: Defaults,
}

impl WttrClient {
    pub fn new() -> Result<Self> {
        Self::with_config(BASE_URL, Duration::from_secs(TIMEOUT_SECS), Defaults::default())
    }

    /// `base_url` gets a trailing `/` if it lacks one; request paths are
    /// appended to it verbatim.
    pub fn with_config(
        base_url: impl Into<String>,
        timeout: Duration,
        defaults: Defaults,
    ) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build().map_err(WttrError::HttpClient)?;

        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self { http, base_url, defaults })
    }

    /// Build a client from the on-disk configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_config(config.base_url(), config.timeout(), config.defaults())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// GET `<base_url><path_and_query>` and return the open body.
    pub async fn fetch_raw(&self, path_and_query: &str) -> Result<ForecastStream> {
        let url = format!("{}{}", self.base_url, path_and_query);
        debug!(%url, "wttr.in request");

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(source) => return Err(WttrError::Transport { url, source }),
        };

        let status = response.status();
        debug!(%url, %status, "wttr.in response");

        if status != StatusCode::OK {
            return Err(WttrError::UnexpectedStatus { url, status });
        }

        Ok(ForecastStream::new(url, response))
    }

    /// Single-line forecast rendered from `format`.
    ///
    /// Empty `language`, `location`, `format` or `flags` fall back to the
    /// client's [`Defaults`].
    pub async fn line<S: AsRef<str>>(
        &self,
        language: &str,
        location: &str,
        format: &str,
        flags: &[S],
    ) -> Result<String> {
        let request = ForecastRequest::new(Mode::Line)
            .with_language(language)
            .with_location(location)
            .with_format(format)
            .with_flags(flags);

        self.fetch_text(&request).await
    }

    /// Multi-line ASCII report.
    pub async fn ascii<S: AsRef<str>>(
        &self,
        language: &str,
        location: &str,
        flags: &[S],
    ) -> Result<String> {
        let request = ForecastRequest::new(Mode::Ascii)
            .with_language(language)
            .with_location(location)
            .with_flags(flags);

        self.fetch_text(&request).await
    }

    /// PNG forecast. The body is not inspected.
    pub async fn image<S: AsRef<str>>(
        &self,
        language: &str,
        location: &str,
        flags: &[S],
    ) -> Result<ForecastStream> {
        let request = ForecastRequest::new(Mode::Image)
            .with_language(language)
            .with_location(location)
            .with_flags(flags);

        self.fetch_raw(&request.query(&self.defaults)).await
    }

    pub async fn forecast(&self, request: &ForecastRequest) -> Result<Forecast> {
        if request.mode.is_text() {
            self.fetch_text(request).await.map(Forecast::Text)
        } else {
            self.fetch_raw(&request.query(&self.defaults)).await.map(Forecast::Image)
        }
    }

    async fn fetch_text(&self, request: &ForecastRequest) -> Result<String> {
        let body = self.fetch_raw(&request.query(&self.defaults)).await?.text().await?;

        if is_service_unavailable(&body, &self.defaults.outage) {
            warn!(mode = %request.mode, "wttr.in returned its outage page");
            return Err(WttrError::ServiceUnavailable { body });
        }

        // ascii reports are returned even when the location did not resolve
        if request.mode == Mode::Line
            && is_unknown_location(&body, &self.defaults.unknown_location_marker)
        {
            let location = request.resolved_location(&self.defaults).to_string();
            warn!(%location, "wttr.in could not resolve location");
            return Err(WttrError::LocationNotFound { location });
        }

        Ok(body)
    }
}
