use reqwest::{Response, StatusCode, header::CONTENT_TYPE};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::{Result, WttrError};

/// Open response body returned by [`crate::WttrClient::fetch_raw`] and image
/// requests.
///
/// The caller owns the underlying connection. Dropping the stream releases
/// it, whether the body was read fully, partially or not at all.
#[derive(Debug)]
pub struct ForecastStream {
    url: String,
    response: Response,
}

impl ForecastStream {
    pub(crate) fn new(url: String, response: Response) -> Self {
        Self { url, response }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.response.headers().get(CONTENT_TYPE).and_then(|ct| ct.to_str().ok())
    }

    pub fn content_length(&self) -> Option<u64> {
        self.response.content_length()
    }

    /// Next chunk of the body, `None` once it is exhausted.
    pub async fn chunk(&mut self) -> Result<Option<Vec<u8>>> {
        let chunk = self.response.chunk().await.map_err(|source| WttrError::Transport {
            url: self.url.clone(),
            source,
        })?;

        Ok(chunk.map(|bytes| bytes.to_vec()))
    }

    pub async fn bytes(self) -> Result<Vec<u8>> {
        let Self { url, response } = self;
        let bytes = response.bytes().await.map_err(|source| WttrError::Transport { url, source })?;
        Ok(bytes.to_vec())
    }

    /// Body decoded as text (UTF-8 unless the response declares a charset).
    pub async fn text(self) -> Result<String> {
        let Self { url, response } = self;
        response.text().await.map_err(|source| WttrError::Transport { url, source })
    }

    /// Stream the remaining body into `writer`, returning the bytes written.
    pub async fn copy_to<W>(mut self, writer: &mut W) -> Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        let mut written = 0u64;
        while let Some(chunk) = self.chunk().await? {
            writer.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        writer.flush().await?;

        Ok(written)
    }
}
