//! A loaded page: its document plus the window hosting it.

use crate::dom::Document;
use crate::platform::Window;
use crate::{Error, Result, Viewport};
use reqwest::header::USER_AGENT;
use sha2::{Digest, Sha256};
use url::Url;

#[derive(Debug, Clone)]
pub struct Page {
    pub document: Document,
    pub window: Window,
}

impl Page {
    /// Build a page from markup served at `location`
    pub fn new(html: &str, location: Url, viewport: Viewport) -> Self {
        Self {
            document: Document::parse(html),
            window: Window::new(location, viewport),
        }
    }

    /// Build a page from markup with a placeholder `http://localhost/` location
    pub fn from_html(html: &str) -> Self {
        let location = Url::parse("http://localhost/").expect("static URL parses");
        Self::new(html, location, Viewport::default())
    }

    /// Load a page from an `http(s)` URL, a `file://` URL or a filesystem path
    pub async fn load(target: &str, viewport: Viewport, user_agent: &str) -> Result<Self> {
        match Url::parse(target) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
                let client = reqwest::Client::builder()
                    .build()
                    .map_err(|e| Error::InitializationError(format!("Failed to build HTTP client: {}", e)))?;
                let resp = client
                    .get(url.clone())
                    .header(USER_AGENT, user_agent)
                    .send()
                    .await
                    .map_err(|e| Error::LoadError(format!("Failed to fetch {}: {}", url, e)))?;
                if !resp.status().is_success() {
                    return Err(Error::LoadError(format!("{} answered {}", url, resp.status())));
                }
                // keep the final URL after redirects
                let location = resp.url().clone();
                let body = resp
                    .text()
                    .await
                    .map_err(|e| Error::LoadError(format!("Failed to read response body: {}", e)))?;
                Ok(Self::new(&body, location, viewport))
            }
            Ok(url) if url.scheme() == "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|_| Error::LoadError(format!("Not a local file URL: {}", url)))?;
                let body = tokio::fs::read_to_string(&path).await?;
                Ok(Self::new(&body, url, viewport))
            }
            _ => {
                let path = tokio::fs::canonicalize(target).await?;
                let body = tokio::fs::read_to_string(&path).await?;
                let location = Url::from_file_path(&path)
                    .map_err(|_| Error::LoadError(format!("Cannot express {} as a URL", path.display())))?;
                Ok(Self::new(&body, location, viewport))
            }
        }
    }

    /// SHA-256 of the serialized document, hex encoded
    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(self.document.to_html().as_bytes()))
    }
}
