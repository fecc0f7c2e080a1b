//! Config fetcher: resolves the configuration location against the page and
//! performs the single request. No timeout and no retry are applied.

use super::model::ContentConfig;
use crate::{Error, LoaderOptions, Result};
use reqwest::header::USER_AGENT;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use url::Url;

/// Where the configuration document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Http(Url),
    File(PathBuf),
}

impl ConfigSource {
    /// Resolve `config_path` relative to the page at `page_url`.
    ///
    /// For `http(s)` pages the path is joined like a link. For file pages an
    /// absolute path (`/config/content.json`) resolves under `site_root`, or
    /// the page's directory when no root is given; relative paths resolve
    /// against the page's directory. An absolute URL is used as-is.
    pub fn resolve(config_path: &str, page_url: &Url, site_root: Option<&Path>) -> Result<Self> {
        if let Ok(url) = Url::parse(config_path) {
            return Self::from_url(url);
        }

        match page_url.scheme() {
            "http" | "https" => {
                let url = page_url
                    .join(config_path)
                    .map_err(|e| Error::ConfigError(format!("cannot resolve {}: {}", config_path, e)))?;
                Ok(ConfigSource::Http(url))
            }
            "file" => {
                let page_path = page_url
                    .to_file_path()
                    .map_err(|_| Error::ConfigError(format!("not a local page: {}", page_url)))?;
                let page_dir = page_path.parent().map(Path::to_path_buf).unwrap_or_default();
                Ok(ConfigSource::File(join_site_path(config_path, &page_dir, site_root)))
            }
            _ => match site_root {
                Some(root) => Ok(ConfigSource::File(join_site_path(config_path, root, Some(root)))),
                None => Err(Error::ConfigError(format!(
                    "cannot resolve {} against {} without a site root",
                    config_path, page_url
                ))),
            },
        }
    }

    fn from_url(url: Url) -> Result<Self> {
        match url.scheme() {
            "http" | "https" => Ok(ConfigSource::Http(url)),
            "file" => url
                .to_file_path()
                .map(ConfigSource::File)
                .map_err(|_| Error::ConfigError(format!("not a local file URL: {}", url))),
            other => Err(Error::ConfigError(format!("unsupported config scheme `{}`", other))),
        }
    }

    /// Human-readable location used in errors and logs
    pub fn location(&self) -> String {
        match self {
            ConfigSource::Http(url) => url.to_string(),
            ConfigSource::File(path) => path.display().to_string(),
        }
    }
}

fn join_site_path(config_path: &str, page_dir: &Path, site_root: Option<&Path>) -> PathBuf {
    match config_path.strip_prefix('/') {
        Some(rest) => site_root.unwrap_or(page_dir).join(rest),
        None => page_dir.join(config_path),
    }
}

/// Fetches and parses the content configuration
#[derive(Debug, Clone)]
pub struct ConfigFetcher {
    client: reqwest::Client,
    source: ConfigSource,
    user_agent: String,
    headers: HashMap<String, String>,
}

impl ConfigFetcher {
    pub fn new(source: ConfigSource, options: &LoaderOptions) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::InitializationError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            source,
            user_agent: options.user_agent.clone(),
            headers: options.headers.clone(),
        })
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// Perform the request and parse the body.
    ///
    /// A non-success status (or a missing local file) is `ConfigLoad`; a body
    /// that is not a valid configuration is `ConfigParse`.
    pub async fn fetch(&self) -> Result<ContentConfig> {
        let location = self.source.location();
        log::debug!("fetching content configuration from {}", location);

        let body = match &self.source {
            ConfigSource::Http(url) => {
                let mut req = self
                    .client
                    .get(url.clone())
                    .header(USER_AGENT, self.user_agent.as_str());
                for (k, v) in &self.headers {
                    req = req.header(k.as_str(), v.as_str());
                }
                let resp = req
                    .send()
                    .await
                    .map_err(|e| Error::Network(format!("GET {} failed: {}", location, e)))?;
                let status = resp.status();
                if !status.is_success() {
                    return Err(Error::ConfigLoad { location, status: status.as_u16() });
                }
                resp.text()
                    .await
                    .map_err(|e| Error::Network(format!("Failed to read {}: {}", location, e)))?
            }
            ConfigSource::File(path) => match tokio::fs::read_to_string(path).await {
                Ok(body) => body,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    return Err(Error::ConfigLoad { location, status: 404 });
                }
                Err(e) => return Err(e.into()),
            },
        };

        ContentConfig::from_json(&body, &location)
    }
}
