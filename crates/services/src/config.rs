use std::env;

use url::Url;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5005";

/// Where the backend lives.
///
/// `base` is the server root; JSON endpoints hang off `{base}/api/` and
/// uploaded files (certificates, submissions) off the root itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base: Url,
}

impl ApiConfig {
    /// Parse a server root. A trailing `/api` segment is accepted and dropped.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if `raw` is not an absolute URL.
    pub fn new(raw: &str) -> Result<Self, url::ParseError> {
        let mut base = Url::parse(raw.trim())?;
        let path = base.path().trim_end_matches('/');
        let path = path.strip_suffix("/api").unwrap_or(path);
        let normalized = format!("{path}/");
        base.set_path(&normalized);
        Ok(Self { base })
    }

    /// Read `LMS_API_BASE`, falling back to the local development server.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if the configured value is not a URL.
    pub fn from_env() -> Result<Self, url::ParseError> {
        let raw = env::var("LMS_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into());
        Self::new(&raw)
    }

    #[must_use]
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Endpoint under `{base}/api/`.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if `path` cannot be joined.
    pub fn api_url(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base
            .join("api/")?
            .join(path.trim_start_matches('/'))
    }

    /// Static file served from the server root (certificates, uploads).
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if `path` cannot be joined.
    pub fn asset_url(&self, path: &str) -> Result<Url, url::ParseError> {
        if is_absolute(path) {
            return self.base.join(path);
        }
        self.base.join(path.trim_start_matches('/'))
    }

    /// Course resource link. Relative links live under `{base}/api/`.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if the link cannot be joined.
    pub fn resource_url(&self, link: &str) -> Result<Url, url::ParseError> {
        if is_absolute(link) {
            return self.base.join(link);
        }
        self.api_url(link)
    }
}

fn is_absolute(link: &str) -> bool {
    link.starts_with("http") || link.starts_with("//")
}
