use crate::prelude::*;

/// Site API configuration from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub base_url: String,
}

impl SiteConfig {
    /// Production API the site templates were built against
    pub const DEFAULT_BASE_URL: &'static str =
        "https://kingdom-spices-herbs-backend-dashbo.vercel.app/api";

    /// Load configuration from environment variables
    /// Uses GARDENIC_API_BASE_URL with default fallback
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("GARDENIC_API_BASE_URL")
                .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string()),
        }
    }

    /// Apply CLI overrides and validate the result
    pub fn with_overrides(mut self, base_url: Option<String>) -> Result<Self, Error> {
        if let Some(url) = base_url {
            self.base_url = url;
        }

        let trimmed = self.base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(Error::Config(format!(
                "API base URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        self.base_url = trimmed.to_string();

        Ok(self)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }
}
