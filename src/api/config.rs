use std::time::Duration;

use reqwest::Url;

use crate::api::error::FetchError;

/// Where and how to reach the dashboard backend.
#[must_use]
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// For example: `https://api.example.com/v1`.
    pub base_url: Url,

    pub timeout: Duration,
}

impl ApiConfig {
    pub const fn new(base_url: Url, timeout: Duration) -> Self {
        Self { base_url, timeout }
    }

    /// Build the endpoint URL by appending the path segments to the base URL.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| FetchError::InvalidBaseUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn test_endpoint_with_trailing_slash() -> Result {
        let config = ApiConfig::new("https://api.example.com/v1/".parse()?, Duration::from_secs(1));
        assert_eq!(
            config.endpoint(&["billing", "summary"])?.as_str(),
            "https://api.example.com/v1/billing/summary"
        );
        Ok(())
    }

    #[test]
    fn test_endpoint_at_root() -> Result {
        let config = ApiConfig::new("http://localhost:8000".parse()?, Duration::from_secs(1));
        assert_eq!(config.endpoint(&["sites"])?.as_str(), "http://localhost:8000/sites");
        Ok(())
    }

    #[test]
    fn test_endpoint_invalid_base() -> Result {
        let config = ApiConfig::new("mailto:someone@example.com".parse()?, Duration::from_secs(1));
        assert!(matches!(config.endpoint(&["sites"]), Err(FetchError::InvalidBaseUrl(_))));
        Ok(())
    }
}
