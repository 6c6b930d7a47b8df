use std::time::Duration;

use clap::Parser;
use reqwest::Url;

use crate::{
    api::{Api, ApiConfig},
    prelude::*,
};

#[derive(Parser)]
pub struct ApiArgs {
    /// Dashboard backend base URL. For example: `https://api.example.com`.
    #[clap(long = "api-url", env = "SITEBILL_API_URL")]
    pub base_url: Url,

    /// Per-request timeout.
    #[clap(long = "api-timeout-secs", default_value = "10", env = "SITEBILL_API_TIMEOUT_SECS")]
    pub timeout_secs: u64,
}

impl ApiArgs {
    pub fn config(&self) -> ApiConfig {
        ApiConfig::new(self.base_url.clone(), Duration::from_secs(self.timeout_secs))
    }

    pub fn new_client(&self) -> Result<Api> {
        Api::new(self.config())
    }
}
