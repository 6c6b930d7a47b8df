use reqwest::{StatusCode, Url};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("`{0}` cannot be used as a base URL")]
    InvalidBaseUrl(Url),

    #[error("failed to encode the query string")]
    Query(#[from] serde_qs::Error),

    #[error("request to `{url}` failed")]
    Network {
        url: Url,

        #[source]
        source: reqwest::Error,
    },

    #[error("`{url}` responded with {status}")]
    Status { url: Url, status: StatusCode },

    #[error("malformed response from `{url}`")]
    MalformedResponse {
        url: Url,

        #[source]
        source: serde_json::Error,
    },
}
