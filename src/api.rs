mod backend;
mod client;
mod config;
mod error;
mod models;

pub use self::{backend::Backend, client::Api, config::ApiConfig, error::FetchError};
