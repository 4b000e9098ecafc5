//! # Community Client
//!
//! `reqwest` implementation of [`CommunityApi`](community_engine::CommunityApi)
//! and the client configuration shared by the desktop app and the CLI.

pub mod config;
pub mod http;

pub use config::{CONFIG_FILE_NAME, ClientConfig, DEFAULT_API_URL};
pub use http::HttpCommunityApi;
