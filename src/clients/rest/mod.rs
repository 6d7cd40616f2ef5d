//! Transport adapter for the JSON:API service.
//!
//! This module provides [`RestClient`], a thin layer over
//! [`HttpClient`](crate::clients::HttpClient) offering one method per HTTP
//! verb plus transparent pagination traversal.
//!
//! # Path Normalization
//!
//! - Leading slashes are stripped: `/articles` -> `articles`
//! - Absolute `http(s)://` URLs (pagination links) are used verbatim
//! - Empty paths are rejected before any request is sent
//!
//! # Example
//!
//! ```rust,ignore
//! use jsonapi_client::{ClientConfig, RestClient, StaticToken};
//!
//! let config = ClientConfig::builder()
//!     .auth(StaticToken::new("token").unwrap())
//!     .build()?;
//! let client = RestClient::new(&config)?;
//!
//! let response = client.get("articles").await?;
//! println!("First page: {}", response.body);
//! ```

mod client;

pub use client::RestClient;
