//! Client library for the Bitbucket Server (Stash) project REST API
//!
//! Authenticates, builds requests against the fixed `/rest/api/1.0/` API
//! root, executes them with a bounded timeout, and maps responses into
//! typed results or a closed error taxonomy callers can branch on.
//!
//! # Overview
//! - [`Client::connect`] validates configuration and probes the server
//!   before handing out a usable client.
//! - [`Client::projects`] returns the typed CRUD facade for the projects
//!   resource.
//! - Authentication is pluggable via [`Credentials`]: static Basic blob,
//!   static Bearer token, or a refreshable [`TokenSource`].
//!
//! ```no_run
//! use stash_client::{Client, ClientConfig, Credentials};
//!
//! # async fn run() -> stash_client::Result<()> {
//! let config = ClientConfig::new(
//!     "https://stash.example.com",
//!     Credentials::basic("dXNlcjpwYXNz"),
//! );
//! let client = Client::connect(config).await?;
//! let project = client.projects().get("DEMO").await?;
//! println!("{}", project.name);
//! # Ok(())
//! # }
//! ```
//!
//! Operations never retry internally; only the caller knows which of them
//! are idempotent. Dropping an in-flight future cancels the request.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod id;
pub mod projects;

#[cfg(test)]
mod tests;

// Re-export main types for convenience
pub use auth::{Credentials, TokenSource};
pub use client::Client;
pub use config::{ClientConfig, RequestConfig};
pub use error::ClientError;
pub use id::ProjectId;
pub use projects::{CreateProject, Project, ProjectPage, ProjectService, UpdateProject};

pub type Result<T> = std::result::Result<T, ClientError>;
