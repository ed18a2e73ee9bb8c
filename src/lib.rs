//! Typed client for the Drone CI REST API.
//!
//! [`DroneClient`] maps each repository, build, cron, log, member and secret
//! operation onto a single authenticated HTTP request and hands back the raw
//! [`ApiResponse`]. Error statuses are returned, not raised; only
//! configuration and transport failures surface as [`DroneError`].
//!
//! ```rust,no_run
//! use dronectl::{DroneClient, Token};
//!
//! # async fn example() -> dronectl::Result<()> {
//! let client = DroneClient::new("https://drone.example.com/api", Token::from("s3cr3t"))?;
//! let response = client.repo("octocat", "hello-world").await?;
//! if response.is_success() {
//!     println!("{}", response.text());
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;

pub use auth::Token;
pub use client::{ApiResponse, ClientBuilder, DeployAction, DroneClient, RequestBody};
pub use config::{Config, DroneConfig};
pub use error::{DroneError, Result};
