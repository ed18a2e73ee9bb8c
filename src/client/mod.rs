//! Typed client for the Drone CI REST API.
//!
//! Every operation is one authenticated HTTP request whose raw response is
//! handed back untouched. Resource families live in their own modules and
//! all extend [`DroneClient`].

mod builds;
mod core;
mod crons;
mod deployments;
mod logs;
mod members;
mod repos;
mod response;
mod secrets;
mod user;


pub use self::core::{ClientBuilder, DroneClient};
pub use deployments::DeployAction;
pub use response::ApiResponse;

/// JSON object sent with create and update calls.
///
/// Insertion order is kept so the payload goes out exactly as assembled.
pub type RequestBody = indexmap::IndexMap<String, serde_json::Value>;
