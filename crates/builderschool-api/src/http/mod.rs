//! HTTP layer: the JSON API and the embedded web UI.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
