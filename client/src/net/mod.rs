//! Networking modules for the backend and site HTTP APIs.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls against the backend session endpoints and the
//! site relay, and `types` defines the shared wire schema.

pub mod api;
pub mod types;
