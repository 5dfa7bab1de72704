//! # client
//!
//! Session client for the Dracarys site. Holds the wire types shared with the
//! backend, the HTTP helper that talks to it, the page-scoped auth context
//! with its credential store, and the static product catalog.

pub mod catalog;
pub mod net;
pub mod state;
