//! Client-side session state.
//!
//! DESIGN
//! ======
//! `session` persists the bearer credential, `notify` surfaces transient
//! user-facing messages, and `auth` ties both to the backend as the single
//! owner of "who is the current user".

pub mod auth;
pub mod notify;
pub mod session;
