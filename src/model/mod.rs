//! Request and response bodies exchanged over the HTTP API.
//!
//! All bodies use camelCase field names on the wire.

pub mod admin;
pub mod api;
pub mod email;
pub mod maintenance;
pub mod pending;
pub mod reservation;
pub mod user;
pub mod vehicle;
