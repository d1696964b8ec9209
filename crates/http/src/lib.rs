//! Campus HTTP client
//!
//! Typed client for the campus platform backend. Every call goes through a
//! shared pipeline that attaches the stored bearer token and, when the
//! backend rejects it, coordinates a single access-token refresh shared by
//! all concurrent callers before replaying their requests.

pub mod client;
pub mod types;

pub use client::error::{ClientError, RefreshError};
pub use client::{CampusClient, ClientBuilder};
