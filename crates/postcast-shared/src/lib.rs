//! # Postcast Shared
//!
//! Wire types between the scheduler views and the local server.
//! Plain serde types only, so a WASM front end can compile them too.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
