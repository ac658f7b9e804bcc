//! # Folio Shared
//!
//! Wire types shared by the blog server and its clients.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, MessageResponse};
