//! # Blogger Shared
//!
//! Wire types shared by the server and any Rust client of the Blogger API.

pub mod dto;
pub mod response;

pub use dto::{BlogResponse, CreateBlogRequest};
pub use response::ErrorResponse;
