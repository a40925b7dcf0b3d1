//! Application layer - the requests the service understands and their handlers.

mod create_blog;
mod get_blog;

pub use create_blog::{CreateBlogCommand, CreateBlogHandler};
pub use get_blog::{GetBlogByIdHandler, GetBlogByIdQuery};
