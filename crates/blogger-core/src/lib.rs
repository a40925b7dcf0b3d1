//! # Blogger Core
//!
//! The domain layer of the Blogger service.
//! Entities, ports, request handlers and the mediator that routes to them.
//! No infrastructure dependencies live here.

pub mod application;
pub mod domain;
pub mod error;
pub mod mediator;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{DispatchError, DomainError, RepoError};
pub use mediator::{Mediator, MediatorBuilder, Request, RequestHandler};
