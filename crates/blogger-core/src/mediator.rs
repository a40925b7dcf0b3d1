//! Mediator - routes each request to the single handler registered for it.
//!
//! Routing is a compile-time table: [`Mediator`] implements [`Route`] once per
//! supported request type, so sending a request nobody handles does not
//! compile. The table is filled through [`MediatorBuilder`], which refuses to
//! build while a slot is empty or was filled twice.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::Instrument;

use crate::application::{CreateBlogCommand, GetBlogByIdQuery};
use crate::error::{DispatchError, DomainError};

/// A query or command that can be sent through the [`Mediator`].
pub trait Request: Send + 'static {
    /// What the handler produces for this request.
    type Response: Send + 'static;

    /// Stable name used in logs and configuration errors.
    const NAME: &'static str;
}

/// Handler for exactly one request type.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    type Request: Request;

    async fn handle(
        &self,
        request: Self::Request,
    ) -> Result<<Self::Request as Request>::Response, DomainError>;
}

/// Handler shared between the builder and the built mediator.
pub type SharedHandler<R> = Arc<dyn RequestHandler<Request = R>>;

/// Lookup of the handler serving `R`.
pub trait Route<R: Request> {
    fn route(&self) -> &dyn RequestHandler<Request = R>;
}

/// Registration slot for the handler serving `R`.
pub trait Register<R: Request> {
    fn slot(&mut self) -> &mut Option<SharedHandler<R>>;
}

/// Dispatches requests to their handlers.
///
/// Built once at startup and immutable afterwards; clone it or share it
/// behind an `Arc`.
#[derive(Clone)]
pub struct Mediator {
    get_blog_by_id: SharedHandler<GetBlogByIdQuery>,
    create_blog: SharedHandler<CreateBlogCommand>,
}

impl Mediator {
    pub fn builder() -> MediatorBuilder {
        MediatorBuilder::default()
    }

    /// Send a request to its handler and return whatever the handler produces.
    pub async fn send<R>(&self, request: R) -> Result<R::Response, DomainError>
    where
        R: Request,
        Self: Route<R>,
    {
        let span = tracing::debug_span!("dispatch", request = R::NAME);
        <Self as Route<R>>::route(self)
            .handle(request)
            .instrument(span)
            .await
    }
}

impl Route<GetBlogByIdQuery> for Mediator {
    fn route(&self) -> &dyn RequestHandler<Request = GetBlogByIdQuery> {
        self.get_blog_by_id.as_ref()
    }
}

impl Route<CreateBlogCommand> for Mediator {
    fn route(&self) -> &dyn RequestHandler<Request = CreateBlogCommand> {
        self.create_blog.as_ref()
    }
}

/// Collects handlers and produces a [`Mediator`].
#[derive(Default)]
pub struct MediatorBuilder {
    get_blog_by_id: Option<SharedHandler<GetBlogByIdQuery>>,
    create_blog: Option<SharedHandler<CreateBlogCommand>>,
    duplicates: Vec<&'static str>,
}

impl MediatorBuilder {
    /// Register `handler` for the request type it declares.
    pub fn register<H>(mut self, handler: H) -> Self
    where
        H: RequestHandler + 'static,
        Self: Register<H::Request>,
    {
        let handler: SharedHandler<H::Request> = Arc::new(handler);
        let replaced = <Self as Register<H::Request>>::slot(&mut self)
            .replace(handler)
            .is_some();

        if replaced {
            self.duplicates.push(<H::Request as Request>::NAME);
        }

        self
    }

    /// Finish registration.
    pub fn build(self) -> Result<Mediator, DispatchError> {
        if let Some(name) = self.duplicates.first() {
            return Err(DispatchError::DuplicateHandler(*name));
        }

        let mediator = Mediator {
            get_blog_by_id: self
                .get_blog_by_id
                .ok_or(DispatchError::MissingHandler(GetBlogByIdQuery::NAME))?,
            create_blog: self
                .create_blog
                .ok_or(DispatchError::MissingHandler(CreateBlogCommand::NAME))?,
        };

        tracing::debug!(
            handlers = ?[GetBlogByIdQuery::NAME, CreateBlogCommand::NAME],
            "Mediator built"
        );

        Ok(mediator)
    }
}

impl Register<GetBlogByIdQuery> for MediatorBuilder {
    fn slot(&mut self) -> &mut Option<SharedHandler<GetBlogByIdQuery>> {
        &mut self.get_blog_by_id
    }
}

impl Register<CreateBlogCommand> for MediatorBuilder {
    fn slot(&mut self) -> &mut Option<SharedHandler<CreateBlogCommand>> {
        &mut self.create_blog
    }
}
