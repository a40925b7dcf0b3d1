//! Blog endpoints - translate HTTP into mediator requests and back.

use actix_web::{HttpResponse, http::header, web};
use uuid::Uuid;

use blogger_core::application::{CreateBlogCommand, GetBlogByIdQuery};
use blogger_core::error::DomainError;
use blogger_shared::{BlogResponse, CreateBlogRequest, ErrorResponse};

use crate::middleware::error::AppResult;
use crate::observability::RequestId;
use crate::state::AppState;

/// Path of the GET endpoint serving `id`.
pub fn blog_location(id: Uuid) -> String {
    format!("/blogs/{}", id)
}

/// Fetch a blog by id.
#[utoipa::path(
    get,
    path = "/blogs/{id}",
    tag = "blogs",
    params(("id" = Uuid, Path, description = "Blog identifier")),
    responses(
        (status = 200, description = "Blog found", body = BlogResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "No blog with this id", body = ErrorResponse),
    )
)]
pub async fn get_blog(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let blog = state
        .mediator
        .send(GetBlogByIdQuery::new(id))
        .await?
        .ok_or(DomainError::NotFound {
            entity_type: "Blog",
            id,
        })?;

    Ok(HttpResponse::Ok().json(BlogResponse::from(blog)))
}

/// Create a blog.
#[utoipa::path(
    post,
    path = "/blogs",
    tag = "blogs",
    request_body = CreateBlogRequest,
    responses(
        (status = 201, description = "Blog created", body = BlogResponse,
            headers(("Location" = String, description = "Path of the new blog"))),
        (status = 400, description = "Malformed body or blank field", body = ErrorResponse),
    )
)]
pub async fn create_blog(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<CreateBlogRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let command = CreateBlogCommand::new(req.title, req.content)?;
    let blog = state.mediator.send(command).await?;

    tracing::info!(
        request_id = %request_id.as_str(),
        blog_id = %blog.id,
        "Blog created via API"
    );

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, blog_location(blog.id)))
        .json(BlogResponse::from(blog)))
}
