//! OpenAPI document for the public endpoints.

use actix_web::HttpResponse;
use utoipa::OpenApi;

use blogger_shared::{BlogResponse, CreateBlogRequest, ErrorResponse};

use super::health::{HealthResponse, NotificationQueue};

#[derive(OpenApi)]
#[openapi(
    info(title = "Blogger API", description = "Fetch and create blogs"),
    paths(super::blogs::get_blog, super::blogs::create_blog, super::health::health_check),
    components(schemas(
        BlogResponse,
        CreateBlogRequest,
        ErrorResponse,
        HealthResponse,
        NotificationQueue
    )),
    tags(
        (name = "blogs", description = "Blog lookup and creation"),
        (name = "health", description = "Service status")
    )
)]
pub struct ApiDoc;

/// GET /openapi.json
pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
