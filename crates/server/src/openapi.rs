use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ProductDtoDoc {
    /// Ignored on create; the path id wins on update.
    pub id: Option<i32>,
    pub name: String,
    pub quantity: i32,
    pub price: f64,
    pub observation: Option<String>,
}

#[derive(ToSchema)]
pub struct ErrorMessageDoc {
    pub error: String,
    pub status: u16,
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::products::list,
        crate::routes::products::get,
        crate::routes::products::create,
        crate::routes::products::update,
        crate::routes::products::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ProductDtoDoc,
            ErrorMessageDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "products")
    )
)]
pub struct ApiDoc;
