use axum::{extract::{Path, State}, http::StatusCode, Json};
use service::product::ProductDto;
use tracing::info;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[utoipa::path(
    get, path = "/api/products", tag = "products",
    responses(
        (status = 200, description = "List OK", body = [crate::openapi::ProductDtoDoc])
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProductDto>>, JsonApiError> {
    let list = state.products.list_all().await?;
    info!(count = list.len(), "list products");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/api/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ProductDtoDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorMessageDoc)
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<ProductDto>, JsonApiError> {
    Ok(Json(state.products.get_by_id(id).await?))
}

#[utoipa::path(
    post, path = "/api/products", tag = "products",
    request_body = crate::openapi::ProductDtoDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ProductDtoDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<ProductDto>,
) -> Result<(StatusCode, Json<ProductDto>), JsonApiError> {
    let created = state.products.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/api/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = crate::openapi::ProductDtoDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ProductDtoDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorMessageDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<ProductDto>,
) -> Result<Json<ProductDto>, JsonApiError> {
    Ok(Json(state.products.update(id, input).await?))
}

#[utoipa::path(
    delete, path = "/api/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorMessageDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    state.products.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
