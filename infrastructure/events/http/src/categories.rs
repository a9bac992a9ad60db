use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use common_errors::AppError;
use events_models::{CreateCategoryRequest, UpdateCategoryRequest};
use events_responses::CategoryResponse;
use tracing::instrument;
use uuid::Uuid;

use crate::EventServices;

fn category_not_found(id: Uuid) -> AppError {
    AppError::not_found("CATEGORY_NOT_FOUND", &format!("Category not found: {id}"))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 200, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid request or category not created", body = common_errors::ApiErrorResponse),
        (status = 401, description = "Missing or wrong API key", body = common_errors::ApiErrorResponse)
    ),
    security(("api_key" = [])),
    tag = "categories"
)]
#[instrument(skip_all)]
pub async fn create_category(
    State(services): State<EventServices>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<Json<CategoryResponse>, AppError> {
    services
        .categories
        .create_category(request)
        .await?
        .map(Json)
        .ok_or_else(|| {
            AppError::bad_request(
                "CATEGORY_NOT_CREATED",
                "Category could not be created",
            )
        })
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Every category by name", body = Vec<CategoryResponse>)
    ),
    tag = "categories"
)]
#[instrument(skip_all)]
pub async fn get_all_categories(
    State(services): State<EventServices>,
) -> Json<Vec<CategoryResponse>> {
    Json(services.categories.get_all_categories().await)
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 404, description = "Category not found", body = common_errors::ApiErrorResponse)
    ),
    tag = "categories"
)]
#[instrument(skip_all, fields(id = %id))]
pub async fn get_category(
    State(services): State<EventServices>, Path(id): Path<Uuid>,
) -> Result<Json<CategoryResponse>, AppError> {
    services
        .categories
        .get_category_by_id(id)
        .await
        .map(Json)
        .ok_or_else(|| category_not_found(id))
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    request_body = UpdateCategoryRequest,
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 400, description = "Id mismatch or invalid request", body = common_errors::ApiErrorResponse),
        (status = 401, description = "Missing or wrong API key", body = common_errors::ApiErrorResponse),
        (status = 404, description = "Category not found", body = common_errors::ApiErrorResponse)
    ),
    security(("api_key" = [])),
    tag = "categories"
)]
#[instrument(skip_all, fields(id = %id))]
pub async fn update_category(
    State(services): State<EventServices>, Path(id): Path<Uuid>,
    Json(request): Json<UpdateCategoryRequest>,
) -> Result<Json<CategoryResponse>, AppError> {
    services
        .categories
        .update_category(id, request)
        .await?
        .map(Json)
        .ok_or_else(|| category_not_found(id))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category and its events deleted"),
        (status = 401, description = "Missing or wrong API key", body = common_errors::ApiErrorResponse),
        (status = 404, description = "Category not found", body = common_errors::ApiErrorResponse)
    ),
    security(("api_key" = [])),
    tag = "categories"
)]
#[instrument(skip_all, fields(id = %id))]
pub async fn delete_category(
    State(services): State<EventServices>, Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if services.categories.delete_category(id).await {
        Ok(StatusCode::NO_CONTENT)
    }
    else {
        Err(category_not_found(id))
    }
}
