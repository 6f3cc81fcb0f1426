//! Product catalog API handlers
//!
//! Contains HTTP request handlers for the category CRUD operations:
//! category token validation, multipart form draining (including the image
//! upload), and response shaping.

use crate::error::AppError;
use crate::services::catalog::{self, ProductForm};
use crate::services::uploads::UploadStore;
use crate::state::{Category, Product, SharedState};
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Serialize;
use tracing::warn;

/// Confirmation body returned by delete
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message
    pub message: String,
    /// Status indicator (e.g., "ok")
    pub status: String,
}

/// Resolve a category path token, rejecting unknown tokens before any
/// storage or upload-store access
fn resolve_category(token: &str) -> Result<Category, AppError> {
    Category::from_plural(token).ok_or_else(|| AppError::InvalidCategory(token.to_string()))
}

/// Drain a multipart body into a `ProductForm`
///
/// The `imagemFile` field is written to the upload store as soon as it is
/// encountered; its public reference lands in `form.upload`. Unknown fields
/// are ignored.
async fn read_product_form(
    mut multipart: Multipart,
    uploads: &UploadStore,
) -> Result<ProductForm, AppError> {
    let mut form = ProductForm::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "nome" => form.nome = Some(field.text().await?),
            "descricao" => form.descricao = Some(field.text().await?),
            "preco" => form.preco = Some(field.text().await?),
            "imagem" => form.imagem = Some(field.text().await?),
            "imagemFile" => {
                let original_name = field.file_name().unwrap_or("upload.bin").to_string();
                let data = field.bytes().await?;
                form.upload = Some(uploads.store(&original_name, &data).await?);
            }
            other => {
                warn!("Ignoring unknown multipart field: {}", other);
            }
        }
    }
    Ok(form)
}

/// GET /api/:category - List all products of a category
pub async fn list_products(
    State(state): State<SharedState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Product>>, AppError> {
    let category = resolve_category(&category)?;
    let catalog = state.catalog.read().await;
    Ok(Json(catalog::list(&catalog, category)))
}

/// POST /api/:category - Create a product
pub async fn create_product(
    State(state): State<SharedState>,
    Path(category): Path<String>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let category = resolve_category(&category)?;
    let form = read_product_form(multipart, &state.uploads).await?;

    let mut catalog = state.catalog.write().await;
    let product = catalog::create(&mut catalog, category, form)?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/:category/:id - Update a product
pub async fn update_product(
    State(state): State<SharedState>,
    Path((category, id)): Path<(String, String)>,
    multipart: Multipart,
) -> Result<Json<Product>, AppError> {
    let category = resolve_category(&category)?;
    let form = read_product_form(multipart, &state.uploads).await?;

    let mut catalog = state.catalog.write().await;
    let product = catalog::update(&mut catalog, &state.uploads, category, &id, form).await?;
    Ok(Json(product))
}

/// DELETE /api/:category/:id - Delete a product
pub async fn delete_product(
    State(state): State<SharedState>,
    Path((category, id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, AppError> {
    let category = resolve_category(&category)?;

    let mut catalog = state.catalog.write().await;
    catalog::delete(&mut catalog, &state.uploads, category, &id).await?;

    Ok(Json(MessageResponse {
        message: "Product deleted successfully".to_string(),
        status: "ok".to_string(),
    }))
}
