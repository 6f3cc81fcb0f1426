//! Catalog operations
//!
//! Implements the list/create/update/delete operations over the in-memory
//! catalog, including the image lifecycle: a newly stored upload supersedes
//! the product's previous image, and a removed product takes its image with
//! it. Placeholder references survive both.

use crate::error::AppError;
use crate::services::uploads::UploadStore;
use crate::state::catalog::{CatalogState, Category, Product};

/// Placeholder reference used when a product ends up without an image
pub const DEFAULT_IMAGE: &str = "/uploads/placeholder-default.png";

/// Parsed form payload for create and update requests
///
/// `None` means the field was absent from the request; `Some("")` means it
/// was sent empty. Only `descricao` distinguishes the two — for the other
/// fields an empty value counts as "not provided".
#[derive(Debug, Default)]
pub struct ProductForm {
    /// Product name
    pub nome: Option<String>,
    /// Product description
    pub descricao: Option<String>,
    /// Price, as the raw form string
    pub preco: Option<String>,
    /// Explicit image reference (upload path or external URL)
    pub imagem: Option<String>,
    /// Public reference of a file already drained into the upload store
    pub upload: Option<String>,
}

/// List all products of a category in insertion order
pub fn list(catalog: &CatalogState, category: Category) -> Vec<Product> {
    catalog.products(category).to_vec()
}

/// Create a product from the submitted form
///
/// `nome`, `preco` and an image (uploaded file or explicit reference) are
/// required. The new record is appended to its category's collection.
pub fn create(
    catalog: &mut CatalogState,
    category: Category,
    form: ProductForm,
) -> Result<Product, AppError> {
    let nome = match form.nome.as_deref() {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => {
            return Err(AppError::Validation(
                "nome and preco are required".to_string(),
            ))
        }
    };
    let preco = match form.preco.as_deref() {
        Some(p) if !p.is_empty() => parse_preco(p)?,
        _ => {
            return Err(AppError::Validation(
                "nome and preco are required".to_string(),
            ))
        }
    };
    if form.upload.is_none() && form.imagem.as_deref().map_or(true, str::is_empty) {
        return Err(AppError::Validation(
            "an image is required for new products".to_string(),
        ));
    }

    let imagem = form
        .upload
        .or_else(|| form.imagem.filter(|i| !i.is_empty()))
        .unwrap_or_else(|| DEFAULT_IMAGE.to_string());

    let product = Product {
        id: catalog.next_id(category),
        nome,
        descricao: form.descricao.unwrap_or_default(),
        preco,
        imagem,
    };
    catalog.products_mut(category).push(product.clone());
    Ok(product)
}

/// Apply a partial update to an existing product
///
/// Absent fields keep their current value; an empty `descricao` counts as
/// present and clears the description. A new upload supersedes the stored
/// image and the old file is removed from the upload store, unless it is a
/// placeholder. An explicit `imagem` reference overwrites the field without
/// touching the old file.
pub async fn update(
    catalog: &mut CatalogState,
    uploads: &UploadStore,
    category: Category,
    id: &str,
    form: ProductForm,
) -> Result<Product, AppError> {
    let index = catalog
        .position(category, id)
        .ok_or_else(|| AppError::ProductNotFound(id.to_string()))?;

    // Parse before mutating so a bad preco leaves the record untouched.
    let preco = match form.preco.as_deref() {
        Some(p) if !p.is_empty() => Some(parse_preco(p)?),
        _ => None,
    };

    let previous_image = catalog.products(category)[index].imagem.clone();
    let had_upload = form.upload.is_some();

    let product = &mut catalog.products_mut(category)[index];
    if let Some(nome) = form.nome.filter(|n| !n.is_empty()) {
        product.nome = nome;
    }
    if let Some(descricao) = form.descricao {
        product.descricao = descricao;
    }
    if let Some(preco) = preco.filter(|p| *p != 0.0) {
        product.preco = preco;
    }
    if let Some(upload) = form.upload {
        product.imagem = upload;
    } else if let Some(imagem) = form.imagem.filter(|i| !i.is_empty()) {
        product.imagem = imagem;
    }
    let updated = product.clone();

    if had_upload {
        uploads.delete(&previous_image).await;
    }

    Ok(updated)
}

/// Remove a product and its stored image
pub async fn delete(
    catalog: &mut CatalogState,
    uploads: &UploadStore,
    category: Category,
    id: &str,
) -> Result<(), AppError> {
    let index = catalog
        .position(category, id)
        .ok_or_else(|| AppError::ProductNotFound(id.to_string()))?;

    let removed = catalog.products_mut(category).remove(index);
    uploads.delete(&removed.imagem).await;
    Ok(())
}

/// Parse a form price into a number
fn parse_preco(raw: &str) -> Result<f64, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("preco must be a number, got {:?}", raw)))
}
