//! Product commands.

use slooze_core::ProductId;

use slooze_admin::error::AppError;
use slooze_admin::services::CatalogError;
use slooze_admin::state::AppState;

use super::{CliError, ProductArgs, emit, signed_in};

/// List products, optionally filtered.
pub async fn list(state: &AppState, search: Option<&str>) -> Result<(), CliError> {
    signed_in(state)?;
    let catalog = state.catalog();
    let products = match search {
        Some(term) => catalog.search_products(term).await,
        None => catalog.list_products().await,
    }
    .map_err(AppError::from)?;
    emit(&products)
}

/// Show one product.
pub async fn get(state: &AppState, id: &str) -> Result<(), CliError> {
    signed_in(state)?;
    let id = ProductId::new(id);
    let found = state
        .catalog()
        .get_product(&id)
        .await
        .map_err(AppError::from)?;

    // Reads report absence as an empty result; the CLI turns that into a message
    let Some(product) = found.into_iter().next() else {
        return Err(AppError::from(CatalogError::NotFound(id)).into());
    };
    emit(&product)
}

/// Add a product.
pub async fn add(state: &AppState, fields: ProductArgs) -> Result<(), CliError> {
    signed_in(state)?;
    let product = state
        .catalog()
        .create_product(fields.into())
        .await
        .map_err(AppError::from)?;
    tracing::info!(id = %product.id, "product added");
    emit(&product)
}

/// Replace every field of a product.
pub async fn update(state: &AppState, id: &str, fields: ProductArgs) -> Result<(), CliError> {
    signed_in(state)?;
    let product = state
        .catalog()
        .update_product(&ProductId::new(id), fields.into())
        .await
        .map_err(AppError::from)?;
    tracing::info!(id = %product.id, "product updated");
    emit(&product)
}

/// Delete a product.
pub async fn delete(state: &AppState, id: &str) -> Result<(), CliError> {
    signed_in(state)?;
    let outcome = state
        .catalog()
        .delete_product(&ProductId::new(id))
        .await
        .map_err(AppError::from)?;
    emit(&outcome)
}
