use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::{middleware::auth::CurrentGuest, state::AppState},
    domain::{AddCartItemRequest, CartItem},
    error::{AppError, Result},
    service::PricedCartItem,
};

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub items: Vec<PricedCartItem>,
    pub total_cents: i64,
}

pub async fn get_cart(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentGuest>,
) -> Result<Json<CartResponse>> {
    let (items, total_cents) = state.service_context.cart_service
        .priced_cart(current.guest.id)
        .await?;

    Ok(Json(CartResponse { items, total_cents }))
}

pub async fn add_item(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentGuest>,
    Json(request): Json<AddCartItemRequest>,
) -> Result<(StatusCode, Json<CartItem>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let item = state.service_context.cart_service
        .add_item(current.guest.id, request)
        .await?;

    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn remove_item(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentGuest>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.service_context.cart_service
        .remove_item(current.guest.id, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn clear(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentGuest>,
) -> Result<StatusCode> {
    state.service_context.cart_service
        .clear(current.guest.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
