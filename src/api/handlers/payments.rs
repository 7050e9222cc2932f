use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Form, Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::{
    api::{middleware::auth::CurrentGuest, state::AppState},
    error::{AppError, Result},
    payments::{CheckoutSession, CheckoutStay},
    service::booking_service::lookup_room,
};

#[derive(Debug, Deserialize)]
pub struct CheckoutItem {
    pub room_id: u32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CheckoutRequest {
    /// Order total as the client computed it; verified against the
    /// server-side total before any payment is created.
    pub amount_cents: i64,
    #[validate(length(min = 1, max = 64))]
    pub order_id: String,
    pub description: Option<String>,
    #[validate(url)]
    pub redirect_url: String,
    pub items: Vec<CheckoutItem>,
}

/// The create-payment operation: one Mollie payment for the order, one
/// booking row per item, hosted checkout URL back to the client.
pub async fn checkout(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentGuest>,
    Json(request): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<CheckoutSession>)> {
    let mollie = state.mollie_client.as_ref().ok_or_else(|| {
        AppError::ServiceUnavailable("Payment processing is not configured".to_string())
    })?;

    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if request.items.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".to_string()));
    }

    let booking_service = &state.service_context.booking_service;

    let mut stays = Vec::with_capacity(request.items.len());
    let mut total_cents = 0i64;

    for item in &request.items {
        let room = lookup_room(item.room_id)?;
        if item.guests == 0 || item.guests > room.capacity {
            return Err(AppError::BadRequest(format!(
                "{} sleeps 1 to {} guests",
                room.name, room.capacity
            )));
        }

        let subtotal_cents = booking_service.quote_stay(item.room_id, item.check_in, item.check_out)?;

        // Availability is re-checked here, server-side, right before the
        // payment is created; the cart-time check is advisory only.
        let available = booking_service
            .is_range_available(item.room_id, item.check_in, item.check_out)
            .await?;
        if !available {
            return Err(AppError::Conflict(format!(
                "{} is no longer available for the selected dates",
                room.name
            )));
        }

        total_cents += subtotal_cents;
        stays.push(CheckoutStay {
            room_id: item.room_id,
            check_in: item.check_in,
            check_out: item.check_out,
            guests: item.guests,
            subtotal_cents,
        });
    }

    if request.amount_cents != total_cents {
        return Err(AppError::BadRequest(format!(
            "Amount mismatch: order totals {} cents",
            total_cents
        )));
    }

    let description = request
        .description
        .unwrap_or_else(|| format!("Hotel booking {}", request.order_id));

    let session = mollie
        .create_booking_checkout(
            current.guest.id,
            &request.order_id,
            &description,
            &request.redirect_url,
            &stays,
            total_cents,
        )
        .await?;

    // The order has left the cart; a failed clear shouldn't lose the checkout URL
    if let Err(e) = state.service_context.cart_service.clear(current.guest.id).await {
        tracing::warn!("Failed to clear cart after checkout: {}", e);
    }

    Ok((StatusCode::CREATED, Json(session)))
}

#[derive(Debug, Deserialize)]
pub struct WebhookParams {
    pub id: String,
}

/// The mollie-webhook operation. Mollie POSTs `id=tr_...` form-encoded and
/// retries on non-2xx, so provider-side rejections (unknown or foreign ids)
/// are answered 200 to stop the retry loop; only our own failures 5xx.
pub async fn mollie_webhook(
    State(state): State<AppState>,
    Form(params): Form<WebhookParams>,
) -> Result<StatusCode> {
    let Some(mollie) = state.mollie_client.as_ref() else {
        tracing::warn!("Webhook received but payment processing is not configured");
        return Ok(StatusCode::OK);
    };

    match mollie.handle_webhook(&params.id).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(AppError::Payment(msg)) => {
            tracing::warn!("Webhook for rejected payment {}: {}", params.id, msg);
            Ok(StatusCode::OK)
        }
        Err(e) => Err(e),
    }
}
