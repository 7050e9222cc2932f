use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    api::{middleware::auth::CurrentGuest, state::AppState},
    catalog,
    domain::Booking,
    error::{AppError, Result},
};

#[derive(Debug, Serialize)]
pub struct BookingDto {
    pub id: Uuid,
    pub room_id: u32,
    pub room_name: Option<&'static str>,
    pub check_in: String,
    pub check_out: String,
    pub guests: u32,
    pub total_cents: i64,
    pub status: String,
    pub payment_id: Option<String>,
    pub created_at: String,
}

impl From<Booking> for BookingDto {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            room_id: booking.room_id,
            room_name: catalog::get(booking.room_id).map(|r| r.name),
            check_in: booking.check_in.to_string(),
            check_out: booking.check_out.to_string(),
            guests: booking.guests,
            total_cents: booking.total_cents,
            status: booking.status.as_str().to_string(),
            payment_id: booking.payment_id,
            created_at: booking.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub bookings: Vec<BookingDto>,
    pub total: usize,
}

pub async fn list(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentGuest>,
) -> Result<Json<ListResponse>> {
    let bookings = state.service_context.booking_repo
        .list_by_guest(current.guest.id)
        .await?;

    let total = bookings.len();
    let bookings: Vec<BookingDto> = bookings.into_iter().map(Into::into).collect();

    Ok(Json(ListResponse { bookings, total }))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentGuest>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingDto>> {
    let booking = state.service_context.booking_repo
        .find_by_id(id)
        .await?
        // Other guests' bookings look like missing ones
        .filter(|b| b.guest_id == current.guest.id)
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    Ok(Json(booking.into()))
}
