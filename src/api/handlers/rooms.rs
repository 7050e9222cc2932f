use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    api::state::AppState,
    catalog::{self, RoomFilter, RoomPage, RoomSort},
    domain::Room,
    error::{AppError, Result},
};

#[derive(Debug, Deserialize)]
pub struct RoomListParams {
    pub min_price_cents: Option<i64>,
    pub max_price_cents: Option<i64>,
    pub capacity: Option<u32>,
    pub search: Option<String>,
    #[serde(default)]
    pub sort: RoomSort,
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

fn default_page() -> usize {
    1
}

fn default_per_page() -> usize {
    4
}

pub async fn list(Query(params): Query<RoomListParams>) -> Result<Json<RoomPage>> {
    let filter = RoomFilter {
        min_price_cents: params.min_price_cents,
        max_price_cents: params.max_price_cents,
        capacity: params.capacity,
        search: params.search,
    };

    let rooms = catalog::filter_rooms(&filter, params.sort);
    let page = catalog::paginate(&rooms, params.page, params.per_page);

    Ok(Json(page))
}

pub async fn get(Path(id): Path<u32>) -> Result<Json<Room>> {
    let room = catalog::get(id)
        .ok_or_else(|| AppError::NotFound("Room not found".to_string()))?;

    Ok(Json(room.clone()))
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityParams {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    /// Present when a date range was asked about.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    pub booked_dates: Vec<NaiveDate>,
}

pub async fn availability(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Query(params): Query<AvailabilityParams>,
) -> Result<Json<AvailabilityResponse>> {
    // 404 before any date math for rooms outside the catalog
    if catalog::get(id).is_none() {
        return Err(AppError::NotFound("Room not found".to_string()));
    }

    let booking_service = &state.service_context.booking_service;

    let available = match (params.check_in, params.check_out) {
        (Some(check_in), Some(check_out)) => {
            Some(booking_service.is_range_available(id, check_in, check_out).await?)
        }
        (None, None) => None,
        _ => {
            return Err(AppError::BadRequest(
                "Provide both check_in and check_out, or neither".to_string(),
            ))
        }
    };

    let booked_dates = booking_service.booked_dates(id).await?;

    Ok(Json(AvailabilityResponse {
        available,
        booked_dates,
    }))
}
