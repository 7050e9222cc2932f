use std::sync::Arc;

use chrono::{Duration, NaiveDate};

use crate::{
    catalog,
    domain::Room,
    error::{AppError, Result},
    repository::BookingRepository,
};

pub struct BookingService {
    booking_repo: Arc<dyn BookingRepository>,
}

impl BookingService {
    pub fn new(booking_repo: Arc<dyn BookingRepository>) -> Self {
        Self { booking_repo }
    }

    /// True iff no held booking overlaps the half-open range
    /// [check_in, check_out). The checkout day itself does not block.
    pub async fn is_range_available(
        &self,
        room_id: u32,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<bool> {
        validate_stay(check_in, check_out)?;

        let overlapping = self
            .booking_repo
            .count_overlapping(room_id, check_in, check_out)
            .await?;

        Ok(overlapping == 0)
    }

    /// Every night currently held for the room, expanded from the stored
    /// ranges. What the storefront's availability dialog renders.
    pub async fn booked_dates(&self, room_id: u32) -> Result<Vec<NaiveDate>> {
        let ranges = self.booking_repo.held_ranges(room_id).await?;

        let mut dates = Vec::new();
        for (check_in, check_out) in ranges {
            let mut day = check_in;
            while day < check_out {
                dates.push(day);
                day = day + Duration::days(1);
            }
        }

        dates.sort_unstable();
        dates.dedup();
        Ok(dates)
    }

    /// Server-side price for a stay: nightly rate times nights.
    pub fn quote_stay(&self, room_id: u32, check_in: NaiveDate, check_out: NaiveDate) -> Result<i64> {
        let room = lookup_room(room_id)?;
        validate_stay(check_in, check_out)?;

        Ok(room.price_cents * (check_out - check_in).num_days())
    }
}

pub fn lookup_room(room_id: u32) -> Result<&'static Room> {
    catalog::get(room_id).ok_or_else(|| AppError::NotFound("Room not found".to_string()))
}

pub fn validate_stay(check_in: NaiveDate, check_out: NaiveDate) -> Result<()> {
    if check_out <= check_in {
        return Err(AppError::BadRequest(
            "Check-out must be after check-in".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_validate_stay_rejects_inverted_and_zero_night_ranges() {
        assert!(validate_stay(date("2026-09-10"), date("2026-09-12")).is_ok());
        assert!(validate_stay(date("2026-09-10"), date("2026-09-10")).is_err());
        assert!(validate_stay(date("2026-09-12"), date("2026-09-10")).is_err());
    }

    #[tokio::test]
    async fn test_quote_is_nightly_rate_times_nights() {
        let repo = Arc::new(crate::repository::SqliteBookingRepository::new(
            sqlx::SqlitePool::connect_lazy(":memory:").unwrap(),
        ));
        let service = BookingService::new(repo);

        // Room 201 is 159.00/night
        let quote = service
            .quote_stay(201, date("2026-09-10"), date("2026-09-13"))
            .unwrap();
        assert_eq!(quote, 15_900 * 3);

        assert!(service
            .quote_stay(999, date("2026-09-10"), date("2026-09-13"))
            .is_err());
    }
}
