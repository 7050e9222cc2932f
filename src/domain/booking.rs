use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub guest_id: Uuid,
    pub room_id: u32,
    pub check_in: NaiveDate,
    /// Exclusive: the room frees up on this day.
    pub check_out: NaiveDate,
    pub guests: u32,
    pub total_cents: i64,
    pub status: BookingStatus,
    /// Payment id at the provider; one payment can cover several bookings.
    pub payment_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

/// Payment status as reported by the provider. The provider owns the status
/// vocabulary; whatever string it reports is stored verbatim, with `Other`
/// carrying anything outside the documented set. There is no local state
/// machine guarding transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingStatus {
    Open,
    Pending,
    Authorized,
    Paid,
    Expired,
    Canceled,
    Failed,
    Refunded,
    ChargedBack,
    Settled,
    PartiallyRefunded,
    Refused,
    Other(String),
}

impl BookingStatus {
    pub fn from_provider(s: &str) -> Self {
        match s {
            "open" => BookingStatus::Open,
            "pending" => BookingStatus::Pending,
            "authorized" => BookingStatus::Authorized,
            "paid" => BookingStatus::Paid,
            "expired" => BookingStatus::Expired,
            "canceled" => BookingStatus::Canceled,
            "failed" => BookingStatus::Failed,
            "refunded" => BookingStatus::Refunded,
            "charged_back" => BookingStatus::ChargedBack,
            "settled" => BookingStatus::Settled,
            "partially_refunded" => BookingStatus::PartiallyRefunded,
            "refused" => BookingStatus::Refused,
            other => BookingStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BookingStatus::Open => "open",
            BookingStatus::Pending => "pending",
            BookingStatus::Authorized => "authorized",
            BookingStatus::Paid => "paid",
            BookingStatus::Expired => "expired",
            BookingStatus::Canceled => "canceled",
            BookingStatus::Failed => "failed",
            BookingStatus::Refunded => "refunded",
            BookingStatus::ChargedBack => "charged_back",
            BookingStatus::Settled => "settled",
            BookingStatus::PartiallyRefunded => "partially_refunded",
            BookingStatus::Refused => "refused",
            BookingStatus::Other(s) => s,
        }
    }

    /// Whether a booking in this status still occupies the room for its
    /// date range. Refund-class and terminal-failure statuses free the dates.
    pub fn holds_room(&self) -> bool {
        matches!(
            self,
            BookingStatus::Open
                | BookingStatus::Pending
                | BookingStatus::Authorized
                | BookingStatus::Paid
                | BookingStatus::Settled
        )
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BookingStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BookingStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(BookingStatus::from_provider(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for s in [
            "open",
            "pending",
            "authorized",
            "paid",
            "expired",
            "canceled",
            "failed",
            "refunded",
            "charged_back",
            "settled",
            "partially_refunded",
            "refused",
        ] {
            assert_eq!(BookingStatus::from_provider(s).as_str(), s);
        }
    }

    #[test]
    fn test_unknown_status_passes_through_verbatim() {
        let status = BookingStatus::from_provider("definitely_new_status");
        assert_eq!(status, BookingStatus::Other("definitely_new_status".to_string()));
        assert_eq!(status.as_str(), "definitely_new_status");
        assert!(!status.holds_room());
    }

    #[test]
    fn test_holds_room() {
        assert!(BookingStatus::Paid.holds_room());
        assert!(BookingStatus::Open.holds_room());
        assert!(BookingStatus::Pending.holds_room());
        assert!(!BookingStatus::Expired.holds_room());
        assert!(!BookingStatus::Refunded.holds_room());
        assert!(!BookingStatus::Canceled.holds_room());
    }
}
