use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub id: Uuid,
    pub guest_id: Uuid,
    pub room_id: u32,
    pub check_in: NaiveDate,
    /// Exclusive: the guest leaves this morning.
    pub check_out: NaiveDate,
    pub guests: u32,
    pub created_at: DateTime<Utc>,
}

impl CartItem {
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddCartItemRequest {
    pub room_id: u32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[validate(range(min = 1, max = 10))]
    pub guests: u32,
}
