use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;
use crate::domain::*;
use crate::error::Result;

pub mod guest_repository;
pub mod cart_repository;
pub mod booking_repository;

pub use guest_repository::SqliteGuestRepository;
pub use cart_repository::SqliteCartRepository;
pub use booking_repository::SqliteBookingRepository;

#[async_trait]
pub trait GuestRepository: Send + Sync {
    async fn create(&self, request: CreateGuestRequest) -> Result<Guest>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Guest>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Guest>>;
    async fn update(&self, id: Uuid, update: UpdateGuestRequest) -> Result<Guest>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn add(&self, item: CartItem) -> Result<CartItem>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CartItem>>;
    async fn list_by_guest(&self, guest_id: Uuid) -> Result<Vec<CartItem>>;
    async fn remove(&self, id: Uuid, guest_id: Uuid) -> Result<bool>;
    async fn clear_guest(&self, guest_id: Uuid) -> Result<u64>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: Booking) -> Result<Booking>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>>;
    async fn list_by_guest(&self, guest_id: Uuid) -> Result<Vec<Booking>>;
    async fn find_by_payment_id(&self, payment_id: &str) -> Result<Vec<Booking>>;
    /// Applies the provider-reported status to every booking row created
    /// under the payment. Returns the number of rows touched.
    async fn update_status_by_payment(&self, payment_id: &str, status: BookingStatus)
        -> Result<u64>;
    /// Counts bookings in a room-holding status whose stay overlaps the
    /// half-open range [check_in, check_out).
    async fn count_overlapping(
        &self,
        room_id: u32,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<i64>;
    /// Date ranges currently holding the room, for the availability dialog.
    async fn held_ranges(&self, room_id: u32) -> Result<Vec<(NaiveDate, NaiveDate)>>;
}
