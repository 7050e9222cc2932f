pub mod booking_service;
pub mod cart_service;

use std::sync::Arc;
use sqlx::SqlitePool;
use crate::auth::AuthService;
use crate::repository::*;

pub use booking_service::BookingService;
pub use cart_service::{CartService, PricedCartItem};

pub struct ServiceContext {
    pub guest_repo: Arc<dyn GuestRepository>,
    pub cart_repo: Arc<dyn CartRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub auth_service: Arc<AuthService>,
    pub booking_service: Arc<BookingService>,
    pub cart_service: Arc<CartService>,
    pub db_pool: SqlitePool,
}

impl ServiceContext {
    pub fn new(
        guest_repo: Arc<dyn GuestRepository>,
        cart_repo: Arc<dyn CartRepository>,
        booking_repo: Arc<dyn BookingRepository>,
        auth_service: Arc<AuthService>,
        db_pool: SqlitePool,
    ) -> Self {
        let booking_service = Arc::new(BookingService::new(booking_repo.clone()));
        let cart_service = Arc::new(CartService::new(cart_repo.clone()));

        Self {
            guest_repo,
            cart_repo,
            booking_repo,
            auth_service,
            booking_service,
            cart_service,
            db_pool,
        }
    }
}
