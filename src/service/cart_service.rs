use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    domain::{AddCartItemRequest, CartItem},
    error::{AppError, Result},
    repository::CartRepository,
    service::booking_service::{lookup_room, validate_stay},
};

/// A cart item joined with its catalog room and priced server-side.
#[derive(Debug, Clone, Serialize)]
pub struct PricedCartItem {
    #[serde(flatten)]
    pub item: CartItem,
    pub room_name: &'static str,
    pub nightly_price_cents: i64,
    pub nights: i64,
    pub subtotal_cents: i64,
}

pub struct CartService {
    cart_repo: Arc<dyn CartRepository>,
}

impl CartService {
    pub fn new(cart_repo: Arc<dyn CartRepository>) -> Self {
        Self { cart_repo }
    }

    pub async fn add_item(&self, guest_id: Uuid, request: AddCartItemRequest) -> Result<CartItem> {
        let room = lookup_room(request.room_id)?;
        validate_stay(request.check_in, request.check_out)?;

        if request.guests > room.capacity {
            return Err(AppError::BadRequest(format!(
                "{} sleeps at most {} guests",
                room.name, room.capacity
            )));
        }

        let item = CartItem {
            id: Uuid::new_v4(),
            guest_id,
            room_id: request.room_id,
            check_in: request.check_in,
            check_out: request.check_out,
            guests: request.guests,
            created_at: Utc::now(),
        };

        self.cart_repo.add(item).await
    }

    /// The guest's cart with per-item subtotals. The cart total is the sum
    /// of nightly price times nights over all items.
    pub async fn priced_cart(&self, guest_id: Uuid) -> Result<(Vec<PricedCartItem>, i64)> {
        let items = self.cart_repo.list_by_guest(guest_id).await?;

        let mut priced = Vec::with_capacity(items.len());
        let mut total_cents = 0i64;

        for item in items {
            let room = lookup_room(item.room_id)?;
            let nights = item.nights();
            let subtotal_cents = room.price_cents * nights;
            total_cents += subtotal_cents;

            priced.push(PricedCartItem {
                item,
                room_name: room.name,
                nightly_price_cents: room.price_cents,
                nights,
                subtotal_cents,
            });
        }

        Ok((priced, total_cents))
    }

    pub async fn remove_item(&self, guest_id: Uuid, item_id: Uuid) -> Result<()> {
        let removed = self.cart_repo.remove(item_id, guest_id).await?;
        if !removed {
            return Err(AppError::NotFound("Cart item not found".to_string()));
        }
        Ok(())
    }

    pub async fn clear(&self, guest_id: Uuid) -> Result<u64> {
        self.cart_repo.clear_guest(guest_id).await
    }
}
