use std::sync::Arc;

use chrono::NaiveDate;
use innkeep::{
    domain::{AddCartItemRequest, CreateGuestRequest},
    repository::{CartRepository, GuestRepository, SqliteCartRepository, SqliteGuestRepository},
    service::CartService,
};
use sqlx::SqlitePool;
use uuid::Uuid;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

async fn setup() -> anyhow::Result<(Arc<SqliteCartRepository>, CartService, Uuid)> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let guest = SqliteGuestRepository::new(pool.clone())
        .create(CreateGuestRequest {
            email: "guest@example.com".to_string(),
            full_name: "Test Guest".to_string(),
            password: "secure_password123".to_string(),
        })
        .await?;

    let repo = Arc::new(SqliteCartRepository::new(pool));
    let service = CartService::new(repo.clone());

    Ok((repo, service, guest.id))
}

#[tokio::test]
async fn test_cart_add_list_remove_clear() -> anyhow::Result<()> {
    let (repo, service, guest_id) = setup().await?;

    let item = service
        .add_item(guest_id, AddCartItemRequest {
            room_id: 201,
            check_in: date("2026-09-10"),
            check_out: date("2026-09-13"),
            guests: 2,
        })
        .await?;
    assert_eq!(item.nights(), 3);

    service
        .add_item(guest_id, AddCartItemRequest {
            room_id: 101,
            check_in: date("2026-10-01"),
            check_out: date("2026-10-03"),
            guests: 1,
        })
        .await?;

    let items = repo.list_by_guest(guest_id).await?;
    assert_eq!(items.len(), 2);

    service.remove_item(guest_id, item.id).await?;
    assert_eq!(repo.list_by_guest(guest_id).await?.len(), 1);

    // Removing twice is a NotFound
    assert!(service.remove_item(guest_id, item.id).await.is_err());

    service.clear(guest_id).await?;
    assert!(repo.list_by_guest(guest_id).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_cart_total_is_sum_of_nightly_price_times_nights() -> anyhow::Result<()> {
    let (_repo, service, guest_id) = setup().await?;

    // Deluxe Double (159.00/night) for 3 nights + Standard Single
    // (89.00/night) for 2 nights
    service
        .add_item(guest_id, AddCartItemRequest {
            room_id: 201,
            check_in: date("2026-09-10"),
            check_out: date("2026-09-13"),
            guests: 2,
        })
        .await?;
    service
        .add_item(guest_id, AddCartItemRequest {
            room_id: 101,
            check_in: date("2026-10-01"),
            check_out: date("2026-10-03"),
            guests: 1,
        })
        .await?;

    let (items, total_cents) = service.priced_cart(guest_id).await?;

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].subtotal_cents, 15_900 * 3);
    assert_eq!(items[1].subtotal_cents, 8_900 * 2);
    assert_eq!(total_cents, 15_900 * 3 + 8_900 * 2);

    Ok(())
}

#[tokio::test]
async fn test_cart_rejects_bad_items() -> anyhow::Result<()> {
    let (_repo, service, guest_id) = setup().await?;

    // Unknown room
    assert!(service
        .add_item(guest_id, AddCartItemRequest {
            room_id: 999,
            check_in: date("2026-09-10"),
            check_out: date("2026-09-13"),
            guests: 2,
        })
        .await
        .is_err());

    // Zero-night stay
    assert!(service
        .add_item(guest_id, AddCartItemRequest {
            room_id: 201,
            check_in: date("2026-09-10"),
            check_out: date("2026-09-10"),
            guests: 2,
        })
        .await
        .is_err());

    // Over capacity (Standard Single sleeps 1)
    assert!(service
        .add_item(guest_id, AddCartItemRequest {
            room_id: 101,
            check_in: date("2026-09-10"),
            check_out: date("2026-09-12"),
            guests: 3,
        })
        .await
        .is_err());

    Ok(())
}

#[tokio::test]
async fn test_cart_items_are_scoped_to_their_guest() -> anyhow::Result<()> {
    let (repo, service, guest_id) = setup().await?;

    let item = service
        .add_item(guest_id, AddCartItemRequest {
            room_id: 201,
            check_in: date("2026-09-10"),
            check_out: date("2026-09-13"),
            guests: 2,
        })
        .await?;

    // A different guest cannot remove it
    let removed = repo.remove(item.id, Uuid::new_v4()).await?;
    assert!(!removed);
    assert_eq!(repo.list_by_guest(guest_id).await?.len(), 1);

    Ok(())
}
