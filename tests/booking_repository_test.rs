use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use innkeep::{
    domain::{Booking, BookingStatus, CreateGuestRequest},
    repository::{
        BookingRepository, GuestRepository, SqliteBookingRepository, SqliteGuestRepository,
    },
    service::BookingService,
};
use sqlx::SqlitePool;
use uuid::Uuid;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

async fn setup() -> anyhow::Result<(SqlitePool, Uuid)> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let guest = SqliteGuestRepository::new(pool.clone())
        .create(CreateGuestRequest {
            email: "guest@example.com".to_string(),
            full_name: "Test Guest".to_string(),
            password: "secure_password123".to_string(),
        })
        .await?;

    Ok((pool, guest.id))
}

fn booking(
    guest_id: Uuid,
    room_id: u32,
    check_in: &str,
    check_out: &str,
    status: BookingStatus,
    payment_id: Option<&str>,
) -> Booking {
    let check_in = date(check_in);
    let check_out = date(check_out);
    Booking {
        id: Uuid::new_v4(),
        guest_id,
        room_id,
        check_in,
        check_out,
        guests: 2,
        total_cents: 15_900 * (check_out - check_in).num_days(),
        status,
        payment_id: payment_id.map(String::from),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_booking_crud() -> anyhow::Result<()> {
    let (pool, guest_id) = setup().await?;
    let repo = SqliteBookingRepository::new(pool);

    let created = repo
        .create(booking(
            guest_id,
            201,
            "2026-09-10",
            "2026-09-13",
            BookingStatus::Open,
            Some("tr_abc123"),
        ))
        .await?;
    assert_eq!(created.room_id, 201);
    assert_eq!(created.status, BookingStatus::Open);
    assert_eq!(created.nights(), 3);

    let found = repo.find_by_id(created.id).await?;
    assert!(found.is_some());
    assert_eq!(found.unwrap().payment_id.as_deref(), Some("tr_abc123"));

    let listed = repo.list_by_guest(guest_id).await?;
    assert_eq!(listed.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_webhook_update_touches_every_row_of_the_payment() -> anyhow::Result<()> {
    let (pool, guest_id) = setup().await?;
    let repo = SqliteBookingRepository::new(pool);

    // One payment covering two stays, plus an unrelated booking
    repo.create(booking(guest_id, 101, "2026-09-10", "2026-09-12", BookingStatus::Open, Some("tr_pay1"))).await?;
    repo.create(booking(guest_id, 201, "2026-09-10", "2026-09-12", BookingStatus::Open, Some("tr_pay1"))).await?;
    repo.create(booking(guest_id, 301, "2026-09-10", "2026-09-12", BookingStatus::Open, Some("tr_other"))).await?;

    let updated = repo
        .update_status_by_payment("tr_pay1", BookingStatus::Paid)
        .await?;
    assert_eq!(updated, 2);

    let pay1 = repo.find_by_payment_id("tr_pay1").await?;
    assert_eq!(pay1.len(), 2);
    assert!(pay1.iter().all(|b| b.status == BookingStatus::Paid));

    let other = repo.find_by_payment_id("tr_other").await?;
    assert_eq!(other[0].status, BookingStatus::Open);

    // Unknown payment ids update nothing
    let none = repo
        .update_status_by_payment("tr_unknown", BookingStatus::Paid)
        .await?;
    assert_eq!(none, 0);

    Ok(())
}

#[tokio::test]
async fn test_unknown_provider_status_is_stored_verbatim() -> anyhow::Result<()> {
    let (pool, guest_id) = setup().await?;
    let repo = SqliteBookingRepository::new(pool);

    repo.create(booking(guest_id, 101, "2026-09-10", "2026-09-12", BookingStatus::Open, Some("tr_new"))).await?;

    repo.update_status_by_payment("tr_new", BookingStatus::from_provider("brand_new_status"))
        .await?;

    let rows = repo.find_by_payment_id("tr_new").await?;
    assert_eq!(rows[0].status.as_str(), "brand_new_status");

    Ok(())
}

#[tokio::test]
async fn test_overlap_counting_uses_half_open_ranges() -> anyhow::Result<()> {
    let (pool, guest_id) = setup().await?;
    let repo = SqliteBookingRepository::new(pool);

    repo.create(booking(guest_id, 201, "2026-09-10", "2026-09-13", BookingStatus::Paid, None)).await?;

    // Same dates collide
    assert_eq!(repo.count_overlapping(201, date("2026-09-10"), date("2026-09-13")).await?, 1);
    // Partial overlap collides
    assert_eq!(repo.count_overlapping(201, date("2026-09-12"), date("2026-09-15")).await?, 1);
    // A stay nested inside collides
    assert_eq!(repo.count_overlapping(201, date("2026-09-11"), date("2026-09-12")).await?, 1);
    // Back-to-back is fine: new check-in on the existing check-out day
    assert_eq!(repo.count_overlapping(201, date("2026-09-13"), date("2026-09-15")).await?, 0);
    // And the other way around
    assert_eq!(repo.count_overlapping(201, date("2026-09-08"), date("2026-09-10")).await?, 0);
    // Other rooms are unaffected
    assert_eq!(repo.count_overlapping(101, date("2026-09-10"), date("2026-09-13")).await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_only_held_statuses_block_availability() -> anyhow::Result<()> {
    let (pool, guest_id) = setup().await?;
    let repo = SqliteBookingRepository::new(pool);

    repo.create(booking(guest_id, 201, "2026-09-10", "2026-09-13", BookingStatus::Canceled, None)).await?;
    repo.create(booking(guest_id, 201, "2026-09-10", "2026-09-13", BookingStatus::Expired, None)).await?;
    repo.create(booking(guest_id, 201, "2026-09-10", "2026-09-13", BookingStatus::Refunded, None)).await?;

    // None of those hold the room
    assert_eq!(repo.count_overlapping(201, date("2026-09-10"), date("2026-09-13")).await?, 0);

    repo.create(booking(guest_id, 201, "2026-09-10", "2026-09-13", BookingStatus::Pending, None)).await?;
    assert_eq!(repo.count_overlapping(201, date("2026-09-10"), date("2026-09-13")).await?, 1);

    Ok(())
}

#[tokio::test]
async fn test_booked_dates_expand_held_ranges() -> anyhow::Result<()> {
    let (pool, guest_id) = setup().await?;
    let repo = Arc::new(SqliteBookingRepository::new(pool));

    repo.create(booking(guest_id, 201, "2026-09-10", "2026-09-13", BookingStatus::Paid, None)).await?;
    repo.create(booking(guest_id, 201, "2026-09-12", "2026-09-14", BookingStatus::Open, None)).await?;
    repo.create(booking(guest_id, 201, "2026-09-20", "2026-09-21", BookingStatus::Canceled, None)).await?;

    let service = BookingService::new(repo);
    let dates = service.booked_dates(201).await?;

    // Nights 10, 11, 12 from the first stay and 12, 13 from the second,
    // deduplicated; the canceled stay contributes nothing. Check-out days
    // are not booked nights.
    assert_eq!(
        dates,
        vec![
            date("2026-09-10"),
            date("2026-09-11"),
            date("2026-09-12"),
            date("2026-09-13"),
        ]
    );

    assert!(!service.is_range_available(201, date("2026-09-11"), date("2026-09-12")).await?);
    assert!(service.is_range_available(201, date("2026-09-14"), date("2026-09-16")).await?);

    Ok(())
}
