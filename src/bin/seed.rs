use chrono::{Duration, Utc};
use clap::Parser;
use fake::{faker::name::en::Name, Fake};
use sqlx::sqlite::SqlitePoolOptions;
use uuid::Uuid;

use innkeep::{
    catalog,
    domain::{AddCartItemRequest, Booking, BookingStatus, CreateGuestRequest},
    repository::{
        BookingRepository, GuestRepository, SqliteBookingRepository, SqliteCartRepository,
        SqliteGuestRepository,
    },
    service::CartService,
};

#[derive(Parser)]
#[command(about = "Seed a demo innkeep database")]
struct Args {
    /// Database to seed; falls back to DATABASE_URL, then sqlite:innkeep.db
    #[arg(long)]
    database_url: Option<String>,

    /// Wipe existing rows before seeding
    #[arg(long)]
    fresh: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    println!("🌱 Starting database seeding...");

    let database_url = args
        .database_url
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| "sqlite:innkeep.db".to_string());

    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    // Run migrations first
    println!("📋 Running migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await?;

    if args.fresh {
        println!("🧹 Clearing existing data...");
        sqlx::query("DELETE FROM bookings").execute(&db_pool).await?;
        sqlx::query("DELETE FROM cart_items").execute(&db_pool).await?;
        sqlx::query("DELETE FROM sessions").execute(&db_pool).await?;
        sqlx::query("DELETE FROM guests").execute(&db_pool).await?;
    }

    // Initialize repositories
    let guest_repo = SqliteGuestRepository::new(db_pool.clone());
    let cart_repo = std::sync::Arc::new(SqliteCartRepository::new(db_pool.clone()));
    let booking_repo = SqliteBookingRepository::new(db_pool.clone());
    let cart_service = CartService::new(cart_repo);

    // Seed guests
    println!("👥 Creating guests...");

    let anna = guest_repo.create(CreateGuestRequest {
        email: "anna@example.com".to_string(),
        full_name: "Anna de Vries".to_string(),
        password: "password123".to_string(),
    }).await?;

    let bram = guest_repo.create(CreateGuestRequest {
        email: "bram@example.com".to_string(),
        full_name: "Bram Jansen".to_string(),
        password: "password123".to_string(),
    }).await?;

    // A couple of generated guests to fill out the list
    for i in 1..=2 {
        let full_name: String = Name().fake();
        guest_repo.create(CreateGuestRequest {
            email: format!("guest{}@example.com", i),
            full_name,
            password: "password123".to_string(),
        }).await?;
    }

    println!("  ✅ Created 4 guests");

    // Seed bookings across the status range
    println!("🏨 Creating bookings...");

    let today = Utc::now().date_naive();

    let deluxe = catalog::get(201).expect("room 201 in catalog");
    let paid_booking = Booking {
        id: Uuid::new_v4(),
        guest_id: anna.id,
        room_id: deluxe.id,
        check_in: today + Duration::days(14),
        check_out: today + Duration::days(17),
        guests: 2,
        total_cents: deluxe.price_cents * 3,
        status: BookingStatus::Paid,
        payment_id: Some("tr_demo_anna_paid".to_string()),
        created_at: Utc::now() - Duration::days(2),
        updated_at: Utc::now() - Duration::days(2),
    };
    booking_repo.create(paid_booking).await?;

    let single = catalog::get(101).expect("room 101 in catalog");
    let open_booking = Booking {
        id: Uuid::new_v4(),
        guest_id: bram.id,
        room_id: single.id,
        check_in: today + Duration::days(7),
        check_out: today + Duration::days(9),
        guests: 1,
        total_cents: single.price_cents * 2,
        status: BookingStatus::Open,
        payment_id: Some("tr_demo_bram_open".to_string()),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    booking_repo.create(open_booking).await?;

    let suite = catalog::get(301).expect("room 301 in catalog");
    let expired_booking = Booking {
        id: Uuid::new_v4(),
        guest_id: bram.id,
        room_id: suite.id,
        check_in: today + Duration::days(30),
        check_out: today + Duration::days(33),
        guests: 4,
        total_cents: suite.price_cents * 3,
        status: BookingStatus::Expired,
        payment_id: Some("tr_demo_bram_expired".to_string()),
        created_at: Utc::now() - Duration::days(5),
        updated_at: Utc::now() - Duration::days(4),
    };
    booking_repo.create(expired_booking).await?;

    println!("  ✅ Created 3 bookings");

    // A waiting cart for Anna
    println!("🛒 Creating cart items...");

    cart_service.add_item(anna.id, AddCartItemRequest {
        room_id: 302,
        check_in: today + Duration::days(60),
        check_out: today + Duration::days(62),
        guests: 2,
    }).await?;

    println!("  ✅ Created 1 cart item");

    println!("\n✨ Database seeding complete!");
    println!("\n📝 Test credentials:");
    println!("  anna@example.com, bram@example.com, guest1@example.com, guest2@example.com");
    println!("  Password for all test guests: password123");

    Ok(())
}
