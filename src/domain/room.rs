use serde::Serialize;

/// A room in the static catalog. The catalog is held in-source (see
/// `crate::catalog`), so the fields borrow from the binary.
#[derive(Debug, Clone, Serialize)]
pub struct Room {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    /// Nightly rate in euro cents.
    pub price_cents: i64,
    /// Maximum number of guests.
    pub capacity: u32,
    pub size_sqm: u32,
    pub amenities: &'static [&'static str],
    pub image_url: &'static str,
}
