use serde::{Deserialize, Serialize};

use crate::domain::Room;

/// The room catalog. Six rooms, held in-source: the inventory changes a few
/// times a year at most and ships with the binary, so there is no rooms
/// table to migrate or seed.
pub const ROOMS: [Room; 6] = [
    Room {
        id: 101,
        name: "Standard Single",
        description: "Compact single room facing the courtyard, with a work desk and queen bed.",
        price_cents: 8_900,
        capacity: 1,
        size_sqm: 16,
        amenities: &["wifi", "tv", "desk"],
        image_url: "/images/rooms/standard-single.jpg",
    },
    Room {
        id: 102,
        name: "Standard Double",
        description: "Bright double room on the second floor with a king bed and city view.",
        price_cents: 11_900,
        capacity: 2,
        size_sqm: 22,
        amenities: &["wifi", "tv", "minibar"],
        image_url: "/images/rooms/standard-double.jpg",
    },
    Room {
        id: 201,
        name: "Deluxe Double",
        description: "Spacious double with a seating corner, rain shower and balcony.",
        price_cents: 15_900,
        capacity: 2,
        size_sqm: 28,
        amenities: &["wifi", "tv", "minibar", "balcony", "rain-shower"],
        image_url: "/images/rooms/deluxe-double.jpg",
    },
    Room {
        id: 202,
        name: "Twin Room",
        description: "Two single beds, ideal for colleagues or friends travelling together.",
        price_cents: 12_900,
        capacity: 2,
        size_sqm: 24,
        amenities: &["wifi", "tv", "desk", "minibar"],
        image_url: "/images/rooms/twin.jpg",
    },
    Room {
        id: 301,
        name: "Family Suite",
        description: "Two connected rooms sleeping up to four, with a kitchenette.",
        price_cents: 21_900,
        capacity: 4,
        size_sqm: 42,
        amenities: &["wifi", "tv", "kitchenette", "sofa-bed"],
        image_url: "/images/rooms/family-suite.jpg",
    },
    Room {
        id: 302,
        name: "Penthouse Suite",
        description: "Top-floor suite with panoramic terrace, free-standing bath and bar.",
        price_cents: 34_900,
        capacity: 3,
        size_sqm: 55,
        amenities: &["wifi", "tv", "terrace", "bath", "bar", "room-service"],
        image_url: "/images/rooms/penthouse.jpg",
    },
];

pub fn all() -> &'static [Room] {
    &ROOMS
}

pub fn get(id: u32) -> Option<&'static Room> {
    ROOMS.iter().find(|r| r.id == id)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoomFilter {
    /// Inclusive bounds on the nightly rate, in cents.
    pub min_price_cents: Option<i64>,
    pub max_price_cents: Option<i64>,
    /// Minimum number of guests the room must sleep.
    pub capacity: Option<u32>,
    /// Case-insensitive match against name and description.
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomSort {
    #[default]
    PriceAsc,
    PriceDesc,
    CapacityDesc,
}

pub fn filter_rooms(filter: &RoomFilter, sort: RoomSort) -> Vec<&'static Room> {
    let search = filter.search.as_deref().map(str::to_lowercase);

    let mut rooms: Vec<&Room> = ROOMS
        .iter()
        .filter(|r| filter.min_price_cents.map_or(true, |min| r.price_cents >= min))
        .filter(|r| filter.max_price_cents.map_or(true, |max| r.price_cents <= max))
        .filter(|r| filter.capacity.map_or(true, |c| r.capacity >= c))
        .filter(|r| {
            search.as_deref().map_or(true, |term| {
                r.name.to_lowercase().contains(term) || r.description.to_lowercase().contains(term)
            })
        })
        .collect();

    match sort {
        RoomSort::PriceAsc => rooms.sort_by_key(|r| r.price_cents),
        RoomSort::PriceDesc => rooms.sort_by_key(|r| std::cmp::Reverse(r.price_cents)),
        RoomSort::CapacityDesc => rooms.sort_by_key(|r| std::cmp::Reverse(r.capacity)),
    }

    rooms
}

#[derive(Debug, Clone, Serialize)]
pub struct RoomPage {
    pub rooms: Vec<Room>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

/// Slice one page out of a filtered room list. Pages are 1-based; a page
/// past the end yields an empty slice, not an error.
pub fn paginate(rooms: &[&'static Room], page: usize, per_page: usize) -> RoomPage {
    let per_page = per_page.max(1);
    let page = page.max(1);
    let total = rooms.len();
    let total_pages = total.div_ceil(per_page);

    let start = (page - 1).saturating_mul(per_page);
    let current: Vec<Room> = rooms
        .iter()
        .skip(start)
        .take(per_page)
        .map(|r| (*r).clone())
        .collect();

    RoomPage {
        rooms: current,
        total,
        page,
        per_page,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_six_rooms_with_unique_ids() {
        assert_eq!(ROOMS.len(), 6);
        let mut ids: Vec<u32> = ROOMS.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn test_filter_by_price_range() {
        let filter = RoomFilter {
            min_price_cents: Some(10_000),
            max_price_cents: Some(20_000),
            ..Default::default()
        };
        let rooms = filter_rooms(&filter, RoomSort::PriceAsc);
        assert!(!rooms.is_empty());
        assert!(rooms
            .iter()
            .all(|r| r.price_cents >= 10_000 && r.price_cents <= 20_000));
    }

    #[test]
    fn test_filter_by_capacity() {
        let filter = RoomFilter {
            capacity: Some(4),
            ..Default::default()
        };
        let rooms = filter_rooms(&filter, RoomSort::PriceAsc);
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].id, 301);
    }

    #[test]
    fn test_filter_by_search_term() {
        let filter = RoomFilter {
            search: Some("TERRACE".to_string()),
            ..Default::default()
        };
        let rooms = filter_rooms(&filter, RoomSort::PriceAsc);
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].id, 302);
    }

    #[test]
    fn test_sort_orders() {
        let asc = filter_rooms(&RoomFilter::default(), RoomSort::PriceAsc);
        assert!(asc.windows(2).all(|w| w[0].price_cents <= w[1].price_cents));

        let desc = filter_rooms(&RoomFilter::default(), RoomSort::PriceDesc);
        assert!(desc.windows(2).all(|w| w[0].price_cents >= w[1].price_cents));
    }

    #[test]
    fn test_pagination_math() {
        let rooms = filter_rooms(&RoomFilter::default(), RoomSort::PriceAsc);

        let page1 = paginate(&rooms, 1, 4);
        assert_eq!(page1.rooms.len(), 4);
        assert_eq!(page1.total, 6);
        assert_eq!(page1.total_pages, 2);

        let page2 = paginate(&rooms, 2, 4);
        assert_eq!(page2.rooms.len(), 2);
        assert_eq!(page2.page, 2);

        // Page slices line up with the full list
        assert_eq!(page1.rooms[3].id, rooms[3].id);
        assert_eq!(page2.rooms[0].id, rooms[4].id);
    }

    #[test]
    fn test_pagination_past_the_end_is_empty() {
        let rooms = filter_rooms(&RoomFilter::default(), RoomSort::PriceAsc);
        let page = paginate(&rooms, 5, 4);
        assert!(page.rooms.is_empty());
        assert_eq!(page.total, 6);
    }
}
