pub mod root;
pub mod auth;
pub mod rooms;
pub mod cart;
pub mod bookings;
pub mod payments;
