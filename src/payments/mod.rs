pub mod mollie_client;

pub use mollie_client::{CheckoutSession, CheckoutStay, MollieClient};
