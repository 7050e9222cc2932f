pub mod guest;
pub mod room;
pub mod cart;
pub mod booking;

pub use guest::*;
pub use room::*;
pub use cart::*;
pub use booking::*;
