//! Domain definitions.

pub mod area;
pub mod facility;
pub mod house;
pub mod order;
pub mod user;

pub use self::{area::Area, house::House};
