//! Read models of the [`Service`].
//!
//! [`Service`]: crate::Service

pub mod area;
pub mod house;
pub mod order;
