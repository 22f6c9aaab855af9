//! Products domain

mod entity;

pub use entity::{Product, ProductId};
