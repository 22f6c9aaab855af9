//! People domain

mod entity;

pub use entity::{Person, PersonId};
