//! CRUD resources and integration execution

pub mod endpoints;
pub mod integrations;
pub mod people;
pub mod products;
