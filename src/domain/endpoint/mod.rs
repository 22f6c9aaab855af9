//! Endpoint catalog domain

mod entity;

pub use entity::{Endpoint, EndpointId, SUPPORTED_METHODS};
