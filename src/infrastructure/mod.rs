//! Infrastructure layer - External service implementations

pub mod http;
pub mod integration;
pub mod logging;
pub mod mapping;
pub mod services;
pub mod storage;
