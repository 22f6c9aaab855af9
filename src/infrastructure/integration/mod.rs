//! Integration execution infrastructure

mod chain_executor;
mod delay;

pub use chain_executor::{ChainExecutor, ChainExecutorConfig, TRANSPORT_FAILURE_STATUS};
pub use delay::{FixedDelay, StepDelay};
