//! Outbound HTTP infrastructure

mod transport;

#[cfg(test)]
pub use transport::mock;
pub use transport::{
    HttpTransport, OutboundRequest, OutboundResponse, ReqwestTransport, TransportError,
};
