//! HTTP adapters: the transport wrapper and the REST gateway built on it.

mod gateway;
mod transport;

pub use gateway::HttpGateway;
pub use transport::Transport;
