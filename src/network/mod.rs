//! Network layer: the listener and the per-connection workers.

mod connection;
mod gateway;

pub use connection::Connection;
pub use gateway::Gateway;
