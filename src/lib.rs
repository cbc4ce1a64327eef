//! relayd - a star-topology message relay.
//!
//! A central server accepts TCP connections, assigns each client a
//! sequential name (`user0`, `user1`, ...), and routes length-prefixed
//! UTF-8 text frames between clients by recipient name. All traffic
//! passes through the server; clients never connect to each other.
//!
//! ## Architecture
//!
//! ```text
//! Gateway (accept loop)
//!    │ per connection: assign name, register Session, spawn worker
//!    ▼
//! Connection worker ──reads──▶ Router ──lookup──▶ Registry
//!                                 │
//!                                 └──send──▶ target Session write stream
//! ```
//!
//! The [`registry::Registry`] is the single piece of shared mutable state.
//! Sessions are tombstoned on disconnect rather than removed, so the
//! registry only ever grows; the liveness flag filters dead entries out of
//! routing lookups.

pub mod config;
pub mod error;
pub mod frame;
pub mod network;
pub mod registry;
pub mod router;
pub mod session;
