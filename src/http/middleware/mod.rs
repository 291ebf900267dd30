//! Request-path middleware.

pub mod protocol;

pub use protocol::inertia_middleware;
