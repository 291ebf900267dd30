//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! incoming request
//!     → request.rs (request id assigned / propagated)
//!     → middleware/protocol.rs (context injected, version check, prop scope)
//!     → application handler builds a response.rs `Response` via context.rs
//!     → response.rs (shared props taken, partial filter, lazy resolution)
//!     → page.rs page object as JSON, or full page through the renderer
//!     → middleware/protocol.rs (302 → 303 rewrite for mutating Inertia requests)
//! ```

pub mod context;
pub mod headers;
pub mod middleware;
pub mod page;
pub mod request;
pub mod response;
pub mod server;

pub use context::InertiaContext;
pub use middleware::inertia_middleware;
pub use page::PageObject;
pub use request::{RequestId, RequestIdExt, X_REQUEST_ID};
pub use response::Response;
pub use server::HttpServer;
