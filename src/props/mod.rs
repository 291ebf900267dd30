//! Page props and the request-scoped shared-prop store.
//!
//! # Data Flow
//! ```text
//! handler / helper code
//!     → store.rs (share / share_all under the request id)
//!     → http::response (take_all at build time, merged under explicit props)
//!     → prop.rs (values resolved depth-first after partial filtering)
//! ```
//!
//! # Design Decisions
//! - A prop is a closed variant: immediate value, lazy producer, nested fragment
//! - Shared entries are read once; the middleware scope guard reclaims leftovers
//! - A background reaper removes entries that outlived their ttl

pub mod prop;
pub mod store;

pub use prop::{LazyFn, Prop, Props};
pub use store::{PropScope, PropStore, SharedPropReaper};
