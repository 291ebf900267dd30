//! Named route export for client-side url helpers.
//!
//! # Responsibilities
//! - Record named application routes (name, method, uri)
//! - Export them in the Ziggy shape, based on the current page's scheme and host
//!
//! # Design Decisions
//! - Pure data export, independent of the protocol core
//! - Routes are registered explicitly; the router is not introspected

pub mod ziggy;

pub use ziggy::{RouteTable, Ziggy, ZiggyRoute};
