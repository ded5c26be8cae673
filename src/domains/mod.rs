//! Domains module containing business logic organized by bounded contexts.
//!
//! The calculator exposes a single domain: tools. Transports in `core`
//! depend on it; it depends on nothing in `core`.

pub mod tools;
