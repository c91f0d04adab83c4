//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: in-process document collections behind the
//!   repository ports
//!
//! Adapters translate between storage and domain types; they hold no
//! business rules beyond key uniqueness.

pub mod persistence;
