//! Filter state and the filter function.
//!
//! [`FilterState`] is a plain value: every mutation goes through one of its
//! setter-style methods, which keep the lung-subtype and paging invariants.
//! [`apply`] maps `(records, state)` to the filtered subset in a single stable
//! pass.

pub use self::{engine::*, state::*};

mod engine;
mod state;
