//! Typed documents for the backend's GraphQL schema.
//!
//! Reusable selections live in [`types::fragments`]; documents in [`types::queries`],
//! [`types::mutations`] and [`types::subscriptions`] nest them, so a fragment's selection is
//! inlined into every document using it.

pub mod types;

pub use types::{enums, fragments, mutations, queries, scalars, subscriptions};
