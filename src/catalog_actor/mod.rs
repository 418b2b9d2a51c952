//! Catalog store: `ResourceActor<Product>` plus the stock actions checkout
//! relies on.

pub mod actions;
pub mod entity;

pub use actions::*;
