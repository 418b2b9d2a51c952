//! Session store backing the access gate. Token strings are the store ids.

pub mod entity;
