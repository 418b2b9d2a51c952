//! Order store: `ResourceActor<Order>`, append-mostly.

pub mod entity;
