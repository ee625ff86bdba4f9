//! Capline
//!
//! Capline is the pricing and quote-extraction engine behind a custom-cap
//! storefront: tiered CSV-driven cost tables, per-category pricing resolvers,
//! order aggregation, and a free-text quote parser that turns chat messages
//! into structured order specifications.

pub mod artwork;
pub mod catalog;
pub mod margin;
pub mod order;
pub mod quote;
pub mod resolve;
pub mod tables;
pub mod tiers;
