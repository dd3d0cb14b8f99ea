//! Crumb
//!
//! Cart engine for The Cozy Crumb bakery's order and checkout pages: a single
//! persisted cart, catalog lookup, add/remove operations, derived views and
//! place-order gating. Bindings for the browser and the terminal live in the
//! `crates/` workspace members.

pub mod actions;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod fixtures;
pub mod gating;
pub mod money;
pub mod pickup;
pub mod prelude;
pub mod pricing;
pub mod service;
pub mod store;
pub mod views;
