//! Back-office order desk for the storefront's order-management API.
//!
//! Lists orders, filters and searches them locally, and pushes
//! `orderStatus` / `paymentStatus` / `trackingNumber` changes back to the API,
//! refetching the full list after every successful change.

pub mod api;
pub mod config;
pub mod error;
pub mod filter;
pub mod manager;
pub mod types;
pub mod view;

pub use error::DeskError;
