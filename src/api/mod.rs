//! Everything that talks to the order-management API or holds its credentials.

pub mod auth;
pub mod client;
pub mod orders;

pub use auth::{AdminUser, Claims, Session};
pub use client::{build_client, resolve_image_url};
pub use orders::{HttpOrderApi, OrderApi};
