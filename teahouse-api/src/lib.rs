pub mod auth;
pub mod users;
pub mod products;
pub mod categories;
pub mod cart;
pub mod orders;
pub mod stats;
pub mod recommendation;
pub mod regions;

#[cfg(feature = "client")]
pub mod client;
