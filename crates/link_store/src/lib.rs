//! # Link Store
//!
//! This crate provides the key-value store abstraction used to persist resolved
//! video download links between runs, along with an Apify key-value store client.
//!
//! Links are grouped into one record per resolution, so the same video can have
//! independently cached links for every quality it was requested in.

mod cache;
mod store;

pub use cache::LinkCache;
pub use store::apify::{ApifyKeyValueStore, ApifyKeyValueStores};
pub use store::{KeyValueStore, StoreProvider};
