pub mod memstore;
pub mod pgstore;
pub mod store;

pub use store::{DocStore, LifecycleMode, StoreError};
