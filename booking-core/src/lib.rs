pub mod calculations;
pub mod flow;
pub mod models;
pub mod notifications;
pub mod storage;
pub mod store;
pub mod validation;

pub use flow::{BookingFlow, FlowError};
pub use models::*;
pub use storage::{DraftStorage, StorageConfig, StorageError, StorageRegistry};
pub use store::{DraftStore, StoreError};
