pub mod factory;
pub mod storage;

pub use factory::SqliteStorageFactory;
pub use storage::SqliteDraftStorage;
