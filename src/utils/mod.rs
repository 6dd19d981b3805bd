// Shared helpers

pub mod csv_export;
pub mod dates;
pub mod storage;
pub mod validation;

pub use dates::format_display_date;
pub use storage::{load_from_storage, remove_from_storage, save_to_storage, MemoryStorage, StorageBackend};
