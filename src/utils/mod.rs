// Shared utils

pub mod constants;
pub mod storage;
pub mod validation;
pub mod i18n;

pub use constants::*;
pub use storage::{LocalStorageStore, MemoryStore, PreferenceStore};
pub use validation::*;
pub use i18n::*;
