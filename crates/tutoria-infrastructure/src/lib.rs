pub mod paths;
pub mod storage;

pub use crate::paths::{PathError, TutorPaths};
pub use crate::storage::{ConfigStorage, ConfigStorageError, SecretStorage, SecretStorageError};
