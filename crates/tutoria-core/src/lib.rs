pub mod answer;
pub mod config;
pub mod error;
pub mod fallback;
pub mod generation;
pub mod history;
pub mod profile;
pub mod provider;
pub mod request;

// Re-export common error type
pub use error::{Result, TutorError};
