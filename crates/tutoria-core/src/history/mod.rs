//! Session history domain module.
//!
//! - `model`: `SessionRecord` and `SessionScore` as received from the history store
//! - `context`: `SessionContext`, the derived weaknesses/strengths/topics view

mod context;
mod model;

pub use context::{STRENGTH_THRESHOLD, SessionContext, WEAKNESS_THRESHOLD};
pub use model::{SessionRecord, SessionScore};
