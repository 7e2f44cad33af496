pub mod check;
pub mod exercises;
pub mod explain;
pub mod providers;
pub mod utils;
