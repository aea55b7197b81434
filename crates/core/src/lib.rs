#![forbid(unsafe_code)]

pub mod chunking;
pub mod model;
pub mod prompt;
pub mod time;

pub use time::Clock;
