#![forbid(unsafe_code)]

pub mod error;
pub mod geometry;
pub mod model;
pub mod time;
pub mod verify;

pub use error::Error;
pub use time::Clock;
