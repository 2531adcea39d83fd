#![forbid(unsafe_code)]

pub mod certificate;
pub mod error;
pub mod model;
pub mod status;
pub mod time;
pub mod upload;

pub use error::Error;
pub use time::Clock;
