pub mod config;
pub mod credentials;
pub mod error;
pub mod model;
pub mod store;

pub use config::Config;
pub use error::*;
