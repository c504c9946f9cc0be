pub mod api;
pub mod config;
pub mod error;
pub mod like;
pub mod logger;
pub mod utils;

#[cfg(feature = "gtk")]
pub mod app;
#[cfg(feature = "gtk")]
pub mod ui;
