#[macro_use]
extern crate rust_i18n;

i18n!("locales", fallback = "en");

pub mod components;
pub mod config;
pub mod error;
pub mod formatting;
pub mod logging;
pub mod models;
pub mod services;
pub mod version;

pub use error::AlertError;
