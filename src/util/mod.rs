//! Utility modules: configuration, logging and the message catalogue

pub mod config;
pub mod i18n;
pub mod logger;
