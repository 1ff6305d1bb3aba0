//! CLI configuration

pub(crate) mod logging;
pub(crate) mod shop;

pub(crate) use logging::{LogFormat, LoggingConfig};
pub(crate) use shop::ShopConfig;
