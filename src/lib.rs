#![cfg_attr(not(test), no_std)]

#[macro_use]
mod log;

mod error;

pub mod alert;
pub mod codec;
pub mod config;
pub mod device;
pub mod interface;
pub mod params;
pub mod registers;
pub mod variant;

pub use crate::device::Ads1x15;
pub use crate::error::{ConfigError, Error, Field, Result, TimeoutSource};
pub use crate::variant::{Ads1015, Ads1115, Variant};
