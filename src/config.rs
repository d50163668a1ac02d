//! Runtime settings read from the environment.

use crate::model::{GroupOrder, Rupees};
use std::{env, fmt::Display, str::FromStr};
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;
pub const DEFAULT_DELIVERY_FEE: Rupees = 50;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketConfig {
    /// Request buffer of every actor channel.
    pub channel_capacity: usize,
    /// Flat fee added to every order at checkout.
    pub delivery_fee: Rupees,
    /// Group orders offered at checkout. Not read from the environment.
    pub groups: Vec<GroupOrder>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            delivery_fee: DEFAULT_DELIVERY_FEE,
            groups: Vec::new(),
        }
    }
}

impl MarketConfig {
    /// Reads `BAZAR_CHANNEL_CAPACITY` and `BAZAR_DELIVERY_FEE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let channel_capacity: usize =
            try_load(&lookup, "BAZAR_CHANNEL_CAPACITY", DEFAULT_CHANNEL_CAPACITY)?;
        if channel_capacity == 0 {
            warn!("BAZAR_CHANNEL_CAPACITY must be positive");
            return Err(ConfigError::Invalid {
                key: "BAZAR_CHANNEL_CAPACITY",
                value: "0".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(Self {
            channel_capacity,
            delivery_fee: try_load(&lookup, "BAZAR_DELIVERY_FEE", DEFAULT_DELIVERY_FEE)?,
            groups: Vec::new(),
        })
    }
}

fn try_load<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default: {default}");
        return Ok(default);
    };
    raw.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }
    })
}
