#![allow(dead_code)]

use serde::Deserialize;
use thiserror::Error;

/// Stands in for config items whose Cargo feature is disabled in this build.
///
/// A missing item is fine, any value given for it fails deserialization.
#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(try_from = "toml::Value")]
pub struct Unavailable;

#[derive(Debug, Error)]
#[error("This configuration item requires a Cargo feature which is disabled in this build")]
pub struct UnavailableError;

impl TryFrom<toml::Value> for Unavailable {
    type Error = UnavailableError;

    fn try_from(_: toml::Value) -> Result<Self, Self::Error> {
        Err(UnavailableError)
    }
}
