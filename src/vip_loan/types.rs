//! Shared response shapes for VIP loan endpoints.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Paged listing returned by every VIP loan query endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default)]
    pub rows: Vec<T>,
    #[serde(default)]
    pub total: u64,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Outcome of a repayment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepayStatus {
    Repaid,
    Repaying,
    Failed,
}

impl fmt::Display for RepayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepayStatus::Repaid => write!(f, "Repaid"),
            RepayStatus::Repaying => write!(f, "Repaying"),
            RepayStatus::Failed => write!(f, "Failed"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StrOrNum<T> {
    Num(T),
    Str(String),
}

/// Binance is inconsistent about quoting ids and timestamps; accept both.
pub(crate) fn from_str_or_num<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: fmt::Display,
{
    match StrOrNum::<T>::deserialize(deserializer)? {
        StrOrNum::Num(value) => Ok(value),
        StrOrNum::Str(s) => s.trim().parse().map_err(de::Error::custom),
    }
}

/// Optional variant of [`from_str_or_num`]; `null` and `""` map to `None`.
pub(crate) fn from_str_or_num_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: fmt::Display,
{
    match Option::<StrOrNum<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(StrOrNum::Num(value)) => Ok(Some(value)),
        Some(StrOrNum::Str(s)) if s.trim().is_empty() => Ok(None),
        Some(StrOrNum::Str(s)) => s.trim().parse().map(Some).map_err(de::Error::custom),
    }
}
