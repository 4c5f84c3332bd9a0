//! Lot selection methods.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Method determines the order in which acquisition lots are consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// First In, First Out. Lots are consumed in the order given.
    Fifo,
    /// Highest In, First Out. Lots with the highest total cost basis are
    /// consumed first.
    Hifo,
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "FIFO" => Ok(Self::Fifo),
            "HIFO" => Ok(Self::Hifo),
            _ => Err(format!("unknown method: {s}")),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fifo => write!(f, "FIFO"),
            Self::Hifo => write!(f, "HIFO"),
        }
    }
}
