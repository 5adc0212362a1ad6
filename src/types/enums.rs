//! Enumeration types for the event simulator
//!
//! This module contains the login outcome codes, the action timing variants
//! an actor can be configured with, and the supported output formats.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Outcome of a single authentication attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LoginStatus {
    /// Successful login (HTTP-style status 200)
    Success,
    /// Failed login (HTTP-style status 401)
    Failure,
}

impl LoginStatus {
    /// Numeric status code carried by event records
    pub fn code(&self) -> u16 {
        match self {
            LoginStatus::Success => 200,
            LoginStatus::Failure => 401,
        }
    }

    /// Look up a status by its numeric code
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            200 => Some(LoginStatus::Success),
            401 => Some(LoginStatus::Failure),
            _ => None,
        }
    }

    /// Whether this outcome is a success
    pub fn is_success(&self) -> bool {
        matches!(self, LoginStatus::Success)
    }
}

impl fmt::Display for LoginStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginStatus::Success => write!(f, "Success"),
            LoginStatus::Failure => write!(f, "Failure"),
        }
    }
}

impl FromStr for LoginStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "success" | "200" => Ok(LoginStatus::Success),
            "failure" | "fail" | "401" => Ok(LoginStatus::Failure),
            _ => Err(format!("Unknown login status: {}", s)),
        }
    }
}

impl Serialize for LoginStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u16(self.code())
    }
}

impl<'de> Deserialize<'de> for LoginStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = u16::deserialize(deserializer)?;
        LoginStatus::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("Unknown login status code: {}", code)))
    }
}

/// How an actor places its actions in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionTiming {
    /// Each action fires at an independently sampled instant inside the
    /// actor's window; instants are sorted so actions keep their order
    #[default]
    Scatter,
    /// The first action fires at the actor's start and every later action
    /// fires at the instant returned by the previous one
    Sequential,
}

impl fmt::Display for ActionTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionTiming::Scatter => write!(f, "Scatter"),
            ActionTiming::Sequential => write!(f, "Sequential"),
        }
    }
}

impl FromStr for ActionTiming {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scatter" => Ok(ActionTiming::Scatter),
            "sequential" | "chained" => Ok(ActionTiming::Sequential),
            _ => Err(format!("Unknown action timing: {}", s)),
        }
    }
}

/// Output formats for generated events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    /// One JSON object per line
    Json,
    /// Comma separated values with a header row
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" | "jsonl" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}
