//! Payload records - what the store keeps for each comparison id

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Application-assigned key of a comparison
pub type ComparisonId = u64;

/// Slot of a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Side::Left),
            "right" => Ok(Side::Right),
            other => Err(format!("unknown side '{}', expected 'left' or 'right'", other)),
        }
    }
}

/// Uploaded content of one side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub content: Vec<u8>,

    /// When the content was uploaded (UTC)
    pub uploaded_at: DateTime<Utc>,
}

impl Payload {
    /// Wrap content uploaded right now
    pub fn new(content: Vec<u8>) -> Self {
        Self {
            content,
            uploaded_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Both sides stored under one id; either may be missing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredComparison {
    pub id: ComparisonId,
    pub left: Option<Payload>,
    pub right: Option<Payload>,
}

impl StoredComparison {
    /// Record with neither side uploaded
    pub fn new(id: ComparisonId) -> Self {
        Self {
            id,
            left: None,
            right: None,
        }
    }

    pub fn side(&self, side: Side) -> Option<&Payload> {
        match side {
            Side::Left => self.left.as_ref(),
            Side::Right => self.right.as_ref(),
        }
    }

    /// Replace one side, keeping the other
    pub fn set(&mut self, side: Side, payload: Payload) {
        match side {
            Side::Left => self.left = Some(payload),
            Side::Right => self.right = Some(payload),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }
}
