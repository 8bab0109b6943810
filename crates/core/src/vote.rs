//! Caption vote values.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A single vote on a caption: `+1` (up) or `-1` (down).
///
/// Serialized as the bare integer the backend stores in `vote_value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum VoteValue {
    Up,
    Down,
}

impl VoteValue {
    pub fn as_i32(self) -> i32 {
        match self {
            VoteValue::Up => 1,
            VoteValue::Down => -1,
        }
    }
}

impl TryFrom<i32> for VoteValue {
    type Error = CoreError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(VoteValue::Up),
            -1 => Ok(VoteValue::Down),
            other => Err(CoreError::Validation(format!(
                "Vote value must be 1 or -1, got {other}"
            ))),
        }
    }
}

impl From<VoteValue> for i32 {
    fn from(value: VoteValue) -> Self {
        value.as_i32()
    }
}
