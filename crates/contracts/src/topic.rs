//! Topic - outport event identifiers
//!
//! Closed set of event kinds the ws outport driver can emit. Must stay in
//! lockstep with the outport protocol's event catalog.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::RecordKind;

/// Outport event topic.
///
/// Wire names are fixed by the outport protocol. [`Topic::parse`] does exact
/// matching, no normalization: the driver emits these strings verbatim and
/// anything else is an unknown topic by definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    /// A block and its associated data were indexed
    SaveBlock,
    /// A previously indexed block was reverted
    RevertIndexedBlock,
    /// Consensus rounds info
    SaveRoundsInfo,
    /// Validators rating update
    SaveValidatorsRating,
    /// Validators public keys per shard
    SaveValidatorsPubKeys,
    /// Altered accounts for a block
    SaveAccounts,
    /// A block became final
    FinalizedBlock,
}

impl Topic {
    /// Every topic of the current protocol version.
    pub const ALL: [Topic; 7] = [
        Topic::SaveBlock,
        Topic::RevertIndexedBlock,
        Topic::SaveRoundsInfo,
        Topic::SaveValidatorsRating,
        Topic::SaveValidatorsPubKeys,
        Topic::SaveAccounts,
        Topic::FinalizedBlock,
    ];

    /// Parse a wire topic string.
    ///
    /// Returns `None` for anything outside the closed set.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SaveBlock" => Some(Self::SaveBlock),
            "RevertIndexedBlock" => Some(Self::RevertIndexedBlock),
            "SaveRoundsInfo" => Some(Self::SaveRoundsInfo),
            "SaveValidatorsRating" => Some(Self::SaveValidatorsRating),
            "SaveValidatorsPubKeys" => Some(Self::SaveValidatorsPubKeys),
            "SaveAccounts" => Some(Self::SaveAccounts),
            "FinalizedBlock" => Some(Self::FinalizedBlock),
            _ => None,
        }
    }

    /// Wire name of this topic.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SaveBlock => "SaveBlock",
            Self::RevertIndexedBlock => "RevertIndexedBlock",
            Self::SaveRoundsInfo => "SaveRoundsInfo",
            Self::SaveValidatorsRating => "SaveValidatorsRating",
            Self::SaveValidatorsPubKeys => "SaveValidatorsPubKeys",
            Self::SaveAccounts => "SaveAccounts",
            Self::FinalizedBlock => "FinalizedBlock",
        }
    }

    /// Decode target for this topic.
    ///
    /// Exhaustive by construction: every known topic maps to exactly one
    /// record kind, so the "one handler per topic" invariant is checked at
    /// compile time instead of at registry build time.
    pub const fn record_kind(&self) -> RecordKind {
        match self {
            Self::SaveBlock => RecordKind::OutportBlock,
            Self::RevertIndexedBlock => RecordKind::BlockData,
            Self::SaveRoundsInfo => RecordKind::RoundsInfo,
            Self::SaveValidatorsRating => RecordKind::ValidatorsRating,
            Self::SaveValidatorsPubKeys => RecordKind::ValidatorsPubKeys,
            Self::SaveAccounts => RecordKind::Accounts,
            Self::FinalizedBlock => RecordKind::FinalizedBlock,
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
