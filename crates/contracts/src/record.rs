//! Record - decoded outport event payloads
//!
//! One record type per topic, mirroring the outport event catalog. Records
//! are plain serde types; their wire encoding belongs to the [`Marshaller`]
//! implementations, never to this crate.
//!
//! [`Marshaller`]: crate::Marshaller

use std::collections::BTreeMap;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Decode target tag, one per record type.
///
/// This is what a [`Marshaller`](crate::Marshaller) receives to know which
/// shape the payload bytes must take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    OutportBlock,
    BlockData,
    RoundsInfo,
    ValidatorsRating,
    ValidatorsPubKeys,
    Accounts,
    FinalizedBlock,
}

/// A decoded outport event.
///
/// Tagged-variant registry over every record type: holding a `Record` means
/// the payload decoded successfully into the shape its topic demands.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    OutportBlock(OutportBlock),
    BlockData(BlockData),
    RoundsInfo(RoundsInfo),
    ValidatorsRating(ValidatorsRating),
    ValidatorsPubKeys(ValidatorsPubKeys),
    Accounts(Accounts),
    FinalizedBlock(FinalizedBlock),
}

impl Record {
    /// Kind tag of the contained record.
    pub const fn kind(&self) -> RecordKind {
        match self {
            Self::OutportBlock(_) => RecordKind::OutportBlock,
            Self::BlockData(_) => RecordKind::BlockData,
            Self::RoundsInfo(_) => RecordKind::RoundsInfo,
            Self::ValidatorsRating(_) => RecordKind::ValidatorsRating,
            Self::ValidatorsPubKeys(_) => RecordKind::ValidatorsPubKeys,
            Self::Accounts(_) => RecordKind::Accounts,
            Self::FinalizedBlock(_) => RecordKind::FinalizedBlock,
        }
    }
}

/// Full indexed block event (topic `SaveBlock`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutportBlock {
    /// Shard that produced the block
    pub shard_id: u32,

    /// Block header data (absent for metadata-only notifications)
    pub block_data: Option<BlockData>,

    /// Nonce of the highest final block at emission time
    pub highest_final_block_nonce: u64,

    /// Hash of the highest final block
    #[serde(with = "serde_bytes")]
    pub highest_final_block_hash: Vec<u8>,

    /// Shard count of the network
    pub number_of_shards: u32,
}

/// Block header data (topic `RevertIndexedBlock`, also nested in [`OutportBlock`])
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockData {
    /// Shard that produced the block
    pub shard_id: u32,

    /// Header type discriminator (e.g. "ShardHeaderV2", "MetaBlock")
    pub header_type: String,

    /// Header hash
    #[serde(with = "serde_bytes")]
    pub header_hash: Vec<u8>,

    /// Marshalled header (opaque, shape given by `header_type`)
    pub header_bytes: Bytes,

    /// Consensus round of the header
    pub round: u64,
}

/// Consensus rounds batch (topic `SaveRoundsInfo`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundsInfo {
    /// Shard the rounds belong to
    pub shard_id: u32,

    /// Per-round info
    pub rounds: Vec<RoundInfo>,
}

/// Single consensus round
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundInfo {
    /// Round number
    pub round: u64,

    /// Epoch the round belongs to
    pub epoch: u32,

    /// Shard of the round
    pub shard_id: u32,

    /// Whether a block was proposed in this round
    pub block_was_proposed: bool,

    /// Round timestamp (unix seconds)
    pub timestamp: u64,

    /// Indexes of the consensus signers
    pub signers_indexes: Vec<u64>,
}

/// Validators rating update (topic `SaveValidatorsRating`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidatorsRating {
    /// Shard the ratings belong to
    pub shard_id: u32,

    /// Epoch of the rating snapshot
    pub epoch: u32,

    /// Per-validator rating
    pub rating: Vec<ValidatorRatingInfo>,
}

/// Rating of a single validator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidatorRatingInfo {
    /// Hex-encoded BLS public key
    pub public_key: String,

    /// Rating value
    pub rating: u32,
}

/// Validators public keys per shard (topic `SaveValidatorsPubKeys`)
///
/// `BTreeMap` keeps the marshalled form deterministic across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidatorsPubKeys {
    /// Shard that emitted the event
    pub shard_id: u32,

    /// Epoch of the snapshot
    pub epoch: u32,

    /// BLS public keys keyed by shard
    pub shard_pub_keys: BTreeMap<u32, Vec<Vec<u8>>>,
}

/// Altered accounts for a block (topic `SaveAccounts`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Accounts {
    /// Shard the accounts belong to
    pub shard_id: u32,

    /// Timestamp of the block that altered the accounts
    pub block_timestamp: u64,

    /// Accounts touched by the block
    pub altered: Vec<AlteredAccount>,
}

/// Single altered account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlteredAccount {
    /// Bech32 address
    pub address: String,

    /// Balance after the block, as a decimal string
    pub balance: String,

    /// Account nonce after the block
    pub nonce: u64,
}

/// Block finality notification (topic `FinalizedBlock`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinalizedBlock {
    /// Shard of the finalized block
    pub shard_id: u32,

    /// Hash of the finalized header
    #[serde(with = "serde_bytes")]
    pub header_hash: Vec<u8>,
}
