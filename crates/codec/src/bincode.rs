//! BincodeMarshaller - compact binary wire framing

use contracts::{ContractError, Marshaller, Record, RecordKind};
use serde::de::DeserializeOwned;
use serde::Serialize;

const CODEC_NAME: &str = "bincode";

/// Marshaller speaking the compact binary framing of the outport protocol.
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeMarshaller;

impl BincodeMarshaller {
    pub fn new() -> Self {
        Self
    }

    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ContractError> {
        ::bincode::serialize(value).map_err(|e| ContractError::marshal(CODEC_NAME, e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, ContractError> {
        ::bincode::deserialize(bytes)
            .map_err(|e| ContractError::unmarshal(CODEC_NAME, e.to_string()))
    }
}

impl Marshaller for BincodeMarshaller {
    fn name(&self) -> &str {
        CODEC_NAME
    }

    fn marshal(&self, record: &Record) -> Result<Vec<u8>, ContractError> {
        match record {
            Record::OutportBlock(r) => self.encode(r),
            Record::BlockData(r) => self.encode(r),
            Record::RoundsInfo(r) => self.encode(r),
            Record::ValidatorsRating(r) => self.encode(r),
            Record::ValidatorsPubKeys(r) => self.encode(r),
            Record::Accounts(r) => self.encode(r),
            Record::FinalizedBlock(r) => self.encode(r),
        }
    }

    fn unmarshal(&self, kind: RecordKind, bytes: &[u8]) -> Result<Record, ContractError> {
        Ok(match kind {
            RecordKind::OutportBlock => Record::OutportBlock(self.decode(bytes)?),
            RecordKind::BlockData => Record::BlockData(self.decode(bytes)?),
            RecordKind::RoundsInfo => Record::RoundsInfo(self.decode(bytes)?),
            RecordKind::ValidatorsRating => Record::ValidatorsRating(self.decode(bytes)?),
            RecordKind::ValidatorsPubKeys => Record::ValidatorsPubKeys(self.decode(bytes)?),
            RecordKind::Accounts => Record::Accounts(self.decode(bytes)?),
            RecordKind::FinalizedBlock => Record::FinalizedBlock(self.decode(bytes)?),
        })
    }
}
