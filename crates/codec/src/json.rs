//! JsonMarshaller - JSON wire framing

use contracts::{ContractError, Marshaller, Record, RecordKind};
use serde::de::DeserializeOwned;
use serde::Serialize;

const CODEC_NAME: &str = "json";

/// Marshaller speaking the JSON framing of the outport protocol.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMarshaller;

impl JsonMarshaller {
    pub fn new() -> Self {
        Self
    }

    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ContractError> {
        serde_json::to_vec(value).map_err(|e| ContractError::marshal(CODEC_NAME, e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, ContractError> {
        serde_json::from_slice(bytes)
            .map_err(|e| ContractError::unmarshal(CODEC_NAME, e.to_string()))
    }
}

impl Marshaller for JsonMarshaller {
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
