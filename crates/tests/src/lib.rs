//! # Integration Tests
//!
//! End-to-end tests across the connector crates.
//!
//! Covered flows:
//! - config → codec → dispatcher wiring
//! - mixed payload streams (valid, unknown topic, undecodable)
//! - audit-only dispatcher variant
//! - outcome aggregation via observability

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_topic_catalog_is_stable() {
        // Transport protocol lockstep: these wire names must never drift
        let names: Vec<&str> = contracts::Topic::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "SaveBlock",
                "RevertIndexedBlock",
                "SaveRoundsInfo",
                "SaveValidatorsRating",
                "SaveValidatorsPubKeys",
                "SaveAccounts",
                "FinalizedBlock",
            ]
        );
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex};

    use codec::create_marshaller;
    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{
        ContractError, FinalizedBlock, Marshaller, MarshallerKind, OutportBlock, Record,
        RecordHandler, RecordKind, Topic,
    };
    use dispatcher::{create_audit_dispatcher, create_dispatcher, DispatcherError};
    use observability::{DispatchStatsAggregator, PayloadOutcome};

    /// Handler collecting every record it receives
    struct CollectingHandler {
        received: Arc<Mutex<Vec<(Topic, RecordKind)>>>,
        close_count: Arc<AtomicU64>,
    }

    impl CollectingHandler {
        fn new() -> Self {
            Self {
                received: Arc::new(Mutex::new(Vec::new())),
                close_count: Arc::new(AtomicU64::new(0)),
            }
        }
    }

    impl RecordHandler for CollectingHandler {
        fn name(&self) -> &str {
            "collecting"
        }

        async fn handle(&self, topic: Topic, record: &Record) -> Result<(), ContractError> {
            self.received.lock().unwrap().push((topic, record.kind()));
            Ok(())
        }

        async fn close(&self) -> Result<(), ContractError> {
            self.close_count.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }
    }

    fn outcome_of(err: &DispatcherError) -> PayloadOutcome {
        match err {
            DispatcherError::UnknownTopic { .. } => PayloadOutcome::UnknownTopic,
            DispatcherError::DecodeFailure { .. } => PayloadOutcome::DecodeFailure,
            _ => PayloadOutcome::HandlerFailure,
        }
    }

    const CONFIG_TOML: &str = r#"
[web_socket]
url = "localhost:22111"
marshaller_type = "json"
retry_duration_secs = 5
with_acknowledge = true
blocking_ack_on_error = false
"#;

    /// End-to-end: config → marshaller factory → dispatcher → handler,
    /// over a mixed stream of valid, unknown-topic, and undecodable
    /// payloads, with outcomes aggregated the way a transport loop would.
    #[tokio::test]
    async fn test_e2e_mixed_payload_stream() {
        let config = ConfigLoader::load_from_str(CONFIG_TOML, ConfigFormat::Toml).unwrap();
        let marshaller = create_marshaller(config.web_socket.marshaller_type);

        let handler = CollectingHandler::new();
        let received = Arc::clone(&handler.received);
        let dispatcher = create_dispatcher(Arc::clone(&marshaller), handler).unwrap();

        let block_payload = marshaller
            .marshal(&Record::OutportBlock(OutportBlock::default()))
            .unwrap();
        let finalized_payload = marshaller
            .marshal(&Record::FinalizedBlock(FinalizedBlock {
                shard_id: 1,
                header_hash: vec![0xde, 0xad],
            }))
            .unwrap();

        let stream: Vec<(&[u8], &str)> = vec![
            (&block_payload, "SaveBlock"),
            (b"payload", "invalid topic"),
            (b"payload", "SaveAccounts"),
            (&finalized_payload, "FinalizedBlock"),
        ];

        let mut stats = DispatchStatsAggregator::new();
        for (payload, topic) in stream {
            let outcome = match dispatcher.process_payload(payload, topic).await {
                Ok(()) => PayloadOutcome::Processed,
                Err(e) => outcome_of(&e),
            };
            stats.update(topic, outcome, payload.len());
        }

        assert_eq!(stats.total_payloads, 4);
        assert_eq!(stats.processed, 2);
        assert_eq!(stats.unknown_topic, 1);
        assert_eq!(stats.decode_failures, 1);

        let received = received.lock().unwrap();
        assert_eq!(
            *received,
            vec![
                (Topic::SaveBlock, RecordKind::OutportBlock),
                (Topic::FinalizedBlock, RecordKind::FinalizedBlock),
            ]
        );

        let snapshot = dispatcher.metrics();
        assert_eq!(snapshot.processed_count, 2);
        assert_eq!(snapshot.unknown_topic_count, 1);
        assert_eq!(snapshot.decode_failure_count, 1);
        assert_eq!(snapshot.handler_failure_count, 0);
    }

    /// The bincode-configured pipeline behaves identically to the JSON one
    #[tokio::test]
    async fn test_e2e_bincode_pipeline() {
        let config_toml = CONFIG_TOML.replace("\"json\"", "\"bincode\"");
        let config = ConfigLoader::load_from_str(&config_toml, ConfigFormat::Toml).unwrap();
        assert_eq!(config.web_socket.marshaller_type, MarshallerKind::Bincode);

        let marshaller = create_marshaller(config.web_socket.marshaller_type);
        let handler = CollectingHandler::new();
        let received = Arc::clone(&handler.received);
        let dispatcher = create_dispatcher(Arc::clone(&marshaller), handler).unwrap();

        let payload = marshaller
            .marshal(&Record::OutportBlock(OutportBlock {
                shard_id: 2,
                highest_final_block_nonce: 77,
                ..Default::default()
            }))
            .unwrap();

        dispatcher
            .process_payload(&payload, "SaveBlock")
            .await
            .unwrap();
        assert!(dispatcher
            .process_payload(b"payload", "SaveBlock")
            .await
            .is_err());

        assert_eq!(received.lock().unwrap().len(), 1);
    }

    /// Audit-only variant: decode-and-log across the whole topic catalog,
    /// then an idempotent shutdown.
    #[tokio::test]
    async fn test_e2e_audit_dispatcher() {
        let marshaller = create_marshaller(MarshallerKind::Json);
        let dispatcher = create_audit_dispatcher(Arc::clone(&marshaller)).unwrap();

        for topic in Topic::ALL {
            let record = match topic.record_kind() {
                RecordKind::OutportBlock => Record::OutportBlock(Default::default()),
                RecordKind::BlockData => Record::BlockData(Default::default()),
                RecordKind::RoundsInfo => Record::RoundsInfo(Default::default()),
                RecordKind::ValidatorsRating => Record::ValidatorsRating(Default::default()),
                RecordKind::ValidatorsPubKeys => Record::ValidatorsPubKeys(Default::default()),
                RecordKind::Accounts => Record::Accounts(Default::default()),
                RecordKind::FinalizedBlock => Record::FinalizedBlock(Default::default()),
            };
            let payload = marshaller.marshal(&record).unwrap();
            dispatcher
                .process_payload(&payload, topic.as_str())
                .await
                .unwrap();
        }

        assert_eq!(dispatcher.metrics().processed_count, Topic::ALL.len() as u64);

        dispatcher.close().await.unwrap();
        dispatcher.close().await.unwrap();
    }

    /// Handler close is reached exactly once regardless of repeated closes
    #[tokio::test]
    async fn test_e2e_close_reaches_handler_once() {
        let marshaller = create_marshaller(MarshallerKind::Json);
        let handler = CollectingHandler::new();
        let close_count = Arc::clone(&handler.close_count);
        let dispatcher = create_dispatcher(marshaller, handler).unwrap();

        dispatcher.close().await.unwrap();
        dispatcher.close().await.unwrap();
        dispatcher.close().await.unwrap();

        assert_eq!(close_count.load(Ordering::Relaxed), 1);
    }
}
