//! Dispatcher - decode-and-dispatch core for outport payloads

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use contracts::{Marshaller, RecordHandler, Topic};

use crate::error::DispatcherError;
use crate::handlers::AuditHandler;
use crate::metrics::{DispatchMetrics, DispatchSnapshot};

/// Builder for creating a Dispatcher
///
/// The marshaller is the one dependency that can legitimately be absent at
/// build time (it is selected by configuration), so [`build`] validates it
/// and fails with [`DispatcherError::InvalidDependency`] when unset.
///
/// [`build`]: DispatcherBuilder::build
pub struct DispatcherBuilder<H> {
    marshaller: Option<Arc<dyn Marshaller>>,
    handler: H,
}

impl<H: RecordHandler + Sync> DispatcherBuilder<H> {
    /// Create a new DispatcherBuilder around the post-decode handler
    pub fn new(handler: H) -> Self {
        Self {
            marshaller: None,
            handler,
        }
    }

    /// Set the shared payload marshaller
    pub fn marshaller(mut self, marshaller: Arc<dyn Marshaller>) -> Self {
        self.marshaller = Some(marshaller);
        self
    }

    /// Validate dependencies and build the dispatcher
    pub fn build(self) -> Result<Dispatcher<H>, DispatcherError> {
        let marshaller = self
            .marshaller
            .ok_or(DispatcherError::InvalidDependency("marshaller"))?;

        info!(
            codec = marshaller.name(),
            handler = self.handler.name(),
            topics = Topic::ALL.len(),
            "Dispatcher created"
        );

        Ok(Dispatcher {
            marshaller,
            handler: self.handler,
            metrics: DispatchMetrics::new(),
            closed: AtomicBool::new(false),
        })
    }
}

/// The topic-keyed payload dispatcher.
///
/// Routes each `(payload, topic)` pair delivered by the transport layer to
/// the decode target of its topic, then hands the decoded record to the
/// injected [`RecordHandler`]. Stateless after construction: the topic
/// registry is the exhaustive [`Topic::record_kind`] match, so concurrent
/// [`process_payload`] calls need no locking. The injected marshaller and
/// handler must tolerate concurrent invocation themselves.
///
/// [`process_payload`]: Dispatcher::process_payload
pub struct Dispatcher<H> {
    marshaller: Arc<dyn Marshaller>,
    handler: H,
    metrics: DispatchMetrics,
    closed: AtomicBool,
}

impl<H: RecordHandler + Sync> Dispatcher<H> {
    /// Process one received payload.
    ///
    /// Single atomic attempt: no retry, no partial side effect. The handler
    /// runs only after a successful decode; every failure path returns a
    /// typed error immediately. Redelivery policy belongs to the transport
    /// layer.
    #[instrument(
        name = "dispatcher_process_payload",
        skip(self, payload),
        fields(bytes = payload.len())
    )]
    pub async fn process_payload(&self, payload: &[u8], topic: &str) -> Result<(), DispatcherError> {
        let Some(known) = Topic::parse(topic) else {
            self.metrics.inc_unknown_topic();
            warn!(topic, "Unknown topic, payload rejected");
            return Err(DispatcherError::unknown_topic(topic, payload));
        };

        let record = self
            .marshaller
            .unmarshal(known.record_kind(), payload)
            .map_err(|source| {
                self.metrics.inc_decode_failure();
                DispatcherError::DecodeFailure {
                    topic: known,
                    bytes_len: payload.len(),
                    source,
                }
            })?;

        self.handler
            .handle(known, &record)
            .await
            .map_err(|source| {
                self.metrics.inc_handler_failure();
                DispatcherError::HandlerFailure {
                    handler: self.handler.name().to_string(),
                    topic: known,
                    source,
                }
            })?;

        self.metrics.inc_processed();
        debug!(topic = %known, "Payload processed");
        Ok(())
    }

    /// Close the dispatcher.
    ///
    /// Idempotent: only the first call reaches the handler's teardown,
    /// every later call is a no-op returning `Ok`. Safe concurrently with
    /// in-flight [`process_payload`] calls.
    ///
    /// [`process_payload`]: Dispatcher::process_payload
    #[instrument(name = "dispatcher_close", skip(self))]
    pub async fn close(&self) -> Result<(), DispatcherError> {
        if self.closed.swap(true, Ordering::SeqCst) {
            debug!("Dispatcher already closed");
            return Ok(());
        }

        self.handler
            .close()
            .await
            .map_err(|source| DispatcherError::CloseFailure {
                handler: self.handler.name().to_string(),
                source,
            })?;

        info!("Dispatcher closed");
        Ok(())
    }

    /// Get a snapshot of the dispatch counters
    pub fn metrics(&self) -> DispatchSnapshot {
        self.metrics.snapshot()
    }
}

/// Convenience function to create a dispatcher from its two collaborators
pub fn create_dispatcher<H: RecordHandler + Sync>(
    marshaller: Arc<dyn Marshaller>,
    handler: H,
) -> Result<Dispatcher<H>, DispatcherError> {
    DispatcherBuilder::new(handler).marshaller(marshaller).build()
}

/// Create the audit-only dispatcher variant: decode-and-log, no downstream
/// side effect. Used in integration/demo environments without a real
/// persistence backend.
pub fn create_audit_dispatcher(
    marshaller: Arc<dyn Marshaller>,
) -> Result<Dispatcher<AuditHandler>, DispatcherError> {
    create_dispatcher(marshaller, AuditHandler::new("audit"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use codec::JsonMarshaller;
    use contracts::{
        Accounts, BlockData, ContractError, FinalizedBlock, OutportBlock, Record, RecordKind,
        RoundsInfo, ValidatorsPubKeys, ValidatorsRating,
    };
    use std::sync::atomic::AtomicU64;
    use std::sync::Mutex;

    /// Counting handler for assertions, optionally failing every call
    struct CountingHandler {
        name: String,
        handled: Arc<AtomicU64>,
        closed: Arc<AtomicU64>,
        last_topic: Arc<Mutex<Option<Topic>>>,
        should_fail: bool,
    }

    impl CountingHandler {
        fn new() -> Self {
            Self {
                name: "counting".to_string(),
                handled: Arc::new(AtomicU64::new(0)),
                closed: Arc::new(AtomicU64::new(0)),
                last_topic: Arc::new(Mutex::new(None)),
                should_fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                should_fail: true,
                ..Self::new()
            }
        }
    }

    impl RecordHandler for CountingHandler {
        fn name(&self) -> &str {
            &self.name
        }

        async fn handle(&self, topic: Topic, _record: &Record) -> Result<(), ContractError> {
            if self.should_fail {
                return Err(ContractError::handler(&self.name, "mock failure"));
            }
            self.handled.fetch_add(1, Ordering::Relaxed);
            *self.last_topic.lock().unwrap() = Some(topic);
            Ok(())
        }

        async fn close(&self) -> Result<(), ContractError> {
            self.closed.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }
    }

    fn sample_record(kind: RecordKind) -> Record {
        match kind {
            RecordKind::OutportBlock => Record::OutportBlock(OutportBlock::default()),
            RecordKind::BlockData => Record::BlockData(BlockData::default()),
            RecordKind::RoundsInfo => Record::RoundsInfo(RoundsInfo::default()),
            RecordKind::ValidatorsRating => Record::ValidatorsRating(ValidatorsRating::default()),
            RecordKind::ValidatorsPubKeys => {
                Record::ValidatorsPubKeys(ValidatorsPubKeys::default())
            }
            RecordKind::Accounts => Record::Accounts(Accounts::default()),
            RecordKind::FinalizedBlock => Record::FinalizedBlock(FinalizedBlock::default()),
        }
    }

    fn marshaller() -> Arc<dyn Marshaller> {
        Arc::new(JsonMarshaller::new())
    }

    #[test]
    fn test_build_without_marshaller_fails() {
        let result = DispatcherBuilder::new(CountingHandler::new()).build();
        assert!(matches!(
            result,
            Err(DispatcherError::InvalidDependency("marshaller"))
        ));
    }

    #[tokio::test]
    async fn test_unknown_topic() {
        let handler = CountingHandler::new();
        let handled = Arc::clone(&handler.handled);
        let dispatcher = create_dispatcher(marshaller(), handler).unwrap();

        let err = dispatcher
            .process_payload(b"payload", "invalid topic")
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("invalid topic"), "got: {message}");
        assert!(message.contains("payload"), "got: {message}");
        assert_eq!(handled.load(Ordering::Relaxed), 0);
        assert_eq!(dispatcher.metrics().unknown_topic_count, 1);
    }

    #[tokio::test]
    async fn test_decode_failure_skips_handler() {
        let handler = CountingHandler::new();
        let handled = Arc::clone(&handler.handled);
        let dispatcher = create_dispatcher(marshaller(), handler).unwrap();

        let err = dispatcher
            .process_payload(b"payload", "SaveAccounts")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DispatcherError::DecodeFailure {
                topic: Topic::SaveAccounts,
                bytes_len: 7,
                ..
            }
        ));
        assert_eq!(handled.load(Ordering::Relaxed), 0);
        assert_eq!(dispatcher.metrics().decode_failure_count, 1);
        assert_eq!(dispatcher.metrics().processed_count, 0);
    }

    #[tokio::test]
    async fn test_save_block_success() {
        let handler = CountingHandler::new();
        let handled = Arc::clone(&handler.handled);
        let last_topic = Arc::clone(&handler.last_topic);
        let marshaller = marshaller();
        let dispatcher = create_dispatcher(Arc::clone(&marshaller), handler).unwrap();

        let payload = marshaller
            .marshal(&Record::OutportBlock(OutportBlock::default()))
            .unwrap();

        dispatcher
            .process_payload(&payload, "SaveBlock")
            .await
            .unwrap();

        assert_eq!(handled.load(Ordering::Relaxed), 1);
        assert_eq!(*last_topic.lock().unwrap(), Some(Topic::SaveBlock));
        assert_eq!(dispatcher.metrics().processed_count, 1);
    }

    #[tokio::test]
    async fn test_every_known_topic_dispatches() {
        let handler = CountingHandler::new();
        let handled = Arc::clone(&handler.handled);
        let marshaller = marshaller();
        let dispatcher = create_dispatcher(Arc::clone(&marshaller), handler).unwrap();

        for topic in Topic::ALL {
            let payload = marshaller
                .marshal(&sample_record(topic.record_kind()))
                .unwrap();
            dispatcher
                .process_payload(&payload, topic.as_str())
                .await
                .unwrap();
        }

        assert_eq!(handled.load(Ordering::Relaxed), Topic::ALL.len() as u64);
    }

    #[tokio::test]
    async fn test_handler_failure_propagates() {
        let handler = CountingHandler::failing();
        let handled = Arc::clone(&handler.handled);
        let marshaller = marshaller();
        let dispatcher = create_dispatcher(Arc::clone(&marshaller), handler).unwrap();

        let payload = marshaller
            .marshal(&Record::FinalizedBlock(FinalizedBlock::default()))
            .unwrap();

        let err = dispatcher
            .process_payload(&payload, "FinalizedBlock")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DispatcherError::HandlerFailure {
                topic: Topic::FinalizedBlock,
                ..
            }
        ));
        assert_eq!(handled.load(Ordering::Relaxed), 0);
        assert_eq!(dispatcher.metrics().handler_failure_count, 1);
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let handler = CountingHandler::new();
        let closed = Arc::clone(&handler.closed);
        let dispatcher = create_dispatcher(marshaller(), handler).unwrap();

        dispatcher.close().await.unwrap();
        dispatcher.close().await.unwrap();

        // Only the first close reaches the handler
        assert_eq!(closed.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_close_without_processing() {
        let dispatcher = create_audit_dispatcher(marshaller()).unwrap();
        dispatcher.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_concurrent_processing() {
        let handler = CountingHandler::new();
        let handled = Arc::clone(&handler.handled);
        let marshaller = marshaller();
        let dispatcher = Arc::new(create_dispatcher(Arc::clone(&marshaller), handler).unwrap());

        let payload = Arc::new(
            marshaller
                .marshal(&Record::OutportBlock(OutportBlock::default()))
                .unwrap(),
        );

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let dispatcher = Arc::clone(&dispatcher);
            let payload = Arc::clone(&payload);
            tasks.push(tokio::spawn(async move {
                dispatcher.process_payload(&payload, "SaveBlock").await
            }));
        }

        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(handled.load(Ordering::Relaxed), 8);
        assert_eq!(dispatcher.metrics().processed_count, 8);
    }
}
