//! Concurrent detail aggregation.
//!
//! Turns a batch of base entities into enriched records by fanning out one
//! task per entity and, inside it, one task per detail field. Every field
//! fetch runs under its own timeout; the whole batch observes a single
//! deadline/cancellation signal. An entity either completes all of its
//! fields or contributes an error; one entity's failure never blocks the
//! others.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::watch;
use tokio::time::{sleep_until, timeout, Instant};
use uuid::Uuid;

/// An entity that can be enriched with detail fields.
pub trait Enrichable: Clone + Send + Sync + 'static {
    /// Identifier used to report this entity in failure records.
    fn entity_id(&self) -> Uuid;
}

type FetchFn<E> = Arc<dyn Fn(E) -> BoxFuture<'static, anyhow::Result<Value>> + Send + Sync>;

/// One named, independently fetchable attribute of an enriched view.
///
/// The timeout is bound to this field alone and is not derived from the
/// batch deadline.
pub struct DetailField<E> {
    name: &'static str,
    timeout: Duration,
    fetch: FetchFn<E>,
}

impl<E> DetailField<E> {
    /// Create a field from an async fetch function.
    pub fn new<F, Fut>(name: &'static str, timeout: Duration, fetch: F) -> Self
    where
        F: Fn(E) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = anyhow::Result<Value>> + Send + 'static,
    {
        Self {
            name,
            timeout,
            fetch: Arc::new(move |entity| fetch(entity).boxed()),
        }
    }

    /// Field name, used as the key in enriched results.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<E> Clone for DetailField<E> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            timeout: self.timeout,
            fetch: Arc::clone(&self.fetch),
        }
    }
}

impl<E> std::fmt::Debug for DetailField<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailField")
            .field("name", &self.name)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Deadline/cancellation signal shared by one aggregation batch.
///
/// Cheap to clone; all clones observe the same signal. Cancellation stops
/// the joins from waiting, but in-flight field fetches are left to finish
/// detached rather than being aborted.
#[derive(Clone)]
pub struct BatchContext {
    deadline: Option<Instant>,
    cancel_tx: Arc<watch::Sender<bool>>,
}

impl BatchContext {
    /// A context with no deadline; only explicit `cancel` fires it.
    pub fn unbounded() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            deadline: None,
            cancel_tx: Arc::new(tx),
        }
    }

    /// A context that fires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            deadline: Some(Instant::now() + timeout),
            cancel_tx: Arc::new(tx),
        }
    }

    /// Cancel the batch explicitly.
    pub fn cancel(&self) {
        self.cancel_tx.send_replace(true);
    }

    /// Whether the batch has been cancelled or its deadline has passed.
    pub fn is_cancelled(&self) -> bool {
        *self.cancel_tx.borrow()
            || self
                .deadline
                .is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Resolves when the batch is cancelled or the deadline passes.
    ///
    /// Pends forever on an unbounded, never-cancelled context.
    pub async fn cancelled(&self) {
        let mut rx = self.cancel_tx.subscribe();
        let explicit = async move {
            if rx.wait_for(|cancelled| *cancelled).await.is_err() {
                // Sender gone without a cancel; treat as never-cancelled.
                std::future::pending::<()>().await;
            }
        };
        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    () = explicit => {}
                    () = sleep_until(deadline) => {}
                }
            }
            None => explicit.await,
        }
    }
}

impl std::fmt::Debug for BatchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchContext")
            .field("deadline", &self.deadline)
            .field("cancelled", &*self.cancel_tx.borrow())
            .finish()
    }
}

/// Why an entity failed to enrich.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetailError {
    /// The field's fetch function returned an error.
    #[error("field {field} failed: {message}")]
    FieldFailed {
        /// Name of the failing field.
        field: &'static str,
        /// Stringified fetch error.
        message: String,
    },

    /// The field's own timeout elapsed before it produced a value.
    #[error("field {field} timed out after {timeout_ms}ms")]
    FieldTimedOut {
        /// Name of the timed-out field.
        field: &'static str,
        /// The configured per-field timeout.
        timeout_ms: u64,
    },

    /// The batch was cancelled or its deadline passed before the entity's
    /// join completed.
    #[error("batch cancelled before entity completed")]
    BatchCancelled,

    /// The entity's join task itself failed (panicked or was aborted).
    #[error("entity join failed: {0}")]
    Join(String),
}

/// A base entity plus its fetched detail fields.
#[derive(Debug, Clone, Serialize)]
pub struct Enriched<E> {
    /// The base entity, unchanged.
    #[serde(flatten)]
    pub entity: E,
    /// Fetched detail values keyed by field name.
    pub details: BTreeMap<&'static str, Value>,
}

/// One entity's failure record.
#[derive(Debug, Clone)]
pub struct EntityFailure {
    /// Identifier of the failing entity.
    pub entity_id: Uuid,
    /// The first failure cause detected for the entity.
    pub reason: DetailError,
}

/// Outcome of one aggregation batch.
///
/// A non-empty `errors` list is a partial-success condition: `results` is
/// still fully valid and usable.
#[derive(Debug, Clone)]
pub struct AggregationOutcome<E> {
    /// Enriched entities, preserving the input order of successes.
    pub results: Vec<Enriched<E>>,
    /// One record per entity that failed, each enumerated exactly once.
    pub errors: Vec<EntityFailure>,
}

impl<E> AggregationOutcome<E> {
    /// Whether some entities failed while others succeeded.
    pub fn is_partial(&self) -> bool {
        !self.errors.is_empty()
    }

    /// A single aggregate error value summarizing all failures, if any.
    pub fn error_summary(&self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }
        let causes = self
            .errors
            .iter()
            .map(|failure| format!("{}: {}", failure.entity_id, failure.reason))
            .collect::<Vec<_>>()
            .join("; ");
        Some(format!(
            "{} of {} entities failed to enrich: {}",
            self.errors.len(),
            self.errors.len() + self.results.len(),
            causes
        ))
    }
}

/// Fan-out/fan-in aggregator over a fixed set of detail fields.
///
/// The same field set applies to every entity in a batch; per-deployment
/// fetch logic is injected through [`DetailField`].
#[derive(Debug, Clone)]
pub struct DetailAggregator<E> {
    fields: Vec<DetailField<E>>,
}

impl<E: Enrichable> DetailAggregator<E> {
    /// Create an aggregator over the given fields.
    pub fn new(fields: Vec<DetailField<E>>) -> Self {
        Self { fields }
    }

    /// The configured detail fields, in join order.
    pub fn fields(&self) -> &[DetailField<E>] {
        &self.fields
    }

    /// Enrich `entities` concurrently under the batch context.
    ///
    /// Entities are processed independently; `results` preserves the input
    /// order of the entities that succeeded.
    pub async fn aggregate(
        &self,
        entities: Vec<E>,
        ctx: &BatchContext,
    ) -> AggregationOutcome<E> {
        let mut handles = Vec::with_capacity(entities.len());
        for entity in entities {
            let entity_id = entity.entity_id();
            let fields = self.fields.clone();
            let ctx = ctx.clone();
            let handle = tokio::spawn(enrich_entity(entity, fields, ctx));
            handles.push((entity_id, handle));
        }

        let mut results = Vec::with_capacity(handles.len());
        let mut errors = Vec::new();

        // Awaiting in spawn order keeps result construction deterministic;
        // the entity tasks themselves run concurrently.
        for (entity_id, handle) in handles {
            match handle.await {
                Ok(Ok(enriched)) => results.push(enriched),
                Ok(Err(reason)) => {
                    tracing::warn!(%entity_id, %reason, "entity failed to enrich");
                    errors.push(EntityFailure { entity_id, reason });
                }
                Err(join_err) => {
                    tracing::error!(%entity_id, error = %join_err, "entity join task failed");
                    errors.push(EntityFailure {
                        entity_id,
                        reason: DetailError::Join(join_err.to_string()),
                    });
                }
            }
        }

        AggregationOutcome { results, errors }
    }
}

/// Fetch all fields for one entity and join them in declared order.
async fn enrich_entity<E: Enrichable>(
    entity: E,
    fields: Vec<DetailField<E>>,
    ctx: BatchContext,
) -> Result<Enriched<E>, DetailError> {
    // Fan out: every field starts fetching immediately, each under its own
    // timeout.
    let mut pending = Vec::with_capacity(fields.len());
    for field in &fields {
        let fut = (field.fetch)(entity.clone());
        let handle = tokio::spawn(timeout(field.timeout, fut));
        pending.push((field.name, field.timeout, handle));
    }

    // Fan in: join in declared order, racing the batch signal. The first
    // failure wins; completed sibling values are discarded and still-running
    // fetches are detached when their handles drop.
    let mut details = BTreeMap::new();
    for (name, field_timeout, handle) in pending {
        tokio::select! {
            joined = handle => match joined {
                Ok(Ok(Ok(value))) => {
                    details.insert(name, value);
                }
                Ok(Ok(Err(err))) => {
                    return Err(DetailError::FieldFailed {
                        field: name,
                        message: err.to_string(),
                    });
                }
                Ok(Err(_elapsed)) => {
                    return Err(DetailError::FieldTimedOut {
                        field: name,
                        timeout_ms: u64::try_from(field_timeout.as_millis())
                            .unwrap_or(u64::MAX),
                    });
                }
                Err(join_err) => {
                    return Err(DetailError::FieldFailed {
                        field: name,
                        message: format!("fetch task failed: {join_err}"),
                    });
                }
            },
            () = ctx.cancelled() => {
                return Err(DetailError::BatchCancelled);
            }
        }
    }

    Ok(Enriched { entity, details })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Serialize)]
    struct Stub {
        id: Uuid,
    }

    impl Enrichable for Stub {
        fn entity_id(&self) -> Uuid {
            self.id
        }
    }

    fn constant_field(name: &'static str, value: i64) -> DetailField<Stub> {
        DetailField::new(name, Duration::from_millis(100), move |_stub| async move {
            Ok(Value::from(value))
        })
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let aggregator = DetailAggregator::new(vec![constant_field("a", 1)]);
        let outcome = aggregator
            .aggregate(Vec::new(), &BatchContext::unbounded())
            .await;
        assert!(outcome.results.is_empty());
        assert!(outcome.errors.is_empty());
        assert!(!outcome.is_partial());
        assert!(outcome.error_summary().is_none());
    }

    #[tokio::test]
    async fn test_details_keyed_by_field_name() {
        let aggregator =
            DetailAggregator::new(vec![constant_field("a", 1), constant_field("b", 2)]);
        let stub = Stub { id: Uuid::new_v4() };
        let outcome = aggregator
            .aggregate(vec![stub], &BatchContext::unbounded())
            .await;
        assert_eq!(outcome.results.len(), 1);
        let details = &outcome.results[0].details;
        assert_eq!(details["a"], Value::from(1));
        assert_eq!(details["b"], Value::from(2));
    }

    #[tokio::test]
    async fn test_explicit_cancel_fails_entities() {
        let slow = DetailField::new("slow", Duration::from_secs(5), |_stub: Stub| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Value::Null)
        });
        let aggregator = DetailAggregator::new(vec![slow]);
        let ctx = BatchContext::unbounded();
        let cancel_ctx = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            cancel_ctx.cancel();
        });

        let stub = Stub { id: Uuid::new_v4() };
        let outcome = aggregator.aggregate(vec![stub], &ctx).await;
        assert!(outcome.results.is_empty());
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].reason, DetailError::BatchCancelled);
    }

    #[tokio::test]
    async fn test_is_cancelled_after_cancel() {
        let ctx = BatchContext::unbounded();
        assert!(!ctx.is_cancelled());
        ctx.cancel();
        assert!(ctx.is_cancelled());
    }

    #[tokio::test]
    async fn test_error_summary_mentions_field() {
        let failing = DetailField::new("broken", Duration::from_millis(100), |_stub: Stub| {
            async { anyhow::bail!("backend unavailable") }
        });
        let aggregator = DetailAggregator::new(vec![failing]);
        let stub = Stub { id: Uuid::new_v4() };
        let outcome = aggregator
            .aggregate(vec![stub], &BatchContext::unbounded())
            .await;
        let summary = outcome.error_summary().expect("should have a summary");
        assert!(summary.contains("broken"));
        assert!(summary.contains("1 of 1"));
    }
}
