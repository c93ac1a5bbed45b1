//! The sync engine.

use crate::config::ServiceConfig;
use crate::environment::Environment;
use crate::error::{SyncError, SyncResult};
use crate::metadata::{plan_metadata_sync, MetadataPlan};
use crate::outcome::{Completion, NetworkOutcome, StatusCompletion, TransportStatus};
use crate::transport::{HttpMethod, HttpRequest, HttpTransport};
use pushlink_protocol::{
    DeviceId, DeviceResponse, DeviceToken, EventType, InterestsRequest, PublishId, Reason,
    RegisterRequest, TrackRequest, WirePayload,
};
use pushlink_store::{MetadataStore, StoreError};
use serde_json::Value;
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, info, warn};

/// Management of the device's interest set.
///
/// Completions receive no domain value; callers tell outcomes apart by the
/// transport status alone.
pub trait InterestManager {
    /// Activates the device for delivery. Does not touch interests.
    fn subscribe<F>(&self, completion: F)
    where
        F: FnOnce(StatusCompletion);

    /// Replaces the whole interest set. An empty slice clears it.
    fn set_interests<F>(&self, interests: &[String], completion: F)
    where
        F: FnOnce(StatusCompletion);

    /// Deactivates the device entirely.
    fn unsubscribe<F>(&self, completion: F)
    where
        F: FnOnce(StatusCompletion);

    /// Clears every interest; same request as `set_interests(&[])`.
    fn unsubscribe_all<F>(&self, completion: F)
    where
        F: FnOnce(StatusCompletion),
    {
        self.set_interests(&[], completion)
    }
}

/// The sync engine keeps one device consistent with the notification service.
///
/// An engine is bound to one service URL. Each operation issues at most one
/// exchange and invokes its completion exactly once, on the thread the
/// transport returned on. The engine does no locking of its own: callers
/// must serialize concurrent [`SyncEngine::sync_metadata`] calls that share
/// a store, otherwise both may send and the last write wins.
pub struct SyncEngine<T: HttpTransport, S: MetadataStore, E: Environment> {
    config: ServiceConfig,
    transport: Arc<T>,
    store: Arc<S>,
    environment: Arc<E>,
}

impl<T: HttpTransport, S: MetadataStore, E: Environment> SyncEngine<T, S, E> {
    /// Creates a new sync engine.
    pub fn new(config: ServiceConfig, transport: T, store: S, environment: E) -> Self {
        Self::from_shared(config, Arc::new(transport), Arc::new(store), Arc::new(environment))
    }

    /// Creates a sync engine from handles shared with the embedding application.
    pub fn from_shared(
        config: ServiceConfig,
        transport: Arc<T>,
        store: Arc<S>,
        environment: Arc<E>,
    ) -> Self {
        Self {
            config,
            transport,
            store,
            environment,
        }
    }

    /// Returns an engine for another URL sharing this engine's transport,
    /// store and environment.
    pub fn with_url(&self, url: impl Into<String>) -> Self {
        Self {
            config: self.config.clone().with_url(url),
            transport: Arc::clone(&self.transport),
            store: Arc::clone(&self.store),
            environment: Arc::clone(&self.environment),
        }
    }

    /// Gets the configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Gets the transport.
    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Gets the metadata store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Registers the device and reports the identity the service assigned.
    ///
    /// The request carries the hex-encoded token, the instance id, the host
    /// bundle identifier (empty if unknown) and the current metadata. The
    /// metadata is not persisted; that is [`SyncEngine::sync_metadata`]'s job.
    pub fn register<F>(&self, token: &DeviceToken, instance_id: &str, completion: F)
    where
        F: FnOnce(Completion<DeviceId>),
    {
        completion(self.register_device(token, instance_id));
    }

    /// Reports a delivery/open event for an inbound notification.
    ///
    /// Aborts without a network call if the payload has no publish id.
    pub fn track<F>(&self, payload: &Value, event_type: EventType, device_id: &str, completion: F)
    where
        F: FnOnce(StatusCompletion),
    {
        completion(self.track_event(payload, event_type, device_id));
    }

    /// Sends the current metadata if it differs from the last synced snapshot.
    ///
    /// Completes with [`Completion::Unchanged`] when nothing needs sending.
    /// The stored snapshot is replaced only after the service accepts the new
    /// one, so a failed attempt is retried with the same payload next time.
    pub fn sync_metadata<F>(&self, completion: F)
    where
        F: FnOnce(StatusCompletion),
    {
        completion(self.sync_metadata_once());
    }

    fn register_device(&self, token: &DeviceToken, instance_id: &str) -> Completion<DeviceId> {
        if token.is_empty() {
            return aborted(SyncError::EmptyToken);
        }

        let bundle_identifier = self.environment.bundle_identifier().unwrap_or_default();
        let request = RegisterRequest::new(
            token,
            instance_id,
            bundle_identifier,
            self.environment.metadata(),
        );
        let body = match encode(&request) {
            Ok(body) => body,
            Err(error) => return aborted(error),
        };

        match self.exchange(HttpMethod::Post, Some(body)) {
            NetworkOutcome::Success { body, status } => match DeviceResponse::decode(&body) {
                Ok(device) => {
                    info!(device_id = %device.id, "device registered");
                    Completion::Completed {
                        value: Some(device.id),
                        status,
                    }
                }
                Err(e) => {
                    warn!(error = %e, "registration accepted but device id unreadable");
                    Completion::Aborted {
                        error: SyncError::Decode(e),
                        status: Some(status),
                    }
                }
            },
            NetworkOutcome::Failure { body, status } => {
                log_rejection("register", &body, &status);
                Completion::Completed {
                    value: None,
                    status,
                }
            }
        }
    }

    fn track_event(
        &self,
        payload: &Value,
        event_type: EventType,
        device_id: &str,
    ) -> StatusCompletion {
        let publish_id = match PublishId::from_payload(payload) {
            Ok(id) => id,
            Err(e) => {
                debug!(error = %e, "not tracking notification without publish id");
                return aborted(SyncError::MissingPublishId);
            }
        };

        let request = TrackRequest {
            publish_id,
            timestamp_secs: now_secs(),
            event_type,
            device_id: device_id.to_string(),
        };
        match encode(&request) {
            Ok(body) => self.status_only("track", HttpMethod::Post, Some(body)),
            Err(error) => aborted(error),
        }
    }

    fn sync_metadata_once(&self) -> StatusCompletion {
        let prior = match self.store.load() {
            Ok(prior) => prior,
            Err(StoreError::Corrupted(detail)) => {
                warn!(%detail, "last synced metadata unreadable, resending");
                None
            }
            Err(e) => {
                warn!(error = %e, "could not load last synced metadata");
                return aborted(e.into());
            }
        };

        let snapshot = match plan_metadata_sync(prior.as_ref(), self.environment.metadata()) {
            MetadataPlan::Unchanged => {
                debug!("metadata unchanged, nothing to sync");
                return Completion::Unchanged;
            }
            MetadataPlan::Sync(snapshot) => snapshot,
        };

        let body = match encode(&snapshot) {
            Ok(body) => body,
            Err(error) => return aborted(error),
        };

        match self.exchange(HttpMethod::Put, Some(body)) {
            NetworkOutcome::Success { status, .. } => match self.store.save(&snapshot) {
                Ok(()) => {
                    info!(attributes = snapshot.len(), "metadata synced");
                    StatusCompletion::from_status(status)
                }
                Err(e) => {
                    warn!(error = %e, "metadata accepted but snapshot not persisted");
                    Completion::Aborted {
                        error: e.into(),
                        status: Some(status),
                    }
                }
            },
            NetworkOutcome::Failure { body, status } => {
                log_rejection("sync metadata", &body, &status);
                StatusCompletion::from_status(status)
            }
        }
    }

    fn status_only(
        &self,
        operation: &str,
        method: HttpMethod,
        body: Option<Vec<u8>>,
    ) -> StatusCompletion {
        match self.exchange(method, body) {
            NetworkOutcome::Success { status, .. } => StatusCompletion::from_status(status),
            NetworkOutcome::Failure { body, status } => {
                log_rejection(operation, &body, &status);
                StatusCompletion::from_status(status)
            }
        }
    }

    fn exchange(&self, method: HttpMethod, body: Option<Vec<u8>>) -> NetworkOutcome {
        let request = HttpRequest::new(method, self.config.url.as_str(), body);
        debug!(%method, url = %request.url, "sending request");

        let outcome = NetworkOutcome::classify(self.transport.execute(&request));
        debug!(
            %method,
            code = ?outcome.status().code,
            success = outcome.is_success(),
            "request finished"
        );
        outcome
    }
}

impl<T: HttpTransport, S: MetadataStore, E: Environment> InterestManager for SyncEngine<T, S, E> {
    fn subscribe<F>(&self, completion: F)
    where
        F: FnOnce(StatusCompletion),
    {
        completion(self.status_only("subscribe", HttpMethod::Post, None));
    }

    fn set_interests<F>(&self, interests: &[String], completion: F)
    where
        F: FnOnce(StatusCompletion),
    {
        let result = match encode(&InterestsRequest::new(interests.iter().cloned())) {
            Ok(body) => self.status_only("set interests", HttpMethod::Put, Some(body)),
            Err(error) => aborted(error),
        };
        completion(result);
    }

    fn unsubscribe<F>(&self, completion: F)
    where
        F: FnOnce(StatusCompletion),
    {
        completion(self.status_only("unsubscribe", HttpMethod::Delete, None));
    }
}

fn aborted<V>(error: SyncError) -> Completion<V> {
    Completion::Aborted {
        error,
        status: None,
    }
}

fn encode<P: WirePayload>(payload: &P) -> SyncResult<Vec<u8>> {
    payload.encode().map_err(SyncError::Encode)
}

/// Logs the service's rejection reason if the body carries one.
fn log_rejection(operation: &str, body: &[u8], status: &TransportStatus) {
    match Reason::decode(body) {
        Ok(reason) => warn!(operation, code = ?status.code, %reason, "request rejected"),
        Err(_) => warn!(
            operation,
            code = ?status.code,
            transport_error = status.transport_error.as_deref().unwrap_or(""),
            "request failed"
        ),
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
