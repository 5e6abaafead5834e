//! Service facades.
//!
//! A facade owns the REST and SOAP adapters of one service and routes every operation through
//! the active one. Responses of idempotent operations are cached as raw HTTP messages, so a
//! cache hit is decoded exactly like a fresh response.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use typed_builder::TypedBuilder;

use crate::adapter::{default_version, AdapterSettings, ApiMode};
use crate::cache::CacheStore;
use crate::credentials::ApiKey;
use crate::http::{HttpRequest, HttpResponse, ToHttpString};
use crate::transport::{HttpClient, PendingRequests, ReqwestClient};
use crate::wire::{to_wire_json, Serializable, Service};
use crate::{PostNLError, PostNLResult};

mod barcode;
mod confirming;
mod delivery_date;
mod labelling;
mod location;
mod shipping_status;
mod timeframe;

pub use barcode::BarcodeService;
pub use confirming::ConfirmingService;
pub use delivery_date::DeliveryDateService;
pub use labelling::LabellingService;
pub use location::LocationService;
pub use shipping_status::ShippingStatusService;
pub use timeframe::TimeframeService;

/// Configuration shared by the service facades.
///
/// ## Example
///
/// ```rust
/// use postnl_rs::{ApiMode, MemoryCache, ServiceConfig};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let config = ServiceConfig::builder()
///     .api_key("my-api-key")
///     .sandbox(true)
///     .mode(ApiMode::Soap)
///     .cache(Arc::new(MemoryCache::new()))
///     .ttl(Duration::from_secs(600))
///     .build();
/// assert!(config.sandbox);
/// ```
#[derive(Clone, TypedBuilder)]
pub struct ServiceConfig {
    /// The API key
    #[builder(setter(transform = |key: &str| ApiKey::new(key)))]
    pub api_key: ApiKey,
    /// Whether requests go to the sandbox
    #[builder(default = false)]
    pub sandbox: bool,
    /// The initial wire protocol
    #[builder(default)]
    pub mode: ApiMode,
    /// The HTTP collaborator
    #[builder(default = Arc::new(ReqwestClient::default()))]
    pub http_client: Arc<dyn HttpClient>,
    /// Store for raw responses; caching is off without one
    #[builder(default, setter(strip_option))]
    pub cache: Option<Arc<dyn CacheStore>>,
    /// Lifetime of cached responses; `None` keeps them until the store evicts them
    #[builder(default, setter(strip_option))]
    pub ttl: Option<Duration>,
    /// API version overriding the per-service default
    #[builder(default, setter(transform = |version: &str| Some(version.to_string())))]
    pub version: Option<String>,
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("api_key", &self.api_key)
            .field("sandbox", &self.sandbox)
            .field("mode", &self.mode)
            .field("cache", &self.cache.is_some())
            .field("ttl", &self.ttl)
            .field("version", &self.version)
            .finish()
    }
}

impl ServiceConfig {
    /// Adapter settings for `service`.
    pub fn settings(&self, service: Service) -> AdapterSettings {
        AdapterSettings {
            api_key: self.api_key.clone(),
            sandbox: self.sandbox,
            version: self
                .version
                .clone()
                .unwrap_or_else(|| default_version(service).to_string()),
        }
    }

    /// Dispatches one request, consulting and filling the cache under `cache_key`.
    pub(crate) async fn call<T>(
        &self,
        operation: &'static str,
        cache_key: Option<String>,
        build: impl FnOnce() -> PostNLResult<HttpRequest>,
        decode: impl Fn(&HttpResponse) -> PostNLResult<T>,
    ) -> PostNLResult<T> {
        if let Some(cached) = self.cached_response(cache_key.as_deref()).await {
            return map_failure(operation, &cached, decode(&cached));
        }

        let request = build()?;
        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.http_client.do_request(request).await?;
        let result = map_failure(operation, &response, decode(&response));
        if let (Ok(_), Some(key)) = (&result, &cache_key) {
            self.store(key, &response, false).await;
        }
        result
    }

    /// Dispatches every cache miss of `requests` as one concurrent wave.
    ///
    /// `requests` are `(id, cache key, request)` triples; the result holds one entry per id.
    /// An id given more than once is not sent and maps to `InvalidArgument`.
    /// New responses are saved deferred and committed once after the wave.
    pub(crate) async fn batch<Q: ?Sized, T>(
        &self,
        operation: &'static str,
        requests: Vec<(String, Option<String>, &Q)>,
        build: impl Fn(&Q) -> PostNLResult<HttpRequest>,
        decode: impl Fn(&HttpResponse) -> PostNLResult<T>,
    ) -> BTreeMap<String, PostNLResult<T>> {
        let mut results = BTreeMap::new();
        let mut pending = PendingRequests::new();
        let mut keys = BTreeMap::new();

        let mut occurrences = BTreeMap::<String, usize>::new();
        for (id, _, _) in &requests {
            *occurrences.entry(id.clone()).or_default() += 1;
        }

        for (id, cache_key, request) in requests {
            if occurrences.get(&id).is_some_and(|count| *count > 1) {
                tracing::warn!(operation, id = %id, "duplicate batch id");
                let error = PostNLError::InvalidArgument(format!("duplicate batch id {id}"));
                results.insert(id, Err(error));
                continue;
            }
            if let Some(cached) = self.cached_response(cache_key.as_deref()).await {
                results.insert(id, map_failure(operation, &cached, decode(&cached)));
                continue;
            }
            match build(request) {
                Ok(request) => {
                    pending.add_or_update(id.clone(), request);
                    keys.insert(id, cache_key);
                }
                Err(error) => {
                    results.insert(id, Err(error));
                }
            }
        }
        if pending.is_empty() {
            return results;
        }

        tracing::debug!(count = pending.len(), "sending batch");
        let mut saved = false;
        for (id, response) in self.http_client.do_requests(pending).await {
            let result = match response {
                Ok(response) => {
                    let result = map_failure(operation, &response, decode(&response));
                    if let (Ok(_), Some(Some(key))) = (&result, keys.get(&id)) {
                        saved |= self.store(key, &response, true).await;
                    }
                    result
                }
                Err(error) => Err(error),
            };
            results.insert(id, result);
        }

        if saved {
            if let Some(cache) = &self.cache {
                if let Err(error) = cache.commit().await {
                    tracing::warn!(%error, "failed to commit cached responses");
                }
            }
        }
        results
    }

    async fn cached_response(&self, key: Option<&str>) -> Option<HttpResponse> {
        let (cache, key) = (self.cache.as_ref()?, key?);
        match cache.get(key).await {
            Ok(Some(raw)) => match HttpResponse::parse_http_string(&raw) {
                Ok(response) => {
                    tracing::debug!(key, "cache hit");
                    Some(response)
                }
                Err(error) => {
                    tracing::warn!(key, %error, "skipping corrupt cache entry");
                    None
                }
            },
            Ok(None) => {
                tracing::debug!(key, "cache miss");
                None
            }
            Err(error) => {
                tracing::warn!(key, %error, "cache lookup failed");
                None
            }
        }
    }

    /// Saves a successful response. Failures are logged, never returned.
    async fn store(&self, key: &str, response: &HttpResponse, deferred: bool) -> bool {
        let Some(cache) = &self.cache else {
            return false;
        };
        if response.status != 200 {
            return false;
        }
        let value = response.to_http_string();
        let outcome = if deferred {
            cache.save_deferred(key, value, self.ttl).await
        } else {
            cache.save(key, value, self.ttl).await
        };
        match outcome {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(key, %error, "failed to cache response");
                false
            }
        }
    }
}

/// Reports undecodable bodies as `Response` for HTTP 200 and as `NotFound` otherwise.
///
/// API errors the adapter already classified (`Response` with a non-200 status, `NotFound`)
/// pass through with their message.
fn map_failure<T>(
    operation: &str,
    response: &HttpResponse,
    result: PostNLResult<T>,
) -> PostNLResult<T> {
    match result {
        Err(error) if error.is_decode_failure() => {
            tracing::debug!(operation, status = response.status, %error, "undecodable response");
            if response.status == 200 {
                Err(PostNLError::Response {
                    message: error.to_string(),
                    status: Some(200),
                })
            } else {
                Err(PostNLError::NotFound(format!(
                    "Unable to {}",
                    operation.replace('_', " ")
                )))
            }
        }
        other => other,
    }
}

/// Fingerprint of a request: `postnl.<operation>.<md5>`.
///
/// The caller-supplied `id` identifies the request when given; otherwise its wire form
/// without the volatile `Message` does. `discriminator` separates variants of an operation.
pub(crate) fn cache_key(
    operation: &str,
    service: Service,
    request: &dyn Serializable,
    id: Option<&str>,
    mode: ApiMode,
    discriminator: &str,
) -> String {
    let identity = match id {
        Some(id) => id.to_string(),
        None => {
            let mut wire = to_wire_json(request, service);
            wire.remove("Message");
            Value::Object(wire).to_string()
        }
    };
    let digest = md5::compute(format!("{identity}|{mode:?}|{discriminator}"));
    format!("postnl.{operation}.{digest:x}")
}

/// Key of the `index`th request of a batch: its id, or `#<index>` without one.
pub(crate) fn batch_id(id: Option<&str>, index: usize) -> String {
    id.map_or_else(|| format!("#{index}"), str::to_string)
}

/// Implements construction and mode switching for a facade with a REST and a SOAP adapter.
macro_rules! dual_mode_service {
    ($service:ident, $kind:expr, $adapter:ident, $rest:ident, $soap:ident) => {
        impl $service {
            /// Creates the service from a shared configuration.
            pub fn new(config: $crate::service::ServiceConfig) -> Self {
                let settings = config.settings($kind);
                $service {
                    mode: config.mode,
                    rest: $rest::new(settings.clone()),
                    soap: $soap::new(settings),
                    config,
                }
            }

            /// The active wire protocol.
            pub fn api_mode(&self) -> $crate::adapter::ApiMode {
                self.mode
            }

            /// Switches the wire protocol. Configuration is kept.
            pub fn set_api_mode(&mut self, mode: $crate::adapter::ApiMode) {
                tracing::debug!(service = %$kind, ?mode, "switching API mode");
                self.mode = mode;
            }

            /// The adapter of the active wire protocol.
            pub fn adapter(&self) -> &dyn $adapter {
                match self.mode {
                    $crate::adapter::ApiMode::Rest => &self.rest,
                    $crate::adapter::ApiMode::Soap => &self.soap,
                }
            }
        }
    };
}

pub(crate) use dual_mode_service;
