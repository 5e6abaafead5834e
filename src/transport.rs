use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use typed_builder::TypedBuilder;

use crate::http::{HttpRequest, HttpResponse};
use crate::{PostNLError, PostNLResult};

/// A keyed set of requests waiting to be dispatched as one batch.
#[derive(Debug, Clone, Default)]
pub struct PendingRequests {
    inner: BTreeMap<String, HttpRequest>,
}

impl PendingRequests {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a request, replacing any request already queued under `id`.
    pub fn add_or_update(&mut self, id: impl Into<String>, request: HttpRequest) {
        self.inner.insert(id.into(), request);
    }

    /// Removes a queued request.
    pub fn remove(&mut self, id: &str) -> Option<HttpRequest> {
        self.inner.remove(id)
    }

    /// Number of queued requests.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns whether the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl IntoIterator for PendingRequests {
    type Item = (String, HttpRequest);
    type IntoIter = std::collections::btree_map::IntoIter<String, HttpRequest>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

/// The HTTP collaborator used by every service.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Dispatches a single request.
    async fn do_request(&self, request: HttpRequest) -> PostNLResult<HttpResponse>;

    /// Dispatches a batch of requests concurrently and waits for all of them.
    ///
    /// Every key of the batch is present in the result; a failure of one request does not
    /// affect the others.
    async fn do_requests(
        &self,
        requests: PendingRequests,
    ) -> BTreeMap<String, PostNLResult<HttpResponse>> {
        let futures = requests.into_iter().map(|(id, request)| async move {
            let result = self.do_request(request).await;
            (id, result)
        });
        join_all(futures).await.into_iter().collect()
    }
}

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(20);
const DEFAULT_MAX_RETRIES: u32 = 1;

/// The internal builder for constructing a `ReqwestClient`
#[derive(TypedBuilder)]
#[builder(build_method(into = PostNLResult<ReqwestClient>))]
pub struct InternalReqwestClient {
    /// Timeout for the whole request
    #[builder(default = DEFAULT_TIMEOUT)]
    timeout: Duration,
    /// Timeout for establishing the connection
    #[builder(default = DEFAULT_CONNECT_TIMEOUT)]
    connect_timeout: Duration,
    /// How often a request is retried after a connection error or a 5xx response
    #[builder(default = DEFAULT_MAX_RETRIES)]
    max_retries: u32,
    /// Allow unsafe SSL certificates
    #[builder(default = false)]
    allow_insecure: bool,
}

/// [`HttpClient`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
    timeout: Duration,
    connect_timeout: Duration,
    max_retries: u32,
}

impl From<InternalReqwestClient> for PostNLResult<ReqwestClient> {
    fn from(config: InternalReqwestClient) -> Self {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.allow_insecure)
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(ReqwestClient {
            client,
            timeout: config.timeout,
            connect_timeout: config.connect_timeout,
            max_retries: config.max_retries,
        })
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .unwrap_or_else(|error| {
                tracing::warn!(%error, "falling back to a reqwest client without timeouts");
                reqwest::Client::new()
            });

        ReqwestClient {
            client,
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl ReqwestClient {
    /// Creates a builder for the client
    pub fn builder() -> InternalReqwestClientBuilder {
        InternalReqwestClient::builder()
    }

    /// Timeout for the whole request.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Timeout for establishing the connection.
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// How often a failed request is retried.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    fn to_reqwest(&self, request: &HttpRequest) -> PostNLResult<reqwest::Request> {
        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| PostNLError::InvalidArgument(format!("invalid header name `{name}`")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| PostNLError::InvalidArgument(format!("invalid value for header `{name}`")))?;
            headers.append(name, value);
        }

        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone())
            .headers(headers);
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }
        Ok(builder.build()?)
    }

    async fn into_response(response: reqwest::Response) -> PostNLResult<HttpResponse> {
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect::<Vec<_>>();
        let charset = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(charset_of)
            .map(str::to_string);
        let bytes = response.bytes().await?;

        Ok(HttpResponse {
            status,
            headers,
            body: decode_body(&bytes, charset.as_deref()),
        })
    }
}

fn charset_of(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|part| {
        let (key, value) = part.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"'))
    })
}

fn decode_body(bytes: &[u8], charset: Option<&str>) -> String {
    let encoding = charset
        .and_then(|label| encoding_rs::Encoding::for_label(label.as_bytes()))
        .unwrap_or(encoding_rs::UTF_8);
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn do_request(&self, request: HttpRequest) -> PostNLResult<HttpResponse> {
        let mut attempt = 0;
        loop {
            tracing::debug!(method = %request.method, url = %request.url, attempt, "dispatching request");
            let outcome = self.client.execute(self.to_reqwest(&request)?).await;
            let retryable = match &outcome {
                Ok(response) => response.status().is_server_error(),
                Err(error) => error.is_connect(),
            };
            if retryable && attempt < self.max_retries {
                attempt += 1;
                tokio::time::sleep(Duration::from_millis(100 * u64::from(attempt))).await;
                continue;
            }
            return Self::into_response(outcome?).await;
        }
    }
}

type Responder = dyn Fn(&HttpRequest) -> PostNLResult<HttpResponse> + Send + Sync;

/// [`HttpClient`] that answers requests with a closure and records what was sent.
///
/// ## Example
///
/// ```rust
/// use postnl_rs::{HttpResponse, MockClient};
///
/// let client = MockClient::new(|_request| Ok(HttpResponse::new(200, "{}")));
/// assert_eq!(client.request_count(), 0);
/// ```
#[derive(Clone)]
pub struct MockClient {
    responder: Arc<Responder>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockClient {
    /// Creates a mock client answering every request with `responder`.
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&HttpRequest) -> PostNLResult<HttpResponse> + Send + Sync + 'static,
    {
        MockClient {
            responder: Arc::new(responder),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates a mock client answering every request with a clone of `response`.
    pub fn with_response(response: HttpResponse) -> Self {
        MockClient::new(move |_| Ok(response.clone()))
    }

    /// Returns the requests dispatched so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        match self.requests.lock() {
            Ok(requests) => requests.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Returns the number of requests dispatched so far.
    pub fn request_count(&self) -> usize {
        self.requests().len()
    }
}

#[async_trait]
impl HttpClient for MockClient {
    async fn do_request(&self, request: HttpRequest) -> PostNLResult<HttpResponse> {
        match self.requests.lock() {
            Ok(mut requests) => requests.push(request.clone()),
            Err(poisoned) => poisoned.into_inner().push(request.clone()),
        }
        (self.responder)(&request)
    }
}
