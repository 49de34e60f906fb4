//! The client dispatch engine.
//!
//! Every call, whatever its entry point, goes through one routine:
//!
//! 1. negotiate the response media type (`Accept`) from the decoder
//! 2. apply the registered [`RequestModifier`]s
//! 3. execute the request on the [`Transport`], re-dispatching while the
//!    [`RequestRetrier`] asks for it
//! 4. classify the response by status and decode the body with the
//!    [`ResponseMode`] of the call
//!
//! All failures end up in the [`RequestResult`] of the call.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use courier_core::{
    Decode, Dynamic, Encode, HeaderField, HeaderFields, JsonCodec, Method, Raw, Request,
    RequestBuilder, RequestError, RequestModifier, RequestResult, RequestRetrier, ResponseMetadata,
    ResponseMode, Transport, Typed,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::task::{JoinError, JoinHandle};
use tracing::{Instrument, Span, debug, field, info, info_span, warn};
use url::Url;

use crate::HyperTransport;

/// Number of re-dispatches allowed per call when a retrier is registered.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Typed HTTP client.
///
/// `T` executes requests, `E` encodes request bodies and `D` decodes response
/// bodies. Cloning is cheap; clones share the same transport and hooks.
///
/// # Example
///
/// ```ignore
/// use courier::{Client, Method, RequestResult};
///
/// #[derive(Debug, serde::Deserialize)]
/// struct User { name: String }
///
/// let client = Client::new();
/// let url = "https://api.example.com/users/1".parse()?;
///
/// match client.perform::<User, serde_json::Value>(client.request(Method::Get, url)).await {
///     RequestResult::Success { body, .. } => println!("{}", body.name),
///     RequestResult::Failure(error) => eprintln!("{error}"),
/// }
/// ```
pub struct Client<T = HyperTransport, E = JsonCodec, D = JsonCodec> {
    inner: Arc<Inner<T, E, D>>,
}

struct Inner<T, E, D> {
    transport: T,
    builder: RequestBuilder<E>,
    decoder: D,
    modifiers: Vec<Arc<dyn RequestModifier>>,
    retrier: Option<Arc<dyn RequestRetrier>>,
    max_retries: u32,
}

impl<T, E, D> Clone for Client<T, E, D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug, E: fmt::Debug, D: fmt::Debug> fmt::Debug for Client<T, E, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("transport", &self.inner.transport)
            .field("encoder", self.inner.builder.encoder())
            .field("decoder", &self.inner.decoder)
            .field("modifiers_count", &self.inner.modifiers.len())
            .field("has_retrier", &self.inner.retrier.is_some())
            .field("max_retries", &self.inner.max_retries)
            .finish()
    }
}

impl Client {
    /// Create a client over a default [`HyperTransport`] with JSON codecs.
    #[must_use]
    pub fn new() -> Self {
        Self::builder(HyperTransport::new()).build()
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> Client<T, JsonCodec, JsonCodec> {
    /// Create a builder around the given transport.
    #[must_use]
    pub fn builder(transport: T) -> ClientBuilder<T> {
        ClientBuilder::new(transport)
    }
}

impl<T, E, D> Client<T, E, D>
where
    T: Transport,
    E: Encode,
    D: Decode,
{
    /// The transport requests are executed on.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.inner.transport
    }

    /// The request builder, using this client's encoder.
    #[must_use]
    pub fn request_builder(&self) -> &RequestBuilder<E> {
        &self.inner.builder
    }

    /// Maximum number of re-dispatches per call.
    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.inner.max_retries
    }

    /// Build a request without a body.
    #[must_use]
    pub fn request(&self, method: Method, url: Url) -> Request {
        self.inner.builder.build(url, method, None)
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Dispatch a request and decode the response according to `M`.
    ///
    /// This is the routine every other entry point delegates to.
    pub async fn perform_as<M: ResponseMode>(
        &self,
        request: Request,
    ) -> RequestResult<M::Success, M::Failure> {
        let span = info_span!(
            "http_request",
            method = %request.method(),
            url = %request.url(),
            body_len = request.body().map_or(0, Bytes::len),
            status = field::Empty,
            elapsed_ms = field::Empty,
        );

        async move {
            let start = Instant::now();
            let outcome = self.exchange::<M>(request).await;

            let span = Span::current();
            // Saturates after ~584 million years
            span.record(
                "elapsed_ms",
                u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            );

            match outcome {
                Ok((metadata, body)) => {
                    span.record("status", metadata.status());
                    info!("request succeeded");
                    RequestResult::Success { metadata, body }
                }
                Err(error) => {
                    if let RequestError::Api { metadata, .. } = &error {
                        span.record("status", metadata.status());
                        warn!("request failed with API error");
                    } else {
                        warn!(%error, "request failed");
                    }
                    RequestResult::Failure(error)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Dispatch a request, decoding successes as `S` and API errors as `F`.
    pub async fn perform<S, F>(&self, request: Request) -> RequestResult<S, F>
    where
        S: DeserializeOwned + Send + 'static,
        F: DeserializeOwned + fmt::Debug + Send + Sync + 'static,
    {
        self.perform_as::<Typed<S, F>>(request).await
    }

    /// Dispatch a request, decoding both outcomes into [`serde_json::Value`].
    pub async fn perform_dynamic(
        &self,
        request: Request,
    ) -> RequestResult<serde_json::Value, serde_json::Value> {
        self.perform_as::<Dynamic>(request).await
    }

    /// Dispatch a request and hand back the raw body bytes.
    pub async fn perform_raw(&self, request: Request) -> RequestResult<Bytes, Bytes> {
        self.perform_as::<Raw>(request).await
    }

    async fn exchange<M: ResponseMode>(
        &self,
        mut request: Request,
    ) -> Result<(ResponseMetadata, M::Success), RequestError<M::Failure>> {
        if M::NEGOTIATES_MEDIA_TYPE
            && let Some(media_type) = self.inner.decoder.media_type()
        {
            request.set_header(HeaderField::Accept, media_type);
        }
        for modifier in &self.inner.modifiers {
            modifier.modify(&mut request);
        }

        let mut attempt = 0;
        let response = loop {
            let response = self
                .inner
                .transport
                .execute(request.clone())
                .await
                .map_err(RequestError::classify)?;

            if attempt < self.inner.max_retries && self.should_retry(&request, response.metadata()) {
                attempt += 1;
                debug!(attempt, status = response.status(), "retrying request");
                continue;
            }
            break response;
        };

        let (metadata, body) = response.into_parts();
        if metadata.is_success() {
            let body = M::decode_success(&self.inner.decoder, body)?;
            Ok((metadata, body))
        } else {
            let body = M::decode_failure(&self.inner.decoder, body)?;
            Err(RequestError::Api { metadata, body })
        }
    }

    fn should_retry(&self, request: &Request, response: &ResponseMetadata) -> bool {
        self.inner
            .retrier
            .as_ref()
            .is_some_and(|retrier| retrier.should_retry(request, response))
    }

    // ========================================================================
    // Verb adapters
    // ========================================================================

    /// Build and dispatch a request with an optional body.
    ///
    /// An encoding failure is returned without dispatching anything.
    pub async fn send<M, B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        headers: Option<&HeaderFields>,
    ) -> RequestResult<M::Success, M::Failure>
    where
        M: ResponseMode,
        B: Serialize + Sync + ?Sized,
    {
        match self.inner.builder.build_with_body(url, method, body, headers) {
            Ok(request) => self.perform_as::<M>(request).await,
            Err(error) => {
                warn!(%method, %error, "request body could not be encoded");
                RequestResult::Failure(error.into())
            }
        }
    }

    /// `GET` the URL.
    pub async fn get<M: ResponseMode>(
        &self,
        url: Url,
        headers: Option<&HeaderFields>,
    ) -> RequestResult<M::Success, M::Failure> {
        self.perform_as::<M>(self.inner.builder.build(url, Method::Get, headers))
            .await
    }

    /// `DELETE` the URL.
    pub async fn delete<M: ResponseMode>(
        &self,
        url: Url,
        headers: Option<&HeaderFields>,
    ) -> RequestResult<M::Success, M::Failure> {
        self.perform_as::<M>(self.inner.builder.build(url, Method::Delete, headers))
            .await
    }

    /// `POST` an optional body to the URL.
    pub async fn post<M, B>(
        &self,
        url: Url,
        body: Option<&B>,
        headers: Option<&HeaderFields>,
    ) -> RequestResult<M::Success, M::Failure>
    where
        M: ResponseMode,
        B: Serialize + Sync + ?Sized,
    {
        self.send::<M, B>(Method::Post, url, body, headers).await
    }

    /// `PUT` an optional body to the URL.
    pub async fn put<M, B>(
        &self,
        url: Url,
        body: Option<&B>,
        headers: Option<&HeaderFields>,
    ) -> RequestResult<M::Success, M::Failure>
    where
        M: ResponseMode,
        B: Serialize + Sync + ?Sized,
    {
        self.send::<M, B>(Method::Put, url, body, headers).await
    }

    /// `PATCH` the URL with an optional body.
    pub async fn patch<M, B>(
        &self,
        url: Url,
        body: Option<&B>,
        headers: Option<&HeaderFields>,
    ) -> RequestResult<M::Success, M::Failure>
    where
        M: ResponseMode,
        B: Serialize + Sync + ?Sized,
    {
        self.send::<M, B>(Method::Patch, url, body, headers).await
    }
}

impl<T, E, D> Client<T, E, D>
where
    T: Transport + 'static,
    E: Encode + 'static,
    D: Decode + 'static,
{
    /// Dispatch a request in the background and deliver its result to
    /// `on_complete`.
    ///
    /// The call is spawned on the current tokio runtime and `on_complete` is
    /// invoked exactly once, possibly on another thread. Without a runtime it
    /// is invoked immediately with [`RequestError::Unknown`].
    ///
    /// # Example
    ///
    /// ```ignore
    /// use courier::{Client, Dynamic};
    ///
    /// let handle = client.dispatch::<Dynamic, _>(request, |result| {
    ///     println!("success: {}", result.is_success());
    /// });
    /// handle.join().await?;
    /// ```
    pub fn dispatch<M, C>(&self, request: Request, on_complete: C) -> DispatchHandle
    where
        M: ResponseMode,
        C: FnOnce(RequestResult<M::Success, M::Failure>) + Send + 'static,
    {
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                let client = self.clone();
                let task = runtime.spawn(async move {
                    on_complete(client.perform_as::<M>(request).await);
                });
                DispatchHandle { task: Some(task) }
            }
            Err(error) => {
                warn!(%error, "cannot dispatch request");
                on_complete(RequestResult::Failure(RequestError::unknown(error)));
                DispatchHandle { task: None }
            }
        }
    }
}

/// Handle to one background dispatch.
///
/// Dropping the handle detaches the call; the completion still runs.
#[derive(Debug)]
pub struct DispatchHandle {
    task: Option<JoinHandle<()>>,
}

impl DispatchHandle {
    /// Returns `true` once the completion has run.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Wait for the completion to run.
    ///
    /// Fails only if the completion panicked.
    pub async fn join(self) -> Result<(), JoinError> {
        match self.task {
            Some(task) => task.await,
            None => Ok(()),
        }
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`Client`].
///
/// # Example
///
/// ```ignore
/// use courier::{Client, FormEncoder, HyperTransport};
/// use courier::middleware::{BearerAuth, StatusRetrier};
///
/// let client = Client::builder(HyperTransport::new())
///     .encoder(FormEncoder)
///     .modifier(BearerAuth::new("token"))
///     .retrier(StatusRetrier::new())
///     .max_retries(2)
///     .build();
/// ```
pub struct ClientBuilder<T, E = JsonCodec, D = JsonCodec> {
    transport: T,
    encoder: E,
    decoder: D,
    modifiers: Vec<Arc<dyn RequestModifier>>,
    retrier: Option<Arc<dyn RequestRetrier>>,
    max_retries: u32,
}

impl<T: fmt::Debug, E: fmt::Debug, D: fmt::Debug> fmt::Debug for ClientBuilder<T, E, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("transport", &self.transport)
            .field("encoder", &self.encoder)
            .field("decoder", &self.decoder)
            .field("modifiers_count", &self.modifiers.len())
            .field("has_retrier", &self.retrier.is_some())
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl<T: Transport> ClientBuilder<T> {
    /// Create a builder with JSON codecs and no hooks.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            encoder: JsonCodec,
            decoder: JsonCodec,
            modifiers: Vec::new(),
            retrier: None,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl<T, E, D> ClientBuilder<T, E, D>
where
    T: Transport,
    E: Encode,
    D: Decode,
{
    /// Use another encoder for request bodies.
    #[must_use]
    pub fn encoder<E2: Encode>(self, encoder: E2) -> ClientBuilder<T, E2, D> {
        ClientBuilder {
            transport: self.transport,
            encoder,
            decoder: self.decoder,
            modifiers: self.modifiers,
            retrier: self.retrier,
            max_retries: self.max_retries,
        }
    }

    /// Use another decoder for response bodies.
    #[must_use]
    pub fn decoder<D2: Decode>(self, decoder: D2) -> ClientBuilder<T, E, D2> {
        ClientBuilder {
            transport: self.transport,
            encoder: self.encoder,
            decoder,
            modifiers: self.modifiers,
            retrier: self.retrier,
            max_retries: self.max_retries,
        }
    }

    /// Register a request modifier.
    ///
    /// Modifiers run in registration order, after `Accept` negotiation.
    #[must_use]
    pub fn modifier(mut self, modifier: impl RequestModifier + 'static) -> Self {
        self.modifiers.push(Arc::new(modifier));
        self
    }

    /// Set the retrier consulted after each response.
    #[must_use]
    pub fn retrier(mut self, retrier: impl RequestRetrier + 'static) -> Self {
        self.retrier = Some(Arc::new(retrier));
        self
    }

    /// Bound the number of re-dispatches per call.
    #[must_use]
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Build the client.
    #[must_use]
    pub fn build(self) -> Client<T, E, D> {
        Client {
            inner: Arc::new(Inner {
                transport: self.transport,
                builder: RequestBuilder::new(self.encoder),
                decoder: self.decoder,
                modifiers: self.modifiers,
                retrier: self.retrier,
                max_retries: self.max_retries,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use courier_core::FormEncoder;

    use super::*;
    use crate::middleware::{BearerAuth, StatusRetrier};

    #[test]
    fn client_debug_lists_codecs_and_hooks() {
        let client = Client::builder(HyperTransport::new())
            .encoder(FormEncoder)
            .modifier(BearerAuth::new("my-secret-token"))
            .retrier(StatusRetrier::new())
            .max_retries(1)
            .build();

        let debug = format!("{client:?}");

        assert!(debug.starts_with("Client {"));
        assert!(debug.contains("encoder: FormEncoder"));
        assert!(debug.contains("decoder: JsonCodec"));
        assert!(debug.contains("modifiers_count: 1"));
        assert!(debug.contains("has_retrier: true"));
        assert!(debug.contains("max_retries: 1"));
        assert!(!debug.contains("my-secret-token"));
    }

    #[test]
    fn builder_debug_before_build() {
        let builder = Client::builder(HyperTransport::new()).max_retries(0);

        let debug = format!("{builder:?}");

        assert!(debug.contains("modifiers_count: 0"));
        assert!(debug.contains("has_retrier: false"));
        assert!(debug.contains("max_retries: 0"));
    }
}
