//! Transport primitives for identity-endpoint token mints.
//!
//! [`TokenHttpClient`] is the token strategy's only dependency on an HTTP stack. It posts
//! one form-encoded request and reports the status, the `Retry-After` hint, and the raw
//! body; classifying the response is left to the strategy so every transport produces the
//! same error taxonomy. The interceptor never retries, and a transport should not either.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")]
use reqwest::header::{ACCEPT, HeaderMap, RETRY_AFTER};
#[cfg(feature = "reqwest")] use time::format_description::well_known::Rfc2822;
// self
use crate::{_prelude::*, error::TransportError};

/// Boxed future returned by [`TokenHttpClient::post_form`].
pub type TokenHttpFuture<'a> =
	Pin<Box<dyn Future<Output = Result<TokenHttpResponse, TransportError>> + 'a + Send>>;

/// Form POST sent to the identity endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenHttpRequest {
	/// Identity endpoint URL.
	pub url: Url,
	/// Ordered form fields. Contains the API key; never log them.
	pub form: Vec<(String, String)>,
}
impl Debug for TokenHttpRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenHttpRequest")
			.field("url", &self.url.as_str())
			.field("form", &self.form.iter().map(|(key, _)| key.as_str()).collect::<Vec<_>>())
			.finish()
	}
}

/// Raw identity endpoint response.
#[derive(Clone, Default)]
pub struct TokenHttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Retry-After hint expressed as a relative duration.
	pub retry_after: Option<Duration>,
	/// Response body bytes.
	pub body: Vec<u8>,
}
impl Debug for TokenHttpResponse {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenHttpResponse")
			.field("status", &self.status)
			.field("retry_after", &self.retry_after)
			.field("body_len", &self.body.len())
			.finish()
	}
}

/// Abstraction over HTTP transports capable of minting identity tokens.
///
/// Implementations must be `Send + Sync + 'static` so one transport can be shared by every
/// strategy in the process, and the returned futures must be `Send` so `apply` can hop
/// executors. A timeout enforced by the transport must surface as
/// [`TransportError::Timeout`].
pub trait TokenHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` as `application/x-www-form-urlencoded` and returns the raw response.
	fn post_form(&self, request: TokenHttpRequest) -> TokenHttpFuture<'_>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Identity endpoints answer directly, so a custom [`ReqwestClient`] should not follow
/// redirects.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient {
	client: ReqwestClient,
	timeout: Option<std::time::Duration>,
}
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self { client, timeout: None }
	}

	/// Applies a per-request timeout to every mint call.
	pub fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
		self.timeout = Some(timeout);

		self
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.client
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.client
	}
}
#[cfg(feature = "reqwest")]
impl TokenHttpClient for ReqwestHttpClient {
	fn post_form(&self, request: TokenHttpRequest) -> TokenHttpFuture<'_> {
		let mut builder = self
			.client
			.post(request.url)
			.header(ACCEPT, "application/json")
			.form(&request.form);

		if let Some(timeout) = self.timeout {
			builder = builder.timeout(timeout);
		}

		Box::pin(async move {
			let response = builder.send().await?;
			let status = response.status().as_u16();
			let retry_after = parse_retry_after(response.headers());
			let body = response.bytes().await?.to_vec();

			Ok::<_, TransportError>(TokenHttpResponse { status, retry_after, body })
		})
	}
}

#[cfg(feature = "reqwest")]
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u32>() {
		return Some(Duration::seconds(secs.into()));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Some(delta);
		}
	}

	None
}
