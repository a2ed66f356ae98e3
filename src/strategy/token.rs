//! Identity-endpoint bearer tokens with an expiry-aware shared cache.
//!
//! Each `apply` resolves the token for the strategy's endpoint + API key pair from the
//! [`TokenCache`]. A missing or expired entry triggers one API-key grant against the identity
//! endpoint; the new entry's watermark is `now + expires_in × threshold`, so tokens are
//! refreshed before the server considers them stale. Callers that race on the same key
//! serialize behind the cache's refresh guard and re-check the cache before minting.
//!
//! A failed mint removes the `Authorization` header, leaves the cache untouched, and fails
//! the call. Nothing inside this module retries.

// std
use std::time::Duration as StdDuration;
// self
use crate::{
	_prelude::*,
	auth::{AUTHORIZATION, Authorization, CachedToken, IdentityToken, Secret},
	cache::{CacheKey, MemoryTokenCache, TokenCache},
	clock::{Clock, SystemClock},
	error::{ConfigError, TokenFetchError},
	http::{TokenHttpClient, TokenHttpRequest, TokenHttpResponse},
	interceptor::{self, InterceptFuture, RequestInterceptor},
	obs::{self, ApplyOutcome, AuthSpan, SchemeKind},
	request::OutgoingRequest,
};

/// Grant type URN sent with every mint request.
pub const GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";
/// Fraction of the server-declared lifetime a token is used for.
pub const DEFAULT_EXPIRY_THRESHOLD: f64 = 0.85;
/// Upper bound on one mint call made by the default transport, connect included.
pub const DEFAULT_MINT_TIMEOUT: StdDuration = StdDuration::from_secs(30);

const BODY_PREVIEW_LEN: usize = 256;

/// Computes the local watermark for a token minted at `now`.
///
/// Returns `None` when `expires_in` is non-positive or the result is not representable.
/// The fractional lifetime is floored to whole milliseconds, so the watermark never lands
/// past `now + expires_in`.
pub fn valid_until(now: OffsetDateTime, expires_in: i64, threshold: f64) -> Option<OffsetDateTime> {
	if expires_in <= 0 {
		return None;
	}

	let millis = (expires_in as f64 * threshold * 1_000.).floor();

	if !millis.is_finite() || millis < 0. || millis >= i64::MAX as f64 {
		return None;
	}

	now.checked_add(Duration::milliseconds(millis as i64))
}

/// Builder for [`TokenStrategy`].
#[derive(Default)]
pub struct TokenStrategyBuilder {
	apikey: Option<Secret>,
	identity_endpoint: Option<String>,
	use_raw_apikey: bool,
	expiry_threshold: Option<f64>,
	cache: Option<Arc<dyn TokenCache>>,
	http_client: Option<Arc<dyn TokenHttpClient>>,
	mint_timeout: Option<StdDuration>,
	clock: Option<Arc<dyn Clock>>,
	verbose: bool,
}
impl TokenStrategyBuilder {
	/// API key exchanged for bearer tokens.
	pub fn apikey(mut self, apikey: impl Into<Secret>) -> Self {
		self.apikey = Some(apikey.into());

		self
	}

	/// Absolute URL of the identity endpoint.
	pub fn identity_endpoint(mut self, endpoint: impl Into<String>) -> Self {
		self.identity_endpoint = Some(endpoint.into());

		self
	}

	/// Sends `API-KEY <apikey>` instead of minting bearer tokens.
	pub fn use_raw_apikey(mut self, enabled: bool) -> Self {
		self.use_raw_apikey = enabled;

		self
	}

	/// Fraction of the declared lifetime to use, within `(0, 1]`.
	pub fn expiry_threshold(mut self, threshold: f64) -> Self {
		self.expiry_threshold = Some(threshold);

		self
	}

	/// Cache shared with other strategies; defaults to [`MemoryTokenCache::shared`].
	pub fn cache(mut self, cache: Arc<dyn TokenCache>) -> Self {
		self.cache = Some(cache);

		self
	}

	/// Transport used for mint calls; defaults to the reqwest transport.
	pub fn http_client(mut self, http_client: Arc<dyn TokenHttpClient>) -> Self {
		self.http_client = Some(http_client);

		self
	}

	/// Bounds each mint made by the default transport; defaults to [`DEFAULT_MINT_TIMEOUT`].
	///
	/// Ignored when a transport is supplied through [`Self::http_client`].
	pub fn mint_timeout(mut self, timeout: StdDuration) -> Self {
		self.mint_timeout = Some(timeout);

		self
	}

	/// Clock consulted for expiry decisions; defaults to [`SystemClock`].
	pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.clock = Some(clock);

		self
	}

	/// Emits redacted debug events for cache hits, mints, and failures.
	pub fn verbose(mut self, verbose: bool) -> Self {
		self.verbose = verbose;

		self
	}

	/// Validates the configuration and builds the strategy.
	pub fn build(self) -> Result<TokenStrategy, ConfigError> {
		let apikey = self
			.apikey
			.filter(|apikey| !apikey.is_empty())
			.ok_or(ConfigError::MissingField { field: "apikey" })?;
		let endpoint = self
			.identity_endpoint
			.filter(|endpoint| !endpoint.is_empty())
			.ok_or(ConfigError::MissingField { field: "identityEndpoint" })?;
		let identity_endpoint = Url::parse(&endpoint)
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint: endpoint.clone(), source })?;
		let expiry_threshold = self.expiry_threshold.unwrap_or(DEFAULT_EXPIRY_THRESHOLD);
		let threshold_in_range = expiry_threshold > 0. && expiry_threshold <= 1.;

		if !threshold_in_range {
			return Err(ConfigError::InvalidThreshold { value: expiry_threshold });
		}

		let mint_timeout = self.mint_timeout.unwrap_or(DEFAULT_MINT_TIMEOUT);

		if mint_timeout.is_zero() {
			return Err(ConfigError::InvalidMintTimeout);
		}

		let http_client = match self.http_client {
			Some(http_client) => http_client,
			None => default_http_client(mint_timeout)?,
		};
		let cache: Arc<dyn TokenCache> = match self.cache {
			Some(cache) => cache,
			None => MemoryTokenCache::shared(),
		};
		let clock: Arc<dyn Clock> = match self.clock {
			Some(clock) => clock,
			None => Arc::new(SystemClock),
		};

		Ok(TokenStrategy {
			key: CacheKey::new(&endpoint, &apikey),
			apikey,
			identity_endpoint,
			use_raw_apikey: self.use_raw_apikey,
			expiry_threshold,
			cache,
			http_client,
			clock,
			verbose: self.verbose,
		})
	}
}
impl Debug for TokenStrategyBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenStrategyBuilder")
			.field("apikey_set", &self.apikey.is_some())
			.field("identity_endpoint", &self.identity_endpoint)
			.field("use_raw_apikey", &self.use_raw_apikey)
			.field("expiry_threshold", &self.expiry_threshold)
			.field("cache_set", &self.cache.is_some())
			.field("http_client_set", &self.http_client.is_some())
			.field("mint_timeout", &self.mint_timeout)
			.field("verbose", &self.verbose)
			.finish()
	}
}

#[cfg(feature = "reqwest")]
fn default_http_client(timeout: StdDuration) -> Result<Arc<dyn TokenHttpClient>, ConfigError> {
	let client = ReqwestClient::builder()
		.redirect(reqwest::redirect::Policy::none())
		.connect_timeout(timeout)
		.timeout(timeout)
		.build()?;

	Ok(Arc::new(crate::http::ReqwestHttpClient::with_client(client)))
}
#[cfg(not(feature = "reqwest"))]
fn default_http_client(_: StdDuration) -> Result<Arc<dyn TokenHttpClient>, ConfigError> {
	Err(ConfigError::MissingField { field: "httpClient" })
}

/// Interceptor that authenticates requests with cached identity-service bearer tokens.
#[derive(Clone)]
pub struct TokenStrategy {
	apikey: Secret,
	identity_endpoint: Url,
	key: CacheKey,
	use_raw_apikey: bool,
	expiry_threshold: f64,
	cache: Arc<dyn TokenCache>,
	http_client: Arc<dyn TokenHttpClient>,
	clock: Arc<dyn Clock>,
	verbose: bool,
}
impl TokenStrategy {
	/// Starts a new builder.
	pub fn builder() -> TokenStrategyBuilder {
		TokenStrategyBuilder::default()
	}

	/// Cache key shared by every strategy with the same endpoint and API key.
	pub fn cache_key(&self) -> &CacheKey {
		&self.key
	}

	/// Configured expiry threshold.
	pub fn expiry_threshold(&self) -> f64 {
		self.expiry_threshold
	}

	/// Header decision for a given cache entry.
	///
	/// Raw-API-key mode always wins; otherwise a present entry yields its bearer token and an
	/// absent one leaves the request unauthenticated.
	pub fn authorization_for(&self, entry: Option<&CachedToken>) -> Authorization {
		match entry {
			_ if self.use_raw_apikey => Authorization::RawApiKey(self.apikey.clone()),
			Some(entry) => Authorization::Bearer(entry.access_token().clone()),
			None => Authorization::None,
		}
	}

	/// Resolves the header value for the next request, minting a token when needed.
	pub async fn authorization(&self) -> Result<Authorization, TokenFetchError> {
		if self.use_raw_apikey {
			return Ok(self.authorization_for(None));
		}
		if let Some(entry) = self.fresh_entry() {
			self.trace("reused cached token", &entry);

			return Ok(self.authorization_for(Some(&entry)));
		}

		let guard = self.cache.refresh_guard(&self.key);
		let _singleflight = guard.lock().await;

		// Another caller may have minted while this one waited on the guard.
		if let Some(entry) = self.fresh_entry() {
			self.trace("reused token minted by a concurrent caller", &entry);

			return Ok(self.authorization_for(Some(&entry)));
		}

		let minted = self.mint().await?;
		let held = self.cache.put(self.key.clone(), minted);

		self.trace("minted token", &held);

		Ok(self.authorization_for(Some(&held)))
	}

	/// Writes the resolved `Authorization` header into `request`.
	///
	/// Schema URLs are passed through untouched. On failure the header is removed and the
	/// error is returned.
	pub async fn decorate(&self, request: &mut OutgoingRequest) -> Result<()> {
		const KIND: SchemeKind = SchemeKind::Token;

		let span = AuthSpan::new(KIND, "decorate");

		obs::record_apply_outcome(KIND, ApplyOutcome::Attempt);

		if interceptor::is_schema_url(&request.url) {
			if self.verbose {
				obs::verbose_event(KIND, "schema request left unauthenticated", &request.url);
			}

			obs::record_apply_outcome(KIND, ApplyOutcome::Skipped);

			return Ok(());
		}

		let result = span.instrument(self.decorate_inner(request)).await;

		match &result {
			Ok(()) => obs::record_apply_outcome(KIND, ApplyOutcome::Success),
			Err(_) => obs::record_apply_outcome(KIND, ApplyOutcome::Failure),
		}

		result
	}

	async fn decorate_inner(&self, request: &mut OutgoingRequest) -> Result<()> {
		// A malformed descriptor fails before any mint call.
		request.headers_mut()?;

		let resolved = self.authorization().await;
		let headers = request.headers_mut()?;

		match resolved {
			Ok(authorization) => {
				if self.verbose {
					obs::verbose_event(
						SchemeKind::Token,
						"authorization resolved",
						&format_args!("mode={} value={authorization}", authorization.as_str()),
					);
				}

				match authorization.header_value() {
					Some(value) => headers.insert(AUTHORIZATION, value),
					None => {
						headers.remove(AUTHORIZATION);
					},
				}

				Ok(())
			},
			Err(e) => {
				headers.remove(AUTHORIZATION);

				if self.verbose {
					obs::verbose_event(SchemeKind::Token, "token mint failed", &e);
				}

				Err(e.into())
			},
		}
	}

	fn fresh_entry(&self) -> Option<CachedToken> {
		let now = self.clock.now();

		self.cache.get(&self.key).filter(|entry| !entry.is_expired_at(now))
	}

	async fn mint(&self) -> Result<CachedToken, TokenFetchError> {
		let now = self.clock.now();
		let request = TokenHttpRequest {
			url: self.identity_endpoint.clone(),
			form: vec![
				("grant_type".into(), GRANT_TYPE.into()),
				("apikey".into(), self.apikey.expose().into()),
			],
		};
		let result = match self.http_client.post_form(request).await {
			Ok(response) => self.classify(response, now),
			Err(source) => Err(TokenFetchError::Transport {
				endpoint: self.key.endpoint().into(),
				credential: self.key.credential().into(),
				source,
			}),
		};

		match &result {
			Ok(_) => obs::record_token_mint(ApplyOutcome::Success),
			Err(_) => obs::record_token_mint(ApplyOutcome::Failure),
		}

		result
	}

	fn classify(
		&self,
		response: TokenHttpResponse,
		now: OffsetDateTime,
	) -> Result<CachedToken, TokenFetchError> {
		let endpoint = self.key.endpoint().to_owned();
		let credential = self.key.credential().to_owned();

		if response.status != 200 {
			return Err(TokenFetchError::Status {
				endpoint,
				credential,
				status: response.status,
				retry_after: response.retry_after,
				body_preview: body_preview(&response.body),
			});
		}

		let mut deserializer = serde_json::Deserializer::from_slice(&response.body);
		let token: IdentityToken = match serde_path_to_error::deserialize(&mut deserializer) {
			Ok(token) => token,
			Err(source) => return Err(TokenFetchError::Parse { endpoint, credential, source }),
		};
		let Some(valid_until) = valid_until(now, token.expires_in, self.expiry_threshold) else {
			return Err(TokenFetchError::InvalidExpiresIn {
				endpoint,
				credential,
				expires_in: token.expires_in,
			});
		};

		Ok(CachedToken::new(token, now, valid_until))
	}

	fn trace(&self, message: &str, entry: &CachedToken) {
		if self.verbose {
			obs::verbose_event(
				SchemeKind::Token,
				message,
				&format_args!(
					"key={} valid_until={}",
					self.key, entry.valid_until
				),
			);
		}
	}
}
impl Debug for TokenStrategy {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenStrategy")
			.field("key", &self.key)
			.field("use_raw_apikey", &self.use_raw_apikey)
			.field("expiry_threshold", &self.expiry_threshold)
			.field("clock", &self.clock)
			.field("verbose", &self.verbose)
			.finish()
	}
}
impl RequestInterceptor for TokenStrategy {
	fn scheme(&self) -> SchemeKind {
		SchemeKind::Token
	}

	fn apply<'a>(&'a self, request: &'a mut OutgoingRequest) -> InterceptFuture<'a> {
		Box::pin(self.decorate(request))
	}
}

fn body_preview(body: &[u8]) -> String {
	String::from_utf8_lossy(body).chars().take(BODY_PREVIEW_LEN).collect()
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;
	use crate::{clock::ManualClock, error::TransportError, http::TokenHttpFuture};

	const ENDPOINT: &str = "https://iam.example.com/identity/token";

	#[derive(Default)]
	struct ScriptedClient {
		responses: Mutex<Vec<Result<TokenHttpResponse, TransportError>>>,
		requests: Mutex<Vec<TokenHttpRequest>>,
	}
	impl ScriptedClient {
		fn push(&self, response: Result<TokenHttpResponse, TransportError>) {
			self.responses.lock().insert(0, response);
		}

		fn ok(&self, body: &str) {
			self.push(Ok(TokenHttpResponse { status: 200, retry_after: None, body: body.into() }));
		}

		fn calls(&self) -> usize {
			self.requests.lock().len()
		}
	}
	impl TokenHttpClient for ScriptedClient {
		fn post_form(&self, request: TokenHttpRequest) -> TokenHttpFuture<'_> {
			self.requests.lock().push(request);

			let response = self.responses.lock().pop().unwrap_or_else(|| {
				Err(TransportError::Io(std::io::Error::other("No scripted response left.")))
			});

			Box::pin(async move { response })
		}
	}

	fn strategy(client: &Arc<ScriptedClient>, clock: &ManualClock) -> TokenStrategy {
		TokenStrategy::builder()
			.apikey("my-api-key")
			.identity_endpoint(ENDPOINT)
			.cache(Arc::new(MemoryTokenCache::default()))
			.http_client(client.clone())
			.clock(Arc::new(clock.clone()))
			.build()
			.expect("Strategy should build.")
	}

	#[test]
	fn valid_until_applies_threshold_in_milliseconds() {
		let now = macros::datetime!(2025-01-01 00:00 UTC);

		assert_eq!(valid_until(now, 3600, 0.85), Some(now + Duration::seconds(3060)));
		assert_eq!(valid_until(now, 1, 0.85), Some(now + Duration::milliseconds(850)));
		assert_eq!(valid_until(now, 7, 1.), Some(now + Duration::seconds(7)));
		assert_eq!(valid_until(now, 0, 0.85), None);
		assert_eq!(valid_until(now, -5, 0.85), None);
		assert_eq!(valid_until(now, i64::MAX, 1.), None);
	}

	#[test]
	fn build_validates_configuration() {
		let missing_key = TokenStrategy::builder().identity_endpoint(ENDPOINT).build();

		assert!(matches!(missing_key, Err(ConfigError::MissingField { field: "apikey" })));

		let missing_endpoint = TokenStrategy::builder().apikey("k").identity_endpoint("").build();

		assert!(matches!(
			missing_endpoint,
			Err(ConfigError::MissingField { field: "identityEndpoint" })
		));

		let bad_endpoint =
			TokenStrategy::builder().apikey("k").identity_endpoint("not a url").build();

		assert!(matches!(bad_endpoint, Err(ConfigError::InvalidEndpoint { .. })));

		for threshold in [0., -0.5, 1.5, f64::NAN] {
			let client = Arc::new(ScriptedClient::default());
			let result = TokenStrategy::builder()
				.apikey("k")
				.identity_endpoint(ENDPOINT)
				.http_client(client)
				.expiry_threshold(threshold)
				.build();

			assert!(matches!(result, Err(ConfigError::InvalidThreshold { .. })));
		}
	}

	#[test]
	fn authorization_for_is_three_state() {
		let client = Arc::new(ScriptedClient::default());
		let clock = ManualClock::new(macros::datetime!(2025-01-01 00:00 UTC));
		let strategy = strategy(&client, &clock);
		let token = IdentityToken {
			access_token: Secret::new("access"),
			expires_in: 3600,
			refresh_token: None,
			token_type: None,
			expiration: None,
			scope: None,
		};
		let entry = CachedToken::new(token, clock.now(), clock.now() + Duration::hours(1));

		assert_eq!(
			strategy.authorization_for(Some(&entry)),
			Authorization::Bearer(Secret::new("access"))
		);
		assert_eq!(strategy.authorization_for(None), Authorization::None);

		let raw = TokenStrategy::builder()
			.apikey("my-api-key")
			.identity_endpoint(ENDPOINT)
			.http_client(client)
			.use_raw_apikey(true)
			.build()
			.expect("Raw strategy should build.");

		assert_eq!(
			raw.authorization_for(Some(&entry)),
			Authorization::RawApiKey(Secret::new("my-api-key"))
		);
	}

	#[tokio::test]
	async fn mints_once_then_reuses_until_expiry() {
		let client = Arc::new(ScriptedClient::default());
		let clock = ManualClock::new(macros::datetime!(2025-01-01 00:00 UTC));
		let strategy = strategy(&client, &clock);

		client.ok("{\"access_token\":\"first\",\"expires_in\":3600}");
		client.ok("{\"access_token\":\"second\",\"expires_in\":3600}");

		let mut request = OutgoingRequest::new("GET", "https://gp.example.com/rest/bundles");

		strategy.decorate(&mut request).await.expect("First call should mint.");
		strategy.decorate(&mut request).await.expect("Second call should hit the cache.");

		assert_eq!(client.calls(), 1);
		assert_eq!(request.authorization(), Some("Bearer first"));

		clock.advance(Duration::seconds(3060));
		strategy.decorate(&mut request).await.expect("Watermark itself is still valid.");

		assert_eq!(client.calls(), 1);

		clock.advance(Duration::milliseconds(1));
		strategy.decorate(&mut request).await.expect("Expired entry should be re-minted.");

		assert_eq!(client.calls(), 2);
		assert_eq!(request.authorization(), Some("Bearer second"));

		let requests = client.requests.lock();
		let form = &requests[0].form;

		assert_eq!(form[0], ("grant_type".into(), GRANT_TYPE.into()));
		assert_eq!(form[1], ("apikey".into(), "my-api-key".into()));
	}

	#[tokio::test]
	async fn failures_clear_the_header_and_keep_the_cache() {
		let client = Arc::new(ScriptedClient::default());
		let clock = ManualClock::new(macros::datetime!(2025-01-01 00:00 UTC));
		let strategy = strategy(&client, &clock);

		client.push(Ok(TokenHttpResponse {
			status: 400,
			retry_after: None,
			body: b"{\"errorCode\":\"BXNIM0415E\"}".to_vec(),
		}));
		client.ok("{\"access_token\":\"abc\"}");
		client.ok("{\"access_token\":\"abc\",\"expires_in\":0}");

		for expected in ["Status", "Parse", "InvalidExpiresIn"] {
			let mut request = OutgoingRequest::new("GET", "https://gp.example.com/rest/bundles")
				.with_header(AUTHORIZATION, "Bearer stale");
			let err = strategy.decorate(&mut request).await.expect_err("Mint should fail.");
			let fetch = match err {
				Error::TokenFetch(fetch) => fetch,
				other => panic!("Expected a token fetch error, got {other:?}."),
			};
			let label = match fetch {
				TokenFetchError::Status { status, .. } => {
					assert_eq!(status, 400);

					"Status"
				},
				TokenFetchError::Parse { .. } => "Parse",
				TokenFetchError::InvalidExpiresIn { expires_in, .. } => {
					assert_eq!(expires_in, 0);

					"InvalidExpiresIn"
				},
				TokenFetchError::Transport { .. } => "Transport",
			};

			assert_eq!(label, expected);
			assert_eq!(request.authorization(), None);
			assert!(strategy.cache.get(strategy.cache_key()).is_none());
		}
	}

	#[tokio::test]
	async fn parse_errors_report_the_failing_path() {
		let client = Arc::new(ScriptedClient::default());
		let clock = ManualClock::new(macros::datetime!(2025-01-01 00:00 UTC));
		let strategy = strategy(&client, &clock);

		client.ok("{\"access_token\":\"abc\",\"expires_in\":\"soon\"}");

		let err = strategy.authorization().await.expect_err("Malformed body should fail.");
		let source = match err {
			TokenFetchError::Parse { source, .. } => source,
			other => panic!("Expected a parse error, got {other:?}."),
		};

		assert_eq!(source.path().to_string(), "expires_in");
	}

	#[tokio::test]
	async fn raw_apikey_mode_never_mints() {
		let client = Arc::new(ScriptedClient::default());
		let strategy = TokenStrategy::builder()
			.apikey("my-api-key")
			.identity_endpoint(ENDPOINT)
			.cache(Arc::new(MemoryTokenCache::default()))
			.http_client(client.clone())
			.use_raw_apikey(true)
			.build()
			.expect("Raw strategy should build.");
		let mut request = OutgoingRequest::new("GET", "https://gp.example.com/rest/bundles");

		strategy.decorate(&mut request).await.expect("Raw mode should not fail.");

		assert_eq!(request.authorization(), Some("API-KEY my-api-key"));
		assert_eq!(client.calls(), 0);
	}

	#[tokio::test]
	async fn schema_urls_skip_minting() {
		let client = Arc::new(ScriptedClient::default());
		let clock = ManualClock::new(macros::datetime!(2025-01-01 00:00 UTC));
		let strategy = strategy(&client, &clock);
		let mut request = OutgoingRequest::new("GET", "https://gp.example.com/rest/swagger.json");

		strategy.decorate(&mut request).await.expect("Schema requests should pass.");

		assert_eq!(request.authorization(), None);
		assert_eq!(client.calls(), 0);
	}

	#[tokio::test]
	async fn missing_headers_fail_before_minting() {
		let client = Arc::new(ScriptedClient::default());
		let clock = ManualClock::new(macros::datetime!(2025-01-01 00:00 UTC));
		let strategy = strategy(&client, &clock);
		let mut request =
			OutgoingRequest::new("GET", "https://gp.example.com/rest/bundles").without_headers();
		let err = strategy.decorate(&mut request).await.expect_err("Missing headers should fail.");

		assert!(matches!(err, Error::Signing(_)));
		assert_eq!(client.calls(), 0);
	}

	#[test]
	fn body_preview_is_truncated() {
		let preview = body_preview("x".repeat(1_000).as_bytes());

		assert_eq!(preview.len(), BODY_PREVIEW_LEN);
	}

	#[test]
	fn debug_hides_the_apikey() {
		let client = Arc::new(ScriptedClient::default());
		let clock = ManualClock::new(macros::datetime!(2025-01-01 00:00 UTC));
		let rendered = format!("{:?}", strategy(&client, &clock));

		assert!(!rendered.contains("my-api-key"));
	}
}
