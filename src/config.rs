//! Configuration surface and the composition root that turns it into an interceptor.
//!
//! ```json
//! { "scheme": "TOKEN", "apikey": "...", "identityEndpoint": "https://iam.example.com/token" }
//! { "scheme": "TOKEN", "apikey": "...", "identityEndpoint": "...", "mintTimeoutMs": 5000 }
//! { "scheme": "HMAC", "user": "...", "secret": "...", "verbose": true }
//! ```
//!
//! Missing credential fields deserialize as empty values and are rejected when the strategy
//! is constructed, so both entry points report [`ConfigError::MissingField`].

// std
use std::time::Duration as StdDuration;
// self
use crate::{
	_prelude::*,
	auth::Secret,
	cache::{MemoryTokenCache, TokenCache},
	error::ConfigError,
	http::TokenHttpClient,
	interceptor::RequestInterceptor,
	strategy::{HmacStrategy, TokenStrategy, TokenStrategyBuilder, token::DEFAULT_EXPIRY_THRESHOLD},
};

/// Authentication settings for one client.
#[derive(Clone, Debug, Deserialize)]
pub struct AuthConfig {
	/// Active credential; exactly one scheme per client.
	#[serde(flatten)]
	pub credential: Credential,
	/// Emits redacted debug events from the interceptor.
	#[serde(default)]
	pub verbose: bool,
}
impl AuthConfig {
	/// Parses a JSON document, reporting the path of the first offending field.
	pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
		let mut deserializer = serde_json::Deserializer::from_str(json);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| ConfigError::Malformed { source })
	}

	/// Builds the configured interceptor with the process-wide token cache and the default
	/// transport.
	pub fn interceptor(&self) -> Result<Arc<dyn RequestInterceptor>, ConfigError> {
		match &self.credential {
			Credential::Hmac(hmac) => Ok(Arc::new(hmac.strategy(self.verbose)?)),
			Credential::Token(token) => {
				let strategy =
					token.builder(self.verbose).cache(MemoryTokenCache::shared()).build()?;

				Ok(Arc::new(strategy))
			},
		}
	}

	/// Builds the configured interceptor with an explicit cache and transport.
	///
	/// Both are ignored for HMAC credentials.
	pub fn interceptor_with(
		&self,
		cache: Arc<dyn TokenCache>,
		http_client: Arc<dyn TokenHttpClient>,
	) -> Result<Arc<dyn RequestInterceptor>, ConfigError> {
		match &self.credential {
			Credential::Hmac(hmac) => Ok(Arc::new(hmac.strategy(self.verbose)?)),
			Credential::Token(token) => Ok(Arc::new(
				token.builder(self.verbose).cache(cache).http_client(http_client).build()?,
			)),
		}
	}
}
impl FromStr for AuthConfig {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_json_str(s)
	}
}

/// Credential variants, tagged by `scheme`.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "scheme")]
pub enum Credential {
	/// Shared-secret request signing.
	#[serde(rename = "HMAC")]
	Hmac(HmacConfig),
	/// API key exchanged for bearer tokens.
	#[serde(rename = "TOKEN")]
	Token(TokenConfig),
}

/// HMAC credential fields.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HmacConfig {
	/// User placed in front of the digest.
	#[serde(default)]
	pub user: String,
	/// Shared secret.
	#[serde(default)]
	pub secret: Secret,
}
impl HmacConfig {
	/// Builds the signing strategy.
	pub fn strategy(&self, verbose: bool) -> Result<HmacStrategy, ConfigError> {
		Ok(HmacStrategy::new(&self.user, self.secret.clone())?.with_verbose(verbose))
	}
}

/// Token credential fields.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenConfig {
	/// API key exchanged at the identity endpoint.
	#[serde(default)]
	pub apikey: Secret,
	/// Identity endpoint URL.
	#[serde(default)]
	pub identity_endpoint: String,
	/// Sends `API-KEY <apikey>` instead of bearer tokens.
	#[serde(default)]
	pub use_raw_apikey: bool,
	/// Fraction of the declared token lifetime to use.
	#[serde(default = "default_expiry_threshold")]
	pub token_expiry_threshold: f64,
	/// Upper bound on one mint call, in milliseconds; applies to the default transport.
	#[serde(default)]
	pub mint_timeout_ms: Option<u64>,
}
impl TokenConfig {
	/// Builder pre-populated from these fields.
	pub fn builder(&self, verbose: bool) -> TokenStrategyBuilder {
		let builder = TokenStrategy::builder()
			.apikey(self.apikey.clone())
			.identity_endpoint(self.identity_endpoint.clone())
			.use_raw_apikey(self.use_raw_apikey)
			.expiry_threshold(self.token_expiry_threshold)
			.verbose(verbose);

		match self.mint_timeout_ms {
			Some(ms) => builder.mint_timeout(StdDuration::from_millis(ms)),
			None => builder,
		}
	}
}
impl Default for TokenConfig {
	fn default() -> Self {
		Self {
			apikey: Secret::default(),
			identity_endpoint: String::new(),
			use_raw_apikey: false,
			token_expiry_threshold: DEFAULT_EXPIRY_THRESHOLD,
			mint_timeout_ms: None,
		}
	}
}

fn default_expiry_threshold() -> f64 {
	DEFAULT_EXPIRY_THRESHOLD
}
