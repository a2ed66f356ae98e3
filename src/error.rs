//! Crate-level error types shared by both authentication strategies.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Missing or invalid credential configuration; never retried.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Malformed outgoing request descriptor.
	#[error(transparent)]
	Signing(#[from] SigningError),
	/// Identity endpoint could not mint a token for this call.
	#[error(transparent)]
	TokenFetch(#[from] TokenFetchError),
}

/// Configuration failures raised while constructing a strategy.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A required credential field is absent or empty.
	#[error("Credential field `{field}` is required.")]
	MissingField {
		/// Configuration field name.
		field: &'static str,
	},
	/// User or scheme name failed validation.
	#[error(transparent)]
	InvalidIdentifier(#[from] crate::auth::IdentifierError),
	/// Identity endpoint is not a valid absolute URL.
	#[error("Identity endpoint `{endpoint}` is not a valid URL.")]
	InvalidEndpoint {
		/// Endpoint as configured.
		endpoint: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Expiry threshold outside `(0, 1]`.
	#[error("Token expiry threshold must be within (0, 1], got {value}.")]
	InvalidThreshold {
		/// Rejected threshold.
		value: f64,
	},
	/// Mint timeout must be non-zero.
	#[error("Token mint timeout must be greater than zero.")]
	InvalidMintTimeout,
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Configuration document could not be parsed.
	#[error("Authentication configuration is malformed.")]
	Malformed {
		/// Structured parsing failure, including the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Per-call failures caused by a malformed request descriptor.
#[derive(Debug, ThisError)]
pub enum SigningError {
	/// Descriptor has no header mapping to decorate.
	#[error("Request `{method} {url}` has no header mapping to authenticate.")]
	MissingHeaders {
		/// Request method.
		method: String,
		/// Request URL.
		url: String,
	},
	/// Structured body could not be rendered to its wire form.
	#[error("Request body could not be serialized.")]
	BodySerialization(#[from] serde_json::Error),
	/// Request method is not a valid HTTP token.
	#[error("Request method `{method}` is not a valid HTTP method.")]
	InvalidMethod {
		/// Rejected method.
		method: String,
	},
	/// Signature date could not be rendered.
	#[error("Signature date could not be rendered.")]
	DateFormat(#[from] time::error::Format),
	/// Secret was rejected as an HMAC key.
	#[error("Secret cannot be used as an HMAC-SHA1 key.")]
	InvalidKey,
}

/// Failures while minting a bearer token from the identity endpoint.
///
/// Every variant names the endpoint and the credential fingerprint; none carries the API
/// key or any token material.
#[derive(Debug, ThisError)]
pub enum TokenFetchError {
	/// The endpoint could not be reached or the connection failed mid-flight.
	#[error("Identity endpoint {endpoint} is unreachable for credential {credential}.")]
	Transport {
		/// Identity endpoint URL.
		endpoint: String,
		/// Fingerprint of the API key.
		credential: String,
		/// Transport failure.
		#[source]
		source: TransportError,
	},
	/// The endpoint answered with a non-200 status.
	#[error(
		"Identity endpoint {endpoint} rejected credential {credential} with status {status}."
	)]
	Status {
		/// Identity endpoint URL.
		endpoint: String,
		/// Fingerprint of the API key.
		credential: String,
		/// HTTP status code.
		status: u16,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
		/// Truncated response body.
		body_preview: String,
	},
	/// The endpoint answered 200 with a body that is not a token response.
	#[error("Identity endpoint {endpoint} returned malformed JSON for credential {credential}.")]
	Parse {
		/// Identity endpoint URL.
		endpoint: String,
		/// Fingerprint of the API key.
		credential: String,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// The token response declared an unusable lifetime.
	#[error(
		"Identity endpoint {endpoint} returned an unusable expires_in ({expires_in}) for credential {credential}."
	)]
	InvalidExpiresIn {
		/// Identity endpoint URL.
		endpoint: String,
		/// Fingerprint of the API key.
		credential: String,
		/// Declared lifetime in seconds.
		expires_in: i64,
	},
}
impl TokenFetchError {
	/// Returns `true` when the failure came from the transport timing out.
	pub fn is_timeout(&self) -> bool {
		matches!(self, Self::Transport { source: TransportError::Timeout { .. }, .. })
	}
}

/// Transport-level failures (network, IO, timeouts).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the identity endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The request exceeded the transport timeout.
	#[error("Request to the identity endpoint timed out.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the identity endpoint.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Timeout { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::timeout(e) } else { Self::network(e) }
	}
}
