//! Request authentication for Globalization Pipeline REST clients: HMAC request signing and
//! identity-service bearer tokens with an expiry-aware shared cache, behind one interceptor
//! contract.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod http;
pub mod interceptor;
pub mod obs;
pub mod request;
pub mod strategy;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
#[doc(hidden)]
pub mod _preludet {
	//! Convenience re-exports and fixtures for integration tests.

	pub use crate::_prelude::*;

	// self
	use crate::{
		cache::MemoryTokenCache,
		clock::ManualClock,
		http::ReqwestHttpClient,
		strategy::{TokenStrategy, TokenStrategyBuilder},
	};

	/// Instant every deterministic test starts from.
	pub const TEST_EPOCH: OffsetDateTime = time::macros::datetime!(2025-01-01 00:00 UTC);

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Token strategy builder wired to a private cache, the test transport, and `clock`.
	pub fn test_token_strategy(
		identity_endpoint: &str,
		apikey: &str,
		cache: Arc<MemoryTokenCache>,
		clock: &ManualClock,
	) -> TokenStrategyBuilder {
		TokenStrategy::builder()
			.apikey(apikey)
			.identity_endpoint(identity_endpoint)
			.cache(cache)
			.http_client(Arc::new(test_reqwest_http_client()))
			.clock(Arc::new(clock.clone()))
	}

	/// JSON body of a successful identity endpoint response.
	pub fn token_response(access_token: &str, expires_in: i64) -> String {
		format!(
			"{{\"access_token\":\"{access_token}\",\"refresh_token\":\"not-used\",\
			 \"token_type\":\"Bearer\",\"expires_in\":{expires_in},\"scope\":\"ibm openid\"}}"
		)
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use auth::{Authorization, Secret};
pub use config::{AuthConfig, Credential};
pub use interceptor::RequestInterceptor;
pub use request::{OutgoingRequest, RequestBody};
#[cfg(feature = "reqwest")] pub use reqwest;
pub use strategy::{HmacStrategy, TokenStrategy};
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
