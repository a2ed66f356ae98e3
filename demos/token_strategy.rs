//! Demonstrates the token interceptor against a mock identity endpoint: the first call mints
//! a bearer token, later calls reuse the cached entry, and schema requests stay
//! unauthenticated.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use gaas_auth::{
	cache::MemoryTokenCache,
	config::AuthConfig,
	http::ReqwestHttpClient,
	interceptor::RequestInterceptor,
	request::OutgoingRequest,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let identity = server
		.mock_async(|when, then| {
			when.method(POST).path("/identity/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"Bearer\",\"expires_in\":3600}",
			);
		})
		.await;
	let config: AuthConfig = format!(
		r#"{{"scheme":"TOKEN","apikey":"demo-apikey","identityEndpoint":"{}","verbose":true}}"#,
		server.url("/identity/token")
	)
	.parse()?;
	let interceptor = config.interceptor_with(
		Arc::new(MemoryTokenCache::default()),
		Arc::new(ReqwestHttpClient::default()),
	)?;

	for path in ["/translate/rest/bundles", "/translate/rest/bundles/demo", "/rest/swagger.json"] {
		let mut request = OutgoingRequest::new("GET", format!("https://gp.example.com{path}"));

		interceptor.apply(&mut request).await?;

		println!("{path} -> {:?}", request.headers);
	}

	println!("identity endpoint calls: {}", identity.calls_async().await);

	Ok(())
}
