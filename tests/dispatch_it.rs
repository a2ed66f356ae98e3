// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use gaas_auth::{
	_preludet::*,
	auth::{SchemeName, UserId},
	cache::MemoryTokenCache,
	config::AuthConfig,
	interceptor::RequestInterceptor,
	request::{OutgoingRequest, RequestBody},
	strategy::{
		HmacStrategy, SignatureDate, SigningInput,
		hmac::{self, GP_DATE},
	},
};

#[tokio::test]
async fn signed_requests_reach_the_server_with_the_signed_body() {
	let server = MockServer::start_async().await;
	let url = server.url("/translate/rest/bundles/demo");
	let body = json!({ "sourceLanguage": "en", "targetLanguages": ["fr", "de"] });
	let canonical = "{\"sourceLanguage\":\"en\",\"targetLanguages\":[\"fr\",\"de\"]}";
	let date = "Mon, 30 Jun 2014 00:00:00 GMT";
	let expected = hmac::sign(
		&SchemeName::new(hmac::DEFAULT_SCHEME).expect("Scheme should be valid."),
		&UserId::new("MyUser").expect("User should be valid."),
		&"MySecret".into(),
		&SigningInput { method: "PUT", url: &url, date, body: canonical.as_bytes() },
	)
	.expect("Reference signature should compute.");
	let mock = server
		.mock_async(|when, then| {
			when.method(PUT)
				.path("/translate/rest/bundles/demo")
				.header("authorization", expected.as_str())
				.header(GP_DATE.to_ascii_lowercase(), date)
				.header("content-type", "application/json")
				.body(canonical);
			then.status(201);
		})
		.await;
	let strategy = HmacStrategy::new("MyUser", "MySecret")
		.expect("HMAC strategy should build.")
		.with_date(SignatureDate::Fixed(time::macros::datetime!(2014-06-30 00:00 UTC)));
	let mut request = OutgoingRequest::new("PUT", url)
		.with_body(RequestBody::json(&body).expect("JSON body should build."));

	strategy.apply(&mut request).await.expect("Signing should succeed.");

	let response = request
		.to_reqwest(&ReqwestClient::new())
		.expect("Request should convert.")
		.send()
		.await
		.expect("Request should be sent.");

	assert_eq!(response.status().as_u16(), 201);

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn configured_token_interceptor_authenticates_rest_calls() {
	let server = MockServer::start_async().await;
	let identity = server
		.mock_async(|when, then| {
			when.method(POST).path("/identity/token");
			then.status(200)
				.header("content-type", "application/json")
				.body(token_response("dispatch-token", 3600));
		})
		.await;
	let bundles = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/translate/rest/bundles")
				.header("authorization", "Bearer dispatch-token");
			then.status(200).header("content-type", "application/json").body("{\"bundles\":[]}");
		})
		.await;
	let config = AuthConfig::from_json_str(
		&json!({
			"scheme": "TOKEN",
			"apikey": "dispatch-key",
			"identityEndpoint": server.url("/identity/token"),
			"tokenExpiryThreshold": 0.5,
		})
		.to_string(),
	)
	.expect("Token config should parse.");
	let interceptor = config
		.interceptor_with(
			Arc::new(MemoryTokenCache::default()),
			Arc::new(test_reqwest_http_client()),
		)
		.expect("Token interceptor should build.");
	let client = ReqwestClient::new();

	for _ in 0..3 {
		let mut request = OutgoingRequest::new("GET", server.url("/translate/rest/bundles"));

		interceptor.apply(&mut request).await.expect("Apply should succeed.");

		let response = request
			.to_reqwest(&client)
			.expect("Request should convert.")
			.send()
			.await
			.expect("Request should be sent.");

		assert_eq!(response.status().as_u16(), 200);
	}

	identity.assert_calls_async(1).await;
	bundles.assert_calls_async(3).await;
}

#[test]
fn invalid_methods_are_rejected_before_sending() {
	let request = OutgoingRequest::new("BAD METHOD", "https://gp.example.com/rest");
	let err = request.to_reqwest(&ReqwestClient::new()).expect_err("Invalid methods must fail.");

	assert!(err.to_string().contains("BAD METHOD"));
}
