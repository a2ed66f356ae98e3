//! Signs a JSON request with the HMAC interceptor and prints the headers the server would use
//! to verify it.

// crates.io
use color_eyre::Result;
use serde_json::json;
// self
use gaas_auth::{
	HmacStrategy, RequestInterceptor,
	request::{OutgoingRequest, RequestBody},
	strategy::{SignatureDate, hmac::GP_DATE},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let strategy = HmacStrategy::new("MyUser", "MySecret")?
		.with_date(SignatureDate::Rendered("Mon, 30 Jun 2014 00:00:00 -0000".into()));
	let mut request = OutgoingRequest::new("https", "http://example.com/gaas")
		.with_body(RequestBody::json(&json!({ "param": "value" }))?);

	strategy.apply(&mut request).await?;

	println!("Authorization: {}", request.authorization().unwrap_or_default());
	println!("{GP_DATE}: {}", request.header(GP_DATE).unwrap_or_default());

	Ok(())
}
