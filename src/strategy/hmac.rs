//! HMAC-SHA1 request signing.
//!
//! The signing input is `method + "\n" + url + "\n" + date + "\n" + body`, with LF separators
//! and no trailing newline. The digest is base64 encoded and rendered as
//! `"<scheme> <user>:<digest>"`. The same date string is written to `GP-Date` so the server
//! can rebuild the input.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use time::{UtcOffset, format_description::BorrowedFormatItem, macros::format_description};
// self
use crate::{
	_prelude::*,
	auth::{AUTHORIZATION, SchemeName, Secret, UserId},
	clock::{Clock, SystemClock},
	error::{ConfigError, SigningError},
	interceptor::{self, InterceptFuture, RequestInterceptor},
	obs::{self, ApplyOutcome, AuthSpan, SchemeKind},
	request::OutgoingRequest,
};

/// Scheme literal used when none is configured.
pub const DEFAULT_SCHEME: &str = "GaaS-HMAC";
/// Header that carries the date string used in the signing input.
pub const GP_DATE: &str = "GP-Date";

const RFC1123_GMT: &[BorrowedFormatItem<'static>] = format_description!(
	"[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

/// Date source for the signing input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SignatureDate {
	/// Current time from the strategy's clock.
	#[default]
	Now,
	/// Fixed instant, rendered as RFC 1123 GMT.
	Fixed(OffsetDateTime),
	/// Pre-rendered date string, used verbatim.
	Rendered(String),
}

/// Everything the signature covers besides the credentials.
#[derive(Clone, Copy, Debug)]
pub struct SigningInput<'a> {
	/// Request method, as sent.
	pub method: &'a str,
	/// Absolute request URL, as sent.
	pub url: &'a str,
	/// Rendered date string.
	pub date: &'a str,
	/// Exact wire bytes of the body; empty when there is none.
	pub body: &'a [u8],
}
impl SigningInput<'_> {
	/// Canonical byte string fed to HMAC-SHA1.
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut out = Vec::with_capacity(
			self.method.len() + self.url.len() + self.date.len() + self.body.len() + 3,
		);

		for part in [self.method.as_bytes(), self.url.as_bytes(), self.date.as_bytes()] {
			out.extend_from_slice(part);
			out.push(b'\n');
		}

		out.extend_from_slice(self.body);

		out
	}
}

/// Computes the `Authorization` value for one request.
///
/// Pure: identical inputs always yield the identical header.
pub fn sign(
	scheme: &SchemeName,
	user: &UserId,
	secret: &Secret,
	input: &SigningInput,
) -> Result<String, SigningError> {
	let mut mac = <Hmac<Sha1>>::new_from_slice(secret.expose().as_bytes())
		.map_err(|_| SigningError::InvalidKey)?;

	mac.update(&input.to_bytes());

	let digest = STANDARD.encode(mac.finalize().into_bytes());

	Ok(format!("{scheme} {user}:{digest}"))
}

/// Renders `instant` as an RFC 1123 date in GMT, e.g. `Mon, 30 Jun 2014 00:00:00 GMT`.
pub fn rfc1123(instant: OffsetDateTime) -> Result<String, SigningError> {
	Ok(instant.to_offset(UtcOffset::UTC).format(RFC1123_GMT)?)
}

/// Stateless interceptor signing every request with a shared HMAC secret.
#[derive(Clone, Debug)]
pub struct HmacStrategy {
	scheme: SchemeName,
	user: UserId,
	secret: Secret,
	date: SignatureDate,
	clock: Arc<dyn Clock>,
	verbose: bool,
}
impl HmacStrategy {
	/// Creates a strategy for `user` and `secret`; both must be non-empty.
	pub fn new(user: impl AsRef<str>, secret: impl Into<Secret>) -> Result<Self, ConfigError> {
		let user = user.as_ref();
		let secret = secret.into();

		if user.is_empty() {
			return Err(ConfigError::MissingField { field: "user" });
		}
		if secret.is_empty() {
			return Err(ConfigError::MissingField { field: "secret" });
		}

		Ok(Self {
			scheme: SchemeName::new(DEFAULT_SCHEME)?,
			user: UserId::new(user)?,
			secret,
			date: SignatureDate::Now,
			clock: Arc::new(SystemClock),
			verbose: false,
		})
	}

	/// Overrides the scheme literal that prefixes the header.
	pub fn with_scheme(mut self, scheme: SchemeName) -> Self {
		self.scheme = scheme;

		self
	}

	/// Overrides the date source; production code keeps [`SignatureDate::Now`].
	pub fn with_date(mut self, date: SignatureDate) -> Self {
		self.date = date;

		self
	}

	/// Replaces the clock consulted by [`SignatureDate::Now`].
	pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.clock = clock;

		self
	}

	/// Emits redacted debug events for every signed request.
	pub fn with_verbose(mut self, verbose: bool) -> Self {
		self.verbose = verbose;

		self
	}

	/// Configured user.
	pub fn user(&self) -> &UserId {
		&self.user
	}

	/// Configured scheme literal.
	pub fn scheme_name(&self) -> &SchemeName {
		&self.scheme
	}

	/// Signs `request` in place, overwriting `Authorization` and `GP-Date`.
	///
	/// Schema URLs are passed through untouched.
	pub fn decorate(&self, request: &mut OutgoingRequest) -> Result<()> {
		const KIND: SchemeKind = SchemeKind::Hmac;

		let _span = AuthSpan::new(KIND, "decorate").entered();

		obs::record_apply_outcome(KIND, ApplyOutcome::Attempt);

		if interceptor::is_schema_url(&request.url) {
			if self.verbose {
				obs::verbose_event(KIND, "schema request left unauthenticated", &request.url);
			}

			obs::record_apply_outcome(KIND, ApplyOutcome::Skipped);

			return Ok(());
		}

		let result = self.sign_in_place(request);

		match &result {
			Ok(()) => obs::record_apply_outcome(KIND, ApplyOutcome::Success),
			Err(_) => obs::record_apply_outcome(KIND, ApplyOutcome::Failure),
		}

		result.map_err(Into::into)
	}

	fn sign_in_place(&self, request: &mut OutgoingRequest) -> Result<(), SigningError> {
		let date = self.render_date()?;
		let value = {
			let body = request.body_bytes()?;
			let input = SigningInput {
				method: &request.method,
				url: &request.url,
				date: &date,
				body: &body,
			};

			sign(&self.scheme, &self.user, &self.secret, &input)?
		};

		if self.verbose {
			obs::verbose_event(
				SchemeKind::Hmac,
				"signed request",
				&format_args!(
					"{} {} date={date} authorization={} {}:<redacted>",
					request.method, request.url, self.scheme, self.user
				),
			);
		}

		let headers = request.headers_mut()?;

		headers.insert(AUTHORIZATION, value);
		headers.insert(GP_DATE, date);

		Ok(())
	}

	fn render_date(&self) -> Result<String, SigningError> {
		match &self.date {
			SignatureDate::Now => rfc1123(self.clock.now()),
			SignatureDate::Fixed(instant) => rfc1123(*instant),
			SignatureDate::Rendered(rendered) => Ok(rendered.clone()),
		}
	}
}
impl RequestInterceptor for HmacStrategy {
	fn scheme(&self) -> SchemeKind {
		SchemeKind::Hmac
	}

	fn apply<'a>(&'a self, request: &'a mut OutgoingRequest) -> InterceptFuture<'a> {
		Box::pin(async move { self.decorate(request) })
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;
	use crate::{clock::ManualClock, request::RequestBody};

	const REFERENCE_DATE: &str = "Mon, 30 Jun 2014 00:00:00 -0000";

	fn strategy() -> HmacStrategy {
		HmacStrategy::new("MyUser", "MySecret")
			.expect("Reference credentials should be accepted.")
			.with_date(SignatureDate::Rendered(REFERENCE_DATE.into()))
	}

	#[test]
	fn signing_input_joins_parts_with_lf() {
		let input = SigningInput { method: "GET", url: "u", date: "d", body: b"b" };

		assert_eq!(input.to_bytes(), b"GET\nu\nd\nb");

		let empty = SigningInput { body: b"", ..input };

		assert_eq!(empty.to_bytes(), b"GET\nu\nd\n");
	}

	#[test]
	fn rfc1123_renders_gmt() {
		let rendered = rfc1123(macros::datetime!(2014-06-30 02:00 +2))
			.expect("RFC 1123 rendering should succeed.");

		assert_eq!(rendered, "Mon, 30 Jun 2014 00:00:00 GMT");
	}

	#[test]
	fn reference_vector_without_body() {
		let mut request = OutgoingRequest::new("https", "http://example.com/gaas");

		strategy().decorate(&mut request).expect("Signing should succeed.");

		assert_eq!(
			request.authorization(),
			Some("GaaS-HMAC MyUser:3XqbcIALzsjdtGRdlxKv0jk9R0Q=")
		);
		assert_eq!(request.header(GP_DATE), Some(REFERENCE_DATE));
	}

	#[test]
	fn fixed_dates_use_the_injected_instant() {
		let mut request = OutgoingRequest::new("https", "http://example.com/gaas");
		let strategy = strategy()
			.with_date(SignatureDate::Fixed(macros::datetime!(2014-06-30 00:00 UTC)));

		strategy.decorate(&mut request).expect("Signing should succeed.");

		assert_eq!(
			request.authorization(),
			Some("GaaS-HMAC MyUser:FW7e9no2BZH8j53oZt4tI3+ySbQ=")
		);
	}

	#[test]
	fn now_reads_the_clock() {
		let clock = ManualClock::new(macros::datetime!(2014-06-30 00:00 UTC));
		let strategy = strategy().with_date(SignatureDate::Now).with_clock(Arc::new(clock));
		let mut request = OutgoingRequest::new("GET", "http://example.com/gaas")
			.with_body(RequestBody::form([("param", "value")]));

		strategy.decorate(&mut request).expect("Signing should succeed.");

		assert_eq!(request.header(GP_DATE), Some("Mon, 30 Jun 2014 00:00:00 GMT"));
		assert_eq!(
			request.authorization(),
			Some("GaaS-HMAC MyUser:mwh9GP3AlhHXRasldzKStt9rnqU=")
		);
	}

	#[test]
	fn construction_rejects_missing_fields() {
		assert!(matches!(
			HmacStrategy::new("", "MySecret"),
			Err(ConfigError::MissingField { field: "user" })
		));
		assert!(matches!(
			HmacStrategy::new("MyUser", ""),
			Err(ConfigError::MissingField { field: "secret" })
		));
		assert!(matches!(
			SchemeName::new("").map_err(ConfigError::from),
			Err(ConfigError::InvalidIdentifier(_))
		));
	}

	#[test]
	fn custom_scheme_prefixes_the_header() {
		let scheme = SchemeName::new("GP-HMAC").expect("Scheme should be valid.");
		let strategy = strategy().with_scheme(scheme);
		let mut request = OutgoingRequest::new("https", "http://example.com/gaas");

		assert_eq!(strategy.scheme_name().as_ref(), "GP-HMAC");
		assert_eq!(strategy.user().as_ref(), "MyUser");

		strategy.decorate(&mut request).expect("Signing should succeed.");

		assert!(
			request.authorization().is_some_and(|value| value.starts_with("GP-HMAC MyUser:"))
		);
	}

	#[test]
	fn debug_never_prints_the_secret() {
		assert!(!format!("{:?}", strategy()).contains("MySecret"));
	}
}
