//! Outgoing REST call descriptor decorated by the interceptors.
//!
//! The dispatch layer builds one [`OutgoingRequest`] per call, hands it to the configured
//! interceptor, then sends exactly what the descriptor holds. [`RequestBody::wire_bytes`]
//! is the only place a body is rendered, so the bytes the HMAC signer hashes are the bytes
//! the transport sends.

// std
use std::borrow::Cow;
// crates.io
use serde::{Serializer, ser::SerializeMap};
use serde_json::Value;
use url::form_urlencoded;
// self
use crate::{_prelude::*, auth::AUTHORIZATION, error::SigningError};

/// Insertion-ordered header mapping with case-insensitive names.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);
impl Headers {
	/// Returns the value for `name`, ignoring ASCII case.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.0
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}

	/// Sets `name`, overwriting an existing value in place.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
		let name = name.into();
		let value = value.into();

		match self.0.iter_mut().find(|(key, _)| key.eq_ignore_ascii_case(&name)) {
			Some(slot) => slot.1 = value,
			None => self.0.push((name, value)),
		}
	}

	/// Removes `name`, returning the previous value.
	pub fn remove(&mut self, name: &str) -> Option<String> {
		let idx = self.0.iter().position(|(key, _)| key.eq_ignore_ascii_case(name))?;

		Some(self.0.remove(idx).1)
	}

	/// Returns `true` if `name` is present.
	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	/// Iterates over `(name, value)` pairs in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
	}

	/// Number of headers.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns `true` when no headers are set.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl Debug for Headers {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_map()
			.entries(self.0.iter().map(|(key, value)| {
				if key.eq_ignore_ascii_case(AUTHORIZATION) {
					(key.as_str(), "<redacted>")
				} else {
					(key.as_str(), value.as_str())
				}
			}))
			.finish()
	}
}
impl<K, V> FromIterator<(K, V)> for Headers
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut headers = Self::default();

		for (key, value) in iter {
			headers.insert(key, value);
		}

		headers
	}
}

/// Body attached to an outgoing request.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
	/// Already-textual body, sent verbatim.
	Text(String),
	/// Raw bytes, sent verbatim.
	Bytes(Vec<u8>),
	/// Structured value, sent as canonical JSON (compact, keys sorted at every depth).
	Json(Value),
	/// Ordered pairs, sent as `application/x-www-form-urlencoded`.
	Form(Vec<(String, String)>),
}
impl RequestBody {
	/// Serializes any value into a [`RequestBody::Json`] body.
	pub fn json<T>(value: &T) -> Result<Self, SigningError>
	where
		T: ?Sized + Serialize,
	{
		Ok(Self::Json(serde_json::to_value(value)?))
	}

	/// Builds a [`RequestBody::Form`] body from ordered pairs.
	pub fn form<I, K, V>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self::Form(pairs.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
	}

	/// Exact bytes the transport sends for this body.
	pub fn wire_bytes(&self) -> Result<Cow<'_, [u8]>, SigningError> {
		Ok(match self {
			Self::Text(text) => Cow::Borrowed(text.as_bytes()),
			Self::Bytes(bytes) => Cow::Borrowed(bytes.as_slice()),
			Self::Json(value) => Cow::Owned(serde_json::to_vec(&Canonical(value))?),
			Self::Form(pairs) => {
				let encoded = form_urlencoded::Serializer::new(String::new())
					.extend_pairs(pairs.iter())
					.finish();

				Cow::Owned(encoded.into_bytes())
			},
		})
	}

	/// Content type implied by the variant, if any.
	///
	/// Text and byte bodies imply none; an already-serialized payload carries its own
	/// `Content-Type` header.
	pub fn content_type(&self) -> Option<&'static str> {
		match self {
			Self::Text(_) | Self::Bytes(_) => None,
			Self::Json(_) => Some("application/json"),
			Self::Form(_) => Some("application/x-www-form-urlencoded"),
		}
	}
}

/// Serializes a JSON value with object keys sorted, regardless of how `serde_json` maps are
/// ordered in this build.
struct Canonical<'a>(&'a Value);
impl Serialize for Canonical<'_> {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match self.0 {
			Value::Object(map) => {
				let mut entries = map.iter().collect::<Vec<_>>();

				entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));

				let mut out = serializer.serialize_map(Some(entries.len()))?;

				for (key, value) in entries {
					out.serialize_entry(key, &Canonical(value))?;
				}

				out.end()
			},
			Value::Array(items) => serializer.collect_seq(items.iter().map(Canonical)),
			other => other.serialize(serializer),
		}
	}
}

/// One REST call as seen by an interceptor.
#[derive(Clone, Debug, PartialEq)]
pub struct OutgoingRequest {
	/// HTTP method, exactly as it enters the signing input.
	pub method: String,
	/// Absolute request URL, exactly as it enters the signing input.
	pub url: String,
	/// Header mapping; `None` models a descriptor built without one.
	pub headers: Option<Headers>,
	/// Optional body.
	pub body: Option<RequestBody>,
}
impl OutgoingRequest {
	/// Creates a descriptor with an empty header mapping and no body.
	pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
		Self {
			method: method.into(),
			url: url.into(),
			headers: Some(Headers::default()),
			body: None,
		}
	}

	/// Attaches a body.
	pub fn with_body(mut self, body: RequestBody) -> Self {
		self.body = Some(body);

		self
	}

	/// Sets a header, creating the mapping if needed.
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.get_or_insert_with(Headers::default).insert(name, value);

		self
	}

	/// Drops the header mapping entirely.
	pub fn without_headers(mut self) -> Self {
		self.headers = None;

		self
	}

	/// Mutable header mapping, or [`SigningError::MissingHeaders`] when absent.
	pub fn headers_mut(&mut self) -> Result<&mut Headers, SigningError> {
		match self.headers.as_mut() {
			Some(headers) => Ok(headers),
			None => Err(SigningError::MissingHeaders {
				method: self.method.clone(),
				url: self.url.clone(),
			}),
		}
	}

	/// Current `Authorization` header value.
	pub fn authorization(&self) -> Option<&str> {
		self.header(AUTHORIZATION)
	}

	/// Current value of `name`.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.as_ref().and_then(|headers| headers.get(name))
	}

	/// Wire bytes of the body; empty when there is none.
	pub fn body_bytes(&self) -> Result<Cow<'_, [u8]>, SigningError> {
		match &self.body {
			Some(body) => body.wire_bytes(),
			None => Ok(Cow::Borrowed(&[])),
		}
	}

	/// Builds the reqwest request the dispatch layer sends for this descriptor.
	///
	/// The body bytes are the same bytes [`HmacStrategy`](crate::strategy::HmacStrategy)
	/// signed. A `Content-Type` is added only when the descriptor does not carry one.
	#[cfg(feature = "reqwest")]
	pub fn to_reqwest(&self, client: &ReqwestClient) -> Result<reqwest::RequestBuilder> {
		let method = reqwest::Method::from_bytes(self.method.as_bytes())
			.map_err(|_| SigningError::InvalidMethod { method: self.method.clone() })?;
		let mut builder = client.request(method, &self.url);

		if let Some(headers) = &self.headers {
			for (name, value) in headers.iter() {
				builder = builder.header(name, value);
			}
		}
		if let Some(body) = &self.body {
			let has_content_type =
				self.headers.as_ref().is_some_and(|headers| headers.contains("content-type"));

			if let (false, Some(content_type)) = (has_content_type, body.content_type()) {
				builder = builder.header("content-type", content_type);
			}

			builder = builder.body(body.wire_bytes()?.into_owned());
		}

		Ok(builder)
	}
}
