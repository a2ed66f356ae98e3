//! The capability both authentication strategies share: decorate one outgoing request.
//!
//! The dispatch collaborator holds exactly one `Arc<dyn RequestInterceptor>` per client and
//! awaits [`RequestInterceptor::apply`] before every REST call. An error from `apply` means
//! the call must not be sent.

// self
use crate::{_prelude::*, obs::SchemeKind, request::OutgoingRequest};

/// Path suffix of the API schema document, which is always fetched unauthenticated.
pub const SCHEMA_PATH_SUFFIX: &str = "/swagger.json";

/// Boxed future returned by [`RequestInterceptor::apply`].
pub type InterceptFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + 'a + Send>>;

/// Decorates outgoing requests with an `Authorization` header.
pub trait RequestInterceptor
where
	Self: Send + Sync,
{
	/// Scheme label used for spans and metrics.
	fn scheme(&self) -> SchemeKind;

	/// Mutates `request` in place. Only the `Authorization` (and, for HMAC, `GP-Date`)
	/// headers are touched.
	fn apply<'a>(&'a self, request: &'a mut OutgoingRequest) -> InterceptFuture<'a>;
}
impl<T> RequestInterceptor for Arc<T>
where
	T: ?Sized + RequestInterceptor,
{
	fn scheme(&self) -> SchemeKind {
		(**self).scheme()
	}

	fn apply<'a>(&'a self, request: &'a mut OutgoingRequest) -> InterceptFuture<'a> {
		(**self).apply(request)
	}
}

/// Returns `true` when `url` targets the schema/discovery document.
///
/// Only the path is inspected; query strings and fragments are ignored. Relative or otherwise
/// unparsable URLs fall back to a textual check of everything before `?` or `#`.
pub fn is_schema_url(url: &str) -> bool {
	match Url::parse(url) {
		Ok(parsed) => parsed.path().ends_with(SCHEMA_PATH_SUFFIX),
		Err(_) =>
			url.split(['?', '#']).next().is_some_and(|path| path.ends_with(SCHEMA_PATH_SUFFIX)),
	}
}
