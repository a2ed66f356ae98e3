//! Strongly typed identifiers that appear in rendered `Authorization` headers.

// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, Hash)]
		pub struct $name(String);
		impl $name {
			/// Creates a new identifier; only empty values are rejected.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				let view = value.as_ref();

				if view.is_empty() {
					return Err(IdentifierError::Empty { kind: $kind });
				}

				Ok(Self(view.to_owned()))
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
	};
}

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (user, scheme).
		kind: &'static str,
	},
}

def_id! { UserId, "HMAC user identifier placed in front of the digest.", "User" }
def_id! { SchemeName, "Authentication scheme literal that prefixes signed headers.", "Scheme" }

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn identifiers_reject_only_empty_values() {
		assert_eq!(SchemeName::new(""), Err(IdentifierError::Empty { kind: "Scheme" }));
		assert_eq!(UserId::new(""), Err(IdentifierError::Empty { kind: "User" }));

		let user = UserId::new("My User").expect("Non-empty users should be accepted as is.");

		assert_eq!(user.as_ref(), "My User");
		assert_eq!(format!("{user:?}"), "User(My User)");
		assert_eq!(user.to_string(), "My User");
	}
}
