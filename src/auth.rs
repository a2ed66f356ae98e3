//! Credential identifiers, redacted secrets, token models, and the authorization value.

pub mod authorization;
pub mod id;
pub mod secret;
pub mod token;

pub use authorization::*;
pub use id::*;
pub use secret::*;
pub use token::*;
