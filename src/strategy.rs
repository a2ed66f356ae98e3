//! The two authentication strategies behind
//! [`RequestInterceptor`](crate::interceptor::RequestInterceptor).

pub mod hmac;
pub mod token;

pub use self::{
	hmac::{HmacStrategy, SignatureDate, SigningInput},
	token::{TokenStrategy, TokenStrategyBuilder},
};
