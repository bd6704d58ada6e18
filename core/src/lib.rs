//! Core components for talking to GeneDock style API gateways.
//!
//! This crate implements the request side of the GeneDock authorization
//! scheme: building the final request URL from command line shorthand and
//! signing the request with an HMAC over its canonical form.
//!
//! ## Overview
//!
//! - [`parse_positional_arguments`] / [`build_url`]: turn raw command line
//!   tokens into an HTTP method plus a concrete [`Url`]
//! - [`Signer`]: derives the canonical string for a request and sets its
//!   `Date` and `Authorization` headers
//! - [`Credential`]: the access key pair the signature is derived from
//!
//! ## Example
//!
//! ```no_run
//! use gdhttp_core::{Credential, Signer};
//!
//! # fn example() -> gdhttp_core::Result<()> {
//! let signer = Signer::new(Credential::new("my-access-key", "my-secret-key"));
//!
//! let mut parts = http::Request::builder()
//!     .method("GET")
//!     .uri("http://localhost:8000/v1/jobs")
//!     .body(())
//!     .unwrap()
//!     .into_parts()
//!     .0;
//!
//! signer.sign(&mut parts)?;
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod constants;

mod credential;
pub use credential::Credential;
mod error;
pub use error::{Error, ErrorKind, Result};
mod request;
pub use request::SigningRequest;
mod sign;
pub use sign::{Algorithm, Signer};
mod uri;
pub use uri::{build_url, parse_positional_arguments, PositionalArguments, RequestItem};

pub use url::Url;
