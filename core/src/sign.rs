//! GeneDock authorization scheme signer.

use std::fmt;
use std::fmt::Write;
use std::str::FromStr;

use http::header::AUTHORIZATION;
use http::header::CONTENT_TYPE;
use http::header::DATE;
use http::HeaderValue;
use log::debug;

use crate::constants::*;
use crate::credential::Credential;
use crate::hash::base64_hmac_sha1;
use crate::request::SigningRequest;
use crate::time::format_http_date;
use crate::time::now;
use crate::time::DateTime;
use crate::Error;
use crate::Result;

/// Signature algorithm tag carried by the authorization scheme.
///
/// Unknown tags are unrepresentable: parsing one fails instead of falling
/// back to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// HMAC-SHA1 over the canonical string, base64 encoded.
    #[default]
    HmacSha1V1,
}

impl Algorithm {
    /// The wire tag of this algorithm.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::HmacSha1V1 => ALGORITHM_HMAC_SHA1_V1,
        }
    }

    fn sign(&self, key: &[u8], content: &[u8]) -> String {
        match self {
            Algorithm::HmacSha1V1 => base64_hmac_sha1(key, content),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            ALGORITHM_HMAC_SHA1_V1 => Ok(Algorithm::HmacSha1V1),
            _ => Err(Error::request_invalid(format!(
                "unsupported signature algorithm: {s}"
            ))),
        }
    }
}

/// Signer that implements the GeneDock request authorization scheme.
///
/// Signing sets two headers on the request: `Date` with the signing time,
/// and `Authorization` carrying `GeneDock <access_key_id>:<signature>`.
#[derive(Debug)]
pub struct Signer {
    credential: Credential,
    algorithm: Algorithm,
    time: Option<DateTime>,
}

impl Signer {
    /// Create a signer from the credential the signature derives from.
    pub fn new(credential: Credential) -> Self {
        Self {
            credential,
            algorithm: Algorithm::default(),
            time: None,
        }
    }

    /// Specify the signature algorithm.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Sign the request in place.
    ///
    /// The canonical string and both headers are computed from one
    /// timestamp. Headers and body must be final before this is called.
    pub fn sign(&self, parts: &mut http::request::Parts) -> Result<()> {
        let now = self.time.unwrap_or_else(now);
        let mut ctx = SigningRequest::build(parts);

        let string_to_sign = string_to_sign(&ctx, now)?;
        let signature = self.algorithm.sign(
            self.credential.access_key_secret.as_bytes(),
            string_to_sign.as_bytes(),
        );

        ctx.headers.insert(DATE, format_http_date(now).parse()?);
        ctx.headers.insert(AUTHORIZATION, {
            let mut value: HeaderValue =
                format!("{AUTH_SCHEME} {}:{}", self.credential.access_key_id, signature).parse()?;
            value.set_sensitive(true);

            value
        });

        ctx.apply(parts);
        Ok(())
    }
}

/// Construct string to sign.
///
/// ## Format
///
/// ```text
/// VERB + "\n" +
/// Content-MD5 + "\n" +
/// Content-Type + "\n" +
/// Date + "\n" +
/// CanonicalizedHeaders + "\n" +
/// CanonicalizedResource;
/// ```
///
/// The CanonicalizedHeaders block and its newline are left out entirely when
/// the request carries no `x-gd-` headers.
fn string_to_sign(ctx: &SigningRequest, now: DateTime) -> Result<String> {
    let mut s = String::new();
    s.write_str(ctx.method.as_str())?;
    s.write_str("\n")?;
    s.write_str(ctx.header_get_or_default(CONTENT_MD5)?)?;
    s.write_str("\n")?;
    s.write_str(ctx.header_get_or_default(&CONTENT_TYPE)?)?;
    s.write_str("\n")?;
    writeln!(&mut s, "{}", format_http_date(now))?;

    {
        let headers = canonicalize_header(ctx);
        if !headers.is_empty() {
            writeln!(&mut s, "{headers}")?;
        }
    }
    write!(&mut s, "{}", canonicalize_resource(ctx))?;

    debug!("string to sign: {}", &s);
    Ok(s)
}

fn canonicalize_header(ctx: &SigningRequest) -> String {
    SigningRequest::header_to_string(ctx.header_to_vec_with_prefix(GD_HEADER_PREFIX), ":", "\n")
}

fn canonicalize_resource(ctx: &SigningRequest) -> String {
    let path = ctx.path_percent_decoded();
    if ctx.query.is_empty() {
        return path.into_owned();
    }

    format!(
        "{path}?{}",
        SigningRequest::query_to_encoded_string(ctx.query.clone())
    )
}
