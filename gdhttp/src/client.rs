use std::time::Duration;

use bytes::Bytes;
use gdhttp_core::{Credential, Error, Result, Signer, Url};
use http::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, CONNECTION, CONTENT_TYPE, USER_AGENT,
};
use http::Method;
use http_body_util::BodyExt;
use log::debug;

use crate::dump::Hook;

/// Headers every request starts from.
fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("gdhttp/", env!("CARGO_PKG_VERSION"))),
    );
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("application/json"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

    headers
}

/// The timeout for a flag value in seconds. Zero disables the limit, as the
/// flag has always behaved.
fn request_timeout(secs: u64) -> Option<Duration> {
    if secs == 0 {
        return None;
    }

    Some(Duration::from_secs(secs))
}

/// The request items only become a body on methods that carry one.
fn request_body(method: &Method, params: Bytes) -> Bytes {
    if params.is_empty()
        || *method == Method::GET
        || *method == Method::HEAD
        || *method == Method::OPTIONS
    {
        return Bytes::new();
    }

    params
}

/// HTTP client that assembles, signs and sends one request at a time.
pub struct Client {
    http: reqwest::Client,
    credential: Credential,
}

impl Client {
    /// Build a client with the connection timeout applied. A timeout of
    /// zero seconds means no timeout at all.
    pub fn new(credential: Credential, timeout_secs: u64) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = request_timeout(timeout_secs) {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| Error::unexpected("building http client failed").with_source(e))?;

        Ok(Self { http, credential })
    }

    /// Assemble, sign and dispatch a request, feeding the hook on the way.
    pub async fn do_request(
        &self,
        method: Method,
        url: &Url,
        params: Bytes,
        no_auth: bool,
        hook: &dyn Hook,
    ) -> Result<()> {
        let body = request_body(&method, params);

        let mut req = http::Request::builder()
            .method(method)
            .uri(url.as_str())
            .body(body)?;
        req.headers_mut().extend(default_headers());

        if !no_auth {
            let signer = Signer::new(self.credential.clone());
            let (mut parts, body) = req.into_parts();
            signer.sign(&mut parts)?;
            req = http::Request::from_parts(parts, body);
        }

        hook.on_request(&req);

        debug!("sending {} {}", req.method(), req.uri());
        let req = reqwest::Request::try_from(req)
            .map_err(|e| Error::request_invalid("request conversion failed").with_source(e))?;
        let resp: http::Response<reqwest::Body> = self
            .http
            .execute(req)
            .await
            .map_err(|e| Error::network(format!("request failed: {e}")).with_source(e))?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| {
                Error::network(format!("reading response body failed: {e}")).with_source(e)
            })?;
        let resp = http::Response::from_parts(parts, bs);

        hook.on_response(&resp);
        Ok(())
    }
}
