use std::borrow::Cow;
use std::mem;

use http::header::AsHeaderName;
use http::HeaderMap;
use http::Method;

use crate::Result;

/// Canonicalization context for one request.
///
/// Built from [`http::request::Parts`] before signing and applied back once
/// the authentication headers are in place. Canonical string construction
/// only ever reads it through a shared reference.
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP path as it appears on the wire.
    pub path: String,
    /// Decoded query pairs in wire order.
    pub query: Vec<(String, String)>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing context from http::request::Parts.
    pub fn build(parts: &mut http::request::Parts) -> Self {
        let paq = parts.uri.path_and_query();
        let path = match paq.map(|v| v.path()) {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => "/".to_string(),
        };
        let query = paq
            .and_then(|v| v.query())
            .map(|v| {
                form_urlencoded::parse(v.as_bytes())
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect()
            })
            .unwrap_or_default();

        SigningRequest {
            method: parts.method.clone(),
            path,
            query,
            // Take the headers out of the request to avoid copy.
            // They are returned when the context is applied.
            headers: mem::take(&mut parts.headers),
        }
    }

    /// Apply the signing context back to http::request::Parts.
    ///
    /// Signing only adds headers, so the request line travels back untouched.
    pub fn apply(mut self, parts: &mut http::request::Parts) {
        mem::swap(&mut parts.headers, &mut self.headers);
    }

    /// Get the path percent decoded.
    pub fn path_percent_decoded(&self) -> Cow<'_, str> {
        percent_encoding::percent_decode_str(&self.path).decode_utf8_lossy()
    }

    /// Get header value by name.
    ///
    /// Returns empty string if header not found.
    #[inline]
    pub fn header_get_or_default(&self, key: impl AsHeaderName) -> Result<&str> {
        match self.headers.get(key) {
            Some(v) => Ok(v.to_str()?),
            None => Ok(""),
        }
    }

    /// Collect headers whose name carries the given prefix.
    ///
    /// Names arrive lowercased from [`HeaderMap`]. Values of a repeated name
    /// are joined with `,` in insertion order. A value that is not visible
    /// ASCII is skipped, and a name with no readable value at all is left out.
    pub fn header_to_vec_with_prefix(&self, prefix: &str) -> Vec<(String, String)> {
        self.headers
            .keys()
            .filter(|k| k.as_str().starts_with(prefix))
            .filter_map(|k| {
                let values = self
                    .headers
                    .get_all(k)
                    .iter()
                    .filter_map(|v| v.to_str().ok())
                    .collect::<Vec<_>>();
                if values.is_empty() {
                    return None;
                }

                Some((k.as_str().to_string(), values.join(",")))
            })
            .collect()
    }

    /// Convert sorted headers to string.
    ///
    /// ```shell
    /// [(a, b), (c, d)] => "a:b\nc:d"
    /// ```
    pub fn header_to_string(mut headers: Vec<(String, String)>, sep: &str, join: &str) -> String {
        let mut s = String::with_capacity(16);

        // Sort via header name.
        headers.sort();

        for (idx, (k, v)) in headers.into_iter().enumerate() {
            if idx != 0 {
                s.push_str(join);
            }

            s.push_str(&k);
            s.push_str(sep);
            s.push_str(&v);
        }

        s
    }

    /// Re-encode query pairs into a sorted query string.
    ///
    /// Pairs are ordered by key and then by value, so any arrival order of
    /// the same multiset of pairs yields the same string.
    pub fn query_to_encoded_string(mut query: Vec<(String, String)>) -> String {
        query.sort();

        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (k, v) in query {
            serializer.append_pair(&k, &v);
        }

        serializer.finish()
    }
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;
    use http::Uri;

    use super::*;

    fn parts_for(uri: &str) -> http::request::Parts {
        http::Request::get(Uri::try_from(uri).unwrap())
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    #[test]
    fn test_build_extracts_path_and_query() {
        let mut parts = parts_for("http://localhost:8000/v1/jobs?status=running&limit=10");
        let ctx = SigningRequest::build(&mut parts);

        assert_eq!(ctx.method, Method::GET);
        assert_eq!(ctx.path, "/v1/jobs");
        assert_eq!(
            ctx.query,
            vec![
                ("status".to_string(), "running".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_build_takes_headers_and_apply_returns_them() {
        let mut parts = parts_for("http://localhost/v1/jobs");
        parts
            .headers
            .insert("x-gd-user", HeaderValue::from_static("alice"));

        let ctx = SigningRequest::build(&mut parts);
        assert!(parts.headers.is_empty());

        ctx.apply(&mut parts);
        assert_eq!(
            parts.headers.get("x-gd-user"),
            Some(&HeaderValue::from_static("alice"))
        );
    }

    #[test]
    fn test_path_percent_decoded() {
        let mut parts = parts_for("http://localhost/v1/files/a%20b");
        let ctx = SigningRequest::build(&mut parts);
        assert_eq!(ctx.path_percent_decoded(), "/v1/files/a b");
    }

    #[test]
    fn test_header_to_vec_with_prefix_joins_repeated_values() {
        let mut parts = parts_for("http://localhost/");
        parts
            .headers
            .append("x-gd-tag", HeaderValue::from_static("a"));
        parts
            .headers
            .append("x-gd-tag", HeaderValue::from_static("b"));
        parts
            .headers
            .insert("content-type", HeaderValue::from_static("application/json"));

        let ctx = SigningRequest::build(&mut parts);
        assert_eq!(
            ctx.header_to_vec_with_prefix("x-gd-"),
            vec![("x-gd-tag".to_string(), "a,b".to_string())]
        );
    }

    #[test]
    fn test_header_to_string_sorts_by_name() {
        let headers = vec![
            ("x-gd-user".to_string(), "alice".to_string()),
            ("x-gd-trace-id".to_string(), "abc123".to_string()),
        ];
        assert_eq!(
            SigningRequest::header_to_string(headers, ":", "\n"),
            "x-gd-trace-id:abc123\nx-gd-user:alice"
        );
    }

    #[test]
    fn test_query_to_encoded_string_sorts_and_encodes() {
        let query = vec![
            ("status".to_string(), "running".to_string()),
            ("limit".to_string(), "10".to_string()),
            ("name".to_string(), "hello world".to_string()),
        ];
        assert_eq!(
            SigningRequest::query_to_encoded_string(query),
            "limit=10&name=hello+world&status=running"
        );
    }
}
