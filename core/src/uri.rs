//! Request URL construction from command line tokens.

use std::collections::HashMap;

use http::Method;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::constants::*;
use crate::Error;
use crate::Result;

// `key=value`, value is everything after the first `=`.
static QUERY_ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([^=]+)=($|[^=].*$)").unwrap());

// `key==value`.
static TEMPLATE_ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([^=]+)==(.*)$").unwrap());

// `<name>` tokens inside a URL template.
static TEMPLATE_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new("<([^<>]+)>").unwrap());

// A bare `:port` prefix, shorthand for `localhost:port`.
static PORT_SHORTHAND_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^:\d+").unwrap());

const KNOWN_METHODS: &[&str] = &[
    "GET", "HEAD", "POST", "PUT", "PATCH", "DELETE", "OPTIONS", "CONNECT", "TRACE",
];

/// A positional request item following the URL.
///
/// Tokens that match neither form are silently dropped, so stray arguments
/// never abort a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestItem {
    /// `key=value`, appended to the URL query string.
    Query {
        /// Query parameter name.
        key: String,
        /// Query parameter value.
        value: String,
    },
    /// `key==value`, filled into `<key>` tokens of the URL.
    Template {
        /// Template token name.
        key: String,
        /// Replacement value.
        value: String,
    },
}

impl RequestItem {
    /// Classify one raw token.
    pub fn parse(token: &str) -> Option<RequestItem> {
        if let Some(caps) = TEMPLATE_ITEM_RE.captures(token) {
            return Some(RequestItem::Template {
                key: caps[1].to_string(),
                value: caps[2].to_string(),
            });
        }
        if let Some(caps) = QUERY_ITEM_RE.captures(token) {
            return Some(RequestItem::Query {
                key: caps[1].to_string(),
                value: caps[2].to_string(),
            });
        }

        None
    }
}

/// The outcome of interpreting the positional command line arguments.
#[derive(Debug)]
pub struct PositionalArguments {
    /// The HTTP method, `GET` unless the first token names one.
    pub method: Method,
    /// The fully built request URL.
    pub url: Url,
}

/// Interpret positional arguments as `[METHOD] URL [REQUEST_ITEM ...]`.
///
/// The first token counts as a method only when it case-insensitively
/// matches a known one. A single token is always the URL.
pub fn parse_positional_arguments(args: &[String]) -> Result<PositionalArguments> {
    let (method, uri, item_tokens): (Method, &str, &[String]) = match args {
        [] => return Err(Error::request_invalid("too few arguments")),
        [uri] => (Method::GET, uri.as_str(), &[]),
        [method_token, uri, rest @ ..] => match method_from_token(method_token) {
            Some(method) => (method, uri.as_str(), rest),
            None => (Method::GET, method_token.as_str(), &args[1..]),
        },
    };

    let items: Vec<RequestItem> = item_tokens
        .iter()
        .filter_map(|token| RequestItem::parse(token))
        .collect();
    let url = build_url(uri, &items)?;

    Ok(PositionalArguments { method, url })
}

fn method_from_token(token: &str) -> Option<Method> {
    let upper = token.to_ascii_uppercase();
    if !KNOWN_METHODS.contains(&upper.as_str()) {
        return None;
    }

    Method::from_bytes(upper.as_bytes()).ok()
}

/// Build the request URL from a raw token and its request items.
///
/// The token is expanded first (host shorthand, default scheme, template
/// substitution), then parsed, then extended with the query items. With no
/// query items the parsed query string survives byte for byte.
pub fn build_url(uri: &str, items: &[RequestItem]) -> Result<Url> {
    let expanded = expand_uri(uri, items);

    let mut url = Url::parse(&expanded)
        .map_err(|e| Error::url_invalid(format!("malformed url: {expanded}")).with_source(e))?;

    let query_items: Vec<(&str, &str)> = items
        .iter()
        .filter_map(|item| match item {
            RequestItem::Query { key, value } => Some((key.as_str(), value.as_str())),
            _ => None,
        })
        .collect();
    if !query_items.is_empty() {
        let existing: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        // Rebuild the whole query: pre-existing pairs keep their spot,
        // items follow, duplicate keys accumulate.
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (k, v) in &existing {
            pairs.append_pair(k, v);
        }
        for (k, v) in query_items {
            pairs.append_pair(k, v);
        }
    }

    Ok(url)
}

// Fixed expansion order: host shorthand, default scheme, templates.
fn expand_uri(uri: &str, items: &[RequestItem]) -> String {
    let uri = expand_host_shorthand(uri);
    let uri = ensure_scheme(uri);
    fill_templates(&uri, items)
}

// ":3000/foo" -> "localhost:3000/foo", ":/foo" -> "localhost/foo"
fn expand_host_shorthand(uri: &str) -> String {
    if PORT_SHORTHAND_RE.is_match(uri) {
        return format!("{DEFAULT_HOST}{uri}");
    }
    if uri.starts_with(':') {
        return format!("{DEFAULT_HOST}{}", uri.trim_start_matches(':'));
    }

    uri.to_string()
}

// "example.com/foo" -> "http://example.com/foo"
fn ensure_scheme(uri: String) -> String {
    if uri.starts_with("http://") || uri.starts_with("https://") {
        return uri;
    }

    format!("{DEFAULT_SCHEME}://{uri}")
}

// "/jobs/<id>" with `id==42` -> "/jobs/42". One pass, replacements are
// not rescanned, unmatched tokens become empty.
fn fill_templates(uri: &str, items: &[RequestItem]) -> String {
    let mut mapping = HashMap::new();
    for item in items {
        if let RequestItem::Template { key, value } = item {
            mapping.insert(key.as_str(), value.as_str());
        }
    }

    TEMPLATE_TOKEN_RE
        .replace_all(uri, |caps: &regex::Captures<'_>| {
            mapping.get(&caps[1]).copied().unwrap_or("")
        })
        .into_owned()
}
