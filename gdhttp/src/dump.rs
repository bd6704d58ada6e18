use bytes::Bytes;

/// Observer invoked around request dispatch.
pub trait Hook {
    /// Called with the finalized request just before it is sent.
    fn on_request(&self, req: &http::Request<Bytes>);
    /// Called with the collected response.
    fn on_response(&self, resp: &http::Response<Bytes>);
}

/// Prints requests and responses the way the output flags ask for it.
#[derive(Debug, Default)]
pub struct DumpConfig {
    verbose: bool,
    only_body: bool,
}

impl DumpConfig {
    /// `verbose` prints the outgoing request too, `only_body` drops the
    /// response status line and headers.
    pub fn new(verbose: bool, only_body: bool) -> Self {
        Self { verbose, only_body }
    }
}

impl Hook for DumpConfig {
    fn on_request(&self, req: &http::Request<Bytes>) {
        if !self.verbose {
            return;
        }

        println!("{}", format_request(req));
        println!();
    }

    fn on_response(&self, resp: &http::Response<Bytes>) {
        if !self.only_body {
            print!("{}", format_response_head(resp));
        }

        let body = resp.body();
        match pretty_json(body) {
            Ok(pretty) => println!("{pretty}"),
            Err(_) => println!("{}", String::from_utf8_lossy(body)),
        }
    }
}

fn format_request(req: &http::Request<Bytes>) -> String {
    let path = req
        .uri()
        .path_and_query()
        .map(|paq| paq.as_str())
        .unwrap_or("/");

    let mut s = format!("{} {} {:?}\r\n", req.method(), path, req.version());
    if let Some(host) = req.uri().host() {
        match req.uri().port_u16() {
            Some(port) => s.push_str(&format!("Host: {host}:{port}\r\n")),
            None => s.push_str(&format!("Host: {host}\r\n")),
        }
    }
    for (name, value) in req.headers() {
        s.push_str(&format!(
            "{}: {}\r\n",
            name,
            String::from_utf8_lossy(value.as_bytes())
        ));
    }
    s.push_str("\r\n");
    s.push_str(&String::from_utf8_lossy(req.body()));

    s
}

fn format_response_head(resp: &http::Response<Bytes>) -> String {
    let mut s = format!("{:?} {}\r\n", resp.version(), resp.status());
    for (name, value) in resp.headers() {
        s.push_str(&format!(
            "{}: {}\r\n",
            name,
            String::from_utf8_lossy(value.as_bytes())
        ));
    }
    s.push_str("\r\n");

    s
}

/// Re-indent a JSON body with two spaces per level. Escaped unicode comes
/// out as the characters themselves.
fn pretty_json(body: &[u8]) -> serde_json::Result<String> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    serde_json::to_string_pretty(&value)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_pretty_json_indents_and_unescapes() {
        // The \u escapes stay literal in the raw bytes and decode on parse.
        let pretty = pretty_json(br#"{"name":"\u4f5c\u4e1a"}"#).unwrap();
        assert_eq!(pretty, "{\n  \"name\": \"作业\"\n}");
    }

    #[test]
    fn test_pretty_json_rejects_non_json() {
        assert!(pretty_json(b"plain text").is_err());
    }

    #[test]
    fn test_format_request_shows_request_line_and_host() {
        let req = http::Request::builder()
            .method("PUT")
            .uri("http://localhost:8000/v1/jobs?limit=10")
            .header("content-type", "application/json")
            .body(Bytes::from_static(b"{}"))
            .unwrap();

        let dump = format_request(&req);
        assert!(dump.starts_with("PUT /v1/jobs?limit=10 HTTP/1.1\r\n"));
        assert!(dump.contains("Host: localhost:8000\r\n"));
        assert!(dump.contains("content-type: application/json\r\n"));
        assert!(dump.ends_with("\r\n\r\n{}"));
    }

    #[test]
    fn test_format_request_without_explicit_port() {
        let req = http::Request::builder()
            .uri("http://example.com/")
            .body(Bytes::new())
            .unwrap();

        let dump = format_request(&req);
        assert!(dump.starts_with("GET / HTTP/1.1\r\n"));
        assert!(dump.contains("Host: example.com\r\n"));
        assert!(dump.ends_with("\r\n\r\n"));
    }

    #[test]
    fn test_format_response_head() {
        let resp = http::Response::builder()
            .status(404)
            .header("content-type", "application/json")
            .body(Bytes::new())
            .unwrap();

        let head = format_response_head(&resp);
        assert!(head.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(head.contains("content-type: application/json\r\n"));
        assert!(head.ends_with("\r\n\r\n"));
    }
}
