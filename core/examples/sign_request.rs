use gdhttp_core::{Credential, Result, Signer};

fn main() -> Result<()> {
    let signer = Signer::new(Credential::new("access_key_id", "access_key_secret"));

    // Build a request and keep the parts, which is all signing needs.
    let mut parts = http::Request::builder()
        .method("PUT")
        .uri("http://localhost:8000/v1/workflows/42?verbose=1")
        .header("content-type", "application/json")
        .header("x-gd-trace-id", "abc123")
        .body(())
        .unwrap()
        .into_parts()
        .0;

    signer.sign(&mut parts)?;

    // The authorization value is marked sensitive, so it prints redacted.
    println!("headers: {:?}", parts.headers);

    Ok(())
}
