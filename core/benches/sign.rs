use criterion::criterion_group;
use criterion::criterion_main;
use criterion::Criterion;
use gdhttp_core::{Credential, Signer};

criterion_group!(benches, bench);
criterion_main!(benches);

pub fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("sign");

    group.bench_function("plain", |b| {
        let s = Signer::new(Credential::new("access_key_id", "access_key_secret"));

        b.iter(|| {
            let mut parts = http::Request::new(())
                .into_parts()
                .0;
            parts.method = http::Method::GET;
            parts.uri = "http://127.0.0.1:8000/v1/jobs?status=running&limit=10"
                .parse()
                .expect("url must be valid");

            s.sign(&mut parts).expect("must success")
        })
    });

    group.bench_function("custom_headers", |b| {
        let s = Signer::new(Credential::new("access_key_id", "access_key_secret"));

        b.iter(|| {
            let mut parts = http::Request::new(())
                .into_parts()
                .0;
            parts.method = http::Method::PUT;
            parts.uri = "http://127.0.0.1:8000/v1/workflows/42"
                .parse()
                .expect("url must be valid");
            parts
                .headers
                .insert("x-gd-trace-id", "abc123".parse().unwrap());
            parts.headers.insert("x-gd-user", "alice".parse().unwrap());
            parts
                .headers
                .insert("content-type", "application/json".parse().unwrap());

            s.sign(&mut parts).expect("must success")
        })
    });

    group.finish();
}
