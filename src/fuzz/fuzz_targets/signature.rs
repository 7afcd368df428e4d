#![no_main]
use {
    arbitrary::Arbitrary,
    http::{HeaderName, HeaderValue, Method, Request, Uri},
    libfuzzer_sys::{fuzz_target, Corpus},
    scratchstack_s3_signature::{
        aws_signature_for_request_with_options, canonical_request_string, sigv4_signature, SigV4Params,
        SignatureOptions, SigningAlgorithm,
    },
};

#[derive(Arbitrary, Debug)]
enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Patch,
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
            HttpMethod::Patch => Method::PATCH,
        }
    }
}

#[derive(Arbitrary, Debug)]
struct SignInput {
    method: HttpMethod,
    uri: String,
    headers: Vec<(String, Vec<u8>)>,
    body: Vec<u8>,
    timestamp: String,
    secret: Vec<u8>,
    latin1: bool,
    sha256: bool,
}

fuzz_target!(|data: SignInput| -> Corpus {
    match run_target(data) {
        Some(()) => Corpus::Keep,
        None => Corpus::Reject,
    }
});

fn run_target(data: SignInput) -> Option<()> {
    let uri = Uri::try_from(data.uri).ok()?;
    let mut request = Request::builder().method(Method::from(data.method)).uri(uri).body(()).ok()?;
    for (name, value) in data.headers {
        let name = HeaderName::from_bytes(name.as_bytes()).ok()?;
        let value = HeaderValue::from_bytes(&value).ok()?;
        request.headers_mut().append(name, value);
    }
    let (parts, _) = request.into_parts();

    let options = SignatureOptions {
        algorithm: if data.sha256 {
            SigningAlgorithm::HmacSha256
        } else {
            SigningAlgorithm::HmacSha1
        },
        header_charset: if data.latin1 {
            Some("latin1")
        } else {
            None
        },
    };

    // Signing must never panic and must be deterministic.
    let first = aws_signature_for_request_with_options(&parts, &data.timestamp, &data.secret, &options);
    let second = aws_signature_for_request_with_options(&parts, &data.timestamp, &data.secret, &options);
    match (&first, &second) {
        (Ok(a), Ok(b)) => {
            assert_eq!(a, b);
            assert!(!a.contains(['+', '/', '=']));
        }
        (Err(_), Err(_)) => (),
        _ => panic!("non-deterministic result: {:?} vs {:?}", first, second),
    }

    if let Ok(canonical) = canonical_request_string(&parts, &data.timestamp, &options) {
        assert!(canonical.starts_with(parts.method.as_str()));
        assert!(canonical.matches('\n').count() >= 4);
    }

    let params = SigV4Params::builder().access_key("AKIDEXAMPLE").region("us-east-1").service("s3").build().ok()?;
    let _ = sigv4_signature(&parts, &data.body, &data.secret, &params);

    first.ok().map(|_| ())
}
