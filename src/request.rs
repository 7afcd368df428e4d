use {
    crate::SignatureError,
    http::{
        header::{HeaderName, HeaderValue},
        method::Method,
        request::{Parts, Request},
        uri::Uri,
    },
};

/// Build request [`Parts`] from plain strings.
///
/// Headers are appended in order, so a repeated name keeps every value.
///
/// # Errors
/// Returns [`SignatureError::InvalidRequest`] if the method, URL, or any header name or value
/// cannot be parsed.
///
/// # Example
/// ```rust
/// # use scratchstack_s3_signature::request_parts;
/// let parts = request_parts("PUT", "https://s3.amazonaws.com/bucket/key", &[("Content-Type", "text/plain")]).unwrap();
/// assert_eq!(parts.method, "PUT");
/// assert_eq!(parts.headers["content-type"], "text/plain");
/// ```
pub fn request_parts(method: &str, url: &str, headers: &[(&str, &str)]) -> Result<Parts, SignatureError> {
    let method = Method::from_bytes(method.as_bytes())?;
    let uri: Uri = url.parse()?;
    let (mut parts, _) = Request::builder().method(method).uri(uri).body(())?.into_parts();

    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())?;
        let value = HeaderValue::from_str(value)?;
        parts.headers.append(name, value);
    }

    Ok(parts)
}
