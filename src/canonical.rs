//! Canonicalization functionality for signature generation.
//!
//! This includes the S3 signature version 2 canonical resource and canonical request string, as
//! well as the URL and header canonicalization functions used to create an AWS SigV4 canonical
//! request.
//!
//! **Stability of this module is not guaranteed except for items exposed at the crate root**.
//! The SigV4 functions and types are subject to change in minor/patch versions. They are exposed
//! (with the `unstable` feature) for testing purposes only.

use {
    crate::{
        constants::*,
        crypto::{sha256, sha256_hex},
        SignatureError, SignatureOptions,
    },
    encoding::{all::UTF_8, label::encoding_from_whatwg_label, types::DecoderTrap, EncodingRef},
    http::{
        header::{HeaderMap, HeaderValue},
        request::Parts,
        uri::Uri,
    },
    lazy_static::lazy_static,
    log::{debug, trace},
    percent_encoding::percent_decode_str,
    qualifier_attr::qualifiers,
    regex::Regex,
    std::{
        borrow::Cow,
        collections::BTreeMap,
        fmt::{Debug, Formatter, Result as FmtResult},
        str::from_utf8,
    },
};

lazy_static! {
    /// Multiple slashes in a row in a URI path.
    static ref MULTISLASH: Regex = Regex::new("//+").unwrap();
}

/// Indicates whether `name` is an S3 subresource that takes part in the canonical resource.
///
/// The comparison is case-sensitive: `ACL` is not a subresource.
pub fn is_subresource(name: &str) -> bool {
    SUBRESOURCES.binary_search(&name).is_ok()
}

/// Compute the S3 signature version 2 canonical resource for a request URI.
///
/// The path is taken exactly as transmitted (it is already percent-encoded), so
/// `/testbucket/demo%20file.txt` stays as-is. Query parameters named in [`SUBRESOURCES`] are
/// appended, sorted by name, after a single `?`; all other parameters are dropped. Subresource
/// values are percent-decoded. A subresource with no value (or an empty one) is rendered as its
/// bare name.
///
/// # Errors
/// * [`SignatureError::InvalidRequest`] if the path is not absolute (e.g. `*`), or if a
///   subresource value does not decode to UTF-8.
///
/// # Example
/// ```rust
/// # use scratchstack_s3_signature::canonical_resource;
/// let uri = "https://s3.amazonaws.com/mybucket?prefix=abc&acl".parse().unwrap();
/// assert_eq!(canonical_resource(&uri).unwrap(), "/mybucket?acl");
/// ```
pub fn canonical_resource(uri: &Uri) -> Result<String, SignatureError> {
    let path = uri.path();
    let mut result = if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        return Err(SignatureError::InvalidRequest(format!("Path is not absolute: {}", path)));
    };

    let mut subresources: Vec<(&str, Option<Cow<'_, str>>)> = Vec::new();

    for component in uri.query().unwrap_or("").split('&') {
        if component.is_empty() {
            continue;
        }

        let (key, value) = match component.split_once('=') {
            Some((key, value)) => (key, value),
            None => (component, ""),
        };

        if !is_subresource(key) {
            trace!("Ignoring non-subresource query parameter {}", key);
            continue;
        }

        let value = if value.is_empty() {
            None
        } else {
            match percent_decode_str(value).decode_utf8() {
                Ok(value) => Some(value),
                Err(_) => {
                    return Err(SignatureError::InvalidRequest(format!(
                        "Query parameter value for '{}' is not valid UTF-8",
                        key
                    )))
                }
            }
        };

        subresources.push((key, value));
    }

    // Stable sort: repeated subresources keep their transmitted order.
    subresources.sort_by(|a, b| a.0.cmp(b.0));

    for (i, (key, value)) in subresources.iter().enumerate() {
        result.push(if i == 0 {
            '?'
        } else {
            '&'
        });
        result.push_str(key);

        if let Some(value) = value {
            result.push('=');
            result.push_str(value);
        }
    }

    Ok(result)
}

/// Collect the `x-amz-*` headers of a request, keyed by lowercased name.
///
/// Values are decoded using the character set named by `options.header_charset` (UTF-8 when unset)
/// and trimmed of surrounding whitespace. A header that appears more than once has its values
/// joined with `,` in the order they appear in the request.
///
/// # Errors
/// * [`SignatureError::UnsupportedHeaderEncoding`] if the character set is unknown or a value
///   cannot be decoded with it.
pub fn canonical_amz_headers(
    headers: &HeaderMap<HeaderValue>,
    options: &SignatureOptions,
) -> Result<BTreeMap<String, String>, SignatureError> {
    let encoding = header_encoding(options)?;
    let mut result = BTreeMap::<String, String>::new();

    for (name, value) in headers.iter() {
        // HeaderName is always lowercase.
        let name = name.as_str();
        if !name.starts_with(X_AMZ_PREFIX) {
            continue;
        }

        let value = decode_header_value(name, value, encoding)?;
        match result.get_mut(name) {
            Some(existing) => {
                existing.push(',');
                existing.push_str(&value);
            }
            None => {
                result.insert(name.to_string(), value);
            }
        }
    }

    Ok(result)
}

/// Build the S3 signature version 2 canonical request string (the string to sign).
///
/// The result is exactly:
/// ```text
/// METHOD\n
/// Content-MD5\n
/// Content-Type\n
/// timestamp\n
/// x-amz-name:value\n    (zero or more, sorted by name)
/// canonical resource
/// ```
/// A missing `Content-MD5` or `Content-Type` header leaves an empty line in its place. The
/// timestamp is copied verbatim; it is never parsed.
///
/// # Errors
/// * [`SignatureError::InvalidRequest`] if the timestamp is empty or the canonical resource cannot
///   be computed.
/// * [`SignatureError::UnsupportedHeaderEncoding`] if a header value cannot be decoded.
pub fn canonical_request_string(
    parts: &Parts,
    timestamp: &str,
    options: &SignatureOptions,
) -> Result<String, SignatureError> {
    if timestamp.is_empty() {
        return Err(SignatureError::InvalidRequest(MSG_EMPTY_TIMESTAMP.to_string()));
    }

    let encoding = header_encoding(options)?;
    let content_md5 = match parts.headers.get(HDR_CONTENT_MD5) {
        Some(value) => decode_header_value(HDR_CONTENT_MD5, value, encoding)?,
        None => String::new(),
    };
    let content_type = match parts.headers.get(HDR_CONTENT_TYPE) {
        Some(value) => decode_header_value(HDR_CONTENT_TYPE, value, encoding)?,
        None => String::new(),
    };

    let amz_headers = canonical_amz_headers(&parts.headers, options)?;
    let resource = canonical_resource(&parts.uri)?;

    let mut result = String::with_capacity(256);
    result.push_str(parts.method.as_str());
    result.push('\n');
    result.push_str(&content_md5);
    result.push('\n');
    result.push_str(&content_type);
    result.push('\n');
    result.push_str(timestamp);
    result.push('\n');

    for (name, value) in amz_headers.iter() {
        result.push_str(name);
        result.push(':');
        result.push_str(value);
        result.push('\n');
    }

    result.push_str(&resource);

    trace!("Canonical request string:\n{}", result);
    Ok(result)
}

/// Look up the character set used to decode header values.
fn header_encoding(options: &SignatureOptions) -> Result<EncodingRef, SignatureError> {
    match options.header_charset {
        None => Ok(UTF_8 as EncodingRef),
        Some(label) => match encoding_from_whatwg_label(label) {
            Some(encoding) => Ok(encoding),
            None => {
                Err(SignatureError::UnsupportedHeaderEncoding(format!("Unsupported header character set '{}'", label)))
            }
        },
    }
}

/// Decode a header value and trim the surrounding whitespace.
fn decode_header_value(name: &str, value: &HeaderValue, encoding: EncodingRef) -> Result<String, SignatureError> {
    match encoding.decode(value.as_bytes().trim_ascii(), DecoderTrap::Strict) {
        Ok(value) => Ok(value),
        Err(_) => {
            debug!("Header {} is not valid {}", name, encoding.whatwg_name().unwrap_or(encoding.name()));
            Err(SignatureError::UnsupportedHeaderEncoding(format!(
                "Header '{}' cannot be decoded as {}",
                name,
                encoding.whatwg_name().unwrap_or(encoding.name())
            )))
        }
    }
}

#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
/// The part of a URI being normalized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum UriElement {
    /// URI element represents a path
    Path,

    /// URI element represents a query string
    Query,
}

/// A canonicalized request for AWS SigV4.
///
/// This is mainly used internally for generating the canonical request for signing, but is
/// exposed for testing and debugging purposes.
///
/// **The stability of this struct is not guaranteed.** The fields and methods are subject to
/// change in minor/patch versions.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
#[derive(Clone)]
struct CanonicalRequest {
    /// The HTTP method for the request (e.g., "GET", "POST", etc.)
    request_method: String,

    /// The canonicalized path from the HTTP request. This is guaranteed to be ASCII.
    canonical_path: String,

    /// Normalized query parameters from the HTTP request. Values are ordered as they appear in the URL.
    query_parameters: BTreeMap<String, Vec<String>>,

    /// Headers from the HTTP request, keyed by lowercase name. Values are ordered as they appear in the HTTP request.
    headers: BTreeMap<String, Vec<Vec<u8>>>,

    /// The payload hash: the `x-amz-content-sha256` header if present, otherwise the SHA-256 of the body.
    body_sha256: String,
}

impl CanonicalRequest {
    /// Create a CanonicalRequest from HTTP request [Parts] and a body.
    ///
    /// If the request has no `Host` header, one is synthesized from the URI authority.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    fn from_request_parts(parts: &Parts, body: &[u8], s3: bool) -> Result<Self, SignatureError> {
        let canonical_path = canonicalize_uri_path(parts.uri.path(), s3)?;
        let query_parameters = query_string_to_normalized_map(parts.uri.query().unwrap_or(""))?;
        let mut headers = normalize_headers(&parts.headers);

        if !headers.contains_key(HDR_HOST) {
            let host = match parts.uri.host() {
                Some(host) => match parts.uri.port_u16() {
                    Some(port) => format!("{}:{}", host, port),
                    None => host.to_string(),
                },
                None => return Err(SignatureError::InvalidRequest(MSG_REQUEST_REQ_HOST.to_string())),
            };
            trace!("Synthesized host header from URI: {}", host);
            headers.insert(HDR_HOST.to_string(), vec![host.into_bytes()]);
        }

        let body_sha256 = match headers.get(HDR_X_AMZ_CONTENT_SHA256).and_then(|values| values.first()) {
            Some(value) => match std::str::from_utf8(value) {
                Ok(value) => value.to_string(),
                Err(_) => return Err(SignatureError::InvalidRequest(MSG_PAYLOAD_HASH_NOT_UTF8.to_string())),
            },
            None if body.is_empty() => SHA256_EMPTY.to_string(),
            None => sha256_hex(body),
        };

        Ok(CanonicalRequest {
            request_method: parts.method.to_string(),
            canonical_path,
            query_parameters,
            headers,
            body_sha256,
        })
    }

    /// Retrieve the HTTP request method.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    #[inline(always)]
    fn request_method(&self) -> &str {
        &self.request_method
    }

    /// Retrieve the canonicalized URI path from the request.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    #[inline(always)]
    fn canonical_path(&self) -> &str {
        &self.canonical_path
    }

    /// Retrieve the normalized query parameters from the request.
    #[cfg(any(test, doc, feature = "unstable"))]
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    #[inline(always)]
    fn query_parameters(&self) -> &BTreeMap<String, Vec<String>> {
        &self.query_parameters
    }

    /// Retrieve the headers from the request.
    #[cfg(any(test, doc, feature = "unstable"))]
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    #[inline(always)]
    fn headers(&self) -> &BTreeMap<String, Vec<Vec<u8>>> {
        &self.headers
    }

    /// Retrieve the payload hash.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    #[inline(always)]
    fn body_sha256(&self) -> &str {
        &self.body_sha256
    }

    /// The names of every header on the request except `authorization`, sorted. All of them are signed.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    fn signed_headers(&self) -> Vec<String> {
        self.headers.keys().filter(|name| name.as_str() != HDR_AUTHORIZATION).cloned().collect()
    }

    /// Get the canonical query string from the request.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    fn canonical_query_string(&self) -> String {
        canonicalize_query_to_string(&self.query_parameters)
    }

    /// Get the [canonical request to hash](https://docs.aws.amazon.com/general/latest/gr/sigv4-create-canonical-request.html)
    /// for the request.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    fn canonical_request(&self, signed_headers: &[String]) -> Vec<u8> {
        let mut result = Vec::with_capacity(1024);
        result.extend(self.request_method().as_bytes());
        result.push(b'\n');
        result.extend(self.canonical_path().as_bytes());
        result.push(b'\n');
        result.extend(self.canonical_query_string().as_bytes());
        result.push(b'\n');

        for header in signed_headers {
            if let Some(values) = self.headers.get(header) {
                for (i, value) in values.iter().enumerate() {
                    if i == 0 {
                        result.extend(header.as_bytes());
                        result.push(b':');
                    } else {
                        result.push(b',');
                    }
                    result.extend(value);
                }
                result.push(b'\n')
            }
        }

        result.push(b'\n');
        result.extend(signed_headers.join(";").as_bytes());
        result.push(b'\n');
        result.extend(self.body_sha256().as_bytes());

        trace!("Canonical request:\n{}", String::from_utf8_lossy(&result));

        result
    }

    /// Get the SHA-256 hash of the [canonical request](https://docs.aws.amazon.com/general/latest/gr/sigv4-create-canonical-request.html).
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    fn canonical_request_sha256(&self, signed_headers: &[String]) -> [u8; SHA256_OUTPUT_LEN] {
        sha256(&self.canonical_request(signed_headers))
    }
}

impl Debug for CanonicalRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CanonicalRequest")
            .field("request_method", &self.request_method)
            .field("canonical_path", &self.canonical_path)
            .field("query_parameters", &self.query_parameters)
            .field("headers", &debug_headers(&self.headers))
            .field("body_sha256", &self.body_sha256)
            .finish()
    }
}

/// Convert a map of normalized query parameters to a string for the canonical request.
///
/// Parameters are sorted by name, then by value. `X-Amz-Signature` is never included.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn canonicalize_query_to_string(query_parameters: &BTreeMap<String, Vec<String>>) -> String {
    let mut results = Vec::new();

    for (key, values) in query_parameters.iter() {
        // Don't include the signature itself.
        if key == QP_X_AMZ_SIGNATURE {
            continue;
        }

        let mut values: Vec<&String> = values.iter().collect();
        values.sort_unstable();
        for value in values {
            results.push(format!("{}={}", key, value));
        }
    }

    results.join("&")
}

/// Normalizes the specified URI path, removing redundant slashes and relative path components (unless performing S3
/// canonicalization).
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn canonicalize_uri_path(uri_path: &str, s3: bool) -> Result<String, SignatureError> {
    // Special case: empty path is converted to '/'; also short-circuit the usual '/' path here.
    if uri_path.is_empty() || uri_path == "/" {
        return Ok("/".to_string());
    }

    if !uri_path.starts_with('/') {
        return Err(SignatureError::InvalidRequest(format!("Path is not absolute: {}", uri_path)));
    }

    let uri_path = if s3 {
        Cow::Borrowed(uri_path)
    } else {
        MULTISLASH.replace_all(uri_path, "/")
    };

    let mut components: Vec<String> = uri_path.split('/').map(|s| s.to_string()).collect();
    let mut i = 1; // Ignore the leading "/"
    while i < components.len() {
        let component = normalize_uri_path_component(&components[i])?;

        if component == "." && !s3 {
            components.remove(i);
        } else if component == ".." && !s3 {
            if i <= 1 {
                return Err(SignatureError::InvalidRequest(format!(
                    "Relative path entry '..' navigates above root: {}",
                    uri_path
                )));
            }

            components.remove(i - 1);
            components.remove(i - 1);

            // Two components are gone; back up one to examine what's now the next component.
            i -= 1;
        } else {
            components[i] = component;
            i += 1;
        }
    }

    match components.len() {
        0 | 1 => Ok("/".to_string()),
        _ => Ok(components.join("/")),
    }
}

/// Formats normalized headers suitable for debugging.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn debug_headers(headers: &BTreeMap<String, Vec<Vec<u8>>>) -> String {
    let mut lines = Vec::new();
    for (key, values) in headers.iter() {
        for value in values {
            match from_utf8(value) {
                Ok(s) => lines.push(format!("{}: {}", key, s)),
                Err(_) => lines.push(format!("{}: {:?}", key, value)),
            }
        }
    }

    lines.join("\n")
}

/// Indicates whether the specified byte is RFC3986 unreserved -- i.e., can be represented without being
/// percent-encoded, e.g. '?' -> '%3F'.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
#[inline(always)]
fn is_rfc3986_unreserved(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-' || c == b'.' || c == b'_' || c == b'~'
}

/// Returns a sorted map of lowercase header names to their normalized values.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn normalize_headers(headers: &HeaderMap<HeaderValue>) -> BTreeMap<String, Vec<Vec<u8>>> {
    let mut result = BTreeMap::<String, Vec<Vec<u8>>>::new();
    for (key, value) in headers.iter() {
        let key = key.as_str().to_lowercase();
        let value = normalize_header_value(value.as_bytes());
        result.entry(key).or_default().push(value);
    }

    result
}

/// Normalizes a header value by trimming whitespace and converting multiple spaces to a single space.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn normalize_header_value(value: &[u8]) -> Vec<u8> {
    let value = value.trim_ascii();
    let mut result = Vec::with_capacity(value.len());
    let mut last_was_space = false;

    for c in value {
        if *c == b' ' || *c == b'\t' {
            if !last_was_space {
                result.push(b' ');
                last_was_space = true;
            }
        } else {
            result.push(*c);
            last_was_space = false;
        }
    }

    result
}

/// Normalize a single element (key or value from key=value) of a query string.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn normalize_query_string_element(element: &str) -> Result<String, SignatureError> {
    normalize_uri_element(element, UriElement::Query)
}

/// Normalizes a path element of a URI.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn normalize_uri_path_component(path: &str) -> Result<String, SignatureError> {
    normalize_uri_element(path, UriElement::Path)
}

/// Normalize the URI or query string according to RFC 3986.  This performs the following operations:
/// * Alpha, digit, and the symbols `-`, `.`, `_`, and `~` (unreserved characters) are left alone.
/// * Characters outside this range are percent-encoded.
/// * Percent-encoded values are upper-cased (`%2a` becomes `%2A`)
/// * Percent-encoded values in the unreserved space (`%41`-`%5A`, `%61`-`%7A`, `%30`-`%39`, `%2D`, `%2E`, `%5F`,
///   `%7E`) are converted to normal characters.
/// * In a query string, `+` is a space and becomes `%20`. In a path it is a literal plus and becomes `%2B`.
///
/// If a percent encoding is incomplete, an error is returned.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn normalize_uri_element(uri_el: &str, uri_el_type: UriElement) -> Result<String, SignatureError> {
    let bytes = uri_el.as_bytes();
    let mut i = 0;
    let mut result = String::with_capacity(bytes.len());

    while i < bytes.len() {
        let c = bytes[i];

        if is_rfc3986_unreserved(c) {
            result.push(c as char);
            i += 1;
        } else if c == b'%' {
            if i + 2 >= bytes.len() {
                return Err(SignatureError::InvalidRequest(MSG_INCOMPLETE_TRAILING_ESCAPE.to_string()));
            }

            let hex_digits = &bytes[i + 1..i + 3];
            match hex::decode(hex_digits) {
                Ok(value) => {
                    push_escaped(&mut result, value[0]);
                    i += 3;
                }
                Err(_) => {
                    return Err(SignatureError::InvalidRequest(format!(
                        "{}{}{}",
                        MSG_ILLEGAL_HEX_CHAR, hex_digits[0] as char, hex_digits[1] as char
                    )));
                }
            }
        } else if c == b'+' && uri_el_type == UriElement::Query {
            result.push_str("%20");
            i += 1;
        } else {
            push_escaped(&mut result, c);
            i += 1;
        }
    }

    Ok(result)
}

/// Push a byte onto a normalized URI element, percent-encoding it unless it is unreserved.
fn push_escaped(result: &mut String, c: u8) {
    if is_rfc3986_unreserved(c) {
        result.push(c as char);
    } else {
        let hex = u8_to_upper_hex(c);
        result.push('%');
        result.push(hex[0] as char);
        result.push(hex[1] as char);
    }
}

/// Normalize the query parameters by normalizing the keys and values of each parameter and return a map from
/// each key to a *vector* of values (since it is valid for a query parameters to appear multiple times).
///
/// The order of the values matches the order that they appeared in the query string.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn query_string_to_normalized_map(query_string: &str) -> Result<BTreeMap<String, Vec<String>>, SignatureError> {
    let mut result = BTreeMap::<String, Vec<String>>::new();

    for component in query_string.split('&') {
        if component.is_empty() {
            continue;
        }

        let (key, value) = component.split_once('=').unwrap_or((component, ""));
        let norm_key = normalize_query_string_element(key)?;
        let norm_value = normalize_query_string_element(value)?;
        result.entry(norm_key).or_default().push(norm_value);
    }

    Ok(result)
}

/// Convert a byte to uppercase hex representation.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
#[inline(always)]
const fn u8_to_upper_hex(b: u8) -> [u8; 2] {
    [HEX_DIGITS_UPPER[((b >> 4) & 0xf) as usize], HEX_DIGITS_UPPER[(b & 0xf) as usize]]
}
