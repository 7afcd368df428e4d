use {
    crate::{
        canonical::canonical_request_string,
        constants::*,
        crypto::{hmac_sha1, hmac_sha256},
        SignatureError,
    },
    base64::{engine::general_purpose::STANDARD as BASE64, Engine},
    http::request::Parts,
    log::debug,
    percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC},
    std::fmt::{Display, Formatter, Result as FmtResult},
};

/// Everything outside the RFC 3986 unreserved set is escaped.
const UNRESERVED_ESCAPE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// The keyed-hash algorithm used to sign a canonical request string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SigningAlgorithm {
    /// HMAC-SHA1, used by S3 signature version 2.
    #[default]
    HmacSha1,

    /// HMAC-SHA256.
    HmacSha256,
}

impl SigningAlgorithm {
    /// Compute the MAC of `message` keyed with `key`.
    pub fn sign(&self, key: &[u8], message: &[u8]) -> Result<Vec<u8>, SignatureError> {
        match self {
            Self::HmacSha1 => hmac_sha1(key, message),
            Self::HmacSha256 => Ok(hmac_sha256(key, message)?.to_vec()),
        }
    }

    /// The AWS `SignatureMethod` name of the algorithm.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::HmacSha1 => "HmacSHA1",
            Self::HmacSha256 => "HmacSHA256",
        }
    }
}

impl Display for SigningAlgorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

/// Options that can be used to configure request signing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SignatureOptions {
    /// The keyed-hash algorithm.
    pub algorithm: SigningAlgorithm,

    /// WHATWG label of the character set used to decode header values. `None` means UTF-8.
    pub header_charset: Option<&'static str>,
}

impl SignatureOptions {
    /// Options for S3 signature version 2: HMAC-SHA1 with UTF-8 header values.
    pub const V2: Self = Self {
        algorithm: SigningAlgorithm::HmacSha1,
        header_charset: None,
    };

    /// Create `SignatureOptions` that decode header values as ISO 8859-1 instead of UTF-8.
    ///
    /// Some older clients send raw Latin-1 bytes in `x-amz-meta-*` headers.
    pub const fn latin1() -> Self {
        Self {
            algorithm: SigningAlgorithm::HmacSha1,
            header_charset: Some("iso-8859-1"),
        }
    }
}

/// Compute the Base64-encoded MAC of a canonical request string.
///
/// This is the form that goes into an `Authorization: AWS <access key>:<signature>` header.
pub fn base64_signature(
    canonical: &str,
    secret: impl AsRef<[u8]>,
    algorithm: SigningAlgorithm,
) -> Result<String, SignatureError> {
    let mac = algorithm.sign(secret.as_ref(), canonical.as_bytes())?;
    Ok(BASE64.encode(mac))
}

/// Percent-escape a Base64 signature so it is safe to place in a URL or header.
///
/// Every byte outside the RFC 3986 unreserved set is escaped, so `+`, `/`, and `=` become `%2B`,
/// `%2F`, and `%3D` respectively.
pub fn escape_signature(b64: &str) -> String {
    escape_unreserved(b64)
}

/// Percent-escape every byte of `value` outside the RFC 3986 unreserved set.
pub(crate) fn escape_unreserved(value: &str) -> String {
    utf8_percent_encode(value, UNRESERVED_ESCAPE_SET).to_string()
}

/// Compute the signature of a canonical request string: the MAC of `canonical` keyed with `secret`,
/// Base64-encoded and then percent-escaped.
///
/// # Example
/// ```rust
/// # use scratchstack_s3_signature::{encoded_signature, SigningAlgorithm};
/// let canonical = "GET\n\napplication/text\nMon, 07 Apr 2025 09:20:53 +0000\n/test/hello.txt";
/// let signature = encoded_signature(canonical, "root12345", SigningAlgorithm::HmacSha1).unwrap();
/// assert_eq!(signature, "ZDG7mtEBYOSLC8PfKoz9iHR23fk%3D");
/// ```
pub fn encoded_signature(
    canonical: &str,
    secret: impl AsRef<[u8]>,
    algorithm: SigningAlgorithm,
) -> Result<String, SignatureError> {
    let b64 = base64_signature(canonical, secret, algorithm)?;
    Ok(escape_signature(&b64))
}

/// Compute the S3 signature version 2 signature for a request using HMAC-SHA1 and UTF-8 header
/// values.
///
/// `timestamp` is the value of the request's `Date` header (or `Expires` for query-string
/// authentication); it is copied into the canonical string verbatim.
///
/// # Errors
/// * [`SignatureError::MissingCredential`] if `secret` is empty.
/// * Any error from [`canonical_request_string`][crate::canonical_request_string].
pub fn aws_signature_for_request(
    parts: &Parts,
    timestamp: &str,
    secret: impl AsRef<[u8]>,
) -> Result<String, SignatureError> {
    aws_signature_for_request_with_options(parts, timestamp, secret, &SignatureOptions::default())
}

/// Compute the S3 signature version 2 signature for a request with explicit options.
///
/// The result is Base64-encoded and percent-escaped.
pub fn aws_signature_for_request_with_options(
    parts: &Parts,
    timestamp: &str,
    secret: impl AsRef<[u8]>,
    options: &SignatureOptions,
) -> Result<String, SignatureError> {
    let secret = secret.as_ref();
    if secret.is_empty() {
        return Err(SignatureError::MissingCredential(MSG_EMPTY_SECRET_KEY.to_string()));
    }

    let canonical = canonical_request_string(parts, timestamp, options)?;
    debug!("Signing {} {} with {}", parts.method, parts.uri.path(), options.algorithm);
    encoded_signature(&canonical, secret, options.algorithm)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::request_parts,
        scratchstack_errors::ServiceError,
    };

    const GOLDEN_CANONICAL: &str = "GET\n\napplication/text\nMon, 07 Apr 2025 09:20:53 +0000\n/test/hello.txt";

    #[test_log::test]
    fn test_golden_vector() {
        let b64 = base64_signature(GOLDEN_CANONICAL, "root12345", SigningAlgorithm::HmacSha1).unwrap();
        assert_eq!(b64, "ZDG7mtEBYOSLC8PfKoz9iHR23fk=");
        assert_eq!(escape_signature(&b64), "ZDG7mtEBYOSLC8PfKoz9iHR23fk%3D");
        assert_eq!(
            encoded_signature(GOLDEN_CANONICAL, b"root12345", SigningAlgorithm::HmacSha1).unwrap(),
            "ZDG7mtEBYOSLC8PfKoz9iHR23fk%3D"
        );
    }

    #[test_log::test]
    fn test_golden_vector_from_request() {
        let parts = request_parts(
            "GET",
            "http://localhost:9000/test/hello.txt",
            &[("Content-Type", "application/text")],
        )
        .unwrap();
        let signature = aws_signature_for_request(&parts, "Mon, 07 Apr 2025 09:20:53 +0000", "root12345").unwrap();
        assert_eq!(signature, "ZDG7mtEBYOSLC8PfKoz9iHR23fk%3D");
    }

    #[test_log::test]
    fn test_escape() {
        assert_eq!(escape_signature("a+b/c=="), "a%2Bb%2Fc%3D%3D");
        assert_eq!(escape_signature("AZaz09-._~"), "AZaz09-._~");
        assert_eq!(escape_signature(""), "");
    }

    #[test_log::test]
    fn test_algorithms() {
        assert_eq!(SigningAlgorithm::default(), SigningAlgorithm::HmacSha1);
        assert_eq!(SigningAlgorithm::HmacSha1.name(), "HmacSHA1");
        assert_eq!(SigningAlgorithm::HmacSha256.to_string(), "HmacSHA256");

        let sha1 = SigningAlgorithm::HmacSha1.sign(b"key", b"message").unwrap();
        let sha256 = SigningAlgorithm::HmacSha256.sign(b"key", b"message").unwrap();
        assert_eq!(sha1.len(), 20);
        assert_eq!(sha256.len(), 32);

        let sig1 = encoded_signature(GOLDEN_CANONICAL, "root12345", SigningAlgorithm::HmacSha1).unwrap();
        let sig256 = encoded_signature(GOLDEN_CANONICAL, "root12345", SigningAlgorithm::HmacSha256).unwrap();
        assert_ne!(sig1, sig256);
    }

    #[test_log::test]
    fn test_options() {
        assert_eq!(SignatureOptions::default(), SignatureOptions::V2);
        assert_eq!(SignatureOptions::latin1().header_charset, Some("iso-8859-1"));
        assert_eq!(SignatureOptions::latin1().algorithm, SigningAlgorithm::HmacSha1);
    }

    #[test_log::test]
    fn test_empty_secret() {
        let parts = request_parts("GET", "https://s3.amazonaws.com/bucket/key", &[]).unwrap();
        let e = aws_signature_for_request(&parts, "Tue, 27 Mar 2007 19:36:42 +0000", "").unwrap_err();
        assert!(matches!(e, SignatureError::MissingCredential(_)));
        assert_eq!(e.to_string(), "Secret key must not be empty");
        assert_eq!(e.error_code(), "MissingAuthenticationToken");
    }
}
