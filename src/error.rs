use {
    crate::constants::*,
    http::{
        header::{InvalidHeaderName, InvalidHeaderValue},
        method::InvalidMethod,
        status::StatusCode,
        uri::{InvalidUri, InvalidUriParts},
        Error as HttpError,
    },
    scratchstack_errors::ServiceError,
    std::{
        error::Error,
        fmt::{Display, Formatter, Result as FmtResult},
    },
};

/// Error returned when a request cannot be canonicalized or signed.
///
/// Every variant is a caller contract violation or an internal failure; none of them are retryable
/// at this layer.
#[derive(Debug)]
#[non_exhaustive]
pub enum SignatureError {
    /// The request could not be interpreted. Sample messages:
    /// `Path is not absolute: *`
    /// `Timestamp must not be empty`
    /// `Query parameter value for 'response-content-type' is not valid UTF-8`
    /// `Request requires either an 'X-Amz-Date' or a 'Date' header.`
    InvalidRequest(/* message */ String),

    /// The secret key (or access key) supplied for signing is empty.
    MissingCredential(/* message */ String),

    /// A header value could not be decoded using the configured character set, or the character
    /// set itself is unknown.
    UnsupportedHeaderEncoding(/* message */ String),

    /// The signature could not be encoded. This is not expected to happen for well-formed input.
    EncodingError(/* message */ String),
}

impl ServiceError for SignatureError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => ERR_CODE_INVALID_REQUEST,
            Self::MissingCredential(_) => ERR_CODE_MISSING_AUTHENTICATION_TOKEN,
            Self::UnsupportedHeaderEncoding(_) => ERR_CODE_MALFORMED_HEADER,
            Self::EncodingError(_) => ERR_CODE_INTERNAL_FAILURE,
        }
    }

    fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::MissingCredential(_) | Self::UnsupportedHeaderEncoding(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::EncodingError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Display for SignatureError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::InvalidRequest(msg) => f.write_str(msg),
            Self::MissingCredential(msg) => f.write_str(msg),
            Self::UnsupportedHeaderEncoding(msg) => f.write_str(msg),
            Self::EncodingError(msg) => f.write_str(msg),
        }
    }
}

impl Error for SignatureError {}

impl From<HttpError> for SignatureError {
    fn from(e: HttpError) -> SignatureError {
        SignatureError::InvalidRequest(e.to_string())
    }
}

impl From<InvalidUri> for SignatureError {
    fn from(e: InvalidUri) -> SignatureError {
        SignatureError::InvalidRequest(format!("Invalid URI: {}", e))
    }
}

impl From<InvalidUriParts> for SignatureError {
    fn from(e: InvalidUriParts) -> SignatureError {
        SignatureError::InvalidRequest(format!("Invalid URI: {}", e))
    }
}

impl From<InvalidMethod> for SignatureError {
    fn from(e: InvalidMethod) -> SignatureError {
        SignatureError::InvalidRequest(format!("Invalid request method: {}", e))
    }
}

impl From<InvalidHeaderName> for SignatureError {
    fn from(e: InvalidHeaderName) -> SignatureError {
        SignatureError::InvalidRequest(format!("Invalid header name: {}", e))
    }
}

impl From<InvalidHeaderValue> for SignatureError {
    fn from(e: InvalidHeaderValue) -> SignatureError {
        SignatureError::InvalidRequest(format!("Invalid header value: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::SignatureError,
        http::{header::HeaderValue, method::Method, uri::Uri},
        scratchstack_errors::ServiceError,
    };

    #[test_log::test]
    fn test_codes_and_status() {
        let e = SignatureError::InvalidRequest("Path is not absolute: *".to_string());
        assert_eq!(e.error_code(), "InvalidRequest");
        assert_eq!(e.http_status(), 400);
        assert_eq!(format!("{}", e), "Path is not absolute: *");

        let e = SignatureError::MissingCredential("Secret key must not be empty".to_string());
        assert_eq!(e.error_code(), "MissingAuthenticationToken");
        assert_eq!(e.http_status(), 400);
        assert_eq!(e.to_string(), "Secret key must not be empty");

        let e = SignatureError::UnsupportedHeaderEncoding("bad header".to_string());
        assert_eq!(e.error_code(), "MalformedHeader");
        assert_eq!(e.http_status(), 400);

        let e = SignatureError::EncodingError("boom".to_string());
        assert_eq!(e.error_code(), "InternalFailure");
        assert_eq!(e.http_status(), 500);
    }

    #[test_log::test]
    fn test_from() {
        // This just exercises a few codepaths that aren't usually exercised.
        let e: SignatureError = "http://[::1".parse::<Uri>().unwrap_err().into();
        assert!(matches!(e, SignatureError::InvalidRequest(_)));
        assert!(e.to_string().starts_with("Invalid URI: "));

        let e: SignatureError = Method::from_bytes(b"GE T").unwrap_err().into();
        assert!(matches!(e, SignatureError::InvalidRequest(_)));
        assert!(e.to_string().starts_with("Invalid request method: "));

        let e: SignatureError = HeaderValue::from_str("bad\nvalue").unwrap_err().into();
        assert!(matches!(e, SignatureError::InvalidRequest(_)));

        let e: SignatureError = http::Request::builder().uri("http://[::1").body(()).unwrap_err().into();
        assert_eq!(e.error_code(), "InvalidRequest");
    }
}
