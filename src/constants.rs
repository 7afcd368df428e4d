//! Common constants used throughout the crate.
//!
//! This was consolidated here so the SigV2 and SigV4 code paths agree on header names, error codes,
//! and messages. If a value is spelled incorrectly, at least it can be fixed in one spot.
//!
//! Tests that are testing the content of an error code or message should not use these constants;
//! they should use hard-coded strings so the tests are also testing for misspellings.
//!
//! Please keep this file organized alphabetically. (This can be a bit hard with comments, etc.)

/// Algorithm for AWS SigV4
pub(crate) const AWS4_HMAC_SHA256: &str = "AWS4-HMAC-SHA256";

/// Prefix prepended to the secret key to form the SigV4 `kSecret` key.
pub(crate) const AWS4_KEY_PREFIX: &[u8] = b"AWS4";

/// String included at the end of the AWS SigV4 credential scope
pub(crate) const AWS4_REQUEST: &str = "aws4_request";

/// Prefix of a SigV2 `Authorization` header value.
pub(crate) const AWS_AUTH_PREFIX: &str = "AWS ";

/// Error code: InternalFailure
pub(crate) const ERR_CODE_INTERNAL_FAILURE: &str = "InternalFailure";

/// Error code: InvalidRequest
pub(crate) const ERR_CODE_INVALID_REQUEST: &str = "InvalidRequest";

/// Error code: MalformedHeader
pub(crate) const ERR_CODE_MALFORMED_HEADER: &str = "MalformedHeader";

/// Error code: MissingAuthenticationToken
pub(crate) const ERR_CODE_MISSING_AUTHENTICATION_TOKEN: &str = "MissingAuthenticationToken";

/// Header for `authorization`
pub(crate) const HDR_AUTHORIZATION: &str = "authorization";

/// Header for `content-md5`
pub(crate) const HDR_CONTENT_MD5: &str = "content-md5";

/// Header for `content-type`
pub(crate) const HDR_CONTENT_TYPE: &str = "content-type";

/// Header for `date`
pub(crate) const HDR_DATE: &str = "date";

/// Header for `host`
pub(crate) const HDR_HOST: &str = "host";

/// Header for `x-amz-content-sha256`
pub(crate) const HDR_X_AMZ_CONTENT_SHA256: &str = "x-amz-content-sha256";

/// Header for delivering the alternate date
pub(crate) const HDR_X_AMZ_DATE: &str = "x-amz-date";

/// Header for delivering the session token
pub(crate) const HDR_X_AMZ_SECURITY_TOKEN: &str = "x-amz-security-token";

/// Uppercase hex digits.
pub(crate) const HEX_DIGITS_UPPER: [u8; 16] =
    [b'0', b'1', b'2', b'3', b'4', b'5', b'6', b'7', b'8', b'9', b'A', b'B', b'C', b'D', b'E', b'F'];

/// HTTP-date format used for the SigV2 `Date` header (RFC 7231, always GMT).
pub(crate) const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Compact ISO8601 format used for the SigV4 string to sign.
pub(crate) const ISO8601_COMPACT_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Short date format
pub(crate) const ISO8601_DATE_FORMAT: &str = "%Y%m%d";

/// Error message: `"Access key must not be empty"`
pub(crate) const MSG_EMPTY_ACCESS_KEY: &str = "Access key must not be empty";

/// Error message: `"Secret key must not be empty"`
pub(crate) const MSG_EMPTY_SECRET_KEY: &str = "Secret key must not be empty";

/// Error message: `"Timestamp must not be empty"`
pub(crate) const MSG_EMPTY_TIMESTAMP: &str = "Timestamp must not be empty";

/// Error message: `"Expiration time must not be before the Unix epoch"`
pub(crate) const MSG_EXPIRES_BEFORE_EPOCH: &str = "Expiration time must not be before the Unix epoch";

/// Error message: `"Illegal hex character in escape % pattern: %"`
pub(crate) const MSG_ILLEGAL_HEX_CHAR: &str = "Illegal hex character in escape % pattern: %";

/// Error message: `"Incomplete trailing escape % sequence"`
pub(crate) const MSG_INCOMPLETE_TRAILING_ESCAPE: &str = "Incomplete trailing escape % sequence";

/// Error message: `"Header 'x-amz-content-sha256' is not valid UTF-8"`
pub(crate) const MSG_PAYLOAD_HASH_NOT_UTF8: &str = "Header 'x-amz-content-sha256' is not valid UTF-8";

/// Error message: `"Request requires either an 'X-Amz-Date' or a 'Date' header."`
pub(crate) const MSG_REQUEST_REQ_DATE: &str = "Request requires either an 'X-Amz-Date' or a 'Date' header.";

/// Error message: `"Request requires a 'Host' header or an absolute URI."`
pub(crate) const MSG_REQUEST_REQ_HOST: &str = "Request requires a 'Host' header or an absolute URI.";

/// Query parameter for delivering the access key in a SigV2 presigned URL
pub(crate) const QP_AWS_ACCESS_KEY_ID: &str = "AWSAccessKeyId";

/// Query parameter for delivering the expiration time of a SigV2 presigned URL
pub(crate) const QP_EXPIRES: &str = "Expires";

/// Query parameter for delivering the signature of a SigV2 presigned URL
pub(crate) const QP_SIGNATURE: &str = "Signature";

/// Query parameter for delivering the session token
pub(crate) const QP_X_AMZ_SECURITY_TOKEN: &str = "x-amz-security-token";

/// Query parameter for delivering the SigV4 signature; never part of the canonical query string.
pub(crate) const QP_X_AMZ_SIGNATURE: &str = "X-Amz-Signature";

/// SHA-256 of an empty string.
pub(crate) const SHA256_EMPTY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// The length of a SHA-256 digest in bytes.
pub(crate) const SHA256_OUTPUT_LEN: usize = 32;

/// S3 subresources that are part of the SigV2 canonical resource. Everything else in the query
/// string is left out of the signature.
///
/// This list must stay sorted; [`is_subresource`][crate::is_subresource] binary-searches it.
pub const SUBRESOURCES: &[&str] = &[
    "acl",
    "cors",
    "delete",
    "lifecycle",
    "location",
    "logging",
    "notification",
    "partNumber",
    "policy",
    "requestPayment",
    "response-cache-control",
    "response-content-disposition",
    "response-content-encoding",
    "response-content-language",
    "response-content-type",
    "response-expires",
    "restore",
    "tagging",
    "torrent",
    "uploadId",
    "uploads",
    "versionId",
    "versioning",
    "versions",
    "website",
];

/// Prefix of the headers that take part in the SigV2 canonical request.
pub(crate) const X_AMZ_PREFIX: &str = "x-amz-";
