use {
    crate::{constants::SHA256_OUTPUT_LEN, SignatureError},
    hmac::{digest::KeyInit, Hmac, Mac},
    sha1::Sha1,
    sha2::{Digest, Sha256},
};

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA1 of `value` keyed with `key`.
#[inline(always)]
pub(crate) fn hmac_sha1(key: &[u8], value: &[u8]) -> Result<Vec<u8>, SignatureError> {
    let mut mac = <HmacSha1 as KeyInit>::new_from_slice(key)
        .map_err(|e| SignatureError::EncodingError(format!("Unable to key HMAC-SHA1: {}", e)))?;
    mac.update(value);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// HMAC-SHA256 of `value` keyed with `key`.
#[inline(always)]
pub(crate) fn hmac_sha256(key: &[u8], value: &[u8]) -> Result<[u8; SHA256_OUTPUT_LEN], SignatureError> {
    let mut mac = <HmacSha256 as KeyInit>::new_from_slice(key)
        .map_err(|e| SignatureError::EncodingError(format!("Unable to key HMAC-SHA256: {}", e)))?;
    mac.update(value);
    Ok(mac.finalize().into_bytes().into())
}

#[inline(always)]
pub(crate) fn sha256(value: &[u8]) -> [u8; SHA256_OUTPUT_LEN] {
    Sha256::digest(value).into()
}

#[inline(always)]
pub(crate) fn sha256_hex(value: &[u8]) -> String {
    hex::encode(sha256(value))
}
