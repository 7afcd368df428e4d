use {
    crate::{constants::*, crypto::hmac_sha256, SignatureError},
    chrono::NaiveDate,
    std::fmt::{Debug, Display, Formatter, Result as FmtResult},
};

/// A raw AWS secret key (`kSecret`), stored with its `AWS4` prefix.
#[derive(Clone, PartialEq, Eq)]
pub struct KSecretKey {
    /// The secret key, prefixed with "AWS4".
    prefixed_key: Vec<u8>,
}

/// The `kDate` key: `HMAC_SHA256("AWS4" + KSecretKey, "YYYYMMDD")`
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct KDateKey {
    /// The raw key.
    key: [u8; SHA256_OUTPUT_LEN],
}

/// The `kRegion` key: an AWS `kDate` key, HMAC-SHA256 hashed with the region.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct KRegionKey {
    /// The raw key.
    key: [u8; SHA256_OUTPUT_LEN],
}

/// The `kService` key: an AWS `kRegion` key, HMAC-SHA256 hashed with the service.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct KServiceKey {
    /// The raw key.
    key: [u8; SHA256_OUTPUT_LEN],
}

/// The `kSigning` key: an AWS `kService` key, HMAC-SHA256 hashed with the "aws4_request" string.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct KSigningKey {
    /// The resulting raw signing key.
    key: [u8; SHA256_OUTPUT_LEN],
}

/// Keys never print their contents.
macro_rules! opaque_key_fmt {
    ($($key:ident),*) => {
        $(
            impl Debug for $key {
                fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                    f.write_str(stringify!($key))
                }
            }

            impl Display for $key {
                fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                    f.write_str(stringify!($key))
                }
            }
        )*
    };
}

opaque_key_fmt!(KSecretKey, KDateKey, KRegionKey, KServiceKey, KSigningKey);

impl AsRef<[u8]> for KSecretKey {
    fn as_ref(&self) -> &[u8] {
        // Remove the "AWS4" prefix.
        &self.prefixed_key[AWS4_KEY_PREFIX.len()..]
    }
}

impl AsRef<[u8; SHA256_OUTPUT_LEN]> for KDateKey {
    fn as_ref(&self) -> &[u8; SHA256_OUTPUT_LEN] {
        &self.key
    }
}

impl AsRef<[u8; SHA256_OUTPUT_LEN]> for KRegionKey {
    fn as_ref(&self) -> &[u8; SHA256_OUTPUT_LEN] {
        &self.key
    }
}

impl AsRef<[u8; SHA256_OUTPUT_LEN]> for KServiceKey {
    fn as_ref(&self) -> &[u8; SHA256_OUTPUT_LEN] {
        &self.key
    }
}

impl AsRef<[u8; SHA256_OUTPUT_LEN]> for KSigningKey {
    fn as_ref(&self) -> &[u8; SHA256_OUTPUT_LEN] {
        &self.key
    }
}

impl KSecretKey {
    /// Create a new `KSecretKey` from a raw AWS secret key.
    ///
    /// # Errors
    /// Returns [`SignatureError::MissingCredential`] if the secret is empty.
    pub fn new(raw: impl AsRef<[u8]>) -> Result<Self, SignatureError> {
        let raw = raw.as_ref();
        if raw.is_empty() {
            return Err(SignatureError::MissingCredential(MSG_EMPTY_SECRET_KEY.to_string()));
        }

        let mut prefixed_key = Vec::with_capacity(AWS4_KEY_PREFIX.len() + raw.len());
        prefixed_key.extend_from_slice(AWS4_KEY_PREFIX);
        prefixed_key.extend_from_slice(raw);
        Ok(Self {
            prefixed_key,
        })
    }

    /// Create a new `KDateKey` from this `KSecretKey` and a date.
    pub fn to_kdate(&self, date: NaiveDate) -> Result<KDateKey, SignatureError> {
        let date = date.format(ISO8601_DATE_FORMAT).to_string();
        Ok(KDateKey {
            key: hmac_sha256(&self.prefixed_key, date.as_bytes())?,
        })
    }

    /// Create a new `KRegionKey` from this `KSecretKey`, a date, and a region.
    pub fn to_kregion(&self, date: NaiveDate, region: &str) -> Result<KRegionKey, SignatureError> {
        self.to_kdate(date)?.to_kregion(region)
    }

    /// Create a new `KServiceKey` from this `KSecretKey`, a date, a region, and a service.
    pub fn to_kservice(&self, date: NaiveDate, region: &str, service: &str) -> Result<KServiceKey, SignatureError> {
        self.to_kdate(date)?.to_kservice(region, service)
    }

    /// Create a new `KSigningKey` from this `KSecretKey`, a date, a region, and a service.
    pub fn to_ksigning(&self, date: NaiveDate, region: &str, service: &str) -> Result<KSigningKey, SignatureError> {
        self.to_kdate(date)?.to_ksigning(region, service)
    }
}

impl KDateKey {
    /// Create a new `KRegionKey` from this `KDateKey` and a region.
    pub fn to_kregion(&self, region: &str) -> Result<KRegionKey, SignatureError> {
        Ok(KRegionKey {
            key: hmac_sha256(&self.key, region.as_bytes())?,
        })
    }

    /// Create a new `KServiceKey` from this `KDateKey`, a region, and a service.
    pub fn to_kservice(&self, region: &str, service: &str) -> Result<KServiceKey, SignatureError> {
        self.to_kregion(region)?.to_kservice(service)
    }

    /// Create a new `KSigningKey` from this `KDateKey`, a region, and a service.
    pub fn to_ksigning(&self, region: &str, service: &str) -> Result<KSigningKey, SignatureError> {
        self.to_kregion(region)?.to_ksigning(service)
    }
}

impl KRegionKey {
    /// Create a new `KServiceKey` from this `KRegionKey` and a service.
    pub fn to_kservice(&self, service: &str) -> Result<KServiceKey, SignatureError> {
        Ok(KServiceKey {
            key: hmac_sha256(&self.key, service.as_bytes())?,
        })
    }

    /// Create a new `KSigningKey` from this `KRegionKey` and a service.
    pub fn to_ksigning(&self, service: &str) -> Result<KSigningKey, SignatureError> {
        self.to_kservice(service)?.to_ksigning()
    }
}

impl KServiceKey {
    /// Create a new `KSigningKey` from this `KServiceKey`.
    pub fn to_ksigning(&self) -> Result<KSigningKey, SignatureError> {
        Ok(KSigningKey {
            key: hmac_sha256(&self.key, AWS4_REQUEST.as_bytes())?,
        })
    }
}

impl KSigningKey {
    /// Sign a SigV4 string to sign, returning the lowercase hex signature.
    pub fn sign(&self, string_to_sign: &[u8]) -> Result<String, SignatureError> {
        Ok(hex::encode(hmac_sha256(&self.key, string_to_sign)?))
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::{KSecretKey, SignatureError},
        chrono::NaiveDate,
    };

    #[test_log::test]
    fn test_signing_key_derived() {
        let date = NaiveDate::from_ymd_opt(2015, 8, 30).unwrap();

        let ksecret1a = KSecretKey::new("wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY").unwrap();
        let ksecret1b = KSecretKey::new(b"wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY").unwrap();
        let ksecret2 = KSecretKey::new("wJalrXUtnFEMI/K7MDENG+bPxRfiCZEXAMPLEKEY").unwrap();

        assert_eq!(ksecret1a, ksecret1b);
        assert_eq!(ksecret1a, ksecret1a.clone());
        assert_ne!(ksecret1a, ksecret2);
        assert_eq!(format!("{:?}", ksecret1a).as_str(), "KSecretKey");
        assert_eq!(format!("{}", ksecret1a).as_str(), "KSecretKey");
        assert_eq!(ksecret1a.as_ref(), b"wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY");

        let kdate1a = ksecret1a.to_kdate(date).unwrap();
        let kdate2 = ksecret2.to_kdate(date).unwrap();
        assert_eq!(
            kdate1a.as_ref(),
            &[
                0x01, 0x38, 0xc7, 0xa6, 0xcb, 0xd6, 0x0a, 0xa7, 0x27, 0xb2, 0xf6, 0x53, 0xa5, 0x22, 0x56, 0x74, 0x39,
                0xdf, 0xb9, 0xf3, 0xe7, 0x2b, 0x21, 0xf9, 0xb2, 0x59, 0x41, 0xa4, 0x2f, 0x04, 0xa7, 0xcd
            ]
        );
        assert_ne!(kdate1a, kdate2);
        assert_eq!(format!("{:?}", kdate1a).as_str(), "KDateKey");

        let kregion1a = kdate1a.to_kregion("us-east-1").unwrap();
        assert_eq!(
            kregion1a.as_ref(),
            &[
                0xf3, 0x3d, 0x58, 0x08, 0x50, 0x4b, 0xf3, 0x48, 0x12, 0xe5, 0xfa, 0xde, 0x63, 0x30, 0x8b, 0x42, 0x4b,
                0x24, 0x4c, 0x59, 0x18, 0x9b, 0xe2, 0xa5, 0x91, 0xdd, 0x22, 0x82, 0xc7, 0xcb, 0x56, 0x3f
            ]
        );
        assert_eq!(format!("{}", kregion1a).as_str(), "KRegionKey");

        let kservice1a = kregion1a.to_kservice("example").unwrap();
        assert_eq!(
            kservice1a.as_ref(),
            &[
                0xc6, 0x0c, 0xc4, 0xb1, 0xd0, 0x34, 0xc7, 0x57, 0x34, 0x8f, 0x2c, 0x67, 0x30, 0x04, 0xc1, 0x89, 0x08,
                0xbb, 0xa9, 0xa4, 0x6f, 0xa1, 0xdb, 0x87, 0xa9, 0x83, 0x50, 0xf2, 0x7e, 0x7b, 0x2d, 0xf6
            ]
        );
        assert_eq!(format!("{:?}", kservice1a).as_str(), "KServiceKey");

        let ksigning1a = kservice1a.to_ksigning().unwrap();
        assert_eq!(
            ksigning1a.as_ref(),
            &[
                0x43, 0x1c, 0xc9, 0xef, 0x58, 0x76, 0x28, 0x7d, 0xbb, 0x92, 0x5d, 0x4b, 0xa4, 0x62, 0x9f, 0x45, 0x90,
                0x02, 0xad, 0x1d, 0x26, 0xb7, 0xc7, 0x51, 0x60, 0x1b, 0xb2, 0x04, 0xe1, 0x17, 0x18, 0xb8
            ]
        );
        assert_eq!(format!("{}", ksigning1a).as_str(), "KSigningKey");

        assert_eq!(ksecret1a.to_kregion(date, "us-east-1").unwrap(), kregion1a);
        assert_eq!(ksecret1a.to_kservice(date, "us-east-1", "example").unwrap(), kservice1a);
        assert_eq!(ksecret1a.to_ksigning(date, "us-east-1", "example").unwrap(), ksigning1a);
        assert_eq!(kdate1a.to_kservice("us-east-1", "example").unwrap(), kservice1a);
        assert_eq!(kdate1a.to_ksigning("us-east-1", "example").unwrap(), ksigning1a);
        assert_eq!(kregion1a.to_ksigning("example").unwrap(), ksigning1a);
    }

    #[test_log::test]
    fn test_empty_secret() {
        let e = KSecretKey::new("").unwrap_err();
        assert!(matches!(e, SignatureError::MissingCredential(_)));
    }
}
