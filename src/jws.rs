//! # Compact JWS
//!
//! Verification of compact JWS (`header.payload.signature`) signed with
//! `EdDSA` over Ed25519.

use base64ct::{Base64UrlUnpadded, Encoding};
use ed25519_dalek::VerifyingKey;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, TokenData, Validation};
use serde_json::Value;

use crate::error::Error;

/// Verify a compact JWS against `key` and decode its header and JSON
/// payload.
///
/// Only `EdDSA` is accepted. The payload is not a JWT, so no registered
/// claims are required or validated.
///
/// # Errors
///
/// Returns [`Error::InvalidSignature`] if the JWS is malformed, uses an
/// algorithm other than `EdDSA`, or its signature does not verify.
pub fn decode_verify(compact: &str, key: &VerifyingKey) -> Result<TokenData<Value>, Error> {
    let x = Base64UrlUnpadded::encode_string(key.as_bytes());
    let decoding_key = DecodingKey::from_ed_components(&x)
        .map_err(|e| Error::InvalidSignature(format!("invalid verifying key: {e}")))?;

    let mut validation = Validation::new(Algorithm::EdDSA);
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    jsonwebtoken::decode::<Value>(compact, &decoding_key, &validation).map_err(|e| match e.kind() {
        ErrorKind::InvalidSignature => {
            Error::InvalidSignature("signature verification failed".into())
        }
        _ => Error::InvalidSignature(format!("invalid JWS: {e}")),
    })
}

#[cfg(test)]
pub(crate) mod test {
    use ed25519_dalek::SigningKey;
    use ed25519_dalek::pkcs8::EncodePrivateKey;
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::json;

    use super::*;

    /// Sign `payload` as a compact `EdDSA` JWS.
    pub(crate) fn sign(kid: Option<&str>, payload: &Value, key: &SigningKey) -> String {
        let der = key.to_pkcs8_der().expect("should encode key");
        let mut header = Header::new(Algorithm::EdDSA);
        header.kid = kid.map(ToString::to_string);
        jsonwebtoken::encode(&header, payload, &EncodingKey::from_ed_der(der.as_bytes()))
            .expect("should sign")
    }

    #[test]
    fn verified() {
        let key = SigningKey::from_bytes(&[7u8; 32]);
        let payload = json!({"ietf-json-patch": []});
        let compact = sign(Some("did:tz:abc#key"), &payload, &key);

        let jws = decode_verify(&compact, &key.verifying_key()).expect("should verify");
        assert_eq!(jws.header.kid.as_deref(), Some("did:tz:abc#key"));
        assert_eq!(jws.claims, payload);
    }

    #[test]
    fn wrong_key() {
        let key = SigningKey::from_bytes(&[7u8; 32]);
        let other = SigningKey::from_bytes(&[8u8; 32]);
        let compact = sign(None, &json!({}), &other);

        let err = decode_verify(&compact, &key.verifying_key()).expect_err("should fail");
        assert_eq!(err.code(), "invalidSignature");
        assert_eq!(err.message(), "signature verification failed");
    }

    #[test]
    fn tampered_payload() {
        let key = SigningKey::from_bytes(&[7u8; 32]);
        let compact = sign(None, &json!({"a": 1}), &key);
        let forged = Base64UrlUnpadded::encode_string(br#"{"a":2}"#);
        let parts = compact.split('.').collect::<Vec<_>>();
        let compact = format!("{}.{forged}.{}", parts[0], parts[2]);

        let err = decode_verify(&compact, &key.verifying_key()).expect_err("should fail");
        assert_eq!(err.code(), "invalidSignature");
    }

    #[test]
    fn malformed() {
        let key = SigningKey::from_bytes(&[7u8; 32]);
        let hs256 = jsonwebtoken::encode(
            &Header::default(),
            &json!({}),
            &EncodingKey::from_secret(b"secret"),
        )
        .expect("should sign");

        for compact in ["", "a.b", "a.b.c.d", "e30.e30.e30", hs256.as_str()] {
            let err = decode_verify(compact, &key.verifying_key()).expect_err("should fail");
            assert_eq!(err.code(), "invalidSignature", "{compact}");
        }
    }
}
