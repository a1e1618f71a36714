use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::IssuedToken;
use super::errors::JwtError;
use crate::clock::Clock;
use crate::clock::SystemClock;

/// JWT codec for issuing and validating time-bounded tokens.
///
/// Uses HS256 (HMAC with SHA-256): the service that issues tokens is the only
/// one that verifies them, so a single shared secret is enough.
pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtCodec {
    /// Create a new codec backed by the system clock.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    /// * `ttl` - Lifetime of every issued token
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self::with_clock(secret, ttl, Arc::new(SystemClock))
    }

    /// Create a new codec reading time from `clock`.
    pub fn with_clock(secret: &[u8], ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let algorithm = Algorithm::HS256;

        let mut validation = Validation::new(algorithm);
        // Expiry is checked against our own clock with no leeway, see `decode`.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            validation,
            ttl,
            clock,
        }
    }

    /// Issue a token for `subject`, valid from now until now + TTL.
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiry out of range or token encoding failed
    pub fn issue(&self, subject: &str) -> Result<IssuedToken, JwtError> {
        let claims = Claims::for_subject(subject, self.clock.now(), self.ttl)
            .ok_or_else(|| JwtError::EncodingFailed("expiry out of range".to_string()))?;
        let header = Header::new(self.algorithm);

        let token = encode(&header, &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))?;

        Ok(IssuedToken { token, claims })
    }

    /// Decode and validate a token.
    ///
    /// The signature is verified before the payload is trusted, then the
    /// expiry is compared against the clock: a token is valid only while
    /// `now < exp`.
    ///
    /// # Errors
    /// * `Malformed` - Not three segments, bad base64url, or claims that do not parse
    /// * `InvalidSignature` - MAC mismatch or an algorithm other than HS256
    /// * `Expired` - The clock has reached `exp`
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                        JwtError::InvalidSignature
                    }
                    ErrorKind::ExpiredSignature => JwtError::Expired,
                    _ => JwtError::Malformed(e.to_string()),
                }
            })?;

        let claims = token_data.claims;
        if claims.is_expired(self.clock.now().timestamp()) {
            return Err(JwtError::Expired);
        }

        Ok(claims)
    }

    /// Subject of a valid token.
    ///
    /// # Errors
    /// Same failures as [`JwtCodec::decode`].
    pub fn extract_subject(&self, token: &str) -> Result<String, JwtError> {
        self.decode(token).map(|claims| claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use serde::Serialize;

    use super::*;
    use crate::clock::ManualClock;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    fn codec_at(start: i64) -> (JwtCodec, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(
            DateTime::from_timestamp(start, 0).unwrap(),
        ));
        let codec = JwtCodec::with_clock(SECRET, Duration::minutes(30), clock.clone());
        (codec, clock)
    }

    #[test]
    fn test_issue_and_decode() {
        let (codec, _clock) = codec_at(1_700_000_000);

        let issued = codec.issue("alice").expect("Failed to issue token");
        assert_eq!(issued.token.split('.').count(), 3);
        assert_eq!(issued.subject(), "alice");
        assert_eq!(issued.claims.iat, 1_700_000_000);
        assert_eq!(issued.claims.exp, 1_700_000_000 + 30 * 60);

        let decoded = codec.decode(&issued.token).expect("Failed to decode token");
        assert_eq!(decoded, issued.claims);
        assert_eq!(codec.extract_subject(&issued.token).unwrap(), "alice");
    }

    #[test]
    fn test_token_expires_when_clock_reaches_exp() {
        let (codec, clock) = codec_at(1_700_000_000);
        let issued = codec.issue("alice").unwrap();

        clock.advance(Duration::minutes(30) - Duration::seconds(1));
        assert!(codec.decode(&issued.token).is_ok());

        clock.advance(Duration::seconds(1));
        assert_eq!(codec.decode(&issued.token), Err(JwtError::Expired));
        assert_eq!(codec.extract_subject(&issued.token), Err(JwtError::Expired));

        clock.advance(Duration::hours(5));
        assert_eq!(codec.decode(&issued.token), Err(JwtError::Expired));
    }

    #[test]
    fn test_issue_with_unrepresentable_ttl_fails() {
        let clock = Arc::new(ManualClock::new(
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        ));
        let codec = JwtCodec::with_clock(SECRET, Duration::minutes(1_000_000_000_000), clock);

        assert!(matches!(
            codec.issue("alice"),
            Err(JwtError::EncodingFailed(_))
        ));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let (codec, clock) = codec_at(1_700_000_000);
        let other = JwtCodec::with_clock(
            b"secret2_at_least_32_bytes_long_key!",
            Duration::minutes(30),
            clock,
        );

        let issued = codec.issue("alice").unwrap();
        assert_eq!(other.decode(&issued.token), Err(JwtError::InvalidSignature));
    }

    #[test]
    fn test_decode_garbage_is_malformed() {
        let (codec, _clock) = codec_at(1_700_000_000);

        for token in ["", "invalid", "invalid.token.here", "a.b", "a.b.c.d"] {
            assert!(
                matches!(codec.decode(token), Err(JwtError::Malformed(_))),
                "expected Malformed for {:?}",
                token
            );
        }
    }

    #[test]
    fn test_single_character_tampering_never_decodes() {
        let (codec, _clock) = codec_at(1_700_000_000);
        let token = codec.issue("alice").unwrap().token;
        let header_len = token.find('.').unwrap() + 1;

        for (i, original) in token.char_indices().skip(header_len) {
            if original == '.' {
                continue;
            }
            let replacement = if original == 'A' { 'B' } else { 'A' };
            let mut tampered = token.clone();
            tampered.replace_range(i..i + 1, &replacement.to_string());

            let result = codec.decode(&tampered);
            assert!(
                matches!(
                    result,
                    Err(JwtError::InvalidSignature) | Err(JwtError::Malformed(_))
                ),
                "tampering at {} produced {:?}",
                i,
                result
            );
        }
    }

    #[test]
    fn test_other_algorithm_rejected() {
        let (codec, _clock) = codec_at(1_700_000_000);
        let claims = Claims::for_subject(
            "alice",
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            Duration::minutes(30),
        )
        .unwrap();

        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert_eq!(codec.decode(&token), Err(JwtError::InvalidSignature));
    }

    #[test]
    fn test_missing_claims_are_malformed() {
        #[derive(Serialize)]
        struct SubjectOnly {
            sub: String,
        }

        let (codec, _clock) = codec_at(1_700_000_000);
        let token = encode(
            &Header::new(Algorithm::HS256),
            &SubjectOnly {
                sub: "alice".to_string(),
            },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert!(matches!(codec.decode(&token), Err(JwtError::Malformed(_))));
    }
}
