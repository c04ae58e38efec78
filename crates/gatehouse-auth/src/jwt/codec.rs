//! Token signing and verification with a configuration-injected secret.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use gatehouse_core::config::auth::AuthConfig;

use super::claims::Claims;
use crate::error::AuthError;
use crate::session::Session;

/// Signs and verifies opaque bearer tokens (HMAC-SHA256).
///
/// The secret is injected at construction time from [`AuthConfig`]; there is
/// no ambient configuration lookup, so tests can run with distinct secrets
/// side by side.
#[derive(Clone)]
pub struct TokenCodec {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration (algorithm pin, exp/nbf checks, leeway).
    validation: Validation,
    /// Token TTL in hours.
    ttl_hours: i64,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("validation", &self.validation)
            .field("ttl_hours", &self.ttl_hours)
            .finish()
    }
}

impl TokenCodec {
    /// Creates a new codec from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        // Pinning the algorithm list rejects tokens asserting any other
        // signing scheme before signature verification is attempted.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = config.leeway_seconds;

        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            ttl_hours: config.token_ttl_hours,
        }
    }

    /// Signs the given session into an opaque, self-contained token.
    ///
    /// Stamps `iat = nbf = now` and `exp = now + ttl`. Fails with
    /// [`AuthError::IncompleteSession`] when the session is missing its
    /// profile ID and/or role; the error message names every missing field.
    pub fn encode(&self, session: &Session) -> Result<String, AuthError> {
        let mut missing = Vec::new();
        if session.profile_id.is_empty() {
            missing.push("missing profile id");
        }
        if session.role.is_none() {
            missing.push("missing or invalid role");
        }
        if !missing.is_empty() {
            return Err(AuthError::IncompleteSession(missing.join(" and ")));
        }

        let now = Utc::now();
        let expires = now + chrono::Duration::hours(self.ttl_hours);
        let claims = Claims {
            sub: session.profile_id.clone(),
            role: session.role,
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: expires.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AuthError::InvalidToken)
    }

    /// Verifies and decodes a token string back into its claims.
    ///
    /// Expiry surfaces as [`AuthError::TokenExpired`]; every other structural
    /// or cryptographic failure collapses into the opaque
    /// [`AuthError::InvalidToken`] so the caller learns nothing about which
    /// check failed.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        if token.is_empty() {
            return Err(AuthError::EmptyToken);
        }

        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            }
        })?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatehouse_entity::user::Role;

    fn test_config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            token_ttl_hours: 24,
            leeway_seconds: 0,
            ..AuthConfig::default()
        }
    }

    fn codec() -> TokenCodec {
        TokenCodec::new(&test_config("test-secret"))
    }

    #[test]
    fn test_round_trip_preserves_session() {
        let codec = codec();
        let session = Session::new("000000000000000000000001", Role::Root);
        let token = codec.encode(&session).unwrap();

        let claims = codec.decode(&token).unwrap();
        assert_eq!(claims.sub, "000000000000000000000001");
        assert_eq!(claims.role, Some(Role::Root));
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.iat, claims.nbf);
    }

    #[test]
    fn test_encode_rejects_missing_profile_id() {
        let codec = codec();
        let session = Session {
            profile_id: String::new(),
            role: Some(Role::Admin),
        };
        let err = codec.encode(&session).unwrap_err();
        assert_eq!(
            err,
            AuthError::IncompleteSession("missing profile id".to_string())
        );
    }

    #[test]
    fn test_encode_rejects_missing_role() {
        let codec = codec();
        let session = Session {
            profile_id: "000000000000000000000001".to_string(),
            role: None,
        };
        let err = codec.encode(&session).unwrap_err();
        assert_eq!(
            err,
            AuthError::IncompleteSession("missing or invalid role".to_string())
        );
    }

    #[test]
    fn test_encode_enumerates_both_missing_fields() {
        let codec = codec();
        let session = Session {
            profile_id: String::new(),
            role: None,
        };
        let err = codec.encode(&session).unwrap_err();
        assert_eq!(
            err,
            AuthError::IncompleteSession(
                "missing profile id and missing or invalid role".to_string()
            )
        );
    }

    #[test]
    fn test_decode_empty_token_is_its_own_error() {
        let err = codec().decode("").unwrap_err();
        assert_eq!(err, AuthError::EmptyToken);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = codec().decode("invalidTokenaaaaaaaa!!!!").unwrap_err();
        assert_eq!(err, AuthError::InvalidToken);
    }

    #[test]
    fn test_tampering_breaks_the_signature() {
        let codec = codec();
        let session = Session::new("profile-1", Role::Member);
        let token = codec.encode(&session).unwrap();

        // Flip one byte somewhere in the payload segment.
        let mut bytes = token.into_bytes();
        let mid = bytes.len() / 2;
        bytes[mid] = if bytes[mid] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert_eq!(codec.decode(&tampered).unwrap_err(), AuthError::InvalidToken);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let session = Session::new("profile-1", Role::Member);
        let token = codec().encode(&session).unwrap();

        let other = TokenCodec::new(&test_config("a-different-secret"));
        assert_eq!(other.decode(&token).unwrap_err(), AuthError::InvalidToken);
    }

    #[test]
    fn test_expired_token_fails_with_expiry_class() {
        let codec = codec();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "profile-1".to_string(),
            role: Some(Role::Member),
            iat: now - 7200,
            nbf: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert_eq!(codec.decode(&token).unwrap_err(), AuthError::TokenExpired);
    }

    #[test]
    fn test_not_yet_valid_token_is_rejected() {
        let codec = codec();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "profile-1".to_string(),
            role: Some(Role::Member),
            iat: now + 3600,
            nbf: now + 3600,
            exp: now + 7200,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert_eq!(codec.decode(&token).unwrap_err(), AuthError::InvalidToken);
    }

    #[test]
    fn test_foreign_algorithm_is_rejected() {
        let codec = codec();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "profile-1".to_string(),
            role: Some(Role::Member),
            iat: now,
            nbf: now,
            exp: now + 3600,
        };
        // Same secret, but signed with HS384 — the codec only accepts HS256.
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert_eq!(codec.decode(&token).unwrap_err(), AuthError::InvalidToken);
    }

    #[test]
    fn test_token_without_role_decodes_but_carries_none() {
        // A validly signed token that never carried a role claim still
        // decodes; role gating is the middleware's job.
        let codec = codec();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "profile-1".to_string(),
            role: None,
            iat: now,
            nbf: now,
            exp: now + 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let decoded = codec.decode(&token).unwrap();
        assert_eq!(decoded.role, None);
    }
}
