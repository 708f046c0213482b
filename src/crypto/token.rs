//! Stateless HS256 session tokens (compact JWS).
//!
//! A token is valid iff its signature checks out under the server secret and
//! `exp` is in the future. There is no revocation list.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::error::{AppError, Result};
use crate::models::session::Identity;
use crate::models::user::Role;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HS256";

#[derive(Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

/// Claims embedded in every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// The user ID.
    pub sub: Uuid,
    pub role: Role,
    /// Issued-at, Unix seconds.
    pub iat: i64,
    /// Expiry, Unix seconds.
    pub exp: i64,
}

impl Claims {
    pub fn identity(&self) -> Identity {
        Identity { user_id: self.sub, role: self.role }
    }
}

/// Signs and verifies session tokens with a shared secret.
#[derive(Clone)]
pub struct TokenIssuer {
    secret: Arc<Zeroizing<Vec<u8>>>,
    ttl: Duration,
}

fn invalid(reason: &str) -> AppError {
    AppError::Unauthenticated(reason.to_string())
}

impl TokenIssuer {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            secret: Arc::new(Zeroizing::new(secret.to_vec())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn sign(&self, signing_input: &str) -> Result<Vec<u8>> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| AppError::Internal(format!("HMAC key error: {}", e)))?;
        mac.update(signing_input.as_bytes());
        Ok(mac.finalize().into_bytes().to_vec())
    }

    /// Mints a token for `user_id` valid from now for the configured window.
    pub fn issue(&self, user_id: Uuid, role: Role) -> Result<String> {
        self.issue_at(user_id, role, Utc::now())
    }

    /// Mints a token as if issued at `issued_at`.
    pub fn issue_at(&self, user_id: Uuid, role: Role, issued_at: DateTime<Utc>) -> Result<String> {
        let header = Header { alg: ALGORITHM.to_string(), typ: "JWT".to_string() };
        let claims = Claims {
            sub: user_id,
            role,
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        let header_json = sonic_rs::to_string(&header)
            .map_err(|e| AppError::Internal(format!("Token header serialization failed: {}", e)))?;
        let claims_json = sonic_rs::to_string(&claims)
            .map_err(|e| AppError::Internal(format!("Token claims serialization failed: {}", e)))?;

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header_json),
            URL_SAFE_NO_PAD.encode(claims_json)
        );
        let signature = URL_SAFE_NO_PAD.encode(self.sign(&signing_input)?);
        Ok(format!("{}.{}", signing_input, signature))
    }

    /// Verifies signature and expiry against the current time.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        self.verify_at(token, Utc::now())
    }

    /// Verifies signature and expiry against `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims> {
        let mut parts = token.split('.');
        let (Some(header_b64), Some(claims_b64), Some(signature_b64), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid("malformed token"));
        };

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| invalid("malformed token signature"))?;
        let expected = self.sign(&format!("{}.{}", header_b64, claims_b64))?;
        if !bool::from(expected.as_slice().ct_eq(signature.as_slice())) {
            return Err(invalid("invalid token signature"));
        }

        let header_json = URL_SAFE_NO_PAD
            .decode(header_b64)
            .map_err(|_| invalid("malformed token header"))?;
        let header: Header =
            sonic_rs::from_slice(&header_json).map_err(|_| invalid("malformed token header"))?;
        if header.alg != ALGORITHM {
            return Err(invalid("unsupported token algorithm"));
        }

        let claims_json = URL_SAFE_NO_PAD
            .decode(claims_b64)
            .map_err(|_| invalid("malformed token claims"))?;
        let claims: Claims =
            sonic_rs::from_slice(&claims_json).map_err(|_| invalid("malformed token claims"))?;

        if claims.exp <= now.timestamp() {
            return Err(invalid("token expired"));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(b"0123456789abcdef0123456789abcdef", Duration::hours(1))
    }

    #[test]
    fn issued_token_verifies_to_same_identity() {
        let issuer = issuer();
        let user_id = Uuid::new_v4();
        let token = issuer.issue(user_id, Role::Admin).unwrap();
        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.identity(), Identity { user_id, role: Role::Admin });
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn token_is_rejected_once_expired() {
        let issuer = issuer();
        let issued_at = Utc::now();
        let token = issuer.issue_at(Uuid::new_v4(), Role::User, issued_at).unwrap();

        assert!(issuer.verify_at(&token, issued_at + Duration::minutes(59)).is_ok());
        let err = issuer
            .verify_at(&token, issued_at + Duration::hours(1))
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated(_)));
    }

    #[test]
    fn tampered_claims_are_rejected() {
        let issuer = issuer();
        let token = issuer.issue(Uuid::new_v4(), Role::User).unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let forged_claims = Claims {
            sub: Uuid::new_v4(),
            role: Role::Admin,
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 3600,
        };
        let forged = URL_SAFE_NO_PAD.encode(sonic_rs::to_string(&forged_claims).unwrap());
        let tampered = format!("{}.{}.{}", parts[0], forged, parts[2]);

        assert!(issuer.verify(&tampered).is_err());
    }

    #[test]
    fn token_from_another_secret_is_rejected() {
        let other = TokenIssuer::new(b"another-secret-another-secret-xx", Duration::hours(1));
        let token = other.issue(Uuid::new_v4(), Role::User).unwrap();
        assert!(issuer().verify(&token).is_err());
    }

    #[test]
    fn unsigned_alg_none_is_rejected() {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
        let claims = URL_SAFE_NO_PAD.encode(format!(
            r#"{{"sub":"{}","role":"admin","iat":0,"exp":{}}}"#,
            Uuid::new_v4(),
            Utc::now().timestamp() + 3600
        ));
        assert!(issuer().verify(&format!("{}.{}.", header, claims)).is_err());
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let issuer = issuer();
        for token in ["", "abc", "a.b", "a.b.c.d", "!!.??.##"] {
            assert!(
                matches!(issuer.verify(token), Err(AppError::Unauthenticated(_))),
                "accepted {:?}",
                token
            );
        }
    }
}
