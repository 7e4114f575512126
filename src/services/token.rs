use crate::config::AuthorizeConfig;
use crate::models::UserEntity;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Caller context derived from a verified credential. Lives for one request.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Identity {
    pub subject_id: Uuid,
    pub is_admin: bool,
}

#[derive(Error, Debug, Eq, PartialEq)]
pub enum TokenError {
    #[error("credential is malformed or its signature does not match")]
    InvalidCredential,
    #[error("credential has expired")]
    CredentialExpired,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    iss: String,
    sub: Uuid,
    /// Admin flag as it was at login time.
    adm: bool,
    iat: i64,
    exp: i64,
    jti: String,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// Issues and verifies HS256 session tokens. Stateless: nothing is persisted.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    ttl: i64,
}

impl TokenService {
    pub fn new(config: &AuthorizeConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer.clone(),
            ttl: config.token_ttl,
        }
    }

    pub fn issue(&self, user: &UserEntity) -> anyhow::Result<IssuedToken> {
        self.issue_at(user, chrono::Utc::now().timestamp())
    }

    pub fn issue_at(&self, user: &UserEntity, now: i64) -> anyhow::Result<IssuedToken> {
        let claims = Claims {
            iss: self.issuer.clone(),
            sub: user.id,
            adm: user.is_admin,
            iat: now,
            exp: now
                .checked_add(self.ttl)
                .ok_or_else(|| anyhow::anyhow!("Token expiry out of range: {now} + {}", self.ttl))?,
            jti: ulid::Ulid::new().to_string(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok(IssuedToken {
            token,
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }

    pub fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        self.verify_at(token, chrono::Utc::now().timestamp())
    }

    /// A token is still valid at exactly `exp`; it expires once `now > exp`.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Identity, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        // expiry is checked below against the caller's clock, without leeway
        validation.validate_exp = false;
        let claims = decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::InvalidCredential)?;
        if now > claims.exp {
            return Err(TokenError::CredentialExpired);
        }
        Ok(Identity {
            subject_id: claims.sub,
            is_admin: claims.adm,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str, issuer: &str) -> AuthorizeConfig {
        AuthorizeConfig {
            secret: secret.to_string(),
            token_ttl: 3600,
            issuer: issuer.to_string(),
        }
    }

    fn user(is_admin: bool) -> UserEntity {
        UserEntity {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            password_hash: String::new(),
            is_admin,
            created_at: 0,
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let tokens = TokenService::new(&config("secret", "devicegate"));
        let alice = user(false);
        let issued = tokens.issue(&alice).unwrap();
        assert_eq!(issued.expires_at - issued.issued_at, 3600);
        let identity = tokens.verify(&issued.token).unwrap();
        assert_eq!(
            identity,
            Identity {
                subject_id: alice.id,
                is_admin: false
            }
        );
    }

    #[test]
    fn test_expiry_boundary() {
        let tokens = TokenService::new(&config("secret", "devicegate"));
        let issued = tokens.issue_at(&user(false), 1_000).unwrap();
        assert_eq!(issued.expires_at, 4_600);
        assert!(tokens.verify_at(&issued.token, 4_600).is_ok());
        assert_eq!(
            tokens.verify_at(&issued.token, 4_601),
            Err(TokenError::CredentialExpired)
        );
    }

    #[test]
    fn test_issue_rejects_out_of_range_expiry() {
        let tokens = TokenService::new(&AuthorizeConfig {
            secret: "secret".to_string(),
            token_ttl: i64::MAX,
            issuer: "devicegate".to_string(),
        });
        assert!(tokens.issue_at(&user(false), 1_000).is_err());
        assert!(tokens.issue(&user(false)).is_err());
    }

    #[test]
    fn test_admin_flag_is_snapshotted() {
        let tokens = TokenService::new(&config("secret", "devicegate"));
        let mut admin = user(true);
        let issued = tokens.issue(&admin).unwrap();
        // demoted in the store after login
        admin.is_admin = false;
        let identity = tokens.verify(&issued.token).unwrap();
        assert!(identity.is_admin);
        assert_eq!(identity.subject_id, admin.id);
    }

    #[test]
    fn test_reject_foreign_secret_and_issuer() {
        let tokens = TokenService::new(&config("secret", "devicegate"));
        let forged = TokenService::new(&config("other-secret", "devicegate"))
            .issue(&user(true))
            .unwrap();
        assert_eq!(
            tokens.verify(&forged.token),
            Err(TokenError::InvalidCredential)
        );
        let foreign = TokenService::new(&config("secret", "elsewhere"))
            .issue(&user(false))
            .unwrap();
        assert_eq!(
            tokens.verify(&foreign.token),
            Err(TokenError::InvalidCredential)
        );
    }

    #[test]
    fn test_reject_spliced_payload() {
        let tokens = TokenService::new(&config("secret", "devicegate"));
        let plain = tokens.issue(&user(false)).unwrap().token;
        let admin = tokens.issue(&user(true)).unwrap().token;
        let plain_parts = plain.split('.').collect::<Vec<_>>();
        let admin_parts = admin.split('.').collect::<Vec<_>>();
        let spliced = format!("{}.{}.{}", plain_parts[0], admin_parts[1], plain_parts[2]);
        assert_eq!(tokens.verify(&spliced), Err(TokenError::InvalidCredential));
    }

    #[test]
    fn test_reject_malformed() {
        let tokens = TokenService::new(&config("secret", "devicegate"));
        for token in ["", "not-a-token", "a.b.c", "placeholder-admin-token"] {
            assert_eq!(tokens.verify(token), Err(TokenError::InvalidCredential));
        }
    }
}
