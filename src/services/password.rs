use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

const DUMMY_PASSWORD: &[u8] = b"devicegate-unknown-account";

/// Argon2id password hashing, stored as PHC strings.
pub struct PasswordService {
    argon2: Argon2<'static>,
    /// Verified against when the account does not exist, so both login paths cost the same.
    dummy_hash: String,
}

impl PasswordService {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_argon2(Argon2::default())
    }

    #[cfg(test)]
    pub fn cheap() -> Self {
        let params = argon2::Params::new(8, 1, 1, None).expect("valid argon2 params");
        Self::with_argon2(Argon2::new(
            argon2::Algorithm::Argon2id,
            argon2::Version::V0x13,
            params,
        ))
        .expect("dummy hash")
    }

    fn with_argon2(argon2: Argon2<'static>) -> anyhow::Result<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let dummy_hash = argon2.hash_password(DUMMY_PASSWORD, &salt)?.to_string();
        Ok(Self { argon2, dummy_hash })
    }

    pub fn hash(&self, password: &str) -> anyhow::Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)?
            .to_string();
        Ok(hash)
    }

    pub fn verify(&self, hash: &str, password: &str) -> anyhow::Result<bool> {
        let parsed = PasswordHash::new(hash)?;
        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// Checks `password` against an account's hash, or against the dummy hash when
    /// there is no account. The latter never matches.
    pub fn verify_account(&self, hash: Option<&str>, password: &str) -> anyhow::Result<bool> {
        match hash {
            Some(hash) => self.verify(hash, password),
            None => {
                self.verify(&self.dummy_hash, password)?;
                Ok(false)
            }
        }
    }
}
