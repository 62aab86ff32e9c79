use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// Hashes a plaintext password. Called from exactly one place, the
/// create-user operation; the stored column never sees the plaintext.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// Checks a plaintext against a stored hash. A mismatch is `Ok(false)`;
/// only a malformed hash is an error.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_accepts_the_password() {
        let hash = hash_password("secret").expect("hash");
        assert_ne!(hash, "secret");
        assert!(verify_password("secret", &hash).expect("verify"));
    }

    #[test]
    fn verify_rejects_a_wrong_password_without_error() {
        let hash = hash_password("secret").expect("hash");
        assert!(!verify_password("secreto", &hash).expect("verify"));
    }

    #[test]
    fn verify_errors_on_a_malformed_hash() {
        assert!(verify_password("secret", "plaintext-left-over").is_err());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("secret").expect("hash");
        let b = hash_password("secret").expect("hash");
        assert_ne!(a, b);
    }
}
