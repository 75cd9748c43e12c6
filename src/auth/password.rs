use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// Argon2id with a fresh per-password salt; the salt travels inside the
/// encoded hash string.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!(error = %e, "password hashing failed");
            anyhow::anyhow!(e.to_string())
        })
}

/// Ok(false) means the password does not match; Err means the stored hash
/// itself is unusable.
pub fn verify_password(plain: &str, stored: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(stored).map_err(|e| {
        error!(error = %e, "stored password hash is malformed");
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
    fn correct_password_verifies_against_its_hash() {
        let hash = hash_password("grocery-budget-2024").expect("hash");
        assert!(verify_password("grocery-budget-2024", &hash).expect("verify"));
    }

    #[test]
    fn wrong_password_is_rejected_without_error() {
        let hash = hash_password("monthly-rent-950").expect("hash");
        assert!(!verify_password("monthly-rent-951", &hash).expect("verify"));
    }

    #[test]
    fn same_password_hashes_differently_each_time() {
        let first = hash_password("coffee-run").expect("hash");
        let second = hash_password("coffee-run").expect("hash");
        assert_ne!(first, second);
    }

    #[test]
    fn garbage_stored_hash_is_an_error_not_a_mismatch() {
        assert!(verify_password("anything", "$argon2id$garbage").is_err());
    }
}
