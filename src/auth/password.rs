/**
 * Password Hashing
 *
 * Credential hashing and verification on top of bcrypt. Hashing embeds a
 * random salt, so hashing the same password twice yields different strings;
 * verification recovers the salt and cost from the stored hash.
 */

use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};

/// Hash a plaintext password with bcrypt at the default cost
///
/// The caller should drop the plaintext as soon as this returns; only the
/// resulting hash is ever stored or compared.
pub fn hash_password(plaintext: &str) -> Result<String, BcryptError> {
    hash(plaintext, DEFAULT_COST)
}

/// Verify a plaintext password against a stored bcrypt hash
///
/// A malformed or truncated stored hash verifies as `false` rather than
/// erroring; a credential check has only two useful outcomes.
pub fn verify_password(plaintext: &str, password_hash: &str) -> bool {
    match verify(plaintext, password_hash) {
        Ok(valid) => valid,
        Err(e) => {
            tracing::warn!("password verification against malformed hash: {:?}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hash = hash_password("Secr3t!pass").unwrap();
        assert_ne!(hash, "Secr3t!pass");
        assert!(verify_password("Secr3t!pass", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn test_salting_makes_hashes_differ() {
        let first = hash_password("same-input").unwrap();
        let second = hash_password("same-input").unwrap();
        assert_ne!(first, second);
        assert!(verify_password("same-input", &first));
        assert!(verify_password("same-input", &second));
    }

    #[test]
    fn test_malformed_hash_verifies_false() {
        assert!(!verify_password("anything", "not-a-bcrypt-hash"));
        assert!(!verify_password("anything", ""));
    }
}
