//! Argon2id password hashing and one-time password generation.
//!
//! Hashing is policy-gated: the `PasswordHashingRequired` system parameter
//! decides whether a password is hashed before storage, so stored values can
//! be either PHC strings or plaintext. All hashes use the Argon2id variant
//! with a cryptographically random salt; the PHC string format embeds the
//! algorithm parameters and salt in the stored value itself.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::Rng;

/// Character set for generated one-time passwords.
const ONE_TIME_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()_+{}|:<>?-=[];,./";

/// Length of generated one-time passwords.
pub const ONE_TIME_PASSWORD_LEN: usize = 8;

/// Hash a plaintext password using Argon2id with a random salt.
///
/// Returns the PHC-formatted hash string (includes algorithm, params, salt, and hash).
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default(); // Argon2id with default params
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted Argon2id hash.
///
/// Returns `Ok(true)` if the password matches, `Ok(false)` if it does not.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Whether a stored password value is an Argon2 PHC string (as opposed to a
/// legacy plaintext value stored while hashing was switched off).
pub fn is_argon2_hash(stored: &str) -> bool {
    stored.starts_with("$argon2")
}

/// Generate a random one-time password for newly created users.
pub fn generate_one_time_password(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| ONE_TIME_CHARSET[rng.random_range(0..ONE_TIME_CHARSET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password).expect("hashing should succeed");

        // The hash must be a valid PHC string starting with the argon2id identifier.
        assert!(
            hash.starts_with("$argon2id$"),
            "expected argon2id PHC prefix"
        );
        assert!(is_argon2_hash(&hash));

        let verified = verify_password(password, &hash).expect("verify should succeed");
        assert!(verified, "correct password should verify as true");
    }

    #[test]
    fn test_wrong_password_fails() {
        let hash = hash_password("real-password").expect("hashing should succeed");
        let verified = verify_password("wrong-password", &hash).expect("verify should succeed");
        assert!(!verified, "wrong password should verify as false");
    }

    #[test]
    fn test_plaintext_is_not_a_hash() {
        assert!(!is_argon2_hash("hunter2"));
        assert!(!is_argon2_hash(""));
    }

    #[test]
    fn test_one_time_password_shape() {
        let password = generate_one_time_password(ONE_TIME_PASSWORD_LEN);
        assert_eq!(password.len(), ONE_TIME_PASSWORD_LEN);
        assert!(password.bytes().all(|b| ONE_TIME_CHARSET.contains(&b)));

        // Two draws colliding would mean the generator is not random at all.
        let other = generate_one_time_password(ONE_TIME_PASSWORD_LEN);
        assert_ne!(password, other);
    }
}
