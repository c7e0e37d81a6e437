//! Password hashing and verification using Argon2id

use crate::{config::SecurityConfig, error::AppError};
use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

/// Password hasher with fixed parameters
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create hasher with default parameters (OWASP recommended)
    pub fn new() -> Self {
        // OWASP recommended parameters (as of 2024)
        // m=64MiB, t=3 iterations, p=4 lanes
        let params = Params::new(65536, 3, 4, None).expect("Invalid Argon2 params");

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        Self { argon2 }
    }

    /// Hash a password. The salt is random per call, so the digest is never
    /// deterministic across calls.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                // 只记录错误类别，绝不记录明文
                tracing::error!(error = %e, "Failed to hash password");
                AppError::Internal
            })?
            .to_string();

        Ok(password_hash)
    }

    /// Verify a password against a stored digest. Fail-closed: a malformed
    /// digest or any library error is reported as a mismatch, never raised.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!(error = %e, "Failed to parse password hash");
                return false;
            }
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Validate password against policy
    pub fn validate_password_policy(
        password: &str,
        policy: &SecurityConfig,
    ) -> Result<(), AppError> {
        if password.len() < policy.password_min_length {
            return Err(AppError::BadRequest(format!(
                "Password must be at least {} characters",
                policy.password_min_length
            )));
        }

        if policy.password_require_uppercase && !password.chars().any(|c| c.is_uppercase()) {
            return Err(AppError::BadRequest(
                "Password must contain at least one uppercase letter".to_string(),
            ));
        }

        if policy.password_require_lowercase && !password.chars().any(|c| c.is_lowercase()) {
            return Err(AppError::BadRequest(
                "Password must contain at least one lowercase letter".to_string(),
            ));
        }

        if policy.password_require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::BadRequest(
                "Password must contain at least one digit".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_policy() -> SecurityConfig {
        SecurityConfig {
            jwt_secret: secrecy::Secret::new("test_secret_key_32_characters_long!".to_string()),
            jwt_algorithm: "HS256".to_string(),
            access_token_exp_minutes: 30,
            registration_enabled: true,
            password_min_length: 8,
            password_require_uppercase: true,
            password_require_lowercase: true,
            password_require_digit: true,
            jwt_secret_is_ephemeral: false,
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "Secret123";

        let hash = hasher.hash(password).unwrap();
        assert!(hasher.verify(password, &hash));
    }

    #[test]
    fn test_verify_fails_with_wrong_password() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("Secret123").unwrap();
        assert!(!hasher.verify("Secret124", &hash));
    }

    #[test]
    fn test_hash_is_different_each_time() {
        let hasher = PasswordHasher::new();
        let password = "Secret123";

        let hash1 = hasher.hash(password).unwrap();
        let hash2 = hasher.hash(password).unwrap();

        // 随机盐保证两次哈希结果不同
        assert_ne!(hash1, hash2);

        assert!(hasher.verify(password, &hash1));
        assert!(hasher.verify(password, &hash2));
    }

    #[test]
    fn test_verify_is_fail_closed_on_malformed_digest() {
        let hasher = PasswordHasher::new();

        // 损坏的摘要不报错，只判为不匹配
        assert!(!hasher.verify("Secret123", "not-a-digest"));
        assert!(!hasher.verify("Secret123", "$argon2id$v=19$broken"));
        assert!(!hasher.verify("Secret123", ""));
    }

    #[test]
    fn test_password_policy() {
        let policy = test_policy();

        assert!(PasswordHasher::validate_password_policy("Secret123", &policy).is_ok());

        // 太短
        assert!(PasswordHasher::validate_password_policy("Sec1", &policy).is_err());
        // 缺大写
        assert!(PasswordHasher::validate_password_policy("secret123", &policy).is_err());
        // 缺小写
        assert!(PasswordHasher::validate_password_policy("SECRET123", &policy).is_err());
        // 缺数字
        assert!(PasswordHasher::validate_password_policy("Secretabc", &policy).is_err());
    }
}
