//! JWT token issuance and validation
//! Stateless bearer tokens carrying a `{sub, exp}` claim set

use crate::{config::AppConfig, error::AppError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// 令牌长度上限，超长输入在解码前直接拒绝
pub const MAX_TOKEN_LEN: usize = 4096;

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Expiration (unix timestamp, UTC)
    pub exp: i64,
}

/// JWT service
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    default_ttl_minutes: i64,
}

impl JwtService {
    /// Create JWT service from config
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let secret = config.security.jwt_secret.expose_secret();

        // HS256 密钥至少 32 字节
        if secret.len() < 32 {
            return Err(AppError::Config(
                "JWT secret too short (min 32 chars)".to_string(),
            ));
        }

        let algorithm = match config.security.jwt_algorithm.as_str() {
            "HS256" => Algorithm::HS256,
            "HS384" => Algorithm::HS384,
            "HS512" => Algorithm::HS512,
            other => {
                return Err(AppError::Config(format!(
                    "Unsupported JWT algorithm: {}",
                    other
                )))
            }
        };

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
            default_ttl_minutes: config.security.access_token_exp_minutes,
        })
    }

    /// 默认有效期（秒），用于登录响应中的 expires_in
    pub fn expires_in_secs(&self) -> u64 {
        (self.default_ttl_minutes * 60) as u64
    }

    /// Issue a token for a subject with the configured default TTL
    pub fn issue(&self, subject: &str) -> Result<String, AppError> {
        self.issue_with_ttl(subject, Duration::minutes(self.default_ttl_minutes))
    }

    /// Issue a token with an explicit TTL. Expiry is computed from a single
    /// UTC clock read. Signing failure is propagated: an unsigned token must
    /// never be returned.
    pub fn issue_with_ttl(&self, subject: &str, ttl: Duration) -> Result<String, AppError> {
        let expiration = Utc::now() + ttl;

        let claims = Claims {
            sub: subject.to_string(),
            exp: expiration.timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to encode access token");
            AppError::Internal
        })
    }

    /// Decode and validate a token. All failures collapse into the same
    /// rejection so the caller cannot tell which check failed:
    /// 1. absent or oversized input is rejected before any decode attempt
    /// 2. signature / structural validation under the configured algorithm
    /// 3. the subject claim must be non-empty
    /// 4. expiry is checked by the library and again explicitly; the
    ///    explicit comparison is strict, so a token whose `exp` equals the
    ///    current second is already expired
    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        if token.is_empty() || token.len() > MAX_TOKEN_LEN {
            tracing::debug!(len = token.len(), "Rejected token by length guard");
            return Err(AppError::Unauthorized);
        }

        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token validation failed");
                AppError::Unauthorized
            })?
            .claims;

        if claims.sub.is_empty() {
            tracing::debug!("Token missing subject claim");
            return Err(AppError::Unauthorized);
        }

        if Utc::now().timestamp() >= claims.exp {
            tracing::debug!("Token expired");
            return Err(AppError::Unauthorized);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        AppConfig, DatabaseConfig, LoggingConfig, SecurityConfig, ServerConfig,
    };
    use secrecy::Secret;

    fn test_config(secret: &str) -> AppConfig {
        AppConfig {
            server: ServerConfig {
                addr: "127.0.0.1:3000".to_string(),
                graceful_shutdown_timeout_secs: 30,
            },
            database: DatabaseConfig {
                url: Secret::new("postgresql://localhost/test".to_string()),
                max_connections: 10,
                min_connections: 1,
                acquire_timeout_secs: 30,
                idle_timeout_secs: 600,
                max_lifetime_secs: 1800,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "json".to_string(),
            },
            security: SecurityConfig {
                jwt_secret: Secret::new(secret.to_string()),
                jwt_algorithm: "HS256".to_string(),
                access_token_exp_minutes: 30,
                registration_enabled: true,
                password_min_length: 8,
                password_require_uppercase: true,
                password_require_lowercase: true,
                password_require_digit: true,
                jwt_secret_is_ephemeral: false,
            },
        }
    }

    #[test]
    fn test_issue_and_validate() {
        let service =
            JwtService::from_config(&test_config("test_secret_key_32_characters_long!")).unwrap();

        let token = service.issue("alice").unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.sub, "alice");
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_expired_token_rejected() {
        let service =
            JwtService::from_config(&test_config("test_secret_key_32_characters_long!")).unwrap();

        let token = service.issue_with_ttl("alice", Duration::seconds(-1)).unwrap();
        assert!(service.validate_token(&token).is_err());
    }

    #[test]
    fn test_exp_equal_to_now_is_expired() {
        let service =
            JwtService::from_config(&test_config("test_secret_key_32_characters_long!")).unwrap();

        // exp 恰好等于当前秒：严格要求 now < exp，因此视为过期
        let token = service.issue_with_ttl("alice", Duration::zero()).unwrap();
        assert!(service.validate_token(&token).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer =
            JwtService::from_config(&test_config("test_secret_key_32_characters_long!")).unwrap();
        let verifier =
            JwtService::from_config(&test_config("another_secret_key_32_characters!!!!")).unwrap();

        let token = issuer.issue("alice").unwrap();
        assert!(verifier.validate_token(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service =
            JwtService::from_config(&test_config("test_secret_key_32_characters_long!")).unwrap();

        assert!(service.validate_token("not-a-jwt").is_err());
        assert!(service.validate_token("a.b.c").is_err());
    }

    #[test]
    fn test_length_guard() {
        let service =
            JwtService::from_config(&test_config("test_secret_key_32_characters_long!")).unwrap();

        assert!(service.validate_token("").is_err());
        let oversized = "a".repeat(MAX_TOKEN_LEN + 1);
        assert!(service.validate_token(&oversized).is_err());
    }

    #[test]
    fn test_missing_subject_rejected() {
        let service =
            JwtService::from_config(&test_config("test_secret_key_32_characters_long!")).unwrap();

        let token = service.issue_with_ttl("", Duration::minutes(5)).unwrap();
        assert!(service.validate_token(&token).is_err());
    }

    #[test]
    fn test_alternative_hmac_algorithms() {
        for alg in ["HS384", "HS512"] {
            let mut config = test_config("test_secret_key_32_characters_long!");
            config.security.jwt_algorithm = alg.to_string();

            let service = JwtService::from_config(&config).unwrap();
            let token = service.issue("alice").unwrap();
            assert_eq!(service.validate_token(&token).unwrap().sub, "alice");
        }
    }

    #[test]
    fn test_algorithm_mismatch_rejected() {
        let hs256 =
            JwtService::from_config(&test_config("test_secret_key_32_characters_long!")).unwrap();

        let mut config = test_config("test_secret_key_32_characters_long!");
        config.security.jwt_algorithm = "HS512".to_string();
        let hs512 = JwtService::from_config(&config).unwrap();

        let token = hs256.issue("alice").unwrap();
        assert!(hs512.validate_token(&token).is_err());
    }

    #[test]
    fn test_short_secret_rejected() {
        let config = test_config("short");
        assert!(JwtService::from_config(&config).is_err());
    }
}
