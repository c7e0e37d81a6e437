//! 认证服务：凭证校验、登录、令牌签发与身份解析
//!
//! 无状态：除了不可变的签名配置和外部用户存储之外不持有任何共享状态，
//! 每个请求独立解析身份。所有失败立即终止，不重试，并且失败原因不对
//! 调用方区分，存储故障一律按"未找到"处理（fail closed）。

use crate::{
    auth::jwt::JwtService,
    auth::password::PasswordHasher,
    error::AppError,
    models::{auth::*, user::User},
    repository::{UserRepository, UserStore},
};
use std::sync::Arc;

pub struct AuthService<S = UserRepository> {
    store: S,
    jwt: Arc<JwtService>,
}

impl<S: UserStore> AuthService<S> {
    pub fn new(store: S, jwt: Arc<JwtService>) -> Self {
        Self { store, jwt }
    }

    /// 用户名/密码认证
    ///
    /// 空用户名或空密码在任何存储查询之前就被拒绝。用户不存在与密码
    /// 错误返回同一个错误，不暴露账户是否存在。
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AppError> {
        if username.is_empty() || password.is_empty() {
            return Err(AppError::InvalidCredentials);
        }

        let user = match self.store.find_by_username(username).await {
            Ok(Some(user)) => user,
            Ok(None) => return Err(AppError::InvalidCredentials),
            Err(e) => {
                // 存储故障按认证失败处理，只记录故障类别
                tracing::warn!(error = %e, "User lookup failed during authentication");
                return Err(AppError::InvalidCredentials);
            }
        };

        let hasher = PasswordHasher::new();
        if !hasher.verify(password, &user.password_hash) {
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }

    /// 登录：认证成功后为该用户名签发令牌
    pub async fn login(&self, req: LoginRequest) -> Result<TokenResponse, AppError> {
        let user = self.authenticate(&req.username, &req.password).await?;

        // 签发失败必须向上传播，绝不返回未签名的令牌
        let access_token = self.jwt.issue(&user.username)?;

        Ok(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: self.jwt.expires_in_secs(),
        })
    }

    /// 令牌校验与身份解析
    ///
    /// 令牌层面的检查（长度、签名、subject、过期）在 JwtService 中完成，
    /// 之后将 subject 解析为用户记录。记录不存在或存储故障与令牌无效
    /// 返回完全相同的错误。is_active 检查由请求层单独叠加。
    pub async fn verify_token(&self, token: &str) -> Result<User, AppError> {
        let claims = self.jwt.validate_token(token)?;

        match self.store.find_by_username(&claims.sub).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => {
                tracing::debug!("Token subject not found");
                Err(AppError::Unauthorized)
            }
            Err(e) => {
                tracing::warn!(error = %e, "User lookup failed during token verification");
                Err(AppError::Unauthorized)
            }
        }
    }
}
