//! 认证能力：登录、JWT 生成与校验。

mod jwt;
mod password;

use async_trait::async_trait;
use domain::UserIdentity;
use oms_storage::{UserRecord, UserStore};
use std::sync::Arc;

pub use jwt::JwtManager;
pub use password::{hash_password, verify_password};

/// 认证相关错误。
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("token expired")]
    TokenExpired,
    #[error("token invalid")]
    TokenInvalid,
    #[error("internal error: {0}")]
    Internal(String),
}

/// 登录/刷新返回的 token 结构。
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub refresh_jti: String,
    pub expires_at: u64,
}

/// 认证服务实现（基于 UserStore + JWT）。
pub struct AuthService {
    user_store: Arc<dyn UserStore>,
    jwt: JwtManager,
}

impl AuthService {
    /// 创建认证服务实例。
    pub fn new(user_store: Arc<dyn UserStore>, jwt: JwtManager) -> Self {
        Self { user_store, jwt }
    }

    /// 登录校验并签发 token。
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(UserRecord, AuthTokens), AuthError> {
        let user = self
            .user_store
            .find_by_username(username)
            .await
            .map_err(|err| AuthError::Internal(err.to_string()))?
            .ok_or(AuthError::InvalidCredentials)?;
        if !verify_password(&user.password_hash, password)? {
            return Err(AuthError::InvalidCredentials);
        }
        let identity = user.to_identity();
        let tokens = self.jwt.issue_tokens(&identity)?;
        let updated = self
            .user_store
            .set_refresh_jti(&user.user_id, Some(&tokens.refresh_jti))
            .await
            .map_err(|err| AuthError::Internal(err.to_string()))?;
        if !updated {
            return Err(AuthError::Internal(
                "refresh token binding update failed".to_string(),
            ));
        }
        Ok((user, tokens))
    }

    /// 校验 access token 并提取 UserIdentity。
    pub fn verify_access_token(&self, token: &str) -> Result<UserIdentity, AuthError> {
        self.jwt.decode_access(token)
    }

    /// 使用 refresh token 换取新 token（jti 轮换）。
    pub async fn refresh(&self, token: &str) -> Result<AuthTokens, AuthError> {
        let (identity, jti) = self.jwt.decode_refresh_with_jti(token)?;
        let stored = self
            .user_store
            .get_refresh_jti(&identity.user_id)
            .await
            .map_err(|err| AuthError::Internal(err.to_string()))?;
        if stored.as_deref() != Some(jti.as_str()) {
            return Err(AuthError::TokenInvalid);
        }

        let tokens = self.jwt.issue_tokens(&identity)?;
        let updated = self
            .user_store
            .set_refresh_jti(&identity.user_id, Some(&tokens.refresh_jti))
            .await
            .map_err(|err| AuthError::Internal(err.to_string()))?;
        if !updated {
            return Err(AuthError::Internal(
                "refresh token rotation update failed".to_string(),
            ));
        }
        Ok(tokens)
    }
}

/// 认证能力 trait，便于替换实现与测试。
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(UserRecord, AuthTokens), AuthError>;

    fn verify_access_token(&self, token: &str) -> Result<UserIdentity, AuthError>;

    async fn refresh(&self, token: &str) -> Result<AuthTokens, AuthError>;
}

#[async_trait]
impl Authenticator for AuthService {
    async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(UserRecord, AuthTokens), AuthError> {
        AuthService::login(self, username, password).await
    }

    fn verify_access_token(&self, token: &str) -> Result<UserIdentity, AuthError> {
        AuthService::verify_access_token(self, token)
    }

    async fn refresh(&self, token: &str) -> Result<AuthTokens, AuthError> {
        AuthService::refresh(self, token).await
    }
}
