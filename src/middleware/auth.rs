use axum::{extract::FromRequestParts, http::header};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, Validation, decode};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::{
    dto::auth::Claims,
    entity::personal_access_tokens::{
        ActiveModel as TokenActive, Column as TokenCol, Entity as Tokens,
    },
    error::AppError,
    state::{AppState, AuthSettings},
};

/// The caller behind a valid, unrevoked bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    /// Row id of the token used for this request; logout revokes exactly this one.
    pub token_id: Uuid,
}

/// Extract the token from `Authorization: Bearer <token>`.
pub fn bearer_token(value: &str) -> Option<&str> {
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

/// Check signature and expiry, returning `(user_id, token_id)`.
pub fn decode_token(settings: &AuthSettings, token: &str) -> Result<(i64, Uuid), AppError> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized)?;

    let user_id = decoded
        .claims
        .sub
        .parse::<i64>()
        .map_err(|_| AppError::Unauthorized)?;
    let token_id = Uuid::parse_str(&decoded.claims.jti).map_err(|_| AppError::Unauthorized)?;
    Ok((user_id, token_id))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or(AppError::Unauthorized)?;

        let (user_id, token_id) = decode_token(&state.auth, token)?;

        // A verified signature is not enough: the token row must still exist.
        let row = Tokens::find_by_id(token_id)
            .filter(TokenCol::UserId.eq(user_id))
            .one(&state.orm)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if row.expires_at.with_timezone(&Utc) <= Utc::now() {
            return Err(AppError::Unauthorized);
        }

        let mut active: TokenActive = row.into();
        active.last_used_at = Set(Some(Utc::now().into()));
        if let Err(err) = active.update(&state.orm).await {
            tracing::warn!(error = %err, token_id = %token_id, "failed to stamp token usage");
        }

        Ok(AuthUser { user_id, token_id })
    }
}
