use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::{
    audit,
    dto::auth::{Claims, LoginRequest, LoginResponse, RegisterRequest, UserPayload},
    entity::{
        personal_access_tokens::{ActiveModel as TokenActive, Entity as Tokens},
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users, Model as UserModel},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::{ApiResponse, Empty},
    state::{AppState, AuthSettings},
    validation::validate_request,
};

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<UserPayload>> {
    validate_request(&payload, &state.orm, None).await?;
    let fields = payload.into_fields()?;

    let user = UserActive {
        id: NotSet,
        name: Set(fields.name),
        email: Set(fields.email),
        password_hash: Set(hash_password(&fields.password)?),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(user_id = user.id, "user registered");
    audit::record(
        &state.pool,
        Some(user.id),
        "user_register",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "User Created",
        UserPayload { user: user.into() },
    ))
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    validate_request(&payload, &state.orm, None).await?;
    let email = payload.email.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    let user = Users::find()
        .filter(UserCol::Email.eq(email.trim()))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("User Not Found"))?;

    if !verify_password(&password, &user.password_hash)? {
        tracing::info!(user_id = user.id, "login rejected");
        return Err(AppError::Forbidden("Invalid Credentials"));
    }

    let token = issue_token(state, &user).await?;

    audit::record(
        &state.pool,
        Some(user.id),
        "user_login",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "user login successfully",
        LoginResponse {
            user: user.into(),
            token,
        },
    ))
}

/// Revoke only the token that authenticated this request.
pub async fn logout_user(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Empty>> {
    Tokens::delete_by_id(user.token_id).exec(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "user_logout",
        "personal_access_tokens",
        serde_json::json!({ "token_id": user.token_id }),
    )
    .await;

    Ok(ApiResponse::message("Logout successfully"))
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(password_hash)
}

pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Persist a new token row for `user` and return the signed bearer token for it.
async fn issue_token(state: &AppState, user: &UserModel) -> AppResult<String> {
    let token_id = Uuid::new_v4();
    let expires_at = Utc::now()
        .checked_add_signed(Duration::hours(state.auth.token_ttl_hours))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    TokenActive {
        id: Set(token_id),
        user_id: Set(user.id),
        name: Set(user.name.clone()),
        last_used_at: Set(None),
        expires_at: Set(expires_at.into()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    encode_token(&state.auth, user.id, token_id, expires_at)
}

pub fn encode_token(
    settings: &AuthSettings,
    user_id: i64,
    token_id: Uuid,
    expires_at: DateTime<Utc>,
) -> AppResult<String> {
    let claims = Claims {
        sub: user_id.to_string(),
        jti: token_id.to_string(),
        exp: expires_at.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}
