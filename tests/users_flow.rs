mod common;

use sea_orm::{EntityTrait, PaginatorTrait};
use shopfront_api::{
    dto::auth::{LoginRequest, RegisterRequest, UpdateUserRequest},
    entity::{AuditLogs, PersonalAccessTokens, Users},
    error::AppError,
    middleware::auth::{AuthUser, decode_token},
    services::{auth_service, user_service},
};

fn s(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn register_payload(email: &str) -> RegisterRequest {
    RegisterRequest {
        name: s("Ada"),
        email: s(email),
        password: s("secret1"),
        password_confirmation: s("secret1"),
    }
}

fn login_payload(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: s(email),
        password: s(password),
    }
}

// Users: register -> duplicate -> login x2 -> logout one token -> update -> delete.
#[tokio::test]
async fn user_registration_login_and_token_revocation_flow() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&database_url).await?;

    let created = auth_service::register_user(&state, register_payload("ada@example.com")).await?;
    let user_id = created.data.user.id;
    let body = serde_json::to_value(&created)?;
    assert_eq!(body["message"], "User Created");
    assert!(body["user"].get("password_hash").is_none());
    assert!(body["user"].get("password").is_none());

    // Duplicate email: field error and no new row.
    match auth_service::register_user(&state, register_payload("ada@example.com")).await {
        Err(AppError::Validation(errors)) => {
            assert_eq!(errors.get("email").unwrap(), ["The email has already been taken."]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(Users::find().count(&state.orm).await?, 1);

    // Unknown email and wrong password issue nothing.
    assert!(matches!(
        auth_service::login_user(&state, login_payload("nobody@example.com", "secret1")).await,
        Err(AppError::NotFound("User Not Found"))
    ));
    assert!(matches!(
        auth_service::login_user(&state, login_payload("ada@example.com", "wrong-pass")).await,
        Err(AppError::Forbidden("Invalid Credentials"))
    ));
    assert_eq!(PersonalAccessTokens::find().count(&state.orm).await?, 0);

    // Two logins, two distinct tokens.
    let first =
        auth_service::login_user(&state, login_payload("ada@example.com", "secret1")).await?;
    assert_eq!(first.message, "user login successfully");
    let second =
        auth_service::login_user(&state, login_payload("ada@example.com", "secret1")).await?;
    assert_ne!(first.data.token, second.data.token);
    assert_eq!(PersonalAccessTokens::find().count(&state.orm).await?, 2);

    // Logout revokes only the presented token.
    let (token_user, token_id) = decode_token(&state.auth, &first.data.token)?;
    assert_eq!(token_user, user_id);
    let logged_out = auth_service::logout_user(&state, &AuthUser { user_id, token_id }).await?;
    assert_eq!(logged_out.message, "Logout successfully");
    assert!(PersonalAccessTokens::find_by_id(token_id).one(&state.orm).await?.is_none());
    let (_, second_id) = decode_token(&state.auth, &second.data.token)?;
    assert!(PersonalAccessTokens::find_by_id(second_id).one(&state.orm).await?.is_some());

    // Update is a full overwrite; an omitted password is invalid.
    let partial = UpdateUserRequest {
        name: s("Ada L."),
        email: s("ada@example.com"),
        password: None,
    };
    assert!(matches!(
        user_service::update_user(&state, user_id, partial).await,
        Err(AppError::Validation(_))
    ));
    let full = UpdateUserRequest {
        name: s("Ada L."),
        email: s("ada@example.com"),
        password: s("another1"),
    };
    let updated = user_service::update_user(&state, user_id, full).await?;
    assert_eq!(updated.data.user.name, "Ada L.");
    auth_service::login_user(&state, login_payload("ada@example.com", "another1")).await?;

    assert_eq!(
        user_service::get_user(&state, user_id).await?.data.user.email,
        "ada@example.com"
    );
    assert!(matches!(
        user_service::get_user(&state, 999).await,
        Err(AppError::NotFound("User Not Found"))
    ));

    let listed = user_service::list_users(&state).await?;
    assert_eq!(listed.data.count, 1);

    assert!(matches!(
        user_service::delete_user(&state, 999).await,
        Err(AppError::NotFound("User Not Found"))
    ));
    user_service::delete_user(&state, user_id).await?;
    assert_eq!(Users::find().count(&state.orm).await?, 0);
    assert_eq!(PersonalAccessTokens::find().count(&state.orm).await?, 0);

    assert!(AuditLogs::find().count(&state.orm).await? > 0);
    Ok(())
}

