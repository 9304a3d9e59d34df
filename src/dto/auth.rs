use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::{scalar, take},
    error::AppResult,
    models::User,
    validation::{FieldRules, Input, Rule, Validatable},
};

const EMAIL_UNIQUE: Rule = Rule::Unique {
    table: "users",
    column: "email",
};

#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "scalar")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub password_confirmation: Option<String>,
}

impl Validatable for RegisterRequest {
    fn rules() -> &'static [FieldRules] {
        const RULES: &[FieldRules] = &[
            FieldRules::new("name", &[Rule::Required]),
            FieldRules::new("email", &[Rule::Required, Rule::Email, EMAIL_UNIQUE]),
            FieldRules::new(
                "password",
                &[Rule::Required, Rule::MinLength(6), Rule::Confirmed],
            ),
        ];
        RULES
    }

    fn input(&self) -> Input<'_> {
        Input::new()
            .text("name", self.name.as_deref())
            .text("email", self.email.as_deref())
            .text("password", self.password.as_deref())
            .text("password_confirmation", self.password_confirmation.as_deref())
    }
}

#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "scalar")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub password: Option<String>,
}

impl Validatable for LoginRequest {
    fn rules() -> &'static [FieldRules] {
        const RULES: &[FieldRules] = &[
            FieldRules::new("email", &[Rule::Required, Rule::Email]),
            FieldRules::new("password", &[Rule::Required, Rule::MinLength(6)]),
        ];
        RULES
    }

    fn input(&self) -> Input<'_> {
        Input::new()
            .text("email", self.email.as_deref())
            .text("password", self.password.as_deref())
    }
}

/// Full overwrite of a user; every field is required again.
#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "scalar")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub password: Option<String>,
}

impl Validatable for UpdateUserRequest {
    fn rules() -> &'static [FieldRules] {
        const RULES: &[FieldRules] = &[
            FieldRules::new("name", &[Rule::Required]),
            FieldRules::new("email", &[Rule::Required, Rule::Email, EMAIL_UNIQUE]),
            FieldRules::new("password", &[Rule::Required, Rule::MinLength(6)]),
        ];
        RULES
    }

    fn input(&self) -> Input<'_> {
        Input::new()
            .text("name", self.name.as_deref())
            .text("email", self.email.as_deref())
            .text("password", self.password.as_deref())
    }
}

/// Validated user fields ready to persist. The password is still plaintext here.
pub struct UserFields {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn into_fields(self) -> AppResult<UserFields> {
        Ok(UserFields {
            name: take("name", self.name)?,
            email: take("email", self.email)?,
            // Passwords are kept verbatim; whitespace is significant.
            password: self.password.unwrap_or_default(),
        })
    }
}

impl UpdateUserRequest {
    pub fn into_fields(self) -> AppResult<UserFields> {
        Ok(UserFields {
            name: take("name", self.name)?,
            email: take("email", self.email)?,
            password: self.password.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserPayload {
    pub user: User,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserList {
    pub count: usize,
    pub users: Vec<User>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub user: User,
    /// Opaque bearer token; send it back as `Authorization: Bearer <token>`.
    pub token: String,
}

/// JWT claims. `jti` is the id of the backing `personal_access_tokens` row.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub jti: String,
    pub exp: usize,
}
