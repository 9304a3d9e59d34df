//! Request body extraction shared by every JSON-style endpoint.
//!
//! Clients send the same fields as JSON, as `application/x-www-form-urlencoded`
//! or as `multipart/form-data`. All three are flattened into one JSON object
//! and deserialized into the request type, so validation sees a single shape.

use axum::{
    body::Bytes,
    extract::{Form, FromRequest, Multipart, Request},
    http::header,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{error::AppError, validation::ValidationErrors};

/// A request body accepted as JSON, urlencoded form or multipart text fields.
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let fields = if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
            pairs
                .into_iter()
                .map(|(name, value)| (name, Value::String(value)))
                .collect::<Map<String, Value>>()
        } else if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
            multipart_fields(multipart).await?
        } else {
            // Anything else is read as JSON; an empty body is an empty object.
            let bytes = Bytes::from_request(req, state)
                .await
                .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
            json_fields(&bytes)?
        };

        decode(fields).map(Payload)
    }
}

async fn multipart_fields(mut multipart: Multipart) -> Result<Map<String, Value>, AppError> {
    let mut fields = Map::new();
    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            field.bytes().await?;
            continue;
        };
        // Only text parts carry values here; uploads have their own endpoints.
        if field.file_name().is_some() {
            field.bytes().await?;
            continue;
        }
        fields.insert(name, Value::String(field.text().await?));
    }
    Ok(fields)
}

fn json_fields(bytes: &[u8]) -> Result<Map<String, Value>, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Err(AppError::BadRequest(
            "The request body must be a JSON object.".into(),
        )),
        Err(err) => Err(AppError::BadRequest(format!("Malformed JSON body: {err}"))),
    }
}

/// Deserialize the flattened fields, reporting fields of the wrong shape as 422s.
fn decode<T: DeserializeOwned>(fields: Map<String, Value>) -> Result<T, AppError> {
    let errors = shape_errors::<T>(&fields);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }
    serde_json::from_value(Value::Object(fields))
        .map_err(|err| AppError::BadRequest(err.to_string()))
}

// A field is mistyped when it alone is enough to make `T` fail; unknown keys never are.
fn shape_errors<T: DeserializeOwned>(fields: &Map<String, Value>) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    for (name, value) in fields
        .iter()
        .filter(|(_, value)| value.is_array() || value.is_object())
    {
        let single = Map::from_iter([(name.clone(), value.clone())]);
        if serde_json::from_value::<T>(Value::Object(single)).is_err() {
            errors.add(
                name,
                format!("The {} must be a string or a number.", name.replace('_', " ")),
            );
        }
    }
    errors
}
