use std::future::Future;

use axum::body::Bytes;
use shopfront_api::{
    dto::{
        auth::{LoginRequest, RegisterRequest, UpdateUserRequest},
        categories::CategoryForm,
        orders::OrderRequest,
        products::ProductRequest,
    },
    error::{AppError, AppResult},
    storage::UploadedFile,
    validation::{UniqueLookup, Validatable, ValidationErrors, validate_request},
};

/// Rows already "stored": (table, column, value, id).
struct Taken(Vec<(&'static str, &'static str, &'static str, i64)>);

impl UniqueLookup for Taken {
    fn is_taken(
        &self,
        table: &'static str,
        column: &'static str,
        value: &str,
        ignore_id: Option<i64>,
    ) -> impl Future<Output = AppResult<bool>> + Send {
        let taken = self.0.iter().any(|(t, c, v, id)| {
            *t == table && *c == column && *v == value && Some(*id) != ignore_id
        });
        async move { Ok(taken) }
    }
}

fn nothing_taken() -> Taken {
    Taken(Vec::new())
}

async fn errors_of<T: Validatable>(
    payload: &T,
    lookup: &Taken,
    ignore: Option<i64>,
) -> ValidationErrors {
    match validate_request(payload, lookup, ignore).await {
        Err(AppError::Validation(errors)) => errors,
        Err(other) => panic!("unexpected error: {other:?}"),
        Ok(()) => panic!("expected validation to fail"),
    }
}

fn s(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn widget() -> ProductRequest {
    ProductRequest {
        name: s("Widget"),
        description: s("d"),
        price: s("9.99"),
        image: s("x.png"),
        kind: s("1"),
        quantity: s("5"),
    }
}

fn png(name: &str, size: usize) -> UploadedFile {
    UploadedFile {
        file_name: Some(name.to_string()),
        content_type: Some("image/png".to_string()),
        bytes: Bytes::from(vec![0x89; size]),
    }
}

#[tokio::test]
async fn empty_registration_reports_each_required_field_once() {
    let errors = errors_of(&RegisterRequest::default(), &nothing_taken(), None).await;

    assert_eq!(errors.get("name").unwrap(), ["The name field is required."]);
    assert_eq!(errors.get("email").unwrap(), ["The email field is required."]);
    assert_eq!(errors.get("password").unwrap(), ["The password field is required."]);
    assert_eq!(errors.fields().count(), 3);
}

#[tokio::test]
async fn duplicate_email_is_rejected_on_register() {
    let lookup = Taken(vec![("users", "email", "taken@example.com", 1)]);
    let payload = RegisterRequest {
        name: s("Someone"),
        email: s("taken@example.com"),
        password: s("secret1"),
        password_confirmation: s("secret1"),
    };

    let errors = errors_of(&payload, &lookup, None).await;
    assert_eq!(errors.get("email").unwrap(), ["The email has already been taken."]);
    assert!(errors.get("password").is_none());
}

#[tokio::test]
async fn password_must_be_long_enough_and_confirmed() {
    let payload = RegisterRequest {
        name: s("Someone"),
        email: s("someone@example.com"),
        password: s("abc"),
        password_confirmation: s("abd"),
    };

    let errors = errors_of(&payload, &nothing_taken(), None).await;
    assert_eq!(
        errors.get("password").unwrap(),
        [
            "The password must be at least 6 characters.",
            "The password confirmation does not match.",
        ]
    );
}

#[tokio::test]
async fn malformed_email_is_rejected_on_login() {
    let payload = LoginRequest {
        email: s("not-an-email"),
        password: s("secret1"),
    };

    let errors = errors_of(&payload, &nothing_taken(), None).await;
    assert_eq!(
        errors.get("email").unwrap(),
        ["The email must be a valid email address."]
    );
}

#[tokio::test]
async fn user_update_may_keep_its_own_email() {
    let lookup = Taken(vec![("users", "email", "me@example.com", 7)]);
    let payload = UpdateUserRequest {
        name: s("Me"),
        email: s("me@example.com"),
        password: s("secret1"),
    };

    assert!(validate_request(&payload, &lookup, Some(7)).await.is_ok());
    let errors = errors_of(&payload, &lookup, Some(8)).await;
    assert_eq!(errors.get("email").unwrap(), ["The email has already been taken."]);
}

#[tokio::test]
async fn user_update_treats_omitted_password_as_invalid() {
    let payload = UpdateUserRequest {
        name: s("Me"),
        email: s("me@example.com"),
        password: None,
    };

    let errors = errors_of(&payload, &nothing_taken(), Some(1)).await;
    assert_eq!(errors.get("password").unwrap(), ["The password field is required."]);
}

#[tokio::test]
async fn product_example_payload_passes() {
    assert!(validate_request(&widget(), &nothing_taken(), None).await.is_ok());
}

#[tokio::test]
async fn product_name_uniqueness_is_checked_against_products() {
    let category_named_widget = Taken(vec![("categories", "name", "Widget", 1)]);
    assert!(validate_request(&widget(), &category_named_widget, None).await.is_ok());

    let product_named_widget = Taken(vec![("products", "name", "Widget", 1)]);
    let errors = errors_of(&widget(), &product_named_widget, None).await;
    assert_eq!(errors.get("name").unwrap(), ["The name has already been taken."]);
}

#[tokio::test]
async fn product_quantity_and_price_must_be_numeric() {
    let mut payload = widget();
    payload.quantity = s("0");
    payload.price = s("cheap");
    let errors = errors_of(&payload, &nothing_taken(), None).await;
    assert_eq!(errors.get("quantity").unwrap(), ["The quantity must be at least 1."]);
    assert_eq!(errors.get("price").unwrap(), ["The price must be a number."]);

    let mut payload = widget();
    payload.quantity = s("2.5");
    let errors = errors_of(&payload, &nothing_taken(), None).await;
    assert_eq!(errors.get("quantity").unwrap(), ["The quantity must be an integer."]);
}

#[tokio::test]
async fn money_must_fit_two_decimal_places_below_ten_billion() {
    let mut payload = widget();
    payload.price = s("10000000000");
    let errors = errors_of(&payload, &nothing_taken(), None).await;
    assert_eq!(
        errors.get("price").unwrap(),
        ["The price must not be greater than 9999999999."]
    );

    let mut payload = widget();
    payload.price = s("9.999");
    let errors = errors_of(&payload, &nothing_taken(), None).await;
    assert_eq!(
        errors.get("price").unwrap(),
        ["The price must not have more than 2 decimal places."]
    );

    // Trailing zeros do not count as extra precision.
    let mut payload = widget();
    payload.price = s("9.990");
    assert!(validate_request(&payload, &nothing_taken(), None).await.is_ok());

    let order = OrderRequest {
        client_name: s("Ada"),
        total_price: s("12345678901.5"),
        payment_mode: s("cash"),
    };
    let errors = errors_of(&order, &nothing_taken(), None).await;
    assert_eq!(
        errors.get("total_price").unwrap(),
        ["The total price must not be greater than 9999999999."]
    );
}

#[tokio::test]
async fn quantity_must_fit_the_stock_column() {
    let mut payload = widget();
    payload.quantity = s("3000000000");
    let errors = errors_of(&payload, &nothing_taken(), None).await;
    assert_eq!(
        errors.get("quantity").unwrap(),
        ["The quantity must not be greater than 2147483647."]
    );
}

#[tokio::test]
async fn blank_strings_count_as_missing() {
    let mut payload = widget();
    payload.description = s("   ");
    let errors = errors_of(&payload, &nothing_taken(), None).await;
    assert_eq!(
        errors.get("description").unwrap(),
        ["The description field is required."]
    );
}

#[tokio::test]
async fn order_fields_are_required_and_total_is_numeric() {
    let errors = errors_of(&OrderRequest::default(), &nothing_taken(), None).await;
    assert_eq!(
        errors.get("client_name").unwrap(),
        ["The client name field is required."]
    );
    assert_eq!(errors.fields().count(), 3);

    let payload = OrderRequest {
        client_name: s("Ada"),
        total_price: s("-1"),
        payment_mode: s("cash"),
    };
    let errors = errors_of(&payload, &nothing_taken(), None).await;
    assert_eq!(errors.get("total_price").unwrap(), ["The total price must be at least 0."]);
}

#[tokio::test]
async fn category_image_must_be_an_allowed_image_within_size() {
    let ok = CategoryForm {
        name: s("Shoes"),
        image: Some(png("shoes.png", 1024)),
    };
    assert!(validate_request(&ok, &nothing_taken(), None).await.is_ok());

    let bmp = CategoryForm {
        name: s("Shoes"),
        image: Some(UploadedFile {
            file_name: Some("shoes.bmp".into()),
            content_type: Some("image/bmp".into()),
            bytes: Bytes::from_static(b"BM"),
        }),
    };
    let errors = errors_of(&bmp, &nothing_taken(), None).await;
    assert_eq!(errors.get("image").unwrap(), ["The image format is not valid."]);

    let huge = CategoryForm {
        name: s("Shoes"),
        image: Some(png("shoes.png", 2048 * 1024 + 1)),
    };
    let errors = errors_of(&huge, &nothing_taken(), None).await;
    assert_eq!(
        errors.get("image").unwrap(),
        ["The image must not be greater than 2048 kilobytes."]
    );

    let text = CategoryForm {
        name: s("Shoes"),
        image: Some(UploadedFile {
            file_name: Some("notes.png".into()),
            content_type: Some("text/plain".into()),
            bytes: Bytes::from_static(b"hello"),
        }),
    };
    let errors = errors_of(&text, &nothing_taken(), None).await;
    assert_eq!(errors.get("image").unwrap(), ["The image must be an image."]);
}

#[tokio::test]
async fn category_requires_an_image_and_a_unique_name() {
    let lookup = Taken(vec![("categories", "name", "Shoes", 3)]);
    let form = CategoryForm {
        name: s("Shoes"),
        image: None,
    };

    let errors = errors_of(&form, &lookup, None).await;
    assert_eq!(errors.get("name").unwrap(), ["The name has already been taken."]);
    assert_eq!(errors.get("image").unwrap(), ["The image field is required."]);

    let errors = errors_of(&form, &lookup, Some(3)).await;
    assert!(errors.get("name").is_none());
}

#[tokio::test]
async fn validation_errors_render_as_field_message_map() {
    let errors = errors_of(&OrderRequest::default(), &nothing_taken(), None).await;
    let body = serde_json::to_value(&errors).expect("serialize errors");
    assert_eq!(
        body["payment_mode"],
        serde_json::json!(["The payment mode field is required."])
    );
}

#[test]
fn numbers_are_accepted_where_text_is_expected() {
    let payload: ProductRequest = serde_json::from_value(serde_json::json!({
        "name": "Widget",
        "description": "d",
        "price": 9.99,
        "image": "x.png",
        "type": 1,
        "quantity": 5
    }))
    .expect("deserialize product");

    assert_eq!(payload.price.as_deref(), Some("9.99"));
    assert_eq!(payload.kind.as_deref(), Some("1"));
    assert_eq!(payload.quantity.as_deref(), Some("5"));
}
