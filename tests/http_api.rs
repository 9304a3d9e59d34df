mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use shopfront_api::routes::create_app;
use tower::ServiceExt;

async fn send(app: &Router, request: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, body))
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn category_upload(name: &str) -> Request<Body> {
    let boundary = "shopfront-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\n{name}\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"logo.png\"\r\nContent-Type: image/png\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"\x89PNG fake image");
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/api/category/store")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

// HTTP surface: status codes and JSON shapes through the full router.
#[tokio::test]
async fn http_routes_follow_response_contract() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&database_url).await?;
    let upload_dir = state.images.root().to_path_buf();
    let app = create_app(state);

    // Product store and search.
    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/product/store",
            json!({
                "name": "Widget",
                "description": "d",
                "price": "9.99",
                "image": "x.png",
                "type": "1",
                "quantity": "5"
            }),
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Product created successfully");
    assert!(body["product"]["id"].as_i64().is_some());
    assert_eq!(body["product"]["type"], "1");

    let search = empty_request(Method::GET, "/api/product/search/Widg", None);
    let (status, body) = send(&app, search).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"][0]["name"], "Widget");

    // Validation failures carry only field errors.
    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/product/store", json!({ "name": "Widget" })),
    )
    .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.get("message").is_none());
    assert_eq!(body["errors"]["name"][0], "The name has already been taken.");
    assert_eq!(body["errors"]["quantity"][0], "The quantity field is required.");

    // Form-encoded bodies are accepted the same as JSON.
    let form = Request::builder()
        .method(Method::POST)
        .uri("/api/product/store")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(
            "name=Gizmo&description=d&price=9.99&image=x.png&type=1&quantity=5",
        ))
        .unwrap();
    let (status, body) = send(&app, form).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["product"]["name"], "Gizmo");

    // Fields of the wrong JSON shape and out-of-range money are field errors.
    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/orders/store",
            json!({ "client_name": "Ada", "total_price": [1], "payment_mode": "cash" }),
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["errors"]["total_price"][0],
        "The total price must be a string or a number."
    );

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/orders/store",
            json!({ "client_name": "Ada", "total_price": "10000000000", "payment_mode": "cash" }),
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["total_price"].is_array());

    // Missing resources.
    let missing = empty_request(Method::DELETE, "/api/category/delete/999", None);
    let (status, body) = send(&app, missing).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Category Not Found" }));

    let (status, _) = send(&app, empty_request(Method::GET, "/api/nowhere", None)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Multipart category upload.
    let (status, body) = send(&app, category_upload("Gadgets")).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["category"]["name"], "Gadgets");
    let image = body["category"]["image"].as_str().unwrap_or_default().to_string();
    assert!(image.ends_with(".png"));

    let served = app
        .clone()
        .oneshot(empty_request(Method::GET, &format!("/category-images/{image}"), None))
        .await?;
    assert_eq!(served.status(), StatusCode::OK);
    let bytes = to_bytes(served.into_body(), usize::MAX).await?;
    assert_eq!(&bytes[..], b"\x89PNG fake image");

    // Bearer tokens: register, login, use, revoke.
    let (status, _) = send(
        &app,
        json_request(
            Method::POST,
            "/api/tokens/register",
            json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": "secret1",
                "password_confirmation": "secret1"
            }),
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/tokens/login",
            json!({ "email": "ada@example.com", "password": "secret1" }),
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap_or_default().to_string();
    assert!(!token.is_empty());
    assert!(body["user"].get("password_hash").is_none());

    let (status, body) = send(&app, empty_request(Method::GET, "/api/user", Some(&token))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "ada@example.com");

    let logout = empty_request(Method::POST, "/api/tokens/logout", Some(&token));
    let (status, body) = send(&app, logout).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logout successfully");

    let (status, body) = send(&app, empty_request(Method::GET, "/api/user", Some(&token))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthenticated.");

    let (status, _) = send(&app, empty_request(Method::POST, "/api/tokens/logout", None)).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    tokio::fs::remove_dir_all(upload_dir).await.ok();
    Ok(())
}
