use shopfront_api::{
    config::AppConfig,
    db::create_pool,
    services::auth_service::hash_password,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let user_id = ensure_user(&pool, "Demo User", "demo@example.com", "demo123").await?;
    seed_products(&pool).await?;
    seed_orders(&pool).await?;

    println!("Seed completed. Demo user ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<i64> {
    let password_hash =
        hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let (user_id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO users (name, email, password_hash)
        VALUES ($1, $2, $3)
        ON CONFLICT (email) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    println!("Ensured user {email}");
    Ok(user_id)
}

async fn seed_products(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let products = vec![
        ("Axum Hoodie", "Warm hoodie for Rustaceans", "55.00", "hoodie.png", "1", 50),
        ("Ferris Mug", "Coffee tastes better with Ferris", "12.00", "mug.png", "2", 100),
        ("Rust Sticker Pack", "Decorate your laptop", "5.00", "stickers.png", "2", 200),
        ("E-book: Async Rust", "Learn async Rust patterns", "25.00", "ebook.png", "3", 75),
    ];

    for (name, desc, price, image, kind, quantity) in products {
        sqlx::query(
            r#"
            INSERT INTO products (name, description, price, image, type, quantity)
            VALUES ($1, $2, $3::numeric, $4, $5, $6)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(name)
        .bind(desc)
        .bind(price)
        .bind(image)
        .bind(kind)
        .bind(quantity)
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}

async fn seed_orders(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let (existing,): (i64,) = sqlx::query_as("SELECT count(*) FROM orders")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        println!("Orders already present, skipping");
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO orders (client_name, total_price, payment_mode)
        VALUES ($1, $2::numeric, $3)
        "#,
    )
    .bind("Demo User")
    .bind("67.00")
    .bind("cash")
    .execute(pool)
    .await?;

    println!("Seeded orders");
    Ok(())
}
