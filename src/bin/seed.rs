use axum_storefront::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    middleware::auth::issue_token,
};
use rust_decimal::Decimal;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, 1).await?;
    // Ensure migrations are applied.
    run_migrations(&pool).await?;

    let users = [
        ensure_user(&pool, "admin", "admin@example.com", "admin").await?,
        ensure_user(&pool, "alice", "alice@example.com", "user").await?,
        ensure_user(&pool, "bob", "bob@example.com", "user").await?,
    ];
    seed_products(&pool).await?;

    for (username, id, role) in users {
        let token = issue_token(id, &role, &config.jwt_secret, chrono::Duration::days(7))
            .map_err(|e| anyhow::anyhow!(e.to_string()))?;
        println!("{username} ({role}) {id}\n  Authorization: Bearer {token}");
    }

    println!("Seed completed");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    username: &str,
    email: &str,
    role: &str,
) -> anyhow::Result<(String, Uuid, String)> {
    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, username, email, role)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (username) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(username)
    .bind(email)
    .bind(role)
    .fetch_one(pool)
    .await?;

    println!("Ensured user {username} (role={role})");
    Ok((username.to_string(), id, role.to_string()))
}

async fn seed_products(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let products = [
        ("Dagger", "Small, quick and easy to hide", Decimal::new(500, 2), 12, "weapon"),
        ("Greatsword", "Two hands, one swing", Decimal::new(5000, 2), 3, "weapon"),
        ("Big Sword", "Very big sword, very good for slashing", Decimal::new(250, 2), 3, "weapon"),
        ("Shield of Assertions", "Blocks most things", Decimal::new(2000, 2), 2, "armour"),
        ("Healing Potion", "Tastes of cherries", Decimal::new(150, 2), 40, "consumable"),
        ("Ring of Testing", "Slightly glows near bugs", Decimal::new(7500, 2), 1, "accessory"),
    ];

    for (name, desc, price, stock, category) in products {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price, stock_quantity, category, status)
            VALUES ($1, $2, $3, $4, $5, $6, 'listed')
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(desc)
        .bind(price)
        .bind(stock)
        .bind(category)
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}
