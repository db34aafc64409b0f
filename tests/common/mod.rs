use axum_storefront::{
    db::{create_orm_conn, create_pool, run_migrations},
    entity::{
        products::{ActiveModel as ProductActive, Model as ProductModel},
        sea_orm_active_enums::{ProductCategory, ProductStatus},
        users::ActiveModel as UserActive,
    },
    middleware::auth::AuthUser,
    state::AppState,
};
use rust_decimal::Decimal;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, Set};
use uuid::Uuid;

/// Connects to the test database, or returns `None` so the caller can skip.
pub async fn setup_state() -> anyhow::Result<Option<AppState>> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run storefront flow tests."
            );
            return Ok(None);
        }
    };

    let pool = create_pool(&database_url, 5).await?;
    run_migrations(&pool).await?;

    Ok(Some(AppState {
        orm: create_orm_conn(pool),
        jwt_secret: "test-secret".into(),
    }))
}

// Names carry a random suffix so tests sharing a database never collide.
pub async fn create_user(state: &AppState, role: &str) -> anyhow::Result<AuthUser> {
    let suffix = Uuid::new_v4().simple().to_string();
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        username: Set(format!("{role}-{suffix}")),
        email: Set(format!("{suffix}@example.com")),
        role: Set(role.to_string()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(AuthUser {
        user_id: user.id,
        role: user.role,
    })
}

pub async fn create_product(
    state: &AppState,
    name: &str,
    price: Decimal,
) -> anyhow::Result<ProductModel> {
    let product = ProductActive {
        id: Set(Uuid::new_v4()),
        name: Set(format!("{name} {}", Uuid::new_v4().simple())),
        description: Set(Some(format!("A {name} for testing"))),
        price: Set(price),
        stock_quantity: Set(5),
        category: Set(ProductCategory::Weapon),
        status: Set(ProductStatus::Listed),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(product)
}
