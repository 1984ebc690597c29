pub mod product;
pub mod user;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use chrono::Utc;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Schema, Set,
    TransactionTrait,
};
use std::sync::Arc;

use crate::entities::{product::Entity as Product, user::Entity as User};

pub async fn setup_schema(db: &DatabaseConnection) {
    let schema = Schema::new(db.get_database_backend());
    let mut create_user_table = schema.create_table_from_entity(User);
    let mut create_product_table = schema.create_table_from_entity(Product);

    db.execute(db.get_database_backend().build(create_user_table.if_not_exists()))
        .await
        .expect("Failed to create user schema");
    db.execute(db.get_database_backend().build(create_product_table.if_not_exists()))
        .await
        .expect("Failed to create product schema");
}

/// Seeds the default accounts and a demo catalog. Safe to call on every
/// boot: an already populated table is left alone.
pub async fn primary_setup(db: Arc<DatabaseConnection>) {
    seed_users(&db).await;
    seed_products(&db).await;
}

async fn seed_users(db: &DatabaseConnection) {
    let existing = User::find()
        .count(db)
        .await
        .expect("Failed to inspect users table during setup");
    if existing > 0 {
        return;
    }

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(seed_password().as_bytes(), &salt)
        .expect("Failed to hash password")
        .to_string();

    let new_admin = user::ActiveModel {
        username: Set("admin".to_owned()),
        password: Set(password_hash.clone()),
        role: Set(user::Role::Admin),
        ..Default::default()
    };

    let new_user = user::ActiveModel {
        username: Set("user".to_owned()),
        password: Set(password_hash),
        role: Set(user::Role::User),
        ..Default::default()
    };

    let txn = db.begin().await.expect("Failed to open setup transaction");
    user::Entity::insert_many([new_user, new_admin])
        .exec(&txn)
        .await
        .expect("Failed to seed default users");
    txn.commit().await.expect("Failed to commit seeded users");
}

async fn seed_products(db: &DatabaseConnection) {
    let existing = Product::find()
        .count(db)
        .await
        .expect("Failed to inspect products table during setup");
    if existing > 0 {
        return;
    }

    let demo = [
        (
            "Embroidered Lawn 3pc",
            "Lawn shirt with chiffon dupatta, summer collection",
            4500.0,
            product::Brand::Nishat,
            vec!["https://images.example.com/nishat-lawn-1.jpg".to_string()],
        ),
        (
            "Kurta Classic Blue",
            "Stitched cotton kurta, regular fit",
            2800.0,
            product::Brand::JunaidJamshaid,
            vec![
                "https://images.example.com/jj-kurta-1.jpg".to_string(),
                "https://images.example.com/jj-kurta-2.jpg".to_string(),
            ],
        ),
        (
            "Printed Summer Dress",
            "",
            1950.0,
            product::Brand::Beechtree,
            vec!["https://images.example.com/bt-dress-1.jpg".to_string()],
        ),
    ];

    let rows = demo.into_iter().map(|(title, specs, price, brand, images)| {
        product::ActiveModel {
            title: Set(title.to_owned()),
            specs: Set(specs.to_owned()),
            price: Set(price),
            brand: Set(brand),
            images: Set(serde_json::to_string(&images).expect("Failed to encode image list")),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
    });

    let txn = db.begin().await.expect("Failed to open setup transaction");
    product::Entity::insert_many(rows)
        .exec(&txn)
        .await
        .expect("Failed to seed demo catalog");
    txn.commit().await.expect("Failed to commit demo catalog");
}

fn seed_password() -> String {
    std::env::var("SEED_PASSWORD").unwrap_or_else(|_| "Libaas15".to_string())
}
