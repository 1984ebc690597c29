use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use std::sync::Arc;
use validator::Validate;

use crate::entities::product::{self, parse_image_list, Brand, Entity as ProductEntity};

//ROUTERS
pub fn admin_product_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/product", get(list_products).post(create_product))
        .route(
            "/product/:id",
            patch(patch_product).delete(delete_product),
        )
        .layer(Extension(db))
}

//ROUTES
async fn list_products(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> impl IntoResponse {
    let txn = match db.begin().await {
        Ok(txn) => txn,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Internal server error"
                })),
            )
                .into_response();
        }
    };

    match ProductEntity::find()
        .order_by_desc(product::Column::CreatedAt)
        .all(&txn)
        .await
    {
        Ok(products) => {
            let response: Vec<AdminProductResponse> = products
                .into_iter()
                .map(AdminProductResponse::new)
                .collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Failed to fetch products."
            })),
        )
            .into_response(),
    }
}

async fn create_product(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<CreateProduct>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": errors.to_string()
            })),
        );
    }

    let brand = match Brand::from_str(&payload.brand) {
        Ok(brand) => brand,
        Err(err) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": err
                })),
            );
        }
    };

    let images = parse_image_list(&payload.images);
    if images.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "At least one image url is required"
            })),
        );
    }
    let images = match serde_json::to_string(&images) {
        Ok(images) => images,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Internal server error"
                })),
            );
        }
    };

    let txn = match db.begin().await {
        Ok(txn) => txn,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Internal server error"
                })),
            );
        }
    };

    let new_product = product::ActiveModel {
        title: Set(payload.title),
        specs: Set(payload.specs),
        price: Set(payload.price),
        brand: Set(brand),
        images: Set(images),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    match product::Entity::insert(new_product).exec(&txn).await {
        Ok(_) => match txn.commit().await {
            Ok(_) => (
                StatusCode::CREATED,
                Json(json!({
                    "message": "Product created successfully"
                })),
            ),
            Err(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Internal server error"
                })),
            ),
        },
        Err(_) => {
            let _ = txn.rollback().await;
            (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Failed to create this resource"
                })),
            )
        }
    }
}

async fn patch_product(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<PatchProductPayload>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": errors.to_string()
            })),
        );
    }

    let txn = match db.begin().await {
        Ok(txn) => txn,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Internal server error"
                })),
            );
        }
    };

    let result = ProductEntity::find_by_id(id).one(&txn).await;
    match result {
        Ok(Some(found)) => {
            let mut found: product::ActiveModel = found.into();

            if let Some(title) = payload.title {
                found.title = Set(title);
            }

            if let Some(specs) = payload.specs {
                found.specs = Set(specs);
            }

            if let Some(price) = payload.price {
                found.price = Set(price);
            }

            if let Some(brand) = payload.brand {
                match Brand::from_str(&brand) {
                    Ok(brand) => found.brand = Set(brand),
                    Err(err) => {
                        return (
                            StatusCode::BAD_REQUEST,
                            Json(json!({
                                "error": err
                            })),
                        );
                    }
                }
            }

            if let Some(images) = payload.images {
                let images = parse_image_list(&images);
                if images.is_empty() {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(json!({
                            "error": "At least one image url is required"
                        })),
                    );
                }
                match serde_json::to_string(&images) {
                    Ok(images) => found.images = Set(images),
                    Err(_) => {
                        return (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            Json(json!({
                                "error": "Internal server error"
                            })),
                        );
                    }
                }
            }

            let result = found.update(&txn).await;
            match result {
                Ok(_) => {
                    let _ = txn.commit().await;
                    (
                        StatusCode::OK,
                        Json(json!({
                            "message": "Resource patched successfully."
                        })),
                    )
                }
                Err(_) => {
                    let _ = txn.rollback().await;
                    (
                        StatusCode::BAD_REQUEST,
                        Json(json!({
                            "error": "Failed to patch this resource"
                        })),
                    )
                }
            }
        }
        Ok(None) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": format!("No product with {} id was found.", id)
            })),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Internal server error."
            })),
        ),
    }
}

async fn delete_product(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> impl IntoResponse {
    let txn = match db.begin().await {
        Ok(txn) => txn,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Internal server error"
                })),
            );
        }
    };

    match ProductEntity::find_by_id(id).one(&txn).await {
        Ok(Some(found)) => {
            let found: product::ActiveModel = found.into();
            match found.delete(&txn).await {
                Ok(_) => {
                    let _ = txn.commit().await;
                    (
                        StatusCode::OK,
                        Json(json!({
                            "message": "Resource deleted successfully"
                        })),
                    )
                }
                Err(_) => {
                    let _ = txn.rollback().await;
                    (
                        StatusCode::BAD_REQUEST,
                        Json(json!({
                            "error": "Failed to delete this resource"
                        })),
                    )
                }
            }
        }
        Ok(None) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": format!("No product with {} id was found.", id)
            })),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Internal server error."
            })),
        ),
    }
}

//Structs
#[derive(Deserialize, Debug, Validate)]
struct CreateProduct {
    #[validate(length(min = 1, message = "Title is required"))]
    title: String,
    #[serde(default)]
    specs: String,
    #[validate(range(min = 0.0, message = "Price must be non-negative"))]
    price: f32,
    brand: String,
    //comma separated urls, split and trimmed before storage
    images: String,
}

#[derive(Deserialize, Debug, Validate)]
struct PatchProductPayload {
    #[validate(length(min = 1, message = "Title is required"))]
    title: Option<String>,
    specs: Option<String>,
    #[validate(range(min = 0.0, message = "Price must be non-negative"))]
    price: Option<f32>,
    brand: Option<String>,
    images: Option<String>,
}

#[derive(Serialize)]
struct AdminProductResponse {
    id: i32,
    title: String,
    specs: String,
    price: f32,
    brand: String,
    images: Vec<String>,
    created_at: chrono::DateTime<Utc>,
}

impl AdminProductResponse {
    fn new(model: product::Model) -> Self {
        let images = model.image_list();
        AdminProductResponse {
            id: model.id,
            title: model.title,
            specs: model.specs,
            price: model.price,
            brand: model.brand.to_string(),
            images,
            created_at: model.created_at,
        }
    }
}
