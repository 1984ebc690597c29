use reqwest::StatusCode;
use serde_json::json;
use std::sync::Arc;

async fn spawn_app(test_name: &str) -> String {
    std::env::set_var("SECRET", "test-secret");
    let db_path = std::env::temp_dir().join(format!(
        "libaas-{}-{}.sqlite",
        test_name,
        std::process::id()
    ));
    let _ = std::fs::remove_file(&db_path);
    let db = sea_orm::Database::connect(format!("sqlite://{}?mode=rwc", db_path.display()))
        .await
        .expect("Failed to open test database");
    rust_libaas::entities::setup_schema(&db).await;
    let shared_db = Arc::new(db);
    rust_libaas::entities::primary_setup(shared_db.clone()).await;

    let cart = Arc::new(tokio::sync::Mutex::new(rust_libaas::cart::CartStore::new()));
    let config = rust_libaas::checkout::HandoffConfig {
        email: "orders@example.com".to_string(),
        whatsapp: "920000000000".to_string(),
    };
    let app = rust_libaas::api::create_api_router(shared_db, cart, config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server exited");
    });
    format!("http://{}", addr)
}

async fn login(client: &reqwest::Client, base: &str, username: &str) -> String {
    let response = client
        .post(format!("{}/api/login", base))
        .json(&json!({ "username": username, "password": "Libaas15" }))
        .send()
        .await
        .expect("Failed to send login request");
    assert_eq!(response.status(), StatusCode::OK);
    response.json::<serde_json::Value>().await.expect("Bad JSON")["token"]
        .as_str()
        .expect("Token not found in login response")
        .to_string()
}

#[tokio::test]
async fn test_admin_routes_require_admin_role() {
    let base = spawn_app("admin-gate").await;
    let client = reqwest::Client::new();

    //no token
    let response = client
        .get(format!("{}/api/admin/product", base))
        .send()
        .await
        .expect("Failed to send list request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    //plain user token
    let token = login(&client, &base, "user").await;
    let response = client
        .get(format!("{}/api/admin/product", base))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send list request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_product_splits_comma_separated_images() {
    let base = spawn_app("admin-create").await;
    let client = reqwest::Client::new();
    let token = login(&client, &base, "admin").await;

    let response = client
        .post(format!("{}/api/admin/product", base))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Chiffon Maxi",
            "specs": "Party wear",
            "price": 7800.0,
            "brand": "Nishat",
            "images": "a.jpg, b.jpg"
        }))
        .send()
        .await
        .expect("Failed to send create request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = client
        .get(format!("{}/api/admin/product", base))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send list request");
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.json::<serde_json::Value>().await.expect("Bad JSON");
    let products = body.as_array().expect("Expected a product array");
    let created = products
        .iter()
        .find(|p| p["title"] == "Chiffon Maxi")
        .expect("Created product not listed");
    assert_eq!(created["images"], json!(["a.jpg", "b.jpg"]));
}

#[tokio::test]
async fn test_create_product_validates_fields() {
    let base = spawn_app("admin-validate").await;
    let client = reqwest::Client::new();
    let token = login(&client, &base, "admin").await;

    //unknown brand
    let response = client
        .post(format!("{}/api/admin/product", base))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Chiffon Maxi",
            "price": 7800.0,
            "brand": "Khaadi",
            "images": "a.jpg"
        }))
        .send()
        .await
        .expect("Failed to send create request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    //negative price
    let response = client
        .post(format!("{}/api/admin/product", base))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Chiffon Maxi",
            "price": -1.0,
            "brand": "Nishat",
            "images": "a.jpg"
        }))
        .send()
        .await
        .expect("Failed to send create request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    //no usable image urls
    let response = client
        .post(format!("{}/api/admin/product", base))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Chiffon Maxi",
            "price": 7800.0,
            "brand": "Nishat",
            "images": " , ,"
        }))
        .send()
        .await
        .expect("Failed to send create request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_patch_and_delete_product() {
    let base = spawn_app("admin-patch-delete").await;
    let client = reqwest::Client::new();
    let token = login(&client, &base, "admin").await;

    let response = client
        .patch(format!("{}/api/admin/product/1", base))
        .bearer_auth(&token)
        .json(&json!({ "price": 4999.0, "images": "new-cover.jpg" }))
        .send()
        .await
        .expect("Failed to send patch request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .get(format!("{}/api/product/1", base))
        .send()
        .await
        .expect("Failed to send get product request");
    let body = response.json::<serde_json::Value>().await.expect("Bad JSON");
    assert_eq!(body["price"], 4999.0);
    assert_eq!(body["images"], json!(["new-cover.jpg"]));

    let response = client
        .delete(format!("{}/api/admin/product/1", base))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send delete request");
    assert_eq!(response.status(), StatusCode::OK);

    //deleting again reports the missing id
    let response = client
        .delete(format!("{}/api/admin/product/1", base))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send delete request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .get(format!("{}/api/product/1", base))
        .send()
        .await
        .expect("Failed to send get product request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
