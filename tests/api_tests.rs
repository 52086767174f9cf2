use chrono::Utc;
use directory_portal::{
    AdminShell, AppConfig, AppState, InMemoryRepository, RendererState, RepositoryState,
    TeraRenderer, ThemedRenderer, auth::Claims, create_router, models::User,
};
use jsonwebtoken::{EncodingKey, Header, encode};
use std::sync::Arc;
use tokio::net::TcpListener;

pub struct TestApp {
    pub address: String,
    pub repo: Arc<InMemoryRepository>,
    pub config: AppConfig,
}

async fn spawn_app() -> TestApp {
    let repo = Arc::new(InMemoryRepository::new());
    let config = AppConfig::default();

    let shell = AdminShell::default();
    let tera = TeraRenderer::new().expect("embedded templates must parse");
    let renderer = Arc::new(ThemedRenderer::new(
        Arc::new(tera),
        config.project_name.clone(),
        config.env.clone(),
        shell.clone(),
    )) as RendererState;

    let state = AppState {
        repo: repo.clone() as RepositoryState,
        renderer,
        shell,
        config: config.clone(),
    };
    let router = create_router(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp {
        address,
        repo,
        config,
    }
}

fn user(id: i64, email: &str, name: &str) -> User {
    User {
        id,
        email: email.to_string(),
        name: name.to_string(),
        is_active: true,
        is_staff: false,
        is_superuser: false,
        date_joined: Utc::now(),
        last_login: None,
    }
}

fn bearer_token(secret: &str, sub: i64) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub,
        exp: (now + 3600) as usize,
        iat: now as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("token encoding")
}

#[tokio::test]
async fn test_unauthenticated_list_is_rejected_without_data() {
    let app = spawn_app().await;
    app.repo.insert_user(user(1, "alice@example.com", "Alice"));

    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/api/public-users/", app.address))
        .send()
        .await
        .expect("req fail");

    assert_eq!(response.status(), 401);
    let body = response.text().await.unwrap();
    assert!(
        !body.contains("alice@example.com"),
        "rejection must not leak user data"
    );
    // The rejection carries the taxonomy's credential message.
    let detail: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        detail["detail"],
        "Authentication credentials were not provided or are invalid."
    );
}

#[tokio::test]
async fn test_list_is_projected_and_ordered_by_id() {
    let app = spawn_app().await;
    // Seeded out of order on purpose; the listing must sort by id.
    app.repo.insert_user(user(7, "carol@example.com", "Carol"));
    app.repo.insert_user(user(2, "bob@example.com", "Bob"));
    app.repo.insert_user(user(5, "alice@example.com", "Alice"));

    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/api/public-users/", app.address))
        .header("x-user-id", "2")
        .send()
        .await
        .expect("req fail");
    assert_eq!(response.status(), 200);

    let body: Vec<serde_json::Value> = response.json().await.unwrap();
    let ids: Vec<i64> = body.iter().map(|u| u["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![2, 5, 7]);

    // Exactly {id, email, name}: flags and timestamps must not appear.
    for entry in &body {
        let keys: Vec<&String> = entry.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 3, "projection leaked extra fields: {keys:?}");
        assert!(entry.get("is_superuser").is_none());
        assert!(entry.get("date_joined").is_none());
    }
    assert_eq!(body[0]["email"], "bob@example.com");
    assert_eq!(body[0]["name"], "Bob");
}

#[tokio::test]
async fn test_retrieve_returns_matching_record_or_404() {
    let app = spawn_app().await;
    app.repo.insert_user(user(3, "dora@example.com", "Dora"));

    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/public-users/3/", app.address))
        .header("x-user-id", "3")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["id"], 3);
    assert_eq!(body["email"], "dora@example.com");
    assert_eq!(body["name"], "Dora");

    let response = client
        .get(format!("{}/api/public-users/999/", app.address))
        .header("x-user-id", "3")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_bearer_token_authentication() {
    let app = spawn_app().await;
    app.repo.insert_user(user(1, "alice@example.com", "Alice"));

    let token = bearer_token(&app.config.jwt_secret, 1);
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/api/public-users/", app.address))
        .header("Authorization", format!("Bearer {token}"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    // A token signed with the wrong secret is rejected.
    let bad_token = bearer_token("some-other-secret", 1);
    let response = client
        .get(format!("{}/api/public-users/", app.address))
        .header("Authorization", format!("Bearer {bad_token}"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_deactivated_user_cannot_authenticate() {
    let app = spawn_app().await;
    let mut deactivated = user(4, "gone@example.com", "Gone");
    deactivated.is_active = false;
    app.repo.insert_user(deactivated);

    let token = bearer_token(&app.config.jwt_secret, 4);
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/api/public-users/", app.address))
        .header("Authorization", format!("Bearer {token}"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}
