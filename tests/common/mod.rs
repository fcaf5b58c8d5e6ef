#![allow(dead_code)]

use catalog::configuration::{get_configuration, DatabaseSettings, Settings};
use catalog::helpers::jwt;
use catalog::store::{MemoryProductStore, PgProductStore, ProductStore};
use catalog::telemetry::{get_subscriber, init_subscriber};
use serde_json::Value;
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::net::TcpListener;
use std::sync::{Arc, Once};

pub const JWT_SECRET: &str = "integration-test-secret";

static TRACING: Once = Once::new();

// logs are swallowed unless TEST_LOG is set
fn init_tracing() {
    TRACING.call_once(|| {
        if std::env::var("TEST_LOG").is_ok() {
            init_subscriber(get_subscriber("test".into(), "debug".into(), std::io::stdout));
        } else {
            init_subscriber(get_subscriber("test".into(), "debug".into(), std::io::sink));
        }
    });
}

pub struct TestApp {
    pub address: String,
    pub store: Arc<dyn ProductStore>,
    pub client: reqwest::Client,
    /// Set only for apps backed by Postgres.
    pub db_pool: Option<PgPool>,
}

/// Runs the full server (authentication, casbin, routes) on a random port,
/// backed by the in-memory store.
pub async fn spawn_app() -> TestApp {
    init_tracing();

    let store: Arc<dyn ProductStore> = Arc::new(MemoryProductStore::new());
    start(test_configuration(), store, None).await
}

/// Same server over `PgProductStore` and a fresh, migrated database.
/// `None` when Postgres is unreachable, so callers can skip.
pub async fn spawn_pg_app() -> Option<TestApp> {
    init_tracing();

    let mut configuration = test_configuration();
    configuration.database.database_name = uuid::Uuid::new_v4().to_string();

    let pool = match configure_database(&configuration.database).await {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("Skipping tests: failed to connect to postgres: {}", err);
            return None;
        }
    };

    let store: Arc<dyn ProductStore> = Arc::new(PgProductStore::new(pool.clone()));
    Some(start(configuration, store, Some(pool)).await)
}

pub async fn configure_database(config: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let mut connection = PgConnection::connect(&config.connection_string_without_db()).await?;

    connection
        .execute(format!(r#"CREATE DATABASE "{}""#, config.database_name).as_str())
        .await?;

    let pool = PgPool::connect(&config.connection_string()).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

fn test_configuration() -> Settings {
    let mut configuration = get_configuration().expect("Failed to get configuration");
    configuration.auth.jwt_secret = JWT_SECRET.to_string();
    configuration
}

async fn start(configuration: Settings, store: Arc<dyn ProductStore>, db_pool: Option<PgPool>) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let server = catalog::startup::run(listener, store.clone(), configuration)
        .await
        .expect("Failed to bind address.");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        store,
        client: reqwest::Client::new(),
        db_pool,
    }
}

pub fn token(role: &str, ttl_secs: i64) -> String {
    token_signed_with(role, ttl_secs, JWT_SECRET)
}

pub fn token_signed_with(role: &str, ttl_secs: i64, secret: &str) -> String {
    let claims = jwt::JwtClaims {
        sub: format!("{role}-1"),
        name: "Admin User".to_string(),
        email: format!("{role}@example.com"),
        role: role.to_string(),
        exp: chrono::Utc::now().timestamp() + ttl_secs,
    };
    jwt::encode(&claims, secret).expect("Failed to sign token")
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_json(&self, path: &str) -> Value {
        let response = self.get(path).await;
        assert!(response.status().is_success(), "GET {} -> {}", path, response.status());
        response.json().await.expect("Response should be valid JSON")
    }

    /// POST /products as admin, returning the created product.
    pub async fn create_product(&self, body: Value) -> Value {
        let response = self
            .client
            .post(self.url("/products"))
            .bearer_auth(token("admin", 3600))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Response should be valid JSON");
        body["data"].clone()
    }
}
