#![allow(dead_code)]

use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHashParams;
use auth::PasswordHasher;
use chrono::Duration;
use finance_service::domain::transaction::service::TransactionService;
use finance_service::domain::user::service::UserService;
use finance_service::inbound::http::router::create_router;
use finance_service::outbound::repositories::InMemoryTransactionRepository;
use finance_service::outbound::repositories::InMemoryUserRepository;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory repositories
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
}

/// Argon2 parameters cheap enough for tests.
pub fn fast_password_hasher() -> PasswordHasher {
    PasswordHasher::with_params(PasswordHashParams {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    })
    .expect("Failed to build password hasher")
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(
            Authenticator::new(JWT_SECRET, Duration::hours(24))
                .expect("Failed to create authenticator")
                .with_password_hasher(fast_password_hasher()),
        );

        let user_service = Arc::new(UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::clone(&authenticator),
        ));
        let transaction_service = Arc::new(TransactionService::new(Arc::new(
            InMemoryTransactionRepository::new(),
        )));

        let router = create_router(
            user_service,
            transaction_service,
            Arc::clone(&authenticator),
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: Self::client(),
            authenticator,
        }
    }

    /// A client with its own, empty cookie store
    pub fn client() -> reqwest::Client {
        reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create reqwest client")
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path))
    }

    /// Register an account through the API; the session cookie lands in the
    /// shared client's store.
    pub async fn register(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/user")
            .json(&serde_json::json!({
                "username": username,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}
