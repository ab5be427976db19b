use payments_backend::{
    api::router::create_router,
    config::Config,
    domain::models::{auth::Claims, user::{NewUser, User}},
    domain::services::auth_service::AuthService,
    infra::factory::sqlite_state,
    state::AppState,
};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::Value;
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub const OVERRIDE_HEADER: &str = "X-Cliente-Gerenciado-Id";
pub const TEST_CSRF: &str = "csrf-test-token";

const ISSUER: &str = "test-issuer";
const AUDIENCE: &str = "payments-frontend";

/// How a test request carries its credentials.
#[allow(dead_code)]
pub enum Auth<'a> {
    None,
    Bearer(&'a str),
    Cookie { token: &'a str, csrf: Option<&'a str> },
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url,
            port: 0,
            jwt_public_key: include_str!("../tests/keys/test_public.pem").to_string(),
            auth_issuer: ISSUER.to_string(),
            auth_audience: AUDIENCE.to_string(),
            timezone: chrono_tz::UTC,
            log_dir: "./logs".to_string(),
        };

        let auth_service = Arc::new(AuthService::new(&config));
        let state = Arc::new(sqlite_state(&config, pool.clone(), auth_service));
        let router = create_router(state.clone());

        Self { router, pool, db_filename, state }
    }

    pub async fn create_tenant(&self, company_name: &str) -> i64 {
        self.state.tenant_repo.create(company_name).await.unwrap().id
    }

    pub async fn create_user(&self, username: &str, is_superuser: bool, tenant_id: Option<i64>) -> User {
        self.state.user_repo.create(&NewUser {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            is_superuser,
            tenant_id,
        }).await.unwrap()
    }

    /// Mints an access token for `user_id`, valid for fifteen minutes.
    pub fn token_for(&self, user_id: i64) -> String {
        self.token_with_expiry(user_id, chrono::Duration::minutes(15))
    }

    pub fn token_with_expiry(&self, user_id: i64, valid_for: chrono::Duration) -> String {
        let now = chrono::Utc::now();
        let claims = Claims {
            iss: ISSUER.to_string(),
            sub: user_id.to_string(),
            aud: AUDIENCE.to_string(),
            exp: (now + valid_for).timestamp() as usize,
            iat: now.timestamp() as usize,
            jti: Some(Uuid::new_v4().to_string()),
            csrf: Some(TEST_CSRF.to_string()),
        };
        let key = EncodingKey::from_ed_pem(include_bytes!("../tests/keys/test_private.pem")).unwrap();
        encode(&Header::new(Algorithm::EdDSA), &claims, &key).unwrap()
    }

    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        auth: Auth<'_>,
        managed_tenant: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        match auth {
            Auth::None => {}
            Auth::Bearer(token) => {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
            }
            Auth::Cookie { token, csrf } => {
                builder = builder.header(header::COOKIE, format!("access_token={}", token));
                if let Some(csrf) = csrf {
                    builder = builder.header("X-CSRF-Token", csrf);
                }
            }
        }
        if let Some(value) = managed_tenant {
            builder = builder.header(OVERRIDE_HEADER, value);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    /// Bearer-authenticated request without a tenant override.
    pub async fn call(&self, method: &str, uri: &str, token: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.send(method, uri, Auth::Bearer(token), None, body).await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}

#[allow(dead_code)]
pub fn days_from_today(days: i64) -> String {
    (chrono::Utc::now().date_naive() + chrono::Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}
