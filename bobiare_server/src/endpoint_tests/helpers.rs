use std::time::Duration;

use actix_web::{http::StatusCode, test, test::TestRequest, web, App};
use bobiare_engine::{
    traits::{AccountManagement, CatalogManagement, ImageStorage},
    AdminApi,
    AuthApi,
    CatalogApi,
    LoginMode,
    MemoryBackend,
    SimulatedAuthenticator,
};
use log::debug;
use serde_json::Value;
use tempfile::TempDir;

use crate::{helpers::SESSION_HEADER, server::configure_routes, sessions::SessionStore};

pub const TEST_URL: &str = "http://localhost:8470";

pub struct TestResponse {
    pub status: StatusCode,
    pub session: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or_else(|e| panic!("Response is not JSON ({e}): {}", self.body))
    }

    pub fn session(&self) -> &str {
        self.session.as_deref().expect("Response has no session header")
    }
}

/// A shop whose state (sessions, carts, catalog) outlives individual requests. Every request is served by a fresh app
/// built on the same shared data, the same way each worker of the real server is.
pub struct TestShop<B> {
    catalog: web::Data<CatalogApi<B>>,
    auth: web::Data<AuthApi<B>>,
    sessions: web::Data<SessionStore>,
    admin: web::Data<AdminApi>,
    _carts: TempDir,
}

impl TestShop<MemoryBackend> {
    /// The launch catalog, with simulated logins that do not wait
    pub fn memory() -> Self {
        let db = MemoryBackend::new(TEST_URL);
        Self::new(db.clone(), db, LoginMode::Simulated(SimulatedAuthenticator::new(Duration::ZERO)))
    }

    pub fn memory_with_backend_logins() -> Self {
        let db = MemoryBackend::new(TEST_URL);
        Self::new(db.clone(), db, LoginMode::Backend)
    }
}

impl<B> TestShop<B>
where B: CatalogManagement + ImageStorage + AccountManagement + 'static
{
    pub fn new(catalog: B, accounts: B, mode: LoginMode) -> Self {
        let carts = tempfile::tempdir().expect("Could not create a cart directory");
        Self {
            catalog: web::Data::new(CatalogApi::new(catalog)),
            auth: web::Data::new(AuthApi::new(accounts, mode)),
            sessions: web::Data::new(SessionStore::new(carts.path())),
            admin: web::Data::new(AdminApi::default()),
            _carts: carts,
        }
    }

    pub async fn send(&self, req: TestRequest) -> TestResponse {
        let app = App::new()
            .app_data(self.catalog.clone())
            .app_data(self.auth.clone())
            .app_data(self.sessions.clone())
            .app_data(self.admin.clone())
            .configure(configure_routes::<B>);
        let service = test::init_service(app).await;
        debug!("Making request");
        let res = test::call_service(&service, req.to_request()).await;
        let status = res.status();
        let session = res.headers().get(SESSION_HEADER).and_then(|v| v.to_str().ok()).map(String::from);
        let body = String::from_utf8_lossy(&test::read_body(res).await).into_owned();
        TestResponse { status, session, body }
    }

    pub async fn get(&self, path: &str, session: Option<&str>) -> TestResponse {
        self.send(with_session(TestRequest::get().uri(path), session)).await
    }

    pub async fn post(&self, path: &str, session: Option<&str>, body: Value) -> TestResponse {
        self.send(with_session(TestRequest::post().uri(path), session).set_json(body)).await
    }

    pub async fn patch(&self, path: &str, session: Option<&str>, body: Value) -> TestResponse {
        self.send(with_session(TestRequest::patch().uri(path), session).set_json(body)).await
    }

    pub async fn delete(&self, path: &str, session: Option<&str>) -> TestResponse {
        self.send(with_session(TestRequest::delete().uri(path), session)).await
    }
}

fn with_session(req: TestRequest, session: Option<&str>) -> TestRequest {
    match session {
        Some(id) => req.insert_header((SESSION_HEADER, id)),
        None => req,
    }
}
