use std::time::Duration;

use actix_web::{
    dev::Server,
    error::{JsonPayloadError, QueryPayloadError},
    http::KeepAlive,
    middleware::Logger,
    web,
    App,
    HttpRequest,
    HttpServer,
};
use bobiare_engine::{
    traits::{AccountManagement, CatalogManagement, ImageStorage},
    AdminApi,
    AuthApi,
    CatalogApi,
    LoginMode,
    MemoryBackend,
    SimulatedAuthenticator,
    SqliteDatabase,
};
use log::*;

use crate::{
    config::ServerConfig,
    errors::ServerError,
    routes::{
        health,
        not_found,
        AddProductFormRoute,
        AddProductRoute,
        AddToCartRoute,
        AdminCalendarRoute,
        AdminDashboardRoute,
        AdminOrdersRoute,
        CartRoute,
        CheckoutBackRoute,
        CheckoutNextRoute,
        CheckoutRoute,
        CheckoutSubmitRoute,
        ConfirmationRoute,
        HomeAliasRoute,
        HomeRoute,
        ImageRoute,
        LoginRoute,
        LogoutRoute,
        ProductDetailRoute,
        ProductsRoute,
        RegisterRoute,
        RemoveCartItemRoute,
        UpdateCartItemRoute,
        UpdateCheckoutRoute,
    },
    sessions::SessionStore,
};

const MAX_DB_CONNECTIONS: u32 = 25;

/// Starts the server with the SQLite backend if a database URL is configured, or the in-memory catalog otherwise.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    match config.database_url.clone() {
        Some(url) => {
            let db = SqliteDatabase::new_with_url(&url, MAX_DB_CONNECTIONS, &config.public_url)
                .await
                .map_err(|e| ServerError::InitializeError(e.to_string()))?;
            db.migrate().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
            serve(config, db).await
        },
        None => {
            warn!(
                "🪛️ BOBIARE_DATABASE_URL is not set. Serving the built-in catalog from memory. New products, images \
                 and accounts will be lost when the server stops."
            );
            let db = MemoryBackend::new(config.public_url.clone());
            serve(config, db).await
        },
    }
}

async fn serve<B>(config: ServerConfig, db: B) -> Result<(), ServerError>
where B: CatalogManagement + ImageStorage + AccountManagement + Clone + Send + Sync + 'static {
    if let Some(admin) = &config.admin_account {
        AuthApi::new(db.clone(), LoginMode::Backend)
            .ensure_admin_account(&admin.email, &admin.password)
            .await?;
    }
    info!("🚀️ Starting server on {}:{}", config.host, config.port);
    let srv = create_server_instance(config, db)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance<B>(config: ServerConfig, db: B) -> Result<Server, ServerError>
where B: CatalogManagement + ImageStorage + AccountManagement + Clone + Send + Sync + 'static {
    // Shared by every worker
    let sessions = web::Data::new(SessionStore::with_limits(
        config.carts_dir.clone(),
        config.session_idle_timeout,
        config.max_sessions,
    ));
    let admin_api = web::Data::new(AdminApi::default());
    let login_mode = if config.simulated_login {
        info!("🔐️ Using simulated login with a {}ms delay", config.login_delay.as_millis());
        LoginMode::Simulated(SimulatedAuthenticator::new(config.login_delay))
    } else {
        LoginMode::Backend
    };
    let srv = HttpServer::new(move || {
        let catalog_api = CatalogApi::new(db.clone());
        let auth_api = AuthApi::new(db.clone(), login_mode.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("bobiare::access_log"))
            .app_data(web::Data::new(catalog_api))
            .app_data(web::Data::new(auth_api))
            .app_data(sessions.clone())
            .app_data(admin_api.clone())
            .configure(configure_routes::<B>)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}

/// Registers every route, along with the body and query string error handlers. The app must provide
/// `CatalogApi<B>`, `AuthApi<B>`, [`SessionStore`] and [`AdminApi`] as app data.
pub fn configure_routes<B>(cfg: &mut web::ServiceConfig)
where B: CatalogManagement + ImageStorage + AccountManagement + 'static {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .service(health)
        .service(HomeRoute::<B>::new())
        .service(HomeAliasRoute::<B>::new())
        .service(ProductsRoute::<B>::new())
        .service(ProductDetailRoute::<B>::new())
        .service(AddToCartRoute::<B>::new())
        .service(CartRoute::new())
        .service(UpdateCartItemRoute::<B>::new())
        .service(RemoveCartItemRoute::new())
        .service(CheckoutRoute::new())
        .service(UpdateCheckoutRoute::new())
        .service(CheckoutNextRoute::new())
        .service(CheckoutBackRoute::new())
        .service(CheckoutSubmitRoute::new())
        .service(ConfirmationRoute::new())
        .service(LoginRoute::<B>::new())
        .service(LogoutRoute::<B>::new())
        .service(RegisterRoute::<B>::new())
        .service(AdminDashboardRoute::new())
        .service(AdminOrdersRoute::new())
        .service(AdminCalendarRoute::new())
        .service(AddProductFormRoute::<B>::new())
        .service(AddProductRoute::<B>::new())
        .service(ImageRoute::<B>::new())
        .default_service(web::route().to(not_found));
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!("💻️ Rejected request body. {err}");
    ServerError::InvalidRequestBody(err.to_string()).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!("💻️ Rejected query string. {err}");
    ServerError::InvalidQuery(err.to_string()).into()
}
