//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two of glue belong in the engine. Keep this module neat and tidy 🙏
//!
//! Per-session state lives in the [`SessionStore`], behind a mutex. Handlers never hold a session across an `.await`:
//! anything that needs the backend is awaited first, and the result is then applied to the session inside
//! [`SessionStore::with_session`].
//!
//! Every response that touches a session carries the session id in the `x-bobiare-session` header, so that a client
//! that arrived without one can keep using it.
use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use bobiare_engine::{
    catalog_objects::{ConfigureItemRequest, ProductFilter},
    checkout_objects::{CheckoutFormPatch, OrderConfirmation},
    db_types::{OrderId, ProductId},
    traits::{AccountManagement, CatalogManagement, ImageStorage, IMAGE_BUCKET},
    AdminApi,
    AuthApi,
    CatalogApi,
};
use chrono::Utc;
use log::*;
use serde::Serialize;
use serde_json::json;

use crate::{
    data_objects::{
        CalendarParams,
        CartResponse,
        Credentials,
        JsonResponse,
        NewProductForm,
        NewProductResponse,
        OrdersParams,
        QuantityUpdate,
    },
    errors::ServerError,
    helpers::{session_id, SESSION_HEADER},
    sessions::SessionStore,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal) => {
        paste::paste! { pub struct [<$name:camel Route>];}
        paste::paste! {
            impl [<$name:camel Route>] {
                #[allow(clippy::new_without_default)]
                pub fn new() -> Self { Self }
            }
        }
        paste::paste! {
            impl actix_web::dev::HttpServiceFactory for [<$name:camel Route>] {
                fn register(self, config: &mut actix_web::dev::AppService) {
                    let res = actix_web::Resource::new($path)
                        .name(stringify!($name))
                        .guard(actix_web::guard::$method())
                        .to($name);
                    actix_web::dev::HttpServiceFactory::register(res, config);
                }
            }
        }
    };

    ($name:ident => $method:ident $path:literal impl $($bounds:path),+) => {
        paste::paste! { pub struct [<$name:camel Route>]<B>(core::marker::PhantomData<fn() -> B>);}
        paste::paste! { impl<B> [<$name:camel Route>]<B> {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(core::marker::PhantomData::<fn() -> B>)
            }
        }}
        paste::paste! { impl<B> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<B>
        where
            B: $($bounds +)+ 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::<B>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

fn session_response<T: Serialize>(session: &str, body: &T) -> HttpResponse {
    HttpResponse::Ok().insert_header((SESSION_HEADER, session)).json(body)
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

// ----------------------------------------------   Not found  -------------------------------------------------
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    debug!("💻️ No route for {} {}", req.method(), req.path());
    HttpResponse::NotFound().json(json!({
        "error": "Página no encontrada",
        "message": "Lo sentimos, la página que estás buscando no existe o ha sido movida.",
        "link": "/",
    }))
}

//----------------------------------------------   Catalog  ----------------------------------------------------
route!(home => Get "/" impl CatalogManagement);
/// Featured products and the service shortcuts for the landing page
pub async fn home<B: CatalogManagement>(api: web::Data<CatalogApi<B>>) -> HttpResponse {
    trace!("💻️ Received home page request");
    HttpResponse::Ok().json(api.featured_products().await)
}

route!(home_alias => Get "/home" impl CatalogManagement);
pub async fn home_alias<B: CatalogManagement>(api: web::Data<CatalogApi<B>>) -> HttpResponse {
    home(api).await
}

route!(products => Get "/productos" impl CatalogManagement);
/// Route handler for the product listing
///
/// Supports the query parameters `category` (exact category), `service` (part of the product name) and `selected`
/// (the category picked in the sidebar). Backend failures produce an empty listing, never an error.
pub async fn products<B: CatalogManagement>(
    filter: web::Query<ProductFilter>,
    api: web::Data<CatalogApi<B>>,
) -> HttpResponse {
    trace!("💻️ Received product listing request. {filter:?}");
    HttpResponse::Ok().json(api.browse(&filter).await)
}

route!(product_detail => Get "/productos/{product_id}" impl CatalogManagement);
pub async fn product_detail<B: CatalogManagement>(
    path: web::Path<String>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = ProductId::from(path.into_inner());
    trace!("💻️ Received product detail request for {id}");
    let detail = api.product_detail(&id).await?;
    Ok(HttpResponse::Ok().json(detail))
}

//----------------------------------------------   Cart  ----------------------------------------------------
route!(add_to_cart => Post "/productos/{product_id}" impl CatalogManagement);
/// Configures the product with the options in the body, adds it to the session's cart and returns the cart.
pub async fn add_to_cart<B: CatalogManagement>(
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<ConfigureItemRequest>,
    api: web::Data<CatalogApi<B>>,
    sessions: web::Data<SessionStore>,
) -> Result<HttpResponse, ServerError> {
    let session = session_id(&req);
    let mut request = body.into_inner();
    request.product_id = ProductId::from(path.into_inner());
    let item = api.configure_item(request).await?;
    let cart = sessions.with_session(&session, |s| {
        s.cart.add_item(item)?;
        Ok::<_, ServerError>(CartResponse::from(&s.cart))
    })??;
    Ok(session_response(&session, &cart))
}

route!(cart => Get "/carrito");
pub async fn cart(req: HttpRequest, sessions: web::Data<SessionStore>) -> Result<HttpResponse, ServerError> {
    let session = session_id(&req);
    let cart = sessions.with_session(&session, |s| CartResponse::from(&s.cart))?;
    Ok(session_response(&session, &cart))
}

route!(update_cart_item => Patch "/carrito/{item_id}" impl CatalogManagement);
/// Changes the quantity of a cart item. The new total is computed from the product's current price.
pub async fn update_cart_item<B: CatalogManagement>(
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<QuantityUpdate>,
    api: web::Data<CatalogApi<B>>,
    sessions: web::Data<SessionStore>,
) -> Result<HttpResponse, ServerError> {
    let session = session_id(&req);
    let item_id = path.into_inner();
    let item = sessions
        .with_session(&session, |s| s.cart.item(&item_id).cloned())?
        .ok_or_else(|| ServerError::NoRecordFound(format!("Cart item {item_id} is not in the cart")))?;
    let patch = api.reprice_item(&item, body.quantity).await?;
    let cart = sessions.with_session(&session, |s| {
        s.cart.update_item(&item_id, patch);
        CartResponse::from(&s.cart)
    })?;
    Ok(session_response(&session, &cart))
}

route!(remove_cart_item => Delete "/carrito/{item_id}");
pub async fn remove_cart_item(
    req: HttpRequest,
    path: web::Path<String>,
    sessions: web::Data<SessionStore>,
) -> Result<HttpResponse, ServerError> {
    let session = session_id(&req);
    let cart = sessions.with_session(&session, |s| {
        s.cart.remove_item(&path);
        CartResponse::from(&s.cart)
    })?;
    Ok(session_response(&session, &cart))
}

//----------------------------------------------   Checkout  ----------------------------------------------------
route!(checkout => Get "/checkout");
/// The current checkout step, the form so far and the cart. Responds with 409 when the cart is empty.
pub async fn checkout(req: HttpRequest, sessions: web::Data<SessionStore>) -> Result<HttpResponse, ServerError> {
    let session = session_id(&req);
    let summary = sessions.with_session(&session, |s| s.checkout.open(&s.cart))??;
    Ok(session_response(&session, &summary))
}

route!(update_checkout => Patch "/checkout");
pub async fn update_checkout(
    req: HttpRequest,
    body: web::Json<CheckoutFormPatch>,
    sessions: web::Data<SessionStore>,
) -> Result<HttpResponse, ServerError> {
    let session = session_id(&req);
    let summary = sessions.with_session(&session, |s| {
        s.checkout.open(&s.cart)?;
        s.checkout.update_fields(body.into_inner());
        s.checkout.open(&s.cart)
    })??;
    Ok(session_response(&session, &summary))
}

route!(checkout_next => Post "/checkout/next");
/// Validates the current step and moves to the next one. Invalid fields are reported with a 422.
pub async fn checkout_next(req: HttpRequest, sessions: web::Data<SessionStore>) -> Result<HttpResponse, ServerError> {
    let session = session_id(&req);
    let summary = sessions.with_session(&session, |s| {
        s.checkout.open(&s.cart)?;
        s.checkout.next()?;
        s.checkout.open(&s.cart)
    })??;
    Ok(session_response(&session, &summary))
}

route!(checkout_back => Post "/checkout/back");
pub async fn checkout_back(req: HttpRequest, sessions: web::Data<SessionStore>) -> Result<HttpResponse, ServerError> {
    let session = session_id(&req);
    let summary = sessions.with_session(&session, |s| {
        s.checkout.open(&s.cart)?;
        s.checkout.back();
        s.checkout.open(&s.cart)
    })??;
    Ok(session_response(&session, &summary))
}

route!(checkout_submit => Post "/checkout/submit");
/// Places the order from the payment step. The cart is emptied and the receipt points at the confirmation page.
pub async fn checkout_submit(req: HttpRequest, sessions: web::Data<SessionStore>) -> Result<HttpResponse, ServerError> {
    let session = session_id(&req);
    let now = Utc::now();
    let receipt = sessions.with_session(&session, |s| {
        let user = s.auth.user().map(String::from);
        s.checkout.submit(&mut s.cart, user.as_deref(), now)
    })??;
    Ok(session_response(&session, &receipt))
}

route!(confirmation => Get "/confirmacion/{order_id}");
pub async fn confirmation(path: web::Path<String>) -> Result<HttpResponse, ServerError> {
    let order_id = path.parse::<OrderId>().map_err(|e| ServerError::InvalidRequestPath(e.to_string()))?;
    trace!("💻️ Received confirmation request for order {order_id}");
    Ok(HttpResponse::Ok().json(OrderConfirmation::new(order_id, Utc::now().date_naive())))
}

//----------------------------------------------   Auth  ----------------------------------------------------
route!(login => Post "/login" impl AccountManagement);
/// Route handler for the login endpoint
///
/// Checks the credentials with the configured authenticator and, on success, records the user in the session.
/// Failures are always reported as "Correo o contraseña incorrectos".
pub async fn login<B: AccountManagement>(
    req: HttpRequest,
    body: web::Json<Credentials>,
    api: web::Data<AuthApi<B>>,
    sessions: web::Data<SessionStore>,
) -> Result<HttpResponse, ServerError> {
    let session = session_id(&req);
    let Credentials { email, password } = body.into_inner();
    let user = api.authenticate(&email, &password).await?;
    sessions.with_session(&session, |s| s.auth.set_user(user.clone()))?;
    info!("🔐️ {user} logged in");
    let response = JsonResponse::success(format!("Sesión iniciada como {user}")).redirect_to("/");
    Ok(session_response(&session, &response))
}

route!(logout => Post "/logout" impl AccountManagement);
pub async fn logout<B: AccountManagement>(
    req: HttpRequest,
    api: web::Data<AuthApi<B>>,
    sessions: web::Data<SessionStore>,
) -> Result<HttpResponse, ServerError> {
    let session = session_id(&req);
    sessions.with_session(&session, |s| api.logout(&mut s.auth))?;
    Ok(session_response(&session, &JsonResponse::success("Sesión cerrada").redirect_to("/")))
}

route!(register => Post "/register" impl AccountManagement);
/// Creates an account and logs it in on this session.
pub async fn register<B: AccountManagement>(
    req: HttpRequest,
    body: web::Json<Credentials>,
    api: web::Data<AuthApi<B>>,
    sessions: web::Data<SessionStore>,
) -> Result<HttpResponse, ServerError> {
    let session = session_id(&req);
    let Credentials { email, password } = body.into_inner();
    let user = api.sign_up(&email, &password).await?;
    sessions.with_session(&session, |s| s.auth.set_user(user.clone()))?;
    let response = JsonResponse::success(format!("Cuenta creada para {user}")).redirect_to("/admin");
    Ok(session_response(&session, &response))
}

//----------------------------------------------   Admin  ----------------------------------------------------
route!(admin_dashboard => Get "/admin");
pub async fn admin_dashboard(api: web::Data<AdminApi>) -> HttpResponse {
    HttpResponse::Ok().json(api.dashboard())
}

route!(admin_orders => Get "/admin/pedidos");
/// The orders table. Query parameters: `search`, `status`, `sort` and `direction` (`asc` or `desc`).
pub async fn admin_orders(
    params: web::Query<OrdersParams>,
    api: web::Data<AdminApi>,
) -> Result<HttpResponse, ServerError> {
    let query = params.into_inner().into_query()?;
    Ok(HttpResponse::Ok().json(api.orders(&query)))
}

route!(admin_calendar => Get "/admin/calendario");
/// The delivery calendar. Query parameters: `view` (`day`, `week` or `month`; default `week`), `date` (default
/// today) and `step`, the number of periods to move from `date`.
pub async fn admin_calendar(
    params: web::Query<CalendarParams>,
    api: web::Data<AdminApi>,
) -> Result<HttpResponse, ServerError> {
    let view = params.view()?;
    let date = params.date.unwrap_or_else(|| Utc::now().date_naive());
    Ok(HttpResponse::Ok().json(api.calendar(view, date, params.step)))
}

route!(add_product_form => Get "/admin/addproduct" impl CatalogManagement);
/// The colors offered in the add-product form
pub async fn add_product_form<B: CatalogManagement>(
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let colors = api.colors().await.map_err(|e| {
        error!("💻️ Error al cargar los colores. {e}");
        ServerError::from(e)
    })?;
    Ok(HttpResponse::Ok().json(json!({ "colors": colors })))
}

route!(add_product => Post "/admin/addproduct" impl CatalogManagement, ImageStorage);
pub async fn add_product<B: CatalogManagement + ImageStorage>(
    body: web::Json<NewProductForm>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let (product, image) = body.into_inner().into_parts()?;
    let product = api.add_product(product, image).await?;
    let response = NewProductResponse {
        success: true,
        message: "✅ Producto agregado con éxito!".into(),
        redirect: "/admin".into(),
        product,
    };
    Ok(HttpResponse::Created().json(response))
}

//----------------------------------------------   Images  ----------------------------------------------------
route!(image => Get "/imagenes/{bucket}/{path}" impl ImageStorage);
/// Serves an uploaded image. This is where the public image URLs handed out by the backend point.
pub async fn image<B: ImageStorage>(
    path: web::Path<(String, String)>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let (bucket, file) = path.into_inner();
    if bucket != IMAGE_BUCKET {
        return Err(ServerError::NoRecordFound(format!("There is no image bucket called {bucket}")));
    }
    let image = api.fetch_image(&file).await?.ok_or_else(|| ServerError::NoRecordFound(format!("Image {file}")))?;
    Ok(HttpResponse::Ok().content_type(image.content_type).body(image.bytes))
}
