use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::web;
use actix_web::App;
use actix_web::HttpServer;
use actix_web_lab::middleware::from_fn;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing_actix_web::TracingLogger;

use crate::authentication::middleware::require_authentication;
use crate::configuration::DatabaseSettings;
use crate::configuration::Settings;
use crate::routes::catalog_categories_pattern;
use crate::routes::create_product;
use crate::routes::delete_product;
use crate::routes::delete_user;
use crate::routes::health_check;
use crate::routes::list_orders;
use crate::routes::list_products;
use crate::routes::list_users;
use crate::routes::login;
use crate::routes::save_banking_details;
use crate::routes::save_order;
use crate::routes::signup;
use crate::routes::update_product;
use crate::routes::update_user;
use crate::store::postgres::PgDocumentStore;
use crate::store::DocumentStore;

/// Wrapper for actix's `Server` with access to the bound port. Not to be
/// confused with actix's `App`!
pub struct Application {
    /// Left private; use `get_port` to access
    port: u16,
    /// Contains the TCP listener (randomised port) and the injected store
    /// handle
    server: Server,
}

impl Application {
    /// Wrapper over `startup::run` that builds a `Server` against the
    /// Postgres-backed store.
    pub async fn build(cfg: Settings) -> Result<Self, anyhow::Error> {
        let store = PgDocumentStore::new(get_connection_pool(&cfg.database));
        Self::with_store(cfg, Arc::new(store)).await
    }

    /// Same, but with the store chosen by the caller. This is the seam the
    /// API tests use to run against the in-memory store.
    pub async fn with_store(
        cfg: Settings,
        store: Arc<dyn DocumentStore>,
    ) -> Result<Self, anyhow::Error> {
        let addr = format!("{}:{}", cfg.application.host, cfg.application.port);
        let listener = TcpListener::bind(addr)?;

        // get the port assigned by the OS (configured port 0 means "any");
        // this will be saved in the `port` field
        let port = listener.local_addr()?.port();

        let server = run(listener, store)?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 { self.port }

    /// Because this consumes `self`, this should be the final function call
    /// (or passed to `tokio::spawn`)
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> { self.server.await }
}

/// `connect_lazy_with` only connects when the pool is used for the first
/// time. This allows store-free requests (e.g. health_check) to avoid
/// touching the db; attempting a store call when the db is -not- reachable
/// surfaces as HTTP 500.
pub fn get_connection_pool(db_cfg: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new().connect_lazy_with(db_cfg.connection())
}

/// The server is not responsible for binding to an address, it only listens
/// to an already bound address.
///
/// Declares all API endpoints: the one canonical route table. The nine
/// catalog categories share one parameterised resource rather than nine
/// pasted blocks, so a new category is a one-line change in
/// `CATALOG_CATEGORIES`.
pub fn run(
    listener: TcpListener,
    store: Arc<dyn DocumentStore>,
) -> Result<Server, anyhow::Error> {
    // `Data::from` keeps the trait object intact; `Data::new` would wrap the
    // Arc in another Arc
    let store: web::Data<dyn DocumentStore> = web::Data::from(store);

    // matches exactly the nine category collections; anything else is 404
    let catalog = catalog_categories_pattern();

    // note the closure: `actix-web` spins up a worker per core, each running
    // its own copy of the `App`, which is why everything moved in must be
    // cloneable
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default()) // wrap the whole app in tracing middleware
            .route("/health_check", web::get().to(health_check))
            .route("/signup", web::post().to(signup))
            .route("/login", web::post().to(login))
            // catalog CRUD; open, like the shelves of a shop
            .route(
                &format!("/{{collection:{catalog}}}"),
                web::get().to(list_products),
            )
            .route(
                &format!("/{{collection:{catalog}}}"),
                web::post().to(create_product),
            )
            .route(
                &format!("/{{collection:{catalog}}}/{{id}}"),
                web::put().to(update_product),
            )
            .route(
                &format!("/{{collection:{catalog}}}/{{id}}"),
                web::delete().to(delete_product),
            )
            .route("/api/userBankingDetails", web::post().to(save_banking_details))
            .route("/api/orders", web::post().to(save_order))
            .route("/api/orders/{email}", web::get().to(list_orders))
            // user management re-authenticates on every request; the gate
            // attaches the resolved user to the request for any handler that
            // wants it
            .service(
                web::scope("/users")
                    .wrap(from_fn(require_authentication))
                    .route("", web::get().to(list_users))
                    .route("/{id}", web::put().to(update_user))
                    .route("/{id}", web::delete().to(delete_user)),
            )
            .app_data(store.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
