use crate::error::StackTrace;
use crate::handler::{AppModule, CatalogModule, Handler};
use crate::route::{AuthorRouter, BookRouter};
use driver::database::{MemoryDatabase, PostgresDatabase};
use error_stack::ResultExt;
use kernel::KernelError;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

mod controller;
mod error;
mod handler;
mod request;
mod response;
mod route;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

static POSTGRES_URL: &str = "POSTGRES_URL";
static SERVER_PORT: &str = "SERVER_PORT";
const DEFAULT_PORT: u16 = 8080;

#[tokio::main]
async fn main() -> Result<(), StackTrace> {
    let appender = tracing_appender::rolling::daily(std::path::Path::new("./logs/"), "debug.log");
    let (non_blocking_appender, _guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_filter(tracing_subscriber::EnvFilter::new(
                    std::env::var("RUST_LOG").unwrap_or_else(|_| {
                        "driver=debug,server=debug,tower_http=debug,hyper=debug,sqlx=debug".into()
                    }),
                ))
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_writer(non_blocking_appender)
                .with_ansi(false)
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .init();

    let port = match dotenvy::var(SERVER_PORT) {
        Ok(port) => port
            .parse()
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable_lazy(|| format!("{SERVER_PORT} is not a port: {port}"))?,
        Err(_) => DEFAULT_PORT,
    };
    let bind = SocketAddr::from(([0, 0, 0, 0], port));

    match dotenvy::var(POSTGRES_URL) {
        Ok(url) => {
            let database = PostgresDatabase::connect(&url).await?;
            tracing::info!("serving catalog from postgres");
            serve(AppModule::new(Handler::new(database)), bind).await?;
        }
        Err(_) => {
            tracing::warn!("{POSTGRES_URL} is not set, serving catalog from memory");
            serve(AppModule::new(Handler::new(MemoryDatabase::new())), bind).await?;
        }
    }

    Ok(())
}

async fn serve<H: CatalogModule>(
    app: AppModule<H>,
    bind: SocketAddr,
) -> error_stack::Result<(), KernelError> {
    let router = axum::Router::<AppModule<H>>::new()
        .route_book()
        .route_author()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new())
        .with_state(app);

    let tcp = TcpListener::bind(bind)
        .await
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| "Failed to listen tcp")?;
    tracing::info!("listening on {bind}");

    axum::serve(tcp, router.into_make_service())
        .await
        .change_context_lazy(|| KernelError::Internal)?;

    Ok(())
}
