#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::Router;
    use iis_web::api;
    use iis_web::app::{shell, App};
    use iis_web::cms::client::{ContentClient, SanityClient};
    use iis_web::config::SiteConfig;
    use iis_web::preview;
    use iis_web::state::AppState;
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use std::sync::Arc;
    use tower::ServiceBuilder;
    use tower_http::services::ServeDir;
    use tower_http::trace::TraceLayer;

    // Local development reads a .env file; deployments set real variables.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "iis_web=info,tower_http=info".into()),
        )
        .init();

    tracing::info!("Starting IIS web server...");

    let conf = get_configuration(None)?;
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let site_root = leptos_options.site_root.to_string();

    let site_config = SiteConfig::from_env()?;
    if !site_config.has_project_id() {
        tracing::warn!("SANITY_PROJECT_ID is not set; content reads will fail");
    }
    if site_config.preview_secret().is_none() {
        tracing::warn!("PREVIEW_SECRET_TOKEN is not set; preview links are disabled");
    }
    tracing::info!(
        project = %site_config.sanity_project_id,
        dataset = %site_config.sanity_dataset,
        "Content store configured"
    );

    let content_client: Arc<dyn ContentClient> = Arc::new(SanityClient::new(site_config.clone()));
    let app_state = AppState::new(content_client, site_config, leptos_options.clone());

    let routes = generate_route_list(App);

    let app = Router::new()
        .merge(preview::handlers::routes())
        .merge(api::cms::routes())
        .merge(api::health::routes())
        .merge(api::metrics::routes())
        .leptos_routes_with_context(
            &app_state,
            routes,
            {
                let app_state = app_state.clone();
                move || provide_context(app_state.clone())
            },
            {
                let leptos_options = leptos_options.clone();
                move || shell(leptos_options.clone())
            },
        )
        .fallback_service(ServeDir::new(&site_root))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(app_state);

    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

// The client bundle has no entry point of its own; see lib.rs::hydrate().
#[cfg(not(feature = "ssr"))]
fn main() {}
