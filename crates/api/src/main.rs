#[tokio::main]
async fn main() {
    shoplite_observability::init();

    let config = shoplite_api::config::AppConfig::from_env().expect("invalid configuration");

    let app = shoplite_api::app::build_app(&config)
        .await
        .expect("failed to build application");

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("failed to bind listen address");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
