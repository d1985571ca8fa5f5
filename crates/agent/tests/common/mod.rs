use spindown_api::config::ServerConfig;
use spindown_api::router::build_app_router;
use spindown_api::state::AppState;
use spindown_api::users::UserProfile;

/// Serve a real status registry on an ephemeral port and return its
/// base URL. The server task runs until the test binary exits.
pub async fn spawn_registry() -> String {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        user1: UserProfile {
            name: "User1".into(),
            color: "#3b82f6".into(),
        },
        user2: UserProfile {
            name: "User2".into(),
            color: "#22c55e".into(),
        },
    };
    let state = AppState::new(config.clone());
    let app = build_app_router(state, &config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("registry serve");
    });
    format!("http://{addr}")
}
