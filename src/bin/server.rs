use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use panel_packer::Solver;
use panel_packer::types::{Method, PanelSpec, Placement, Region};
use serde::{Deserialize, Serialize};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Largest roof side accepted over HTTP; the fallbacks scan every unit.
const MAX_SIDE: i64 = 1_000_000;

#[derive(Deserialize, Serialize)]
struct PackRequest {
    panel: PanelSpec,
    region: Region,
    #[serde(default)]
    layout: bool,
}

#[derive(Serialize)]
struct PackResponse {
    count: u64,
    method: Method,
    cell_size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    placements: Option<Vec<Placement>>,
}

async fn pack(Json(req): Json<PackRequest>) -> Result<Json<PackResponse>, (StatusCode, String)> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /pack"
    );

    let sides = req.region.extents();
    if sides.iter().any(|&side| side > MAX_SIDE) {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("roof sides must not exceed {MAX_SIDE}"),
        ));
    }

    let solution = Solver::new(req.panel, req.region).solve();
    let placements = if req.layout {
        solution.layout.map(|l| l.placements)
    } else {
        None
    };

    Ok(Json(PackResponse {
        count: solution.count,
        method: solution.method,
        cell_size: solution.cell_size,
        placements,
    }))
}

#[tokio::main]
async fn main() {
    let _sentry = sentry::init((
        std::env::var("SENTRY_DSN").ok(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    ));

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("development.log")
        .expect("failed to open development.log");

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");

    let app = Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/pack", post(pack))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    eprintln!("Listening on {addr}");
    axum::serve(listener, app).await.unwrap();
}
