//! # Módulo Web — A API do Mapa de Conceitos
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ Cliente (renderizador de grafo / canvas + SSE)               │
//! ├──────────────────────────────────────────────────────────────┤
//! │ Axum Router (este módulo)                                    │
//! │  ├── GET  /status          → JSON: tamanho do mapa           │
//! │  ├── GET  /framework       → JSON: padrões, movimentos       │
//! │  ├── GET  /map             → JSON: mapa cumulativo           │
//! │  ├── POST /map/analyses    → JSON: merge + layout            │
//! │  ├── POST /map/clear       → JSON: mapa vazio                │
//! │  ├── GET  /map/layout      → JSON: LayoutConfig              │
//! │  ├── POST /map/canvas      → JSON: CanvasScene               │
//! │  ├── GET  /map/export      → Markdown / Obsidian             │
//! │  ├── POST /analysis/graph  → JSON: grafo isolado + layout    │
//! │  ├── POST /analysis/canvas → JSON: CanvasScene               │
//! │  └── GET  /events          → SSE stream (MapEvent)           │
//! ├──────────────────────────────────────────────────────────────┤
//! │ CORS permissivo (tower-http)                                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! | Módulo | Responsabilidade |
//! |--------|------------------|
//! | [`state`] | Estado compartilhado (`AppState`) |
//! | [`events`] | Eventos SSE do mapa |
//! | [`handlers`] | Handlers Axum para cada rota |

pub mod events;
pub mod handlers;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use state::AppState;

/// Cria o router Axum com todas as rotas da aplicação.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // ── Metadados ─────────────────────────────────────────
        .route("/status", get(handlers::status))
        .route("/framework", get(handlers::framework))
        // ── Mapa cumulativo ──────────────────────────────────
        .route("/map", get(handlers::get_map))
        .route("/map/analyses", post(handlers::merge_analysis))
        .route("/map/clear", post(handlers::clear_map))
        .route("/map/layout", get(handlers::map_layout))
        .route("/map/canvas", post(handlers::map_canvas))
        .route("/map/export", get(handlers::export_map))
        // ── Análise isolada ──────────────────────────────────
        .route("/analysis/graph", post(handlers::analysis_graph))
        .route("/analysis/canvas", post(handlers::analysis_canvas))
        // ── SSE ──────────────────────────────────────────────
        .route("/events", get(handlers::sse_events))
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
        .with_state(state)
}
