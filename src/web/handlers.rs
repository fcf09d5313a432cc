//! # Handlers HTTP — Os Endpoints da Aplicação
//!
//! Cada função pública neste módulo é um handler Axum, mapeado a uma rota em
//! [`super::create_router()`]. Todas as respostas são JSON, exceto
//! `/map/export` (Markdown) e `/events`.
//!
//! | Handler | Método | Rota | Retorno |
//! |---------|--------|------|---------|
//! | `status` | GET | `/status` | tamanho do mapa |
//! | `framework` | GET | `/framework` | padrões, movimentos, dinâmicas |
//! | `get_map` | GET | `/map` | mapa cumulativo |
//! | `merge_analysis` | POST | `/map/analyses` | sumário do merge + layout |
//! | `clear_map` | POST | `/map/clear` | mapa vazio |
//! | `map_layout` | GET | `/map/layout` | configuração de layout |
//! | `map_canvas` | POST | `/map/canvas` | cena do mapa cumulativo |
//! | `export_map` | GET | `/map/export` | documento Markdown / Obsidian |
//! | `analysis_graph` | POST | `/analysis/graph` | grafo de uma análise + layout |
//! | `analysis_canvas` | POST | `/analysis/canvas` | cena de uma análise |
//! | `sse_events` | GET | `/events` | stream de [`MapEvent`] |
//!
//! ## Erros
//!
//! Só a borda HTTP falha: corpo JSON inválido, modo de layout ou formato de
//! exportação desconhecidos viram [`ApiError`] (`400` com `{ "error": ... }`). Payloads de análise
//! malformados são tolerados pelo núcleo.
//!
//! ## Locks
//!
//! O mapa fica travado durante todo o merge e durante a gravação no store:
//! a ordem das gravações em disco é a ordem das mutações. Os eventos são
//! publicados depois que o lock é liberado.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures_util::stream::StreamExt;
use serde::{Deserialize, Serialize};
use tokio_stream::wrappers::BroadcastStream;

use super::state::AppState;
use crate::canvas::CanvasScene;
use crate::core::{AnalysisResult, ConceptMap, Dynamic, Move, Pattern};
use crate::export::{self, ExportFormat, UnknownExportFormat};
use crate::extraction;
use crate::layout::{select_layout, LayoutConfig, LayoutMode, UnknownLayoutMode};
use crate::merger::{self, MergeOutcome};
use crate::web::events::MapEvent;

/// Erros da borda HTTP.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("corpo inválido: {0}")]
    InvalidBody(String),

    #[error("consulta inválida: {0}")]
    InvalidQuery(String),

    #[error(transparent)]
    UnknownMode(#[from] UnknownLayoutMode),

    #[error(transparent)]
    UnknownFormat(#[from] UnknownExportFormat),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidQuery(rejection.body_text())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "Requisição rejeitada");
        let body = ErrorBody {
            error: self.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

// ─── Corpos de requisição e resposta ─────────────────────────────

/// Corpo de `/map/analyses`, `/analysis/graph` e `/analysis/canvas`.
#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    /// Label do conceito analisado.
    pub concept: String,
    pub result: AnalysisResult,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StatusResponse {
    pub nodes: usize,
    pub edges: usize,
}

/// Resposta de `/map/analyses`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeResponse {
    pub outcome: MergeOutcome,
    pub related_concepts: Vec<String>,
    pub layout: LayoutConfig,
}

/// Resposta de `/analysis/graph`.
#[derive(Debug, Serialize)]
pub struct GraphResponse {
    pub map: ConceptMap,
    pub layout: LayoutConfig,
}

#[derive(Debug, Deserialize)]
pub struct LayoutQuery {
    #[serde(rename = "move")]
    pub move_id: Option<String>,
    pub mode: Option<String>,
    pub nodes: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
}

// ─── Metadados do framework ─────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PatternInfo {
    pub letter: &'static str,
    pub name: &'static str,
    pub elements: [&'static str; 2],
    pub description: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MoveInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub pattern: Pattern,
    pub description: &'static str,
    pub question: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DynamicInfo {
    pub symbol: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Resposta de `/framework`.
#[derive(Debug, Serialize)]
pub struct FrameworkInfo {
    pub patterns: Vec<PatternInfo>,
    pub moves: Vec<MoveInfo>,
    pub dynamics: Vec<DynamicInfo>,
}

impl FrameworkInfo {
    fn build() -> Self {
        let patterns = Pattern::ALL
            .iter()
            .map(|p| PatternInfo {
                letter: p.letter(),
                name: p.name(),
                elements: p.elements(),
                description: p.description(),
                color: p.color(),
            })
            .collect();
        let moves = Move::ALL
            .iter()
            .map(|m| MoveInfo {
                id: m.id(),
                name: m.name(),
                pattern: m.pattern(),
                description: m.description(),
                question: m.question(),
            })
            .collect();
        let dynamics = Dynamic::ALL
            .iter()
            .map(|d| DynamicInfo {
                symbol: d.symbol(),
                name: d.name(),
                description: d.description(),
            })
            .collect();
        FrameworkInfo {
            patterns,
            moves,
            dynamics,
        }
    }
}

// ─── Handlers ───────────────────────────────────────────────────

/// GET `/status` — tamanho atual do mapa cumulativo.
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let map = state.map.lock();
    Json(StatusResponse {
        nodes: map.node_count(),
        edges: map.edge_count(),
    })
}

/// GET `/framework`
pub async fn framework() -> Json<FrameworkInfo> {
    Json(FrameworkInfo::build())
}

/// GET `/map`
pub async fn get_map(State(state): State<AppState>) -> Json<ConceptMap> {
    Json(state.map.lock().clone())
}

/// POST `/map/analyses` — incorpora uma análise ao mapa cumulativo.
///
/// ```text
/// 1. lock → merge → salva → snapshot → unlock
/// 2. publica NodeAdded*/EdgeAdded*/AnalysisMerged
/// 3. responde com o sumário e o layout do mapa cumulativo
/// ```
pub async fn merge_analysis(
    State(state): State<AppState>,
    body: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<MergeResponse>, ApiError> {
    let Json(request) = body?;

    let (outcome, snapshot) = {
        let mut map = state.map.lock();
        let outcome = merger::merge(&mut map, &request.concept, &request.result);
        if !outcome.is_noop() {
            state.persist(&map);
        }
        (outcome, map.clone())
    };

    tracing::info!(
        concept = %request.concept,
        move_id = %request.result.move_id,
        new_nodes = outcome.added_nodes.len(),
        new_edges = outcome.added_edges.len(),
        "Análise incorporada ao mapa"
    );

    state.publish(MapEvent::from_merge(&snapshot, &request.result.move_id, &outcome));

    let layout = select_layout(
        request.result.move_kind(),
        snapshot.node_count(),
        LayoutMode::CumulativeMap,
    );
    Ok(Json(MergeResponse {
        related_concepts: extraction::related_concepts(&request.concept, &request.result),
        outcome,
        layout,
    }))
}

/// POST `/map/clear` — reseta o mapa cumulativo.
pub async fn clear_map(State(state): State<AppState>) -> Json<ConceptMap> {
    let snapshot = {
        let mut map = state.map.lock();
        map.clear();
        state.persist(&map);
        map.clone()
    };
    tracing::info!("Mapa resetado");
    state.publish([MapEvent::cleared()]);
    Json(snapshot)
}

/// GET `/map/layout?move=&mode=&nodes=`
///
/// `mode` padrão é `cumulative-map`; `nodes` padrão é o tamanho atual do
/// mapa. Movimento ausente ou desconhecido cai no layout padrão.
pub async fn map_layout(
    State(state): State<AppState>,
    query: Result<Query<LayoutQuery>, QueryRejection>,
) -> Result<Json<LayoutConfig>, ApiError> {
    let Query(query) = query?;
    let mode = match query.mode.as_deref() {
        Some(raw) => raw.parse::<LayoutMode>()?,
        None => LayoutMode::CumulativeMap,
    };
    let node_count = query.nodes.unwrap_or_else(|| state.map.lock().node_count());
    let move_kind = query.move_id.as_deref().and_then(Move::from_id);
    let layout = select_layout(move_kind, node_count, mode);
    tracing::debug!(mode = %mode, node_count, kind = layout.kind(), "Layout selecionado");
    Ok(Json(layout))
}

/// POST `/map/canvas` — cena do mapa cumulativo.
pub async fn map_canvas(State(state): State<AppState>) -> Json<CanvasScene> {
    let snapshot = state.map.lock().clone();
    Json(CanvasScene::from_map(&snapshot))
}

/// GET `/map/export?format=markdown|obsidian` — mapa cumulativo como Markdown.
///
/// `format` padrão é `markdown`.
pub async fn export_map(
    State(state): State<AppState>,
    query: Result<Query<ExportQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let format = match query.format.as_deref() {
        Some(raw) => raw.parse::<ExportFormat>()?,
        None => ExportFormat::Markdown,
    };
    let snapshot = state.map.lock().clone();
    let document = export::render(&snapshot, format);
    Ok((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        document,
    )
        .into_response())
}

/// POST `/analysis/graph` — grafo de uma análise isolada; não toca o mapa
/// cumulativo.
pub async fn analysis_graph(
    body: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<GraphResponse>, ApiError> {
    let Json(request) = body?;
    let map = merger::single_analysis(&request.concept, &request.result);
    let layout = select_layout(
        request.result.move_kind(),
        map.node_count(),
        LayoutMode::SingleAnalysis,
    );
    Ok(Json(GraphResponse { map, layout }))
}

/// POST `/analysis/canvas` — cena de uma análise isolada.
pub async fn analysis_canvas(
    body: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<CanvasScene>, ApiError> {
    let Json(request) = body?;
    Ok(Json(CanvasScene::from_analysis(&request.concept, &request.result)))
}

/// GET `/events` — Stream SSE das mudanças do mapa.
///
/// Keep-alive a cada 15s. Assinantes atrasados perdem as mensagens
/// descartadas pelo canal.
pub async fn sse_events(
    State(state): State<AppState>,
) -> Sse<impl futures_util::Stream<Item = Result<SseEvent, Infallible>>> {
    let rx = state.events_tx.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|result| async move {
        match result {
            Ok(event) => {
                let data = serde_json::to_string(&event).ok()?;
                Some(Ok(SseEvent::default().data(data)))
            }
            Err(_) => None,
        }
    });
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}
