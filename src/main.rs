#![allow(rustdoc::broken_intra_doc_links)]
//! # DSRP Concept Map
//!
//! **Ponto de entrada** do servidor que transforma análises DSRP em grafos.
//!
//! Um serviço de raciocínio externo aplica um dos oito movimentos DSRP a um
//! conceito e devolve um `AnalysisResult`. Este servidor converte cada
//! resultado em nós e arestas, acumula tudo em um mapa de conceitos da
//! sessão e escolhe como o cliente deve dispor o grafo.
//!
//! ## Fluxo de Inicialização
//!
//! ```text
//! main()
//!   ├── Configura tracing/logging
//!   ├── Lê Config (DSRP_MAP_ADDR, DSRP_MAP_PATH)
//!   ├── Carrega o mapa do disco (ou cria vazio)
//!   ├── Monta AppState (mapa + store + broadcast SSE) e Router
//!   └── Inicia servidor TCP
//! ```
//!
//! ## Exemplo de Uso
//!
//! ```bash
//! # Executar com logs padrão (info)
//! cargo run
//!
//! # Logs detalhados, outra porta
//! RUST_LOG=debug DSRP_MAP_ADDR=127.0.0.1:8080 cargo run
//! ```

/// Módulo `core` — tipos fundamentais: padrões, movimentos, nós, arestas, mapa.
mod core;

/// Módulo `extraction` — tabela de regras, payload tipado, rótulos e heurística de palavras-chave.
mod extraction;

/// Módulo `identity` — ids determinísticos para deduplicação.
mod identity;

/// Módulo `merger` — incorpora análises ao mapa.
mod merger;

/// Módulo `layout` — seletor de layout.
mod layout;

/// Módulo `canvas` — exportador de cenas para quadro branco.
mod canvas;

/// Módulo `export` — o mapa como Markdown ou Obsidian.
mod export;

/// Módulo `persistence` — armazenamento do mapa em JSON.
mod persistence;

/// Módulo `config` — configuração via variáveis de ambiente.
mod config;

/// Módulo `web` — servidor axum, handlers e SSE.
mod web;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::core::ConceptMap;
use crate::persistence::{JsonFileStore, MapStore};
use crate::web::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG=debug cargo run
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("DSRP Concept Map — Starting...");

    let config = Config::from_env()?;
    let store = JsonFileStore::new(&config.map_path);

    // Arquivo ausente vira mapa vazio; arquivo corrompido também, com aviso.
    let map = match store.load() {
        Ok(map) => {
            tracing::info!(
                nodes = map.node_count(),
                edges = map.edge_count(),
                path = %store.path().display(),
                "Mapa carregado do disco"
            );
            map
        }
        Err(e) => {
            tracing::warn!(error = %e, "Falha ao carregar o mapa, iniciando vazio");
            ConceptMap::new()
        }
    };

    let state = AppState::new(map, Arc::new(store));
    let app = web::create_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Falha ao abrir {}", config.addr))?;
    tracing::info!("Server running at http://{}", config.addr);

    axum::serve(listener, app).await?;

    Ok(())
}
