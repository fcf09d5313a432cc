//! # Estado da Aplicação Web
//!
//! ```text
//! AppState
//!  ├── map       Arc<Mutex<ConceptMap>>    escritor único por merge/clear
//!  ├── store     Arc<dyn MapStore>         salva o mapa após cada mutação, com o lock mantido
//!  └── events_tx Arc<broadcast::Sender>    eventos SSE, publicados fora do lock
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;

use crate::core::ConceptMap;
use crate::persistence::MapStore;
use crate::web::events::MapEvent;

/// Capacidade do canal de eventos; assinantes lentos perdem os mais antigos.
pub const EVENT_CAPACITY: usize = 256;

/// Estado compartilhado da aplicação Axum.
#[derive(Clone)]
pub struct AppState {
    /// Mapa cumulativo. O lock é mantido durante todo o merge.
    pub map: Arc<Mutex<ConceptMap>>,
    pub store: Arc<dyn MapStore>,
    pub events_tx: Arc<broadcast::Sender<MapEvent>>,
}

impl AppState {
    pub fn new(map: ConceptMap, store: Arc<dyn MapStore>) -> Self {
        let (events_tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            map: Arc::new(Mutex::new(map)),
            store,
            events_tx: Arc::new(events_tx),
        }
    }

    /// Salva o mapa no store; falhas são registradas, não propagadas.
    ///
    /// Chamado com o lock do mapa mantido.
    pub fn persist(&self, snapshot: &ConceptMap) {
        if let Err(e) = self.store.save(snapshot) {
            tracing::error!(error = %e, "Falha ao salvar o mapa");
        }
    }

    /// Publica eventos; sem assinantes, são descartados.
    pub fn publish(&self, events: impl IntoIterator<Item = MapEvent>) {
        for event in events {
            let _ = self.events_tx.send(event);
        }
    }
}
