//! # Persistência — Salvamento e Carregamento do Mapa em Disco
//!
//! O núcleo não faz I/O: quem salva e carrega o [`ConceptMap`] é um
//! colaborador que implementa [`MapStore`]. A implementação padrão,
//! [`JsonFileStore`], grava JSON "pretty-printed" em um único arquivo.
//!
//! ## Formato de Armazenamento
//!
//! ```json
//! { "nodes": [ { "id": "cell", "label": "Cell", ... } ], "edges": [ ... ] }
//! ```
//!
//! Os índices internos do mapa não são serializados; são reconstruídos na
//! desserialização, e entradas duplicadas ou arestas órfãs de um arquivo
//! editado à mão são descartadas.
//!
//! ## Atomicidade
//!
//! Cada gravação vai para um arquivo temporário de nome único no mesmo
//! diretório ([`tempfile::NamedTempFile`]) e depois é renomeada sobre o
//! destino. Um crash no meio da escrita deixa o arquivo anterior intacto.
//!
//! As gravações de um mesmo [`JsonFileStore`] são serializadas por um
//! `Mutex`: chamadas concorrentes nunca se intercalam.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use parking_lot::Mutex;
use tempfile::NamedTempFile;

use crate::core::ConceptMap;

/// Colaborador de armazenamento do mapa cumulativo.
pub trait MapStore: Send + Sync {
    /// Carrega o mapa; um armazenamento vazio devolve um mapa vazio.
    fn load(&self) -> Result<ConceptMap>;

    /// Substitui o conteúdo armazenado por `map`.
    fn save(&self, map: &ConceptMap) -> Result<()>;
}

/// Armazena o mapa em um arquivo JSON.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    /// Uma gravação por vez.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Diretório do arquivo; `.` para caminhos relativos sem diretório.
    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl MapStore for JsonFileStore {
    fn load(&self) -> Result<ConceptMap> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "Nenhum mapa salvo, iniciando vazio");
            return Ok(ConceptMap::new());
        }
        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Falha ao ler {}", self.path.display()))?;
        let map: ConceptMap = serde_json::from_str(&json)
            .with_context(|| format!("Falha ao desserializar {}", self.path.display()))?;
        Ok(map)
    }

    fn save(&self, map: &ConceptMap) -> Result<()> {
        let dir = self.dir();
        let json = serde_json::to_vec_pretty(map).context("Falha ao serializar ConceptMap")?;

        let _guard = self.write_lock.lock();
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Falha ao criar diretório {}", dir.display()))?;
        let mut temp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Falha ao criar arquivo temporário em {}", dir.display()))?;
        temp.write_all(&json)
            .with_context(|| format!("Falha ao escrever {}", temp.path().display()))?;
        temp.persist(&self.path)
            .map_err(|e| e.error)
            .with_context(|| format!("Falha ao substituir {}", self.path.display()))?;

        tracing::debug!(
            path = %self.path.display(),
            nodes = map.node_count(),
            edges = map.edge_count(),
            "Mapa salvo"
        );
        Ok(())
    }
}
