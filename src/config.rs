//! # Configuração
//!
//! Lida uma vez no `main` a partir de variáveis de ambiente.
//!
//! | Variável | Padrão |
//! |----------|--------|
//! | `DSRP_MAP_ADDR` | `0.0.0.0:3000` |
//! | `DSRP_MAP_PATH` | `data/concept_map.json` |
//!
//! O nível de log é controlado à parte por `RUST_LOG`.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub const ADDR_VAR: &str = "DSRP_MAP_ADDR";
pub const PATH_VAR: &str = "DSRP_MAP_PATH";

const DEFAULT_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_PATH: &str = "data/concept_map.json";

/// Configuração do servidor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Endereço de bind do servidor HTTP.
    pub addr: SocketAddr,
    /// Arquivo JSON do mapa cumulativo.
    pub map_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Monta a configuração a partir de uma função de consulta; valores em
    /// branco contam como ausentes.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let addr_raw = get(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_raw
            .trim()
            .parse::<SocketAddr>()
            .with_context(|| format!("{ADDR_VAR} inválido: {addr_raw}"))?;

        let map_path = get(PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PATH));

        Ok(Config { addr, map_path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.addr, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.map_path, PathBuf::from("data/concept_map.json"));
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            (ADDR_VAR, "127.0.0.1:8080"),
            (PATH_VAR, "/tmp/map.json"),
        ]))
        .unwrap();
        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.map_path, PathBuf::from("/tmp/map.json"));
    }

    /// Valor em branco equivale a não definido
    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup(&[(ADDR_VAR, "  "), (PATH_VAR, "")])).unwrap();
        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.map_path, PathBuf::from(DEFAULT_PATH));
    }

    #[test]
    fn rejects_invalid_address() {
        let err = Config::from_lookup(lookup(&[(ADDR_VAR, "localhost")])).unwrap_err();
        assert!(err.to_string().contains(ADDR_VAR));
    }
}
