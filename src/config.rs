//! Configuración del cliente.
//!
//! Prioridad: variables de entorno, luego la tabla `config` de la base local,
//! luego valores por defecto.

use crate::db::Database;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

pub const API_URL_POR_DEFECTO: &str = "http://localhost:8000";
pub const TIMEOUT_POR_DEFECTO: u64 = 30;
pub const PAGE_SIZE_POR_DEFECTO: i64 = 20;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub timeout_secs: u64,
    /// Sede elegida (solo la usa el super admin)
    pub sede_id: Option<i64>,
    pub page_size: i64,
    pub db_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: API_URL_POR_DEFECTO.to_string(),
            timeout_secs: TIMEOUT_POR_DEFECTO,
            sede_id: None,
            page_size: PAGE_SIZE_POR_DEFECTO,
            db_path: crate::db::ruta_por_defecto(),
        }
    }
}

impl Config {
    /// Ruta de la base local: `SALON_DB_PATH` o la ruta por defecto
    pub fn ruta_db() -> PathBuf {
        env::var("SALON_DB_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(crate::db::ruta_por_defecto)
    }

    /// Carga la configuración combinando entorno y base local
    pub fn cargar(db: &Database) -> Result<Self, ApiError> {
        let local = db.obtener_config()?;
        let entorno: HashMap<String, String> = [
            ("api_url", "SALON_API_URL"),
            ("timeout_secs", "SALON_TIMEOUT_SECS"),
            ("sede_id", "SALON_SEDE_ID"),
            ("page_size", "SALON_PAGE_SIZE"),
        ]
        .into_iter()
        .filter_map(|(clave, var)| env::var(var).ok().map(|v| (clave.to_string(), v)))
        .collect();

        let mut config = Self::desde_fuentes(&entorno, &local)?;
        config.db_path = Self::ruta_db();
        Ok(config)
    }

    /// Combina dos fuentes clave/valor; `entorno` gana sobre `local`
    pub fn desde_fuentes(
        entorno: &HashMap<String, String>,
        local: &HashMap<String, String>,
    ) -> Result<Self, ApiError> {
        let valor = |clave: &str| -> Option<String> {
            entorno
                .get(clave)
                .or_else(|| local.get(clave))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Config::default();

        if let Some(url) = valor("api_url") {
            config.api_url = url.trim_end_matches('/').to_string();
        }

        if let Some(t) = valor("timeout_secs") {
            let timeout: u64 = t
                .parse()
                .map_err(|_| ApiError::Validacion(format!("timeout_secs inválido: {}", t)))?;
            if timeout == 0 {
                return Err(ApiError::Validacion(
                    "timeout_secs debe ser mayor a cero".to_string(),
                ));
            }
            config.timeout_secs = timeout;
        }

        if let Some(s) = valor("sede_id") {
            let sede: i64 = s
                .parse()
                .map_err(|_| ApiError::Validacion(format!("sede_id inválido: {}", s)))?;
            config.sede_id = Some(sede);
        }

        if let Some(p) = valor("page_size") {
            let page_size: i64 = p
                .parse()
                .ok()
                .filter(|n: &i64| *n > 0)
                .ok_or_else(|| ApiError::Validacion(format!("page_size inválido: {}", p)))?;
            config.page_size = page_size;
        }

        Ok(config)
    }
}
