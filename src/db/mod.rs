pub mod schema;

use crate::error::ApiError;
use crate::models::{SesionActiva, Tokens, Usuario};
use rusqlite::{Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Base local: configuración y tokens de sesión.
/// Los datos de negocio viven en el backend.
pub struct Database {
    pub conn: Mutex<Connection>,
}

impl Database {
    pub fn new(path: &Path) -> Result<Self, ApiError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        Self::con_conexion(conn)
    }

    pub fn en_memoria() -> Result<Self, ApiError> {
        Self::con_conexion(Connection::open_in_memory()?)
    }

    fn con_conexion(conn: Connection) -> Result<Self, ApiError> {
        let db = Database {
            conn: Mutex::new(conn),
        };
        db.run_migrations()?;
        Ok(db)
    }

    fn run_migrations(&self) -> Result<(), ApiError> {
        let conn = self.lock()?;
        schema::create_tables(&conn)?;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, ApiError> {
        self.conn
            .lock()
            .map_err(|e| ApiError::Estado(format!("Base local bloqueada: {}", e)))
    }

    pub fn obtener_config(&self) -> Result<HashMap<String, String>, ApiError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT key, value FROM config")?;
        let config = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<HashMap<_, _>, _>>()?;
        Ok(config)
    }

    pub fn guardar_config(&self, configs: &HashMap<String, String>) -> Result<(), ApiError> {
        let conn = self.lock()?;
        for (key, value) in configs {
            conn.execute(
                "INSERT OR REPLACE INTO config (key, value) VALUES (?1, ?2)",
                rusqlite::params![key, value],
            )?;
        }
        Ok(())
    }

    pub fn guardar_sesion(&self, sesion: &SesionActiva) -> Result<(), ApiError> {
        let usuario_json = serde_json::to_string(&sesion.usuario)?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO sesion (id, access_token, refresh_token, usuario_json, actualizado)
             VALUES (1, ?1, ?2, ?3, datetime('now', 'localtime'))",
            rusqlite::params![
                sesion.tokens.access_token,
                sesion.tokens.refresh_token,
                usuario_json
            ],
        )?;
        Ok(())
    }

    pub fn cargar_sesion(&self) -> Result<Option<SesionActiva>, ApiError> {
        let conn = self.lock()?;
        let fila: Option<(String, String, String)> = conn
            .query_row(
                "SELECT access_token, refresh_token, usuario_json FROM sesion WHERE id = 1",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;

        match fila {
            Some((access_token, refresh_token, usuario_json)) => {
                let usuario: Usuario = serde_json::from_str(&usuario_json)?;
                Ok(Some(SesionActiva {
                    usuario,
                    tokens: Tokens {
                        access_token,
                        refresh_token,
                    },
                }))
            }
            None => Ok(None),
        }
    }

    pub fn borrar_sesion(&self) -> Result<(), ApiError> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM sesion", [])?;
        Ok(())
    }
}

/// Ruta por defecto de la base local
pub fn ruta_por_defecto() -> PathBuf {
    let mut path = directorio_datos().unwrap_or_else(|| PathBuf::from("."));
    path.push("salon-caja.db");
    path
}

fn directorio_datos() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("LOCALAPPDATA")
            .ok()
            .map(|p| PathBuf::from(p).join("SalonCaja"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .ok()
            .map(|p| PathBuf::from(p).join(".salon-caja"))
    }
}
