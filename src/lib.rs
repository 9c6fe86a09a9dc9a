pub mod api;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod state;
pub mod utils;

use api::{ApiClient, HttpTransport, Transport};
use config::Config;
use db::Database;
use error::ApiError;
use state::{CacheLocal, CajaState, CarritoState, FacturaState, PendientesState, SesionState};
use std::sync::{Arc, Mutex};
use tracing::info;

/// Estado compartido por todos los comandos
pub struct AppState<T: Transport> {
    pub db: Arc<Database>,
    pub sesion: Arc<SesionState>,
    pub config: Mutex<Config>,
    pub api: ApiClient<T>,
    pub caja: Arc<CajaState>,
    pub carrito: Arc<CarritoState>,
    pub facturas: Arc<FacturaState>,
    pub pendientes: Arc<PendientesState>,
}

impl AppState<HttpTransport> {
    /// Arranque normal: logs, base local, configuración, transporte HTTP y
    /// sesión persistida.
    pub fn iniciar() -> Result<Self, String> {
        logging::init("info");

        let db = Database::new(&Config::ruta_db())?;
        let config = Config::cargar(&db)?;
        let transport = HttpTransport::new(&config.api_url, config.timeout_secs)?;
        info!(api_url = %transport.base_url(), timeout_secs = config.timeout_secs, "cliente inicializado");

        let app = AppState::con_transporte(db, config, transport);
        commands::sesion::restaurar_sesion(&app)?;
        Ok(app)
    }
}

impl<T: Transport> AppState<T> {
    pub fn con_transporte(db: Database, config: Config, transport: T) -> Self {
        let db = Arc::new(db);
        let sesion = Arc::new(SesionState::default());
        let cache = CacheLocal::new(config.page_size);
        AppState {
            caja: cache.caja.clone(),
            carrito: cache.carrito.clone(),
            facturas: cache.facturas.clone(),
            pendientes: cache.pendientes.clone(),
            api: ApiClient::new(transport, sesion.clone(), db.clone(), cache),
            db,
            sesion,
            config: Mutex::new(config),
        }
    }

    pub fn config(&self) -> Result<Config, ApiError> {
        Ok(state::bloquear(&self.config)?.clone())
    }

    /// Sede sobre la que opera la sesión actual
    pub fn sede_actual(&self) -> Result<Option<i64>, ApiError> {
        let sesion = self.sesion.requerir()?;
        let sede_config = self.config()?.sede_id;
        Ok(sesion.sede_efectiva(sede_config))
    }

    pub fn page_size(&self) -> Result<i64, ApiError> {
        Ok(self.config()?.page_size)
    }
}
