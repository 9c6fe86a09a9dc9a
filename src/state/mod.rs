//! Estado del cliente: contenedores protegidos por `Mutex`.
//!
//! Ningún lock se mantiene durante un `.await`: se copia lo necesario, se
//! suelta el lock, se llama al backend y se vuelve a bloquear para aplicar
//! el resultado.

pub mod caja;
pub mod carrito;
pub mod facturas;
pub mod pendientes;
pub mod sesion;

pub use caja::CajaState;
pub use carrito::CarritoState;
pub use facturas::FacturaState;
pub use pendientes::PendientesState;
pub use sesion::SesionState;

use crate::error::ApiError;
use std::sync::{Arc, Mutex, MutexGuard};

/// Cachés ligadas al usuario y a su sede. `AppState` y `ApiClient`
/// comparten las mismas instancias: cuando el backend invalida la sesión,
/// el cliente las descarta sin pasar por un comando.
#[derive(Clone)]
pub struct CacheLocal {
    pub caja: Arc<CajaState>,
    pub carrito: Arc<CarritoState>,
    pub facturas: Arc<FacturaState>,
    pub pendientes: Arc<PendientesState>,
}

impl CacheLocal {
    pub fn new(page_size: i64) -> Self {
        CacheLocal {
            caja: Arc::new(CajaState::default()),
            carrito: Arc::new(CarritoState::default()),
            facturas: Arc::new(FacturaState::new(page_size)),
            pendientes: Arc::new(PendientesState::default()),
        }
    }

    /// Caja, pendientes y facturas pertenecen a una sede
    pub fn limpiar_sede(&self) -> Result<(), ApiError> {
        self.caja.limpiar()?;
        self.pendientes.limpiar()?;
        self.facturas.limpiar()
    }

    pub fn limpiar(&self) -> Result<(), ApiError> {
        self.carrito.limpiar()?;
        self.limpiar_sede()
    }
}

pub(crate) fn bloquear<T>(m: &Mutex<T>) -> Result<MutexGuard<'_, T>, ApiError> {
    m.lock()
        .map_err(|e| ApiError::Estado(format!("Estado interno bloqueado: {}", e)))
}
