use super::bloquear;
use crate::error::ApiError;
use crate::models::Caja;
use std::sync::Mutex;

/// Caché de la caja de la sede actual (abierta o la última cerrada)
#[derive(Default)]
pub struct CajaState {
    pub caja: Mutex<Option<Caja>>,
}

impl CajaState {
    pub fn actual(&self) -> Result<Option<Caja>, ApiError> {
        Ok(bloquear(&self.caja)?.clone())
    }

    pub fn abierta(&self) -> Result<Option<Caja>, ApiError> {
        Ok(self.actual()?.filter(Caja::esta_abierta))
    }

    /// Caja abierta o error: las operaciones de venta la exigen
    pub fn requerir_abierta(&self) -> Result<Caja, ApiError> {
        match self.actual()? {
            Some(caja) if caja.esta_abierta() => Ok(caja),
            Some(_) => Err(ApiError::Estado(
                "La caja está cerrada; ábrala para continuar".to_string(),
            )),
            None => Err(ApiError::Estado(
                "Debe abrir la caja antes de continuar".to_string(),
            )),
        }
    }

    pub fn establecer(&self, caja: Option<Caja>) -> Result<(), ApiError> {
        *bloquear(&self.caja)? = caja;
        Ok(())
    }

    pub fn limpiar(&self) -> Result<(), ApiError> {
        self.establecer(None)
    }
}
