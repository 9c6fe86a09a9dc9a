use super::bloquear;
use crate::error::ApiError;
use crate::models::Carrito;
use std::sync::Mutex;

#[derive(Default)]
pub struct CarritoState {
    pub carrito: Mutex<Carrito>,
}

impl CarritoState {
    pub fn actual(&self) -> Result<Carrito, ApiError> {
        Ok(bloquear(&self.carrito)?.clone())
    }

    /// Aplica `f` sobre el carrito. Si `f` falla el carrito queda como estaba.
    pub fn modificar<R>(
        &self,
        f: impl FnOnce(&mut Carrito) -> Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        let mut guard = bloquear(&self.carrito)?;
        let mut copia = guard.clone();
        let r = f(&mut copia)?;
        *guard = copia;
        Ok(r)
    }

    pub fn limpiar(&self) -> Result<(), ApiError> {
        bloquear(&self.carrito)?.limpiar();
        Ok(())
    }
}
