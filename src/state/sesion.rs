use super::bloquear;
use crate::error::ApiError;
use crate::models::{Rol, SesionActiva, Tokens};
use std::sync::Mutex;

#[derive(Default)]
pub struct SesionState {
    pub sesion: Mutex<Option<SesionActiva>>,
}

impl SesionState {
    pub fn actual(&self) -> Result<Option<SesionActiva>, ApiError> {
        Ok(bloquear(&self.sesion)?.clone())
    }

    pub fn establecer(&self, sesion: SesionActiva) -> Result<(), ApiError> {
        *bloquear(&self.sesion)? = Some(sesion);
        Ok(())
    }

    pub fn limpiar(&self) -> Result<(), ApiError> {
        *bloquear(&self.sesion)? = None;
        Ok(())
    }

    pub fn tokens(&self) -> Result<Option<Tokens>, ApiError> {
        Ok(bloquear(&self.sesion)?.as_ref().map(|s| s.tokens.clone()))
    }

    /// Reemplaza los tokens y devuelve la sesión resultante para persistirla
    pub fn actualizar_tokens(&self, tokens: Tokens) -> Result<Option<SesionActiva>, ApiError> {
        let mut guard = bloquear(&self.sesion)?;
        if let Some(sesion) = guard.as_mut() {
            sesion.tokens = tokens;
        }
        Ok(guard.clone())
    }

    pub fn requerir(&self) -> Result<SesionActiva, ApiError> {
        self.actual()?.ok_or(ApiError::SinSesion)
    }

    /// Exige sesión con un rol que cumpla `permiso`
    pub fn requerir_permiso(
        &self,
        permiso: fn(&Rol) -> bool,
        accion: &str,
    ) -> Result<SesionActiva, ApiError> {
        let sesion = self.requerir()?;
        if !permiso(&sesion.usuario.rol) {
            return Err(ApiError::Validacion(format!(
                "Su rol no tiene permiso para {}",
                accion
            )));
        }
        Ok(sesion)
    }
}
