use crate::api::Transport;
use crate::error::ApiError;
use crate::models::{Credenciales, SesionActiva, Tokens};
use crate::AppState;
use tracing::info;

/// Autentica contra el backend y persiste los tokens
pub async fn iniciar_sesion<T: Transport>(
    app: &AppState<T>,
    email: String,
    password: String,
) -> Result<SesionActiva, String> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || password.is_empty() {
        return Err(ApiError::Validacion("Ingrese correo y contraseña".to_string()).into());
    }

    let resp = app.api.login(&Credenciales { email, password }).await?;

    if !resp.usuario.activo {
        return Err("El usuario está desactivado".to_string());
    }

    let sesion = SesionActiva {
        usuario: resp.usuario,
        tokens: Tokens {
            access_token: resp.access_token,
            refresh_token: resp.refresh_token,
        },
    };

    // Otro usuario no hereda carrito, caja ni pendientes
    let anterior = app.sesion.actual()?.map(|s| s.usuario.id);
    if anterior != Some(sesion.usuario.id) {
        app.api.cache().limpiar()?;
    }

    app.db.guardar_sesion(&sesion)?;
    app.sesion.establecer(sesion.clone())?;
    info!(usuario_id = sesion.usuario.id, rol = ?sesion.usuario.rol, "sesión iniciada");

    Ok(sesion)
}

/// Cierra la sesión y descarta todo el estado local ligado a ella
pub fn cerrar_sesion<T: Transport>(app: &AppState<T>) -> Result<(), String> {
    app.api.descartar_sesion()?;
    info!("sesión cerrada");
    Ok(())
}

pub fn obtener_sesion_actual<T: Transport>(app: &AppState<T>) -> Result<Option<SesionActiva>, String> {
    Ok(app.sesion.actual()?)
}

/// Recupera la sesión guardada en la base local (al arrancar)
pub fn restaurar_sesion<T: Transport>(app: &AppState<T>) -> Result<Option<SesionActiva>, String> {
    let guardada = app.db.cargar_sesion()?;
    if let Some(sesion) = &guardada {
        app.sesion.establecer(sesion.clone())?;
        info!(usuario_id = sesion.usuario.id, "sesión restaurada");
    }
    Ok(guardada)
}
