use crate::api::Transport;
use crate::models::MetodoPago;
use crate::AppState;

/// Métodos de pago activos
pub async fn listar_metodos_pago<T: Transport>(app: &AppState<T>) -> Result<Vec<MetodoPago>, String> {
    let metodos = app.api.metodos_pago().await?;
    Ok(metodos.into_iter().filter(|m| m.activo).collect())
}
