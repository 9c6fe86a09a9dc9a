use crate::api::Transport;
use crate::config::Config;
use crate::state::bloquear;
use crate::AppState;
use std::collections::HashMap;
use tracing::info;

pub fn obtener_config<T: Transport>(app: &AppState<T>) -> Result<HashMap<String, String>, String> {
    Ok(app.db.obtener_config()?)
}

/// Guarda claves de configuración local. `api_url` y `timeout_secs` se
/// aplican al transporte en el próximo arranque; el resto, de inmediato.
pub fn guardar_config<T: Transport>(
    app: &AppState<T>,
    configs: HashMap<String, String>,
) -> Result<Config, String> {
    // Validar antes de escribir
    let mut combinada = app.db.obtener_config()?;
    combinada.extend(configs.clone());
    Config::desde_fuentes(&HashMap::new(), &combinada)?;

    app.db.guardar_config(&configs)?;
    let nueva = Config::cargar(&app.db)?;

    let anterior = std::mem::replace(&mut *bloquear(&app.config)?, nueva.clone());
    info!(claves = configs.len(), "configuración guardada");

    // Caja, pendientes y facturas en caché son de la sede anterior
    if let Some(sesion) = app.sesion.actual()? {
        if sesion.sede_efectiva(anterior.sede_id) != sesion.sede_efectiva(nueva.sede_id) {
            app.api.cache().limpiar_sede()?;
            info!(sede_id = ?sesion.sede_efectiva(nueva.sede_id), "sede cambiada, cachés descartadas");
        }
    }
    Ok(nueva)
}
