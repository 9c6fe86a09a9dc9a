use crate::api::Transport;
use crate::error::ApiError;
use crate::models::{agrupar_pendientes, Carrito, ClienteRef, FacturaPendienteResumen, Rol};
use crate::AppState;
use tracing::info;

/// Servicios sin facturar de la sede, agrupados por cliente
pub async fn listar_pendientes<T: Transport>(
    app: &AppState<T>,
) -> Result<Vec<FacturaPendienteResumen>, String> {
    app.sesion
        .requerir_permiso(Rol::puede_operar_caja, "consultar pendientes")?;
    let sede_id = app.sede_actual()?;

    let registros = app.api.servicios_pendientes(sede_id).await?;
    let resumenes = agrupar_pendientes(registros);
    app.pendientes.establecer(resumenes.clone())?;
    Ok(resumenes)
}

/// Reemplaza el carrito por los pendientes del cliente
pub fn cargar_pendientes_en_carrito<T: Transport>(
    app: &AppState<T>,
    cliente_id: i64,
) -> Result<Carrito, String> {
    let resumen = app.pendientes.de_cliente(cliente_id)?.ok_or_else(|| {
        ApiError::Validacion("El cliente no tiene servicios pendientes".to_string())
    })?;

    app.carrito.modificar(|c| {
        c.limpiar();
        c.set_cliente(ClienteRef {
            id: resumen.cliente_id,
            nombre: resumen.cliente_nombre.clone(),
        });
        for item in resumen.a_items_carrito() {
            c.agregar_item(item)?;
        }
        Ok(())
    })?;

    info!(
        cliente_id,
        servicios = resumen.cantidad_servicios,
        "pendientes cargados al carrito"
    );
    Ok(app.carrito.actual()?)
}
