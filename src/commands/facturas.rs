use crate::api::Transport;
use crate::error::ApiError;
use crate::models::{
    EstadoFactura, Factura, FacturaCreate, FacturaUpdate, FiltrosFactura, PagoFactura, Pagina, Rol,
};
use crate::utils::redondear;
use crate::AppState;
use tracing::{info, warn};

/// Factura el carrito actual.
///
/// Si el backend la acepta, el carrito se vacía y la factura entra al
/// listado. Si falla, el carrito queda intacto para reintentar a mano.
pub async fn facturar<T: Transport>(
    app: &AppState<T>,
    pagos: Vec<PagoFactura>,
    observacion: Option<String>,
) -> Result<Factura, String> {
    app.sesion
        .requerir_permiso(Rol::puede_operar_caja, "facturar")?;

    let carrito = app.carrito.actual()?;
    let cliente = carrito
        .cliente
        .clone()
        .ok_or_else(|| ApiError::Validacion("Seleccione un cliente".to_string()))?;
    if carrito.esta_vacio() {
        return Err(ApiError::Validacion("El carrito está vacío".to_string()).into());
    }

    // Verificar que haya caja abierta
    let caja = app.caja.requerir_abierta()?;

    if pagos.iter().any(|p| !p.monto.is_finite() || p.monto <= 0.0) {
        return Err(
            ApiError::Validacion("Cada pago debe ser mayor a cero".to_string()).into(),
        );
    }

    let totales = carrito.totales();
    if !pagos.is_empty() {
        let pagado = redondear(pagos.iter().map(|p| p.monto).sum());
        if pagado + 0.01 < totales.total_a_pagar {
            return Err(ApiError::Validacion(format!(
                "Los pagos ({:.2}) no cubren el total a pagar ({:.2})",
                pagado, totales.total_a_pagar
            ))
            .into());
        }
    }

    let datos = FacturaCreate {
        cliente_id: cliente.id,
        sede_id: app.sede_actual()?,
        caja_id: caja.id,
        items: carrito.items.iter().map(|i| i.a_factura_item()).collect(),
        pagos,
        abono_id: carrito.abono_aplicado.as_ref().map(|a| a.abono_id),
        monto_abono: carrito.abono_aplicado.as_ref().map(|a| a.monto),
        observacion: observacion
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty()),
    };

    let factura = match app.api.crear_factura(&datos).await {
        Ok(f) => f,
        Err(e) => {
            warn!(cliente_id = cliente.id, error = %e, "no se pudo facturar, el carrito se conserva");
            return Err(e.into());
        }
    };

    app.carrito.modificar(|c| {
        c.descontar_facturado(&carrito);
        Ok(())
    })?;
    app.pendientes
        .quitar_registros(&carrito.pendientes_vinculados())?;
    app.facturas.insertar_al_inicio(factura.clone())?;

    info!(
        factura_id = factura.id,
        numero = %factura.numero_factura,
        total = factura.total,
        "factura creada"
    );
    Ok(factura)
}

pub async fn listar_facturas<T: Transport>(
    app: &AppState<T>,
    filtros: FiltrosFactura,
    page: i64,
) -> Result<Pagina<Factura>, String> {
    app.sesion.requerir()?;
    let page_size = app.page_size()?;
    let pagina = app
        .api
        .listar_facturas(&filtros, page.max(1), page_size)
        .await?;
    app.facturas.establecer(filtros, pagina.clone())?;
    Ok(pagina)
}

/// Avanza una página con los filtros vigentes; en la última no hace nada
pub async fn pagina_siguiente<T: Transport>(app: &AppState<T>) -> Result<Pagina<Factura>, String> {
    let actual = app.facturas.pagina()?;
    if !actual.tiene_siguiente() {
        return Ok(actual);
    }
    let filtros = app.facturas.filtros()?;
    listar_facturas(app, filtros, actual.page + 1).await
}

/// Retrocede una página; en la primera no hace nada
pub async fn pagina_anterior<T: Transport>(app: &AppState<T>) -> Result<Pagina<Factura>, String> {
    let actual = app.facturas.pagina()?;
    if !actual.tiene_anterior() {
        return Ok(actual);
    }
    let filtros = app.facturas.filtros()?;
    listar_facturas(app, filtros, actual.page - 1).await
}

pub async fn obtener_factura<T: Transport>(app: &AppState<T>, id: i64) -> Result<Factura, String> {
    app.sesion.requerir()?;
    Ok(app.api.obtener_factura(id).await?)
}

/// Estado conocido de la factura: caché si está, si no el backend
async fn estado_factura<T: Transport>(app: &AppState<T>, id: i64) -> Result<EstadoFactura, ApiError> {
    match app.facturas.buscar(id)? {
        Some(f) => Ok(f.estado),
        None => Ok(app.api.obtener_factura(id).await?.estado),
    }
}

/// Solo una factura pendiente admite cambios
pub async fn actualizar_factura<T: Transport>(
    app: &AppState<T>,
    id: i64,
    cambios: FacturaUpdate,
) -> Result<Factura, String> {
    app.sesion
        .requerir_permiso(Rol::puede_operar_caja, "modificar facturas")?;

    let estado = estado_factura(app, id).await?;
    if estado != EstadoFactura::Pendiente {
        return Err(ApiError::Estado(format!(
            "Una factura {} no se puede modificar",
            estado.etiqueta().to_lowercase()
        ))
        .into());
    }
    if let Some(pagos) = &cambios.pagos {
        if pagos.iter().any(|p| !p.monto.is_finite() || p.monto <= 0.0) {
            return Err(
                ApiError::Validacion("Cada pago debe ser mayor a cero".to_string()).into(),
            );
        }
    }

    let factura = app.api.actualizar_factura(id, &cambios).await?;
    app.facturas.reemplazar(factura.clone())?;
    Ok(factura)
}

pub async fn anular_factura<T: Transport>(
    app: &AppState<T>,
    id: i64,
    motivo: String,
) -> Result<Factura, String> {
    app.sesion
        .requerir_permiso(Rol::puede_anular, "anular facturas")?;

    let motivo = motivo.trim().to_string();
    if motivo.is_empty() {
        return Err(ApiError::Validacion("Indique el motivo de la anulación".to_string()).into());
    }

    let estado = estado_factura(app, id).await?;
    if !estado.puede_pasar_a(EstadoFactura::Anulada) {
        return Err(ApiError::Estado("La factura ya está anulada".to_string()).into());
    }

    let factura = app.api.anular_factura(id, &motivo).await?;
    app.facturas.reemplazar(factura.clone())?;
    info!(factura_id = id, "factura anulada");
    Ok(factura)
}
