use crate::api::Transport;
use crate::error::ApiError;
use crate::models::{
    AbrirCaja, ArqueoCaja, Caja, CerrarCaja, MovimientoCaja, NuevoMovimiento, Pagina, Rol,
    TipoMovimiento,
};
use crate::AppState;
use tracing::info;

fn limpiar_observacion(observacion: Option<String>) -> Option<String> {
    observacion
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
}

/// Consulta la caja abierta de la sede y refresca la caché
pub async fn obtener_caja_abierta<T: Transport>(app: &AppState<T>) -> Result<Option<Caja>, String> {
    app.sesion
        .requerir_permiso(Rol::puede_operar_caja, "consultar la caja")?;
    let sede_id = app.sede_actual()?;

    let caja = app.api.caja_abierta(sede_id).await?;
    app.caja.establecer(caja.clone())?;
    Ok(caja)
}

pub async fn abrir_caja<T: Transport>(
    app: &AppState<T>,
    monto_apertura: f64,
    observacion: Option<String>,
) -> Result<Caja, String> {
    app.sesion
        .requerir_permiso(Rol::puede_operar_caja, "abrir la caja")?;

    if !monto_apertura.is_finite() || monto_apertura < 0.0 {
        return Err(
            ApiError::Validacion("El monto de apertura no puede ser negativo".to_string()).into(),
        );
    }

    // Verificar que no haya caja abierta
    if app.caja.abierta()?.is_some() {
        return Err(
            ApiError::Estado("Ya existe una caja abierta. Ciérrela primero.".to_string()).into(),
        );
    }

    let datos = AbrirCaja {
        sede_id: app.sede_actual()?,
        monto_apertura,
        observacion: limpiar_observacion(observacion),
    };
    let caja = app.api.abrir_caja(&datos).await?;

    app.caja.establecer(Some(caja.clone()))?;
    info!(caja_id = caja.id, sede_id = ?caja.sede_id, monto_apertura, "caja abierta");
    Ok(caja)
}

pub async fn registrar_movimiento<T: Transport>(
    app: &AppState<T>,
    tipo: TipoMovimiento,
    monto: f64,
    concepto: String,
) -> Result<MovimientoCaja, String> {
    app.sesion
        .requerir_permiso(Rol::puede_operar_caja, "registrar movimientos de caja")?;

    if !monto.is_finite() || monto <= 0.0 {
        return Err(ApiError::Validacion("El monto debe ser mayor a cero".to_string()).into());
    }
    let concepto = concepto.trim().to_string();
    if concepto.is_empty() {
        return Err(ApiError::Validacion("Ingrese el concepto del movimiento".to_string()).into());
    }

    let caja = app.caja.requerir_abierta()?;
    let movimiento = app
        .api
        .registrar_movimiento(caja.id, &NuevoMovimiento { tipo, monto, concepto })
        .await?;

    info!(caja_id = caja.id, tipo = ?tipo, monto, "movimiento registrado");
    Ok(movimiento)
}

pub async fn listar_movimientos<T: Transport>(
    app: &AppState<T>,
) -> Result<Vec<MovimientoCaja>, String> {
    app.sesion
        .requerir_permiso(Rol::puede_operar_caja, "consultar la caja")?;
    let caja = app
        .caja
        .actual()?
        .ok_or_else(|| "No hay caja seleccionada".to_string())?;
    Ok(app.api.movimientos_caja(caja.id).await?)
}

/// Cierra la caja abierta y devuelve el arqueo. Si el backend rechaza el
/// cierre, la caché sigue mostrando la caja abierta.
pub async fn cerrar_caja<T: Transport>(
    app: &AppState<T>,
    monto_cierre: f64,
    observacion: Option<String>,
) -> Result<ArqueoCaja, String> {
    app.sesion
        .requerir_permiso(Rol::puede_operar_caja, "cerrar la caja")?;

    if !monto_cierre.is_finite() || monto_cierre < 0.0 {
        return Err(
            ApiError::Validacion("El monto de cierre no puede ser negativo".to_string()).into(),
        );
    }

    let caja = match app.caja.actual()? {
        Some(c) if c.esta_abierta() => c,
        Some(_) => {
            return Err(ApiError::Estado("La caja ya está cerrada".to_string()).into());
        }
        None => return Err(ApiError::Estado("No hay caja abierta".to_string()).into()),
    };

    let movimientos = app.api.movimientos_caja(caja.id).await?;

    let datos = CerrarCaja {
        monto_cierre,
        observacion: limpiar_observacion(observacion),
    };
    let cerrada = app.api.cerrar_caja(caja.id, &datos).await?;

    let arqueo = ArqueoCaja::calcular(cerrada.clone(), &movimientos, monto_cierre);
    app.caja.establecer(Some(cerrada))?;

    info!(
        caja_id = caja.id,
        monto_esperado = arqueo.monto_esperado,
        diferencia = arqueo.diferencia,
        "caja cerrada"
    );
    Ok(arqueo)
}

pub async fn historial_cajas<T: Transport>(
    app: &AppState<T>,
    page: i64,
) -> Result<Pagina<Caja>, String> {
    app.sesion
        .requerir_permiso(Rol::puede_operar_caja, "consultar la caja")?;
    let sede_id = app.sede_actual()?;
    let page_size = app.page_size()?;
    Ok(app
        .api
        .historial_cajas(sede_id, page.max(1), page_size)
        .await?)
}
