use crate::api::Transport;
use crate::error::ApiError;
use crate::models::{saldo_disponible, Abono, AbonoCreate, Rol};
use crate::AppState;
use tracing::info;

pub async fn listar_abonos<T: Transport>(
    app: &AppState<T>,
    cliente_id: i64,
) -> Result<Vec<Abono>, String> {
    app.sesion.requerir()?;
    Ok(app.api.listar_abonos(cliente_id).await?)
}

/// Saldo a favor disponible del cliente
pub async fn saldo_cliente<T: Transport>(app: &AppState<T>, cliente_id: i64) -> Result<f64, String> {
    let abonos = listar_abonos(app, cliente_id).await?;
    Ok(saldo_disponible(&abonos))
}

/// Registra un anticipo. Entra como dinero a la caja abierta.
pub async fn crear_abono<T: Transport>(
    app: &AppState<T>,
    mut datos: AbonoCreate,
) -> Result<Abono, String> {
    app.sesion
        .requerir_permiso(Rol::puede_operar_caja, "registrar abonos")?;

    if !datos.monto.is_finite() || datos.monto <= 0.0 {
        return Err(
            ApiError::Validacion("El monto del abono debe ser mayor a cero".to_string()).into(),
        );
    }
    let caja = app.caja.requerir_abierta()?;
    datos.caja_id = Some(caja.id);

    let abono = app.api.crear_abono(&datos).await?;
    info!(abono_id = abono.id, cliente_id = abono.cliente_id, monto = abono.monto, "abono registrado");
    Ok(abono)
}

/// Anula un abono que nunca se usó
pub async fn anular_abono<T: Transport>(
    app: &AppState<T>,
    abono: Abono,
    motivo: String,
) -> Result<Abono, String> {
    app.sesion
        .requerir_permiso(Rol::puede_anular, "anular abonos")?;

    let motivo = motivo.trim().to_string();
    if motivo.is_empty() {
        return Err(ApiError::Validacion("Indique el motivo de la anulación".to_string()).into());
    }
    if !abono.puede_anularse() {
        return Err(ApiError::Estado(
            "Solo se puede anular un abono disponible que no se haya usado".to_string(),
        )
        .into());
    }

    let anulado = app.api.anular_abono(abono.id, &motivo).await?;

    // Si estaba aplicado al carrito, se retira
    app.carrito.modificar(|c| {
        if c.abono_aplicado.as_ref().map(|a| a.abono_id) == Some(abono.id) {
            c.quitar_abono();
        }
        Ok(())
    })?;

    info!(abono_id = abono.id, "abono anulado");
    Ok(anulado)
}
