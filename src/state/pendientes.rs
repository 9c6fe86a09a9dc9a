use super::bloquear;
use crate::error::ApiError;
use crate::models::FacturaPendienteResumen;
use crate::utils::redondear;
use std::sync::Mutex;

#[derive(Default)]
pub struct PendientesState {
    pub resumenes: Mutex<Vec<FacturaPendienteResumen>>,
}

impl PendientesState {
    pub fn actual(&self) -> Result<Vec<FacturaPendienteResumen>, ApiError> {
        Ok(bloquear(&self.resumenes)?.clone())
    }

    pub fn establecer(&self, resumenes: Vec<FacturaPendienteResumen>) -> Result<(), ApiError> {
        *bloquear(&self.resumenes)? = resumenes;
        Ok(())
    }

    pub fn limpiar(&self) -> Result<(), ApiError> {
        self.establecer(Vec::new())
    }

    pub fn de_cliente(&self, cliente_id: i64) -> Result<Option<FacturaPendienteResumen>, ApiError> {
        Ok(bloquear(&self.resumenes)?
            .iter()
            .find(|r| r.cliente_id == cliente_id)
            .cloned())
    }

    /// Quita los registros ya facturados y recalcula los resúmenes
    pub fn quitar_registros(&self, ids: &[i64]) -> Result<(), ApiError> {
        if ids.is_empty() {
            return Ok(());
        }
        let mut resumenes = bloquear(&self.resumenes)?;
        for resumen in resumenes.iter_mut() {
            resumen.servicios.retain(|s| !ids.contains(&s.id));
            resumen.cantidad_servicios = resumen.servicios.len();
            resumen.total = redondear(resumen.servicios.iter().map(|s| s.precio * s.cantidad).sum());
        }
        resumenes.retain(|r| !r.servicios.is_empty());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{agrupar_pendientes, ServicioPendiente};

    fn registro(id: i64, cliente_id: i64, precio: f64) -> ServicioPendiente {
        ServicioPendiente {
            id,
            cliente_id,
            cliente_nombre: format!("Cliente {}", cliente_id),
            servicio_id: 1,
            servicio_nombre: "Manicure".to_string(),
            especialista_id: 2,
            especialista_nombre: None,
            precio,
            cantidad: 1.0,
            fecha: format!("2026-10-18T0{}:00", id),
        }
    }

    #[test]
    fn quitar_registros_recalcula() {
        let estado = PendientesState::default();
        estado
            .establecer(agrupar_pendientes(vec![
                registro(1, 1, 10.0),
                registro(2, 1, 12.0),
                registro(3, 2, 8.0),
            ]))
            .unwrap();

        estado.quitar_registros(&[1, 3]).unwrap();
        let resumenes = estado.actual().unwrap();
        assert_eq!(resumenes.len(), 1);
        assert_eq!(resumenes[0].cliente_id, 1);
        assert_eq!(resumenes[0].cantidad_servicios, 1);
        assert_eq!(resumenes[0].total, 12.0);
    }
}
