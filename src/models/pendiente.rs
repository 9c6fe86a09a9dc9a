use super::{ItemCarrito, TipoItem};
use crate::utils::redondear;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Registro de servicio realizado que aún no se factura
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ServicioPendiente {
    pub id: i64,
    pub cliente_id: i64,
    pub cliente_nombre: String,
    pub servicio_id: i64,
    pub servicio_nombre: String,
    pub especialista_id: i64,
    pub especialista_nombre: Option<String>,
    pub precio: f64,
    #[serde(default = "cantidad_por_defecto")]
    pub cantidad: f64,
    pub fecha: String,
}

fn cantidad_por_defecto() -> f64 {
    1.0
}

impl ServicioPendiente {
    pub fn a_item_carrito(&self) -> ItemCarrito {
        ItemCarrito {
            tipo: TipoItem::Servicio,
            item_id: self.servicio_id,
            nombre: self.servicio_nombre.clone(),
            cantidad: self.cantidad,
            precio_unitario: self.precio,
            descuento: 0.0,
            especialista_id: Some(self.especialista_id),
            factura_pendiente_id: Some(self.id),
        }
    }
}

/// Pendientes de un cliente, listos para cargarse al carrito
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FacturaPendienteResumen {
    pub cliente_id: i64,
    pub cliente_nombre: String,
    pub servicios: Vec<ServicioPendiente>,
    pub cantidad_servicios: usize,
    pub total: f64,
}

impl FacturaPendienteResumen {
    pub fn a_items_carrito(&self) -> Vec<ItemCarrito> {
        self.servicios.iter().map(ServicioPendiente::a_item_carrito).collect()
    }
}

/// Agrupa los registros pendientes por cliente.
/// Resultado ordenado por nombre de cliente; dentro de cada grupo, por fecha.
pub fn agrupar_pendientes(registros: Vec<ServicioPendiente>) -> Vec<FacturaPendienteResumen> {
    let mut por_cliente: BTreeMap<i64, Vec<ServicioPendiente>> = BTreeMap::new();
    for registro in registros {
        por_cliente.entry(registro.cliente_id).or_default().push(registro);
    }

    let mut resumenes: Vec<FacturaPendienteResumen> = por_cliente
        .into_iter()
        .map(|(cliente_id, mut servicios)| {
            servicios.sort_by(|a, b| a.fecha.cmp(&b.fecha).then(a.id.cmp(&b.id)));
            let total = redondear(servicios.iter().map(|s| s.precio * s.cantidad).sum());
            FacturaPendienteResumen {
                cliente_id,
                cliente_nombre: servicios[0].cliente_nombre.clone(),
                cantidad_servicios: servicios.len(),
                total,
                servicios,
            }
        })
        .collect();

    resumenes.sort_by(|a, b| {
        a.cliente_nombre
            .to_lowercase()
            .cmp(&b.cliente_nombre.to_lowercase())
            .then(a.cliente_id.cmp(&b.cliente_id))
    });
    resumenes
}
