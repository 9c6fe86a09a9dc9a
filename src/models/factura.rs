use super::{PagoFactura, TipoItem};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EstadoFactura {
    Pagada,
    Pendiente,
    Anulada,
}

impl EstadoFactura {
    /// pendiente -> pagada | anulada, pagada -> anulada; anulada es final
    pub fn puede_pasar_a(&self, destino: EstadoFactura) -> bool {
        matches!(
            (self, destino),
            (EstadoFactura::Pendiente, EstadoFactura::Pagada)
                | (EstadoFactura::Pendiente, EstadoFactura::Anulada)
                | (EstadoFactura::Pagada, EstadoFactura::Anulada)
        )
    }

    pub fn etiqueta(&self) -> &'static str {
        match self {
            EstadoFactura::Pagada => "Pagada",
            EstadoFactura::Pendiente => "Pendiente",
            EstadoFactura::Anulada => "Anulada",
        }
    }

    pub fn como_query(&self) -> &'static str {
        match self {
            EstadoFactura::Pagada => "pagada",
            EstadoFactura::Pendiente => "pendiente",
            EstadoFactura::Anulada => "anulada",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FacturaItem {
    pub tipo: TipoItem,
    pub item_id: i64,
    pub nombre: Option<String>,
    pub cantidad: f64,
    pub precio_unitario: f64,
    #[serde(default)]
    pub descuento: f64,
    pub especialista_id: Option<i64>,
    pub subtotal: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Factura {
    pub id: i64,
    pub numero_factura: String,
    pub estado: EstadoFactura,
    pub total: f64,
    pub fecha: String,
    pub cliente_id: i64,
    pub cliente_nombre: Option<String>,
    pub sede_id: Option<i64>,
    #[serde(default)]
    pub items: Vec<FacturaItem>,
    #[serde(default)]
    pub pagos: Vec<PagoFactura>,
    pub abono_id: Option<i64>,
    pub monto_abono: Option<f64>,
    pub motivo_anulacion: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FacturaItemCreate {
    pub tipo: TipoItem,
    pub item_id: i64,
    pub cantidad: f64,
    pub precio_unitario: f64,
    pub descuento: f64,
    pub especialista_id: Option<i64>,
    pub factura_pendiente_id: Option<i64>,
}

/// Cuerpo de `POST /facturas`, armado desde el carrito
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FacturaCreate {
    pub cliente_id: i64,
    pub sede_id: Option<i64>,
    pub caja_id: i64,
    pub items: Vec<FacturaItemCreate>,
    pub pagos: Vec<PagoFactura>,
    pub abono_id: Option<i64>,
    pub monto_abono: Option<f64>,
    pub observacion: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct FacturaUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagos: Option<Vec<PagoFactura>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observacion: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct FiltrosFactura {
    pub estado: Option<EstadoFactura>,
    pub cliente_id: Option<i64>,
    pub fecha_desde: Option<String>,
    pub fecha_hasta: Option<String>,
    pub busqueda: Option<String>,
}

impl FiltrosFactura {
    /// Parámetros de query para `GET /facturas`; omite filtros vacíos
    pub fn como_query(&self, page: i64, page_size: i64) -> Vec<(String, String)> {
        let mut query = vec![
            ("page".to_string(), page.to_string()),
            ("page_size".to_string(), page_size.to_string()),
        ];
        if let Some(estado) = self.estado {
            query.push(("estado".to_string(), estado.como_query().to_string()));
        }
        if let Some(cliente_id) = self.cliente_id {
            query.push(("cliente_id".to_string(), cliente_id.to_string()));
        }
        let textos = [
            ("fecha_desde", &self.fecha_desde),
            ("fecha_hasta", &self.fecha_hasta),
            ("busqueda", &self.busqueda),
        ];
        for (clave, valor) in textos {
            if let Some(v) = valor.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                query.push((clave.to_string(), v.to_string()));
            }
        }
        query
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnularFactura {
    pub motivo: String,
}
