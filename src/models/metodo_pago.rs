use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MetodoPago {
    pub id: i64,
    pub nombre: String,
    #[serde(default = "activo_por_defecto")]
    pub activo: bool,
}

fn activo_por_defecto() -> bool {
    true
}

/// Pago aplicado a una factura
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PagoFactura {
    pub metodo_pago_id: i64,
    pub monto: f64,
}
