use crate::utils::{montos_iguales, redondear};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EstadoAbono {
    Disponible,
    Usado,
    Anulado,
}

/// Saldo a favor de un cliente (anticipo)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Abono {
    pub id: i64,
    pub cliente_id: i64,
    pub monto: f64,
    pub saldo_disponible: f64,
    pub estado: EstadoAbono,
    pub fecha: String,
    pub metodo_pago_id: Option<i64>,
    pub observacion: Option<String>,
}

impl Abono {
    pub fn esta_disponible(&self) -> bool {
        self.estado == EstadoAbono::Disponible && self.saldo_disponible > 0.0
    }

    /// Solo se anula un abono que nunca se usó
    pub fn puede_anularse(&self) -> bool {
        self.estado == EstadoAbono::Disponible && montos_iguales(self.saldo_disponible, self.monto)
    }

    /// Monto máximo aplicable a una factura de `total`
    pub fn aplicable(&self, total: f64) -> f64 {
        if !self.esta_disponible() {
            return 0.0;
        }
        redondear(self.saldo_disponible.min(total).max(0.0))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AbonoCreate {
    pub cliente_id: i64,
    pub monto: f64,
    pub metodo_pago_id: i64,
    pub caja_id: Option<i64>,
    pub observacion: Option<String>,
}

/// Abono aplicado al carrito actual
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AbonoAplicado {
    pub abono_id: i64,
    pub monto: f64,
}

/// Suma de saldos disponibles de un cliente
pub fn saldo_disponible(abonos: &[Abono]) -> f64 {
    redondear(
        abonos
            .iter()
            .filter(|a| a.estado == EstadoAbono::Disponible)
            .map(|a| a.saldo_disponible)
            .sum(),
    )
}
