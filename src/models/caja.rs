use crate::utils::redondear;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EstadoCaja {
    Abierta,
    Cerrada,
}

impl EstadoCaja {
    pub fn etiqueta(&self) -> &'static str {
        match self {
            EstadoCaja::Abierta => "Abierta",
            EstadoCaja::Cerrada => "Cerrada",
        }
    }

    pub fn alternar(&self) -> EstadoCaja {
        match self {
            EstadoCaja::Abierta => EstadoCaja::Cerrada,
            EstadoCaja::Cerrada => EstadoCaja::Abierta,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Caja {
    pub id: i64,
    pub sede_id: Option<i64>,
    pub estado: EstadoCaja,
    pub monto_apertura: f64,
    pub monto_cierre: Option<f64>,
    pub fecha_apertura: String,
    pub fecha_cierre: Option<String>,
    pub usuario_apertura: String,
    pub observacion: Option<String>,
}

impl Caja {
    pub fn esta_abierta(&self) -> bool {
        self.estado == EstadoCaja::Abierta
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AbrirCaja {
    pub sede_id: Option<i64>,
    pub monto_apertura: f64,
    pub observacion: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CerrarCaja {
    pub monto_cierre: f64,
    pub observacion: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TipoMovimiento {
    Ingreso,
    Egreso,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MovimientoCaja {
    pub id: i64,
    pub caja_id: i64,
    pub tipo: TipoMovimiento,
    pub monto: f64,
    pub concepto: String,
    pub fecha: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NuevoMovimiento {
    pub tipo: TipoMovimiento,
    pub monto: f64,
    pub concepto: String,
}

/// Arqueo de cierre: lo esperado según movimientos contra lo contado
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ArqueoCaja {
    pub caja: Caja,
    pub total_ingresos: f64,
    pub total_egresos: f64,
    pub monto_esperado: f64,
    pub monto_contado: f64,
    pub diferencia: f64,
}

impl ArqueoCaja {
    pub fn calcular(caja: Caja, movimientos: &[MovimientoCaja], monto_contado: f64) -> Self {
        let (ingresos, egresos) =
            movimientos
                .iter()
                .fold((0.0_f64, 0.0_f64), |(ing, egr), m| match m.tipo {
                    TipoMovimiento::Ingreso => (ing + m.monto, egr),
                    TipoMovimiento::Egreso => (ing, egr + m.monto),
                });

        let monto_esperado = redondear(caja.monto_apertura + ingresos - egresos);
        let diferencia = redondear(monto_contado - monto_esperado);

        ArqueoCaja {
            caja,
            total_ingresos: redondear(ingresos),
            total_egresos: redondear(egresos),
            monto_esperado,
            monto_contado,
            diferencia,
        }
    }
}
