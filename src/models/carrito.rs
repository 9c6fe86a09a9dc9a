use super::{Abono, AbonoAplicado, ClienteRef, FacturaItemCreate};
use crate::error::ApiError;
use crate::utils::redondear;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TipoItem {
    Servicio,
    Producto,
}

/// Línea del carrito. Solo existe en memoria hasta facturar.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ItemCarrito {
    pub tipo: TipoItem,
    pub item_id: i64,
    pub nombre: String,
    pub cantidad: f64,
    pub precio_unitario: f64,
    #[serde(default)]
    pub descuento: f64,
    pub especialista_id: Option<i64>,
    /// Registro de servicio pendiente del que proviene la línea
    pub factura_pendiente_id: Option<i64>,
}

impl ItemCarrito {
    pub fn bruto(&self) -> f64 {
        redondear(self.cantidad * self.precio_unitario)
    }

    pub fn subtotal(&self) -> f64 {
        redondear(self.cantidad * self.precio_unitario - self.descuento)
    }

    pub fn validar(&self) -> Result<(), ApiError> {
        if self.nombre.trim().is_empty() {
            return Err(ApiError::Validacion("El ítem debe tener nombre".to_string()));
        }
        if !(self.cantidad.is_finite()
            && self.precio_unitario.is_finite()
            && self.descuento.is_finite())
        {
            return Err(ApiError::Validacion(format!(
                "Los montos de '{}' no son válidos",
                self.nombre
            )));
        }
        if self.cantidad <= 0.0 {
            return Err(ApiError::Validacion(
                "La cantidad debe ser mayor a cero".to_string(),
            ));
        }
        if self.precio_unitario < 0.0 {
            return Err(ApiError::Validacion(
                "El precio no puede ser negativo".to_string(),
            ));
        }
        if self.descuento < 0.0 {
            return Err(ApiError::Validacion(
                "El descuento no puede ser negativo".to_string(),
            ));
        }
        if self.descuento > self.bruto() {
            return Err(ApiError::Validacion(format!(
                "El descuento de '{}' supera el valor de la línea",
                self.nombre
            )));
        }
        if self.tipo == TipoItem::Servicio && self.especialista_id.is_none() {
            return Err(ApiError::Validacion(format!(
                "El servicio '{}' requiere un especialista",
                self.nombre
            )));
        }
        Ok(())
    }

    pub fn a_factura_item(&self) -> FacturaItemCreate {
        FacturaItemCreate {
            tipo: self.tipo,
            item_id: self.item_id,
            cantidad: self.cantidad,
            precio_unitario: self.precio_unitario,
            descuento: self.descuento,
            especialista_id: self.especialista_id,
            factura_pendiente_id: self.factura_pendiente_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TotalesCarrito {
    pub subtotal: f64,
    pub descuentos: f64,
    pub total: f64,
    pub abono: f64,
    pub total_a_pagar: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Carrito {
    pub cliente: Option<ClienteRef>,
    pub items: Vec<ItemCarrito>,
    pub abono_aplicado: Option<AbonoAplicado>,
}

impl Carrito {
    pub fn esta_vacio(&self) -> bool {
        self.items.is_empty()
    }

    pub fn agregar_item(&mut self, item: ItemCarrito) -> Result<(), ApiError> {
        item.validar()?;
        self.items.push(item);
        self.reajustar_abono();
        Ok(())
    }

    pub fn quitar_item(&mut self, indice: usize) -> Result<ItemCarrito, ApiError> {
        if indice >= self.items.len() {
            return Err(ApiError::Validacion("Ítem inexistente en el carrito".to_string()));
        }
        let item = self.items.remove(indice);
        self.reajustar_abono();
        Ok(item)
    }

    pub fn actualizar_cantidad(&mut self, indice: usize, cantidad: f64) -> Result<(), ApiError> {
        let actual = self
            .items
            .get(indice)
            .ok_or_else(|| ApiError::Validacion("Ítem inexistente en el carrito".to_string()))?;
        let mut editado = actual.clone();
        editado.cantidad = cantidad;
        editado.validar()?;
        self.items[indice] = editado;
        self.reajustar_abono();
        Ok(())
    }

    pub fn limpiar(&mut self) {
        self.cliente = None;
        self.items.clear();
        self.abono_aplicado = None;
    }

    /// Cambia el cliente. Si es otro cliente se descartan las líneas que
    /// vienen de sus pendientes y el abono aplicado.
    pub fn set_cliente(&mut self, cliente: ClienteRef) {
        let mismo = self.cliente.as_ref().map(|c| c.id) == Some(cliente.id);
        if !mismo {
            self.items.retain(|i| i.factura_pendiente_id.is_none());
            self.abono_aplicado = None;
        }
        self.cliente = Some(cliente);
    }

    pub fn aplicar_abono(&mut self, abono: &Abono, monto: f64) -> Result<(), ApiError> {
        let cliente_id = self
            .cliente
            .as_ref()
            .map(|c| c.id)
            .ok_or_else(|| ApiError::Validacion("Seleccione un cliente".to_string()))?;
        if abono.cliente_id != cliente_id {
            return Err(ApiError::Validacion(
                "El abono no pertenece al cliente del carrito".to_string(),
            ));
        }
        if !abono.esta_disponible() {
            return Err(ApiError::Estado("El abono no está disponible".to_string()));
        }
        if !monto.is_finite() || monto <= 0.0 {
            return Err(ApiError::Validacion(
                "El monto del abono debe ser mayor a cero".to_string(),
            ));
        }
        let total = self.totales().total;
        if monto > abono.aplicable(total) + 0.005 {
            if monto > abono.saldo_disponible + 0.005 {
                return Err(ApiError::Validacion(format!(
                    "El abono solo tiene {:.2} disponible",
                    abono.saldo_disponible
                )));
            }
            return Err(ApiError::Validacion(
                "El abono no puede superar el total de la factura".to_string(),
            ));
        }
        self.abono_aplicado = Some(AbonoAplicado {
            abono_id: abono.id,
            monto: redondear(monto),
        });
        Ok(())
    }

    pub fn quitar_abono(&mut self) {
        self.abono_aplicado = None;
    }

    pub fn totales(&self) -> TotalesCarrito {
        let subtotal = redondear(self.items.iter().map(ItemCarrito::bruto).sum());
        let descuentos = redondear(self.items.iter().map(|i| i.descuento).sum());
        let total = redondear(subtotal - descuentos);
        let abono = self.abono_aplicado.as_ref().map(|a| a.monto).unwrap_or(0.0);
        TotalesCarrito {
            subtotal,
            descuentos,
            total,
            abono,
            total_a_pagar: redondear((total - abono).max(0.0)),
        }
    }

    /// Descuenta lo que ya se facturó con `facturado`. Si el carrito no
    /// cambió se vacía; si cambió, se quitan las líneas de pendientes y el
    /// abono que ya quedaron en la factura.
    pub fn descontar_facturado(&mut self, facturado: &Carrito) {
        if *self == *facturado {
            self.limpiar();
            return;
        }
        let ya_facturados = facturado.pendientes_vinculados();
        self.items.retain(|i| {
            i.factura_pendiente_id
                .map_or(true, |id| !ya_facturados.contains(&id))
        });
        let abono_usado = facturado.abono_aplicado.as_ref().map(|a| a.abono_id);
        if abono_usado.is_some() && self.abono_aplicado.as_ref().map(|a| a.abono_id) == abono_usado {
            self.abono_aplicado = None;
        }
        self.reajustar_abono();
    }

    /// Ids de pendientes que quedarán facturados con este carrito
    pub fn pendientes_vinculados(&self) -> Vec<i64> {
        self.items
            .iter()
            .filter_map(|i| i.factura_pendiente_id)
            .collect()
    }

    // Si el total baja por debajo del abono, el abono se recorta al total
    fn reajustar_abono(&mut self) {
        let total = self.totales().total;
        if let Some(aplicado) = self.abono_aplicado.as_mut() {
            if aplicado.monto > total {
                aplicado.monto = total;
            }
        }
        if matches!(&self.abono_aplicado, Some(a) if a.monto <= 0.0) {
            self.abono_aplicado = None;
        }
    }
}
