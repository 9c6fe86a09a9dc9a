use super::bloquear;
use crate::error::ApiError;
use crate::models::{Factura, FiltrosFactura, Pagina};
use std::sync::Mutex;

/// Página de facturas visible y filtros con que se obtuvo
pub struct FacturaState {
    pub pagina: Mutex<Pagina<Factura>>,
    pub filtros: Mutex<FiltrosFactura>,
}

impl FacturaState {
    pub fn new(page_size: i64) -> Self {
        FacturaState {
            pagina: Mutex::new(Pagina::vacia(page_size)),
            filtros: Mutex::new(FiltrosFactura::default()),
        }
    }

    pub fn pagina(&self) -> Result<Pagina<Factura>, ApiError> {
        Ok(bloquear(&self.pagina)?.clone())
    }

    pub fn filtros(&self) -> Result<FiltrosFactura, ApiError> {
        Ok(bloquear(&self.filtros)?.clone())
    }

    pub fn establecer(&self, filtros: FiltrosFactura, pagina: Pagina<Factura>) -> Result<(), ApiError> {
        *bloquear(&self.filtros)? = filtros;
        *bloquear(&self.pagina)? = pagina;
        Ok(())
    }

    /// Vuelve a la página vacía y sin filtros
    pub fn limpiar(&self) -> Result<(), ApiError> {
        let page_size = bloquear(&self.pagina)?.page_size;
        self.establecer(FiltrosFactura::default(), Pagina::vacia(page_size))
    }

    /// Agrega una factura recién creada al inicio de la página
    pub fn insertar_al_inicio(&self, factura: Factura) -> Result<(), ApiError> {
        let mut pagina = bloquear(&self.pagina)?;
        pagina.items.retain(|f| f.id != factura.id);
        pagina.items.insert(0, factura);
        pagina.total += 1;
        if pagina.total_pages == 0 {
            pagina.total_pages = 1;
        }
        Ok(())
    }

    /// Reemplaza la factura en caché si está en la página actual
    pub fn reemplazar(&self, factura: Factura) -> Result<(), ApiError> {
        let mut pagina = bloquear(&self.pagina)?;
        if let Some(f) = pagina.items.iter_mut().find(|f| f.id == factura.id) {
            *f = factura;
        }
        Ok(())
    }

    pub fn buscar(&self, id: i64) -> Result<Option<Factura>, ApiError> {
        Ok(bloquear(&self.pagina)?
            .items
            .iter()
            .find(|f| f.id == id)
            .cloned())
    }
}
