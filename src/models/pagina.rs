use serde::{Deserialize, Serialize};

/// Página de resultados tal como la entrega el backend
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Pagina<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl<T> Pagina<T> {
    pub fn vacia(page_size: i64) -> Self {
        Pagina {
            items: Vec::new(),
            total: 0,
            page: 1,
            page_size,
            total_pages: 0,
        }
    }

    pub fn tiene_anterior(&self) -> bool {
        self.page > 1
    }

    pub fn tiene_siguiente(&self) -> bool {
        self.page < self.total_pages
    }
}
