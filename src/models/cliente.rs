use serde::{Deserialize, Serialize};

/// Referencia mínima al cliente asociado al carrito
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ClienteRef {
    pub id: i64,
    pub nombre: String,
}
