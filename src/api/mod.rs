//! Acceso al backend REST.
//!
//! `Transport` es el único punto que toca la red; `ApiClient` agrega el
//! bearer token, la renovación con refresh token y la decodificación JSON.

pub mod cliente;
pub mod endpoints;
pub mod http;

pub use cliente::ApiClient;
pub use http::HttpTransport;

use crate::error::ApiError;
use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metodo {
    Get,
    Post,
    Put,
}

impl Metodo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metodo::Get => "GET",
            Metodo::Post => "POST",
            Metodo::Put => "PUT",
        }
    }
}

/// Petición HTTP relativa a la URL base del backend
#[derive(Debug, Clone, PartialEq)]
pub struct Peticion {
    pub metodo: Metodo,
    pub ruta: String,
    pub query: Vec<(String, String)>,
    pub cuerpo: Option<Value>,
    pub token: Option<String>,
}

impl Peticion {
    pub fn new(metodo: Metodo, ruta: impl Into<String>) -> Self {
        Peticion {
            metodo,
            ruta: ruta.into(),
            query: Vec::new(),
            cuerpo: None,
            token: None,
        }
    }

    pub fn query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn cuerpo(mut self, cuerpo: Value) -> Self {
        self.cuerpo = Some(cuerpo);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Respuesta {
    pub status: u16,
    pub cuerpo: String,
}

impl Respuesta {
    pub fn es_exitosa(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Envía la petición. Solo falla por errores de red; los códigos
    /// HTTP de error llegan como `Respuesta`.
    async fn enviar(&self, peticion: Peticion) -> Result<Respuesta, ApiError>;
}
