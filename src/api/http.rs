use super::{Metodo, Peticion, Respuesta, Transport};
use crate::error::ApiError;
use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;

/// Transporte real sobre reqwest
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ApiError::Red(format!("Error creando cliente HTTP: {}", e)))?;

        Ok(HttpTransport {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn enviar(&self, peticion: Peticion) -> Result<Respuesta, ApiError> {
        let url = format!("{}{}", self.base_url, peticion.ruta);
        let metodo = match peticion.metodo {
            Metodo::Get => reqwest::Method::GET,
            Metodo::Post => reqwest::Method::POST,
            Metodo::Put => reqwest::Method::PUT,
        };

        let mut request = self
            .client
            .request(metodo, &url)
            .header("Accept", "application/json");
        if !peticion.query.is_empty() {
            request = request.query(&peticion.query);
        }
        if let Some(token) = &peticion.token {
            request = request.bearer_auth(token);
        }
        if let Some(cuerpo) = &peticion.cuerpo {
            request = request.json(cuerpo);
        }

        let resp = request.send().await.map_err(|e| {
            warn!(metodo = peticion.metodo.as_str(), ruta = %peticion.ruta, error = %e, "fallo de red");
            ApiError::Red(e.to_string())
        })?;

        let status = resp.status().as_u16();
        let cuerpo = resp
            .text()
            .await
            .map_err(|e| ApiError::Red(format!("Error leyendo respuesta: {}", e)))?;

        Ok(Respuesta { status, cuerpo })
    }
}
