use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Error de conexión con el servidor: {0}")]
    Red(String),

    #[error("{detalle}")]
    Http { status: u16, detalle: String },

    #[error("Sesión expirada, inicie sesión nuevamente")]
    NoAutorizado,

    #[error("Debe iniciar sesión")]
    SinSesion,

    #[error("Respuesta inesperada del servidor: {0}")]
    Decodificacion(String),

    #[error("{0}")]
    Validacion(String),

    #[error("{0}")]
    Estado(String),

    #[error("Error de base de datos local: {0}")]
    Db(#[from] rusqlite::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::NoAutorizado => Some(401),
            _ => None,
        }
    }

    pub fn es_no_encontrado(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<ApiError> for String {
    fn from(err: ApiError) -> String {
        err.to_string()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decodificacion(err.to_string())
    }
}

/// Extrae el mensaje a mostrar desde el cuerpo de una respuesta de error.
///
/// El backend responde `{"detail": "..."}` o, en errores de validación,
/// `{"detail": [{"loc": [...], "msg": "...", "type": "..."}]}`.
pub fn extraer_detalle(status: u16, body: &str) -> String {
    let por_defecto = || format!("Error del servidor (HTTP {})", status);

    let valor: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) => return por_defecto(),
    };

    match valor.get("detail") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Value::Array(errores)) => {
            let mensajes: Vec<String> = errores
                .iter()
                .filter_map(|e| {
                    let msg = e.get("msg").and_then(Value::as_str)?;
                    let campo = e
                        .get("loc")
                        .and_then(Value::as_array)
                        .and_then(|loc| loc.last())
                        .map(|c| match c {
                            Value::String(s) => s.clone(),
                            otro => otro.to_string(),
                        });
                    Some(match campo {
                        Some(c) => format!("{}: {}", c, msg),
                        None => msg.to_string(),
                    })
                })
                .collect();
            if mensajes.is_empty() {
                por_defecto()
            } else {
                mensajes.join("; ")
            }
        }
        _ => por_defecto(),
    }
}
