use super::{Metodo, Peticion, Respuesta, Transport};
use crate::db::Database;
use crate::error::{extraer_detalle, ApiError};
use crate::models::{Credenciales, RespuestaLogin, RespuestaRefresh, Tokens};
use crate::state::{CacheLocal, SesionState};
use crate::utils::token_expirado;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Cliente tipado del backend. Comparte la sesión y las cachés con
/// `AppState` para firmar cada petición, renovar los tokens cuando expiran
/// y limpiar todo si el backend invalida la sesión.
pub struct ApiClient<T: Transport> {
    transport: T,
    sesion: Arc<SesionState>,
    db: Arc<Database>,
    cache: CacheLocal,
    // Una sola renovación a la vez; se mantiene durante el `.await`
    renovando: tokio::sync::Mutex<()>,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(
        transport: T,
        sesion: Arc<SesionState>,
        db: Arc<Database>,
        cache: CacheLocal,
    ) -> Self {
        ApiClient {
            transport,
            sesion,
            db,
            cache,
            renovando: tokio::sync::Mutex::new(()),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn cache(&self) -> &CacheLocal {
        &self.cache
    }

    /// `POST /auth/login`, sin token
    pub async fn login(&self, credenciales: &Credenciales) -> Result<RespuestaLogin, ApiError> {
        let peticion =
            Peticion::new(Metodo::Post, "/auth/login").cuerpo(serde_json::to_value(credenciales)?);
        let resp = self.transport.enviar(peticion).await?;
        decodificar(resp)
    }

    pub async fn get<R: DeserializeOwned>(
        &self,
        ruta: &str,
        query: Vec<(String, String)>,
    ) -> Result<R, ApiError> {
        self.solicitar(Peticion::new(Metodo::Get, ruta).query(query))
            .await
    }

    pub async fn post<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        ruta: &str,
        cuerpo: &B,
    ) -> Result<R, ApiError> {
        let cuerpo = serde_json::to_value(cuerpo)?;
        self.solicitar(Peticion::new(Metodo::Post, ruta).cuerpo(cuerpo))
            .await
    }

    pub async fn put<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        ruta: &str,
        cuerpo: &B,
    ) -> Result<R, ApiError> {
        let cuerpo = serde_json::to_value(cuerpo)?;
        self.solicitar(Peticion::new(Metodo::Put, ruta).cuerpo(cuerpo))
            .await
    }

    /// Envía una petición autenticada.
    ///
    /// Si el access token (JWT) ya expiró se renueva antes de enviar. Un 401
    /// provoca una sola renovación y un reintento; si vuelve a fallar la
    /// sesión se descarta.
    pub async fn solicitar<R: DeserializeOwned>(&self, peticion: Peticion) -> Result<R, ApiError> {
        let mut tokens = self.sesion.tokens()?.ok_or(ApiError::SinSesion)?;

        if token_expirado(&tokens.access_token, chrono::Utc::now().timestamp()) {
            debug!(ruta = %peticion.ruta, "access token expirado, renovando");
            tokens = self.renovar(&tokens).await?;
        }

        let mut intento = peticion.clone();
        intento.token = Some(tokens.access_token.clone());
        let mut resp = self.transport.enviar(intento).await?;

        if resp.status == 401 {
            debug!(ruta = %peticion.ruta, "401 recibido, renovando tokens");
            tokens = self.renovar(&tokens).await?;
            let mut reintento = peticion.clone();
            reintento.token = Some(tokens.access_token.clone());
            resp = self.transport.enviar(reintento).await?;
            if resp.status == 401 {
                self.descartar_sesion()?;
                return Err(ApiError::NoAutorizado);
            }
        }

        if !resp.es_exitosa() {
            warn!(
                metodo = peticion.metodo.as_str(),
                ruta = %peticion.ruta,
                status = resp.status,
                "petición rechazada por el backend"
            );
        }

        decodificar(resp)
    }

    /// Renueva los tokens `usados`. Si otra petición ya los renovó mientras
    /// se esperaba el turno, devuelve los vigentes sin llamar al backend.
    async fn renovar(&self, usados: &Tokens) -> Result<Tokens, ApiError> {
        let _turno = self.renovando.lock().await;
        match self.sesion.tokens()? {
            Some(vigentes) if vigentes.access_token != usados.access_token => {
                return Ok(vigentes)
            }
            Some(_) => {}
            None => return Err(ApiError::NoAutorizado),
        }

        let refresh_token = usados.refresh_token.as_str();
        let peticion = Peticion::new(Metodo::Post, "/auth/refresh")
            .cuerpo(serde_json::json!({ "refresh_token": refresh_token }));

        let resultado = match self.transport.enviar(peticion).await {
            Ok(resp) if resp.es_exitosa() => decodificar::<RespuestaRefresh>(resp),
            Ok(_) => Err(ApiError::NoAutorizado),
            Err(e) => Err(e),
        };

        match resultado {
            Ok(r) => {
                let tokens = Tokens {
                    access_token: r.access_token,
                    refresh_token: r
                        .refresh_token
                        .unwrap_or_else(|| refresh_token.to_string()),
                };
                if let Some(sesion) = self.sesion.actualizar_tokens(tokens.clone())? {
                    self.db.guardar_sesion(&sesion)?;
                }
                info!("tokens renovados");
                Ok(tokens)
            }
            // Sin red no se descarta la sesión: el refresh token puede seguir vigente
            Err(ApiError::Red(e)) => Err(ApiError::Red(e)),
            Err(_) => {
                warn!("renovación de tokens rechazada, cerrando sesión");
                self.descartar_sesion()?;
                Err(ApiError::NoAutorizado)
            }
        }
    }

    /// Olvida la sesión y todo el estado local ligado a ella
    pub fn descartar_sesion(&self) -> Result<(), ApiError> {
        self.sesion.limpiar()?;
        self.db.borrar_sesion()?;
        self.cache.limpiar()
    }
}

/// Convierte la respuesta en `R` o en el error con el `detail` del backend.
/// Un cuerpo vacío (p. ej. 204) se decodifica como `null`.
pub(crate) fn decodificar<R: DeserializeOwned>(resp: Respuesta) -> Result<R, ApiError> {
    if !resp.es_exitosa() {
        return Err(ApiError::Http {
            status: resp.status,
            detalle: extraer_detalle(resp.status, &resp.cuerpo),
        });
    }

    let valor: Value = if resp.cuerpo.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&resp.cuerpo)?
    };
    Ok(serde_json::from_value(valor)?)
}
