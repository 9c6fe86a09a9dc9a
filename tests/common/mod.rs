#![allow(dead_code)]

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use salon_caja::api::{Metodo, Peticion, Respuesta, Transport};
use salon_caja::config::Config;
use salon_caja::db::Database;
use salon_caja::error::ApiError;
use salon_caja::AppState;
use serde_json::{json, Value};
use std::sync::Mutex;

type Manejador = Box<dyn Fn(&Peticion) -> Respuesta + Send + Sync>;

/// Transporte en memoria: responde según rutas registradas y guarda
/// cada petición recibida.
#[derive(Default)]
pub struct FakeTransport {
    rutas: Mutex<Vec<(Metodo, String, Manejador)>>,
    sin_red: Mutex<Vec<(Metodo, String)>>,
    pub peticiones: Mutex<Vec<Peticion>>,
}

impl FakeTransport {
    /// Registra (o reemplaza) la respuesta para método + ruta
    pub fn on(
        &self,
        metodo: Metodo,
        ruta: &str,
        manejador: impl Fn(&Peticion) -> Respuesta + Send + Sync + 'static,
    ) {
        let mut rutas = self.rutas.lock().unwrap();
        rutas.retain(|(m, r, _)| !(*m == metodo && r == ruta));
        rutas.push((metodo, ruta.to_string(), Box::new(manejador)));
    }

    pub fn on_json(&self, metodo: Metodo, ruta: &str, status: u16, cuerpo: Value) {
        let texto = cuerpo.to_string();
        self.on(metodo, ruta, move |_| Respuesta {
            status,
            cuerpo: texto.clone(),
        });
    }

    /// Las peticiones a método + ruta fallan como si no hubiera red
    pub fn sin_red(&self, metodo: Metodo, ruta: &str) {
        self.sin_red.lock().unwrap().push((metodo, ruta.to_string()));
    }

    /// Posición de la primera petición a método + ruta
    pub fn orden_de(&self, metodo: Metodo, ruta: &str) -> Option<usize> {
        self.peticiones
            .lock()
            .unwrap()
            .iter()
            .position(|p| p.metodo == metodo && p.ruta == ruta)
    }

    pub fn peticiones_a(&self, metodo: Metodo, ruta: &str) -> Vec<Peticion> {
        self.peticiones
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.metodo == metodo && p.ruta == ruta)
            .cloned()
            .collect()
    }

    pub fn total_peticiones(&self) -> usize {
        self.peticiones.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn enviar(&self, peticion: Peticion) -> Result<Respuesta, ApiError> {
        self.peticiones.lock().unwrap().push(peticion.clone());
        // Cede el turno como lo haría una llamada de red real
        tokio::task::yield_now().await;

        let caida = self
            .sin_red
            .lock()
            .unwrap()
            .iter()
            .any(|(m, r)| *m == peticion.metodo && *r == peticion.ruta);
        if caida {
            return Err(ApiError::Red("connection refused".to_string()));
        }

        let rutas = self.rutas.lock().unwrap();
        let resp = rutas
            .iter()
            .find(|(m, r, _)| *m == peticion.metodo && *r == peticion.ruta)
            .map(|(_, _, h)| h(&peticion))
            .unwrap_or(Respuesta {
                status: 404,
                cuerpo: json!({ "detail": "Not Found" }).to_string(),
            });
        Ok(resp)
    }
}

pub fn app() -> AppState<FakeTransport> {
    app_con_db(Database::en_memoria().unwrap())
}

pub fn app_con_db(db: Database) -> AppState<FakeTransport> {
    let config = Config::desde_fuentes(&Default::default(), &Default::default()).unwrap();
    AppState::con_transporte(db, config, FakeTransport::default())
}

pub fn usuario_json(rol: &str) -> Value {
    json!({
        "id": 7,
        "nombre": "Laura",
        "email": "laura@salon.test",
        "rol": rol,
        "sede_id": 2,
        "activo": true
    })
}

pub fn respuesta_login(rol: &str) -> Value {
    json!({
        "access_token": "acc-1",
        "refresh_token": "ref-1",
        "usuario": usuario_json(rol)
    })
}

/// JWT sin firma válida, solo con `exp`
pub fn jwt_con_exp(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"7","exp":{}}}"#, exp));
    format!("{}.{}.firma", header, payload)
}

/// Inicia sesión con un access token ya vencido
pub async fn con_sesion_vencida(app: &AppState<FakeTransport>, rol: &str) {
    let mut login = respuesta_login(rol);
    login["access_token"] = json!(jwt_con_exp(1_000));
    app.api
        .transport()
        .on_json(Metodo::Post, "/auth/login", 200, login);
    salon_caja::commands::sesion::iniciar_sesion(
        app,
        "laura@salon.test".to_string(),
        "secreto".to_string(),
    )
    .await
    .unwrap();
}

/// Inicia sesión con el rol indicado
pub async fn con_sesion(app: &AppState<FakeTransport>, rol: &str) {
    app.api
        .transport()
        .on_json(Metodo::Post, "/auth/login", 200, respuesta_login(rol));
    salon_caja::commands::sesion::iniciar_sesion(
        app,
        "laura@salon.test".to_string(),
        "secreto".to_string(),
    )
    .await
    .unwrap();
}

pub fn caja_json(id: i64, estado: &str, monto_apertura: f64) -> Value {
    json!({
        "id": id,
        "sede_id": 2,
        "estado": estado,
        "monto_apertura": monto_apertura,
        "monto_cierre": null,
        "fecha_apertura": "2026-10-19T08:00:00",
        "fecha_cierre": null,
        "usuario_apertura": "Laura",
        "observacion": null
    })
}

pub fn factura_json(id: i64, estado: &str, total: f64) -> Value {
    json!({
        "id": id,
        "numero_factura": format!("F-{:06}", id),
        "estado": estado,
        "total": total,
        "fecha": "2026-10-19T10:30:00",
        "cliente_id": 11,
        "cliente_nombre": "Marta",
        "sede_id": 2
    })
}

/// Abre caja 1 con monto 100
pub async fn con_caja_abierta(app: &AppState<FakeTransport>) {
    app.api
        .transport()
        .on_json(Metodo::Post, "/caja/abrir", 200, caja_json(1, "abierta", 100.0));
    salon_caja::commands::caja::abrir_caja(app, 100.0, None)
        .await
        .unwrap();
}
