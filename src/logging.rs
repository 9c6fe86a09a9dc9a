use tracing_subscriber::{fmt, EnvFilter};

/// Variable de entorno con el filtro de logs (sintaxis de `EnvFilter`)
pub const LOG_ENV: &str = "SALON_LOG";

/// Instala el subscriber de tracing. Si ya hay uno instalado no hace nada.
pub fn init(nivel_por_defecto: &str) {
    let filtro = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(nivel_por_defecto));

    let _ = fmt()
        .with_env_filter(filtro)
        .with_target(true)
        .try_init();
}
