use base64::{engine::general_purpose::URL_SAFE_NO_PAD as BASE64_URL, Engine};

/// Redondea un monto a centavos
pub fn redondear(monto: f64) -> f64 {
    (monto * 100.0).round() / 100.0
}

/// Compara montos con tolerancia de medio centavo
pub fn montos_iguales(a: f64, b: f64) -> bool {
    (a - b).abs() < 0.005
}

/// Lee el claim `exp` (segundos unix) de un JWT sin verificar la firma.
/// Retorna None si el token no tiene formato JWT o no trae `exp`.
pub fn jwt_expiracion(token: &str) -> Option<i64> {
    let payload = token.split('.').nth(1)?;
    let bytes = BASE64_URL.decode(payload.trim_end_matches('=')).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    claims.get("exp").and_then(|v| v.as_i64())
}

/// true si el token es un JWT cuyo `exp` ya pasó (con margen de 30s).
/// Los tokens opacos nunca se consideran expirados: el 401 lo decide.
pub fn token_expirado(token: &str, ahora_unix: i64) -> bool {
    match jwt_expiracion(token) {
        Some(exp) => exp <= ahora_unix + 30,
        None => false,
    }
}
