use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Rol {
    SuperAdmin,
    AdminSede,
    Recepcionista,
    Especialista,
}

impl Rol {
    /// Abrir/cerrar caja, registrar movimientos, facturar y recibir abonos
    pub fn puede_operar_caja(&self) -> bool {
        matches!(self, Rol::SuperAdmin | Rol::AdminSede | Rol::Recepcionista)
    }

    /// Anular facturas y abonos
    pub fn puede_anular(&self) -> bool {
        matches!(self, Rol::SuperAdmin | Rol::AdminSede)
    }

    pub fn puede_administrar_sedes(&self) -> bool {
        matches!(self, Rol::SuperAdmin)
    }
}

/// Usuario autenticado, tal como lo devuelve `/auth/login`
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Usuario {
    pub id: i64,
    pub nombre: String,
    pub email: String,
    pub rol: Rol,
    pub sede_id: Option<i64>,
    #[serde(default = "activo_por_defecto")]
    pub activo: bool,
}

fn activo_por_defecto() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Tokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Sesión activa (en RAM y persistida en la base local)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SesionActiva {
    pub usuario: Usuario,
    pub tokens: Tokens,
}

impl SesionActiva {
    /// Sede sobre la que opera la sesión. El super admin elige la sede
    /// desde la configuración; el resto trabaja en la suya.
    pub fn sede_efectiva(&self, sede_config: Option<i64>) -> Option<i64> {
        if self.usuario.rol.puede_administrar_sedes() {
            sede_config.or(self.usuario.sede_id)
        } else {
            self.usuario.sede_id
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Credenciales {
    pub email: String,
    pub password: String,
}

/// Respuesta de `/auth/login`
#[derive(Debug, Deserialize)]
pub struct RespuestaLogin {
    pub access_token: String,
    pub refresh_token: String,
    pub usuario: Usuario,
}

/// Respuesta de `/auth/refresh`; algunos backends no rotan el refresh token
#[derive(Debug, Deserialize)]
pub struct RespuestaRefresh {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sesion(rol: Rol, sede_id: Option<i64>) -> SesionActiva {
        SesionActiva {
            usuario: Usuario {
                id: 1,
                nombre: "Ana".to_string(),
                email: "ana@salon.test".to_string(),
                rol,
                sede_id,
                activo: true,
            },
            tokens: Tokens {
                access_token: "a".to_string(),
                refresh_token: "r".to_string(),
            },
        }
    }

    #[test]
    fn permisos_por_rol() {
        assert!(Rol::Recepcionista.puede_operar_caja());
        assert!(!Rol::Recepcionista.puede_anular());
        assert!(!Rol::Especialista.puede_operar_caja());
        assert!(Rol::AdminSede.puede_anular());
        assert!(!Rol::AdminSede.puede_administrar_sedes());
        assert!(Rol::SuperAdmin.puede_administrar_sedes());
    }

    #[test]
    fn rol_en_snake_case() {
        let json = serde_json::to_string(&Rol::AdminSede).unwrap();
        assert_eq!(json, r#""admin_sede""#);
        let rol: Rol = serde_json::from_str(r#""super_admin""#).unwrap();
        assert_eq!(rol, Rol::SuperAdmin);
    }

    #[test]
    fn sede_efectiva_segun_rol() {
        assert_eq!(sesion(Rol::SuperAdmin, None).sede_efectiva(Some(4)), Some(4));
        assert_eq!(sesion(Rol::SuperAdmin, Some(2)).sede_efectiva(None), Some(2));
        assert_eq!(sesion(Rol::Recepcionista, Some(2)).sede_efectiva(Some(4)), Some(2));
    }
}
