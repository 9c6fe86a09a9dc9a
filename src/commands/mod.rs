//! Operaciones que invoca la interfaz. Todas devuelven `Result<T, String>`
//! con el mensaje listo para mostrar.

pub mod abonos;
pub mod caja;
pub mod carrito;
pub mod config;
pub mod facturas;
pub mod metodos_pago;
pub mod pendientes;
pub mod sesion;
