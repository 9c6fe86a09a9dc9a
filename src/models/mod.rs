pub mod abono;
pub mod caja;
pub mod carrito;
pub mod cliente;
pub mod factura;
pub mod metodo_pago;
pub mod pagina;
pub mod pendiente;
pub mod sesion;

pub use abono::*;
pub use caja::*;
pub use carrito::*;
pub use cliente::*;
pub use factura::*;
pub use metodo_pago::*;
pub use pagina::*;
pub use pendiente::*;
pub use sesion::*;
