use crate::api::Transport;
use crate::models::{Abono, Carrito, ClienteRef, ItemCarrito, TotalesCarrito};
use crate::AppState;

// Operaciones locales: no hacen round-trip al backend

pub fn obtener_carrito<T: Transport>(app: &AppState<T>) -> Result<Carrito, String> {
    Ok(app.carrito.actual()?)
}

pub fn agregar_item<T: Transport>(app: &AppState<T>, item: ItemCarrito) -> Result<Carrito, String> {
    app.carrito.modificar(|c| c.agregar_item(item))?;
    obtener_carrito(app)
}

pub fn quitar_item<T: Transport>(app: &AppState<T>, indice: usize) -> Result<Carrito, String> {
    app.carrito.modificar(|c| c.quitar_item(indice))?;
    obtener_carrito(app)
}

pub fn actualizar_cantidad<T: Transport>(
    app: &AppState<T>,
    indice: usize,
    cantidad: f64,
) -> Result<Carrito, String> {
    app.carrito
        .modificar(|c| c.actualizar_cantidad(indice, cantidad))?;
    obtener_carrito(app)
}

pub fn limpiar_carrito<T: Transport>(app: &AppState<T>) -> Result<(), String> {
    Ok(app.carrito.limpiar()?)
}

pub fn set_cliente<T: Transport>(app: &AppState<T>, cliente: ClienteRef) -> Result<Carrito, String> {
    app.carrito.modificar(|c| {
        c.set_cliente(cliente);
        Ok(())
    })?;
    obtener_carrito(app)
}

pub fn aplicar_abono<T: Transport>(
    app: &AppState<T>,
    abono: Abono,
    monto: f64,
) -> Result<Carrito, String> {
    app.carrito.modificar(|c| c.aplicar_abono(&abono, monto))?;
    obtener_carrito(app)
}

pub fn quitar_abono<T: Transport>(app: &AppState<T>) -> Result<Carrito, String> {
    app.carrito.modificar(|c| {
        c.quitar_abono();
        Ok(())
    })?;
    obtener_carrito(app)
}

pub fn totales_carrito<T: Transport>(app: &AppState<T>) -> Result<TotalesCarrito, String> {
    Ok(app.carrito.actual()?.totales())
}
