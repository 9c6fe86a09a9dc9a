mod common;

use common::{app, caja_json, con_caja_abierta, con_sesion};
use salon_caja::api::Metodo;
use salon_caja::commands::caja;
use salon_caja::models::{EstadoCaja, TipoMovimiento};
use serde_json::json;

#[tokio::test]
async fn ciclo_completo_de_caja() {
    let app = app();
    con_sesion(&app, "recepcionista").await;
    con_caja_abierta(&app).await;

    let fake = app.api.transport();
    let abrir = &fake.peticiones_a(Metodo::Post, "/caja/abrir")[0];
    assert_eq!(abrir.token.as_deref(), Some("acc-1"));
    assert_eq!(abrir.cuerpo.as_ref().unwrap()["sede_id"], json!(2));
    assert_eq!(abrir.cuerpo.as_ref().unwrap()["monto_apertura"], json!(100.0));

    fake.on_json(
        Metodo::Post,
        "/caja/1/movimientos",
        200,
        json!({
            "id": 1, "caja_id": 1, "tipo": "egreso", "monto": 20.0,
            "concepto": "Compra de toallas", "fecha": "2026-10-19T12:00:00"
        }),
    );
    let mov = caja::registrar_movimiento(&app, TipoMovimiento::Egreso, 20.0, " Compra de toallas ".to_string())
        .await
        .unwrap();
    assert_eq!(mov.tipo, TipoMovimiento::Egreso);

    fake.on_json(
        Metodo::Get,
        "/caja/1/movimientos",
        200,
        json!([
            { "id": 1, "caja_id": 1, "tipo": "egreso", "monto": 20.0,
              "concepto": "Compra de toallas", "fecha": "2026-10-19T12:00:00" },
            { "id": 2, "caja_id": 1, "tipo": "ingreso", "monto": 150.0,
              "concepto": "Ventas en efectivo", "fecha": "2026-10-19T18:00:00" }
        ]),
    );
    let mut cerrada = caja_json(1, "cerrada", 100.0);
    cerrada["monto_cierre"] = json!(225.0);
    fake.on_json(Metodo::Post, "/caja/1/cerrar", 200, cerrada);

    let arqueo = caja::cerrar_caja(&app, 225.0, Some("  ".to_string())).await.unwrap();
    assert_eq!(arqueo.caja.estado, EstadoCaja::Cerrada);
    assert_eq!(arqueo.monto_esperado, 230.0);
    assert_eq!(arqueo.diferencia, -5.0);

    let cierre = &fake.peticiones_a(Metodo::Post, "/caja/1/cerrar")[0];
    assert_eq!(cierre.cuerpo.as_ref().unwrap()["observacion"], json!(null));

    // Cerrada es inmutable: ni se cierra otra vez ni recibe movimientos
    let antes = fake.total_peticiones();
    let err = caja::cerrar_caja(&app, 10.0, None).await.unwrap_err();
    assert_eq!(err, "La caja ya está cerrada");
    assert!(caja::registrar_movimiento(&app, TipoMovimiento::Ingreso, 5.0, "x".to_string())
        .await
        .is_err());
    assert_eq!(fake.total_peticiones(), antes);
}

#[tokio::test]
async fn no_abre_dos_cajas() {
    let app = app();
    con_sesion(&app, "admin_sede").await;
    con_caja_abierta(&app).await;

    let err = caja::abrir_caja(&app, 50.0, None).await.unwrap_err();
    assert_eq!(err, "Ya existe una caja abierta. Ciérrela primero.");
    assert_eq!(app.api.transport().peticiones_a(Metodo::Post, "/caja/abrir").len(), 1);
}

#[tokio::test]
async fn cierre_rechazado_deja_la_caja_abierta() {
    let app = app();
    con_sesion(&app, "recepcionista").await;
    con_caja_abierta(&app).await;

    let fake = app.api.transport();
    fake.on_json(Metodo::Get, "/caja/1/movimientos", 200, json!([]));
    fake.on_json(
        Metodo::Post,
        "/caja/1/cerrar",
        400,
        json!({ "detail": "Hay facturas pendientes de cobro" }),
    );

    let err = caja::cerrar_caja(&app, 100.0, None).await.unwrap_err();
    assert_eq!(err, "Hay facturas pendientes de cobro");
    assert!(app.caja.abierta().unwrap().is_some());
}

#[tokio::test]
async fn validaciones_locales() {
    let app = app();
    con_sesion(&app, "recepcionista").await;

    assert!(caja::abrir_caja(&app, -1.0, None).await.is_err());
    let err = caja::registrar_movimiento(&app, TipoMovimiento::Ingreso, 10.0, "Propina".to_string())
        .await
        .unwrap_err();
    assert_eq!(err, "Debe abrir la caja antes de continuar");

    con_caja_abierta(&app).await;
    assert!(caja::registrar_movimiento(&app, TipoMovimiento::Ingreso, 0.0, "x".to_string())
        .await
        .is_err());
    assert!(caja::registrar_movimiento(&app, TipoMovimiento::Ingreso, 3.0, "   ".to_string())
        .await
        .is_err());
}

#[tokio::test]
async fn especialista_no_opera_caja() {
    let app = app();
    con_sesion(&app, "especialista").await;
    let err = caja::abrir_caja(&app, 10.0, None).await.unwrap_err();
    assert_eq!(err, "Su rol no tiene permiso para abrir la caja");
}

#[tokio::test]
async fn sin_caja_abierta_404_o_null() {
    let app = app();
    con_sesion(&app, "recepcionista").await;

    // Ruta sin registrar: el fake responde 404
    assert!(caja::obtener_caja_abierta(&app).await.unwrap().is_none());

    app.api
        .transport()
        .on_json(Metodo::Get, "/caja/abierta", 200, json!(null));
    assert!(caja::obtener_caja_abierta(&app).await.unwrap().is_none());

    let consulta = &app.api.transport().peticiones_a(Metodo::Get, "/caja/abierta")[0];
    assert_eq!(consulta.query, vec![("sede_id".to_string(), "2".to_string())]);
}

#[tokio::test]
async fn montos_de_caja_no_finitos() {
    let app = app();
    con_sesion(&app, "recepcionista").await;

    assert!(caja::abrir_caja(&app, f64::INFINITY, None).await.is_err());
    assert!(caja::abrir_caja(&app, f64::NAN, None).await.is_err());
    assert_eq!(app.api.transport().total_peticiones(), 1);

    con_caja_abierta(&app).await;
    let antes = app.api.transport().total_peticiones();
    assert!(
        caja::registrar_movimiento(&app, TipoMovimiento::Ingreso, f64::INFINITY, "x".to_string())
            .await
            .is_err()
    );
    assert!(caja::cerrar_caja(&app, f64::NAN, None).await.is_err());
    assert_eq!(app.api.transport().total_peticiones(), antes);
    assert!(app.caja.abierta().unwrap().is_some());
}
