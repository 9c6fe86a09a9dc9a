use super::{ApiClient, Metodo, Peticion, Transport};
use crate::error::ApiError;
use crate::models::{
    Abono, AbonoCreate, AbrirCaja, AnularFactura, Caja, CerrarCaja, Factura, FacturaCreate,
    FacturaUpdate, FiltrosFactura, MetodoPago, MovimientoCaja, NuevoMovimiento, Pagina,
    ServicioPendiente,
};

fn query_sede(sede_id: Option<i64>) -> Vec<(String, String)> {
    sede_id
        .map(|s| vec![("sede_id".to_string(), s.to_string())])
        .unwrap_or_default()
}

impl<T: Transport> ApiClient<T> {
    // --- Caja ---

    /// Caja abierta de la sede. 404 o `null` significan que no hay ninguna.
    pub async fn caja_abierta(&self, sede_id: Option<i64>) -> Result<Option<Caja>, ApiError> {
        match self.get::<Option<Caja>>("/caja/abierta", query_sede(sede_id)).await {
            Ok(caja) => Ok(caja),
            Err(e) if e.es_no_encontrado() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn abrir_caja(&self, datos: &AbrirCaja) -> Result<Caja, ApiError> {
        self.post("/caja/abrir", datos).await
    }

    pub async fn cerrar_caja(&self, caja_id: i64, datos: &CerrarCaja) -> Result<Caja, ApiError> {
        self.post(&format!("/caja/{}/cerrar", caja_id), datos).await
    }

    pub async fn movimientos_caja(&self, caja_id: i64) -> Result<Vec<MovimientoCaja>, ApiError> {
        self.get(&format!("/caja/{}/movimientos", caja_id), Vec::new())
            .await
    }

    pub async fn registrar_movimiento(
        &self,
        caja_id: i64,
        datos: &NuevoMovimiento,
    ) -> Result<MovimientoCaja, ApiError> {
        self.post(&format!("/caja/{}/movimientos", caja_id), datos)
            .await
    }

    pub async fn historial_cajas(
        &self,
        sede_id: Option<i64>,
        page: i64,
        page_size: i64,
    ) -> Result<Pagina<Caja>, ApiError> {
        let mut query = query_sede(sede_id);
        query.push(("page".to_string(), page.to_string()));
        query.push(("page_size".to_string(), page_size.to_string()));
        self.get("/caja", query).await
    }

    // --- Facturas ---

    pub async fn listar_facturas(
        &self,
        filtros: &FiltrosFactura,
        page: i64,
        page_size: i64,
    ) -> Result<Pagina<Factura>, ApiError> {
        self.get("/facturas", filtros.como_query(page, page_size))
            .await
    }

    pub async fn obtener_factura(&self, id: i64) -> Result<Factura, ApiError> {
        self.get(&format!("/facturas/{}", id), Vec::new()).await
    }

    pub async fn crear_factura(&self, datos: &FacturaCreate) -> Result<Factura, ApiError> {
        self.post("/facturas", datos).await
    }

    pub async fn actualizar_factura(
        &self,
        id: i64,
        datos: &FacturaUpdate,
    ) -> Result<Factura, ApiError> {
        self.put(&format!("/facturas/{}", id), datos).await
    }

    pub async fn anular_factura(&self, id: i64, motivo: &str) -> Result<Factura, ApiError> {
        let datos = AnularFactura {
            motivo: motivo.to_string(),
        };
        self.post(&format!("/facturas/{}/anular", id), &datos).await
    }

    pub async fn servicios_pendientes(
        &self,
        sede_id: Option<i64>,
    ) -> Result<Vec<ServicioPendiente>, ApiError> {
        self.get("/facturas/pendientes", query_sede(sede_id)).await
    }

    // --- Abonos ---

    pub async fn listar_abonos(&self, cliente_id: i64) -> Result<Vec<Abono>, ApiError> {
        self.get(
            "/abonos",
            vec![("cliente_id".to_string(), cliente_id.to_string())],
        )
        .await
    }

    pub async fn crear_abono(&self, datos: &AbonoCreate) -> Result<Abono, ApiError> {
        self.post("/abonos", datos).await
    }

    pub async fn anular_abono(&self, id: i64, motivo: &str) -> Result<Abono, ApiError> {
        self.solicitar(
            Peticion::new(Metodo::Post, format!("/abonos/{}/anular", id))
                .cuerpo(serde_json::json!({ "motivo": motivo })),
        )
        .await
    }

    // --- Métodos de pago ---

    pub async fn metodos_pago(&self) -> Result<Vec<MetodoPago>, ApiError> {
        self.get("/metodos-pago", Vec::new()).await
    }
}
