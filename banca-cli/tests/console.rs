//! Console commands driven against an in-process backend.

mod common;

use banca_cli::console::Console;
use banca_cli::console::Flow;
use banca_cli::views;
use common::MockServer;

const CLIENTE_ACTIVO: &str = r#"{
    "id": 1, "nombre": "Jose Lema", "genero": "Masculino", "edad": 35,
    "identificacion": "1234567890", "direccion": "Otavalo sn y principal",
    "telefono": "098254785", "estado": true
}"#;

const CLIENTE_INACTIVO: &str = r#"{
    "id": 1, "nombre": "Jose Lema", "genero": "Masculino", "edad": 35,
    "identificacion": "1234567890", "direccion": "Otavalo sn y principal",
    "telefono": "098254785", "estado": false
}"#;

const CUENTA_INACTIVA: &str = r#"{
    "id": 7, "numeroCuenta": "478758", "tipoCuenta": "AHORRO", "saldoInicial": 2000,
    "saldoActual": 1425, "clienteId": 1, "nombreCliente": "Jose Lema", "estado": false
}"#;

fn console(server: &MockServer) -> Console {
    let dir = std::env::temp_dir().join("banca-cli-tests");
    Console::new(server.client(), views::all(dir))
}

fn list(item: &str) -> String {
    format!("[{}]", item)
}

fn clientes(count: i64, estado: bool) -> String {
    let items: Vec<String> = (1..=count)
        .map(|id| {
            format!(
                r#"{{"id": {id}, "nombre": "Cliente {id}", "genero": "F", "edad": 30,
                    "identificacion": "{id:010}", "direccion": "Quito", "estado": {estado}}}"#
            )
        })
        .collect();
    format!("[{}]", items.join(","))
}

// =============================================================================
// Customers
// =============================================================================

#[tokio::test]
async fn test_toggle_deactivates_active_cliente() {
    let server = MockServer::routes(&[
        ("GET /api/clientes", 200, list(CLIENTE_ACTIVO).as_str()),
        ("PATCH /api/clientes/1/desactivar", 200, ""),
    ])
    .await;
    let mut console = console(&server);

    let screen = console.start().await;
    assert!(screen.contains("Jose Lema"));

    let (flow, screen) = console.handle_line("a 1 toggle").await;
    assert_eq!(flow, Flow::Continue);
    assert!(screen.contains("Cliente Jose Lema desactivado junto con sus cuentas"));
    assert_eq!(
        server.calls(),
        vec![
            "GET /api/clientes",
            "PATCH /api/clientes/1/desactivar",
            "GET /api/clientes",
        ]
    );
}

#[tokio::test]
async fn test_toggle_reactivates_cliente_with_cuentas() {
    let validacion = r#"{
        "clienteActivo": false,
        "cuentas": [
            {"id": 7, "numeroCuenta": "478758", "tipoCuenta": "AHORRO", "estado": false, "deleted": false},
            {"id": 8, "numeroCuenta": "225487", "tipoCuenta": "CORRIENTE", "estado": true, "deleted": false},
            {"id": 9, "numeroCuenta": "495878", "tipoCuenta": "AHORRO", "estado": false, "deleted": true}
        ],
        "mensaje": "El cliente tiene cuentas inactivas"
    }"#;
    let server = MockServer::routes(&[
        ("GET /api/clientes", 200, list(CLIENTE_INACTIVO).as_str()),
        ("GET /api/clientes/1/validar-activacion", 200, validacion),
        ("PATCH /api/clientes/1/activar-con-cuentas", 200, ""),
    ])
    .await;
    let mut console = console(&server);
    console.start().await;

    let (_, screen) = console.handle_line("a 1 toggle").await;
    assert!(screen.contains("Cliente Jose Lema activado con 1 cuenta(s)"));

    let activation = server
        .requests()
        .into_iter()
        .find(|r| r.uri.ends_with("activar-con-cuentas"))
        .unwrap();
    assert_eq!(activation.body, r#"{"cuentasIds":[7]}"#);
}

#[tokio::test]
async fn test_toggle_reactivates_cliente_alone() {
    let server = MockServer::routes(&[
        ("GET /api/clientes", 200, list(CLIENTE_INACTIVO).as_str()),
        (
            "GET /api/clientes/1/validar-activacion",
            200,
            r#"{"clienteActivo": false, "cuentas": [], "mensaje": ""}"#,
        ),
        ("PATCH /api/clientes/1/activar", 200, ""),
    ])
    .await;
    let mut console = console(&server);
    console.start().await;

    let (_, screen) = console.handle_line("a 1 toggle").await;
    assert!(screen.contains("Cliente Jose Lema activado"));
    assert!(server.calls().contains(&"PATCH /api/clientes/1/activar".to_string()));
}

#[tokio::test]
async fn test_edit_and_create_report_missing_forms() {
    let server = MockServer::routes(&[("GET /api/clientes", 200, list(CLIENTE_ACTIVO).as_str())]).await;
    let mut console = console(&server);
    console.start().await;

    let (_, screen) = console.handle_line("a 1 edit").await;
    assert!(screen.contains("no está disponible en la consola"));
    let (_, screen) = console.handle_line("c").await;
    assert!(screen.contains("nuevo cliente"));
    assert_eq!(server.calls().len(), 1);
}

#[tokio::test]
async fn test_switching_customer_filter_returns_to_first_page() {
    let server = MockServer::routes(&[
        ("GET /api/clientes", 200, clientes(30, false).as_str()),
        ("GET /api/clientes/activos", 200, clientes(25, true).as_str()),
    ])
    .await;
    let mut console = console(&server);
    console.start().await;

    console.handle_line("p 3").await;
    assert_eq!(console.active().table().current_page(), 3);

    let (_, screen) = console.handle_line("activos").await;
    assert!(screen.contains("25 cliente(s) activo(s)"));
    assert_eq!(console.active().table().current_page(), 1);
    assert_eq!(console.active().table().filtered_len(), 25);

    console.handle_line("p 2").await;
    console.handle_line("todos").await;
    assert_eq!(console.active().table().current_page(), 1);
}

#[tokio::test]
async fn test_reload_keeps_the_current_page() {
    let server = MockServer::routes(&[("GET /api/clientes", 200, clientes(30, true).as_str())]).await;
    let mut console = console(&server);
    console.start().await;

    console.handle_line("p 2").await;
    console.handle_line("r").await;
    assert_eq!(console.active().table().current_page(), 2);
}

// =============================================================================
// Accounts
// =============================================================================

#[tokio::test]
async fn test_toggle_cuenta_of_inactive_cliente_activates_both() {
    let server = MockServer::routes(&[
        ("GET /api/clientes", 200, "[]"),
        ("GET /api/cuentas", 200, list(CUENTA_INACTIVA).as_str()),
        ("GET /api/clientes/1", 200, CLIENTE_INACTIVO),
        ("PATCH /api/clientes/1/activar-con-cuentas", 200, ""),
    ])
    .await;
    let mut console = console(&server);
    console.start().await;

    let (_, screen) = console.handle_line("v cuentas").await;
    assert!(screen.contains("Gestión de Cuentas"));
    assert!(screen.contains("$1,425.00"));

    let (_, screen) = console.handle_line("a 1 toggle").await;
    assert!(screen.contains("Cuenta 478758 y su cliente Jose Lema activados"));

    let activation = server.requests().into_iter().find(|r| r.method == "PATCH").unwrap();
    assert_eq!(activation.uri, "/api/clientes/1/activar-con-cuentas");
    assert_eq!(activation.body, r#"{"cuentasIds":[7]}"#);
}

#[tokio::test]
async fn test_switching_account_filter_returns_to_first_page() {
    let cuentas: Vec<String> = (1..=25)
        .map(|id| {
            format!(
                r#"{{"id": {id}, "numeroCuenta": "{id:06}", "tipoCuenta": "AHORRO", "saldoInicial": 100,
                    "saldoActual": 100, "clienteId": 1, "nombreCliente": "Jose Lema", "estado": true}}"#
            )
        })
        .collect();
    let cuentas = format!("[{}]", cuentas.join(","));
    let server = MockServer::routes(&[
        ("GET /api/clientes", 200, "[]"),
        ("GET /api/cuentas", 200, cuentas.as_str()),
        ("GET /api/cuentas/cliente/1", 200, list(CUENTA_INACTIVA).as_str()),
    ])
    .await;
    let mut console = console(&server);
    console.start().await;
    console.handle_line("v cuentas").await;

    console.handle_line("p 3").await;
    assert_eq!(console.active().table().current_page(), 3);

    console.handle_line("cliente 1").await;
    assert_eq!(console.active().table().current_page(), 1);
    assert_eq!(console.active().table().filtered_len(), 1);
}

#[tokio::test]
async fn test_toggle_cuenta_when_cliente_lookup_fails() {
    let server = MockServer::routes(&[
        ("GET /api/clientes", 200, "[]"),
        ("GET /api/cuentas", 200, list(CUENTA_INACTIVA).as_str()),
        ("PATCH /api/cuentas/7/activar", 200, ""),
    ])
    .await;
    let mut console = console(&server);
    console.start().await;
    console.handle_line("v cuentas").await;

    let (_, screen) = console.handle_line("a 1 toggle").await;
    assert!(screen.contains("Cuenta 478758 activada"));
    assert!(server.calls().contains(&"PATCH /api/cuentas/7/activar".to_string()));
}

#[tokio::test]
async fn test_view_action_prints_detail() {
    let server = MockServer::routes(&[
        ("GET /api/clientes", 200, "[]"),
        ("GET /api/cuentas", 200, list(CUENTA_INACTIVA).as_str()),
    ])
    .await;
    let mut console = console(&server);
    console.start().await;
    console.handle_line("v cuentas").await;

    let (_, screen) = console.handle_line("a 1 view").await;
    assert!(screen.contains("Cuenta 478758"));
    assert!(screen.contains("  Estado:  Inactiva"));
}

// =============================================================================
// Movements and reports
// =============================================================================

#[tokio::test]
async fn test_movement_filter_reports_count() {
    let server = MockServer::routes(&[
        ("GET /api/clientes", 200, "[]"),
        ("GET /api/movimientos", 200, "[]"),
        ("GET /api/movimientos/cuenta/7/rango", 200, "[]"),
    ])
    .await;
    let mut console = console(&server);
    console.start().await;
    console.handle_line("v movimientos").await;

    let (_, screen) = console.handle_line("cuenta 7 01/01/2026 31/01/2026").await;
    assert!(screen.contains("No se encontraron movimientos para los filtros aplicados."));
    assert!(
        server
            .calls()
            .contains(&"GET /api/movimientos/cuenta/7/rango?fechaInicio=2026-01-01&fechaFin=2026-01-31".to_string())
    );
}

#[tokio::test]
async fn test_customer_report_is_flattened() {
    let reporte = r#"{
        "clienteId": 1, "nombreCliente": "Jose Lema", "documentoIdentidad": "1234567890",
        "fechaInicio": "2026-01-01", "fechaFin": "2026-01-31", "totalMovimientos": 3,
        "cuentas": [
            {"cuentaId": 7, "numeroCuenta": "478758", "tipoCuenta": "AHORRO", "estado": true,
             "movimientos": [
                {"id": 1, "tipo": "RETIRO", "valor": -575, "saldoAnterior": 2000, "saldoNuevo": 1425,
                 "fechaMovimiento": "2026-01-10T09:30:00"}
             ]},
            {"cuentaId": 8, "numeroCuenta": "225487", "tipoCuenta": "CORRIENTE", "estado": true,
             "movimientos": [
                {"id": 2, "tipo": "DEPOSITO", "valor": 600, "saldoAnterior": 100, "saldoNuevo": 700},
                {"id": 3, "tipo": "DEPOSITO", "valor": 150, "saldoAnterior": 700, "saldoNuevo": 850}
             ]}
        ]
    }"#;
    let server = MockServer::routes(&[
        ("GET /api/clientes", 200, "[]"),
        ("GET /api/reportes/movimientos/cliente/1", 200, reporte),
    ])
    .await;
    let mut console = console(&server);
    console.start().await;
    console.handle_line("v reportes").await;

    let (_, screen) = console.handle_line("cliente 1 01/01/2026 31/01/2026").await;
    assert!(screen.contains("¡Reporte generado! 3 registro(s)"));
    assert!(screen.contains("== Movimientos del Cliente: Jose Lema =="));
    assert!(screen.contains("1-3 de 3"));

    let (_, screen) = console.handle_line("/225487").await;
    assert!(screen.contains("1-2 de 2"));

    let call = server.calls().pop().unwrap();
    assert!(call.starts_with("GET /api/reportes/movimientos/cliente/1?fechaInicio=01%2F01%2F2026"));
}

#[tokio::test]
async fn test_download_requires_a_report() {
    let server = MockServer::routes(&[("GET /api/clientes", 200, "[]")]).await;
    let mut console = console(&server);
    console.start().await;
    console.handle_line("v reportes").await;

    let (_, screen) = console.handle_line("descargar pdf").await;
    assert!(screen.contains("Error: Genere un reporte antes de descargarlo o enviarlo"));
}

// =============================================================================
// Console behaviour
// =============================================================================

#[tokio::test]
async fn test_bad_commands_do_not_stop_the_console() {
    let server = MockServer::routes(&[("GET /api/clientes", 200, list(CLIENTE_ACTIVO).as_str())]).await;
    let mut console = console(&server);
    console.start().await;

    let (flow, screen) = console.handle_line("a 5 toggle").await;
    assert_eq!(flow, Flow::Continue);
    assert!(screen.contains("Error: No hay fila 5 en esta página"));

    let (_, screen) = console.handle_line("a 1 borrar").await;
    assert!(screen.contains("Acción desconocida: borrar (disponibles: edit, toggle)"));

    let (_, screen) = console.handle_line("p 9").await;
    assert!(screen.contains("La página 9 no existe"));

    let (_, screen) = console.handle_line("t 7").await;
    assert!(screen.contains("Tamaño de página no disponible: 7 (opciones: 5, 10, 25, 50)"));
    assert_eq!(console.active().table().page_size(), 10);

    let (_, screen) = console.handle_line("t 25").await;
    assert!(screen.contains("(25 por página)"));

    let (flow, _) = console.handle_line("q").await;
    assert_eq!(flow, Flow::Quit);
}

#[tokio::test]
async fn test_load_failure_is_shown() {
    let server = MockServer::respond(503, r#"{"message":"Servicio no disponible"}"#).await;
    let mut console = console(&server);

    let screen = console.start().await;
    assert!(screen.starts_with("Error: Servicio no disponible"));
    assert!(screen.contains("No hay datos registrados"));
}

#[tokio::test]
async fn test_run_until_quit() {
    let server = MockServer::routes(&[("GET /api/clientes", 200, list(CLIENTE_ACTIVO).as_str())]).await;
    let mut console = console(&server);

    let mut output = Vec::new();
    console
        .run(&b"/lema\n\nq\nn\n"[..], &mut output)
        .await
        .unwrap();

    let output = String::from_utf8(output).unwrap();
    assert!(output.contains("clientes> "));
    assert!(output.contains("Buscar: \"lema\""));
    assert_eq!(server.calls().len(), 1);
}
