//! Integration tests against a running API.
//!
//! These tests require a reachable server and are ignored by default.
//! To run them, create a `.env` file in the banca-lib directory with:
//!
//! ```env
//! BANCA_API_URL=http://localhost:8080
//! ```
//!
//! Then run: `cargo test -p banca-lib -- --ignored`

use std::env;
use std::time::Duration;

use banca_lib::BancaClient;

fn load_client() -> Option<BancaClient> {
    let _ = dotenvy::dotenv();

    let url = env::var("BANCA_API_URL").ok()?;
    BancaClient::builder()
        .url(url)
        .timeout(Duration::from_secs(30))
        .build()
        .ok()
}

#[tokio::test]
#[ignore = "requires a running API configured in .env"]
async fn test_list_clientes() {
    let client = load_client().expect("Missing BANCA_API_URL. See module docs.");
    let clientes = client.clientes().list().await.unwrap();
    println!("{} clientes", clientes.len());
}

#[tokio::test]
#[ignore = "requires a running API configured in .env"]
async fn test_cuentas_of_first_cliente() {
    let client = load_client().expect("Missing BANCA_API_URL. See module docs.");
    let clientes = client.clientes().list().await.unwrap();
    let Some(id) = clientes.first().and_then(|c| c.id) else {
        return;
    };

    let cuentas = client.cuentas().list_by_cliente(id).await.unwrap();
    for cuenta in cuentas {
        assert_eq!(cuenta.cliente_id, id);
    }
}

#[tokio::test]
#[ignore = "requires a running API configured in .env"]
async fn test_unknown_cliente_is_not_found() {
    let client = load_client().expect("Missing BANCA_API_URL. See module docs.");
    let err = client.clientes().get(i64::MAX).await.unwrap_err();
    assert!(err.is_not_found(), "{}", err.message());
}
