//! End-to-end tests against a live server on an ephemeral port.

#![allow(clippy::panic)]

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use serde_json::{Value, json};
use symbol_manager::api;
use symbol_manager::app_state::AppState;
use symbol_manager::config::ManagerConfig;
use symbol_manager::service::SymbolService;

const POOL: &str = "0x1234567890abcdef1234567890abcdef12345678";

async fn spawn_app(root: &Path) -> String {
    let config = ManagerConfig::for_dirs(root.join("data"), root.join("out"));
    let symbol_service = Arc::new(SymbolService::new(&config));
    let Ok(()) = symbol_service.bootstrap().await else {
        panic!("bootstrap failed");
    };
    let app = api::build_app(AppState { symbol_service });

    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind failed");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("no local addr");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    base_url(addr)
}

fn base_url(addr: SocketAddr) -> String {
    format!("http://{addr}")
}

async fn body(resp: reqwest::Response) -> Value {
    let Ok(value) = resp.json::<Value>().await else {
        panic!("response is not JSON");
    };
    value
}

#[tokio::test]
async fn dex_lifecycle_over_http() {
    let Ok(dir) = tempfile::tempdir() else {
        panic!("tempdir");
    };
    let base = spawn_app(dir.path()).await;
    let client = reqwest::Client::new();

    let request = json!({
        "dex_type": "uniswap_v2",
        "pool_address": POOL,
        "pool_name": "weth-usdc",
        "altcoin_quantity": 100,
    });

    let Ok(resp) = client
        .post(format!("{base}/api/dex/symbols"))
        .json(&request)
        .send()
        .await
    else {
        panic!("create request failed");
    };
    assert_eq!(resp.status(), reqwest::StatusCode::CREATED);
    let created = body(resp).await;
    assert_eq!(created["pool_name"], "WETH-USDC");
    let Some(id) = created["id"].as_str().map(str::to_string) else {
        panic!("missing id");
    };

    // Same address, different case
    let duplicate = json!({
        "dex_type": "sushiswap_v2",
        "pool_address": POOL.to_uppercase().replacen("0X", "0x", 1),
        "pool_name": "other",
        "altcoin_quantity": 5,
    });
    let Ok(resp) = client
        .post(format!("{base}/api/dex/symbols"))
        .json(&duplicate)
        .send()
        .await
    else {
        panic!("duplicate request failed");
    };
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    assert_eq!(body(resp).await["error"]["code"], 1002);

    let Ok(resp) = client.get(format!("{base}/api/files/content/pooladdress")).send().await else {
        panic!("content request failed");
    };
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let content = body(resp).await;
    let Some(text) = content["content"].as_str() else {
        panic!("missing content");
    };
    assert!(text.ends_with(&format!("uniswap_v2:{POOL}:WETH-USDC:100")));

    let Ok(resp) = client
        .put(format!("{base}/api/dex/symbols/does-not-exist"))
        .json(&request)
        .send()
        .await
    else {
        panic!("update request failed");
    };
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

    let Ok(resp) = client.delete(format!("{base}/api/dex/symbols/{id}")).send().await else {
        panic!("delete request failed");
    };
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    assert_eq!(body(resp).await["message"], "Symbol deleted successfully");

    let Ok(resp) = client.get(format!("{base}/api/dex/symbols")).send().await else {
        panic!("list request failed");
    };
    assert_eq!(body(resp).await, json!([]));
}

#[tokio::test]
async fn cex_validation_and_file_status() {
    let Ok(dir) = tempfile::tempdir() else {
        panic!("tempdir");
    };
    let base = spawn_app(dir.path()).await;
    let client = reqwest::Client::new();

    let Ok(resp) = client
        .post(format!("{base}/api/cex/symbols"))
        .json(&json!({ "ticker_name": "b1", "exchange_name": "binance" }))
        .send()
        .await
    else {
        panic!("invalid create failed");
    };
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);

    let Ok(resp) = client
        .post(format!("{base}/api/cex/symbols"))
        .json(&json!({ "ticker_name": "btc", "exchange_name": "binance" }))
        .send()
        .await
    else {
        panic!("create failed");
    };
    assert_eq!(resp.status(), reqwest::StatusCode::CREATED);

    let Ok(resp) = client.get(format!("{base}/api/files/status")).send().await else {
        panic!("status request failed");
    };
    let status = body(resp).await;
    assert_eq!(status["cex_symbols_count"], 1);
    assert_eq!(status["dex_symbols_count"], 0);
    assert_eq!(status["cex_symbols_file_exists"], true);

    let Ok(resp) = client
        .get(format!("{base}/api/files/download/cex_symbols"))
        .send()
        .await
    else {
        panic!("download request failed");
    };
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let disposition = resp
        .headers()
        .get(reqwest::header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    assert_eq!(
        disposition.as_deref(),
        Some("attachment; filename=\"cex_symbols.txt\"")
    );
    let Ok(text) = resp.text().await else {
        panic!("download body");
    };
    assert_eq!(text, "BTC:binance:BTC");

    let Ok(resp) = client.get(format!("{base}/api/files/content/unknown")).send().await else {
        panic!("unknown kind request failed");
    };
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn system_endpoints_respond() {
    let Ok(dir) = tempfile::tempdir() else {
        panic!("tempdir");
    };
    let base = spawn_app(dir.path()).await;
    let client = reqwest::Client::new();

    let Ok(resp) = client.get(format!("{base}/health")).send().await else {
        panic!("health request failed");
    };
    assert_eq!(body(resp).await["status"], "healthy");

    let Ok(resp) = client.get(format!("{base}/config/dex-types")).send().await else {
        panic!("dex-types request failed");
    };
    let types = body(resp).await;
    assert_eq!(types.as_array().map(Vec::len), Some(4));

    let Ok(resp) = client
        .post(format!("{base}/api/files/backup/create"))
        .send()
        .await
    else {
        panic!("backup request failed");
    };
    let backup = body(resp).await;
    assert_eq!(backup["message"], "Backup created successfully");
    assert_eq!(backup["files"].as_array().map(Vec::len), Some(3));
}
