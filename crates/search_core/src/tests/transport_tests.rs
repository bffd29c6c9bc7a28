use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use shared::domain::{Filters, LocationCategory};
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
};

use super::*;

#[derive(Clone)]
struct ServerState {
    captured: Arc<Mutex<Option<oneshot::Sender<Value>>>>,
    status: StatusCode,
    body: Value,
}

async fn search_handler(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if let Some(tx) = state.captured.lock().await.take() {
        let _ = tx.send(body);
    }
    (state.status, Json(state.body.clone()))
}

async fn spawn_search_server(
    status: StatusCode,
    body: Value,
) -> (Url, oneshot::Receiver<Value>) {
    let (tx, rx) = oneshot::channel();
    let state = ServerState {
        captured: Arc::new(Mutex::new(Some(tx))),
        status,
        body,
    };
    let app = Router::new()
        .route("/api/orders/search", post(search_handler))
        .with_state(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    let url = Url::parse(&format!("http://{addr}/api/orders/search")).expect("url");
    (url, rx)
}

#[tokio::test]
async fn posts_search_body_and_decodes_orders() {
    let (url, captured) = spawn_search_server(
        StatusCode::OK,
        json!({
            "summary_do": [{"status": 0, "total": 1}],
            "order_list": [{
                "do_id": "DO-1",
                "goods_name": "Box",
                "origin_name": "JAKARTA",
                "destination_name": "MEDAN"
            }]
        }),
    )
    .await;
    let transport = HttpOrderTransport::new(url);

    let filters = Filters::empty().with(LocationCategory::Destination, "MDN");
    let response = transport
        .search_orders(&SearchRequest::new("box", &filters))
        .await
        .expect("search");

    assert_eq!(
        captured.await.expect("captured body"),
        json!({
            "keyword": "box",
            "filter": {
                "order_status": [0, 1, 2, 3, 4],
                "origin_code": [],
                "destination_code": ["MDN"]
            },
            "page": 1
        })
    );
    let orders = response.into_orders();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id.0, "DO-1");
}

#[tokio::test]
async fn missing_order_list_decodes_as_empty() {
    let (url, _captured) = spawn_search_server(StatusCode::OK, json!({"summary_do": []})).await;
    let response = HttpOrderTransport::new(url)
        .search_orders(&SearchRequest::new("", &Filters::empty()))
        .await
        .expect("search");
    assert!(response.into_orders().is_empty());
}

#[tokio::test]
async fn non_success_status_becomes_api_error() {
    let (url, _captured) = spawn_search_server(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"order_list": [{"do_id": "ignored"}]}),
    )
    .await;
    let err = HttpOrderTransport::new(url)
        .search_orders(&SearchRequest::new("", &Filters::empty()))
        .await
        .expect_err("status error");
    assert_eq!(err, TransportError::status(500, "Internal Server Error"));
    assert_eq!(err.to_string(), "API error: Internal Server Error");
}

#[tokio::test]
async fn mistyped_body_is_a_decode_error() {
    let (url, _captured) =
        spawn_search_server(StatusCode::OK, json!({"order_list": "not-a-list"})).await;
    let err = HttpOrderTransport::new(url)
        .search_orders(&SearchRequest::new("", &Filters::empty()))
        .await
        .expect_err("decode error");
    assert!(matches!(err, TransportError::Decode(_)));
}

#[tokio::test]
async fn tolerates_null_summary_and_missing_order_fields() {
    let (url, _captured) = spawn_search_server(
        StatusCode::OK,
        json!({
            "summary_do": null,
            "order_list": [{"do_id": "DO-7", "origin_name": "MALANG"}],
            "meta": null
        }),
    )
    .await;
    let transport = HttpOrderTransport::new(url.clone());
    assert_eq!(transport.endpoint(), &url);

    let orders = transport
        .search_orders(&SearchRequest::new("", &Filters::empty()))
        .await
        .expect("tolerant decode")
        .into_orders();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].origin_name, "MALANG");
    assert_eq!(orders[0].goods_name, "");
}

#[tokio::test]
async fn unreachable_endpoint_is_reported() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let url = Url::parse(&format!("http://{addr}/api/orders/search")).expect("url");
    let err = HttpOrderTransport::new(url)
        .search_orders(&SearchRequest::new("", &Filters::empty()))
        .await
        .expect_err("connection refused");
    assert!(matches!(err, TransportError::Unreachable(_)));
}
