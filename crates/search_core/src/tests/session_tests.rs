use async_trait::async_trait;
use shared::{
    domain::{LocationCategory, Order, OrderId},
    protocol::SearchRequest,
};
use tokio::{
    sync::{mpsc, oneshot},
    time::{sleep, Instant},
};

use super::*;
use crate::controller::Phase;

struct PendingCall {
    request: SearchRequest,
    reply: oneshot::Sender<Result<SearchResponse, TransportError>>,
}

impl PendingCall {
    fn respond(self, orders: Vec<Order>) {
        let _ = self.reply.send(Ok(SearchResponse::with_orders(orders)));
    }

    fn fail(self, err: TransportError) {
        let _ = self.reply.send(Err(err));
    }
}

/// Hands every request to the test, which answers it whenever it likes.
struct ScriptedTransport {
    calls: mpsc::UnboundedSender<PendingCall>,
}

#[async_trait]
impl OrderTransport for ScriptedTransport {
    async fn search_orders(
        &self,
        request: &SearchRequest,
    ) -> Result<SearchResponse, TransportError> {
        let (reply, rx) = oneshot::channel();
        self.calls
            .send(PendingCall {
                request: request.clone(),
                reply,
            })
            .map_err(|_| TransportError::Unreachable("script closed".to_string()))?;
        rx.await
            .map_err(|_| TransportError::Unreachable("no scripted reply".to_string()))?
    }
}

fn scripted_session() -> (SearchHandle, mpsc::UnboundedReceiver<PendingCall>) {
    let (calls_tx, calls_rx) = mpsc::unbounded_channel();
    let handle = spawn_search_session(
        Arc::new(ScriptedTransport { calls: calls_tx }),
        SessionSettings::default(),
    );
    (handle, calls_rx)
}

fn order(n: usize) -> Order {
    Order {
        id: OrderId(format!("o{n}")),
        goods_name: format!("goods {n}"),
        origin_name: "SURABAYA".to_string(),
        destination_name: "PEKANBARU".to_string(),
    }
}

fn orders(range: std::ops::RangeInclusive<usize>) -> Vec<Order> {
    range.map(order).collect()
}

async fn next_call(calls: &mut mpsc::UnboundedReceiver<PendingCall>) -> PendingCall {
    calls.recv().await.expect("transport call")
}

#[tokio::test(start_paused = true)]
async fn initial_search_fires_after_debounce_window() {
    let started = Instant::now();
    let (handle, mut calls) = scripted_session();

    let call = next_call(&mut calls).await;
    assert!(started.elapsed() >= DEBOUNCE_WINDOW);
    assert_eq!(call.request, SearchRequest::new("", &Default::default()));

    let view = handle.wait_until(|view| view.loading).await.expect("loading");
    assert_eq!(view.phase, Phase::Fetching);
    call.respond(orders(1..=3));

    let view = handle
        .wait_until(|view| view.phase == Phase::Success)
        .await
        .expect("success");
    assert_eq!(view.orders, orders(1..=3));
    assert!(!view.loading);
}

#[tokio::test(start_paused = true)]
async fn burst_of_edits_sends_only_the_last_one() {
    let (handle, mut calls) = scripted_session();

    handle
        .send(SearchCommand::SetKeyword("b".to_string()))
        .expect("send");
    sleep(Duration::from_millis(100)).await;
    handle
        .send(SearchCommand::SetKeyword("bo".to_string()))
        .expect("send");
    sleep(Duration::from_millis(100)).await;
    handle
        .send(SearchCommand::SetKeyword("box".to_string()))
        .expect("send");

    let call = next_call(&mut calls).await;
    assert_eq!(call.request.keyword, "box");
    call.respond(Vec::new());

    sleep(Duration::from_secs(2)).await;
    assert!(calls.try_recv().is_err(), "no further request expected");
}

#[tokio::test(start_paused = true)]
async fn pages_through_eight_orders() {
    let (handle, mut calls) = scripted_session();
    next_call(&mut calls).await.respond(orders(1..=8));

    let view = handle
        .wait_until(|view| view.phase == Phase::Success)
        .await
        .expect("loaded");
    assert_eq!(view.orders, orders(1..=6));
    assert_eq!(view.total_pages, 2);

    handle.send(SearchCommand::ChangePage(2)).expect("send");
    let view = handle
        .wait_until(|view| view.current_page == 2)
        .await
        .expect("page 2");
    assert_eq!(view.orders, orders(7..=8));

    handle.send(SearchCommand::ChangePage(3)).expect("send");
    sleep(Duration::from_millis(10)).await;
    assert_eq!(handle.view().current_page, 2);
    assert_eq!(handle.view().orders, orders(7..=8));
}

#[tokio::test(start_paused = true)]
async fn late_response_of_superseded_request_is_dropped() {
    let (handle, mut calls) = scripted_session();

    handle
        .send(SearchCommand::SetKeyword("a".to_string()))
        .expect("send");
    let call_a = next_call(&mut calls).await;
    assert_eq!(call_a.request.keyword, "a");

    handle
        .send(SearchCommand::SetKeyword("b".to_string()))
        .expect("send");
    let call_b = next_call(&mut calls).await;
    assert_eq!(call_b.request.keyword, "b");

    call_b.respond(orders(2..=2));
    handle
        .wait_until(|view| view.orders == orders(2..=2))
        .await
        .expect("b applied");

    call_a.respond(orders(1..=1));
    sleep(Duration::from_millis(50)).await;
    let view = handle.view();
    assert_eq!(view.orders, orders(2..=2));
    assert_eq!(view.keyword, "b");
    assert_eq!(view.phase, Phase::Success);
}

#[tokio::test(start_paused = true)]
async fn failure_clears_results_until_next_success() {
    let (handle, mut calls) = scripted_session();
    next_call(&mut calls)
        .await
        .fail(TransportError::status(502, "Bad Gateway"));

    let view = handle
        .wait_until(|view| view.phase == Phase::Failed)
        .await
        .expect("failed");
    assert!(view.orders.is_empty());
    assert!(!view.loading);
    assert_eq!(view.error.as_deref(), Some("API error: Bad Gateway"));
    assert!(!view.pagination_visible());

    handle
        .send(SearchCommand::SetKeyword("x".to_string()))
        .expect("send");
    next_call(&mut calls).await.respond(orders(1..=1));
    let view = handle
        .wait_until(|view| view.phase == Phase::Success)
        .await
        .expect("recovered");
    assert_eq!(view.error, None);
    assert_eq!(view.orders, orders(1..=1));
}

#[tokio::test(start_paused = true)]
async fn filter_editor_commits_only_on_apply_or_reset() {
    let (handle, mut calls) = scripted_session();
    next_call(&mut calls).await.respond(Vec::new());
    handle
        .wait_until(|view| view.phase == Phase::Success)
        .await
        .expect("loaded");

    handle.send(SearchCommand::OpenFilters).expect("send");
    handle
        .send(SearchCommand::ToggleFilter {
            category: LocationCategory::Origin,
            code: "JKT".to_string(),
        })
        .expect("send");
    handle.send(SearchCommand::CloseFilters).expect("send");
    sleep(Duration::from_secs(1)).await;
    assert!(calls.try_recv().is_err(), "closing must not fetch");
    assert!(handle.view().filters.is_empty());

    handle.send(SearchCommand::OpenFilters).expect("send");
    handle
        .send(SearchCommand::ToggleFilter {
            category: LocationCategory::Origin,
            code: "JKT".to_string(),
        })
        .expect("send");
    handle.send(SearchCommand::ApplyFilters).expect("send");
    let call = next_call(&mut calls).await;
    assert_eq!(call.request.filter.origin_code, vec!["JKT"]);
    call.respond(Vec::new());

    handle.send(SearchCommand::OpenFilters).expect("send");
    handle.send(SearchCommand::ResetFilters).expect("send");
    let call = next_call(&mut calls).await;
    assert!(call.request.filter.origin_code.is_empty());
    assert!(call.request.filter.destination_code.is_empty());
}

#[tokio::test(start_paused = true)]
async fn dropping_every_handle_stops_the_session() {
    let (handle, mut calls) = scripted_session();
    let mut views = handle.subscribe();
    drop(handle);

    assert!(calls.recv().await.is_none(), "pending debounce must not fire");
    while views.changed().await.is_ok() {}
}
