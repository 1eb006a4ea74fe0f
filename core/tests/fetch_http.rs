use chrono::NaiveDate;
use roadcore::fetch::{FetchError, IncidentFetcher};
use roadcore::filter::query::QueryBuilder;
use roadcore::filter::state::FilterState;
use roadcore::incident::IncidentRecord;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use warp::Filter;

fn sample_records() -> Vec<IncidentRecord> {
    vec![
        IncidentRecord::new(1, 39.9526, -75.1652, 4, 0.92, NaiveDate::from_ymd_opt(2025, 5, 2).unwrap()),
        IncidentRecord::new(2, 39.9610, -75.1550, 2, 0.61, NaiveDate::from_ymd_opt(2025, 5, 4).unwrap()),
    ]
}

/// Stub incident endpoint that records the raw query string it receives.
fn spawn_stub(records: Vec<IncidentRecord>) -> (SocketAddr, Arc<Mutex<Option<String>>>) {
    let seen_query = Arc::new(Mutex::new(None));
    let seen_for_route = seen_query.clone();

    let route = warp::path!("api" / "potholes")
        .and(warp::get())
        .and(warp::query::raw())
        .map(move |raw: String| {
            *seen_for_route.lock().unwrap() = Some(raw);
            warp::reply::json(&records)
        });

    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    (addr, seen_query)
}

#[tokio::test]
async fn fetch_sends_the_canonical_query_and_decodes_records() {
    let (addr, seen_query) = spawn_stub(sample_records());
    let fetcher = IncidentFetcher::new(format!("http://{addr}/api/potholes"));

    let mut state = FilterState::new();
    state.toggle_severity(4, true);
    state.toggle_severity(2, true);
    state.set_confidence(0.5);
    let query = QueryBuilder::build(&state);

    let records = fetcher.fetch(&query).await.unwrap();
    assert_eq!(records, sample_records());
    assert_eq!(
        seen_query.lock().unwrap().as_deref(),
        Some("severity=2&severity=4&conf_min=0.50")
    );
}

#[tokio::test]
async fn unparsable_body_surfaces_a_decode_error() {
    let route = warp::path!("api" / "potholes").map(|| "not a record list");
    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    let fetcher = IncidentFetcher::new(format!("http://{addr}/api/potholes"));
    let query = QueryBuilder::build(&FilterState::new());
    match fetcher.fetch(&query).await {
        Err(FetchError::Decode(_)) => {}
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_failure_surfaces_a_network_error() {
    // Nothing listens on this port.
    let fetcher = IncidentFetcher::new("http://127.0.0.1:9/api/potholes");
    let query = QueryBuilder::build(&FilterState::new());
    match fetcher.fetch(&query).await {
        Err(FetchError::Network(_)) => {}
        other => panic!("expected network error, got {other:?}"),
    }
}

#[tokio::test]
async fn error_status_surfaces_a_network_error() {
    let route = warp::path!("api" / "potholes")
        .map(|| warp::reply::with_status("boom", warp::http::StatusCode::INTERNAL_SERVER_ERROR));
    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    let fetcher = IncidentFetcher::new(format!("http://{addr}/api/potholes"));
    let query = QueryBuilder::build(&FilterState::new());
    match fetcher.fetch(&query).await {
        Err(FetchError::Network(_)) => {}
        other => panic!("expected network error, got {other:?}"),
    }
}
