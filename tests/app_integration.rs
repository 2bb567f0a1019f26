use chrono::{Datelike, NaiveDate, Weekday};
use tracing::info;

use nkt::bond_yield::{StaticYieldSource, YieldSource};
use nkt::metrics::ValuationConstants;
use nkt::providers::investing::InvestingYieldSource;
use nkt::providers::tradingview::TradingViewYieldSource;
use nkt::providers::yahoo_finance::YahooQuoteProvider;
use nkt::store::JsonFileStore;
use nkt::update::{self, UpdateOutcome};

mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub fn chart_response(timestamp: i64, close: f64, volume: i64) -> String {
        format!(
            r#"{{
                "chart": {{
                    "result": [{{
                        "timestamp": [{timestamp}],
                        "indicators": {{
                            "quote": [{{
                                "close": [{close}],
                                "volume": [{volume}]
                            }}]
                        }}
                    }}]
                }}
            }}"#
        )
    }

    pub async fn create_quote_mock_server(symbol: &str, mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        let url_path = format!("/v8/finance/chart/{symbol}");

        Mock::given(method("GET"))
            .and(path(&url_path))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub async fn create_yield_mock_server(status: u16) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rates-bonds/japan-10-year-bond-yield"))
            .respond_with(ResponseTemplate::new(status).set_body_string("<html></html>"))
            .mount(&mock_server)
            .await;

        mock_server
    }
}

// 2025-07-07, a Monday.
const MONDAY: (i32, u32, u32) = (2025, 7, 7);
const MONDAY_TS: i64 = 1751846400;

fn day(ymd: (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap()
}

fn default_yield_chain(investing_base_url: &str) -> Vec<Box<dyn YieldSource>> {
    vec![
        Box::new(InvestingYieldSource::new(investing_base_url)),
        Box::new(TradingViewYieldSource),
        Box::new(StaticYieldSource::new(1.485)),
    ]
}

#[test_log::test(tokio::test)]
async fn test_full_update_flow_with_mocks() {
    let quote_server = test_utils::create_quote_mock_server(
        "N225T",
        &test_utils::chart_response(MONDAY_TS, 40000.0, 134_000_000),
    )
    .await;
    let yield_server = test_utils::create_yield_mock_server(200).await;

    let data_dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(data_dir.path().join("data/nikkei_data.json"));

    let provider = YahooQuoteProvider::new(&quote_server.uri());
    let sources = default_yield_chain(&yield_server.uri());
    let constants = ValuationConstants::default();

    let outcome = update::run_once(
        day(MONDAY),
        &provider,
        &sources,
        &store,
        "N225T",
        &constants,
    )
    .await
    .unwrap();
    info!(?outcome, "First run finished");

    let UpdateOutcome::Updated(entry) = outcome else {
        panic!("expected an update, got {outcome:?}");
    };
    assert_eq!(entry.date, day(MONDAY));
    assert_eq!(entry.price, 40000.0);
    assert_eq!(entry.volume, 134);
    assert_eq!(entry.bond_yield, 1.485);
    assert_eq!(entry.per, 16.0);
    assert_eq!(entry.pbr, 1.45);
    assert_eq!(entry.yield_rate, 6.25);
    assert_eq!(entry.dividend_yield, 2.25);
    assert_eq!(entry.change, 0.0);

    // The persisted document carries the wire field names.
    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert!(raw.contains(r#""date": "2025-07-07""#));
    assert!(raw.contains(r#""bond_yield": 1.485"#));
    assert!(raw.contains(r#""dividend_yield": 2.25"#));
}

#[test_log::test(tokio::test)]
async fn test_second_run_same_day_leaves_store_identical() {
    let quote_server = test_utils::create_quote_mock_server(
        "N225T",
        &test_utils::chart_response(MONDAY_TS, 40000.0, 134_000_000),
    )
    .await;
    let yield_server = test_utils::create_yield_mock_server(200).await;

    let data_dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(data_dir.path().join("data/nikkei_data.json"));
    let provider = YahooQuoteProvider::new(&quote_server.uri());
    let sources = default_yield_chain(&yield_server.uri());
    let constants = ValuationConstants::default();

    update::run_once(
        day(MONDAY),
        &provider,
        &sources,
        &store,
        "N225T",
        &constants,
    )
    .await
    .unwrap();
    let first = std::fs::read_to_string(store.path()).unwrap();

    let outcome = update::run_once(
        day(MONDAY),
        &provider,
        &sources,
        &store,
        "N225T",
        &constants,
    )
    .await
    .unwrap();

    assert_eq!(outcome, UpdateOutcome::AlreadyRecorded);
    let second = std::fs::read_to_string(store.path()).unwrap();
    assert_eq!(first, second);
}

#[test_log::test(tokio::test)]
async fn test_yield_chain_order_with_failing_sources() {
    let quote_server = test_utils::create_quote_mock_server(
        "N225T",
        &test_utils::chart_response(MONDAY_TS, 40000.0, 134_000_000),
    )
    .await;

    let data_dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(data_dir.path().join("data/nikkei_data.json"));
    let provider = YahooQuoteProvider::new(&quote_server.uri());
    let constants = ValuationConstants::default();

    // Source 1 fails at transport level, source 2 declines, source 3 answers.
    let sources = default_yield_chain("http://127.0.0.1:1");

    let outcome = update::run_once(
        day(MONDAY),
        &provider,
        &sources,
        &store,
        "N225T",
        &constants,
    )
    .await
    .unwrap();

    let UpdateOutcome::Updated(entry) = outcome else {
        panic!("expected an update, got {outcome:?}");
    };
    assert_eq!(entry.bond_yield, 1.485);
}

#[test_log::test(tokio::test)]
async fn test_yield_defaults_when_every_source_comes_up_empty() {
    let quote_server = test_utils::create_quote_mock_server(
        "N225T",
        &test_utils::chart_response(MONDAY_TS, 40000.0, 134_000_000),
    )
    .await;

    let data_dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(data_dir.path().join("data/nikkei_data.json"));
    let provider = YahooQuoteProvider::new(&quote_server.uri());
    let constants = ValuationConstants::default();

    let sources: Vec<Box<dyn YieldSource>> = vec![
        Box::new(InvestingYieldSource::new("http://127.0.0.1:1")),
        Box::new(TradingViewYieldSource),
    ];

    let outcome = update::run_once(
        day(MONDAY),
        &provider,
        &sources,
        &store,
        "N225T",
        &constants,
    )
    .await
    .unwrap();

    let UpdateOutcome::Updated(entry) = outcome else {
        panic!("expected an update, got {outcome:?}");
    };
    assert_eq!(entry.bond_yield, 1.5);
}

#[test_log::test(tokio::test)]
async fn test_retention_bound_over_long_run_sequence() {
    let quote_server = test_utils::create_quote_mock_server(
        "N225T",
        &test_utils::chart_response(MONDAY_TS, 40000.0, 134_000_000),
    )
    .await;
    let yield_server = test_utils::create_yield_mock_server(200).await;

    let data_dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(data_dir.path().join("data/nikkei_data.json"));
    let provider = YahooQuoteProvider::new(&quote_server.uri());
    let sources = default_yield_chain(&yield_server.uri());
    let constants = ValuationConstants::default();

    // 70 successive business days, well past the retention bound.
    let mut date = day((2025, 1, 6)); // a Monday
    let mut runs = 0;
    let mut last_run_date = date;
    while runs < 70 {
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            let outcome =
                update::run_once(date, &provider, &sources, &store, "N225T", &constants)
                    .await
                    .unwrap();
            assert!(matches!(outcome, UpdateOutcome::Updated(_)));
            last_run_date = date;
            runs += 1;
        }
        date = date + chrono::Duration::days(1);
    }

    let history = store.load();
    assert_eq!(history.len(), 60);
    assert_eq!(history.entries()[0].date, last_run_date);

    // All dates are distinct and newest-first.
    for pair in history.entries().windows(2) {
        assert!(pair[0].date > pair[1].date);
    }
}
