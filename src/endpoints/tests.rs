//! Tests for the named endpoints

use super::*;
use crate::config::IssConfig;
use crate::error::Error;
use crate::http::HttpClient;
use crate::types::{QueryValue, Value};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BASE: &str = "https://iss.moex.com/iss";

async fn iss(server: &MockServer) -> Iss {
    let config = IssConfig {
        base_url: format!("{}/iss", server.uri()),
        ..IssConfig::default()
    };
    Iss::new(Arc::new(HttpClient::new().unwrap()), config)
}

fn envelope(tables: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!([{"charsetinfo": {"name": "utf-8"}}, tables]))
}

// ============================================================================
// UrlBuilder Tests
// ============================================================================

#[test]
fn test_url_builder_full_path() {
    let url = UrlBuilder::new(BASE)
        .history()
        .engine("stock")
        .market("shares")
        .board("TQBR")
        .security("SBER")
        .build();
    assert_eq!(
        url,
        "https://iss.moex.com/iss/history/engines/stock/markets/shares/boards/TQBR/securities/SBER.json"
    );
}

#[test]
fn test_url_builder_partial_paths() {
    assert_eq!(
        UrlBuilder::new(BASE).ending("index").build(),
        "https://iss.moex.com/iss/index.json"
    );
    assert_eq!(
        UrlBuilder::new("http://localhost/iss/")
            .statistics()
            .engine("futures")
            .market("forts")
            .ending("series")
            .build(),
        "http://localhost/iss/statistics/engines/futures/markets/forts/series.json"
    );
    assert_eq!(
        UrlBuilder::new(BASE)
            .engine("stock")
            .market("shares")
            .security("SBER")
            .ending("candleborders")
            .build(),
        "https://iss.moex.com/iss/engines/stock/markets/shares/securities/SBER/candleborders.json"
    );
}

// ============================================================================
// QueryBuilder Tests
// ============================================================================

#[test]
fn test_query_builder_all_params() {
    let query = QueryBuilder::new()
        .question("SBER")
        .interval(CandleInterval::Hour)
        .from_date(NaiveDate::from_ymd_opt(2024, 1, 2))
        .till_date(NaiveDate::from_ymd_opt(2024, 3, 4))
        .only("candles")
        .columns("candles", &["begin", "close"])
        .build();

    assert_eq!(query["q"], QueryValue::from("SBER"));
    assert_eq!(query["interval"], QueryValue::Int(60));
    assert_eq!(query["from"], QueryValue::from("2024-01-02"));
    assert_eq!(query["till"], QueryValue::from("2024-03-04"));
    assert_eq!(query["iss.only"], QueryValue::from("candles,history.cursor"));
    assert_eq!(query["candles.columns"], QueryValue::from("begin,close"));
}

#[test]
fn test_query_builder_skips_absent_values() {
    let no_columns: [&str; 0] = [];
    let query = QueryBuilder::new()
        .from_date(None)
        .till_date(None)
        .columns("history", &no_columns)
        .build();
    assert!(query.is_empty());
}

#[test]
fn test_candle_interval_codes() {
    let all = [
        (CandleInterval::Minute1, 1),
        (CandleInterval::Minute10, 10),
        (CandleInterval::Hour, 60),
        (CandleInterval::Day, 24),
        (CandleInterval::Week, 7),
        (CandleInterval::Month, 31),
        (CandleInterval::Quarter, 4),
    ];
    for (interval, code) in all {
        assert_eq!(interval.code(), code);
        assert_eq!(CandleInterval::from_code(code), Some(interval));
    }
    assert_eq!(CandleInterval::from_code(5), None);
}

#[test]
fn test_candle_interval_from_str() {
    assert_eq!("1h".parse::<CandleInterval>(), Ok(CandleInterval::Hour));
    assert_eq!("day".parse::<CandleInterval>(), Ok(CandleInterval::Day));
    assert_eq!("31".parse::<CandleInterval>(), Ok(CandleInterval::Month));
    assert!("2h".parse::<CandleInterval>().is_err());
}

#[test]
fn test_placeholder_from_str() {
    assert_eq!("boards".parse::<Placeholder>(), Ok(Placeholder::Boards));
    assert_eq!(
        "SecurityTypes".parse::<Placeholder>(),
        Ok(Placeholder::SecurityTypes)
    );
    assert!("tickers".parse::<Placeholder>().is_err());
}

// ============================================================================
// Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_reference_boards() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/iss/index.json"))
        .and(query_param("iss.json", "extended"))
        .and(query_param("iss.meta", "off"))
        .and(query_param_is_missing("start"))
        .respond_with(envelope(json!({
            "engines": [{"name": "stock"}],
            "boards": [{"boardid": "TQBR"}, {"boardid": "SMAL"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let boards = iss(&server).await.reference(Placeholder::Boards).await.unwrap();

    assert_eq!(boards.len(), 2);
    assert_eq!(boards[0]["boardid"], Value::from("TQBR"));
}

#[tokio::test]
async fn test_reference_missing_table() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/iss/index.json"))
        .respond_with(envelope(json!({"engines": []})))
        .mount(&server)
        .await;

    let err = iss(&server)
        .await
        .reference(Placeholder::Durations)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MissingTable { ref table } if table == "durations"));
}

#[tokio::test]
async fn test_find_securities_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/iss/securities.json"))
        .and(query_param("q", "1-02-00000-A"))
        .and(query_param("iss.only", "securities,history.cursor"))
        .and(query_param("securities.columns", "secid,regnumber"))
        .respond_with(envelope(json!({
            "securities": [{"secid": "SBER", "regnumber": "1-02-00000-A"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let found = iss(&server)
        .await
        .find_securities("1-02-00000-A", None)
        .await
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["secid"], Value::from("SBER"));
}

#[tokio::test]
async fn test_board_dates_uses_defaults() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/iss/history/engines/stock/markets/shares/boards/TQBR/dates.json",
        ))
        .respond_with(envelope(json!({
            "dates": [{"from": "1997-03-24", "till": "2024-05-31"}]
        })))
        .mount(&server)
        .await;

    let dates = iss(&server).await.board_dates(&Segments::new()).await.unwrap();

    assert_eq!(dates.len(), 1);
    assert_eq!(dates[0]["till"], Value::from("2024-05-31"));
}

#[tokio::test]
async fn test_board_securities_marketdata() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/iss/engines/stock/markets/shares/boards/SMAL/securities.json",
        ))
        .and(query_param("iss.only", "marketdata,history.cursor"))
        .and(query_param("marketdata.columns", "SECID,LAST"))
        .respond_with(envelope(json!({
            "marketdata": [{"SECID": "ABRD", "LAST": 251.5}]
        })))
        .mount(&server)
        .await;

    let columns = vec!["SECID".to_string(), "LAST".to_string()];
    let rows = iss(&server)
        .await
        .board_securities(
            SecuritiesTable::MarketData,
            Some(columns.as_slice()),
            &Segments::new().board("SMAL"),
        )
        .await
        .unwrap();

    assert_eq!(rows[0]["LAST"], Value::Float(251.5));
}

#[tokio::test]
async fn test_board_history_follows_cursor() {
    let server = MockServer::start().await;
    let url = "/iss/history/engines/stock/markets/shares/boards/TQBR/securities/SBER.json";

    Mock::given(method("GET"))
        .and(path(url))
        .and(query_param("from", "2024-01-01"))
        .and(query_param("history.columns", "BOARDID,TRADEDATE,CLOSE,VOLUME,VALUE"))
        .and(query_param_is_missing("start"))
        .respond_with(envelope(json!({
            "history": [
                {"BOARDID": "TQBR", "TRADEDATE": "2024-01-03", "CLOSE": 272.0},
                {"BOARDID": "TQBR", "TRADEDATE": "2024-01-04", "CLOSE": 273.5}
            ],
            "history.cursor": [{"INDEX": 0, "TOTAL": 3, "PAGESIZE": 2}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(url))
        .and(query_param("start", "2"))
        .respond_with(envelope(json!({
            "history": [{"BOARDID": "TQBR", "TRADEDATE": "2024-01-05", "CLOSE": 271.1}],
            "history.cursor": [{"INDEX": 2, "TOTAL": 3, "PAGESIZE": 2}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = HistoryQuery {
        from: NaiveDate::from_ymd_opt(2024, 1, 1),
        ..HistoryQuery::default()
    };
    let history = iss(&server)
        .await
        .board_history("SBER", &query, &Segments::new())
        .await
        .unwrap();

    assert_eq!(history.len(), 3);
    assert_eq!(history[2]["TRADEDATE"], Value::from("2024-01-05"));
}

#[tokio::test]
async fn test_market_candles_cursorless_until_empty() {
    let server = MockServer::start().await;
    let url = "/iss/engines/stock/markets/shares/securities/SBER/candles.json";

    Mock::given(method("GET"))
        .and(path(url))
        .and(query_param("interval", "60"))
        .and(query_param_is_missing("start"))
        .respond_with(envelope(json!({
            "candles": [
                {"begin": "2024-01-03 10:00:00", "close": 272.0},
                {"begin": "2024-01-03 11:00:00", "close": 272.4}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(url))
        .and(query_param("start", "2"))
        .respond_with(envelope(json!({"candles": []})))
        .expect(1)
        .mount(&server)
        .await;

    let query = CandleQuery {
        interval: CandleInterval::Hour,
        ..CandleQuery::default()
    };
    let candles = iss(&server)
        .await
        .market_candles("SBER", &query, &Segments::new())
        .await
        .unwrap();

    assert_eq!(candles.len(), 2);
}

#[tokio::test]
async fn test_candle_borders_table() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/iss/engines/currency/markets/selt/boards/CETS/securities/USD000UTSTOM/candleborders.json",
        ))
        .respond_with(envelope(json!({
            "borders": [{"begin": "2011-12-15", "end": "2024-05-31", "interval": 24}]
        })))
        .mount(&server)
        .await;

    let segments = Segments::new().engine("currency").market("selt").board("CETS");
    let borders = iss(&server)
        .await
        .board_candle_borders("USD000UTSTOM", &segments)
        .await
        .unwrap();

    assert_eq!(borders[0]["interval"], Value::Int(24));
}

#[tokio::test]
async fn test_statistics_series_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/iss/statistics/engines/futures/markets/forts/series.json"))
        .and(query_param("asset_code", "Si"))
        .and(query_param("show_expired", "1"))
        .respond_with(envelope(json!({
            "series": [{"secid": "SiM4", "asset_code": "Si"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let series = iss(&server)
        .await
        .statistics_series(Some("Si"), true, &Segments::new())
        .await
        .unwrap();

    assert_eq!(series[0]["secid"], Value::from("SiM4"));
}

#[tokio::test]
async fn test_http_error_from_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/iss/index.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = iss(&server)
        .await
        .reference(Placeholder::Engines)
        .await
        .unwrap_err();

    match err {
        Error::HttpStatus { url, status } => {
            assert_eq!(status, 500);
            assert!(url.contains("/iss/index.json"));
            assert!(url.contains("iss.meta=off"));
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[test]
fn test_client_applies_config() {
    let mut config = IssConfig::default();
    config.pagination.max_pages = Some(7);
    config.pagination.page_timeout_secs = Some(3);
    let iss = Iss::new(Arc::new(HttpClient::new().unwrap()), config);

    let client = iss.client("https://iss.moex.com/iss/index.json", Default::default());

    assert_eq!(client.pagination().max_pages, Some(7));
    assert_eq!(client.url(), "https://iss.moex.com/iss/index.json");
}

#[test]
fn test_from_config_rejects_invalid() {
    let config = IssConfig {
        base_url: "::".to_string(),
        ..IssConfig::default()
    };
    assert!(Iss::from_config(config).is_err());
}
