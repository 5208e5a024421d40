use std::future::Future;
use std::pin::Pin;

use tickstat_core::{
    CoreError, DateRange, HistoryRequest, HttpClient, HttpError, HttpRequest, HttpResponse,
    PriceSeries, ProviderId, SourceErrorKind, YahooAdapter, YahooConfig,
};
use tickstat_tests::{dated_closes, fixture, symbol, Arc, DataSource, FixtureSource, Symbol};
use time::macros::date;

const AAPL_JANUARY: &str = r#"{
    "chart": {
        "result": [{
            "meta": {"currency": "USD", "symbol": "AAPL", "gmtoffset": -18000},
            "timestamp": [1704205800, 1704292200, 1704378600, 1704465000, 1704724200],
            "indicators": {
                "quote": [{"close": [185.64, 184.25, 181.91, 181.18, 185.56]}],
                "adjclose": [{"adjclose": [184.94, 183.55, 181.22, 180.49, 184.85]}]
            }
        }],
        "error": null
    }
}"#;

const NOT_FOUND: &str = r#"{
    "chart": {
        "result": null,
        "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}
    }
}"#;

const EMPTY_RESULT: &str = r#"{
    "chart": {
        "result": [{
            "meta": {"currency": "USD", "symbol": "AAPL", "gmtoffset": -18000},
            "indicators": {"quote": [{}], "adjclose": [{}]}
        }],
        "error": null
    }
}"#;

struct CannedHttpClient {
    response: Result<HttpResponse, HttpError>,
}

impl CannedHttpClient {
    fn yahoo(response: Result<HttpResponse, HttpError>) -> Arc<dyn DataSource> {
        Arc::new(YahooAdapter::with_http_client(
            Arc::new(Self { response }),
            YahooConfig::default(),
        ))
    }
}

impl HttpClient for CannedHttpClient {
    fn execute<'a>(
        &'a self,
        _request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let response = self.response.clone();
        Box::pin(async move { response })
    }
}

struct SourceCase {
    id: ProviderId,
    source: Arc<dyn DataSource>,
}

fn aapl() -> Symbol {
    symbol("AAPL")
}

fn first_week() -> DateRange {
    DateRange::parse("2024-01-02", "2024-01-05").expect("valid range")
}

fn source_cases() -> Vec<SourceCase> {
    let loaded = dated_closes(&[
        (date!(2023 - 12 - 29), 192.53),
        (date!(2024 - 01 - 02), 185.64),
        (date!(2024 - 01 - 03), 184.25),
        (date!(2024 - 01 - 04), 181.91),
        (date!(2024 - 01 - 05), 181.18),
        (date!(2024 - 01 - 08), 185.56),
    ]);

    vec![
        SourceCase {
            id: ProviderId::Fixture,
            source: fixture(aapl(), loaded),
        },
        SourceCase {
            id: ProviderId::Fixture,
            source: Arc::new(FixtureSource::synthetic()),
        },
        SourceCase {
            id: ProviderId::Yahoo,
            source: CannedHttpClient::yahoo(Ok(HttpResponse::ok_json(AAPL_JANUARY))),
        },
    ]
}

#[tokio::test]
async fn daily_closes_stay_inside_the_inclusive_range_for_all_sources() {
    for case in source_cases() {
        assert_eq!(case.source.id(), case.id);

        let closes = case
            .source
            .daily_closes(HistoryRequest::new(aapl(), first_week()))
            .await
            .unwrap_or_else(|error| panic!("source '{}' failed: {error}", case.id));

        assert_eq!(closes.symbol, aapl(), "source '{}': symbol", case.id);
        let dates: Vec<_> = closes.points.iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![
                date!(2024 - 01 - 02),
                date!(2024 - 01 - 03),
                date!(2024 - 01 - 04),
                date!(2024 - 01 - 05)
            ],
            "source '{}': both bounds are inclusive and weekends are absent",
            case.id
        );
        assert!(
            closes.points.iter().all(|p| p.close > 0.0),
            "source '{}': closes are positive",
            case.id
        );
    }
}

#[tokio::test]
async fn yahoo_unknown_symbol_maps_to_not_found() {
    let source = CannedHttpClient::yahoo(Ok(HttpResponse::with_status(404, NOT_FOUND)));

    let error = source
        .daily_closes(HistoryRequest::new(
            Symbol::parse("NOPE").expect("valid symbol"),
            first_week(),
        ))
        .await
        .expect_err("unknown symbol must fail");

    assert_eq!(error.kind(), SourceErrorKind::NotFound);
    assert!(!error.retryable());
}

#[tokio::test]
async fn yahoo_transport_failure_is_retryable_and_propagates_unmodified() {
    let source = CannedHttpClient::yahoo(Err(HttpError::new("connection reset")));

    let result = PriceSeries::fetch(source, aapl(), first_week()).await;

    match result {
        Err(CoreError::Source(error)) => {
            assert_eq!(error.kind(), SourceErrorKind::Unavailable);
            assert!(error.retryable());
        }
        other => panic!("expected a source error, got {other:?}"),
    }
}

#[tokio::test]
async fn yahoo_empty_result_becomes_data_unavailable() {
    let source = CannedHttpClient::yahoo(Ok(HttpResponse::ok_json(EMPTY_RESULT)));

    let result = PriceSeries::fetch(source, aapl(), first_week()).await;

    assert!(matches!(result, Err(CoreError::DataUnavailable { .. })));
}
