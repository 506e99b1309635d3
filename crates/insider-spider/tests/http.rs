use insider_spider::{Config, Spider};
use std::time::{Duration, Instant};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER_AGENT: &str = "Jane Doe jane.doe@example.com";

fn spider(server: &MockServer) -> Spider {
    let config = Config {
        base_url: server.uri(),
        user_agent: USER_AGENT.to_string(),
        ..Config::default()
    };
    Spider::new(config.without_delays()).unwrap()
}

#[tokio::test]
async fn every_request_carries_the_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Archives/edgar/daily-index/2025/QTR1/master.20250102.idx"))
        .and(header("user-agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "-----\n1000045|NICHOLAS FINANCIAL INC|4|20250102|edgar/data/1000045/0001000045-25-000001.txt\n",
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Archives/edgar/data/1000045/000100004525000001/index.json"))
        .and(header("user-agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"directory": {"item": []}}"#))
        .expect(1)
        .mount(&server)
        .await;

    let spider = spider(&server);
    let day = chrono::NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
    let filings = spider.form4_filings(day, day, false).await;
    assert_eq!(filings.len(), 1);

    let located = spider
        .locate_form4(&filings[0].record.cik, &filings[0].record.filename)
        .await
        .unwrap();
    assert_eq!(located, None);

    // a request without the user agent would have matched neither mock
    server.verify().await;
}

#[tokio::test]
async fn get_sleeps_before_each_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .mount(&server)
        .await;

    let spider = spider(&server);
    let url = format!("{}/ping", server.uri());
    let delay = Duration::from_millis(250);

    let time = Instant::now();
    let body = spider.get_text(&url, delay).await.unwrap();
    assert_eq!(body, "pong");
    assert!(time.elapsed() >= delay);

    let time = Instant::now();
    spider.get(&url, delay).await.unwrap();
    spider.get(&url, delay).await.unwrap();
    assert!(time.elapsed() >= delay * 2);
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let spider = spider(&server);
    let err = spider
        .get(&format!("{}/gone", server.uri()), Duration::ZERO)
        .await
        .unwrap_err();
    assert!(matches!(err, insider_spider::Error::Http(_)));
}
