//! Integration tests for the crawler
//!
//! These tests use wiremock to serve catalog pages and run the full
//! fetch, extract and CSV cycle end-to-end.

use krisha_scout::config::Config;
use krisha_scout::crawler::{Coordinator, Pacing};
use krisha_scout::output::{CsvSink, PersistOutcome, Termination};
use krisha_scout::CrawlState;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tracing::instrument::WithSubscriber;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Collects formatted log output in memory
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn card(id: u32, title: &str, price: &str, address: &str) -> String {
    format!(
        r#"<div class="a-card">
             <a class="a-card__link" href="/a/show/{id}"></a>
             <a class="a-card__title">{title}</a>
             <div class="a-card__price">{price}</div>
             <div class="a-card__subtitle">{address}</div>
           </div>"#
    )
}

fn page(cards: &[String]) -> String {
    format!(
        "<html><body><section class=\"a-list\">{}</section></body></html>",
        cards.concat()
    )
}

fn test_config(server: &MockServer, csv_path: &Path) -> Config {
    let mut config = Config::default();
    config.site.base_url = format!("{}/prodazha/kvartiry", server.uri());
    config.site.origin = server.uri();
    config.site.timeout_secs = 5;
    config.output.csv_path = csv_path.to_string_lossy().into_owned();
    config
}

fn coordinator(config: &Config) -> Coordinator {
    Coordinator::new(config)
        .expect("Failed to create coordinator")
        .with_pacing(Pacing::disabled())
}

async fn mount_page(server: &MockServer, number: u32, body: String) {
    Mock::given(method("GET"))
        .and(path("/prodazha/kvartiry/aktobe/"))
        .and(query_param("page", number.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

/// Reads the CSV file without its byte-order mark, split into lines
fn read_csv_lines(path: &Path) -> Vec<String> {
    let bytes = std::fs::read(path).expect("CSV file should exist");
    assert!(bytes.starts_with(b"\xEF\xBB\xBF"), "CSV must start with a BOM");

    let text = String::from_utf8(bytes[3..].to_vec()).expect("CSV must be UTF-8");
    assert!(text.ends_with("\r\n"));
    text.trim_end_matches("\r\n")
        .split("\r\n")
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_failed_page_ends_crawl_and_keeps_records() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("results.csv");

    mount_page(
        &server,
        1,
        page(&[
            card(101, "2-комнатная квартира · 45.5 м² · 3/5 этаж", "25 500 000 〒", "Aktobe, Абулхаир хана"),
            card(102, "1-комнатная квартира · 38 м² · 9/9 этаж", "18 000 000 〒", "Aktobe, мкр. 12"),
            card(103, "Студия", "Договорная", "Aktobe"),
        ]),
    )
    .await;
    Mock::given(method("GET"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .with_writer(move || writer.clone())
        .finish();

    let config = test_config(&server, &csv_path);
    let report = coordinator(&config)
        .run(None)
        .with_subscriber(subscriber)
        .await
        .expect("A failed page should not fail the run");

    assert_eq!(report.final_state, CrawlState::DoneFailure);
    assert_eq!(report.statistics.termination, Some(Termination::FetchFailed { page: 2 }));
    assert_eq!(
        report.outcome,
        PersistOutcome::Written {
            path: csv_path.clone(),
            records: 3
        }
    );

    let lines = read_csv_lines(&csv_path);
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[0],
        r#""title";"price";"city";"street";"rooms";"square_m2";"floor";"link""#
    );
    assert_eq!(
        lines[1],
        format!(
            r#""2-комнатная квартира · 45.5 м² · 3/5 этаж";"25500000";"Aktobe";"Абулхаир хана";"2";"45.5";"3/5";"{}/a/show/101""#,
            server.uri()
        )
    );
    assert!(lines[3].starts_with(r#""Студия";"";"Aktobe";"";"";"";"";"#));

    let output = logs.contents();
    assert!(output.contains("ERROR"));
    assert!(output.contains("Page 2 unavailable"));
    assert!(output.contains("HTTP status 500"));
    assert!(output.contains("Total: 3"));
}

#[tokio::test]
async fn test_empty_page_stops_crawl() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("out").join("results.csv");

    mount_page(
        &server,
        1,
        page(&[card(1, "3-комнатная квартира · 70 м² · 2/5 этаж", "30 000 000 〒", "Aktobe, Есет батыра")]),
    )
    .await;
    mount_page(&server, 2, page(&[])).await;
    // Never requested
    Mock::given(method("GET"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page(&[])))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config(&server, &csv_path);
    let report = coordinator(&config).run(None).await.unwrap();

    assert_eq!(report.final_state, CrawlState::DoneSuccess);
    assert_eq!(report.statistics.pages_fetched, 2);
    assert_eq!(report.statistics.termination, Some(Termination::EmptyPage { page: 2 }));

    let lines = read_csv_lines(&csv_path);
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains(r#";"Есет батыра";"3";"70";"2/5";"#));
}

#[tokio::test]
async fn test_rooms_filter_is_sent() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("results.csv");

    Mock::given(method("GET"))
        .and(query_param("page", "1"))
        .and(query_param("das[flat.rooms]", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page(&[card(
            7,
            "2-комнатная квартира · 52 м² · 4/9 этаж",
            "21 000 000 〒",
            "Aktobe, Санкибай батыра",
        )])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("page", "2"))
        .and(query_param("das[flat.rooms]", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page(&[])))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server, &csv_path);
    let report = coordinator(&config).run(Some(2)).await.unwrap();

    assert_eq!(report.outcome.records(), 1);
    assert_eq!(read_csv_lines(&csv_path).len(), 2);
}

#[tokio::test]
async fn test_no_listings_writes_no_file() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("results.csv");

    mount_page(&server, 1, page(&[])).await;

    let config = test_config(&server, &csv_path);
    let report = coordinator(&config).run(None).await.unwrap();

    assert_eq!(report.outcome, PersistOutcome::Skipped);
    assert!(!csv_path.exists());
}

#[tokio::test]
async fn test_csv_sink_replaces_previous_file() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("results.csv");
    std::fs::write(&csv_path, "stale content from an earlier run\n").unwrap();

    mount_page(
        &server,
        1,
        page(&[card(5, "1-комнатная квартира · 30 м² · 1/5 этаж", "12 000 000 〒", "Aktobe, Маресьева")]),
    )
    .await;
    mount_page(&server, 2, page(&[])).await;

    let config = test_config(&server, &csv_path);
    let mut coordinator = Coordinator::with_sink(&config, CsvSink::new(&csv_path))
        .unwrap()
        .with_pacing(Pacing::disabled());
    coordinator.run(None).await.unwrap();

    let lines = read_csv_lines(&csv_path);
    assert_eq!(lines.len(), 2);
    assert!(!lines.iter().any(|l| l.contains("stale")));
}
