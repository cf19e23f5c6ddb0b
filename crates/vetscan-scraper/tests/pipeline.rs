//! End-to-end tests for `VetScraper` over the in-memory snapshot backend.
//!
//! Each test builds a result page out of `SnapshotNode`s, runs a full search
//! through a `SnapshotLauncher`, and checks the returned records and the
//! session lifecycle. No browser is started.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use vetscan_core::Extracted;
use vetscan_scraper::config::MAX_RESULT_NODES;
use vetscan_scraper::{
    DomError, FeedStatus, PlatformProfile, ScraperConfig, ScraperError, SnapshotDriver,
    SnapshotLauncher, SnapshotNode, StopReason, Timings, VetScraper,
};

static PHONE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?\d{10,}$").expect("valid regex"));

fn test_config() -> ScraperConfig {
    ScraperConfig {
        timings: Timings::immediate(),
        ..ScraperConfig::default()
    }
}

fn growing_feed() -> SnapshotNode {
    SnapshotNode::new().with_scroll_heights(vec![Some(1200), Some(2400), Some(3100), Some(3100)])
}

fn clinic(name: &str, rating: &str, phone: &str) -> SnapshotNode {
    let text = format!("{name}\n{rating}(87)\nVeterinarian · 14 Talaat Harb St\n{phone}");
    SnapshotNode::text(text)
        .with_match("div[role='heading']", SnapshotNode::text(name))
        .with_match(
            "[aria-label*='stars']",
            SnapshotNode::new().with_attr("aria-label", format!("{rating} stars 87 Reviews")),
        )
        .with_match(
            "button[aria-label*='reviews']",
            SnapshotNode::text("87 reviews"),
        )
}

fn launcher_for(listings: Vec<SnapshotNode>) -> SnapshotLauncher {
    let driver = SnapshotDriver::results_page(&PlatformProfile::default(), growing_feed(), listings);
    SnapshotLauncher::new(driver)
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_requests_location_query_and_returns_records_in_feed_order() {
    let launcher = launcher_for(vec![
        clinic("Nile Vet Clinic", "4.8", "0227941234"),
        clinic("Downtown Animal Hospital", "4.1", "+20 100 555 0199"),
    ]);
    let mut scraper = VetScraper::with_launcher(test_config(), launcher);

    let report = scraper.search_with_report("Cairo").await.unwrap();

    let visited = scraper.launcher().driver().visited_urls().await;
    assert_eq!(visited.len(), 1);
    assert!(visited[0].contains("veterinary+clinics+in+Cairo"));

    assert_eq!(report.feed, FeedStatus::Ready);
    let scroll = report.scroll.unwrap();
    assert_eq!(scroll.reason, StopReason::Converged);
    assert_eq!(scroll.iterations, 3);

    let names: Vec<&str> = report.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Nile Vet Clinic", "Downtown Animal Hospital"]);
    assert_eq!(report.records[0].rating, Extracted::Found(4.8));
    assert_eq!(
        report.records[0].review_count_text,
        Extracted::Found("87 reviews".to_string())
    );
}

#[tokio::test]
async fn returned_records_satisfy_field_invariants() {
    let mut listings: Vec<SnapshotNode> = (0..40)
        .map(|i| clinic(&format!("Clinic Number {i}"), "4.2", "0223456789"))
        .collect();
    listings.insert(3, SnapshotNode::text("12345\nhttps://example.com"));
    listings.insert(5, SnapshotNode::text("Google Maps").with_match("h3", SnapshotNode::text("Google Maps")));
    let mut scraper = VetScraper::with_launcher(test_config(), launcher_for(listings));

    let records = scraper.search("Giza").await.unwrap();

    assert!(records.len() <= MAX_RESULT_NODES);
    assert_eq!(records.len(), MAX_RESULT_NODES - 2);
    for record in &records {
        assert!(!record.name.is_empty());
        assert!(!record.name.chars().all(char::is_numeric));
        assert!(!record.name.starts_with("http"));
        assert!(!record.name.to_lowercase().contains("google"));
        if let Extracted::Found(rating) = record.rating {
            assert!((0.0..=5.0).contains(&rating));
        }
        if let Extracted::Found(phone) = &record.phone {
            assert!(PHONE_SHAPE.is_match(phone), "bad phone {phone}");
        }
    }
}

#[tokio::test]
async fn repeated_extraction_over_static_page_is_identical() {
    let listings = vec![
        clinic("Maadi Pet Care", "4.5", "0223581234"),
        SnapshotNode::text("no name here"),
        clinic("Heliopolis Vet", "3.9", "01112223334"),
    ];
    let mut scraper = VetScraper::with_launcher(test_config(), launcher_for(listings));

    let first = scraper.search("Cairo").await.unwrap();
    let second = scraper.search("Cairo").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[tokio::test]
async fn nameless_node_is_excluded_even_with_other_fields() {
    let nameless = SnapshotNode::text("4.9\n0223456789\n22 Road 9, Maadi")
        .with_match(
            "[aria-label*='stars']",
            SnapshotNode::new().with_attr("aria-label", "4.9 stars"),
        )
        .with_match(
            "a[href*='http']",
            SnapshotNode::new().with_attr("href", "https://clinic.example/"),
        );
    let mut scraper = VetScraper::with_launcher(test_config(), launcher_for(vec![nameless]));

    let report = scraper.search_with_report("Maadi").await.unwrap();
    assert!(report.records.is_empty());
    assert_eq!(report.nodes_seen, 1);
}

#[tokio::test]
async fn record_serializes_missing_fields_as_sentinel() {
    let bare = SnapshotNode::text("Zayed Animal Clinic")
        .with_match("h3", SnapshotNode::text("Zayed Animal Clinic"));
    let mut scraper = VetScraper::with_launcher(test_config(), launcher_for(vec![bare]));

    let records = scraper.search("Sheikh Zayed").await.unwrap();
    let json = serde_json::to_value(&records[0]).unwrap();
    assert_eq!(json["name"], "Zayed Animal Clinic");
    assert_eq!(json["rating"], "not available");
    assert_eq!(json["website"], "not available");
}

// ---------------------------------------------------------------------------
// Degraded searches
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_feed_returns_empty_and_releases_session() {
    let launcher = SnapshotLauncher::new(SnapshotDriver::new(SnapshotNode::new()));
    let mut scraper = VetScraper::with_launcher(test_config(), launcher);

    let report = scraper.search_with_report("Atlantis").await.unwrap();
    assert_eq!(report.feed, FeedStatus::TimedOut);
    assert!(report.records.is_empty());
    assert!(report.error.is_some());
    assert_eq!(scraper.launcher().launch_count(), 1);
    assert_eq!(scraper.launcher().driver().shutdown_count(), 1);
}

#[tokio::test]
async fn navigation_failure_returns_empty() {
    let driver = SnapshotDriver::results_page(&PlatformProfile::default(), growing_feed(), vec![])
        .failing_navigation(DomError::Backend("net::ERR_CONNECTION_RESET".to_string()));
    let mut scraper = VetScraper::with_launcher(test_config(), SnapshotLauncher::new(driver));

    let report = scraper.search_with_report("Cairo").await.unwrap();
    assert_eq!(report.feed, FeedStatus::NavigationFailed);
    assert!(report.url.unwrap().contains("veterinary+clinics+in+Cairo"));
    assert_eq!(scraper.launcher().driver().shutdown_count(), 1);
}

#[tokio::test]
async fn search_deadline_returns_empty_and_releases_session() {
    let config = ScraperConfig {
        timings: Timings {
            settle_delay: Duration::from_secs(30),
            search_timeout: Duration::from_millis(50),
            ..Timings::immediate()
        },
        ..ScraperConfig::default()
    };
    let launcher = launcher_for(vec![clinic("Slow Vet", "4.0", "0223456789")]);
    let mut scraper = VetScraper::with_launcher(config, launcher);

    let report = scraper.search_with_report("Cairo").await.unwrap();
    assert_eq!(report.feed, FeedStatus::SearchTimedOut);
    assert!(report.records.is_empty());
    assert_eq!(scraper.launcher().driver().shutdown_count(), 1);
}

#[tokio::test]
async fn launch_failure_is_fatal() {
    let launcher = SnapshotLauncher::failing(DomError::Launch("chrome not found".to_string()));
    let mut scraper = VetScraper::with_launcher(test_config(), launcher);

    let err = scraper.search("Cairo").await.unwrap_err();
    assert!(matches!(err, ScraperError::SessionSetup { .. }));
    assert!(err.is_fatal());
}

#[tokio::test]
async fn scroll_stops_at_cap_on_endless_feed() {
    let feed = SnapshotNode::new().with_scroll_heights((1..=100).map(|h| Some(h * 500)).collect());
    let driver = SnapshotDriver::results_page(
        &PlatformProfile::default(),
        feed,
        vec![clinic("Endless Vet", "4.4", "0223456789")],
    );
    let mut scraper = VetScraper::with_launcher(test_config(), SnapshotLauncher::new(driver));

    let report = scraper.search_with_report("Alexandria").await.unwrap();
    let scroll = report.scroll.unwrap();
    assert_eq!(scroll.reason, StopReason::CapReached);
    assert_eq!(scroll.iterations, 8);
    assert_eq!(report.records.len(), 1);
}

#[tokio::test]
async fn scroll_measurement_failure_still_extracts() {
    let feed = SnapshotNode::new().with_scroll_heights(vec![Some(800), None]);
    let driver = SnapshotDriver::results_page(
        &PlatformProfile::default(),
        feed,
        vec![clinic("Flaky Feed Vet", "4.0", "0223456789")],
    );
    let mut scraper = VetScraper::with_launcher(test_config(), SnapshotLauncher::new(driver));

    let report = scraper.search_with_report("Tanta").await.unwrap();
    assert_eq!(report.scroll.unwrap().reason, StopReason::MeasurementFailed);
    assert_eq!(report.records.len(), 1);
}
