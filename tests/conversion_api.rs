use mockito::{Matcher, Server};
use patro::client::PatroClient;
use patro::model::{Conversion, DateTriple, Direction};
use std::time::Duration;

fn client_for(url: &str) -> PatroClient {
    PatroClient::new(url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn matched_date_comes_back_typed() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .match_header("Content-Type", "application/json")
        .match_body(Matcher::Regex(r"adYear: 2024, adMonth: 1, adDay: 15".to_string()))
        .with_status(200)
        .with_header("Content-Type", "application/json")
        .with_body(r#"{"data":{"dates":[{"bsYear":2080,"bsMonth":9,"bsDay":31}]}}"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let outcome = client
        .convert_one(DateTriple::new(2024, 1, 15), Direction::AdToBs)
        .await;

    mock.assert_async().await;
    assert_eq!(outcome, Conversion::Matched(DateTriple::new(2080, 9, 31)));
}

#[tokio::test]
async fn empty_dates_array_is_no_match() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_body(r#"{"data":{"dates":[]}}"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let outcome = client
        .convert_one(DateTriple::new(2024, 2, 30), Direction::AdToBs)
        .await;

    assert_eq!(outcome, Conversion::NoMatch);
}

#[tokio::test]
async fn server_error_is_contained_as_failure() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("POST", "/")
        .with_status(500)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let outcome = client
        .convert_one(DateTriple::new(2024, 1, 15), Direction::AdToBs)
        .await;

    assert!(matches!(outcome, Conversion::Failed(_)), "got {:?}", outcome);
}

#[tokio::test]
async fn malformed_body_is_contained_as_failure() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_body("not even json")
        .create_async()
        .await;

    let client = client_for(&server.url());
    let outcome = client
        .convert_one(DateTriple::new(2024, 1, 15), Direction::AdToBs)
        .await;

    assert!(matches!(outcome, Conversion::Failed(_)), "got {:?}", outcome);
}

#[tokio::test]
async fn unreachable_service_is_contained_as_failure() {
    // Nothing listens here; the request itself fails.
    let client = client_for("http://127.0.0.1:1/graphql");
    let outcome = client
        .convert_one(DateTriple::new(2024, 1, 15), Direction::AdToBs)
        .await;

    assert!(matches!(outcome, Conversion::Failed(_)), "got {:?}", outcome);
}

#[tokio::test]
async fn bs_to_ad_queries_the_mirror_fields() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::Regex(r"bsYear: 2080.*adYear adMonth adDay".to_string()))
        .with_status(200)
        .with_body(r#"{"data":{"dates":[{"adYear":2024,"adMonth":1,"adDay":14}]}}"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let outcome = client
        .convert_one(DateTriple::new(2080, 9, 30), Direction::BsToAd)
        .await;

    mock.assert_async().await;
    assert_eq!(outcome, Conversion::Matched(DateTriple::new(2024, 1, 14)));
}

#[tokio::test]
async fn batch_keeps_row_order_across_mixed_outcomes() {
    let mut server = Server::new_async().await;

    // Row 1 matches, row 2 finds nothing.
    let mock_first = server
        .mock("POST", "/")
        .match_body(Matcher::Regex(r"adDay: 15".to_string()))
        .with_status(200)
        .with_body(r#"{"data":{"dates":[{"bsYear":2080,"bsMonth":9,"bsDay":31}]}}"#)
        .create_async()
        .await;
    let mock_second = server
        .mock("POST", "/")
        .match_body(Matcher::Regex(r"adDay: 20".to_string()))
        .with_status(200)
        .with_body(r#"{"data":{"dates":[]}}"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let dates = vec![DateTriple::new(2024, 1, 15), DateTriple::new(2024, 2, 20)];
    let results = client.convert_all(&dates, Direction::AdToBs, 10).await;

    mock_first.assert_async().await;
    mock_second.assert_async().await;

    assert_eq!(results.len(), dates.len());
    assert_eq!(
        results[0].map(|d| d.to_string()),
        Some("2080-9-31".to_string())
    );
    assert_eq!(results[1], None);
}
