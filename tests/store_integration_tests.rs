use nhl_schedule_api::game_store::{GameStore, HttpGameSource, LocalFileSource};
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn dataset() -> serde_json::Value {
    json!([
        {
            "GameID": 21323,
            "Season": 2024,
            "SeasonType": 1,
            "Status": "Final",
            "Day": "2024-01-08T00:00:00",
            "DateTime": "2024-01-08T19:00:00",
            "IsClosed": true,
            "HomeTeam": "Boston Bruins",
            "AwayTeam": "Toronto Maple Leafs",
            "HomeTeamID": 17,
            "AwayTeamID": 28,
            "HomeTeamScore": 3,
            "AwayTeamScore": 2
        },
        {
            "GameID": 21324,
            "Season": 2024,
            "SeasonType": 1,
            "Status": "Scheduled",
            "Day": "2024-01-15T00:00:00",
            "DateTime": "2024-01-15T19:00:00",
            "IsClosed": false,
            "HomeTeam": {"TeamID": 9, "Name": "Dallas Stars"},
            "AwayTeam": {"TeamID": 17, "Name": "Boston Bruins"},
            "HomeTeamID": 9,
            "AwayTeamID": 17
        }
    ])
}

fn store_for(
    server_url: &str,
    fallback: &std::path::Path,
) -> GameStore<HttpGameSource, LocalFileSource> {
    let client = Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    GameStore::new(
        HttpGameSource::new(client, format!("{server_url}/raw.json")),
        LocalFileSource::new(fallback),
        Duration::from_secs(3600),
    )
}

#[tokio::test]
async fn fetches_and_normalizes_remote_dataset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/raw.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dataset()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = store_for(&server.uri(), &dir.path().join("missing.json"));

    let games = store.get_games().await;
    assert_eq!(games.len(), 2);

    // Bare-name team ref got the record's id; structured ref kept its own
    assert_eq!(games[0].home_team.name, "Boston Bruins");
    assert_eq!(games[0].home_team.team_id, 17);
    assert_eq!(games[1].home_team.team_id, 9);
}

#[tokio::test]
async fn snapshot_is_cached_within_the_freshness_window() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/raw.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dataset()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = store_for(&server.uri(), &dir.path().join("missing.json"));

    assert_eq!(store.get_games().await.len(), 2);
    assert_eq!(store.get_games().await.len(), 2);
    // The mock's expect(1) verifies no second fetch happened
}

#[tokio::test]
async fn remote_failure_falls_back_to_local_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/raw.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let fallback = dir.path().join("raw.json");
    tokio::fs::write(&fallback, dataset().to_string())
        .await
        .unwrap();

    let store = store_for(&server.uri(), &fallback);

    let games = store.get_games().await;
    assert_eq!(games.len(), 2, "local fallback must not yield empty data");
    assert_eq!(games[0].game_id, 21323);
}

#[tokio::test]
async fn double_failure_degrades_to_empty_then_recovers() {
    let server = MockServer::start().await;
    // First request fails; subsequent ones succeed
    Mock::given(method("GET"))
        .and(path("/raw.json"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/raw.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dataset()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = store_for(&server.uri(), &dir.path().join("missing.json"));

    // Remote down, no local file: degraded empty result
    assert!(store.get_games().await.is_empty());

    // The failed attempt did not refresh the timestamp, so this retries
    assert_eq!(store.get_games().await.len(), 2);
}

#[tokio::test]
async fn malformed_records_are_skipped_not_fatal() {
    let server = MockServer::start().await;
    let body = json!([
        {"GameID": 1, "Day": "2024-01-08", "HomeTeam": "A", "AwayTeam": "B"},
        {"Day": "2024-01-09", "HomeTeam": "C", "AwayTeam": "D"},
        {"GameID": 3, "Day": "2024-01-10", "HomeTeam": "E", "AwayTeam": "F"}
    ]);
    Mock::given(method("GET"))
        .and(path("/raw.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = store_for(&server.uri(), &dir.path().join("missing.json"));

    let games = store.get_games().await;
    assert_eq!(games.len(), 2);
    assert_eq!(games[0].game_id, 1);
    assert_eq!(games[1].game_id, 3);
}
