use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A coverly invocation isolated to `dir`: no user config, private store
fn coverly(dir: &Path) -> Command {
    with_config(dir, &dir.join("missing-config.toml"))
}

fn with_config(dir: &Path, config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("coverly").unwrap();
    cmd.env_remove("COVERLY_API_BASE_URL")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(config)
        .arg("--store")
        .arg(dir.join("coverly.db"));
    cmd
}

async fn mount_search(server: &MockServer, query: &str, id: &str, title: &str) {
    Mock::given(method("GET"))
        .and(path("/books/search"))
        .and(query_param("q", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalItems": 1,
            "items": [{ "id": id, "title": title, "pageCount": 412 }]
        })))
        .mount(server)
        .await;
}

async fn books_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/books/search"))
        .and(query_param("q", "hobbit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalItems": 2,
            "items": [
                {
                    "id": "h1",
                    "title": "O Hobbit",
                    "authors": ["J.R.R. Tolkien"],
                    "publishedDate": "1937-09-21",
                    "pageCount": 336,
                    "categories": ["Fiction / Fantasy / Epic"]
                },
                {
                    "id": "h2",
                    "title": "O Hobbit Anotado",
                    "authors": ["Douglas A. Anderson"],
                    "pageCount": 0
                }
            ]
        })))
        .mount(&server)
        .await;
    server
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    coverly(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("story"))
        .stdout(predicate::str::contains("board"));
}

#[test]
fn test_version() {
    let mut cmd = Command::cargo_bin("coverly").unwrap();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("coverly"));
}

#[test]
fn test_palette_defaults_and_set() {
    let dir = TempDir::new().unwrap();

    coverly(dir.path())
        .args(["palette", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("emerald"));

    coverly(dir.path())
        .args(["palette", "set", "ocean"])
        .assert()
        .success();

    coverly(dir.path())
        .args(["palette", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ocean"));

    coverly(dir.path())
        .args(["palette", "set", "neon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown palette: neon"));
}

#[test]
fn test_empty_history() {
    let dir = TempDir::new().unwrap();
    coverly(dir.path())
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No recent searches."));

    coverly(dir.path())
        .args(["history", "rerun", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No search at position 1"));
}

#[test]
fn test_show_unknown_book() {
    let dir = TempDir::new().unwrap();
    coverly(dir.path())
        .args(["show", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Book not found"));
}

#[test]
fn test_board_export_requires_entries() {
    let dir = TempDir::new().unwrap();

    coverly(dir.path())
        .args(["board", "new", "top-3", "--title", "Favoritos"])
        .assert()
        .success();

    coverly(dir.path())
        .args(["board", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Favoritos"))
        .stdout(predicate::str::contains("No books yet"));

    coverly(dir.path())
        .args(["board", "export", "--out"])
        .arg(dir.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Add at least one book before exporting."));
}

#[test]
fn test_board_commands_without_board() {
    let dir = TempDir::new().unwrap();
    coverly(dir.path())
        .args(["board", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No board yet"));
}

#[test]
fn test_init_refuses_existing_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "# existing").unwrap();

    Command::cargo_bin("coverly")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    Command::cargo_bin("coverly")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .args(["init", "--force"])
        .assert()
        .success();
    assert!(std::fs::read_to_string(&config).unwrap().contains("[export]"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_caches_results_and_history() {
    let server = books_server().await;
    let dir = TempDir::new().unwrap();

    coverly(dir.path())
        .args(["--api-url", &server.uri(), "search", "hobbit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("O Hobbit"))
        .stdout(predicate::str::contains("[h1]"));

    coverly(dir.path())
        .args(["show", "h1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("J.R.R. Tolkien"))
        .stdout(predicate::str::contains("Fantasia"));

    coverly(dir.path())
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hobbit"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_without_history() {
    let server = books_server().await;
    let dir = TempDir::new().unwrap();

    coverly(dir.path())
        .args(["--api-url", &server.uri(), "search", "hobbit", "--no-history", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"totalItems\""));

    coverly(dir.path())
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No recent searches."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_board_entries_are_validated_and_persisted() {
    let server = books_server().await;
    let dir = TempDir::new().unwrap();

    coverly(dir.path())
        .args(["--api-url", &server.uri(), "search", "hobbit", "--scope", "full"])
        .assert()
        .success();

    coverly(dir.path())
        .args(["board", "new", "top-3"])
        .assert()
        .success();

    coverly(dir.path())
        .args(["board", "add", "h1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Set a rating from 1 to 5."));

    coverly(dir.path())
        .args(["board", "add", "h2", "--genre", "Fantasia", "--rating", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Enter the book's page count."));

    coverly(dir.path())
        .args(["board", "add", "h1", "--rating", "5"])
        .assert()
        .success();
    coverly(dir.path())
        .args(["board", "add", "h2", "--genre", "Fantasia", "--rating", "4", "--pages", "400"])
        .assert()
        .success();

    coverly(dir.path())
        .args(["board", "move", "2", "up"])
        .assert()
        .success();

    let output = coverly(dir.path())
        .args(["board", "show", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let board: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(board["template"], "top-3");
    assert_eq!(board["entries"][0]["id"], "2");
    assert_eq!(board["entries"][0]["pageCountOverride"], 400);
    assert_eq!(board["entries"][1]["genre"], "Fantasia");

    coverly(dir.path())
        .args(["board", "new", "review-2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blank_search_keeps_cached_results() {
    let server = books_server().await;
    let dir = TempDir::new().unwrap();

    coverly(dir.path())
        .args(["--api-url", &server.uri(), "search", "hobbit"])
        .assert()
        .success();

    coverly(dir.path())
        .args(["--api-url", &server.uri(), "search", "   "])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results found."));

    coverly(dir.path())
        .args(["show", "h1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("O Hobbit"));

    let output = coverly(dir.path()).args(["history", "list"]).output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 1, "unexpected history: {}", stdout);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rerun_leaves_history_order() {
    let server = books_server().await;
    mount_search(&server, "duna", "d1", "Duna").await;
    let dir = TempDir::new().unwrap();

    for query in ["duna", "hobbit"] {
        coverly(dir.path())
            .args(["--api-url", &server.uri(), "search", query])
            .assert()
            .success();
    }

    coverly(dir.path())
        .args(["--api-url", &server.uri(), "history", "rerun", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Duna"));

    // The rerun refreshed the cached results
    coverly(dir.path())
        .args(["show", "d1"])
        .assert()
        .success();

    let output = coverly(dir.path()).args(["history", "list"]).output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "unexpected history: {}", stdout);
    assert!(lines[0].contains("hobbit"));
    assert!(lines[1].contains("duna"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_story_reports_toggl_miss_and_failed_export() {
    let server = books_server().await;
    Mock::given(method("GET"))
        .and(path("/toggl/books"))
        .and(query_param("title", "O Hobbit"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[export]\nfont_path = \"/nonexistent/font.ttf\"\n").unwrap();
    let out = dir.path().join("out");

    with_config(dir.path(), &config)
        .args(["--api-url", &server.uri(), "search", "hobbit"])
        .assert()
        .success();

    with_config(dir.path(), &config)
        .args(["--api-url", &server.uri(), "story", "h1", "--rating", "4", "--toggl", "--out"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No Toggl Track entries found for this book."))
        .stderr(predicate::str::contains("png: "))
        .stderr(predicate::str::contains("jpeg: "))
        .stderr(predicate::str::contains("sketch: "))
        .stderr(predicate::str::contains("Failed to generate the image."));

    assert!(!out.exists() || std::fs::read_dir(&out).unwrap().count() == 0);
}

#[test]
fn test_zero_timeout_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[api]\ntimeout_secs = 0\n").unwrap();

    with_config(dir.path(), &config)
        .args(["search", "hobbit"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("api.timeout_secs must be at least 1"));
}
