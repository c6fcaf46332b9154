use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;

use tempfile::tempdir;

use crate::config::AppConfig;
use crate::error::TaxScopeError;
use crate::insight::GENERIC_FAILURE_TEXT;
use crate::models::{MessageKind, SearchOutcome};
use crate::session::SESSION_PASSPHRASE;

use super::TaxScope;

const CSV: &str = "\
CQT,MST,Ten,SL,Thue,TongTien
10.0,8077806911-001,ACME,10,1000,5000
01,123456,BRAVO,2,50,200
";

struct StubResponse {
    status_line: &'static str,
    content_type: &'static str,
    body: String,
}

impl StubResponse {
    fn ok_csv(body: &str) -> Self {
        Self {
            status_line: "200 OK",
            content_type: "text/csv",
            body: body.to_string(),
        }
    }

    fn ok_json(body: serde_json::Value) -> Self {
        Self {
            status_line: "200 OK",
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    fn server_error() -> Self {
        Self {
            status_line: "500 Internal Server Error",
            content_type: "text/plain",
            body: "boom".to_string(),
        }
    }
}

/// One-shot HTTP stub: answers the scripted responses to sequential
/// connections, then stops accepting.
fn serve_script(responses: Vec<StubResponse>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
    let addr = listener.local_addr().expect("stub addr");

    std::thread::spawn(move || {
        for response in responses {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut head = [0u8; 4096];
            let _ = stream.read(&mut head);
            let payload = format!(
                "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                response.status_line,
                response.content_type,
                response.body.len(),
                response.body
            );
            let _ = stream.write_all(payload.as_bytes());
        }
    });

    format!("http://{addr}/")
}

fn test_config(dataset_url: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.dataset.url = dataset_url.to_string();
    config.search.delay_ms = 0;
    config
}

fn app_with(root: &Path, config: AppConfig) -> TaxScope {
    let app = TaxScope::with_config(root, config).expect("app");
    app.initialize().expect("initialize");
    app
}

fn logged_in_app(root: &Path, config: AppConfig) -> TaxScope {
    let app = app_with(root, config);
    let status = app.login(SESSION_PASSPHRASE).expect("login");
    assert!(status.authenticated);
    app
}

#[test]
fn wrong_passphrase_is_rejected_with_transient_flag() {
    let root = tempdir().expect("tempdir");
    let app = app_with(root.path(), test_config("http://127.0.0.1:9/"));

    let status = app.login("wrong").expect("login attempt");
    assert!(!status.authenticated);
    assert!(status.login_error);

    let status = app.login(SESSION_PASSPHRASE).expect("login");
    assert!(status.authenticated);
    assert!(!status.login_error);
}

#[test]
fn session_flag_survives_restart_until_logout() {
    let root = tempdir().expect("tempdir");
    let url = "http://127.0.0.1:9/".to_string();

    let app = app_with(root.path(), test_config(&url));
    app.login(SESSION_PASSPHRASE).expect("login");

    let restarted = app_with(root.path(), test_config(&url));
    assert!(restarted.auth_status().expect("status").authenticated);

    restarted.logout().expect("logout");
    let after_logout = app_with(root.path(), test_config(&url));
    assert!(!after_logout.auth_status().expect("status").authenticated);
}

#[test]
fn unauthenticated_operations_are_refused() {
    let root = tempdir().expect("tempdir");
    let app = app_with(root.path(), test_config("http://127.0.0.1:9/"));

    let err = app.lookup("123456").expect_err("must refuse");
    assert_eq!(err.code(), "UNAUTHENTICATED");

    let err = app.stats().expect_err("must refuse");
    assert_eq!(err.code(), "UNAUTHENTICATED");
}

#[test]
fn lookup_finds_record_via_denormalized_query() {
    let root = tempdir().expect("tempdir");
    let url = serve_script(vec![StubResponse::ok_csv(CSV)]);
    let app = logged_in_app(root.path(), test_config(&url));

    let outcome = app.lookup("8077-806911-001").expect("lookup");
    match outcome {
        SearchOutcome::Found { query, record } => {
            assert_eq!(query, "8077-806911-001");
            assert_eq!(record.name, "ACME");
            assert_eq!(record.tax_id, "8077806911001");
            assert_eq!(record.authority_code, "10");
        }
        other => panic!("expected a hit, got {other:?}"),
    }

    let status = app.runtime_status().expect("status");
    assert_eq!(status.message.kind, MessageKind::Success);
    assert!(status.message.text.contains("8077-806911-001"));
    assert!(status.search_result.is_some());
}

#[test]
fn missing_id_reports_not_found_with_original_query() {
    let root = tempdir().expect("tempdir");
    let url = serve_script(vec![StubResponse::ok_csv(CSV)]);
    let app = logged_in_app(root.path(), test_config(&url));

    let outcome = app.lookup("99-999 99").expect("lookup");
    assert_eq!(
        outcome,
        SearchOutcome::NotFound {
            query: "99-999 99".to_string()
        }
    );

    let status = app.runtime_status().expect("status");
    assert_eq!(status.message.kind, MessageKind::Error);
    assert!(status.message.text.contains("99-999 99"));
}

#[test]
fn blank_query_is_a_noop() {
    let root = tempdir().expect("tempdir");
    let url = serve_script(vec![StubResponse::ok_csv(CSV)]);
    let app = logged_in_app(root.path(), test_config(&url));

    let outcome = app.lookup("   ").expect("lookup");
    assert_eq!(outcome, SearchOutcome::EmptyQuery);

    let status = app.runtime_status().expect("status");
    assert_eq!(status.message.kind, MessageKind::None);
    assert!(!status.dataset_loaded, "no-op must not trigger a load");
}

#[test]
fn failed_reload_keeps_dataset_and_later_success_replaces_it() {
    let root = tempdir().expect("tempdir");
    let replacement = "CQT,MST,Ten,SL,Thue,TongTien\n02,777777,CHARLIE,7,70,700\n";
    let url = serve_script(vec![
        StubResponse::ok_csv(CSV),
        StubResponse::server_error(),
        StubResponse::ok_csv(replacement),
    ]);
    let app = logged_in_app(root.path(), test_config(&url));

    let summary = app.load_dataset().expect("first load");
    assert_eq!(summary.record_count, 2);
    assert!(!summary.replaced_previous);

    let err = app.load_dataset().expect_err("reload must fail");
    assert_eq!(err.code(), "TRANSPORT_ERROR");

    let status = app.runtime_status().expect("status");
    assert_eq!(status.message.kind, MessageKind::Error);
    let stats = app.stats().expect("stats");
    assert_eq!(stats.total_records, 2, "failed reload must keep the dataset");

    let summary = app.load_dataset().expect("second load");
    assert!(summary.replaced_previous);
    let stats = app.stats().expect("stats");
    assert_eq!(stats.total_records, 1);
    assert!(matches!(
        app.lookup("8077806911001").expect("lookup"),
        SearchOutcome::NotFound { .. }
    ));
}

#[test]
fn stats_sum_invoice_counts() {
    let root = tempdir().expect("tempdir");
    let url = serve_script(vec![StubResponse::ok_csv(CSV)]);
    let app = logged_in_app(root.path(), test_config(&url));

    let stats = app.stats().expect("stats");
    assert_eq!(stats.total_records, 2);
    assert_eq!(stats.total_invoices, 12);
}

#[test]
fn operations_append_request_log_entries() {
    let root = tempdir().expect("tempdir");
    let url = serve_script(vec![StubResponse::ok_csv(CSV)]);
    let app = logged_in_app(root.path(), test_config(&url));

    app.lookup("123456").expect("lookup");

    let log = std::fs::read_to_string(root.path().join("logs").join("requests.jsonl"))
        .expect("request log");
    assert!(log.contains("\"operation\":\"session.login\""));
    assert!(log.contains("\"operation\":\"dataset.load\""));
    assert!(log.contains("\"operation\":\"search.lookup\""));
    assert!(!log.contains(SESSION_PASSPHRASE), "log must not leak the passphrase");
}

#[test]
fn insight_without_credential_is_a_configuration_error() {
    let root = tempdir().expect("tempdir");
    let url = serve_script(vec![StubResponse::ok_csv(CSV)]);
    let app = logged_in_app(root.path(), test_config(&url));

    let err = app.insight("123456").expect_err("must refuse");
    assert!(matches!(err, TaxScopeError::MissingCredential(_)));
}

#[test]
fn insight_returns_model_commentary() {
    let root = tempdir().expect("tempdir");
    let dataset_url = serve_script(vec![StubResponse::ok_csv(CSV)]);
    let insight_url = serve_script(vec![StubResponse::ok_json(serde_json::json!({
        "candidates": [{
            "content": { "parts": [{ "text": "A small but steady filer." }] }
        }]
    }))]);

    let mut config = test_config(&dataset_url);
    config.insight.api_key = Some("test-key".to_string());
    config.insight.endpoint = Some(insight_url);
    let app = logged_in_app(root.path(), config);

    let result = app.insight("123456").expect("insight");
    assert_eq!(result.tax_id, "123456");
    assert_eq!(result.commentary, "A small but steady filer.");

    let status = app.runtime_status().expect("status");
    assert_eq!(status.insight.as_deref(), Some("A small but steady filer."));
}

#[test]
fn insight_failure_collapses_to_generic_text() {
    let root = tempdir().expect("tempdir");
    let dataset_url = serve_script(vec![StubResponse::ok_csv(CSV)]);
    let insight_url = serve_script(vec![StubResponse::server_error()]);

    let mut config = test_config(&dataset_url);
    config.insight.api_key = Some("test-key".to_string());
    config.insight.endpoint = Some(insight_url);
    let app = logged_in_app(root.path(), config);

    let result = app.insight("8077 806911-001").expect("insight");
    assert_eq!(result.commentary, GENERIC_FAILURE_TEXT);
}

#[test]
fn insight_for_unknown_id_is_not_found() {
    let root = tempdir().expect("tempdir");
    let dataset_url = serve_script(vec![StubResponse::ok_csv(CSV)]);

    let mut config = test_config(&dataset_url);
    config.insight.api_key = Some("test-key".to_string());
    config.insight.endpoint = Some("http://127.0.0.1:9/".to_string());
    let app = logged_in_app(root.path(), config);

    let err = app.insight("00000000").expect_err("must miss");
    assert_eq!(err.code(), "NOT_FOUND");
}
