mod common;

use common::*;
use phishreport::config::Settings;
use phishreport::{ExportError, ReportExporter, ReportKind};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer, kind: ReportKind, output_dir: &std::path::Path) -> Settings {
    let mut settings = Settings::default();
    settings.api.base_url = server.uri();
    settings.api.timeout_secs = 5;
    settings.report.kind = kind;
    settings.report.output_dir = output_dir.to_path_buf();
    settings
}

async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_detailed_export_over_http() -> TestResult {
    init_logger();
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/metrics/dashboard",
        json!({
            "summary": {"total_campaigns": 2, "active_campaigns": 1, "total_users": 40},
            "department_stats": [{"name": "TI", "sends": 100, "clicks": 20, "rate": 20.0}],
            "recent_campaigns": [{
                "id": 7, "name": "Gift card", "status": "active",
                "target_user_count": 40, "click_count": 1,
                "start_date": "2024-02-01T09:00:00Z"
            }],
            "collaborators": [{
                "full_name": "Ana Souza", "email": "ana@example.com",
                "sends_count": 2, "clicks_count": 1, "campaign_names": ["Gift card"]
            }]
        }),
    )
    .await;
    mount_json(
        &server,
        "/campaigns",
        json!([
            {"id": 7, "name": "Gift card", "status": "active"},
            {"id": 3, "name": "Old lure", "status": "completed"}
        ]),
    )
    .await;
    mount_json(
        &server,
        "/metrics/campaigns/7/clicks",
        json!({
            "campaign_id": 7,
            "total_sends": 40,
            "total_clicks": 1,
            "clicks": [{
                "full_name": "Ana Souza", "email": "ana@example.com",
                "clicked_at": "2024-02-02 10:15:00", "ip_address": "10.0.0.7"
            }]
        }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/logo.png"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(png_logo(false), "image/png"),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir()?;
    let exporter =
        ReportExporter::from_settings(&settings_for(&server, ReportKind::Detailed, dir.path()))?;
    let path = exporter.export().await?;
    let pdf = GeneratedPdf::from_bytes(std::fs::read(path)?)?;

    assert_eq!(pdf.image_count(), 1);
    assert_pdf_contains_text!(pdf, "Phishing Simulation Report - Detailed");
    assert_pdf_contains_text!(pdf, "20.0%");
    assert_pdf_contains_text!(pdf, "80.0%");
    assert_pdf_contains_text!(pdf, "01/02/2024");
    assert_pdf_contains_text!(pdf, "Clicks: Gift card (1 of 40, 2.5%)");
    assert_pdf_contains_text!(pdf, "02/02/2024 10:15");
    Ok(())
}

#[tokio::test]
async fn test_missing_logo_over_http() -> TestResult {
    init_logger();
    let server = MockServer::start().await;
    mount_json(&server, "/metrics/dashboard", json!({})).await;
    mount_json(&server, "/campaigns", json!([])).await;

    let dir = tempfile::tempdir()?;
    let exporter =
        ReportExporter::from_settings(&settings_for(&server, ReportKind::Executive, dir.path()))?;
    let bytes = exporter.render(timestamp(9, 0)).await?;
    let pdf = GeneratedPdf::from_bytes(bytes)?;

    assert_eq!(pdf.image_count(), 0);
    assert_pdf_contains_text!(pdf, "No data available");
    Ok(())
}

#[tokio::test]
async fn test_dashboard_error_over_http() -> TestResult {
    init_logger();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/metrics/dashboard"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir()?;
    let exporter =
        ReportExporter::from_settings(&settings_for(&server, ReportKind::Executive, dir.path()))?;
    let result = exporter.export().await;

    assert!(matches!(result, Err(ExportError::DataUnavailable(_))));
    Ok(())
}
