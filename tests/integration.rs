//! Integration tests for the compliance service.
//!
//! This suite drives the HTTP router end to end:
//! - Day summaries (structured and plain text)
//! - The result table and day selection
//! - Exports in every format and their selection errors
//! - Request validation errors
//!
//! and checks properties of the aggregation over generated days.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use proptest::prelude::*;
use serde_json::{Value, json};
use tower::ServiceExt;

use ggd_compliance::analysis::merge_fail_ranges;
use ggd_compliance::api::{AppState, create_router};
use ggd_compliance::config::ConfigLoader;
use ggd_compliance::export::{ExportSelection, export_json};
use ggd_compliance::models::{ActiveModules, DayResult, ModuleKey, ModuleStatus, TimeSlice};
use ggd_compliance::report::ComplianceDetailView;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/ggd").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

async fn post_raw(router: Router, uri: &str, body: String) -> (StatusCode, header::HeaderMap, Vec<u8>) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, headers, body_bytes.to_vec())
}

async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
    let (status, _, bytes) = post_raw(create_router_for_test(), uri, body.to_string()).await;
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

fn slot(from: &str, to: &str, bkr: &str, vgc: &str, details: Vec<&str>) -> Value {
    json!({
        "From Time": from,
        "To Time": to,
        "#Children": 9,
        "RequiredStaff": 2,
        "#Staff": 1,
        "BKR": bkr,
        "VGC": vgc,
        "Details": details,
    })
}

/// Monday with two BKR windows, a VGC window and one unknown VGC slot.
fn monday() -> Value {
    json!({
        "day": "03-02-2025",
        "slices": [
            slot("07:00", "07:15", "No", "Pass", vec![]),
            slot("07:15", "07:30", "No", "No", vec!["VGC failed: Sanne, Jorik for Child 2"]),
            slot("07:30", "07:45", "Pass", "No", vec!["VGC failed: Sanne for Child 4"]),
            slot("07:45", "08:00", "Pass", "Unknown", vec![]),
            slot("08:00", "08:15", "No", "Pass", vec![]),
        ]
    })
}

/// Tuesday where every slot passes: reported as a day without children.
fn tuesday() -> Value {
    json!({
        "day": "04-02-2025",
        "slices": [
            slot("07:00", "07:15", "Pass", "Pass", vec![]),
            slot("07:15", "07:30", "Pass", "Pass", vec![]),
        ]
    })
}

/// Wednesday as an older backend sends it: keys out of order, nulls,
/// a fractional count and verdict labels this service does not know.
fn wednesday() -> Value {
    json!({
        "day": "05-02-2025",
        "slices": [
            {
                "To Time": "07:15",
                "From Time": "07:00",
                "BKR": "No",
                "#Children": null,
                "RequiredStaff": 1.5,
                "VGC": null,
                "Details": null
            },
            slot("07:15", "07:30", "Pass", "Maybe", vec![]),
        ]
    })
}

fn lines(section: &Value) -> Vec<&str> {
    section["lines"]
        .as_array()
        .unwrap()
        .iter()
        .map(|line| line["text"].as_str().unwrap())
        .collect()
}

fn section<'a>(report: &'a Value, module: &str) -> &'a Value {
    report["sections"]
        .as_array()
        .unwrap()
        .iter()
        .find(|section| section["module"] == module)
        .unwrap()
}

// =============================================================================
// Summary
// =============================================================================

#[tokio::test]
async fn test_summary_bkr_only() {
    let (status, report) = post_json("/summary", json!({ "result": monday() })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["day"], "03-02-2025");
    assert_eq!(report["weekday"], "Monday");
    assert_eq!(report["empty_day"], false);
    assert_eq!(report["sections"].as_array().unwrap().len(), 1);
    assert_eq!(
        lines(section(&report, "BKR")),
        vec![
            "07:00-07:30",
            "08:00-08:15",
            "BKR failed in 3 slot(s) (0.8 hour(s) total)."
        ]
    );
}

#[tokio::test]
async fn test_summary_vgc_with_recommendation() {
    let body = json!({
        "result": monday(),
        "modules": { "bkr": true, "vgc": true },
        "group_name": "Dolfijnen",
        "group_type": "KDV"
    });
    let (status, report) = post_json("/summary", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["metadata"]["group_name"], "Dolfijnen");
    assert_eq!(
        lines(section(&report, "VGC")),
        vec![
            "07:15-07:45",
            "VGC failed in 2 slot(s) (0.5 hour(s) total).",
            "Recommendation: schedule Sanne more consistently on this group to improve VGC.",
            "1 time slot was marked Unknown for VGC and is not counted as pass or fail."
        ]
    );
}

#[tokio::test]
async fn test_summary_empty_day() {
    let body = json!({
        "result": tuesday(),
        "modules": { "vgc": true, "threeHours": true }
    });
    let (status, report) = post_json("/summary", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["empty_day"], true);
    assert_eq!(lines(section(&report, "BKR")), vec!["No child present on this day."]);
    assert_eq!(lines(section(&report, "VGC")), vec!["No child present on this day."]);
    assert!(lines(section(&report, "3-UURS")).is_empty());
}

#[tokio::test]
async fn test_summary_three_hour_verdict() {
    let mut result = monday();
    result["three_uurs_summary"] = json!({
        "3-UURS": "No",
        "Reason": "Deviation exceeded the allowed three hours.",
        "Deviations": ["07:00-08:15 (75 min)"]
    });
    let body = json!({ "result": result, "modules": { "threeHours": true } });
    let (status, report) = post_json("/summary", body).await;

    assert_eq!(status, StatusCode::OK);
    let three = section(&report, "3-UURS");
    assert_eq!(
        lines(three),
        vec!["Three-hour rule not met.", "Deviation exceeded the allowed three hours."]
    );
    assert_eq!(three["bullets"], json!(["07:00-08:15 (75 min)"]));
}

#[tokio::test]
async fn test_summary_text_uses_configured_icons() {
    let body = json!({
        "result": monday(),
        "group_name": "Dolfijnen",
        "group_type": "KDV"
    });
    let (status, headers, bytes) =
        post_raw(create_router_for_test(), "/summary/text", body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/plain; charset=utf-8");

    let text = String::from_utf8(bytes).unwrap();
    assert!(text.starts_with("Dolfijnen (KDV) - Monday 03-02-2025\n"));
    assert!(text.contains("❌ 07:00-07:30\n"));
    assert!(text.contains("❌ BKR failed in 3 slot(s) (0.8 hour(s) total).\n"));
}

#[tokio::test]
async fn test_summary_missing_result_returns_400() {
    let (status, error) = post_json("/summary", json!({ "modules": { "vgc": true } })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert!(error["message"].as_str().unwrap().contains("missing field"));
}

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let (status, _, bytes) =
        post_raw(create_router_for_test(), "/summary", "{invalid json".to_string()).await;
    let error: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_summary_tolerates_null_and_unknown_fields() {
    let body = json!({ "result": wednesday(), "modules": { "vgc": true } });
    let (status, report) = post_json("/summary", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["empty_day"], false);
    assert_eq!(lines(section(&report, "BKR"))[0], "07:00-07:15");
}

// =============================================================================
// Table
// =============================================================================

#[tokio::test]
async fn test_table_defaults_to_first_listed_day() {
    let body = json!({
        "days": ["04-02-2025", "03-02-2025"],
        "results": [monday(), tuesday()],
        "modules": { "vgc": true }
    });
    let (status, table) = post_json("/table", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(table["days"], json!(["04-02-2025", "03-02-2025"]));
    assert_eq!(table["selected_day"], "04-02-2025");
    assert_eq!(
        table["headers"],
        json!(["Time", "#Children", "Required staff", "#Staff", "BKR", "VGC", "Details"])
    );
    assert_eq!(table["rows"].as_array().unwrap().len(), 2);
    assert_eq!(table["rows"][0]["time"], "07:00-07:15");
}

#[tokio::test]
async fn test_table_selected_day() {
    let body = json!({
        "days": ["03-02-2025", "04-02-2025"],
        "results": [monday(), tuesday()],
        "selected_day": "03-02-2025"
    });
    let (status, table) = post_json("/table", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(table["rows"].as_array().unwrap().len(), 5);
    assert_eq!(table["rows"][1]["details"], json!(["VGC failed: Sanne, Jorik for Child 2"]));
    assert_eq!(table["rows"][1]["vgc"], Value::Null);
}

#[tokio::test]
async fn test_table_day_without_result_is_empty() {
    let body = json!({
        "days": ["05-02-2025"],
        "results": [monday()]
    });
    let (status, table) = post_json("/table", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(table["selected_day"], "05-02-2025");
    assert!(table["headers"].as_array().unwrap().is_empty());
    assert!(table["rows"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_table_unlisted_day_returns_400() {
    let body = json!({
        "days": ["03-02-2025"],
        "results": [monday()],
        "selected_day": "10-02-2025"
    });
    let (status, error) = post_json("/table", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "DAY_NOT_FOUND");
}

#[tokio::test]
async fn test_table_renders_null_fields_as_blank() {
    let body = json!({
        "days": ["05-02-2025"],
        "results": [wednesday()],
        "modules": { "vgc": true }
    });
    let (status, table) = post_json("/table", body).await;

    assert_eq!(status, StatusCode::OK);
    let rows = table["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["time"], "07:00-07:15");
    assert_eq!(rows[0]["child_count"], Value::Null);
    assert_eq!(rows[0]["required_staff"], Value::Null);
    assert_eq!(rows[0]["bkr"], "No");
    assert_eq!(rows[0]["vgc"], "");
    assert_eq!(rows[0]["details"], json!([]));
    assert_eq!(rows[1]["child_count"], 9);
    assert_eq!(rows[1]["vgc"], "Unknown");
}

// =============================================================================
// Export
// =============================================================================

async fn post_export(format: &str, body: Value) -> (StatusCode, header::HeaderMap, Vec<u8>) {
    post_raw(
        create_router_for_test(),
        &format!("/export/{}", format),
        body.to_string(),
    )
    .await
}

#[tokio::test]
async fn test_export_xlsx_all_days() {
    let body = json!({
        "label": "week-6",
        "results": [monday(), tuesday()],
        "all_days": true
    });
    let (status, headers, bytes) = post_export("xlsx", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers[header::CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"week-6.xlsx\""
    );
    assert_eq!(&bytes[..2], b"PK");
}

#[tokio::test]
async fn test_export_csv_selected_day() {
    let body = json!({
        "label": "monday",
        "results": [monday(), tuesday()],
        "selected_day": "03-02-2025"
    });
    let (status, headers, bytes) = post_export("csv", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/csv;charset=utf-8");

    let text = String::from_utf8(bytes).unwrap();
    let rows: Vec<&str> = text.lines().collect();
    assert_eq!(
        rows[0],
        "Day,From Time,To Time,#Children,RequiredStaff,#Staff,BKR,VGC,Details"
    );
    assert_eq!(rows.len(), 6);
    assert!(rows[1..].iter().all(|row| row.starts_with("03-02-2025,")));
}

#[tokio::test]
async fn test_export_json_selected_day_round_trips() {
    let body = json!({
        "label": "monday",
        "results": [monday(), tuesday()],
        "selected_day": "04-02-2025"
    });
    let (status, headers, bytes) = post_export("json", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json;charset=utf-8");

    let exported: DayResult = serde_json::from_slice(&bytes).unwrap();
    let expected: DayResult = serde_json::from_value(tuesday()).unwrap();
    assert_eq!(exported, expected);
}

#[tokio::test]
async fn test_export_csv_keeps_field_order_and_blanks() {
    let body = json!({
        "label": "wednesday",
        "results": [wednesday()],
        "selected_day": "05-02-2025"
    });
    let (status, _, bytes) = post_export("csv", body).await;

    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(bytes).unwrap();
    let rows: Vec<&str> = text.lines().collect();
    assert_eq!(
        rows,
        vec![
            "Day,To Time,From Time,BKR,#Children,RequiredStaff,VGC,Details,#Staff",
            "05-02-2025,07:15,07:00,No,,1.5,,,",
            "05-02-2025,07:30,07:15,Pass,9,2,Maybe,,1",
        ]
    );
}

#[tokio::test]
async fn test_export_json_returns_slices_unchanged() {
    let body = json!({
        "label": "wednesday",
        "results": [wednesday()],
        "selected_day": "05-02-2025"
    });
    let (status, _, bytes) = post_export("json", body).await;

    assert_eq!(status, StatusCode::OK);
    let exported: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(exported, wednesday());
}

#[tokio::test]
async fn test_export_pdf() {
    let body = json!({
        "label": "week-6",
        "results": [monday(), tuesday()],
        "all_days": true
    });
    let (status, headers, bytes) = post_export("pdf", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
    assert!(bytes.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn test_export_without_selection_returns_400() {
    let body = json!({ "label": "monday", "results": [monday()] });
    let (status, _, bytes) = post_export("xlsx", body).await;
    let error: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "NO_DAY_SELECTED");
    assert_eq!(error["message"], "Select date first");
}

#[tokio::test]
async fn test_export_absent_day_returns_400() {
    let body = json!({
        "label": "friday",
        "results": [monday()],
        "selected_day": "07-02-2025"
    });
    let (status, _, bytes) = post_export("json", body).await;
    let error: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "DAY_NOT_FOUND");
    assert_eq!(error["message"], "No data");
}

#[tokio::test]
async fn test_export_all_days_without_results_returns_400() {
    let body = json!({ "label": "week", "results": [], "all_days": true });
    let (status, _, bytes) = post_export("csv", body).await;
    let error: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "NO_EXPORT_DATA");
}

#[tokio::test]
async fn test_export_blank_label_returns_400() {
    let body = json!({ "label": "  ", "results": [monday()], "all_days": true });
    let (status, _, bytes) = post_export("pdf", body).await;
    let error: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Properties
// =============================================================================

fn status_strategy() -> impl Strategy<Value = ModuleStatus> {
    prop_oneof![
        Just(ModuleStatus::Pass),
        Just(ModuleStatus::No),
        Just(ModuleStatus::Unknown),
    ]
}

/// Consecutive quarter-hour slots from midnight, one per generated pair.
fn day_strategy() -> impl Strategy<Value = DayResult> {
    prop::collection::vec((status_strategy(), status_strategy()), 0..96).prop_map(|statuses| {
        let slices = statuses
            .into_iter()
            .enumerate()
            .map(|(index, (bkr, vgc))| {
                let from = index as u32 * 15;
                let mut slice = TimeSlice::new(
                    format!("{:02}:{:02}", from / 60, from % 60),
                    format!("{:02}:{:02}", (from + 15) / 60, (from + 15) % 60),
                    bkr,
                );
                slice.set("#Children", 6);
                slice.set_status(ModuleKey::Vgc, vgc);
                if vgc == ModuleStatus::No {
                    slice.set_details(vec![format!("VGC failed: Staff{} for Child 1", index % 3)]);
                }
                slice
            })
            .collect();
        DayResult::new("03-02-2025", slices)
    })
}

proptest! {
    #[test]
    fn prop_rendering_is_idempotent(day in day_strategy()) {
        let view = ComplianceDetailView::new(&day, ActiveModules::all());
        prop_assert_eq!(view.render(), view.render());
    }

    #[test]
    fn prop_merged_ranges_are_ordered_disjoint_and_complete(day in day_strategy()) {
        for module in [ModuleKey::Bkr, ModuleKey::Vgc] {
            let summary = merge_fail_ranges(&day.slices, module);
            let failing = day
                .slices
                .iter()
                .filter(|slice| slice.status(module) == Some(ModuleStatus::No))
                .count();

            prop_assert_eq!(summary.failing_slot_count, failing);
            prop_assert_eq!(summary.total_fail_minutes as usize, failing * 15);

            for pair in summary.ranges.windows(2) {
                prop_assert!(pair[0].end_minutes < pair[1].start_minutes);
            }
            let covered: u32 = summary.ranges.iter().map(|range| range.duration_minutes).sum();
            prop_assert_eq!(covered, summary.total_fail_minutes);
        }
    }

    #[test]
    fn prop_json_export_round_trips(day in day_strategy()) {
        let artifact = export_json("day", &ExportSelection::Single(&day)).unwrap();
        let parsed: DayResult = serde_json::from_slice(&artifact.bytes).unwrap();
        prop_assert_eq!(parsed, day);
    }
}
