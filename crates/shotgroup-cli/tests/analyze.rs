use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

const RESPONSE: &str = r#"{
    "detections": [
        {"bbox": [90.0, 90.0, 110.0, 110.0], "center": [100.0, 100.0], "confidence": 0.9},
        {"bbox": [190.0, 90.0, 210.0, 110.0], "center": [200.0, 100.0], "confidence": 0.5},
        {"bbox": [390.0, 90.0, 410.0, 110.0], "center": [400.0, 100.0], "confidence": 0.3}
    ],
    "metadata": {"processed_width": 1000, "processed_height": 1000},
    "scale_info": {"cm_per_pixel": 0.01}
}"#;

#[test]
fn analyze_reports_the_group_summary() {
    let dir = tempfile::tempdir().unwrap();
    let detections = dir.path().join("resp.json");
    fs::write(&detections, RESPONSE).unwrap();

    Command::cargo_bin("shotgroup")
        .unwrap()
        .args(["analyze", "--detections"])
        .arg(&detections)
        .assert()
        .success()
        .stdout(predicate::str::contains("holes: 3"))
        .stdout(predicate::str::contains("group size: 300.0 px"))
        .stdout(predicate::str::contains("group size: 3.0 cm (Excellent)"));
}

#[test]
fn analyze_replays_edits_and_writes_the_result() {
    let dir = tempfile::tempdir().unwrap();
    let detections = dir.path().join("resp.json");
    let edits = dir.path().join("edits.txt");
    let out = dir.path().join("result.json");
    fs::write(&detections, RESPONSE).unwrap();
    // Remove the low-confidence hole, add a manual one at image (150, 100).
    fs::write(&edits, "remove 2\nmode add\nadd 150 100\n").unwrap();

    Command::cargo_bin("shotgroup")
        .unwrap()
        .args(["analyze", "--detections"])
        .arg(&detections)
        .arg("--edits")
        .arg(&edits)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("holes: 3"));

    let stored: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let points = stored["points"].as_array().unwrap();
    assert_eq!(points.len(), 3);
    assert_eq!(points[2]["is_manual"], true);
    assert_eq!(points[2]["confidence"], 1.0);
    assert_eq!(stored["summary"]["tiers"]["low"], 0);
}

#[test]
fn analyze_fails_cleanly_on_a_missing_response() {
    Command::cargo_bin("shotgroup")
        .unwrap()
        .args(["analyze", "--detections", "/nonexistent/resp.json"])
        .assert()
        .failure();
}
