use std::collections::BTreeMap;

use polisher_engine::{
    write_markdown, write_snapshot, ExportConfig, ExportSnapshot, ResultEnvelope, ResultMetadata,
    TestCase,
};
use pretty_assertions::assert_eq;

fn sample_envelope() -> ResultEnvelope {
    let mut model_versions = BTreeMap::new();
    model_versions.insert("claude".to_string(), "# Claude version".to_string());
    model_versions.insert("gpt".to_string(), "# GPT version".to_string());
    ResultEnvelope {
        optimized_prompt: "# Optimized\n\nDo the thing".to_string(),
        usage_guide: Some("paste into the model".to_string()),
        test_cases: vec![TestCase {
            input: "spring".to_string(),
            expected_behavior: "seasonal imagery".to_string(),
        }],
        optimization_notes: None,
        metadata: Some(ResultMetadata {
            complexity_level: Some("medium".to_string()),
            estimated_tokens: Some(128),
            ..ResultMetadata::default()
        }),
        model_versions,
    }
}

fn sample_snapshot() -> ExportSnapshot {
    ExportSnapshot {
        timestamp: "2024-05-06T07:08:09Z".to_string(),
        input: "write a haiku".to_string(),
        configuration: ExportConfig {
            complexity_level: "medium".to_string(),
            task_type: "creative".to_string(),
            language: "english".to_string(),
            target_models: vec!["claude".to_string(), "gpt".to_string()],
        },
        result: sample_envelope(),
    }
}

#[test]
fn snapshot_round_trips_through_the_exported_file() {
    let temp = tempfile::TempDir::new().unwrap();
    let snapshot = sample_snapshot();

    let path = write_snapshot(temp.path(), &snapshot).expect("write snapshot");
    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some("prompt_optimization_20240506T070809.json")
    );

    let content = std::fs::read_to_string(&path).unwrap();
    let parsed: ExportSnapshot = serde_json::from_str(&content).expect("parse exported json");

    assert_eq!(parsed.result, snapshot.result);
    assert_eq!(parsed, snapshot);
}

#[test]
fn snapshot_is_pretty_printed_with_all_sections() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = write_snapshot(temp.path(), &sample_snapshot()).expect("write snapshot");
    let content = std::fs::read_to_string(path).unwrap();

    assert!(content.contains('\n'));
    assert!(content.contains("\"timestamp\""));
    assert!(content.contains("\"input\""));
    assert!(content.contains("\"configuration\""));
    assert!(content.contains("\"result\""));
}

#[test]
fn markdown_export_writes_raw_text() {
    let temp = tempfile::TempDir::new().unwrap();
    let markdown = "# Optimized\n\nDo the thing";

    let path =
        write_markdown(temp.path(), "2024-05-06T07:08:09Z", markdown).expect("write markdown");
    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some("prompt_20240506T070809.md")
    );
    assert_eq!(std::fs::read_to_string(path).unwrap(), markdown);
}

#[test]
fn rewriting_the_same_timestamp_replaces_the_file() {
    let temp = tempfile::TempDir::new().unwrap();

    write_markdown(temp.path(), "2024-05-06T07:08:09Z", "first").unwrap();
    let path = write_markdown(temp.path(), "2024-05-06T07:08:09Z", "second").unwrap();

    assert_eq!(std::fs::read_to_string(path).unwrap(), "second");
    let md_files = std::fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("md"))
        .count();
    assert_eq!(md_files, 1);
}

#[test]
fn export_fails_when_target_is_not_a_directory() {
    let temp = tempfile::TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    std::fs::write(&file_path, "x").unwrap();

    let err = write_markdown(&file_path, "2024-05-06T07:08:09Z", "content").unwrap_err();
    assert!(err.to_string().contains("export directory"));
}
