//! Decoder tests

use super::*;
use crate::error::Error;
use serde_json::json;
use std::path::Path;

#[test]
fn test_jsonl_decode() {
    let body = "{\"a\": 1}\n{\"a\": 2}\n";

    let records = JsonlDecoder::new().decode(body).unwrap();

    assert_eq!(records, vec![json!({"a": 1}), json!({"a": 2})]);
}

#[test]
fn test_jsonl_skips_blank_lines() {
    let body = "{\"a\": 1}\n\n   \n{\"a\": 2}";

    let records = JsonlDecoder::new().decode(body).unwrap();

    assert_eq!(records.len(), 2);
}

#[test]
fn test_jsonl_reports_line_number() {
    let body = "{\"a\": 1}\n{not json}\n";

    let err = JsonlDecoder::new().decode(body).unwrap_err();

    match err {
        Error::Decode { line, .. } => assert_eq!(line, 2),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_json_decode_array() {
    let body = "[{\"a\": 1}, {\"a\": 2}]";

    let records = JsonDecoder::new().decode(body).unwrap();

    assert_eq!(records.len(), 2);
}

#[test]
fn test_json_decode_single_document() {
    let body = "{\"a\": 1}";

    let records = JsonDecoder::new().decode(body).unwrap();

    assert_eq!(records, vec![json!({"a": 1})]);
}

#[test]
fn test_format_from_path() {
    assert_eq!(
        DocumentFormat::from_path(Path::new("data.json")),
        DocumentFormat::Json
    );
    assert_eq!(
        DocumentFormat::from_path(Path::new("data.jsonl")),
        DocumentFormat::Jsonl
    );
    assert_eq!(
        DocumentFormat::from_path(Path::new("data.ndjson")),
        DocumentFormat::Jsonl
    );
}
