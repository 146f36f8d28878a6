use std::fs;
use std::path::{Path, PathBuf};

use pricetrail_core::commands::extract::{self, ExtractOptions};
use serde_json::{Value, json};
use tempfile::tempdir;

const ORDER_URL: &str = "https://www.walmart.com/orchestra/orders/graphql/getOrder/200012345";

fn order_entry(order_id: &str, title: &str, items: &[(&str, u64, f64)]) -> Value {
    let group_items = items
        .iter()
        .map(|(name, quantity, price)| {
            json!({
                "productInfo": {"name": name},
                "quantity": quantity,
                "priceInfo": {"linePrice": {"value": price}}
            })
        })
        .collect::<Vec<Value>>();

    let body = json!({
        "data": {
            "order": {
                "id": order_id,
                "title": title,
                "groups_2101": [{"items": group_items}]
            }
        }
    });

    json!({
        "request": {"url": ORDER_URL},
        "_resourceType": "xhr",
        "response": {"content": {"text": body.to_string()}}
    })
}

fn capture_with(entries: Vec<Value>) -> String {
    json!({"log": {"entries": entries}}).to_string()
}

fn write_capture(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("orders.har");
    let result = fs::write(&path, body);
    assert!(result.is_ok());
    path
}

fn run_extract(dir: &Path, capture_path: &Path) -> pricetrail_core::CoreResult<Value> {
    extract::run_with_options(ExtractOptions {
        capture_path: capture_path.display().to_string(),
        out_dir: Some(dir.join("out").display().to_string()),
        cache_path: Some(dir.join("cache.json").display().to_string()),
        home_override: None,
    })
    .map(|envelope| envelope.data)
}

#[test]
fn matching_entry_with_two_items_yields_two_rows() {
    let dir = tempdir();
    assert!(dir.is_ok());
    if let Ok(dir) = dir {
        let capture = capture_with(vec![
            json!({"request": {"url": "https://www.walmart.com/cart"}, "_resourceType": "xhr"}),
            order_entry(
                "200012345",
                "Order delivered on Jan 1, 2024",
                &[("Bananas", 1, 10.0), ("Paper Towels", 2, 5.0)],
            ),
        ]);
        let capture_path = write_capture(dir.path(), &capture);

        let data = run_extract(dir.path(), &capture_path);
        assert!(data.is_ok());
        if let Ok(data) = data {
            assert_eq!(data["written"], Value::Bool(true));
            assert_eq!(data["summary"]["entries_total"].as_i64(), Some(2));
            assert_eq!(data["summary"]["entries_matched"].as_i64(), Some(1));
            assert_eq!(data["summary"]["records_collected"].as_i64(), Some(2));
            assert_eq!(data["summary"]["cache_inserts"].as_i64(), Some(2));

            let output_path = data["output_path"].as_str().map(PathBuf::from);
            assert!(output_path.is_some());
            if let Some(output_path) = output_path {
                assert!(
                    output_path
                        .file_name()
                        .is_some_and(|name| name
                            == "2024-01-01_2024-01-01_walmart_order_items.csv")
                );

                let body = fs::read_to_string(&output_path);
                assert!(body.is_ok());
                if let Ok(body) = body {
                    let mut lines = body.lines();
                    assert_eq!(
                        lines.next(),
                        Some("order_id,order_date,item_name,is_food,quantity,price")
                    );
                    assert_eq!(
                        lines.next(),
                        Some("200012345,\"Jan 1, 2024\",Bananas,unknown,1,10.0")
                    );
                    assert_eq!(
                        lines.next(),
                        Some("200012345,\"Jan 1, 2024\",Paper Towels,unknown,2,5.0")
                    );
                    assert_eq!(lines.next(), None);
                }
            }
        }
    }
}

#[test]
fn rerun_with_warm_cache_is_idempotent() {
    let dir = tempdir();
    assert!(dir.is_ok());
    if let Ok(dir) = dir {
        let capture = capture_with(vec![order_entry(
            "1",
            "Jan 3, 2024",
            &[("Milk", 1, 3.5)],
        )]);
        let capture_path = write_capture(dir.path(), &capture);

        let first = run_extract(dir.path(), &capture_path);
        assert!(first.is_ok());

        let second = run_extract(dir.path(), &capture_path);
        assert!(second.is_ok());
        if let (Ok(first), Ok(second)) = (first, second) {
            assert_eq!(second["summary"]["cache_inserts"].as_i64(), Some(0));
            assert_eq!(first["output_path"], second["output_path"]);

            let output_path = second["output_path"].as_str().map(PathBuf::from);
            assert!(output_path.is_some());
            if let Some(path) = output_path {
                let body = fs::read_to_string(path);
                assert!(body.is_ok());
                if let Ok(body) = body {
                    assert!(body.contains("Milk,unknown,1,3.5"));
                }
            }
        }
    }
}

#[test]
fn known_classifications_are_preserved() {
    let dir = tempdir();
    assert!(dir.is_ok());
    if let Ok(dir) = dir {
        let cache_path = dir.path().join("cache.json");
        let seeded = fs::write(&cache_path, "{\n  \"Milk\": \"food\"\n}");
        assert!(seeded.is_ok());

        let capture = capture_with(vec![order_entry(
            "1",
            "Jan 3, 2024",
            &[("Milk", 1, 3.5)],
        )]);
        let capture_path = write_capture(dir.path(), &capture);

        let data = run_extract(dir.path(), &capture_path);
        assert!(data.is_ok());
        if let Ok(data) = data {
            assert_eq!(data["summary"]["cache_inserts"].as_i64(), Some(0));
            let output_path = data["output_path"].as_str().map(PathBuf::from);
            assert!(output_path.is_some());
            if let Some(path) = output_path {
                let body = fs::read_to_string(path);
                assert!(body.is_ok());
                if let Ok(body) = body {
                    assert!(body.contains("Milk,food,1,3.5"));
                }
            }
        }
    }
}

#[test]
fn undecodable_body_skips_only_that_entry() {
    let dir = tempdir();
    assert!(dir.is_ok());
    if let Ok(dir) = dir {
        let broken = json!({
            "request": {"url": ORDER_URL},
            "_resourceType": "fetch",
            "response": {"content": {"text": "not json"}}
        });
        let capture = capture_with(vec![
            broken,
            order_entry("2", "Feb 2, 2024", &[("Eggs", 1, 4.0)]),
        ]);
        let capture_path = write_capture(dir.path(), &capture);

        let data = run_extract(dir.path(), &capture_path);
        assert!(data.is_ok());
        if let Ok(data) = data {
            assert_eq!(data["summary"]["entries_matched"].as_i64(), Some(2));
            assert_eq!(data["summary"]["entries_skipped"].as_i64(), Some(1));
            assert_eq!(data["summary"]["records_collected"].as_i64(), Some(1));
            assert_eq!(
                data["skipped_entries"][0]["reason"],
                Value::String("body_not_json".to_string())
            );
        }
    }
}

#[test]
fn title_without_date_warns_and_uses_fallback_name() {
    let dir = tempdir();
    assert!(dir.is_ok());
    if let Ok(dir) = dir {
        let capture = capture_with(vec![order_entry(
            "3",
            "In progress",
            &[("Bread", 1, 2.5)],
        )]);
        let capture_path = write_capture(dir.path(), &capture);

        let data = run_extract(dir.path(), &capture_path);
        assert!(data.is_ok());
        if let Ok(data) = data {
            assert_eq!(data["title_date_warnings"].as_array().map(Vec::len), Some(1));
            assert_eq!(
                data["title_date_warnings"][0]["title"],
                Value::String("In progress".to_string())
            );

            let output_path = data["output_path"].as_str().map(PathBuf::from);
            assert!(output_path.is_some());
            if let Some(path) = output_path {
                assert!(
                    path.file_name()
                        .is_some_and(|name| name == "walmart_order_items.csv")
                );
                let body = fs::read_to_string(path);
                assert!(body.is_ok());
                if let Ok(body) = body {
                    // The raw title still labels the record.
                    assert!(body.contains("3,In progress,Bread,unknown,1,2.5"));
                }
            }
        }
    }
}

#[test]
fn no_collected_records_writes_nothing() {
    let dir = tempdir();
    assert!(dir.is_ok());
    if let Ok(dir) = dir {
        let capture = capture_with(vec![json!({
            "request": {"url": "https://www.walmart.com/cart"},
            "_resourceType": "xhr"
        })]);
        let capture_path = write_capture(dir.path(), &capture);

        let data = run_extract(dir.path(), &capture_path);
        assert!(data.is_ok());
        if let Ok(data) = data {
            assert_eq!(data["written"], Value::Bool(false));
            assert!(data.get("output_path").is_none());
            assert!(!dir.path().join("out").exists());
        }
    }
}

#[test]
fn structural_failures_report_distinct_codes() {
    let dir = tempdir();
    assert!(dir.is_ok());
    if let Ok(dir) = dir {
        let missing = run_extract(dir.path(), &dir.path().join("absent.har"));
        assert!(missing.is_err());
        if let Err(error) = missing {
            assert_eq!(error.code, "capture_not_found");
        }

        let invalid_path = write_capture(dir.path(), "{ not json");
        let invalid = run_extract(dir.path(), &invalid_path);
        assert!(invalid.is_err());
        if let Err(error) = invalid {
            assert_eq!(error.code, "capture_invalid_json");
        }

        let no_entries_path = dir.path().join("empty.har");
        assert!(fs::write(&no_entries_path, "{\"log\": {}}").is_ok());
        let no_entries = run_extract(dir.path(), &no_entries_path);
        assert!(no_entries.is_err());
        if let Err(error) = no_entries {
            assert_eq!(error.code, "capture_missing_entries");
        }
    }
}
