//! Common test utilities and fixtures

#![allow(dead_code)]

use std::io::Write;
use std::path::Path;

use gap_screener::AppConfig;

/// Candidate file mixing keepers, filtered-out rows and junk
pub const OPG_CSV: &str = "\
Ticker,Gap,Opening Price
ACME,-0.20,50.00
FLAT,0.02,31.10
JUMP,0.25,12.50
GARB,abc,10.00
SLID,-0.15,17.00
WIPE,-1.00,0.50
";

/// Write `contents` to a CSV file inside `dir`
pub fn write_candidates(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("opg.csv");
    let mut file = std::fs::File::create(&path).expect("Failed to create candidate file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write candidate file");
    path
}

/// Seeking Alpha style body with `count` articles about `ticker`
pub fn news_body(ticker: &str, count: usize) -> serde_json::Value {
    let data: Vec<_> = (0..count)
        .map(|i| {
            serde_json::json!({
                "id": format!("{}-{}", ticker, i),
                "type": "news",
                "attributes": {
                    "publishOn": format!("2024-03-04T0{}:00:00-05:00", 9 - i),
                    "title": format!("{} story {}", ticker, i + 1)
                }
            })
        })
        .collect();
    serde_json::json!({ "data": data })
}

/// Config pointing at a mock news server and temp files
pub fn test_config(input: &Path, output: &Path, news_url: &str) -> AppConfig {
    serde_json::from_value(serde_json::json!({
        "input_path": input,
        "output_path": output,
        "account_balance": "10000",
        "news": {
            "base_url": news_url,
            "api_key": "integration-key"
        },
        "pipeline": {
            "max_concurrency": 2,
            "deadline_seconds": 10
        },
        "settings": {
            "request_timeout_seconds": 5
        }
    }))
    .expect("Failed to build test config")
}
