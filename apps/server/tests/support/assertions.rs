use anyhow::Context as _;
use axum::http::StatusCode;
use serde_json::Value;

pub fn assert_status(actual: StatusCode, expected: StatusCode, context: &str) {
    assert_eq!(actual, expected, "{context}: unexpected status");
}

/// `listings[*].id` of a search envelope, in order.
pub fn listing_ids(envelope: &Value) -> anyhow::Result<Vec<String>> {
    envelope["listings"]
        .as_array()
        .context("listings is an array")?
        .iter()
        .map(|l| {
            l["id"]
                .as_str()
                .map(str::to_string)
                .context("listing id")
        })
        .collect()
}

/// Assert the search matched exactly `expected` (order-insensitive) and counted them.
pub fn assert_matches(envelope: &Value, expected: &[&String]) -> anyhow::Result<()> {
    let mut ids = listing_ids(envelope)?;
    ids.sort();
    let mut want: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
    want.sort();
    assert_eq!(ids, want, "matched listings");
    assert_eq!(
        envelope["totalCount"].as_i64(),
        Some(expected.len() as i64),
        "totalCount"
    );
    Ok(())
}

pub fn data_array(body: &Value) -> anyhow::Result<&Vec<Value>> {
    body["data"].as_array().context("data is an array")
}
