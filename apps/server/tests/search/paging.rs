use crate::support::*;
use axum::http::{Method, StatusCode};
use serde_json::json;

async fn seed(app: &TestApp, count: usize) -> anyhow::Result<Vec<String>> {
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let price = format!("{}", 1_000_000 + i * 1000);
        ids.push(
            app.create_listing(ListingBuilder::new().city("Pune").price(&price).build())
                .await?,
        );
    }
    Ok(ids)
}

#[tokio::test]
async fn total_count_does_not_depend_on_page() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed(app, 5).await?;

            for (page, limit, expected_len) in [(1, 2, 2), (2, 2, 2), (3, 2, 1), (1, 10, 5)] {
                let body = app
                    .search(json!({ "city": "Pune", "page": page, "limit": limit }))
                    .await?;
                assert_eq!(body["totalCount"], 5, "page {page} limit {limit}");
                assert_eq!(listing_ids(&body)?.len(), expected_len);
                assert_eq!(body["currentPage"], page);
            }

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn total_pages_rounds_up_and_late_pages_are_empty() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed(app, 5).await?;

            let body = app.search(json!({ "page": 2, "limit": 2 })).await?;
            assert_eq!(body["totalPages"], 3);

            let body = app.search(json!({ "page": 7, "limit": 2 })).await?;
            assert!(listing_ids(&body)?.is_empty());
            assert_eq!(body["totalCount"], 5);
            assert_eq!(body["totalPages"], 3);

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn pages_walk_the_sorted_result_without_overlap() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let ids = seed(app, 5).await?;

            let mut walked = Vec::new();
            for page in 1..=3 {
                let body = app
                    .search(json!({ "sortBy": "priceLowToHigh", "page": page, "limit": 2 }))
                    .await?;
                walked.extend(listing_ids(&body)?);
            }
            assert_eq!(walked, ids);

            let body = app.search(json!({ "sortBy": "priceHighToLow", "limit": 1 })).await?;
            assert_eq!(listing_ids(&body)?, vec![ids[4].clone()]);

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn page_below_one_is_clamped() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed(app, 3).await?;

            let body = app.search(json!({ "page": 0, "limit": 2 })).await?;
            assert_eq!(body["currentPage"], 1);
            assert_eq!(listing_ids(&body)?.len(), 2);

            let body = app.search(json!({ "page": "-3" })).await?;
            assert_eq!(body["currentPage"], 1);

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn empty_store_reports_zero_pages() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let body = app.search(json!({})).await?;
            assert_eq!(body["totalCount"], 0);
            assert_eq!(body["totalPages"], 0);
            assert!(listing_ids(&body)?.is_empty());

            // A bare POST without a body is an empty criteria object.
            let (status, _headers, body) = app
                .send(
                    Method::POST,
                    "/api/sell/search",
                    "application/json",
                    axum::body::Body::empty(),
                    &[],
                )
                .await?;
            assert_status(status, StatusCode::OK, "empty body search");

            Ok(())
        })
    })
    .await
}
