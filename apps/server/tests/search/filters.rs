use crate::support::*;
use serde_json::json;

#[tokio::test]
async fn empty_criteria_match_every_listing() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let a = app.create_listing(ListingBuilder::new().city("Mysore").build()).await?;
            let b = app
                .create_listing(ListingBuilder::new().set("propertytype", "Commercial").build())
                .await?;
            let c = app.create_listing(ListingBuilder::new().price("100").build()).await?;

            let body = app.search(json!({})).await?;
            assert_eq!(body["success"], true);
            assert_matches(&body, &[&a, &b, &c])?;
            assert_eq!(body["currentPage"], 1);
            assert_eq!(body["totalPages"], 1);

            // Blank values are not filters.
            let body = app
                .search(json!({ "city": "  ", "Facing": [], "landmark": "" }))
                .await?;
            assert_matches(&body, &[&a, &b, &c])?;

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn each_clause_excludes_a_listing_that_violates_only_it() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let base = || {
                ListingBuilder::new()
                    .city("Bangalore")
                    .set("Facing", "East")
                    .set("bedrooms", "3")
                    .set("landmark", "Near Central Park")
                    .set("reraregistered", true)
                    .price("5000000")
            };

            let matching = app.create_listing(base().build()).await?;
            let wrong_city = app.create_listing(base().city("Chennai").build()).await?;
            let wrong_facing = app.create_listing(base().set("Facing", "West").build()).await?;
            let wrong_bedrooms = app.create_listing(base().set("bedrooms", "2").build()).await?;
            let wrong_landmark = app
                .create_listing(base().set("landmark", "Lakeside").build())
                .await?;
            let not_rera = app
                .create_listing(base().set("reraregistered", false).build())
                .await?;
            let too_expensive = app.create_listing(base().price("9000000").build()).await?;

            let criteria = json!({
                "city": "Bangalore",
                "Facing": ["East", "North"],
                "bedrooms": "3",
                "landmark": "Central",
                "reraregistered": true,
                "expect_price_max": "6000000",
            });
            let body = app.search(criteria).await?;
            assert_matches(&body, &[&matching])?;

            let all = app.search(json!({})).await?;
            assert_eq!(all["totalCount"], 7);

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn amenities_filter_requires_every_requested_amenity() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let both = app
                .create_listing(ListingBuilder::new().amenities(&["pool", "gym", "park"]).build())
                .await?;
            let pool_only = app
                .create_listing(ListingBuilder::new().amenities(&["pool"]).build())
                .await?;
            let none = app.create_listing(ListingBuilder::new().build()).await?;

            let body = app
                .search(json!({ "amenities": [{ "name": "pool" }, { "name": "gym" }] }))
                .await?;
            assert_matches(&body, &[&both])?;

            let body = app.search(json!({ "amenities": ["pool"] })).await?;
            assert_matches(&body, &[&both, &pool_only])?;

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn nearby_places_match_any_pattern() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let school = app
                .create_listing(
                    ListingBuilder::new()
                        .nearby(&[("Education", "Greenwood High", "1 km")])
                        .build(),
                )
                .await?;
            let hospital = app
                .create_listing(
                    ListingBuilder::new()
                        .nearby(&[("Health", "City Hospital", "2 km")])
                        .build(),
                )
                .await?;
            let _mall = app
                .create_listing(
                    ListingBuilder::new()
                        .nearby(&[("Shopping", "Forum Mall", "3 km")])
                        .build(),
                )
                .await?;

            let body = app
                .search(json!({
                    "nearbyplace": [
                        { "category": "Education" },
                        { "place_name": "City Hospital" }
                    ]
                }))
                .await?;
            assert_matches(&body, &[&school, &hospital])?;

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn occupancy_type_matches_case_insensitively() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let shared = app
                .create_listing(ListingBuilder::new().set("occupancy_type", "Shared").build())
                .await?;
            let _single = app
                .create_listing(ListingBuilder::new().set("occupancy_type", "Single").build())
                .await?;

            let body = app.search(json!({ "occupancy_type": ["SHARED"] })).await?;
            assert_matches(&body, &[&shared])?;

            // Other enumerated fields stay case-sensitive.
            let east = app
                .create_listing(ListingBuilder::new().set("Facing", "East").build())
                .await?;
            let body = app.search(json!({ "Facing": "east" })).await?;
            assert_matches(&body, &[])?;
            let body = app.search(json!({ "Facing": "East" })).await?;
            assert_matches(&body, &[&east])?;

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn bathrooms_compare_numerically() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let two = app
                .create_listing(ListingBuilder::new().set("bathrooms", "2").build())
                .await?;
            let _three = app
                .create_listing(ListingBuilder::new().set("bathrooms", "3").build())
                .await?;

            let body = app.search(json!({ "bathrooms": [2, "2.0"] })).await?;
            assert_matches(&body, &[&two])?;

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn date_filter_any_time_adds_no_clause() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let fresh = app.create_listing(ListingBuilder::new().build()).await?;

            let body = app.search(json!({ "dateFilter": "lastWeek" })).await?;
            assert_matches(&body, &[&fresh])?;

            let body = app.search(json!({ "dateFilter": "anyTime" })).await?;
            assert_matches(&body, &[&fresh])?;

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn invalid_flag_text_is_rejected() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _headers, body) = app
                .request(
                    axum::http::Method::POST,
                    "/api/sell/search",
                    Some(json!({ "reraregistered": "yes" })),
                )
                .await?;
            assert_status(status, axum::http::StatusCode::BAD_REQUEST, "bad flag");
            assert_eq!(body["error"], "validation");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn nul_characters_in_criteria_are_a_client_error() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let _pune = app.create_listing(ListingBuilder::new().city("Pune").build()).await?;

            let (status, _headers, body) = app
                .request(
                    axum::http::Method::POST,
                    "/api/sell/search",
                    Some(json!({ "city": "Pu\u{0}ne" })),
                )
                .await?;
            assert_status(status, axum::http::StatusCode::BAD_REQUEST, "nul in city");
            assert_eq!(body["error"], "validation");
            assert_eq!(body["message"], "Text values must not contain NUL characters");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn coordinates_must_match_exactly() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let here = app.create_listing(ListingBuilder::new().build()).await?;
            let _elsewhere = app
                .create_listing(
                    ListingBuilder::new()
                        .set("googleaddress", json!({ "lat": "18.5204", "long": "73.8567" }))
                        .build(),
                )
                .await?;
            let _same_lat = app
                .create_listing(
                    ListingBuilder::new()
                        .set("googleaddress", json!({ "lat": "12.9716", "long": "73.8567" }))
                        .build(),
                )
                .await?;

            let body = app
                .search(json!({ "googleaddress": { "lat": "12.9716", "long": 77.5946 } }))
                .await?;
            assert_matches(&body, &[&here])?;

            // Half a coordinate is not a filter.
            let body = app.search(json!({ "googleaddress": { "lat": "12.9716" } })).await?;
            assert_eq!(body["totalCount"], 3);

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn favorite_false_excludes_flagged_listings() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let flagged = app.create_listing(ListingBuilder::new().build()).await?;
            let plain = app.create_listing(ListingBuilder::new().build()).await?;

            let (status, _headers, _body) = app
                .request(
                    axum::http::Method::PUT,
                    &format!("/api/sell/favorite/{flagged}"),
                    None,
                )
                .await?;
            assert_status(status, axum::http::StatusCode::OK, "flag");

            let body = app.search(json!({ "favorite": "false" })).await?;
            assert_matches(&body, &[&plain])?;

            let body = app.search(json!({ "favorite": "true" })).await?;
            assert_matches(&body, &[&flagged])?;

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn customer_name_matches_substrings_ignoring_case() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let ravi = app
                .create_listing(ListingBuilder::new().set("customerName", "Ravi Kumar").build())
                .await?;
            let _asha = app
                .create_listing(ListingBuilder::new().set("customerName", "Asha Rao").build())
                .await?;

            let body = app.search(json!({ "customerName": "ravi" })).await?;
            assert_matches(&body, &[&ravi])?;

            let body = app.search(json!({ "customerName": "KUMAR" })).await?;
            assert_matches(&body, &[&ravi])?;

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn last_month_excludes_older_listings() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let recent = app.create_listing(ListingBuilder::new().build()).await?;
            let old = app.create_listing(ListingBuilder::new().build()).await?;

            sqlx::query("UPDATE listings SET created_at = now() - interval '40 days' WHERE id = $1")
                .bind(uuid::Uuid::parse_str(&old)?)
                .execute(&app.state.db_pool)
                .await?;

            let body = app.search(json!({ "dateFilter": "lastMonth" })).await?;
            assert_matches(&body, &[&recent])?;

            let body = app.search(json!({ "dateFilter": "last3Months" })).await?;
            assert_matches(&body, &[&recent, &old])?;

            Ok(())
        })
    })
    .await
}
