use crate::support::*;
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn get_by_id_returns_listing_or_404() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let id = app.create_listing(ListingBuilder::new().city("Goa").build()).await?;

            let (status, _headers, body) = app
                .request(Method::GET, &format!("/api/sell/properties/{id}"), None)
                .await?;
            assert_status(status, StatusCode::OK, "get");
            assert_eq!(body["success"], true);
            assert_eq!(body["data"]["id"], id.as_str());
            assert_eq!(body["data"]["city"], "Goa");

            let missing = uuid::Uuid::new_v4();
            let (status, _headers, body) = app
                .request(Method::GET, &format!("/api/sell/properties/{missing}"), None)
                .await?;
            assert_status(status, StatusCode::NOT_FOUND, "missing");
            assert_eq!(body["message"], "Property not found");
            assert_eq!(body["error"], "not_found");

            let (status, _headers, _body) = app
                .request(Method::GET, "/api/sell/properties/not-a-uuid", None)
                .await?;
            assert_status(status, StatusCode::BAD_REQUEST, "malformed id");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn list_all_is_newest_first() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let first = app.create_listing(ListingBuilder::new().build()).await?;
            let second = app.create_listing(ListingBuilder::new().build()).await?;

            let (status, _headers, body) = app
                .request(Method::GET, "/api/sell/properties", None)
                .await?;
            assert_status(status, StatusCode::OK, "list");
            let ids: Vec<&str> = data_array(&body)?
                .iter()
                .filter_map(|l| l["id"].as_str())
                .collect();
            assert_eq!(ids, vec![second.as_str(), first.as_str()]);

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn city_and_type_lookups_match_exactly() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let rent = app
                .create_listing(ListingBuilder::new().city("Delhi").set("type", "rent").build())
                .await?;
            let _sale = app
                .create_listing(ListingBuilder::new().city("Mumbai").set("type", "sale").build())
                .await?;

            let (status, _headers, body) = app
                .request(Method::GET, "/api/sell/properties/city?city=Delhi", None)
                .await?;
            assert_status(status, StatusCode::OK, "by city");
            let data = data_array(&body)?;
            assert_eq!(data.len(), 1);
            assert_eq!(data[0]["id"], rent.as_str());

            let (status, _headers, body) = app
                .request(Method::GET, "/api/sell/properties/type?type=rent", None)
                .await?;
            assert_status(status, StatusCode::OK, "by type");
            assert_eq!(data_array(&body)?.len(), 1);

            let (status, _headers, body) = app
                .request(Method::GET, "/api/sell/properties/city?city=Nowhere", None)
                .await?;
            assert_status(status, StatusCode::OK, "no match");
            assert!(data_array(&body)?.is_empty());

            let (status, _headers, body) = app
                .request(Method::GET, "/api/sell/properties/city?city=", None)
                .await?;
            assert_status(status, StatusCode::BAD_REQUEST, "blank city");
            assert_eq!(body["message"], "city query parameter is required");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn ownership_and_type_lookups_require_every_constraint() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let id = app
                .create_listing(ListingBuilder::new().owner("cust-1").set("type", "sale").build())
                .await?;

            let (status, _headers, body) = app
                .request(Method::GET, &format!("/api/sell/properties/{id}/cust-1/sale"), None)
                .await?;
            assert_status(status, StatusCode::OK, "owned");
            assert_eq!(body["data"]["customerId"], "cust-1");

            let (status, _headers, _body) = app
                .request(Method::GET, &format!("/api/sell/properties/{id}/cust-2/sale"), None)
                .await?;
            assert_status(status, StatusCode::NOT_FOUND, "other owner");

            let (status, _headers, _body) = app
                .request(Method::GET, &format!("/api/sell/getPropertyByIDandType/{id}/sale"), None)
                .await?;
            assert_status(status, StatusCode::OK, "with type");

            let (status, _headers, _body) = app
                .request(Method::GET, &format!("/api/sell/getPropertyByIDandType/{id}/rent"), None)
                .await?;
            assert_status(status, StatusCode::NOT_FOUND, "wrong type");

            Ok(())
        })
    })
    .await
}
