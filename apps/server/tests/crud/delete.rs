use crate::support::*;
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn delete_removes_listing_and_dependents() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let id = app.create_listing(ListingBuilder::new().build()).await?;

            let (status, _headers, _body) = app
                .request(
                    Method::POST,
                    "/api/favorites/toggle",
                    Some(json!({ "customerId": "c1", "customerName": "Asha", "propertyId": id })),
                )
                .await?;
            assert_status(status, StatusCode::CREATED, "favorite");

            let (status, _headers, _body) = app
                .request(
                    Method::POST,
                    "/api/enquiry/enquiries",
                    Some(json!({
                        "userName": "Ravi",
                        "phoneNumber": "9999999999",
                        "userId": "u1",
                        "propertyId": id,
                    })),
                )
                .await?;
            assert_status(status, StatusCode::OK, "enquiry");

            let (status, _headers, body) = app
                .request(Method::DELETE, &format!("/api/sell/properties/{id}"), None)
                .await?;
            assert_status(status, StatusCode::OK, "delete");
            assert_eq!(body["message"], "Property deleted successfully");

            let (status, _headers, _body) = app
                .request(Method::GET, &format!("/api/sell/properties/{id}"), None)
                .await?;
            assert_status(status, StatusCode::NOT_FOUND, "gone");

            let (_status, _headers, body) = app.request(Method::GET, "/api/favorites/c1", None).await?;
            assert!(data_array(&body)?.is_empty());

            let (_status, _headers, body) = app
                .request(Method::GET, "/api/enquiry/enquiries", None)
                .await?;
            assert!(data_array(&body)?.is_empty());

            let (status, _headers, _body) = app
                .request(Method::DELETE, &format!("/api/sell/properties/{id}"), None)
                .await?;
            assert_status(status, StatusCode::NOT_FOUND, "second delete");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn delete_removes_image_files() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, body) = app
                .multipart(
                    Method::POST,
                    "/api/sell/properties",
                    &[
                        Part::Text("propertytype", "Residential"),
                        Part::Text("googleaddress", r#"{"lat":"1","long":"2"}"#),
                        Part::File {
                            field: "propertyimage",
                            file_name: "front.png",
                            content: b"front",
                        },
                    ],
                )
                .await?;
            assert_status(status, StatusCode::CREATED, "create with image");
            let id = body["property"]["id"].as_str().expect("id").to_string();
            let stored = body["property"]["propertyimage"][0]
                .as_str()
                .and_then(|p| p.rsplit('/').next())
                .map(|name| app.state.uploads.dir().join(name))
                .expect("stored image");
            assert!(stored.exists());

            let (status, _headers, _body) = app
                .request(Method::DELETE, &format!("/api/sell/properties/{id}"), None)
                .await?;
            assert_status(status, StatusCode::OK, "delete");
            assert!(!stored.exists(), "image file is removed with the listing");

            Ok(())
        })
    })
    .await
}
