use crate::support::*;
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn create_stores_listing_with_defaults() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _headers, body) = app
                .request(
                    Method::POST,
                    "/api/sell/properties",
                    Some(
                        ListingBuilder::new()
                            .city("Bangalore")
                            .price("5000000")
                            .amenities(&["pool"])
                            .build(),
                    ),
                )
                .await?;
            assert_status(status, StatusCode::CREATED, "create");
            assert_eq!(body["message"], "Property created successfully");

            let property = &body["property"];
            assert_eq!(property["propertytype"], "Residential");
            assert_eq!(property["city"], "Bangalore");
            assert_eq!(property["expect_price"], "5000000");
            assert_eq!(property["googleaddress"]["lat"], "12.9716");
            assert_eq!(property["amenities"][0]["name"], "pool");
            assert_eq!(property["favorite"], false);
            assert_eq!(property["reraregistered"], false);
            assert!(property["createdAt"].is_string());
            assert_eq!(property["propertyimage"], json!([]));

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn create_requires_property_type_and_coordinates() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _headers, body) = app
                .request(
                    Method::POST,
                    "/api/sell/properties",
                    Some(ListingBuilder::new().without("propertytype").build()),
                )
                .await?;
            assert_status(status, StatusCode::BAD_REQUEST, "missing propertytype");
            assert_eq!(body["error"], "validation");

            let (status, _headers, _body) = app
                .request(
                    Method::POST,
                    "/api/sell/properties",
                    Some(
                        ListingBuilder::new()
                            .set("googleaddress", json!({ "lat": "12.9" }))
                            .build(),
                    ),
                )
                .await?;
            assert_status(status, StatusCode::BAD_REQUEST, "half a coordinate");

            let (status, _headers, body) = app
                .request(Method::POST, "/api/sell/properties", Some(json!({})))
                .await?;
            assert_status(status, StatusCode::BAD_REQUEST, "empty body");
            assert_eq!(body["message"], "No listing fields provided");

            let all = app.search(json!({})).await?;
            assert_eq!(all["totalCount"], 0);

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn multipart_create_parses_json_text_fields_and_stores_images() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, body) = app
                .multipart(
                    Method::POST,
                    "/api/sell/properties",
                    &[
                        Part::Text("propertytype", "Commercial"),
                        Part::Text("googleaddress", r#"{"lat":"13.0","long":"77.6"}"#),
                        Part::Text("amenities", r#"[{"name":"lift"}]"#),
                        Part::Text("nearbyplace", r#"[{"category":"Transit","place_name":"Metro","distance":"500 m"}]"#),
                        Part::Text("office_seats", "40"),
                        Part::File {
                            field: "propertyimage",
                            file_name: "Front.JPG",
                            content: b"fake-jpeg",
                        },
                    ],
                )
                .await?;
            assert_status(status, StatusCode::CREATED, "multipart create");

            let property = &body["property"];
            assert_eq!(property["propertytype"], "Commercial");
            assert_eq!(property["office_seats"], 40);
            assert_eq!(property["amenities"][0]["name"], "lift");
            assert_eq!(property["nearbyplace"][0]["place_name"], "Metro");

            let image = property["propertyimage"][0]
                .as_str()
                .unwrap_or_default()
                .to_string();
            assert!(image.starts_with("/sellproperty/"), "{image}");
            assert!(image.ends_with(".jpg"), "{image}");

            // Stored images are served back under the public path.
            let (status, headers, bytes) = app
                .send(Method::GET, &image, "application/octet-stream", axum::body::Body::empty(), &[])
                .await?;
            assert_status(status, StatusCode::OK, "serve image");
            assert_eq!(&bytes[..], b"fake-jpeg");
            assert_eq!(
                headers
                    .get("cross-origin-resource-policy")
                    .and_then(|v| v.to_str().ok()),
                Some("cross-origin")
            );

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn multipart_create_rejects_bad_uploads() -> anyhow::Result<()> {
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
                            file_name: "notes.txt",
                            content: b"text",
                        },
                    ],
                )
                .await?;
            assert_status(status, StatusCode::BAD_REQUEST, "disallowed extension");
            assert_eq!(body["error"], "unsupported_upload");

            let (status, body) = app
                .multipart(
                    Method::POST,
                    "/api/sell/properties",
                    &[
                        Part::Text("propertytype", "Residential"),
                        Part::Text("googleaddress", "{not json"),
                    ],
                )
                .await?;
            assert_status(status, StatusCode::BAD_REQUEST, "malformed nested json");
            assert!(body["message"]
                .as_str()
                .unwrap_or_default()
                .contains("googleaddress"));

            let dir = app.state.uploads.dir();
            assert_eq!(std::fs::read_dir(dir)?.count(), 0, "no stray files");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn nul_characters_in_fields_are_a_client_error() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _headers, body) = app
                .request(
                    Method::POST,
                    "/api/sell/properties",
                    Some(ListingBuilder::new().city("Pu\u{0}ne").build()),
                )
                .await?;
            assert_status(status, StatusCode::BAD_REQUEST, "nul in city");
            assert_eq!(body["error"], "validation");

            let (status, _headers, body) = app
                .request(
                    Method::POST,
                    "/api/sell/properties",
                    Some(
                        ListingBuilder::new()
                            .nearby(&[("school", "D\u{0}PS", "2")])
                            .build(),
                    ),
                )
                .await?;
            assert_status(status, StatusCode::BAD_REQUEST, "nul in nested json");
            assert_eq!(body["error"], "validation");

            let (_status, _headers, body) =
                app.request(Method::GET, "/api/sell/properties", None).await?;
            assert!(data_array(&body)?.is_empty());

            Ok(())
        })
    })
    .await
}
