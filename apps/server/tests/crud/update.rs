use crate::support::*;
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn update_changes_only_supplied_fields() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let id = app
                .create_listing(ListingBuilder::new().city("Pune").price("100").build())
                .await?;

            let (status, _headers, body) = app
                .request(
                    Method::PUT,
                    &format!("/api/sell/properties/{id}"),
                    Some(json!({ "expect_price": "250", "landmark": "Old Mill" })),
                )
                .await?;
            assert_status(status, StatusCode::OK, "update");
            assert_eq!(body["message"], "Property updated successfully");

            let property = &body["property"];
            assert_eq!(property["expect_price"], "250");
            assert_eq!(property["landmark"], "Old Mill");
            assert_eq!(property["city"], "Pune");
            assert_eq!(property["propertytype"], "Residential");

            let (status, _headers, _body) = app
                .request(
                    Method::PUT,
                    &format!("/api/sell/properties/{id}"),
                    Some(json!({ "propertytype": "" })),
                )
                .await?;
            assert_status(status, StatusCode::BAD_REQUEST, "blank propertytype");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn update_replaces_images_only_when_new_ones_arrive() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let id = app.create_listing(ListingBuilder::new().build()).await?;
            let path = format!("/api/sell/properties/{id}");

            let (status, body) = app
                .multipart(
                    Method::PUT,
                    &path,
                    &[Part::File {
                        field: "propertyimage",
                        file_name: "a.png",
                        content: b"one",
                    }],
                )
                .await?;
            assert_status(status, StatusCode::OK, "upload image");
            let images = body["property"]["propertyimage"].clone();
            assert_eq!(images.as_array().map(Vec::len), Some(1));

            let (status, body) = app
                .multipart(Method::PUT, &path, &[Part::Text("city", "Agra")])
                .await?;
            assert_status(status, StatusCode::OK, "text only");
            assert_eq!(body["property"]["propertyimage"], images);
            assert_eq!(body["property"]["city"], "Agra");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn replacing_images_removes_the_old_files() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let id = app.create_listing(ListingBuilder::new().build()).await?;
            let path = format!("/api/sell/properties/{id}");
            let image = |body: &serde_json::Value| {
                body["property"]["propertyimage"][0]
                    .as_str()
                    .and_then(|p| p.rsplit('/').next())
                    .map(|name| app.state.uploads.dir().join(name))
            };

            let (status, body) = app
                .multipart(
                    Method::PUT,
                    &path,
                    &[Part::File {
                        field: "propertyimage",
                        file_name: "old.png",
                        content: b"old",
                    }],
                )
                .await?;
            assert_status(status, StatusCode::OK, "first image");
            let old = image(&body).expect("stored image");
            assert!(old.exists());

            let (status, body) = app
                .multipart(
                    Method::PUT,
                    &path,
                    &[Part::File {
                        field: "propertyimage",
                        file_name: "new.jpg",
                        content: b"new",
                    }],
                )
                .await?;
            assert_status(status, StatusCode::OK, "replacement image");
            let new = image(&body).expect("stored image");
            assert!(new.exists());
            assert!(!old.exists(), "replaced image file is removed");

            let (status, _body) = app
                .multipart(Method::PUT, &path, &[Part::Text("city", "Agra")])
                .await?;
            assert_status(status, StatusCode::OK, "text only");
            assert!(new.exists(), "kept image file stays");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn update_unknown_listing_is_404() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let missing = uuid::Uuid::new_v4();
            let (status, _headers, _body) = app
                .request(
                    Method::PUT,
                    &format!("/api/sell/properties/{missing}"),
                    Some(json!({ "city": "Agra" })),
                )
                .await?;
            assert_status(status, StatusCode::NOT_FOUND, "update missing");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn favorite_flag_flips_and_feeds_owner_favorites() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let id = app
                .create_listing(ListingBuilder::new().owner("cust-9").build())
                .await?;
            let _other = app
                .create_listing(ListingBuilder::new().owner("cust-9").build())
                .await?;

            let (status, _headers, body) = app
                .request(Method::PUT, &format!("/api/sell/favorite/{id}"), None)
                .await?;
            assert_status(status, StatusCode::OK, "flip on");
            assert_eq!(body["favorite"], true);
            assert_eq!(body["message"], "Favorite status updated to true");

            let (status, _headers, body) = app
                .request(Method::GET, "/api/sell/property/favorites/cust-9", None)
                .await?;
            assert_status(status, StatusCode::OK, "owner favorites");
            let data = data_array(&body)?;
            assert_eq!(data.len(), 1);
            assert_eq!(data[0]["id"], id.as_str());

            let body = app.search(json!({ "favorite": true })).await?;
            assert_eq!(body["totalCount"], 1);

            let (_status, _headers, body) = app
                .request(Method::PUT, &format!("/api/sell/favorite/{id}"), None)
                .await?;
            assert_eq!(body["favorite"], false);

            Ok(())
        })
    })
    .await
}
