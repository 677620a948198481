//! PostgreSQL listing store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use super::traits::{ListingFilter, ListingStore};
use crate::models::{Amenity, GeoPoint, Listing, ListingFields, NearbyPlace, NewListing};
use crate::Result;

/// Column list selected for every listing read, aliased on `l`.
pub(crate) const LISTING_COLUMNS: &str = "l.id, l.property_type, l.listing_type, \
    l.residential_type, l.commercial_type, l.sale_type, l.seller_type, l.facing, l.dimensions, \
    l.total_area, l.city, l.address, l.landmark, l.geo_lat, l.geo_long, l.bedrooms, l.bathrooms, \
    l.furnishing, l.possession_status, l.approval_authority, l.rera_registered, l.amenities, \
    l.expect_price, l.booking_token_amount, l.nearby_places, l.floor_no, l.customer_id, \
    l.customer_name, l.customer_number, l.images, l.office_seats, l.acre, l.kunte, l.diet, \
    l.bachelor_allowed, l.occupancy_type, l.food_provided, l.profession_type, l.favorite, \
    l.created_at, l.updated_at";

// Value placeholders $2..$39 follow the same column order in both statements.
const INSERT_SQL: &str = "INSERT INTO listings AS l (id, property_type, listing_type, \
    residential_type, commercial_type, sale_type, seller_type, facing, dimensions, total_area, \
    city, address, landmark, geo_lat, geo_long, bedrooms, bathrooms, furnishing, \
    possession_status, approval_authority, rera_registered, amenities, expect_price, \
    booking_token_amount, nearby_places, floor_no, customer_id, customer_name, customer_number, \
    images, office_seats, acre, kunte, diet, bachelor_allowed, occupancy_type, food_provided, \
    profession_type, favorite) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, \
    $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29, $30, $31, \
    $32, $33, $34, $35, $36, $37, $38, $39)";

const UPDATE_SET_SQL: &str = "UPDATE listings AS l SET \
    property_type = COALESCE($2, l.property_type), \
    listing_type = COALESCE($3, l.listing_type), \
    residential_type = COALESCE($4, l.residential_type), \
    commercial_type = COALESCE($5, l.commercial_type), \
    sale_type = COALESCE($6, l.sale_type), \
    seller_type = COALESCE($7, l.seller_type), \
    facing = COALESCE($8, l.facing), \
    dimensions = COALESCE($9, l.dimensions), \
    total_area = COALESCE($10, l.total_area), \
    city = COALESCE($11, l.city), \
    address = COALESCE($12, l.address), \
    landmark = COALESCE($13, l.landmark), \
    geo_lat = COALESCE($14, l.geo_lat), \
    geo_long = COALESCE($15, l.geo_long), \
    bedrooms = COALESCE($16, l.bedrooms), \
    bathrooms = COALESCE($17, l.bathrooms), \
    furnishing = COALESCE($18, l.furnishing), \
    possession_status = COALESCE($19, l.possession_status), \
    approval_authority = COALESCE($20, l.approval_authority), \
    rera_registered = COALESCE($21, l.rera_registered), \
    amenities = COALESCE($22::jsonb, l.amenities), \
    expect_price = COALESCE($23, l.expect_price), \
    booking_token_amount = COALESCE($24, l.booking_token_amount), \
    nearby_places = COALESCE($25::jsonb, l.nearby_places), \
    floor_no = COALESCE($26, l.floor_no), \
    customer_id = COALESCE($27, l.customer_id), \
    customer_name = COALESCE($28, l.customer_name), \
    customer_number = COALESCE($29, l.customer_number), \
    images = COALESCE($30, l.images), \
    office_seats = COALESCE($31, l.office_seats), \
    acre = COALESCE($32, l.acre), \
    kunte = COALESCE($33, l.kunte), \
    diet = COALESCE($34, l.diet), \
    bachelor_allowed = COALESCE($35, l.bachelor_allowed), \
    occupancy_type = COALESCE($36, l.occupancy_type), \
    food_provided = COALESCE($37, l.food_provided), \
    profession_type = COALESCE($38, l.profession_type), \
    favorite = COALESCE($39, l.favorite), \
    updated_at = now() \
    WHERE l.id = $1";

/// Row shape of [`LISTING_COLUMNS`].
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ListingRow {
    id: Uuid,
    property_type: String,
    listing_type: Option<String>,
    residential_type: Option<String>,
    commercial_type: Option<String>,
    sale_type: Option<String>,
    seller_type: Option<String>,
    facing: Option<String>,
    dimensions: Option<String>,
    total_area: Option<String>,
    city: Option<String>,
    address: Option<String>,
    landmark: Option<String>,
    geo_lat: String,
    geo_long: String,
    bedrooms: Option<String>,
    bathrooms: Option<String>,
    furnishing: Option<String>,
    possession_status: Option<String>,
    approval_authority: Option<String>,
    rera_registered: bool,
    amenities: Json<Vec<Amenity>>,
    expect_price: Option<String>,
    booking_token_amount: Option<String>,
    nearby_places: Json<Vec<NearbyPlace>>,
    floor_no: Option<String>,
    customer_id: Option<String>,
    customer_name: Option<String>,
    customer_number: Option<String>,
    images: Vec<String>,
    office_seats: Option<i32>,
    acre: Option<String>,
    kunte: Option<String>,
    diet: Option<String>,
    bachelor_allowed: Option<bool>,
    occupancy_type: Option<String>,
    food_provided: Option<bool>,
    profession_type: Option<String>,
    favorite: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ListingRow> for Listing {
    fn from(row: ListingRow) -> Self {
        Self {
            id: row.id,
            property_type: row.property_type,
            listing_type: row.listing_type,
            residential_type: row.residential_type,
            commercial_type: row.commercial_type,
            sale_type: row.sale_type,
            seller_type: row.seller_type,
            facing: row.facing,
            dimensions: row.dimensions,
            total_area: row.total_area,
            city: row.city,
            address: row.address,
            landmark: row.landmark,
            geo: GeoPoint {
                lat: row.geo_lat,
                long: row.geo_long,
            },
            bedrooms: row.bedrooms,
            bathrooms: row.bathrooms,
            furnishing: row.furnishing,
            possession_status: row.possession_status,
            approval_authority: row.approval_authority,
            rera_registered: row.rera_registered,
            amenities: row.amenities.0,
            expect_price: row.expect_price,
            booking_token_amount: row.booking_token_amount,
            nearby_places: row.nearby_places.0,
            floor_no: row.floor_no,
            customer_id: row.customer_id,
            customer_name: row.customer_name,
            customer_number: row.customer_number,
            images: row.images,
            office_seats: row.office_seats,
            acre: row.acre,
            kunte: row.kunte,
            diet: row.diet,
            bachelor_allowed: row.bachelor_allowed,
            occupancy_type: row.occupancy_type,
            food_provided: row.food_provided,
            profession_type: row.profession_type,
            favorite: row.favorite,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

type ListingQuery<'q> = QueryAs<'q, Postgres, ListingRow, PgArguments>;

/// Bind placeholders $2..$39 in column order.
fn bind_fields(query: ListingQuery<'_>, fields: ListingFields) -> ListingQuery<'_> {
    let (geo_lat, geo_long) = fields.geo.map(|g| (g.lat, g.long)).unzip();
    query
        .bind(fields.property_type)
        .bind(fields.listing_type)
        .bind(fields.residential_type)
        .bind(fields.commercial_type)
        .bind(fields.sale_type)
        .bind(fields.seller_type)
        .bind(fields.facing)
        .bind(fields.dimensions)
        .bind(fields.total_area)
        .bind(fields.city)
        .bind(fields.address)
        .bind(fields.landmark)
        .bind(geo_lat)
        .bind(geo_long)
        .bind(fields.bedrooms)
        .bind(fields.bathrooms)
        .bind(fields.furnishing)
        .bind(fields.possession_status)
        .bind(fields.approval_authority)
        .bind(fields.rera_registered)
        .bind(fields.amenities.map(Json))
        .bind(fields.expect_price)
        .bind(fields.booking_token_amount)
        .bind(fields.nearby_places.map(Json))
        .bind(fields.floor_no)
        .bind(fields.customer_id)
        .bind(fields.customer_name)
        .bind(fields.customer_number)
        .bind(fields.images)
        .bind(fields.office_seats)
        .bind(fields.acre)
        .bind(fields.kunte)
        .bind(fields.diet)
        .bind(fields.bachelor_allowed)
        .bind(fields.occupancy_type)
        .bind(fields.food_provided)
        .bind(fields.profession_type)
        .bind(fields.favorite)
}

/// PostgreSQL implementation of [`ListingStore`].
#[derive(Clone)]
pub struct PostgresListingStore {
    pool: PgPool,
}

impl PostgresListingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingStore for PostgresListingStore {
    async fn create(&self, listing: NewListing, images: Vec<String>) -> Result<Listing> {
        let NewListing {
            property_type,
            geo,
            mut fields,
        } = listing;
        fields.property_type = Some(property_type);
        fields.geo = Some(geo);
        fields.images = Some(images);
        fields.rera_registered.get_or_insert(false);
        fields.favorite.get_or_insert(false);
        fields.amenities.get_or_insert_with(Vec::new);
        fields.nearby_places.get_or_insert_with(Vec::new);

        let sql = format!("{} RETURNING {}", INSERT_SQL, LISTING_COLUMNS);
        let query = sqlx::query_as::<_, ListingRow>(&sql).bind(Uuid::new_v4());
        let row = bind_fields(query, fields)
            .fetch_one(&self.pool)
            .await
            .map_err(crate::Error::Database)?;

        Ok(row.into())
    }

    async fn read(&self, id: Uuid) -> Result<Option<Listing>> {
        let sql = format!("SELECT {} FROM listings l WHERE l.id = $1", LISTING_COLUMNS);
        let row = sqlx::query_as::<_, ListingRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(crate::Error::Database)?;

        Ok(row.map(Listing::from))
    }

    async fn update(
        &self,
        id: Uuid,
        mut fields: ListingFields,
        images: Option<Vec<String>>,
    ) -> Result<Option<Listing>> {
        fields.images = images;

        let sql = format!("{} RETURNING {}", UPDATE_SET_SQL, LISTING_COLUMNS);
        let query = sqlx::query_as::<_, ListingRow>(&sql).bind(id);
        let row = bind_fields(query, fields)
            .fetch_optional(&self.pool)
            .await
            .map_err(crate::Error::Database)?;

        Ok(row.map(Listing::from))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(crate::Error::Database)?;

        Ok(result.rows_affected() > 0)
    }

    async fn toggle_favorite(&self, id: Uuid) -> Result<Option<bool>> {
        let favorite: Option<bool> = sqlx::query_scalar(
            "UPDATE listings SET favorite = NOT favorite, updated_at = now() \
             WHERE id = $1 RETURNING favorite",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(crate::Error::Database)?;

        Ok(favorite)
    }

    async fn find(&self, filter: &ListingFilter) -> Result<Vec<Listing>> {
        let mut query = sqlx::QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM listings l WHERE TRUE",
            LISTING_COLUMNS
        ));
        if let Some(id) = filter.id {
            query.push(" AND l.id = ").push_bind(id);
        }
        if let Some(city) = &filter.city {
            query.push(" AND l.city = ").push_bind(city.clone());
        }
        if let Some(listing_type) = &filter.listing_type {
            query
                .push(" AND l.listing_type = ")
                .push_bind(listing_type.clone());
        }
        if let Some(customer_id) = &filter.customer_id {
            query
                .push(" AND l.customer_id = ")
                .push_bind(customer_id.clone());
        }
        if let Some(favorite) = filter.favorite {
            query.push(" AND l.favorite = ").push_bind(favorite);
        }
        query.push(" ORDER BY l.created_at DESC, l.id DESC");

        let rows = query
            .build_query_as::<ListingRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(crate::Error::Database)?;

        Ok(rows.into_iter().map(Listing::from).collect())
    }

    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Listing>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT {} FROM listings l WHERE l.id = ANY($1)",
            LISTING_COLUMNS
        );
        let rows = sqlx::query_as::<_, ListingRow>(&sql)
            .bind(ids.to_vec())
            .fetch_all(&self.pool)
            .await
            .map_err(crate::Error::Database)?;

        Ok(rows.into_iter().map(Listing::from).collect())
    }
}
