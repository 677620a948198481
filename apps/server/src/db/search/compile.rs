//! Listing filter compiler.
//!
//! Translates [`SearchCriteria`] into a list of store-agnostic [`Clause`]s plus a sort key and
//! a page window. Compilation is pure: the only ambient input is `now`, which anchors relative
//! date windows and is passed in by the caller.

use chrono::{DateTime, Duration, Months, NaiveTime, Utc};
use rust_decimal::Decimal;

use super::criteria::{NearbyPattern, SearchCriteria};
use super::numeric::parse_numeric_text;
use crate::config::SearchConfig;
use crate::models::{Loose, OneOrMany};
use crate::{Error, Result};

/// Listing columns a clause can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    PropertyType,
    ListingType,
    ResidentialType,
    CommercialType,
    SaleType,
    SellerType,
    Facing,
    Dimensions,
    TotalArea,
    City,
    Address,
    Landmark,
    GeoLat,
    GeoLong,
    Bedrooms,
    Bathrooms,
    Furnishing,
    PossessionStatus,
    ApprovalAuthority,
    ReraRegistered,
    ExpectPrice,
    BookingTokenAmount,
    FloorNo,
    CustomerId,
    CustomerName,
    CustomerNumber,
    OfficeSeats,
    Acre,
    Kunte,
    Diet,
    BachelorAllowed,
    OccupancyType,
    FoodProvided,
    ProfessionType,
    Favorite,
}

impl Column {
    pub fn sql(self) -> &'static str {
        match self {
            Column::PropertyType => "l.property_type",
            Column::ListingType => "l.listing_type",
            Column::ResidentialType => "l.residential_type",
            Column::CommercialType => "l.commercial_type",
            Column::SaleType => "l.sale_type",
            Column::SellerType => "l.seller_type",
            Column::Facing => "l.facing",
            Column::Dimensions => "l.dimensions",
            Column::TotalArea => "l.total_area",
            Column::City => "l.city",
            Column::Address => "l.address",
            Column::Landmark => "l.landmark",
            Column::GeoLat => "l.geo_lat",
            Column::GeoLong => "l.geo_long",
            Column::Bedrooms => "l.bedrooms",
            Column::Bathrooms => "l.bathrooms",
            Column::Furnishing => "l.furnishing",
            Column::PossessionStatus => "l.possession_status",
            Column::ApprovalAuthority => "l.approval_authority",
            Column::ReraRegistered => "l.rera_registered",
            Column::ExpectPrice => "l.expect_price",
            Column::BookingTokenAmount => "l.booking_token_amount",
            Column::FloorNo => "l.floor_no",
            Column::CustomerId => "l.customer_id",
            Column::CustomerName => "l.customer_name",
            Column::CustomerNumber => "l.customer_number",
            Column::OfficeSeats => "l.office_seats",
            Column::Acre => "l.acre",
            Column::Kunte => "l.kunte",
            Column::Diet => "l.diet",
            Column::BachelorAllowed => "l.bachelor_allowed",
            Column::OccupancyType => "l.occupancy_type",
            Column::FoodProvided => "l.food_provided",
            Column::ProfessionType => "l.profession_type",
            Column::Favorite => "l.favorite",
        }
    }
}

/// One requested nearby-place pattern with at least one part supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NearbyMatch {
    pub category: Option<String>,
    pub place_name: Option<String>,
    pub distance: Option<String>,
}

/// A single predicate over a listing. A listing qualifies when every clause holds.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Equals {
        column: Column,
        value: String,
    },
    OneOf {
        column: Column,
        values: Vec<String>,
        case_insensitive: bool,
    },
    /// Set membership on a numeric-semantic column. Numeric request values compare
    /// against the numeric projection; other tokens (e.g. `"4+"`) compare as text.
    NumericOneOf {
        column: Column,
        numbers: Vec<Decimal>,
        tokens: Vec<String>,
    },
    Contains {
        column: Column,
        needle: String,
    },
    Flag {
        column: Column,
        value: bool,
    },
    IntEquals {
        column: Column,
        value: i32,
    },
    /// Inclusive bounds over the numeric projection of a text column.
    Range {
        column: Column,
        min: Option<Decimal>,
        max: Option<Decimal>,
    },
    AllAmenities(Vec<String>),
    AnyNearby(Vec<NearbyMatch>),
    CreatedBetween {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Latest,
    PriceAscending,
    PriceDescending,
}

impl SortOrder {
    /// Unknown or missing values fall back to [`SortOrder::Latest`].
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("priceLowToHigh") => SortOrder::PriceAscending,
            Some("priceHighToLow") => SortOrder::PriceDescending,
            _ => SortOrder::Latest,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Latest => "latest",
            SortOrder::PriceAscending => "priceLowToHigh",
            SortOrder::PriceDescending => "priceHighToLow",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number.
    pub page: u32,
    pub size: u32,
}

impl Pagination {
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.size)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.size)
    }

    pub fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            return 0;
        }
        let size = i64::from(self.size);
        (total + size - 1) / size
    }
}

/// Relative creation-date windows accepted by `dateFilter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
    Yesterday,
    LastWeek,
    LastTwoWeeks,
    LastMonth,
    LastThreeMonths,
}

impl DateWindow {
    /// `anyTime` and unknown tokens select no window.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "yesterday" => Some(DateWindow::Yesterday),
            "lastWeek" => Some(DateWindow::LastWeek),
            "last2Weeks" => Some(DateWindow::LastTwoWeeks),
            "lastMonth" => Some(DateWindow::LastMonth),
            "last3Months" => Some(DateWindow::LastThreeMonths),
            _ => None,
        }
    }

    /// Start of the window: the UTC start of the day the window reaches back to.
    pub fn start(self, now: DateTime<Utc>) -> DateTime<Utc> {
        let today = now.date_naive();
        let day = match self {
            DateWindow::Yesterday => today - Duration::days(1),
            DateWindow::LastWeek => today - Duration::days(7),
            DateWindow::LastTwoWeeks => today - Duration::days(14),
            DateWindow::LastMonth => today
                .checked_sub_months(Months::new(1))
                .unwrap_or(today),
            DateWindow::LastThreeMonths => today
                .checked_sub_months(Months::new(3))
                .unwrap_or(today),
        };
        day.and_time(NaiveTime::MIN).and_utc()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledSearch {
    pub clauses: Vec<Clause>,
    pub sort: SortOrder,
    pub page: Pagination,
}

/// Compile client criteria into clauses, sort order and page window.
pub fn compile(
    criteria: &SearchCriteria,
    now: DateTime<Utc>,
    config: &SearchConfig,
) -> Result<CompiledSearch> {
    let mut clauses = Vec::new();

    let exact = [
        (Column::PropertyType, &criteria.property_type),
        (Column::ListingType, &criteria.listing_type),
        (Column::Dimensions, &criteria.dimensions),
        (Column::City, &criteria.city),
        (Column::BookingTokenAmount, &criteria.booking_token_amount),
        (Column::CustomerId, &criteria.customer_id),
        (Column::CustomerNumber, &criteria.customer_number),
        (Column::Acre, &criteria.acre),
        (Column::Kunte, &criteria.kunte),
        (Column::Diet, &criteria.diet),
    ];
    for (column, value) in exact {
        if let Some(value) = present_text(value) {
            clauses.push(Clause::Equals { column, value });
        }
    }

    if let Some(raw) = present_text(&criteria.office_seats) {
        let value = raw
            .parse::<i32>()
            .map_err(|_| invalid("office_seats", &raw))?;
        clauses.push(Clause::IntEquals {
            column: Column::OfficeSeats,
            value,
        });
    }

    let sets = [
        (Column::ResidentialType, &criteria.residential_type, false),
        (Column::CommercialType, &criteria.commercial_type, false),
        (Column::SaleType, &criteria.sale_type, false),
        (Column::SellerType, &criteria.seller_type, false),
        (Column::Facing, &criteria.facing, false),
        (Column::Furnishing, &criteria.furnishing, false),
        (Column::Bedrooms, &criteria.bedrooms, false),
        (Column::PossessionStatus, &criteria.possession_status, false),
        (Column::ApprovalAuthority, &criteria.approval_authority, false),
        (Column::OccupancyType, &criteria.occupancy_type, true),
        (Column::ProfessionType, &criteria.profession_type, true),
    ];
    for (column, input, case_insensitive) in sets {
        let values = set_values(input);
        if values.is_empty() {
            continue;
        }
        let values = if case_insensitive {
            dedup(values.into_iter().map(|v| v.to_lowercase()).collect())
        } else {
            values
        };
        clauses.push(Clause::OneOf {
            column,
            values,
            case_insensitive,
        });
    }

    let bathrooms = set_values(&criteria.bathrooms);
    if !bathrooms.is_empty() {
        let mut numbers = Vec::new();
        let mut tokens = Vec::new();
        for value in bathrooms {
            match parse_numeric_text(&value) {
                Some(n) if !numbers.contains(&n) => numbers.push(n),
                Some(_) => {}
                None => tokens.push(value),
            }
        }
        clauses.push(Clause::NumericOneOf {
            column: Column::Bathrooms,
            numbers,
            tokens,
        });
    }

    let substrings = [
        (Column::Address, &criteria.address),
        (Column::Landmark, &criteria.landmark),
        (Column::CustomerName, &criteria.customer_name),
    ];
    for (column, value) in substrings {
        if let Some(needle) = present_text(value) {
            clauses.push(Clause::Contains { column, needle });
        }
    }

    let flags = [
        (Column::Favorite, "favorite", &criteria.favorite),
        (Column::ReraRegistered, "reraregistered", &criteria.rera_registered),
        (Column::BachelorAllowed, "bachelor_allowed", &criteria.bachelor_allowed),
        (Column::FoodProvided, "food_provided", &criteria.food_provided),
    ];
    for (column, name, input) in flags {
        let Some(input) = input else { continue };
        let parsed = input
            .flag()
            .map_err(|reason| Error::Validation(format!("Invalid value for {name}: {reason}")))?;
        if let Some(value) = parsed {
            clauses.push(Clause::Flag { column, value });
        }
    }

    if let Some(geo) = &criteria.geo {
        if let (Some(lat), Some(long)) = (present_text(&geo.lat), present_text(&geo.long)) {
            clauses.push(Clause::Equals {
                column: Column::GeoLat,
                value: lat,
            });
            clauses.push(Clause::Equals {
                column: Column::GeoLong,
                value: long,
            });
        }
    }

    let ranges = [
        (
            Column::ExpectPrice,
            ("expect_price_min", &criteria.price_min),
            ("expect_price_max", &criteria.price_max),
        ),
        (
            Column::TotalArea,
            ("totalareaMin", &criteria.total_area_min),
            ("totalareaMax", &criteria.total_area_max),
        ),
        (
            Column::FloorNo,
            ("floor_no_min", &criteria.floor_no_min),
            ("floor_no_max", &criteria.floor_no_max),
        ),
    ];
    for (column, (min_name, min), (max_name, max)) in ranges {
        let min = bound(min_name, min)?;
        let max = bound(max_name, max)?;
        if min.is_some() || max.is_some() {
            clauses.push(Clause::Range { column, min, max });
        }
    }

    if let Some(amenities) = &criteria.amenities {
        let names = amenities.names();
        if !names.is_empty() {
            clauses.push(Clause::AllAmenities(names));
        }
    }

    if let Some(nearby) = &criteria.nearby_places {
        let patterns: Vec<NearbyMatch> = nearby
            .patterns()
            .into_iter()
            .filter_map(nearby_match)
            .collect();
        if !patterns.is_empty() {
            clauses.push(Clause::AnyNearby(patterns));
        }
    }

    if let Some(window) = present_text(&criteria.date_filter)
        .as_deref()
        .and_then(DateWindow::parse)
    {
        clauses.push(Clause::CreatedBetween {
            start: window.start(now),
            end: now,
        });
    }

    let sort = SortOrder::parse(present_text(&criteria.sort_by).as_deref());
    let page = pagination(criteria, config)?;

    Ok(CompiledSearch {
        clauses,
        sort,
        page,
    })
}

fn present_text(value: &Option<Loose>) -> Option<String> {
    value.as_ref().and_then(Loose::text)
}

fn set_values(value: &Option<OneOrMany>) -> Vec<String> {
    value.as_ref().map(OneOrMany::values).unwrap_or_default()
}

fn dedup(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

fn invalid(field: &str, raw: &str) -> Error {
    Error::Validation(format!("Invalid value for {field}: '{raw}'"))
}

fn bound(field: &str, value: &Option<Loose>) -> Result<Option<Decimal>> {
    match present_text(value) {
        None => Ok(None),
        Some(raw) => parse_numeric_text(&raw)
            .map(Some)
            .ok_or_else(|| invalid(field, &raw)),
    }
}

fn nearby_match(pattern: &NearbyPattern) -> Option<NearbyMatch> {
    let m = NearbyMatch {
        category: present_text(&pattern.category),
        place_name: present_text(&pattern.place_name),
        distance: present_text(&pattern.distance),
    };
    if m.category.is_none() && m.place_name.is_none() && m.distance.is_none() {
        None
    } else {
        Some(m)
    }
}

fn page_number(field: &str, value: &Option<Loose>) -> Result<Option<i64>> {
    match present_text(value) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<i64>()
            .map(Some)
            .map_err(|_| invalid(field, &raw)),
    }
}

fn pagination(criteria: &SearchCriteria, config: &SearchConfig) -> Result<Pagination> {
    let max = i64::from(config.max_page_size.max(1));
    let page = page_number("page", &criteria.page)?
        .unwrap_or(1)
        .clamp(1, i64::from(u32::MAX));
    let size = page_number("limit", &criteria.limit)?
        .unwrap_or(i64::from(config.default_page_size))
        .clamp(1, max);
    Ok(Pagination {
        page: page as u32,
        size: size as u32,
    })
}
