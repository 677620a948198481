use serde_json::json;

use super::bind::{push_decimal, push_decimal_array, push_text, push_text_array, push_timestamp};
use super::BindValue;
use crate::db::search::compile::{Clause, NearbyMatch};
use crate::db::search::escape::escape_like_pattern;
use crate::db::search::numeric::numeric_projection;

/// Render one clause as a SQL boolean expression over the `listings l` row.
pub(super) fn build_clause(clause: &Clause, bind_params: &mut Vec<BindValue>) -> String {
    match clause {
        Clause::Equals { column, value } => {
            let idx = push_text(bind_params, value.clone());
            format!("{} = ${}", column.sql(), idx)
        }
        Clause::OneOf {
            column,
            values,
            case_insensitive,
        } => {
            let idx = push_text_array(bind_params, values.clone());
            if *case_insensitive {
                format!("lower({}) = ANY(${})", column.sql(), idx)
            } else {
                format!("{} = ANY(${})", column.sql(), idx)
            }
        }
        Clause::NumericOneOf {
            column,
            numbers,
            tokens,
        } => {
            let mut parts = Vec::new();
            if !numbers.is_empty() {
                let idx = push_decimal_array(bind_params, numbers);
                parts.push(format!(
                    "{} = ANY(${}::numeric[])",
                    numeric_projection(column.sql()),
                    idx
                ));
            }
            if !tokens.is_empty() {
                let idx = push_text_array(bind_params, tokens.clone());
                parts.push(format!("{} = ANY(${})", column.sql(), idx));
            }
            match parts.len() {
                0 => "FALSE".to_string(),
                1 => parts.remove(0),
                _ => format!("({})", parts.join(" OR ")),
            }
        }
        Clause::Contains { column, needle } => {
            let idx = push_text(bind_params, format!("%{}%", escape_like_pattern(needle)));
            format!("{} ILIKE ${} ESCAPE E'\\\\'", column.sql(), idx)
        }
        Clause::Flag { column, value } => {
            let idx = push_text(bind_params, value.to_string());
            format!("{} = ${}::boolean", column.sql(), idx)
        }
        Clause::IntEquals { column, value } => {
            let idx = push_text(bind_params, value.to_string());
            format!("{} = ${}::integer", column.sql(), idx)
        }
        Clause::Range { column, min, max } => {
            let projected = numeric_projection(column.sql());
            let mut parts = Vec::new();
            if let Some(min) = min {
                let idx = push_decimal(bind_params, *min);
                parts.push(format!("{} >= ${}::numeric", projected, idx));
            }
            if let Some(max) = max {
                let idx = push_decimal(bind_params, *max);
                parts.push(format!("{} <= ${}::numeric", projected, idx));
            }
            if parts.is_empty() {
                "TRUE".to_string()
            } else {
                format!("({})", parts.join(" AND "))
            }
        }
        Clause::AllAmenities(names) => {
            let required: Vec<_> = names.iter().map(|name| json!({ "name": name })).collect();
            let idx = push_text(bind_params, serde_json::Value::Array(required).to_string());
            format!("l.amenities @> ${}::jsonb", idx)
        }
        Clause::AnyNearby(patterns) => build_nearby_clause(patterns, bind_params),
        Clause::CreatedBetween { start, end } => {
            let start_idx = push_timestamp(bind_params, *start);
            let end_idx = push_timestamp(bind_params, *end);
            format!(
                "(l.created_at >= ${}::timestamptz AND l.created_at <= ${}::timestamptz)",
                start_idx, end_idx
            )
        }
    }
}

/// At least one nearby-place entry must satisfy at least one requested pattern.
fn build_nearby_clause(patterns: &[NearbyMatch], bind_params: &mut Vec<BindValue>) -> String {
    let mut alternatives = Vec::new();
    for pattern in patterns {
        let mut parts = Vec::new();
        if let Some(category) = &pattern.category {
            let idx = push_text(bind_params, category.clone());
            parts.push(format!("np.place->>'category' = ${}", idx));
        }
        if let Some(name) = &pattern.place_name {
            let idx = push_text(bind_params, format!("%{}%", escape_like_pattern(name)));
            parts.push(format!("np.place->>'place_name' ILIKE ${} ESCAPE E'\\\\'", idx));
        }
        if let Some(distance) = &pattern.distance {
            let idx = push_text(bind_params, distance.clone());
            parts.push(format!("np.place->>'distance' = ${}", idx));
        }
        if !parts.is_empty() {
            alternatives.push(format!("({})", parts.join(" AND ")));
        }
    }

    if alternatives.is_empty() {
        return "TRUE".to_string();
    }
    format!(
        "EXISTS (SELECT 1 FROM jsonb_array_elements(l.nearby_places) AS np(place) WHERE {})",
        alternatives.join(" OR ")
    )
}
