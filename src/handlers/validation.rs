//! Dry-run insert validation endpoint
//!
//! Lets admin tooling check a payload against an entity's insert rules
//! without writing anything.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::error::BmsError;
use crate::validation::{validate_insert, EntityKind, FieldViolation};
use crate::AppState;

pub async fn validate_payload(
    State(_state): State<AppState>,
    Path(entity): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, BmsError> {
    let kind: EntityKind =
        serde_json::from_value(Value::String(entity.clone())).map_err(|_| {
            BmsError::Validation(vec![FieldViolation::new(
                "entity",
                "invalid_enum",
                format!("unknown entity kind: {}", entity),
            )])
        })?;

    let accepted = validate_insert(kind, &payload).map_err(BmsError::Validation)?;
    Ok(Json(accepted))
}
