use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{error::AppError, models::item::ItemStatus};

/// Parses a path id, answering `400` for anything that is not an integer.
pub fn parse_id<T: FromStr>(raw: &str, label: &str) -> Result<T, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid {} ID", label)))
}

pub fn validate_input<T: Validate>(input: &T) -> Result<(), AppError> {
    input.validate().map_err(AppError::from)
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, IntoParams, ToSchema)]
pub struct ItemListQuery {
    pub status: Option<ItemStatus>,
}
