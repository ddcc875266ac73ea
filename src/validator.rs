//! Coordinate validation
//!
//! Parses a raw `{latitude},{longitude}` path segment into a validated
//! [`Coordinates`] pair. Format problems are rejected before any numeric
//! parsing; numeric and range problems are reported per field, and a
//! request failing on both fields carries both in the error details.

use crate::error::{AppError, FieldError};
use crate::models::Coordinates;

const FORMAT_MESSAGE: &str = "Invalid coordinates format. Expected: {latitude},{longitude}";

const LATITUDE_NUMBER_MESSAGE: &str = "Latitude must be a valid number";
const LATITUDE_RANGE_MESSAGE: &str = "Latitude must be between -90 and 90";
const LONGITUDE_NUMBER_MESSAGE: &str = "Longitude must be a valid number";
const LONGITUDE_RANGE_MESSAGE: &str = "Longitude must be between -180 and 180";

/// Validate a raw coordinate string.
///
/// # Errors
///
/// Returns [`AppError::Validation`] when the separator or either half is
/// missing, a half does not parse as a finite number, or a value falls
/// outside its inclusive range.
pub fn validate(raw: &str) -> crate::Result<Coordinates> {
    let parts: Vec<&str> = raw.split(',').collect();
    if parts.len() != 2 {
        return Err(AppError::validation(FORMAT_MESSAGE));
    }

    let lat_raw = parts[0].trim();
    let lon_raw = parts[1].trim();
    if lat_raw.is_empty() || lon_raw.is_empty() {
        return Err(AppError::validation(FORMAT_MESSAGE));
    }

    let mut details = Vec::new();
    let latitude = parse_field(
        lat_raw,
        "latitude",
        LATITUDE_NUMBER_MESSAGE,
        LATITUDE_RANGE_MESSAGE,
        -90.0,
        90.0,
        &mut details,
    );
    let longitude = parse_field(
        lon_raw,
        "longitude",
        LONGITUDE_NUMBER_MESSAGE,
        LONGITUDE_RANGE_MESSAGE,
        -180.0,
        180.0,
        &mut details,
    );

    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Ok(Coordinates::new(latitude, longitude)),
        _ => Err(AppError::validation_fields(details)),
    }
}

fn parse_field(
    raw: &str,
    field: &str,
    number_message: &str,
    range_message: &str,
    min: f64,
    max: f64,
    details: &mut Vec<FieldError>,
) -> Option<f64> {
    let Ok(value) = raw.parse::<f64>() else {
        details.push(FieldError::new(field, number_message));
        return None;
    };
    if !value.is_finite() {
        details.push(FieldError::new(field, number_message));
        return None;
    }
    if !(min..=max).contains(&value) {
        details.push(FieldError::new(field, range_message));
        return None;
    }
    Some(value)
}
