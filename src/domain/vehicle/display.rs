//! Card text for a vehicle record

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

use super::record::Vehicle;

pub const NO_PLATE: &str = "No Plate";
pub const NOT_AVAILABLE: &str = "N/A";

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn plate_label(vehicle: &Vehicle) -> &str {
    non_blank(vehicle.plate_number.as_deref()).unwrap_or(NO_PLATE)
}

pub fn field_label(value: Option<&str>) -> &str {
    non_blank(value).unwrap_or(NOT_AVAILABLE)
}

/// Creation time in the local zone, "N/A" when absent
pub fn created_label(vehicle: &Vehicle) -> String {
    created_label_in(vehicle, &Local)
}

pub fn created_label_in<Tz>(vehicle: &Vehicle, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match non_blank(vehicle.created_at.as_deref()) {
        Some(raw) => format_timestamp_in(raw, tz),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Format an ISO-8601 stamp; unparseable input is returned verbatim
///
/// Stamps without an offset are wall-clock times and are shown as given.
/// Bare dates are midnight UTC.
pub fn format_timestamp_in<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let raw = raw.trim();
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return stamp.with_timezone(tz).format(DISPLAY_FORMAT).to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return naive.format(DISPLAY_FORMAT).to_string();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Utc
                .from_utc_datetime(&midnight)
                .with_timezone(tz)
                .format(DISPLAY_FORMAT)
                .to_string();
        }
    }
    raw.to_string()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;
    use crate::domain::vehicle::VehicleId;

    fn bare() -> Vehicle {
        Vehicle {
            id: VehicleId::from(1),
            plate_number: None,
            vehicle_brand: None,
            vehicle_model: None,
            car_color: None,
            user_id: None,
            created_at: None,
        }
    }

    #[test]
    fn test_placeholders() {
        let mut vehicle = bare();
        assert_eq!(plate_label(&vehicle), "No Plate");
        assert_eq!(field_label(vehicle.vehicle_brand.as_deref()), "N/A");
        assert_eq!(created_label_in(&vehicle, &Utc), "N/A");

        vehicle.plate_number = Some("   ".to_string());
        assert_eq!(plate_label(&vehicle), "No Plate");
        vehicle.plate_number = Some("ABC-123".to_string());
        assert_eq!(plate_label(&vehicle), "ABC-123");
    }

    #[test]
    fn test_timestamp_forms() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(
            format_timestamp_in("2024-03-01T10:15:00Z", &plus_two),
            "2024-03-01 12:15:00"
        );
        assert_eq!(
            format_timestamp_in("2024-03-01T10:15:00.123456", &plus_two),
            "2024-03-01 10:15:00"
        );
        assert_eq!(
            format_timestamp_in("2024-03-01", &Utc),
            "2024-03-01 00:00:00"
        );
        assert_eq!(format_timestamp_in("yesterday", &Utc), "yesterday");
    }
}
