//! Geolocation as an external capability: one call that yields coordinates
//! or fails. There is no fallback location source; check-in proceeds
//! without a location when acquisition fails.

use crate::error::LocationError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// "lat, lon" with four decimals, the format recorded on check-in.
    pub fn display(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

pub trait LocationProvider {
    fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// A device without positioning hardware.
pub struct UnsupportedLocation;

impl LocationProvider for UnsupportedLocation {
    fn current_position(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Unsupported)
    }
}

/// Fixed position configured via `EMS_FIXED_LOCATION=lat,lon`.
pub struct FixedLocation(pub Coordinates);

impl LocationProvider for FixedLocation {
    fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// Build a provider from the optional configured position. A malformed
/// value behaves like a device that cannot retrieve a position.
pub fn from_config(fixed: Option<&str>) -> Box<dyn LocationProvider> {
    match fixed {
        None => Box::new(UnsupportedLocation),
        Some(raw) => match parse_pair(raw) {
            Some(coords) => Box::new(FixedLocation(coords)),
            None => Box::new(FailingLocation),
        },
    }
}

struct FailingLocation;

impl LocationProvider for FailingLocation {
    fn current_position(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Unavailable)
    }
}

fn parse_pair(raw: &str) -> Option<Coordinates> {
    let (lat, lon) = raw.split_once(',')?;
    Some(Coordinates {
        latitude: lat.trim().parse().ok()?,
        longitude: lon.trim().parse().ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_four_decimals() {
        let coords = Coordinates {
            latitude: 23.810331,
            longitude: 90.412521,
        };
        assert_eq!(coords.display(), "23.8103, 90.4125");
    }

    #[test]
    fn unsupported_and_unavailable_are_distinct() {
        assert_eq!(
            UnsupportedLocation.current_position().unwrap_err(),
            LocationError::Unsupported
        );
        assert_eq!(
            from_config(Some("garbage")).current_position().unwrap_err(),
            LocationError::Unavailable
        );
    }

    #[test]
    fn fixed_location_parses_from_pair() {
        let provider = from_config(Some("23.8103, 90.4125"));
        let coords = provider.current_position().unwrap();
        assert_eq!(coords.display(), "23.8103, 90.4125");
    }
}
