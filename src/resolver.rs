use thiserror::Error;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// What a postal-code lookup hands back. The reference dataset has
/// incomplete rows, so every field is individually absentable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedPlace {
    pub city: Option<String>,
    pub state: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl ResolvedPlace {
    pub fn coordinate(&self) -> Option<Coordinate> {
        Some(Coordinate {
            latitude: self.latitude?,
            longitude: self.longitude?,
        })
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("zip code dataset query failed for [{0}]")]
    Dataset(String),
}

/// The postal-lookup boundary. `Ok(None)` means the dataset has no row for
/// the code; `Err` means the lookup itself fell over. One resolver value is
/// built per run and passed into aggregation, no ambient singleton.
pub trait PostalResolver {
    fn resolve(&self, code: &str) -> Result<Option<ResolvedPlace>, ResolveError>;
}

/// Resolver over the US zip code dataset bundled with the `zipcodes` crate.
pub struct UsZipResolver;

impl UsZipResolver {
    pub fn new() -> Self {
        Self
    }
}

impl PostalResolver for UsZipResolver {
    fn resolve(&self, code: &str) -> Result<Option<ResolvedPlace>, ResolveError> {
        // Avoid zipcodes::matching to suppress debug_print output.
        let rows = zipcodes::filter_by(vec![|z: &zipcodes::Zipcode| z.zip_code == code], None)
            .map_err(|_| ResolveError::Dataset(code.to_string()))?;
        let Some(info) = rows.first() else {
            return Ok(None);
        };
        Ok(Some(ResolvedPlace {
            city: non_empty(&info.city),
            state: non_empty(&info.state),
            latitude: info.lat.parse().ok(),
            longitude: info.long.parse().ok(),
        }))
    }
}

fn non_empty(field: &str) -> Option<String> {
    let field = field.trim();
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_needs_both_axes() {
        let mut place = ResolvedPlace {
            latitude: Some(39.8),
            longitude: Some(-89.6),
            ..Default::default()
        };
        assert_eq!(
            place.coordinate(),
            Some(Coordinate { latitude: 39.8, longitude: -89.6 }),
        );

        place.longitude = None;
        assert_eq!(place.coordinate(), None);
    }

    #[test]
    fn known_zip_resolves_to_its_city() {
        let place = UsZipResolver::new()
            .resolve("90210")
            .expect("dataset query failed")
            .expect("90210 missing from dataset");
        assert_eq!(place.city.as_deref(), Some("Beverly Hills"));
        assert_eq!(place.state.as_deref(), Some("CA"));
        assert!(place.coordinate().is_some());
    }

    #[test]
    fn unknown_zip_resolves_to_nothing() {
        let place = UsZipResolver::new().resolve("00000").expect("dataset query failed");
        assert_eq!(place, None);
    }
}
