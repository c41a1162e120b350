use std::collections::HashMap;
use std::fmt;
use log::{debug, error};

use crate::record::{Reason, UnresolvedRecord};
use crate::resolver::{Coordinate, PostalResolver};

/// Grouping identity for a marker. Always the (city, state) pair: distinct
/// states share city names, so the city alone is not an identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaceKey {
    pub city: String,
    pub state: String,
}

impl fmt::Display for PlaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.state.is_empty() {
            write!(f, "{}", self.city)
        } else {
            write!(f, "{}, {}", self.city, self.state)
        }
    }
}

/// Everything collected under one place key.
///
/// The coordinate is fixed when the key is first seen, even when that first
/// row had no usable coordinate, and is never overwritten by later codes.
/// Codes keep input order and duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceGroup {
    pub coordinate: Option<Coordinate>,
    pub codes: Vec<String>,
}

#[derive(Debug)]
pub struct Aggregation {
    pub groups: HashMap<PlaceKey, PlaceGroup>,
    pub unresolved: Vec<UnresolvedRecord>,
}

/// Resolve every postal code and group the successes by place.
///
/// A failed lookup, an unknown code, or a row with no place name routes the
/// code into `unresolved` and the loop moves on; one bad code never aborts
/// the rest. Every input code lands in exactly one of the two outputs.
pub fn aggregate<R: PostalResolver>(codes: Vec<String>, resolver: &R) -> Aggregation {
    let total = codes.len();
    let mut groups: HashMap<PlaceKey, PlaceGroup> = HashMap::new();
    let mut unresolved = Vec::new();

    for (idx, code) in codes.into_iter().enumerate() {
        debug!("[{}/{total}] resolving postal code [{code}]", idx + 1);

        let place = match resolver.resolve(&code) {
            Ok(Some(place)) => place,
            Ok(None) => {
                error!("no match for postal code [{code}]");
                unresolved.push(UnresolvedRecord::new(code, Reason::NoMatch));
                continue;
            }
            Err(e) => {
                error!("failed to process postal code [{code}]: {e}");
                unresolved.push(UnresolvedRecord::new(code, Reason::LookupFailed));
                continue;
            }
        };

        let Some(city) = place.city.clone() else {
            error!("postal code [{code}] resolved without a place name");
            unresolved.push(UnresolvedRecord::new(code, Reason::NoPlaceName));
            continue;
        };

        let key = PlaceKey {
            city,
            state: place.state.clone().unwrap_or_default(),
        };
        let group = groups.entry(key).or_insert_with(|| PlaceGroup {
            coordinate: place.coordinate(),
            codes: Vec::new(),
        });
        group.codes.push(code);
    }

    Aggregation { groups, unresolved }
}
