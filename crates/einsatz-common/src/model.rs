use serde::{Deserialize, Serialize};

/// Geographic point of an incident, stringly typed exactly as the API
/// reports it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: Option<String>,
    pub long: Option<String>,
}

/// One roadwork, warning, or closure as reported by the traffic API.
///
/// Every field is optional; the API omits fields freely depending on the
/// incident kind. `fields()` is the single place that decides what is
/// rendered — absent fields are skipped, never shown as empty values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IncidentRecord {
    pub identifier: Option<String>,
    /// Headline, e.g. "A8 | AS Stuttgart-Degerloch (52) - AS Esslingen (53)".
    pub title: Option<String>,
    /// Direction of travel, e.g. "Stuttgart Richtung München".
    pub subtitle: Option<String>,
    /// Bounding box "lon1,lat1,lon2,lat2" of the affected segment.
    pub extent: Option<String>,
    pub coordinate: Option<Coordinate>,
    /// Free-text description lines (start/end times, location, measures).
    pub description: Vec<String>,
    #[serde(rename = "startTimestamp")]
    pub start_timestamp: Option<String>,
    /// "true"/"false" as a string, as delivered by the API.
    #[serde(rename = "isBlocked")]
    pub is_blocked: Option<String>,
    pub future: Option<String>,
}

impl IncidentRecord {
    /// The non-absent fields in declaration order, rendered as strings.
    ///
    /// This drives the prompt output: one `name: value` line per entry.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        if let Some(v) = &self.identifier {
            out.push(("identifier", v.clone()));
        }
        if let Some(v) = &self.title {
            out.push(("title", v.clone()));
        }
        if let Some(v) = &self.subtitle {
            out.push(("subtitle", v.clone()));
        }
        if let Some(v) = &self.extent {
            out.push(("extent", v.clone()));
        }
        if let Some(c) = &self.coordinate {
            if let (Some(lat), Some(long)) = (&c.lat, &c.long) {
                out.push(("coordinate", format!("{lat},{long}")));
            }
        }
        if !self.description.is_empty() {
            out.push(("description", self.description.join(" | ")));
        }
        if let Some(v) = &self.start_timestamp {
            out.push(("startTimestamp", v.clone()));
        }
        if let Some(v) = &self.is_blocked {
            out.push(("isBlocked", v.clone()));
        }
        if let Some(v) = &self.future {
            out.push(("future", v.clone()));
        }
        out
    }
}

/// The three incident categories for one highway, kept as named,
/// independently typed collections.
#[derive(Debug, Clone, Default)]
pub struct IncidentBundle {
    pub roadworks: Vec<IncidentRecord>,
    pub warnings: Vec<IncidentRecord>,
    pub closures: Vec<IncidentRecord>,
}

impl IncidentBundle {
    /// Total number of records across all three categories.
    pub fn len(&self) -> usize {
        self.roadworks.len() + self.warnings.len() + self.closures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
