use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::CommonError;
use crate::http::{read_limited_text, MAX_ERROR_BODY_BYTES};
use crate::model::{IncidentBundle, IncidentRecord};

/// Read-only client for the public Autobahn traffic API.
///
/// All operations are plain GETs returning JSON. The per-category accessors
/// return `Result`; `bundle` and `all_data` apply the degrade-to-empty policy
/// for callers that must keep going when a category is unavailable.
#[derive(Clone)]
pub struct AutobahnClient {
    base_url: String,
    http: reqwest::Client,
}

/// `GET /` — the highway catalog.
#[derive(Debug, Deserialize)]
struct RoadsResponse {
    roads: Vec<String>,
}

/// `GET /{road}/services/roadworks`
#[derive(Debug, Deserialize)]
struct RoadworksResponse {
    #[serde(default)]
    roadworks: Vec<IncidentRecord>,
}

/// `GET /{road}/services/warning` — note the singular key in the payload.
#[derive(Debug, Deserialize)]
struct WarningsResponse {
    #[serde(default)]
    warning: Vec<IncidentRecord>,
}

/// `GET /{road}/services/closure` — singular key as well.
#[derive(Debug, Deserialize)]
struct ClosuresResponse {
    #[serde(default)]
    closure: Vec<IncidentRecord>,
}

impl AutobahnClient {
    pub fn new(base_url: &str) -> Result<Self, CommonError> {
        let http = reqwest::Client::builder()
            .user_agent("einsatz/autobahn-client")
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, endpoint: &str) -> Result<T, CommonError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let resp = self.http.get(&url).send().await?;
        if resp.status().is_success() {
            return Ok(resp.json::<T>().await?);
        }
        let status = resp.status();
        let body = read_limited_text(resp, MAX_ERROR_BODY_BYTES).await;
        Err(CommonError::Status { status, body })
    }

    /// The catalog of known highway identifiers (e.g. "A8").
    pub async fn roads(&self) -> Result<Vec<String>, CommonError> {
        let resp: RoadsResponse = self.get_json("/").await?;
        Ok(resp.roads)
    }

    /// Current construction sites on one highway.
    pub async fn roadworks(&self, road: &str) -> Result<Vec<IncidentRecord>, CommonError> {
        let resp: RoadworksResponse = self.get_json(&format!("/{road}/services/roadworks")).await?;
        Ok(resp.roadworks)
    }

    /// Current traffic reports on one highway.
    pub async fn warnings(&self, road: &str) -> Result<Vec<IncidentRecord>, CommonError> {
        let resp: WarningsResponse = self.get_json(&format!("/{road}/services/warning")).await?;
        Ok(resp.warning)
    }

    /// Current closures on one highway.
    pub async fn closures(&self, road: &str) -> Result<Vec<IncidentRecord>, CommonError> {
        let resp: ClosuresResponse = self.get_json(&format!("/{road}/services/closure")).await?;
        Ok(resp.closure)
    }

    pub async fn roadwork_details(&self, id: &str) -> Result<IncidentRecord, CommonError> {
        self.get_json(&format!("/details/roadworks/{id}")).await
    }

    pub async fn warning_details(&self, id: &str) -> Result<IncidentRecord, CommonError> {
        self.get_json(&format!("/details/warning/{id}")).await
    }

    pub async fn closure_details(&self, id: &str) -> Result<IncidentRecord, CommonError> {
        self.get_json(&format!("/details/closure/{id}")).await
    }

    /// Fetches all three categories for one highway, sequentially.
    ///
    /// Each category degrades independently: a failed fetch is logged and
    /// becomes an empty collection, so the caller can always render the
    /// remaining categories.
    pub async fn bundle(&self, road: &str) -> IncidentBundle {
        IncidentBundle {
            roadworks: or_empty(self.roadworks(road).await, road, "roadworks"),
            warnings: or_empty(self.warnings(road).await, road, "warnings"),
            closures: or_empty(self.closures(road).await, road, "closures"),
        }
    }

    /// Bulk accessor: the incident bundle for every known highway, one
    /// sequential round-trip set per identifier. Errors only when the
    /// catalog itself cannot be fetched.
    pub async fn all_data(&self) -> Result<BTreeMap<String, IncidentBundle>, CommonError> {
        let roads = self.roads().await?;
        let mut out = BTreeMap::new();
        for road in roads {
            let bundle = self.bundle(&road).await;
            info!(road = %road, items = bundle.len(), "fetched highway data");
            out.insert(road, bundle);
        }
        Ok(out)
    }
}

fn or_empty(
    result: Result<Vec<IncidentRecord>, CommonError>,
    road: &str,
    category: &str,
) -> Vec<IncidentRecord> {
    match result {
        Ok(records) => records,
        Err(e) => {
            warn!(road, category, error = %e, "fetch failed, treating as no data");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = AutobahnClient::new("https://verkehr.autobahn.de/o/autobahn/").unwrap();
        assert_eq!(client.base_url(), "https://verkehr.autobahn.de/o/autobahn");
    }

    // 127.0.0.1:9 (discard) is not listening; every request fails with a
    // connection error without touching the network.
    const UNREACHABLE: &str = "http://127.0.0.1:9";

    #[tokio::test]
    async fn test_roads_surfaces_transport_error() {
        let client = AutobahnClient::new(UNREACHABLE).unwrap();
        assert!(client.roads().await.is_err());
    }

    #[tokio::test]
    async fn test_detail_accessors_surface_transport_errors() {
        let client = AutobahnClient::new(UNREACHABLE).unwrap();
        assert!(client.roadwork_details("rw1").await.is_err());
        assert!(client.warning_details("warn1").await.is_err());
        assert!(client.closure_details("clos1").await.is_err());
    }

    #[tokio::test]
    async fn test_all_data_fails_without_catalog() {
        let client = AutobahnClient::new(UNREACHABLE).unwrap();
        assert!(client.all_data().await.is_err());
    }

    #[tokio::test]
    async fn test_bundle_degrades_each_category_to_empty() {
        let client = AutobahnClient::new(UNREACHABLE).unwrap();
        let bundle = client.bundle("A8").await;
        assert!(bundle.roadworks.is_empty());
        assert!(bundle.warnings.is_empty());
        assert!(bundle.closures.is_empty());
    }
}
