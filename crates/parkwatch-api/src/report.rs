//! Usage-report export request construction.
//!
//! Pure request building, no I/O: the caller hands the resulting
//! [`ExportRequest`] to [`ApiClient::download_report`](crate::ApiClient::download_report)
//! (or any other transport) and persists the byte stream itself. Keeping
//! construction separate makes the parameter encoding independently
//! testable.

use chrono::NaiveDate;
use reqwest::Method;
use url::Url;

/// Date range plus optional facility/zone scoping for a usage export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub facility_id: Option<i64>,
    pub zone_id: Option<i64>,
}

/// A fully-encoded export request: method plus URL with query string.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub method: Method,
    pub url: Url,
}

impl ReportQuery {
    /// Encode this query as a single GET request against `base_url`.
    ///
    /// `facility` and `zone` are omitted entirely when unset -- the
    /// backend treats an empty-string filter as a value, so it must
    /// never be sent.
    pub fn export_request(&self, base_url: &Url) -> Result<ExportRequest, crate::Error> {
        let mut url = base_url.join("/api/reports/usage/")?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("date_from", &self.date_from.format("%Y-%m-%d").to_string());
            pairs.append_pair("date_to", &self.date_to.format("%Y-%m-%d").to_string());
            if let Some(facility) = self.facility_id {
                pairs.append_pair("facility", &facility.to_string());
            }
            if let Some(zone) = self.zone_id {
                pairs.append_pair("zone", &zone.to_string());
            }
            pairs.append_pair("format", "csv");
        }

        Ok(ExportRequest {
            method: Method::GET,
            url,
        })
    }
}
