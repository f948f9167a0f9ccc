/// Sonarr API wire types for serialization.
///
/// These structures mirror the JSON bodies exchanged with the Sonarr API.
/// Only the consumed fields are modeled; serde skips the rest of the
/// payload.
use serde::{Deserialize, Serialize};

/// Envelope of the paged `wanted/missing` listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct WantedMissingPage {
    /// Total number of missing episodes across all pages
    #[serde(default)]
    pub total_records: u32,
    /// Records of the requested page (a single one at page size 1)
    #[serde(default)]
    pub records: Vec<MissingRecord>,
}

/// One record of the missing listing; only the id is consumed.
#[derive(Debug, Deserialize)]
pub(super) struct MissingRecord {
    pub id: u32,
}

/// Episode record from the episode-by-id endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct EpisodeRecord {
    pub id: u32,
    #[serde(default)]
    pub season_number: u32,
    #[serde(default)]
    pub episode_number: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub air_date_utc: Option<String>,
    #[serde(default)]
    pub series: SeriesSummary,
}

/// Series summary nested inside an episode record.
#[derive(Debug, Default, Deserialize)]
pub(super) struct SeriesSummary {
    #[serde(default)]
    pub title: String,
}

/// Request body for the episode-search command endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SearchCommand<'a> {
    pub name: &'a str,
    pub episode_ids: &'a [u32],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_page_deserializes_envelope() {
        let json = r#"{
            "page": 1,
            "pageSize": 1,
            "sortKey": "airDateUtc",
            "sortDirection": "ascending",
            "totalRecords": 271,
            "records": [{ "seriesId": 3, "seasonNumber": 2, "id": 4711 }]
        }"#;

        let page: WantedMissingPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.total_records, 271);
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0].id, 4711);
    }

    #[test]
    fn test_missing_page_tolerates_empty_records() {
        let json = r#"{ "totalRecords": 0, "records": [] }"#;
        let page: WantedMissingPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.total_records, 0);
        assert!(page.records.is_empty());
    }

    #[test]
    fn test_episode_record_deserializes_consumed_fields() {
        let json = r#"{
            "seriesId": 3,
            "episodeFileId": 0,
            "seasonNumber": 4,
            "episodeNumber": 11,
            "title": "The Gang Goes On Vacation",
            "airDate": "2015-01-26",
            "airDateUtc": "2015-01-27T01:30:00Z",
            "hasFile": false,
            "monitored": true,
            "series": {
                "title": "Some Show",
                "network": "FX",
                "status": "continuing",
                "seasons": [{ "seasonNumber": 1, "monitored": true }]
            },
            "id": 42
        }"#;

        let record: EpisodeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 42);
        assert_eq!(record.season_number, 4);
        assert_eq!(record.episode_number, 11);
        assert_eq!(record.title, "The Gang Goes On Vacation");
        assert_eq!(record.series.title, "Some Show");
        assert_eq!(
            record.air_date_utc.as_deref(),
            Some("2015-01-27T01:30:00Z")
        );
    }

    #[test]
    fn test_episode_record_tolerates_missing_series() {
        let json = r#"{ "id": 7, "seasonNumber": 1, "episodeNumber": 2, "title": "Pilot" }"#;
        let record: EpisodeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.series.title, "");
        assert!(record.air_date_utc.is_none());
    }

    #[test]
    fn test_search_command_serializes_single_id() {
        let command = SearchCommand {
            name: "episodeSearch",
            episode_ids: &[7],
        };

        let body = serde_json::to_value(&command).unwrap();
        assert_eq!(body["name"], "episodeSearch");
        assert_eq!(body["episodeIds"], serde_json::json!([7]));
        assert_eq!(body["episodeIds"].as_array().unwrap().len(), 1);
    }
}
