use crate::filter::query::Query;

/// Formats accepted by the export endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    GeoJson,
}

impl ExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::GeoJson => "geojson",
        }
    }
}

/// Builds the export navigation URL for the currently filtered set. The
/// query string is the same canonical serialization used for fetches, so
/// export links are reproducible.
pub fn export_url(base: &str, format: ExportFormat, query: &Query) -> String {
    format!(
        "{}/export?format={}&{}",
        base.trim_end_matches('/'),
        format.as_str(),
        query.query_string()
    )
}
