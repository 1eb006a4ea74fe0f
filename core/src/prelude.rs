pub use crate::controller::{
    DateField, FetchOutcome, FetchTicket, FilterController, FilterEvent, Phase,
};
pub use crate::export::{export_url, ExportFormat};
pub use crate::fetch::{FetchError, IncidentFetcher};
pub use crate::filter::confidence::{ConfidenceValidator, Validated};
pub use crate::filter::query::{Query, QueryBuilder};
pub use crate::filter::state::FilterState;
pub use crate::incident::IncidentRecord;
pub use crate::presenter::{IconDescriptor, MarkerColor, MarkerPresenter, PopupContent};
pub use crate::render::{MapRenderer, Marker};
pub use crate::telemetry::MetricsRecorder;
