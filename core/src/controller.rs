use crate::export::{export_url, ExportFormat};
use crate::fetch::FetchError;
use crate::filter::confidence::ConfidenceValidator;
use crate::filter::query::{Query, QueryBuilder};
use crate::filter::state::FilterState;
use crate::incident::IncidentRecord;
use crate::render::MapRenderer;
use crate::telemetry::MetricsRecorder;
use chrono::NaiveDate;
use log::{debug, warn};

/// Which date input changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Start,
    End,
}

/// Recognized filter-panel changes.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterEvent {
    SeverityChanged { level: u8, selected: bool },
    DateChanged { field: DateField, value: Option<NaiveDate> },
    ConfidenceChanged { raw: String },
}

/// Controller phase. `Fetching` while any issued fetch is still unresolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Fetching,
}

/// A dispatched fetch: the sequence token plus the canonical query to run.
/// The caller performs the actual I/O and feeds the completion back through
/// [`FilterController::apply_fetch`] with the same token.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub seq: u64,
    pub query: Query,
}

/// What happened to a fetch completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The marker set was rebuilt from this result.
    Applied { rendered: usize },
    /// A newer result had already been rendered; this one was dropped.
    DiscardedStale,
    /// The fetch failed; the last-good marker set is untouched.
    Failed,
}

/// Orchestrates the filter-panel pipeline: owns the filter state and the
/// map renderer, validates confidence entries, builds canonical queries,
/// and applies fetch completions in a stale-safe order.
///
/// All methods run on the single event-processing thread; completions may
/// arrive in any order and are discarded when a newer fetch has already
/// been rendered.
pub struct FilterController {
    state: FilterState,
    renderer: MapRenderer,
    issued: u64,
    /// Count of completions seen, not a sequence high-water mark: an
    /// out-of-order completion must not mask an older fetch still in flight.
    resolved: u64,
    rendered_seq: u64,
    validation_notice: Option<String>,
    metrics: MetricsRecorder,
}

impl FilterController {
    pub fn new(renderer: MapRenderer) -> Self {
        Self {
            state: FilterState::new(),
            renderer,
            issued: 0,
            resolved: 0,
            rendered_seq: 0,
            validation_notice: None,
            metrics: MetricsRecorder::new(),
        }
    }

    /// The unconditional initial fetch, issued once with the default state.
    pub fn startup(&mut self) -> FetchTicket {
        self.issue_fetch()
    }

    /// Applies one filter change and dispatches a fresh fetch. Confidence
    /// entries are validated first; the corrected value is authoritative
    /// and any correction leaves a transient notice for the UI.
    pub fn handle_event(&mut self, event: FilterEvent) -> FetchTicket {
        match event {
            FilterEvent::SeverityChanged { level, selected } => {
                self.state.toggle_severity(level, selected);
            }
            FilterEvent::DateChanged { field, value } => match field {
                DateField::Start => self.state.start_date = value,
                DateField::End => self.state.end_date = value,
            },
            FilterEvent::ConfidenceChanged { raw } => {
                let validated = ConfidenceValidator::validate(&raw);
                self.state.set_confidence(validated.value);
                self.validation_notice = validated.message;
            }
        }
        self.issue_fetch()
    }

    /// Resolves a fetch completion by sequence token.
    pub fn apply_fetch(
        &mut self,
        seq: u64,
        result: Result<Vec<IncidentRecord>, FetchError>,
    ) -> FetchOutcome {
        self.resolved += 1;
        match result {
            Err(err) => {
                warn!("fetch #{seq} failed, keeping last-good markers: {err}");
                self.metrics.record_failed();
                FetchOutcome::Failed
            }
            Ok(_) if seq < self.rendered_seq => {
                debug!(
                    "fetch #{seq} superseded by #{} already rendered, discarding",
                    self.rendered_seq
                );
                self.metrics.record_discarded_stale();
                FetchOutcome::DiscardedStale
            }
            Ok(records) => {
                self.renderer.refresh(&records);
                self.rendered_seq = seq;
                debug!("fetch #{seq} rendered {} markers", records.len());
                self.metrics.record_applied();
                FetchOutcome::Applied {
                    rendered: records.len(),
                }
            }
        }
    }

    pub fn phase(&self) -> Phase {
        if self.issued > self.resolved {
            Phase::Fetching
        } else {
            Phase::Idle
        }
    }

    /// Export link for the current filter state.
    pub fn export_url(&self, base: &str, format: ExportFormat) -> String {
        export_url(base, format, &QueryBuilder::build(&self.state))
    }

    /// Takes the transient validation message, clearing it.
    pub fn take_validation_notice(&mut self) -> Option<String> {
        self.validation_notice.take()
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn renderer(&self) -> &MapRenderer {
        &self.renderer
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    fn issue_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        self.metrics.record_issued();
        FetchTicket {
            seq: self.issued,
            query: QueryBuilder::build(&self.state),
        }
    }
}
