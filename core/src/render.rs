use crate::incident::IncidentRecord;
use crate::presenter::{IconDescriptor, MarkerPresenter, PopupContent};

/// One rendered marker: position, icon, and popup payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub lat: f64,
    pub lng: f64,
    pub severity: u8,
    pub icon: IconDescriptor,
    pub popup: PopupContent,
}

/// Owns the live marker set. Every refresh clears and rebuilds the whole
/// collection from the fetched records; there is no diffing.
#[derive(Debug, Default)]
pub struct MapRenderer {
    markers: Vec<Marker>,
}

impl MapRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the marker set with one marker per record. An empty slice
    /// leaves zero markers.
    pub fn refresh(&mut self, records: &[IncidentRecord]) {
        self.markers.clear();
        self.markers.extend(records.iter().map(|record| Marker {
            lat: record.lat,
            lng: record.lng,
            severity: record.severity,
            icon: MarkerPresenter::icon_for(record.severity),
            popup: MarkerPresenter::popup_for(record),
        }));
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
