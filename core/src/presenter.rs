use crate::incident::IncidentRecord;

/// Severity-coded marker color. Thresholds are fixed: >=4 red, >=3 orange,
/// >=2 yellow, otherwise green.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerColor {
    Red,
    Orange,
    Yellow,
    Green,
}

impl MarkerColor {
    pub fn hex(self) -> &'static str {
        match self {
            MarkerColor::Red => "#e31a1c",
            MarkerColor::Orange => "#fd8d3c",
            MarkerColor::Yellow => "#fecc5c",
            MarkerColor::Green => "#31a354",
        }
    }

    /// Normalized RGB for canvas surfaces that take float components.
    pub fn rgb(self) -> (f32, f32, f32) {
        match self {
            MarkerColor::Red => (0.890, 0.102, 0.110),
            MarkerColor::Orange => (0.992, 0.553, 0.235),
            MarkerColor::Yellow => (0.996, 0.800, 0.361),
            MarkerColor::Green => (0.192, 0.639, 0.329),
        }
    }
}

/// Marker icon descriptor handed to the rendering surface: a filled circle
/// glyph with a white ring, anchored at its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconDescriptor {
    pub color: MarkerColor,
    pub size_px: u32,
    pub anchor_px: (u32, u32),
}

impl IconDescriptor {
    pub fn html(&self) -> String {
        format!(
            "<div style=\"background:{};width:16px;height:16px;border:2px solid white;\
             border-radius:50%;box-shadow:0 0 2px rgba(0,0,0,0.5);\"></div>",
            self.color.hex()
        )
    }
}

/// Pure severity-to-style and record-to-popup transformations, decoupled
/// from the map widget so they can be unit tested.
pub struct MarkerPresenter;

impl MarkerPresenter {
    pub fn color_for(severity: u8) -> MarkerColor {
        match severity {
            s if s >= 4 => MarkerColor::Red,
            3 => MarkerColor::Orange,
            2 => MarkerColor::Yellow,
            _ => MarkerColor::Green,
        }
    }

    pub fn label_for(severity: u8) -> &'static str {
        match severity {
            s if s >= 4 => "Critical",
            3 => "High",
            2 => "Medium",
            _ => "Low",
        }
    }

    pub fn icon_for(severity: u8) -> IconDescriptor {
        IconDescriptor {
            color: Self::color_for(severity),
            size_px: 20,
            anchor_px: (10, 10),
        }
    }

    pub fn popup_for(record: &IncidentRecord) -> PopupContent {
        PopupContent::from_record(record)
    }
}

/// Popup payload for one incident, ready to render on any surface.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupContent {
    pub incident_id: u64,
    pub formatted_date: String,
    pub severity: u8,
    pub severity_label: &'static str,
    /// Rounded integer percent, reused as the proportional bar width.
    pub confidence_percent: u8,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl PopupContent {
    pub fn from_record(record: &IncidentRecord) -> Self {
        Self {
            incident_id: record.id,
            formatted_date: record.date.format("%b %-d, %Y").to_string(),
            severity: record.severity,
            severity_label: MarkerPresenter::label_for(record.severity),
            confidence_percent: (record.confidence.clamp(0.0, 1.0) * 100.0).round() as u8,
            description: record.description.clone(),
            image_url: record.image_url.clone(),
            latitude: record.lat,
            longitude: record.lng,
        }
    }

    /// Coordinates formatted to four decimal places, as shown in the popup
    /// footer and the share fallback.
    pub fn coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    pub fn share_text(&self) -> String {
        format!("Found pothole at {}", self.coordinates())
    }

    /// Renders the popup markup for the web map surface.
    pub fn to_html(&self) -> String {
        let image = match &self.image_url {
            Some(url) => format!(
                "<img src=\"{url}\" class=\"popup-image\" alt=\"Incident image\" loading=\"lazy\">"
            ),
            None => "<div class=\"popup-image-placeholder\">📷</div>".to_string(),
        };
        let description = match &self.description {
            Some(text) => format!(
                "<div class=\"popup-description\"><p class=\"popup-description-text\">{text}</p></div>"
            ),
            None => String::new(),
        };

        format!(
            "<div class=\"popup-header\">\
               <h4 class=\"popup-title\">🕳️ Pothole Detection</h4>\
               <p class=\"popup-subtitle\">ID: {id} • {date}</p>\
             </div>\
             <div class=\"popup-body\">\
               <div class=\"popup-image-container\">{image}</div>\
               <div class=\"popup-details\">\
                 <div class=\"popup-info-grid\">\
                   <div class=\"popup-info-item\">\
                     <div class=\"popup-info-label\">Severity Level</div>\
                     <div class=\"popup-info-value severity\">\
                       <span class=\"popup-severity-badge severity-{severity}\">{label}</span>\
                     </div>\
                   </div>\
                   <div class=\"popup-info-item\">\
                     <div class=\"popup-info-label\">AI Confidence</div>\
                     <div class=\"popup-info-value\">{percent}%</div>\
                     <div class=\"popup-confidence-bar\">\
                       <div class=\"popup-confidence-fill\" style=\"width: {percent}%\"></div>\
                     </div>\
                   </div>\
                 </div>\
                 {description}\
                 <div class=\"popup-actions\">\
                   <button class=\"popup-action-btn primary\" data-action=\"details\" data-href=\"/incidents\">📋 View Details</button>\
                   <button class=\"popup-action-btn secondary\" data-action=\"share\" data-share-text=\"{share}\">📍 Share</button>\
                 </div>\
               </div>\
             </div>\
             <div class=\"popup-meta\">\
               <div class=\"popup-timestamp\">🕐 {date}</div>\
               <div class=\"popup-coordinates\">📍 {coords}</div>\
             </div>",
            id = self.incident_id,
            date = self.formatted_date,
            image = image,
            severity = self.severity,
            label = self.severity_label,
            percent = self.confidence_percent,
            description = description,
            share = self.share_text(),
            coords = self.coordinates(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record() -> IncidentRecord {
        IncidentRecord::new(42, 39.9526, -75.1652, 3, 0.874, NaiveDate::from_ymd_opt(2025, 4, 9).unwrap())
    }

    #[test]
    fn color_thresholds_match_the_dashboard_scale() {
        assert_eq!(MarkerPresenter::color_for(5), MarkerColor::Red);
        assert_eq!(MarkerPresenter::color_for(4), MarkerColor::Red);
        assert_eq!(MarkerPresenter::color_for(3), MarkerColor::Orange);
        assert_eq!(MarkerPresenter::color_for(2), MarkerColor::Yellow);
        assert_eq!(MarkerPresenter::color_for(1), MarkerColor::Green);
    }

    #[test]
    fn labels_follow_the_same_thresholds() {
        assert_eq!(MarkerPresenter::label_for(5), "Critical");
        assert_eq!(MarkerPresenter::label_for(3), "High");
        assert_eq!(MarkerPresenter::label_for(2), "Medium");
        assert_eq!(MarkerPresenter::label_for(1), "Low");
    }

    #[test]
    fn icon_carries_color_and_centered_anchor() {
        let icon = MarkerPresenter::icon_for(4);
        assert_eq!(icon.color, MarkerColor::Red);
        assert_eq!(icon.anchor_px, (10, 10));
        assert!(icon.html().contains("#e31a1c"));
    }

    #[test]
    fn popup_rounds_confidence_and_formats_coordinates() {
        let popup = MarkerPresenter::popup_for(&record());
        assert_eq!(popup.confidence_percent, 87);
        assert_eq!(popup.coordinates(), "39.9526, -75.1652");
        assert_eq!(popup.formatted_date, "Apr 9, 2025");
    }

    #[test]
    fn popup_html_uses_placeholder_when_image_is_absent() {
        let html = MarkerPresenter::popup_for(&record()).to_html();
        assert!(html.contains("popup-image-placeholder"));
        assert!(html.contains("87%"));
        assert!(html.contains("severity-3"));
        assert!(html.contains("39.9526, -75.1652"));
    }

    #[test]
    fn popup_html_embeds_image_and_description_when_present() {
        let mut with_extras = record();
        with_extras.description = Some("deep pothole".into());
        with_extras.image_url = Some("https://img.example/42.jpg".into());
        let html = MarkerPresenter::popup_for(&with_extras).to_html();
        assert!(html.contains("https://img.example/42.jpg"));
        assert!(html.contains("deep pothole"));
        assert!(!html.contains("popup-image-placeholder"));
    }
}
