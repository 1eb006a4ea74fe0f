use chrono::NaiveDate;
use iced::{
    mouse,
    widget::{
        button,
        canvas::{self, Canvas, Frame, Geometry, Path, Stroke},
        checkbox, column, row, scrollable, text, text_input, Column, Container,
    },
    Alignment, Color, Element, Length, Point, Rectangle, Renderer, Task, Theme,
};
use roadcore::prelude::{
    DateField, ExportFormat, FetchError, FetchOutcome, FetchTicket, FilterController, FilterEvent,
    IncidentFetcher, IncidentRecord, MapRenderer, Marker, Phase, Query,
};

const QUERY_ENDPOINT: &str = "http://127.0.0.1:8000/api/potholes";
const EXPORT_BASE: &str = "http://127.0.0.1:8000";

const SEVERITY_OPTIONS: [(u8, &str); 5] = [
    (1, "1 – Minor"),
    (2, "2 – Low"),
    (3, "3 – Medium"),
    (4, "4 – High"),
    (5, "5 – Critical"),
];

fn main() -> iced::Result {
    iced::application(MapApp::boot, MapApp::update, MapApp::view)
        .title(application_title)
        .theme(application_theme)
        .run()
}

fn application_title(_: &MapApp) -> String {
    "RoadWatch Incident Map".into()
}

fn application_theme(_: &MapApp) -> Theme {
    Theme::Dark
}

struct MapApp {
    controller: FilterController,
    start_input: String,
    end_input: String,
    confidence_input: String,
    notice: Option<String>,
    zoom: f32,
    status: String,
    history: Vec<String>,
}

#[derive(Debug, Clone)]
enum Message {
    SeverityToggled(u8, bool),
    StartDateEdited(String),
    EndDateEdited(String),
    ConfidenceEdited(String),
    ConfidenceSubmitted,
    FetchCompleted(u64, Result<Vec<IncidentRecord>, FetchError>),
    ExportRequested(ExportFormat),
    ZoomIn,
    ZoomOut,
}

impl MapApp {
    fn boot() -> (Self, Task<Message>) {
        let mut controller = FilterController::new(MapRenderer::new());
        let ticket = controller.startup();
        (
            MapApp {
                controller,
                start_input: String::new(),
                end_input: String::new(),
                confidence_input: "0.00".into(),
                notice: None,
                zoom: 1.0,
                status: "Loading incidents...".into(),
                history: Vec::new(),
            },
            dispatch(ticket),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::SeverityToggled(level, selected) => {
                let ticket = state.controller.handle_event(FilterEvent::SeverityChanged {
                    level,
                    selected,
                });
                state.push_history(format!(
                    "Severity {level} {}",
                    if selected { "enabled" } else { "disabled" }
                ));
                dispatch(ticket)
            }
            Message::StartDateEdited(value) => {
                state.start_input = value;
                state.date_change(DateField::Start)
            }
            Message::EndDateEdited(value) => {
                state.end_input = value;
                state.date_change(DateField::End)
            }
            Message::ConfidenceEdited(value) => {
                state.confidence_input = value;
                Task::none()
            }
            Message::ConfidenceSubmitted => {
                let ticket = state.controller.handle_event(FilterEvent::ConfidenceChanged {
                    raw: state.confidence_input.clone(),
                });
                // The corrected value is authoritative; echo it back.
                state.confidence_input = format!("{:.2}", state.controller.state().confidence_min);
                state.notice = state.controller.take_validation_notice();
                state.push_history(format!("Confidence floor {}", state.confidence_input));
                dispatch(ticket)
            }
            Message::FetchCompleted(seq, result) => {
                match state.controller.apply_fetch(seq, result) {
                    FetchOutcome::Applied { rendered } => {
                        state.status = format!("Showing {rendered} incidents");
                        state.push_history(format!("Fetch #{seq}: {rendered} incidents"));
                    }
                    FetchOutcome::DiscardedStale => {
                        state.push_history(format!("Fetch #{seq}: superseded, dropped"));
                    }
                    FetchOutcome::Failed => {
                        state.status = "Fetch failed; keeping last results".into();
                        state.push_history(format!("Fetch #{seq}: failed"));
                    }
                }
                Task::none()
            }
            Message::ExportRequested(format) => {
                let url = state.controller.export_url(EXPORT_BASE, format);
                state.status = format!("Export URL copied: {url}");
                state.push_history(format!("Export {} requested", format.as_str()));
                iced::clipboard::write(url)
            }
            Message::ZoomIn => {
                state.zoom = (state.zoom * 1.25).min(16.0);
                Task::none()
            }
            Message::ZoomOut => {
                state.zoom = (state.zoom / 1.25).max(0.25);
                Task::none()
            }
        }
    }

    /// Dispatches a date change once the input is a full date or cleared;
    /// partial typing stays local.
    fn date_change(&mut self, field: DateField) -> Task<Message> {
        let raw = match field {
            DateField::Start => &self.start_input,
            DateField::End => &self.end_input,
        };
        let value = if raw.trim().is_empty() {
            None
        } else {
            match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => return Task::none(),
            }
        };
        let ticket = self
            .controller
            .handle_event(FilterEvent::DateChanged { field, value });
        dispatch(ticket)
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let severity_boxes = SEVERITY_OPTIONS.iter().fold(
            Column::new().spacing(4),
            |col, &(level, label)| {
                col.push(
                    checkbox(state.controller.state().severities.contains(&level))
                        .label(label)
                        .on_toggle(move |selected| Message::SeverityToggled(level, selected)),
                )
            },
        );

        let mut filter_column = column![
            text("Filters & Export").size(26),
            text("Severity").size(16),
            severity_boxes,
            text("Start Date").size(16),
            text_input("YYYY-MM-DD", &state.start_input)
                .on_input(Message::StartDateEdited)
                .padding(6),
            text("End Date").size(16),
            text_input("YYYY-MM-DD", &state.end_input)
                .on_input(Message::EndDateEdited)
                .padding(6),
            text(format!(
                "Confidence ≥ {:.2}",
                state.controller.state().confidence_min
            ))
            .size(16),
            text_input("0.00", &state.confidence_input)
                .on_input(Message::ConfidenceEdited)
                .on_submit(Message::ConfidenceSubmitted)
                .padding(6),
        ]
        .spacing(8)
        .padding(16)
        .width(Length::Fixed(300.0));

        if let Some(notice) = &state.notice {
            filter_column = filter_column.push(text(format!("⚠️ {notice}")).size(13));
        }

        filter_column = filter_column
            .push(
                row![
                    text("Zoom").size(16),
                    button("+").on_press(Message::ZoomIn).padding(6),
                    button("−").on_press(Message::ZoomOut).padding(6),
                ]
                .spacing(8)
                .align_y(Alignment::Center),
            )
            .push(
                button("Export CSV")
                    .on_press(Message::ExportRequested(ExportFormat::Csv))
                    .padding(8),
            )
            .push(
                button("Export GeoJSON")
                    .on_press(Message::ExportRequested(ExportFormat::GeoJson))
                    .padding(8),
            )
            .push(text(&state.status).size(14))
            .push(
                text(match state.controller.phase() {
                    Phase::Fetching => "Fetching...",
                    Phase::Idle => "Idle",
                })
                .size(12),
            );

        let markers = state.controller.renderer().markers();
        let marker_canvas = Canvas::new(MarkerMap::new(markers, state.zoom))
            .width(Length::Fill)
            .height(Length::Fixed(420.0));

        let detail_entries = if markers.is_empty() {
            Column::new().push(text("No incidents match the current filters").size(12))
        } else {
            markers.iter().take(8).fold(Column::new().spacing(4), |col, marker| {
                let popup = &marker.popup;
                col.push(
                    text(format!(
                        "#{}: {} | {}% | {} | {}",
                        popup.incident_id,
                        popup.severity_label,
                        popup.confidence_percent,
                        popup.formatted_date,
                        popup.coordinates()
                    ))
                    .size(12),
                )
            })
        };

        let history_list = if state.history.is_empty() {
            Column::new().push(text("No activity yet").size(12))
        } else {
            state
                .history
                .iter()
                .rev()
                .fold(Column::new().spacing(4), |col, entry| {
                    col.push(text(entry.clone()).size(12))
                })
        };

        let map_column = column![
            text("Incident Map").size(26),
            text(format!("{} markers", markers.len())).size(16),
            marker_canvas,
            text("Incident details").size(16),
            Container::new(scrollable(detail_entries).height(Length::Fixed(140.0))).padding(6),
            text("Activity log").size(16),
            Container::new(scrollable(history_list).height(Length::Fixed(110.0))).padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fill);

        let layout = row![filter_column, map_column]
            .spacing(20)
            .align_y(Alignment::Start)
            .padding(20);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn push_history(&mut self, entry: String) {
        self.history.push(entry);
        if self.history.len() > 20 {
            self.history.remove(0);
        }
    }
}

fn dispatch(ticket: FetchTicket) -> Task<Message> {
    let FetchTicket { seq, query } = ticket;
    Task::perform(run_fetch(query), move |result| {
        Message::FetchCompleted(seq, result)
    })
}

async fn run_fetch(query: Query) -> Result<Vec<IncidentRecord>, FetchError> {
    IncidentFetcher::new(QUERY_ENDPOINT).fetch(&query).await
}

#[derive(Clone)]
struct MarkerMap {
    markers: Vec<Marker>,
    zoom: f32,
}

impl MarkerMap {
    fn new(markers: &[Marker], zoom: f32) -> Self {
        Self {
            markers: markers.to_vec(),
            zoom,
        }
    }
}

impl canvas::Program<Message> for MarkerMap {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.04, 0.05, 0.07),
        );

        let center = Point::new(bounds.width / 2.0, bounds.height / 2.0);
        let grid = Path::new(|builder| {
            builder.move_to(Point::new(0.0, center.y));
            builder.line_to(Point::new(bounds.width, center.y));
            builder.move_to(Point::new(center.x, 0.0));
            builder.line_to(Point::new(center.x, bounds.height));
        });
        frame.stroke(
            &grid,
            Stroke::default()
                .with_color(Color::from_rgb(0.18, 0.18, 0.22))
                .with_width(1.0),
        );

        if self.markers.is_empty() {
            return vec![frame.into_geometry()];
        }

        let (mut min_lat, mut max_lat) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_lng, mut max_lng) = (f64::INFINITY, f64::NEG_INFINITY);
        for marker in &self.markers {
            min_lat = min_lat.min(marker.lat);
            max_lat = max_lat.max(marker.lat);
            min_lng = min_lng.min(marker.lng);
            max_lng = max_lng.max(marker.lng);
        }
        let lat_span = (max_lat - min_lat).max(1e-4);
        let lng_span = (max_lng - min_lng).max(1e-4);
        let lat_center = (max_lat + min_lat) / 2.0;
        let lng_center = (max_lng + min_lng) / 2.0;
        let half_w = (bounds.width / 2.0 - 16.0) * self.zoom;
        let half_h = (bounds.height / 2.0 - 16.0) * self.zoom;

        for marker in &self.markers {
            let x = center.x + (((marker.lng - lng_center) / lng_span) as f32) * 2.0 * half_w;
            let y = center.y - (((marker.lat - lat_center) / lat_span) as f32) * 2.0 * half_h;
            let radius = 3.0 + marker.severity as f32 * 0.8;

            let (r, g, b) = marker.icon.color.rgb();
            let dot = Path::new(|builder| builder.circle(Point::new(x, y), radius));
            frame.fill(&dot, Color::from_rgb(r, g, b));
            frame.stroke(
                &dot,
                Stroke::default().with_color(Color::WHITE).with_width(1.0),
            );
        }

        vec![frame.into_geometry()]
    }
}
