use ecosmart_core::{materials::MaterialCategory, model::RecyclingCenter};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::{App, Screen};

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    let header = Paragraph::new("EcoSmart · find recycling centers near you")
        .block(Block::default().borders(Borders::ALL).title("EcoSmart"));
    frame.render_widget(header, *header_area);

    match app.screen {
        Screen::Search => draw_search(frame, app, *content_area),
        Screen::Results => draw_results(frame, app, *content_area),
        Screen::CenterDetail => draw_center_detail(frame, app, *content_area),
    }

    let nav_hint = match app.screen {
        Screen::Search => {
            "Type a location · Enter search · Tab/Shift-Tab material · ↓ results · Esc/Ctrl-C quit"
        }
        Screen::Results => "↑/↓ move · Enter details · Esc/← edit search · q/Ctrl-C quit",
        Screen::CenterDetail => "Esc/←/b back to results · q/Ctrl-C quit",
    };

    let status_text = if app.is_loading {
        format!("Searching… · {nav_hint}")
    } else if let Some(msg) = &app.error_message {
        format!("{msg} · {nav_hint}")
    } else {
        nav_hint.to_owned()
    };

    let status_style = if app.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else if app.is_loading {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, *status_area);
}

fn draw_search(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // input
            Constraint::Length(3), // material
            Constraint::Min(0),    // last search
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [input_area, material_area, summary_area] = chunks else {
        return;
    };

    let input = Paragraph::new(app.location_input.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Location (city, address or postcode, Enter)"),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(input, *input_area);

    let selected = app.material();
    let spans: Vec<Span<'_>> = MaterialCategory::ALL
        .iter()
        .flat_map(|&category| {
            let style = if category == selected {
                Style::default()
                    .fg(material_color(category))
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            [Span::styled(category.label(), style), Span::raw(" ")]
        })
        .collect();

    let materials = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Material (Tab/Shift-Tab)"),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(materials, *material_area);

    let summary_text = match &app.location {
        Some(location) => format!(
            "Last search: {}\n{} center(s) found. Press ↓ to browse.",
            location.display_name,
            app.centers.len()
        ),
        None => "Search a place to list recycling centers nearby. \
                 Centers that publish no material list are always shown."
            .to_owned(),
    };

    let summary = Paragraph::new(summary_text)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(summary, *summary_area);
}

fn draw_results(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let place = app
        .location
        .as_ref()
        .map_or("<location>", |location| location.display_name.as_str());

    let items = app
        .centers
        .iter()
        .map(|center| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>8} ", distance_label(center)),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    center.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("  {}", center.address)),
            ]))
        })
        .collect::<Vec<ListItem<'_>>>();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(format!(
            "{} center(s) for {} near {place}",
            app.centers.len(),
            app.material()
        )))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !app.centers.is_empty() {
        state.select(Some(app.center_list_index));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_center_detail(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(center) = app.selected_center() else {
        let paragraph = Paragraph::new("No center selected.")
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    };

    let field = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(
                format!("{label:<10}"),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(value),
        ])
    };

    let materials = center.materials.as_ref().map_or_else(
        || "Not published, check local guidelines".to_owned(),
        |list| list.join(", "),
    );
    let position = center
        .coordinate
        .map_or_else(|| "Unknown".to_owned(), |coordinate| coordinate.to_string());

    let lines = vec![
        field("Address", center.address.clone()),
        field("Distance", distance_label(center)),
        field("Materials", materials),
        field(
            "Hours",
            center.hours.clone().unwrap_or_else(|| "-".to_owned()),
        ),
        field(
            "Phone",
            center.phone.clone().unwrap_or_else(|| "-".to_owned()),
        ),
        field("Position", position),
        field("OSM id", center.id.to_string()),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} (Esc/←/b to go back)", center.name)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn distance_label(center: &RecyclingCenter) -> String {
    if center.coordinate.is_none() {
        "? km".to_owned()
    } else {
        format!("{:.1} km", center.distance_km)
    }
}

fn material_color(category: MaterialCategory) -> Color {
    match category {
        MaterialCategory::Any => Color::White,
        MaterialCategory::Plastic => Color::Yellow,
        MaterialCategory::Paper | MaterialCategory::Cardboard => Color::Blue,
        MaterialCategory::Glass => Color::Cyan,
        MaterialCategory::Metal => Color::LightBlue,
        MaterialCategory::Organic | MaterialCategory::Wood => Color::Green,
        MaterialCategory::Battery | MaterialCategory::Electronics => Color::Red,
        MaterialCategory::Textile => Color::Magenta,
    }
}

#[cfg(test)]
mod tests {
    use ecosmart_core::model::{CenterId, Coordinate, UNKNOWN_DISTANCE_KM};

    use super::*;

    fn center(distance_km: f64, coordinate: Option<Coordinate>) -> RecyclingCenter {
        RecyclingCenter {
            id: CenterId("1".to_owned()),
            name: "Depot".to_owned(),
            address: "Address unavailable".to_owned(),
            distance_km,
            coordinate,
            materials: None,
            hours: None,
            phone: None,
        }
    }

    #[test]
    fn unknown_position_has_no_distance() {
        assert_eq!(distance_label(&center(UNKNOWN_DISTANCE_KM, None)), "? km");
    }

    #[test]
    fn far_but_located_center_shows_its_distance() {
        let located = center(1_204.3, Some(Coordinate::new(47.0, 8.0)));
        assert_eq!(distance_label(&located), "1204.3 km");

        let exactly_sentinel = center(UNKNOWN_DISTANCE_KM, Some(Coordinate::new(47.0, 8.0)));
        assert_eq!(distance_label(&exactly_sentinel), "999.0 km");
    }
}
