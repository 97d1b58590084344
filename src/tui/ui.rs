use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::app::{App, AppMode, SettingsField};
use crate::core::TripPlan;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    match app.mode {
        AppMode::Main | AppMode::Input => draw_main(frame, app),
        AppMode::TripDetail => draw_trip_detail(frame, app),
        AppMode::Settings => draw_settings(frame, app),
    }
}

/// Draw main view with trip list
fn draw_main(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title/input
            Constraint::Min(10),    // Trip list
            Constraint::Length(3),  // Status bar
            Constraint::Length(2),  // Help line
        ])
        .split(frame.area());

    // Title or input
    if app.mode == AppMode::Input {
        draw_input(frame, app, chunks[0]);
    } else {
        draw_title(frame, chunks[0]);
    }

    // Trip list
    draw_trip_list(frame, app, chunks[1]);

    // Status bar
    draw_status(frame, app, chunks[2]);

    // Help line
    draw_help(frame, app, chunks[3]);
}

fn draw_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(vec![Line::from(vec![
        Span::styled("🌏 ", Style::default()),
        Span::styled(
            "Trip Agent",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" - AI Trip Planning", Style::default().fg(Color::Gray)),
    ])])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(title, area);
}

fn draw_input(frame: &mut Frame, app: &App, area: Rect) {
    let input = Paragraph::new(app.input.as_str())
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title("Where to? (Enter to plan, Esc to cancel)"),
        );
    frame.render_widget(input, area);

    // Show cursor
    frame.set_cursor_position((area.x + app.cursor_pos as u16 + 1, area.y + 1));
}

fn draw_trip_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .trips
        .iter()
        .enumerate()
        .map(|(i, trip)| {
            let status_style = match trip.status_name() {
                "completed" => Style::default().fg(Color::Green),
                "failed" => Style::default().fg(Color::Red),
                "planning" => Style::default().fg(Color::Yellow),
                "pending" => Style::default().fg(Color::Blue),
                _ => Style::default().fg(Color::Gray),
            };

            let content = Line::from(vec![
                Span::styled(
                    format!("{:<12}", trip.id),
                    if i == app.selected_trip {
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::White)
                    },
                ),
                Span::raw(" "),
                Span::styled(format!("{:<10}", trip.status_name()), status_style),
                Span::raw(" "),
                Span::styled(
                    format!("{:<20}", trip.city_preview(18)),
                    Style::default().fg(Color::White),
                ),
                Span::raw(" "),
                Span::styled(trip.date_range(), Style::default().fg(Color::Gray)),
                Span::raw("  "),
                Span::styled(trip.days_label(), Style::default().fg(Color::Gray)),
            ]);

            ListItem::new(content)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Trips ({})", app.trips.len())),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(list, area);
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let (message, style) = if let Some(err) = &app.error_message {
        (err.as_str(), Style::default().fg(Color::Red))
    } else if let Some(status) = &app.status_message {
        (status.as_str(), Style::default().fg(Color::Green))
    } else if app.planning {
        (
            "Planning... this can take a couple of minutes",
            Style::default().fg(Color::Yellow),
        )
    } else {
        ("Ready", Style::default().fg(Color::Gray))
    };

    let status = Paragraph::new(message)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(status, area);
}

fn draw_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.mode {
        AppMode::Input => "Enter: Plan | Esc: Cancel",
        AppMode::Main => {
            "i: New trip | Enter: View | s: Settings | d: Delete | r: Refresh | q: Quit"
        }
        _ => "",
    };

    let help = Paragraph::new(help_text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}

/// Draw trip detail view with the full itinerary
fn draw_trip_detail(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let Some(trip) = &app.current_trip else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(10),    // Details
            Constraint::Length(2),  // Help
        ])
        .split(area);

    // Header
    let header = Paragraph::new(vec![Line::from(vec![
        Span::styled("Trip: ", Style::default().fg(Color::Gray)),
        Span::styled(
            &trip.id,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(&trip.params.city, Style::default().fg(Color::White)),
    ])])
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    // Details
    let status_color = match trip.status_name() {
        "completed" => Color::Green,
        "failed" => Color::Red,
        "planning" => Color::Yellow,
        _ => Color::Gray,
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::Gray)),
            Span::styled(trip.status.to_string(), Style::default().fg(status_color)),
        ]),
        Line::from(vec![
            Span::styled("Dates: ", Style::default().fg(Color::Gray)),
            Span::styled(trip.date_range(), Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled("Transportation: ", Style::default().fg(Color::Gray)),
            Span::styled(&trip.params.transportation, Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled("Accommodation: ", Style::default().fg(Color::Gray)),
            Span::styled(&trip.params.accommodation, Style::default().fg(Color::White)),
        ]),
    ];

    if !trip.params.preferences.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Preferences: ", Style::default().fg(Color::Gray)),
            Span::styled(
                trip.params.preferences.join(", "),
                Style::default().fg(Color::White),
            ),
        ]));
    }

    if let Some(notes) = &trip.params.free_text_input {
        lines.push(Line::from(vec![
            Span::styled("Notes: ", Style::default().fg(Color::Gray)),
            Span::styled(notes.as_str(), Style::default().fg(Color::White)),
        ]));
    }

    lines.push(Line::from(vec![
        Span::styled("Created: ", Style::default().fg(Color::Gray)),
        Span::styled(
            trip.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            Style::default().fg(Color::White),
        ),
    ]));

    if let Some(path) = &trip.saved_path {
        lines.push(Line::from(vec![
            Span::styled("Saved: ", Style::default().fg(Color::Gray)),
            Span::styled(path.as_str(), Style::default().fg(Color::White)),
        ]));
    }

    if let Some(plan) = &trip.plan {
        lines.push(Line::from(""));
        lines.extend(itinerary_lines(plan, app.config.tui.show_coordinates));
    }

    let details = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Itinerary"))
        .wrap(Wrap { trim: true })
        .scroll((app.detail_scroll, 0));
    frame.render_widget(details, chunks[1]);

    // Help
    let help = Paragraph::new("↑↓: Scroll | Esc/q: Back")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[2]);
}

/// Render a plan day by day
fn itinerary_lines(plan: &TripPlan, show_coordinates: bool) -> Vec<Line<'_>> {
    let mut lines = Vec::new();

    if let Some(overview) = &plan.overview {
        lines.push(Line::from(Span::styled(
            overview.as_str(),
            Style::default().fg(Color::White),
        )));
        lines.push(Line::from(""));
    }

    for day in &plan.days {
        let mut header = format!("Day {}", day.day);
        if !day.date.is_empty() {
            header.push_str(&format!(" ({})", day.date));
        }
        if let Some(weather) = &day.weather {
            header.push_str(&format!("  {}", weather));
        }
        lines.push(Line::from(Span::styled(
            header,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));

        for attraction in &day.attractions {
            let name_line = match (show_coordinates, attraction.latitude, attraction.longitude)
            {
                (true, Some(lat), Some(lng)) => {
                    format!("  • {} ({:.4}, {:.4})", attraction.name, lat, lng)
                }
                _ => format!("  • {}", attraction.name),
            };
            lines.push(Line::from(Span::styled(
                name_line,
                Style::default().fg(Color::White),
            )));

            if let Some(duration) = &attraction.visit_duration {
                lines.push(Line::from(Span::styled(
                    format!("    {}", duration),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            if let Some(description) = &attraction.description {
                lines.push(Line::from(Span::styled(
                    format!("    {}", description),
                    Style::default().fg(Color::Gray),
                )));
            }
        }

        let meals = &day.meals;
        if meals.breakfast.is_some() || meals.lunch.is_some() || meals.dinner.is_some() {
            lines.push(Line::from(Span::styled(
                "  Meals",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )));
            for (label, meal) in [
                ("Breakfast", &meals.breakfast),
                ("Lunch", &meals.lunch),
                ("Dinner", &meals.dinner),
            ] {
                if let Some(m) = meal {
                    lines.push(Line::from(Span::styled(
                        format!("    {}: {}", label, m),
                        Style::default().fg(Color::Gray),
                    )));
                }
            }
        }

        if let Some(hotel) = &day.hotel {
            let hotel_line = match &hotel.price_range {
                Some(price) => format!("  Hotel: {} ({})", hotel.name, price),
                None => format!("  Hotel: {}", hotel.name),
            };
            lines.push(Line::from(Span::styled(
                hotel_line,
                Style::default().fg(Color::White),
            )));
            if let Some(address) = &hotel.address {
                lines.push(Line::from(Span::styled(
                    format!("    {}", address),
                    Style::default().fg(Color::Gray),
                )));
            }
        }

        if let Some(note) = &day.transport_note {
            lines.push(Line::from(Span::styled(
                format!("  Transport: {}", note),
                Style::default().fg(Color::Gray),
            )));
        }

        lines.push(Line::from(""));
    }

    if let Some(tips) = &plan.tips {
        if !tips.is_empty() {
            lines.push(Line::from(Span::styled(
                "Tips",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )));
            for tip in tips {
                lines.push(Line::from(Span::styled(
                    format!("  - {}", tip),
                    Style::default().fg(Color::Gray),
                )));
            }
        }
    }

    lines
}

/// Draw settings screen
fn draw_settings(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(10),    // Settings list
            Constraint::Length(3),  // Status
            Constraint::Length(2),  // Help
        ])
        .split(area);

    // Header
    let header = Paragraph::new("Settings")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    // Settings list
    let fields = SettingsField::all();
    let items: Vec<ListItem> = fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let is_selected = i == app.settings_selected;
            let value = if app.settings_editing && is_selected {
                format!("{}▏", app.settings_edit_buffer)
            } else {
                app.get_settings_value(field)
            };

            let has_options = app.get_settings_options(field).is_some();
            let hint = if has_options { " [←→]" } else { "" };

            let content = Line::from(vec![
                Span::styled(
                    format!("{:<20}", field.label()),
                    if is_selected {
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::White)
                    },
                ),
                Span::styled(
                    format!("{}{}", value, hint),
                    if is_selected && app.settings_editing {
                        Style::default().fg(Color::Yellow)
                    } else {
                        Style::default().fg(Color::Gray)
                    },
                ),
            ]);

            ListItem::new(content)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::DarkGray));
    frame.render_widget(list, chunks[1]);

    // Status
    draw_status(frame, app, chunks[2]);

    // Help
    let help_text = if app.settings_editing {
        "Enter: Save | Esc: Cancel"
    } else {
        "↑↓: Navigate | Enter/Space: Edit/Toggle | Esc/q: Back"
    };
    let help = Paragraph::new(help_text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[3]);
}
