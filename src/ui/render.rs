//! Frame Rendering
//!
//! Pure rendering functions: take app state and a snapshot, draw a frame.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        BarChart, Block, Borders, Cell, Paragraph, Row, Table, TableState,
    },
    Frame,
};

use crate::store::{DashboardSnapshot, FetchStatus, StateEntry};

use super::app::{DashboardApp, View};

// India bounding box for the marker canvas
const MAP_LON_BOUNDS: [f64; 2] = [66.0, 100.0];
const MAP_LAT_BOUNDS: [f64; 2] = [5.0, 38.0];

/// Render the active view.
pub fn render(frame: &mut Frame, app: &DashboardApp, snapshot: &DashboardSnapshot) {
    match app.view {
        View::Summary => render_summary(frame, app, snapshot),
        View::Map => render_map(frame, snapshot),
        View::Detail => render_detail(frame, app),
    }
}

fn render_summary(frame: &mut Frame, app: &DashboardApp, snapshot: &DashboardSnapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], "COVID-19 DASHBOARD - INDIA", snapshot);
    render_counters(frame, chunks[1], snapshot);
    render_state_table(frame, chunks[2], app, snapshot);
    render_footer(
        frame,
        chunks[3],
        "up/down: select | enter: state chart | m: map | r: refresh | q: quit",
    );
}

fn render_map(frame: &mut Frame, snapshot: &DashboardSnapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], "COVID-19 MAP OF INDIA", snapshot);

    let markers: Vec<(f64, f64)> = snapshot
        .statewise
        .iter()
        .filter(|entry| entry.has_coordinates())
        .map(|entry| (entry.longitude, entry.latitude))
        .collect();

    // Label only the hardest-hit states to keep the canvas readable
    let mut by_total: Vec<&StateEntry> = snapshot
        .statewise
        .iter()
        .filter(|entry| entry.has_coordinates())
        .collect();
    by_total.sort_by_key(|entry| std::cmp::Reverse(entry.total));
    let labeled: Vec<&StateEntry> = by_total.into_iter().take(5).collect();

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(" Markers "))
        .x_bounds(MAP_LON_BOUNDS)
        .y_bounds(MAP_LAT_BOUNDS)
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &markers,
                color: Color::Red,
            });
            for entry in &labeled {
                ctx.print(
                    entry.longitude,
                    entry.latitude,
                    Line::from(Span::styled(
                        entry.state.clone(),
                        Style::default().fg(Color::Yellow),
                    )),
                );
            }
        });
    frame.render_widget(canvas, chunks[1]);

    render_footer(frame, chunks[2], "s/esc: summary | r: refresh | q: quit");
}

fn render_detail(frame: &mut Frame, app: &DashboardApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let Some(detail) = &app.detail else {
        // Detail view without a selection; nothing to show
        render_footer(frame, chunks[3], "s/esc: summary | q: quit");
        return;
    };

    let title = Paragraph::new(Line::from(Span::styled(
        format!("COVID-19 DATA FOR {}", detail.selected_state.to_uppercase()),
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let Some(entry) = &detail.entry else {
        let missing = Paragraph::new(format!(
            "No data available for {}",
            detail.selected_state
        ))
        .alignment(Alignment::Center);
        frame.render_widget(missing, chunks[1]);
        render_footer(frame, chunks[3], "s/esc: summary | q: quit");
        return;
    };

    let recovered = entry.recovered.max(0) as u64;
    let deaths = entry.deaths.max(0) as u64;
    let active = entry.active() as u64;
    let denominator = (recovered + deaths + active).max(1) as f64;
    let pct = |part: u64| 100.0 * part as f64 / denominator;

    let breakdown = Paragraph::new(vec![
        Line::from(vec![
            Span::raw("Recovered: "),
            Span::styled(
                format!("{recovered} ({:.1}%)", pct(recovered)),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            Span::raw("Deaths:    "),
            Span::styled(
                format!("{deaths} ({:.1}%)", pct(deaths)),
                Style::default().fg(Color::Red),
            ),
        ]),
        Line::from(vec![
            Span::raw("Active:    "),
            Span::styled(
                format!("{active} ({:.1}%)", pct(active)),
                Style::default().fg(Color::Blue),
            ),
        ]),
    ])
    .block(Block::default().borders(Borders::ALL).title(" Breakdown "));
    frame.render_widget(breakdown, chunks[1]);

    let bars = [
        ("Recovered", recovered),
        ("Deaths", deaths),
        ("Active", active),
    ];
    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(" Distribution "))
        .bar_width(12)
        .bar_gap(4)
        .data(&bars);
    frame.render_widget(chart, chunks[2]);

    render_footer(frame, chunks[3], "s/esc: summary | q: quit");
}

fn render_header(frame: &mut Frame, area: Rect, title: &str, snapshot: &DashboardSnapshot) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("{title}  "),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        status_span(snapshot),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn status_span(snapshot: &DashboardSnapshot) -> Span<'static> {
    match snapshot.status {
        FetchStatus::Idle => Span::styled("starting", Style::default().fg(Color::DarkGray)),
        FetchStatus::Loading => {
            Span::styled("Loading data...", Style::default().fg(Color::Yellow))
        }
        FetchStatus::Failed => Span::styled(
            "Failed to load data. Press r to retry.",
            Style::default().fg(Color::Red),
        ),
        FetchStatus::Succeeded => {
            let updated = snapshot
                .last_updated
                .map(|ts| ts.format("%Y-%m-%d %H:%M UTC").to_string())
                .unwrap_or_else(|| "just now".to_string());
            Span::styled(
                format!("updated {updated}"),
                Style::default().fg(Color::Green),
            )
        }
    }
}

fn render_counters(frame: &mut Frame, area: Rect, snapshot: &DashboardSnapshot) {
    let counters = Paragraph::new(vec![
        Line::from(vec![
            Span::raw("Total Cases: "),
            Span::styled(
                snapshot.total_cases.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw("Recovered:   "),
            Span::styled(
                snapshot.recovered.to_string(),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            Span::raw("Deaths:      "),
            Span::styled(
                snapshot.deaths.to_string(),
                Style::default().fg(Color::Red),
            ),
        ]),
        Line::from(vec![
            Span::raw("Active:      "),
            Span::styled(
                snapshot.active().to_string(),
                Style::default().fg(Color::Blue),
            ),
        ]),
    ])
    .block(Block::default().borders(Borders::ALL).title(" Nationwide "));
    frame.render_widget(counters, area);
}

fn render_state_table(
    frame: &mut Frame,
    area: Rect,
    app: &DashboardApp,
    snapshot: &DashboardSnapshot,
) {
    let rows: Vec<Row> = snapshot
        .statewise
        .iter()
        .map(|entry| {
            Row::new(vec![
                Cell::from(entry.state.clone()),
                Cell::from(entry.total.to_string()),
                Cell::from(entry.recovered.to_string()),
                Cell::from(entry.deaths.to_string()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(40),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ],
    )
    .header(
        Row::new(vec!["State", "Total", "Recovered", "Deaths"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title(" State Wise Data "))
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let mut state = TableState::default();
    if !snapshot.statewise.is_empty() {
        state.select(Some(app.selected.min(snapshot.statewise.len() - 1)));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_footer(frame: &mut Frame, area: Rect, hints: &str) {
    let footer = Paragraph::new(hints)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
