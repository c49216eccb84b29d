use pricewatch_core::agent::{ConnectionState, Trend};
use pricewatch_core::utils::format::{money, percent};
use pricewatch_market_data::SampleOrigin;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;

use super::form::FIELD_LABELS;
use super::{App, StatusMessage};

const POSITIVE: Color = Color::Rgb(0, 200, 120);
const NEGATIVE: Color = Color::Rgb(235, 70, 60);
const MUTED: Color = Color::Rgb(128, 128, 128);

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(7),
            Constraint::Min(8),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_header(f, chunks[0], app);
    render_price_panel(f, chunks[1], app);
    render_chart(f, chunks[2], app);
    render_status(f, chunks[3], app);
    render_help(f, chunks[4]);

    if app.form.is_some() {
        render_settings_form(f, app);
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let connection = app.snapshot.connection;
    let color = match connection {
        ConnectionState::Connected => POSITIVE,
        ConnectionState::Disconnected => NEGATIVE,
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} Price Monitor ", app.snapshot.symbol),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" ● {} ", connection.label()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {} ", app.source_label), Style::default().fg(MUTED)),
    ]);

    let paragraph = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

fn render_price_panel(f: &mut Frame, area: Rect, app: &App) {
    let display = &app.snapshot.display;
    let trend_color = match display.trend {
        Trend::Positive => POSITIVE,
        Trend::Negative => NEGATIVE,
    };

    let price = display.price.map(money).unwrap_or_else(|| "--".to_string());
    let mut price_line = vec![Span::styled(
        price,
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if display.alert_visible {
        price_line.push(Span::raw("  "));
        price_line.push(Span::styled(
            " ALERT ",
            Style::default()
                .fg(Color::White)
                .bg(NEGATIVE)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let change_line = Line::from(vec![
        Span::styled(money(display.change), Style::default().fg(trend_color)),
        Span::raw("  "),
        Span::styled(percent(display.change_percent), Style::default().fg(trend_color)),
    ]);

    let updated = display
        .last_updated
        .map(|at| at.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--".to_string());
    let mut updated_line = vec![Span::styled(
        format!("Last updated: {}", updated),
        Style::default().fg(MUTED),
    )];
    match display.origin {
        Some(SampleOrigin::Fallback) => updated_line.push(Span::styled(
            "  (fallback data)",
            Style::default().fg(Color::Yellow),
        )),
        Some(SampleOrigin::Synthetic) => updated_line.push(Span::styled(
            "  (synthetic data)",
            Style::default().fg(MUTED),
        )),
        _ => {}
    }

    let settings = &app.snapshot.settings;
    let settings_line = Line::from(Span::styled(
        format!(
            "Threshold {}%  Interval {}s  Notifications {}",
            settings.alert_threshold_percent.normalize(),
            settings.poll_interval_ms / 1000,
            if settings.notifications_enabled() {
                "on"
            } else {
                "off"
            }
        ),
        Style::default().fg(MUTED),
    ));

    let paragraph = Paragraph::new(vec![
        Line::from(price_line),
        change_line,
        Line::from(updated_line),
        settings_line,
    ])
    .block(Block::default().borders(Borders::ALL).title(" Price "));
    f.render_widget(paragraph, area);
}

fn render_chart(f: &mut Frame, area: Rect, app: &App) {
    let chart = &app.snapshot.chart;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Last {} samples ", chart.capacity()));

    let Some((low, high)) = chart.bounds() else {
        let waiting = Paragraph::new("Waiting for data...")
            .style(Style::default().fg(MUTED))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(waiting, area);
        return;
    };

    let low = low.to_f64().unwrap_or_default();
    let high = high.to_f64().unwrap_or_default();
    let padding = ((high - low) * 0.1).max(0.5);
    let (y_min, y_max) = (low - padding, high + padding);

    let points = chart.points();
    let labels = chart.labels();
    let x_labels = match (labels.first(), labels.last()) {
        (Some(first), Some(last)) => vec![Span::raw(first.to_string()), Span::raw(last.to_string())],
        _ => Vec::new(),
    };
    let x_max = (chart.len().max(2) - 1) as f64;

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&points);

    let widget = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(MUTED))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(MUTED))
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::raw(format!("{:.2}", y_min)),
                    Span::raw(format!("{:.2}", (y_min + y_max) / 2.0)),
                    Span::raw(format!("{:.2}", y_max)),
                ]),
        );
    f.render_widget(widget, area);
}

fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let line = match &app.status {
        Some(StatusMessage::Info(text)) => {
            Line::from(Span::styled(format!(" {}", text), Style::default().fg(POSITIVE)))
        }
        Some(StatusMessage::Error(text)) => {
            Line::from(Span::styled(format!(" {}", text), Style::default().fg(NEGATIVE)))
        }
        None => Line::from(Span::styled(
            format!(
                " polls {}  failed {}  notifications {}",
                app.snapshot.stats.polls,
                app.snapshot.stats.failed_polls,
                app.snapshot.stats.notifications_sent
            ),
            Style::default().fg(MUTED),
        )),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_help(f: &mut Frame, area: Rect) {
    let help = Paragraph::new(Line::from(Span::styled(
        " [t] Test alert  [s] Settings  [q] Quit ",
        Style::default().fg(MUTED),
    )));
    f.render_widget(help, area);
}

fn render_settings_form(f: &mut Frame, app: &App) {
    let Some(form) = &app.form else {
        return;
    };
    let area = centered(f.area(), 60, 9);

    let mut lines: Vec<Line> = form
        .values()
        .iter()
        .zip(FIELD_LABELS)
        .enumerate()
        .map(|(i, (value, label))| {
            let focused = i == form.focused();
            let marker = if focused { "> " } else { "  " };
            let value_style = if focused {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::raw(format!("{}{:<22}", marker, label)),
                Span::styled(format!("{} ", value), value_style),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Tab/Up/Down move  Enter save  Esc cancel",
        Style::default().fg(MUTED),
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Settings "),
    );
    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::snapshot;
    use crate::tui::FormState;
    use pricewatch_core::agent::DisplayState;
    use ratatui::{backend::TestBackend, Terminal};
    use rust_decimal_macros::dec;

    fn rendered(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_empty_dashboard() {
        let app = App::new(snapshot(), "standalone");
        let screen = rendered(&app);
        assert!(screen.contains("QQQ Price Monitor"));
        assert!(screen.contains("● Disconnected"));
        assert!(screen.contains("Waiting for data..."));
        assert!(screen.contains("[t] Test alert"));
        assert!(!screen.contains("ALERT "));
    }

    #[test]
    fn test_price_panel_with_alert() {
        let mut snapshot = snapshot();
        snapshot.connection = ConnectionState::Connected;
        snapshot.display = DisplayState {
            price: Some(dec!(401.234)),
            change: dec!(-4.5),
            change_percent: dec!(-1.1),
            trend: Trend::Negative,
            origin: Some(SampleOrigin::Fallback),
            last_updated: None,
            alert_visible: true,
        };
        snapshot.chart.push("9:30", dec!(405.734));
        snapshot.chart.push("9:31", dec!(401.234));

        let mut app = App::new(snapshot, "http://localhost:3000");
        app.status = Some(StatusMessage::Info("Test notification sent!".to_string()));
        let screen = rendered(&app);

        assert!(screen.contains("● Connected"));
        assert!(screen.contains("$401.23"));
        assert!(screen.contains("$-4.50"));
        assert!(screen.contains("-1.10%"));
        assert!(screen.contains(" ALERT "));
        assert!(screen.contains("(fallback data)"));
        assert!(screen.contains("Test notification sent!"));
        assert!(screen.contains("Last 30 samples"));
        assert!(!screen.contains("Waiting for data..."));
    }

    #[test]
    fn test_settings_form_overlay() {
        let mut app = App::new(snapshot(), "standalone");
        app.form = Some(FormState::from_settings(&app.snapshot.settings));
        let screen = rendered(&app);
        assert!(screen.contains("Settings"));
        assert!(screen.contains("Alert threshold (%)"));
        assert!(screen.contains("Refresh interval (s)"));
        assert!(screen.contains("Enter save"));
    }
}
