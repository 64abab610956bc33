pub mod digits;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    animation::CardFlip,
    app::App,
    celebration::Celebration,
    display::DisplayState,
    notification::Notification,
};

use self::digits::{big_number, squashed, GLYPH_HEIGHT, NUMBER_WIDTH};

const BACKGROUND: Color = Color::Rgb(226, 193, 10);
/// The backdrop once a session has started, roughly 40% darker
const OVERLAY_BACKGROUND: Color = Color::Rgb(136, 116, 6);
const CARD_BACKGROUND: Color = Color::Rgb(250, 243, 205);

const CARD_WIDTH: u16 = NUMBER_WIDTH as u16 + 6;
const CARD_HEIGHT: u16 = GLYPH_HEIGHT as u16 + 4;
const SEPARATOR_WIDTH: u16 = 5;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = self.display();

        let backdrop = if display.overlay_visible {
            OVERLAY_BACKGROUND
        } else {
            BACKGROUND
        };
        let base_style = Style::default().bg(backdrop).fg(Color::Black);
        let bold_style = base_style.add_modifier(Modifier::BOLD);

        Block::default().style(base_style).render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // top padding
                Constraint::Length(1), // title
                Constraint::Min(0),    // flexible space above the cards
                Constraint::Length(CARD_HEIGHT),
                Constraint::Length(1), // gap
                Constraint::Length(1), // controls
                Constraint::Length(1), // gap
                Constraint::Length(1), // round
                Constraint::Length(1), // goal
                Constraint::Min(0),    // flexible space below, keeps the cards centred
            ])
            .split(area);

        Paragraph::new(Span::styled("Pomodoro", bold_style))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        render_cards(self, chunks[3], bold_style, buf);

        Paragraph::new(controls_line(&display, base_style))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);

        Paragraph::new(Span::styled(display.round_label(), base_style))
            .alignment(Alignment::Center)
            .render(chunks[7], buf);
        Paragraph::new(Span::styled(display.goal_label(), base_style))
            .alignment(Alignment::Center)
            .render(chunks[8], buf);

        // particles and the popup draw last so they sit on top of the cards
        if self.celebration.is_active() {
            render_celebration(&self.celebration, area, buf);
        }

        if let Some(notification) = &self.notification {
            render_notification(notification, area, buf);
        }
    }
}

fn render_cards(app: &App, area: Rect, bold_style: Style, buf: &mut Buffer) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(CARD_WIDTH), // minutes
            Constraint::Length(SEPARATOR_WIDTH),
            Constraint::Length(CARD_WIDTH), // seconds
            Constraint::Min(0),
        ])
        .split(area);

    render_card(&app.minutes_card, app, columns[1], buf);

    // colon on the middle row of the cards
    let colon_row = Rect {
        y: area.y + area.height / 2,
        height: 1.min(area.height),
        ..columns[2]
    };
    Paragraph::new(Span::styled(":", bold_style))
        .alignment(Alignment::Center)
        .render(colon_row, buf);

    render_card(&app.seconds_card, app, columns[3], buf);
}

/// One flip card. Its height shrinks and grows around the middle row while
/// the value changes.
fn render_card(card: &CardFlip, app: &App, slot: Rect, buf: &mut Buffer) {
    let fraction = card.height_fraction(app.last_frame);
    let height = ((slot.height as f64) * fraction).round() as u16;
    // a border needs two rows; anything thinner is fully folded
    if height < 2 {
        return;
    }

    // fold towards the middle row
    let rect = Rect {
        y: slot.y + (slot.height - height) / 2,
        height,
        ..slot
    };

    let card_style = Style::default()
        .bg(CARD_BACKGROUND)
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(card_style);
    let inner = block.inner(rect);
    block.render(rect, buf);

    // drop glyph rows evenly when the folded card is shorter than the digits
    let rows = big_number(card.shown());
    let visible = squashed(&rows, inner.height as usize);
    let top_pad = inner.height.saturating_sub(visible.len() as u16) / 2;

    let lines: Vec<Line> = visible
        .iter()
        .map(|row| Line::from(Span::styled(row.clone(), card_style)))
        .collect();
    let text_area = Rect {
        y: inner.y + top_pad,
        height: inner.height - top_pad,
        ..inner
    };
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(text_area, buf);
}

fn controls_line(display: &DisplayState, style: Style) -> Line<'static> {
    let key_style = style.add_modifier(Modifier::BOLD);
    let control = display.primary_control;

    let mut spans = vec![
        Span::styled("[space] ", key_style),
        Span::styled(
            format!("{} {}", control.symbol(), control.to_string().to_lowercase()),
            style,
        ),
    ];

    if display.clear_available {
        spans.push(Span::styled("   [c] ", key_style));
        spans.push(Span::styled("clear", style));
    }

    spans.push(Span::styled("   [q] ", key_style));
    spans.push(Span::styled("quit", style));
    Line::from(spans)
}

fn render_notification(notification: &Notification, area: Rect, buf: &mut Buffer) {
    let kind = notification.kind;
    let hint = "press any key";
    let text_width = kind.message().width().max(kind.title().width()).max(hint.width()) as u16;

    // borders plus one column of padding either side
    let width = (text_width + 4).min(area.width);
    let height = 6.min(area.height); // borders, blank, message, blank, hint
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let style = Style::default().bg(Color::White).fg(Color::Black);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .title(Span::styled(
            format!(" {} ", kind.title()),
            style.add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center)
        .style(style);

    let body = vec![
        Line::from(""),
        Line::from(Span::styled(kind.message(), style)),
        Line::from(""),
        Line::from(Span::styled(hint, style.add_modifier(Modifier::ITALIC))),
    ];

    Clear.render(popup, buf);
    Paragraph::new(body)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(popup, buf);
}

fn render_celebration(celebration: &Celebration, area: Rect, buf: &mut Buffer) {
    let colors = [
        Color::Red,
        Color::Magenta,
        Color::Blue,
        Color::Green,
        Color::Cyan,
        Color::LightRed,
        Color::White,
    ];

    for particle in &celebration.particles {
        // particles can drift outside the area; only draw the ones on screen
        if particle.x < 0.0 || particle.y < 0.0 {
            continue;
        }
        let (x, y) = (particle.x as u16, particle.y as u16);
        if x >= area.width || y >= area.height {
            continue;
        }

        // 1.0 when fresh, 0.0 at the end of its life
        let fade = 1.0 - particle.age / particle.max_age;
        let mut style = Style::default().fg(colors[particle.color_index % colors.len()]);
        // banner letters stay bold; sparks dim as they age
        if particle.is_letter() || fade > 0.6 {
            style = style.add_modifier(Modifier::BOLD);
        } else if fade < 0.25 {
            style = style.add_modifier(Modifier::DIM);
        }

        if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
            cell.set_symbol(&particle.symbol.to_string());
            cell.set_style(style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::engine::SESSION_LENGTH_SECS;
    use crate::notification::NotificationKind;
    use std::time::{Duration, Instant};

    fn test_app() -> (App, Instant) {
        let t0 = Instant::now();
        let app = App::new(
            Settings {
                animations: false,
                ..Settings::default()
            },
            t0,
        );
        (app, t0)
    }

    fn render(app: &App, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
    }

    fn text(buffer: &Buffer) -> String {
        buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_fresh_screen() {
        let (app, _) = test_app();
        let rendered = text(&render(&app, 80, 24));

        assert!(rendered.contains("Pomodoro"));
        assert!(rendered.contains("Round: 0 / 4"));
        assert!(rendered.contains("Goal progress: 0 / 12"));
        assert!(rendered.contains("start"));
        assert!(!rendered.contains("clear"));
        assert!(rendered.contains("███"));
    }

    #[test]
    fn test_paused_screen_offers_clear() {
        let (mut app, t0) = test_app();
        app.toggle(t0);
        app.on_frame(t0 + Duration::from_secs(3));
        app.toggle(t0 + Duration::from_secs(3));

        let rendered = text(&render(&app, 80, 24));
        assert!(rendered.contains("clear"));
        assert!(rendered.contains("resume"));
    }

    #[test]
    fn test_running_screen_offers_pause() {
        let (mut app, t0) = test_app();
        app.toggle(t0);
        let rendered = text(&render(&app, 80, 24));
        assert!(rendered.contains("pause"));
        assert!(!rendered.contains("clear"));
    }

    #[test]
    fn test_overlay_darkens_backdrop() {
        let (mut app, t0) = test_app();
        let before = render(&app, 80, 24);
        assert_eq!(before[(0, 0)].bg, BACKGROUND);

        app.toggle(t0);
        let after = render(&app, 80, 24);
        assert_eq!(after[(0, 0)].bg, OVERLAY_BACKGROUND);

        app.toggle(t0);
        app.handle_key(
            crossterm::event::KeyEvent::new(
                crossterm::event::KeyCode::Char('c'),
                crossterm::event::KeyModifiers::NONE,
            ),
            t0,
        );
        let cleared = render(&app, 80, 24);
        assert_eq!(cleared[(0, 0)].bg, BACKGROUND);
    }

    #[test]
    fn test_notification_popup() {
        let (mut app, t0) = test_app();
        app.toggle(t0);
        app.on_frame(t0 + Duration::from_secs(SESSION_LENGTH_SECS as u64));

        let rendered = text(&render(&app, 80, 24));
        assert!(rendered.contains(NotificationKind::SessionComplete.title()));
        assert!(rendered.contains("Take a 5 minute break."));
        assert!(rendered.contains("Round: 1 / 4"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let (mut app, t0) = test_app();
        app.toggle(t0);
        app.on_frame(t0 + Duration::from_secs(SESSION_LENGTH_SECS as u64));
        let buffer = render(&app, 10, 4);
        assert_eq!(*buffer.area(), Rect::new(0, 0, 10, 4));
    }

    #[test]
    fn test_folded_card_is_hidden() {
        let t0 = Instant::now();
        let mut app = App::new(Settings::default(), t0);
        app.toggle(t0);
        app.on_frame(t0 + Duration::from_secs(1));
        // seconds card is mid-fold right after the tick
        app.last_frame = t0 + Duration::from_millis(1299);
        let buffer = render(&app, 80, 24);
        assert!(buffer.area().width > 0);
        assert!(app.seconds_card.height_fraction(app.last_frame) < 0.01);
    }

    #[test]
    fn test_celebration_particles_drawn() {
        let (mut app, t0) = test_app();
        let plain = render(&app, 80, 24);
        app.celebration.start(80, 24, t0);
        let celebrating = render(&app, 80, 24);
        assert_ne!(plain, celebrating);
    }
}
