use std::io::stdout;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Style},
    widgets::Block,
};

use airgrid_core::layout::GridLayout;
use airgrid_core::model::Timetable;
use airgrid_core::views::{LANE_HEIGHT, day_axis::render_day_axis, grid::render_grid};
use airgrid_protocol::{RenderCommand, ThemeToken, Viewport};

/// Logical pixel width the views render into; the terminal scales
/// columns against this.
const LOGICAL_WIDTH: f64 = 800.0;
/// Default visible time window: six hours.
const DEFAULT_WINDOW_MIN: f64 = 360.0;
const SCROLL_STEP_MIN: f64 = 30.0;

fn theme_to_color(token: &ThemeToken) -> Color {
    match token {
        ThemeToken::GridBackground => Color::Black,
        ThemeToken::GridLine => Color::DarkGray,
        ThemeToken::RowHeaderBackground => Color::DarkGray,
        ThemeToken::RowHeaderText => Color::White,
        ThemeToken::RowStripeEven => Color::Black,
        ThemeToken::RowStripeOdd => Color::Rgb(18, 18, 18),
        ThemeToken::AxisBackground => Color::DarkGray,
        ThemeToken::AxisTick => Color::Gray,
        ThemeToken::AxisLabel => Color::White,
        ThemeToken::BroadcastFill => Color::Rgb(60, 120, 200),
        ThemeToken::BroadcastBorder => Color::Rgb(40, 90, 160),
        ThemeToken::LiveFill => Color::Rgb(200, 60, 60),
        ThemeToken::ReplayFill => Color::Rgb(90, 90, 110),
        ThemeToken::MedalAccent => Color::Yellow,
        ThemeToken::TextPrimary => Color::White,
        ThemeToken::TextSecondary => Color::Gray,
        ThemeToken::TextMuted => Color::DarkGray,
        ThemeToken::SelectionHighlight => Color::Green,
        ThemeToken::HoverHighlight => Color::LightYellow,
    }
}

/// Paint one command list into a terminal area. Rects and text map
/// onto cells: one lane of `LANE_HEIGHT` logical pixels becomes one
/// terminal row, columns scale against `LOGICAL_WIDTH`. Lines are
/// skipped — a character grid has nowhere useful to put them.
fn paint(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    commands: &[RenderCommand],
    scroll_y_px: f64,
) {
    let col_scale = f64::from(area.width) / LOGICAL_WIDTH;

    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect, color, label, ..
            } => {
                let y = rect.y - scroll_y_px;
                if y < 0.0 {
                    continue;
                }
                let row = (y / LANE_HEIGHT) as u16;
                let col = (rect.x * col_scale) as u16;
                let width = ((rect.w * col_scale) as u16).max(1);
                if row >= area.height || col >= area.width {
                    continue;
                }

                let fg = theme_to_color(color);
                let label_str = label.as_deref().unwrap_or("");
                let display: String = if (width as usize) >= label_str.len() + 2 {
                    format!(" {label_str:<w$}", w = (width as usize).saturating_sub(2))
                } else {
                    "█".repeat(width as usize)
                };

                let clamped_width = width.min(area.width.saturating_sub(col));
                let buf = frame.buffer_mut();
                for (i, ch) in display.chars().take(clamped_width as usize).enumerate() {
                    let x = area.x + col + i as u16;
                    let y = area.y + row;
                    if x < area.x + area.width && y < area.y + area.height {
                        buf[(x, y)].set_char(ch).set_fg(fg).set_bg(Color::Black);
                    }
                }
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                ..
            } => {
                let y = position.y - scroll_y_px;
                if y < 0.0 {
                    continue;
                }
                let row = (y / LANE_HEIGHT) as u16;
                let col = (position.x * col_scale) as u16;
                if row >= area.height || col >= area.width {
                    continue;
                }
                let fg = theme_to_color(color);
                let buf = frame.buffer_mut();
                for (i, ch) in text.chars().enumerate() {
                    let x = area.x + col + i as u16;
                    if x < area.x + area.width {
                        buf[(x, area.y + row)].set_char(ch).set_fg(fg);
                    }
                }
            }
            _ => {}
        }
    }
}

pub fn render_tui(timetable: &Timetable, layout: &GridLayout) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut day_idx: usize = 0;
    let mut view_start_min: f64 = 7.0 * 60.0;
    let mut window_min: f64 = DEFAULT_WINDOW_MIN;
    let mut scroll_lanes: f64 = 0.0;

    loop {
        let date = layout.days.get(day_idx).cloned().unwrap_or_default();
        let day_lanes = layout.day_height_lanes(day_idx);

        terminal.draw(|frame| {
            let area = frame.area();
            if area.height < 3 {
                return;
            }

            let header_area = Rect::new(0, 0, area.width, 1);
            let meta_label = timetable
                .meta()
                .map(|m| m.source_format.to_string())
                .unwrap_or_default();
            let header = Block::default()
                .title(format!(
                    " airgrid — {meta_label} | {date} ({}/{}) | ←→ pan  +/- zoom  [ ] day  q quit ",
                    day_idx + 1,
                    layout.days.len(),
                ))
                .style(Style::default().fg(Color::White).bg(Color::DarkGray));
            frame.render_widget(header, header_area);

            let axis_area = Rect::new(0, 1, area.width, 1);
            let content_area = Rect::new(0, 2, area.width, area.height.saturating_sub(2));

            let viewport = Viewport {
                x: 0.0,
                y: scroll_lanes * LANE_HEIGHT,
                width: LOGICAL_WIDTH,
                height: f64::from(content_area.height) * LANE_HEIGHT,
                dpr: 1.0,
            };

            let axis_cmds = render_day_axis(
                &viewport,
                view_start_min,
                view_start_min + window_min,
                0.0,
            );
            paint(frame, axis_area, &axis_cmds, 0.0);

            let grid_cmds = render_grid(
                layout,
                &date,
                &viewport,
                view_start_min,
                view_start_min + window_min,
            );
            paint(frame, content_area, &grid_cmds, scroll_lanes * LANE_HEIGHT);
        })?;

        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Left => {
                        view_start_min = (view_start_min - SCROLL_STEP_MIN).max(0.0);
                    }
                    KeyCode::Right => {
                        let limit = (1440.0 + 360.0) - window_min;
                        view_start_min = (view_start_min + SCROLL_STEP_MIN).min(limit.max(0.0));
                    }
                    KeyCode::Up => scroll_lanes = (scroll_lanes - 1.0).max(0.0),
                    KeyCode::Down => {
                        scroll_lanes = (scroll_lanes + 1.0).min(day_lanes.saturating_sub(1) as f64);
                    }
                    KeyCode::Char('+') | KeyCode::Char('=') => {
                        window_min = (window_min / 1.5).max(60.0);
                    }
                    KeyCode::Char('-') => {
                        window_min = (window_min * 1.5).min(1440.0);
                    }
                    KeyCode::Char('[') => {
                        day_idx = day_idx.saturating_sub(1);
                    }
                    KeyCode::Char(']') => {
                        if day_idx + 1 < layout.days.len() {
                            day_idx += 1;
                        }
                    }
                    _ => {}
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => {
                        scroll_lanes = (scroll_lanes + 1.0).min(day_lanes.saturating_sub(1) as f64);
                    }
                    MouseEventKind::ScrollUp => scroll_lanes = (scroll_lanes - 1.0).max(0.0),
                    MouseEventKind::ScrollLeft => {
                        view_start_min = (view_start_min - SCROLL_STEP_MIN).max(0.0);
                    }
                    MouseEventKind::ScrollRight => {
                        view_start_min += SCROLL_STEP_MIN;
                    }
                    _ => {}
                },
                _ => {}
            }
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
