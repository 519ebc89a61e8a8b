use airgrid_protocol::{Point, Rect, RenderCommand, TextAlign, ThemeToken, Viewport};

use super::HEADER_WIDTH;

const AXIS_HEIGHT: f64 = 24.0;
const MAJOR_TICK_HEIGHT: f64 = 10.0;
const MINOR_TICK_HEIGHT: f64 = 4.0;
const FONT_SIZE: f64 = 10.0;
const MIN_MAJOR_SPACING_PX: f64 = 80.0;

/// Render the clock ruler across the visible time window, with
/// vertical gridlines extending `grid_height` below the axis.
///
/// `view_start_min` / `view_end_min` are minutes from midnight of the
/// displayed day; values past 1440 label as the small hours of the
/// next morning, matching how a primetime row spills past midnight.
pub fn render_day_axis(
    viewport: &Viewport,
    view_start_min: f64,
    view_end_min: f64,
    grid_height: f64,
) -> Vec<RenderCommand> {
    let window = view_end_min - view_start_min;
    if window <= 0.0 {
        return Vec::new();
    }

    let body_width = (viewport.width - HEADER_WIDTH).max(0.0);
    let x_scale = body_width / window;
    let mut commands = Vec::with_capacity(32);

    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(0.0, 0.0, viewport.width, AXIS_HEIGHT),
        color: ThemeToken::AxisBackground,
        border_color: Some(ThemeToken::GridLine),
        label: None,
        broadcast_id: None,
    });

    let (major_interval, subdivisions) = nice_minute_interval(window, body_width);
    let minor_interval = major_interval / f64::from(subdivisions);

    // Minor ticks
    let first_minor = (view_start_min / minor_interval).floor() * minor_interval;
    let mut t = first_minor;
    while t <= view_end_min {
        let x = HEADER_WIDTH + (t - view_start_min) * x_scale;
        if x >= HEADER_WIDTH && x <= viewport.width && !is_aligned(t, major_interval) {
            commands.push(RenderCommand::DrawLine {
                from: Point::new(x, AXIS_HEIGHT - MINOR_TICK_HEIGHT),
                to: Point::new(x, AXIS_HEIGHT),
                color: ThemeToken::AxisTick,
                width: 0.5,
            });
        }
        t += minor_interval;
    }

    // Major ticks with labels + gridlines
    let first_major = (view_start_min / major_interval).floor() * major_interval;
    t = first_major;
    while t <= view_end_min {
        let x = HEADER_WIDTH + (t - view_start_min) * x_scale;
        if x >= HEADER_WIDTH && x <= viewport.width {
            commands.push(RenderCommand::DrawLine {
                from: Point::new(x, AXIS_HEIGHT - MAJOR_TICK_HEIGHT),
                to: Point::new(x, AXIS_HEIGHT),
                color: ThemeToken::AxisTick,
                width: 1.0,
            });
            commands.push(RenderCommand::DrawText {
                position: Point::new(x + 3.0, AXIS_HEIGHT - 12.0),
                text: format_clock_label(t),
                color: ThemeToken::AxisLabel,
                font_size: FONT_SIZE,
                align: TextAlign::Left,
            });
            if grid_height > 0.0 {
                commands.push(RenderCommand::DrawLine {
                    from: Point::new(x, AXIS_HEIGHT),
                    to: Point::new(x, AXIS_HEIGHT + grid_height),
                    color: ThemeToken::GridLine,
                    width: 0.5,
                });
            }
        }
        t += major_interval;
    }

    commands
}

fn is_aligned(t: f64, interval: f64) -> bool {
    let offset = t / interval;
    (offset - offset.round()).abs() < 0.001
}

/// Choose a "nice" major tick interval in minutes given the visible
/// window and pixel width. Returns (major_interval_min, subdivisions).
fn nice_minute_interval(window_min: f64, width_px: f64) -> (f64, u32) {
    let target_count = (width_px / MIN_MAJOR_SPACING_PX).max(2.0);
    let raw_interval = window_min / target_count;

    let nice_values: &[(f64, u32)] = &[
        (5.0, 5),
        (10.0, 2),
        (15.0, 3),
        (30.0, 2),
        (60.0, 2),    // 1h
        (120.0, 2),
        (180.0, 3),
        (360.0, 3),   // 6h
        (720.0, 2),   // 12h
        (1440.0, 2),  // full day
    ];
    for &(interval, subs) in nice_values {
        if interval >= raw_interval {
            return (interval, subs);
        }
    }
    (1440.0, 2)
}

/// Format minutes-from-midnight as a 12-hour clock label. Minutes past
/// 1440 wrap around to the next morning.
fn format_clock_label(minute: f64) -> String {
    let total = (minute.rem_euclid(1440.0)) as i64;
    let h24 = total / 60;
    let m = total % 60;
    let (h12, meridiem) = match h24 {
        0 => (12, "AM"),
        1..=11 => (h24, "AM"),
        12 => (12, "PM"),
        _ => (h24 - 12, "PM"),
    };
    format!("{h12}:{m:02} {meridiem}")
}
