use airgrid_protocol::{Point, Rect, RenderCommand, TextAlign, ThemeToken, Viewport};

use super::{HEADER_WIDTH, LANE_HEIGHT};
use crate::layout::GridLayout;

const FONT_SIZE: f64 = 10.0;
const MIN_LABEL_WIDTH: f64 = 40.0;
/// Zero-width broadcasts still render as a visible sliver.
const MIN_BOX_WIDTH: f64 = 3.0;

/// Render one day of the timetable grid.
///
/// X maps minutes in `[view_start_min, view_end_min)` onto the area
/// right of the header column; Y comes from the row's offset plus the
/// broadcast's lane. Lane and height data come exclusively from the
/// prebuilt `GridLayout` — this function only windows and culls, it
/// never re-derives lanes for the visible slice.
pub fn render_grid(
    layout: &GridLayout,
    date: &str,
    viewport: &Viewport,
    view_start_min: f64,
    view_end_min: f64,
) -> Vec<RenderCommand> {
    let window = view_end_min - view_start_min;
    let Some(day_idx) = layout.day_index(date) else {
        return Vec::new();
    };
    if window <= 0.0 {
        return Vec::new();
    }

    let body_width = (viewport.width - HEADER_WIDTH).max(0.0);
    let x_scale = body_width / window;
    let mut commands = Vec::with_capacity(layout.rows.len() * 4);

    commands.push(RenderCommand::BeginGroup {
        id: "grid".to_string(),
        label: Some(date.to_string()),
    });

    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(0.0, 0.0, viewport.width, viewport.height),
        color: ThemeToken::GridBackground,
        border_color: None,
        label: None,
        broadcast_id: None,
    });

    let mut y = 0.0;
    for (row_idx, row) in layout.rows.iter().enumerate() {
        let Some(cell) = row.cells.get(day_idx) else {
            continue;
        };
        let row_height = cell.lanes as f64 * LANE_HEIGHT;
        let row_top = y;
        y += row_height;

        // Cull rows outside the vertical scroll window, but keep
        // accumulating offsets so positions stay absolute.
        if row_top + row_height < viewport.y || row_top > viewport.y + viewport.height {
            continue;
        }

        let stripe = if row_idx % 2 == 0 {
            ThemeToken::RowStripeEven
        } else {
            ThemeToken::RowStripeOdd
        };
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(HEADER_WIDTH, row_top, body_width, row_height),
            color: stripe,
            border_color: Some(ThemeToken::GridLine),
            label: None,
            broadcast_id: None,
        });

        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(0.0, row_top, HEADER_WIDTH, row_height),
            color: ThemeToken::RowHeaderBackground,
            border_color: Some(ThemeToken::GridLine),
            label: None,
            broadcast_id: None,
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(4.0, row_top + 14.0),
            text: row.row_key.clone(),
            color: ThemeToken::RowHeaderText,
            font_size: FONT_SIZE,
            align: TextAlign::Left,
        });

        for slot in &cell.slots {
            let b = &slot.broadcast;
            let start = b.start_min as f64;
            let end = b.end_min.max(b.start_min) as f64;
            if end < view_start_min || start > view_end_min {
                continue;
            }

            let x = HEADER_WIDTH + (start - view_start_min) * x_scale;
            let w = ((end - start) * x_scale).max(MIN_BOX_WIDTH);
            let clamped_x = x.max(HEADER_WIDTH);
            let clamped_w = (x + w).min(viewport.width) - clamped_x;
            if clamped_w < 0.5 {
                continue;
            }

            let box_y = row_top + slot.lane as f64 * LANE_HEIGHT;
            let fill = if b.is_replay {
                ThemeToken::ReplayFill
            } else if b.is_live {
                ThemeToken::LiveFill
            } else {
                ThemeToken::BroadcastFill
            };
            let border = if b.is_medal_session {
                ThemeToken::MedalAccent
            } else {
                ThemeToken::BroadcastBorder
            };

            commands.push(RenderCommand::DrawRect {
                rect: Rect::new(clamped_x, box_y, clamped_w, LANE_HEIGHT - 2.0),
                color: fill,
                border_color: Some(border),
                label: Some(b.display_title().to_string()),
                broadcast_id: Some(b.id.clone()),
            });

            if clamped_w > MIN_LABEL_WIDTH {
                commands.push(RenderCommand::DrawText {
                    position: Point::new(clamped_x + 3.0, box_y + LANE_HEIGHT / 2.0 + 3.0),
                    text: b.display_title().to_string(),
                    color: ThemeToken::TextPrimary,
                    font_size: FONT_SIZE,
                    align: TextAlign::Left,
                });
            }
        }
    }

    commands.push(RenderCommand::EndGroup);
    commands
}
