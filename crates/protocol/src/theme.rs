use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    GridBackground,
    GridLine,

    RowHeaderBackground,
    RowHeaderText,
    RowStripeEven,
    RowStripeOdd,

    AxisBackground,
    AxisTick,
    AxisLabel,

    BroadcastFill,
    BroadcastBorder,
    LiveFill,
    ReplayFill,
    MedalAccent,

    TextPrimary,
    TextSecondary,
    TextMuted,

    SelectionHighlight,
    HoverHighlight,
}
