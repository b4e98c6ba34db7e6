use serde::Serialize;

/// Viewport width below which the narrow layout applies.
pub const MEDIUM_MIN_WIDTH: u32 = 640;
/// Viewport width from which the wide layout applies.
pub const WIDE_MIN_WIDTH: u32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Narrow,
    Medium,
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u32) -> Self {
        if width < MEDIUM_MIN_WIDTH {
            Self::Narrow
        } else if width < WIDE_MIN_WIDTH {
            Self::Medium
        } else {
            Self::Wide
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Bottom,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct Margins {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

/// Display constants shared by every chart at a given viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LayoutMetrics {
    pub breakpoint: Breakpoint,
    /// Outer radius of pie/donut charts in pixels.
    pub outer_radius: u32,
    /// Inner radius of donut charts in pixels.
    pub inner_radius: u32,
    pub margins: Margins,
    pub font_size: u32,
    pub title_font_size: u32,
    pub legend_position: LegendPosition,
    /// Bar thickness for bar charts in pixels.
    pub bar_size: u32,
    /// Rotation of category axis labels in degrees.
    pub label_angle: i32,
}

pub fn layout_metrics(width: u32) -> LayoutMetrics {
    let breakpoint = Breakpoint::from_width(width);
    match breakpoint {
        Breakpoint::Narrow => LayoutMetrics {
            breakpoint,
            outer_radius: 80,
            inner_radius: 50,
            margins: Margins {
                top: 10,
                right: 10,
                bottom: 40,
                left: 10,
            },
            font_size: 10,
            title_font_size: 14,
            legend_position: LegendPosition::Bottom,
            bar_size: 12,
            label_angle: -45,
        },
        Breakpoint::Medium => LayoutMetrics {
            breakpoint,
            outer_radius: 110,
            inner_radius: 70,
            margins: Margins {
                top: 20,
                right: 20,
                bottom: 30,
                left: 20,
            },
            font_size: 12,
            title_font_size: 16,
            legend_position: LegendPosition::Bottom,
            bar_size: 20,
            label_angle: -30,
        },
        Breakpoint::Wide => LayoutMetrics {
            breakpoint,
            outer_radius: 140,
            inner_radius: 90,
            margins: Margins {
                top: 20,
                right: 30,
                bottom: 20,
                left: 30,
            },
            font_size: 14,
            title_font_size: 18,
            legend_position: LegendPosition::Right,
            bar_size: 28,
            label_angle: 0,
        },
    }
}
