use crate::region::RegionFeature;
use crate::scale::{LinearScale, QuantileScale};

/// Height of the invisible baseline rectangle that keeps zero-height
/// bars hoverable.
pub const HIT_RECT_HEIGHT: f64 = 20.0;

/// Bar chart geometry: outer frame plus the left margin reserved for
/// the y axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    pub left_margin: f64,
}

impl ChartFrame {
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            left_margin: 25.0,
        }
    }

    fn slot_width(&self, bars: usize) -> f64 {
        (self.width - self.left_margin) / bars.max(1) as f64
    }
}

/// One laid-out bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub code: String,
    pub name: String,
    pub value: Option<f64>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: &'static str,
}

impl Bar {
    /// A bar draws invisible when its value is zero or non-numeric. It
    /// must still receive pointer events; see [`Bar::hit_rect`].
    pub fn is_invisible(&self) -> bool {
        self.value.unwrap_or(0.0) == 0.0
    }

    /// Baseline hit target `(x, y, width, height)` for an invisible
    /// bar: same column, fixed height, rendered transparent with
    /// pointer events enabled.
    pub fn hit_rect(&self, frame: &ChartFrame) -> (f64, f64, f64, f64) {
        (
            self.x,
            frame.height - HIT_RECT_HEIGHT,
            self.width,
            HIT_RECT_HEIGHT,
        )
    }
}

/// Lay out one bar per region for the selected attribute, tallest
/// first. Regions with missing or textual values sort last, collapse to
/// zero height and take the neutral fill; ties break on code so
/// re-layout is deterministic.
pub fn layout_bars(
    regions: &[RegionFeature],
    attribute: &str,
    color_scale: &QuantileScale,
    y_scale: &LinearScale,
    frame: &ChartFrame,
) -> Vec<Bar> {
    let mut order: Vec<&RegionFeature> = regions.iter().collect();
    order.sort_by(|a, b| {
        let ordering = match (a.numeric(attribute), b.numeric(attribute)) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        };
        ordering.then_with(|| a.code.cmp(&b.code))
    });

    let slot = frame.slot_width(order.len());
    order
        .into_iter()
        .enumerate()
        .map(|(i, region)| {
            let value = region.numeric(attribute);
            let top = y_scale.scale(value.unwrap_or(0.0));
            Bar {
                code: region.code.clone(),
                name: region.name.clone(),
                value,
                x: i as f64 * slot + frame.left_margin,
                y: top,
                width: slot - 1.0,
                height: frame.height - top,
                color: color_scale.color(region.value(attribute)),
            }
        })
        .collect()
}
