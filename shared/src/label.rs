use crate::config::DashboardConfig;
use crate::region::RegionFeature;

/// Gap kept between the cursor and the label, and between the label and
/// the viewport edges.
pub const LABEL_PADDING: f64 = 10.0;

/// Content of the floating hover label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelContent {
    pub title: String,
    pub value: String,
    pub attribute_label: String,
}

impl LabelContent {
    /// Label for a region under the currently expressed attribute. A
    /// region without that attribute (join miss or absent column) shows
    /// a "no data" placeholder instead of a value.
    pub fn for_region(
        region: &RegionFeature,
        attribute: &str,
        config: &DashboardConfig,
    ) -> Self {
        let value = match region.value(attribute) {
            Some(v) => v.display(),
            None => "no data".to_string(),
        };
        Self {
            title: region.name.clone(),
            value,
            attribute_label: config.label_for(attribute).to_string(),
        }
    }
}

/// Place the label near the cursor: right of and above it by default,
/// flipped to the opposite side of the cursor when it would overflow
/// the right or top edge, then clamped so it never leaves the viewport.
pub fn place_label(
    cursor: (f64, f64),
    label: (f64, f64),
    viewport: (f64, f64),
) -> (f64, f64) {
    let (cx, cy) = cursor;
    let (lw, lh) = label;
    let (vw, vh) = viewport;

    let mut x = cx + LABEL_PADDING;
    let mut y = cy - lh - LABEL_PADDING;

    if x + lw > vw {
        x = cx - lw - LABEL_PADDING;
    }
    if y < LABEL_PADDING {
        y = cy + LABEL_PADDING;
    }

    x = x.max(LABEL_PADDING);
    y = y.min(vh - lh - LABEL_PADDING).max(LABEL_PADDING);

    (x, y)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{LABEL_PADDING, LabelContent, place_label};
    use crate::attribute::AttrValue;
    use crate::config::DashboardConfig;
    use crate::region::RegionFeature;

    #[test]
    fn default_position_is_right_of_and_above_the_cursor() {
        let (x, y) = place_label((200.0, 300.0), (120.0, 60.0), (1200.0, 800.0));
        assert_eq!(x, 210.0);
        assert_eq!(y, 230.0);
    }

    #[test]
    fn flips_left_when_overflowing_the_right_edge() {
        let (x, _) = place_label((1150.0, 300.0), (120.0, 60.0), (1200.0, 800.0));
        assert_eq!(x, 1150.0 - 120.0 - LABEL_PADDING);
    }

    #[test]
    fn flips_below_when_overflowing_the_top_edge() {
        let (_, y) = place_label((200.0, 40.0), (120.0, 60.0), (1200.0, 800.0));
        assert_eq!(y, 50.0);
    }

    #[test]
    fn never_escapes_the_viewport() {
        let (x, y) = place_label((1195.0, 795.0), (400.0, 300.0), (1200.0, 800.0));
        assert!(x >= LABEL_PADDING);
        assert!(y + 300.0 <= 800.0 - LABEL_PADDING + 1e-9);
    }

    #[test]
    fn label_content_shows_value_and_attribute_label() {
        let config = DashboardConfig::default();
        let mut properties = HashMap::new();
        properties.insert("MurderRate".to_string(), AttrValue::Number(12.5));
        let region = RegionFeature {
            code: "MX-01".into(),
            name: "Alpha".into(),
            polygons: Vec::new(),
            properties,
        };

        let label = LabelContent::for_region(&region, "MurderRate", &config);
        assert_eq!(label.title, "Alpha");
        assert_eq!(label.value, "12.5");
        assert_eq!(label.attribute_label, "Murder Rate (per 100k)");
    }

    #[test]
    fn join_miss_shows_the_no_data_placeholder() {
        let config = DashboardConfig::default();
        let region = RegionFeature {
            code: "MX-99".into(),
            name: "Nowhere".into(),
            polygons: Vec::new(),
            properties: HashMap::new(),
        };

        let label = LabelContent::for_region(&region, "MurderRate", &config);
        assert_eq!(label.value, "no data");
    }
}
