use crate::attribute::AttrValue;
use crate::region::RegionFeature;

/// Five-class sequential ramp, lightest to darkest.
pub const GREEN_RAMP: [&str; 5] = ["#edf8e9", "#bae4b3", "#74c476", "#31a354", "#006d2c"];

/// Fill for regions and bars whose value is absent or non-numeric.
pub const NEUTRAL_COLOR: &str = "#ccc";

/// Numeric values of one attribute across the joined regions. Absent
/// and textual values are excluded here, which is exactly what keeps
/// them out of the scale domain.
pub fn attribute_domain(regions: &[RegionFeature], attribute: &str) -> Vec<f64> {
    regions
        .iter()
        .filter_map(|r| r.numeric(attribute))
        .collect()
}

/// Discrete quantile color scale: the sorted numeric domain is split
/// into `colors.len()` equal-count bins, with bin thresholds at the
/// interpolated quantiles (R-7). Lookup bisects right over the
/// thresholds, so a value equal to a threshold lands in the higher bin.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantileScale {
    domain: Vec<f64>,
    thresholds: Vec<f64>,
    colors: &'static [&'static str],
}

impl QuantileScale {
    pub fn build(mut domain: Vec<f64>, colors: &'static [&'static str]) -> Self {
        domain.retain(|v| v.is_finite());
        domain.sort_by(f64::total_cmp);

        let bins = colors.len().max(1);
        let mut thresholds = Vec::with_capacity(bins - 1);
        if !domain.is_empty() {
            for i in 1..bins {
                thresholds.push(quantile_sorted(&domain, i as f64 / bins as f64));
            }
        }
        Self {
            domain,
            thresholds,
            colors,
        }
    }

    /// Sorted numeric domain the scale was built from.
    pub fn domain(&self) -> &[f64] {
        &self.domain
    }

    /// Color for a joined attribute value. Absent and textual values
    /// render the fixed neutral fill, never a scale color.
    pub fn color(&self, value: Option<&AttrValue>) -> &'static str {
        match value.and_then(AttrValue::as_number) {
            Some(v) => self.color_for(v),
            None => NEUTRAL_COLOR,
        }
    }

    /// Scale color for a numeric value. With a degenerate domain (all
    /// values equal, or a single record) the thresholds collapse but
    /// every input still maps to a valid color.
    pub fn color_for(&self, value: f64) -> &'static str {
        if self.domain.is_empty() {
            return NEUTRAL_COLOR;
        }
        let index = self.thresholds.iter().filter(|t| **t <= value).count();
        self.colors[index.min(self.colors.len() - 1)]
    }
}

/// Interpolated quantile of a sorted slice (R-7).
fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * p;
    let i = h.floor() as usize;
    let t = h - i as f64;
    if i + 1 < sorted.len() {
        sorted[i] * (1.0 - t) + sorted[i + 1] * t
    } else {
        sorted[i]
    }
}

/// Linear scale for the bar chart's y axis: domain `[0, max]` maps to
/// range `[height, 0]` so larger values sit higher on the SVG.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain_max: f64,
    pub range_start: f64,
    pub range_end: f64,
}

impl LinearScale {
    /// Domain runs to the largest numeric value plus 5% headroom;
    /// missing and textual values contribute zero to the maximum.
    pub fn for_values(values: impl Iterator<Item = Option<f64>>, height: f64) -> Self {
        let max = values.map(|v| v.unwrap_or(0.0)).fold(0.0f64, f64::max);
        Self {
            domain_max: max * 1.05,
            range_start: height,
            range_end: 0.0,
        }
    }

    pub fn scale(&self, value: f64) -> f64 {
        if self.domain_max <= 0.0 {
            return self.range_start;
        }
        let t = (value / self.domain_max).clamp(0.0, 1.0);
        self.range_start + (self.range_end - self.range_start) * t
    }

    /// Axis tick values on a 1/2/5 decade step.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        if self.domain_max <= 0.0 || count == 0 {
            return vec![0.0];
        }
        let step = tick_increment(self.domain_max, count);
        let n = (self.domain_max / step).floor() as usize;
        (0..=n).map(|i| i as f64 * step).collect()
    }
}

fn tick_increment(span: f64, count: usize) -> f64 {
    let step = span / count.max(1) as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 7.07 {
        10.0
    } else if error >= 3.16 {
        5.0
    } else if error >= 1.41 {
        2.0
    } else {
        1.0
    };
    factor * 10f64.powf(power)
}

#[cfg(test)]
mod tests {
    use super::{GREEN_RAMP, LinearScale, NEUTRAL_COLOR, QuantileScale};
    use crate::attribute::AttrValue;

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(
            diff < 1e-9,
            "expected {expected}, got {actual} (diff: {diff})"
        );
    }

    #[test]
    fn thresholds_interpolate_the_sorted_domain() {
        let scale = QuantileScale::build((1..=10).map(f64::from).collect(), &GREEN_RAMP);
        let expected = [2.8, 4.6, 6.4, 8.2];
        for (i, want) in expected.iter().enumerate() {
            assert_close(scale.thresholds[i], *want);
        }
    }

    #[test]
    fn extremes_map_to_the_ramp_ends() {
        let scale = QuantileScale::build((1..=10).map(f64::from).collect(), &GREEN_RAMP);
        assert_eq!(scale.color_for(1.0), "#edf8e9");
        assert_eq!(scale.color_for(10.0), "#006d2c");
    }

    #[test]
    fn value_on_a_threshold_lands_in_the_higher_bin() {
        // Domain [0, 10] puts the thresholds exactly at 2, 4, 6, 8.
        let scale = QuantileScale::build(vec![0.0, 10.0], &GREEN_RAMP);
        assert_eq!(scale.color_for(1.9), "#edf8e9");
        assert_eq!(scale.color_for(2.0), "#bae4b3");
        assert_eq!(scale.color_for(8.0), "#006d2c");
    }

    #[test]
    fn missing_and_textual_values_render_neutral() {
        let scale = QuantileScale::build(vec![1.0, 2.0, 3.0], &GREEN_RAMP);
        assert_eq!(scale.color(None), NEUTRAL_COLOR);
        assert_eq!(
            scale.color(Some(&AttrValue::Text("ND".into()))),
            NEUTRAL_COLOR
        );
    }

    #[test]
    fn present_zero_gets_a_scale_color_not_neutral() {
        let scale = QuantileScale::build(vec![10.0, 0.0], &GREEN_RAMP);
        assert_eq!(scale.color(Some(&AttrValue::Number(0.0))), "#edf8e9");
        assert_eq!(scale.color(Some(&AttrValue::Number(10.0))), "#006d2c");
    }

    #[test]
    fn degenerate_domain_still_returns_valid_colors() {
        let scale = QuantileScale::build(vec![5.0, 5.0, 5.0], &GREEN_RAMP);
        assert_eq!(scale.color_for(5.0), "#006d2c");
        assert_eq!(scale.color_for(4.0), "#edf8e9");

        let empty = QuantileScale::build(Vec::new(), &GREEN_RAMP);
        assert_eq!(empty.color_for(1.0), NEUTRAL_COLOR);
    }

    #[test]
    fn domain_holds_exactly_the_numeric_values() {
        use std::collections::HashMap;

        use crate::region::RegionFeature;

        let regions: Vec<RegionFeature> = [("MX-01", Some("10")), ("MX-02", Some("abc")), ("MX-03", Some("0")), ("MX-04", None)]
            .into_iter()
            .map(|(code, raw)| {
                let mut properties = HashMap::new();
                if let Some(raw) = raw {
                    properties.insert("rate".to_string(), AttrValue::coerce(raw));
                }
                RegionFeature {
                    code: code.to_string(),
                    name: String::new(),
                    polygons: Vec::new(),
                    properties,
                }
            })
            .collect();

        let scale = QuantileScale::build(super::attribute_domain(&regions, "rate"), &GREEN_RAMP);
        assert_eq!(scale.domain(), &[0.0, 10.0]);
    }

    #[test]
    fn rebuilding_from_the_same_domain_is_identical() {
        let a = QuantileScale::build(vec![3.0, 1.0, 4.0, 1.0, 5.0], &GREEN_RAMP);
        let b = QuantileScale::build(vec![3.0, 1.0, 4.0, 1.0, 5.0], &GREEN_RAMP);
        assert_eq!(a, b);
    }

    #[test]
    fn linear_scale_maps_domain_to_inverted_range() {
        let scale = LinearScale::for_values([Some(100.0), Some(50.0)].into_iter(), 460.0);
        assert_close(scale.domain_max, 105.0);
        assert_close(scale.scale(0.0), 460.0);
        assert_close(scale.scale(105.0), 0.0);
    }

    #[test]
    fn missing_values_contribute_zero_to_the_maximum() {
        let scale = LinearScale::for_values([None, Some(10.0), None].into_iter(), 460.0);
        assert_close(scale.domain_max, 10.5);
    }

    #[test]
    fn all_missing_domain_collapses_safely() {
        let scale = LinearScale::for_values([None, None].into_iter(), 460.0);
        assert_close(scale.scale(0.0), 460.0);
        assert_eq!(scale.ticks(10), vec![0.0]);
    }

    #[test]
    fn ticks_use_decade_friendly_steps() {
        let scale = LinearScale {
            domain_max: 105.0,
            range_start: 460.0,
            range_end: 0.0,
        };
        let ticks = scale.ticks(10);
        assert_eq!(ticks.first().copied(), Some(0.0));
        assert_close(ticks[1], 10.0);
        assert_eq!(ticks.len(), 11);
    }
}
