pub mod attribute;
pub mod chart;
pub mod config;
pub mod error;
pub mod join;
pub mod label;
pub mod projection;
pub mod record;
pub mod region;
pub mod scale;
pub mod state;

pub use attribute::AttrValue;
pub use chart::{Bar, ChartFrame, layout_bars};
pub use config::{Attribute, DashboardConfig};
pub use error::DataError;
pub use join::join_records;
pub use label::{LabelContent, place_label};
pub use projection::{ConicEqualArea, graticule, line_path, polygon_path};
pub use record::{StatRecord, parse_stats_csv};
pub use region::{MultiPolygon, RegionFeature, parse_topology};
pub use scale::{GREEN_RAMP, LinearScale, NEUTRAL_COLOR, QuantileScale, attribute_domain};
pub use state::DashboardState;
