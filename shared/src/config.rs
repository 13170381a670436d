use serde::{Deserialize, Serialize};

/// One selectable attribute: the statistics column key plus the human
/// label shown in the dropdown, chart title and hover label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub key: String,
    pub label: String,
}

impl Attribute {
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
        }
    }
}

/// Static dashboard configuration: where the two resources live, which
/// TopoJSON object holds the region polygons, how the join key and
/// display name columns are spelled in each file, and which columns are
/// selectable attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub stats_url: String,
    pub boundaries_url: String,
    /// Named object inside the TopoJSON `objects` map.
    pub object_name: String,
    /// Join key column, shared by both files.
    pub key_column: String,
    /// Display name column in the statistics table.
    pub name_column: String,
    /// Display name property on the geographic features.
    pub geo_name_property: String,
    pub attributes: Vec<Attribute>,
    pub default_attribute: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            stats_url: "/data/mxStateStats.csv".into(),
            boundaries_url: "/data/mxStatePoly.topojson".into(),
            object_name: "mexicoStates2".into(),
            key_column: "adm1_code".into(),
            name_column: "State".into(),
            geo_name_property: "name".into(),
            attributes: vec![
                Attribute::new("AbductionRate", "Abduction Rate (per 100k)"),
                Attribute::new("CrimeRate", "Total Crime Rate (per 100k)"),
                Attribute::new("EstPopOver18", "Estimated Population Over 18"),
                Attribute::new("MurderRate", "Murder Rate (per 100k)"),
                Attribute::new("SecPercep", "Perceived Insecurity Index"),
            ],
            default_attribute: "AbductionRate".into(),
        }
    }
}

impl DashboardConfig {
    pub fn attribute_keys(&self) -> Vec<&str> {
        self.attributes.iter().map(|a| a.key.as_str()).collect()
    }

    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.iter().any(|a| a.key == key)
    }

    /// Human label for an attribute key, falling back to the raw key.
    pub fn label_for<'a>(&'a self, key: &'a str) -> &'a str {
        self.attributes
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.label.as_str())
            .unwrap_or(key)
    }
}
