use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::attribute::AttrValue;
use crate::error::DataError;

/// Polygon geometry in lon/lat degrees: polygons, then rings, then points.
pub type MultiPolygon = Vec<Vec<Vec<[f64; 2]>>>;

/// One geographic shape. `properties` starts without any statistical
/// attributes; the join fills it for regions with a matching table row
/// and leaves it untouched for the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionFeature {
    pub code: String,
    pub name: String,
    pub polygons: MultiPolygon,
    pub properties: HashMap<String, AttrValue>,
}

impl RegionFeature {
    pub fn value(&self, attribute: &str) -> Option<&AttrValue> {
        self.properties.get(attribute)
    }

    pub fn numeric(&self, attribute: &str) -> Option<f64> {
        self.value(attribute).and_then(AttrValue::as_number)
    }
}

// TopoJSON wire format. Arcs are shared between features and
// delta-encoded; quantized topologies carry a transform that maps the
// integer grid back to lon/lat.

#[derive(Debug, Deserialize)]
struct Topology {
    #[serde(default)]
    transform: Option<Transform>,
    objects: HashMap<String, Value>,
    arcs: Vec<Vec<[f64; 2]>>,
}

#[derive(Debug, Deserialize)]
struct Transform {
    scale: [f64; 2],
    translate: [f64; 2],
}

#[derive(Debug, Deserialize)]
struct GeometryCollection {
    geometries: Vec<TopoGeometry>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum TopoGeometry {
    Polygon {
        arcs: Vec<Vec<i32>>,
        #[serde(default)]
        properties: HashMap<String, Value>,
    },
    MultiPolygon {
        arcs: Vec<Vec<Vec<i32>>>,
        #[serde(default)]
        properties: HashMap<String, Value>,
    },
    #[serde(other)]
    Other,
}

/// Decode the named object of a TopoJSON topology into region features.
/// Non-areal geometries inside the collection are skipped; a missing
/// object is a `MissingCollection` error, anything structurally invalid
/// is a `Load` error.
pub fn parse_topology(
    text: &str,
    object_name: &str,
    key_property: &str,
    name_property: &str,
) -> Result<Vec<RegionFeature>, DataError> {
    let mut topo: Topology =
        serde_json::from_str(text).map_err(|e| DataError::load("boundary topojson", e))?;

    let raw_object = topo
        .objects
        .remove(object_name)
        .ok_or_else(|| DataError::MissingCollection(object_name.to_string()))?;
    let collection: GeometryCollection =
        serde_json::from_value(raw_object).map_err(|e| DataError::load("boundary topojson", e))?;

    let arcs = decode_arcs(&topo);

    let mut features = Vec::new();
    for geometry in collection.geometries {
        let (ring_sets, properties) = match geometry {
            TopoGeometry::Polygon { arcs, properties } => (vec![arcs], properties),
            TopoGeometry::MultiPolygon { arcs, properties } => (arcs, properties),
            TopoGeometry::Other => continue,
        };

        let polygons: MultiPolygon = ring_sets
            .iter()
            .map(|rings| rings.iter().map(|ring| stitch_ring(ring, &arcs)).collect())
            .collect();

        features.push(RegionFeature {
            code: prop_string(&properties, key_property),
            name: prop_string(&properties, name_property),
            polygons,
            properties: HashMap::new(),
        });
    }
    Ok(features)
}

/// Expand every arc to absolute lon/lat positions. Quantized arcs are
/// running sums over the transform grid; unquantized arcs are already
/// absolute.
fn decode_arcs(topo: &Topology) -> Vec<Vec<[f64; 2]>> {
    topo.arcs
        .iter()
        .map(|arc| match &topo.transform {
            Some(t) => {
                let mut x = 0.0;
                let mut y = 0.0;
                arc.iter()
                    .map(|point| {
                        x += point[0];
                        y += point[1];
                        [
                            x * t.scale[0] + t.translate[0],
                            y * t.scale[1] + t.translate[1],
                        ]
                    })
                    .collect()
            }
            None => arc.clone(),
        })
        .collect()
}

/// Concatenate the referenced arcs into one ring. A negative index `~i`
/// traverses arc `i` backwards; every arc after the first repeats the
/// junction point, which is dropped.
fn stitch_ring(arc_refs: &[i32], arcs: &[Vec<[f64; 2]>]) -> Vec<[f64; 2]> {
    let mut ring: Vec<[f64; 2]> = Vec::new();
    for &index in arc_refs {
        let arc = if index < 0 {
            let mut points = arcs[!index as usize].clone();
            points.reverse();
            points
        } else {
            arcs[index as usize].clone()
        };
        let skip = usize::from(!ring.is_empty());
        ring.extend(arc.into_iter().skip(skip));
    }
    ring
}

fn prop_string(properties: &HashMap<String, Value>, key: &str) -> String {
    match properties.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_topology;
    use crate::error::DataError;

    // Two arcs forming a unit square: arc 0 runs up the left edge and
    // across the top, arc 1 returns down the right edge and back.
    const SQUARE: &str = r#"{
        "type": "Topology",
        "transform": { "scale": [1, 1], "translate": [0, 0] },
        "objects": {
            "demo": {
                "type": "GeometryCollection",
                "geometries": [
                    {
                        "type": "Polygon",
                        "arcs": [[0, 1]],
                        "properties": { "adm1_code": "MX-01", "name": "Alpha" }
                    },
                    {
                        "type": "MultiPolygon",
                        "arcs": [[[-2]]],
                        "properties": { "adm1_code": "MX-02", "name": "Beta" }
                    }
                ]
            }
        },
        "arcs": [
            [[0, 0], [0, 1], [1, 0]],
            [[1, 1], [0, -1], [-1, 0]]
        ]
    }"#;

    #[test]
    fn quantized_arcs_decode_and_rings_close() {
        let features = parse_topology(SQUARE, "demo", "adm1_code", "name")
            .expect("topology should parse");
        assert_eq!(features.len(), 2);

        let alpha = &features[0];
        assert_eq!(alpha.code, "MX-01");
        assert_eq!(alpha.name, "Alpha");
        assert_eq!(
            alpha.polygons[0][0],
            vec![[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]]
        );
    }

    #[test]
    fn negative_arc_index_traverses_backwards() {
        let features = parse_topology(SQUARE, "demo", "adm1_code", "name")
            .expect("topology should parse");
        // ~(-2) = 1: arc 1 reversed.
        assert_eq!(
            features[1].polygons[0][0],
            vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]
        );
    }

    #[test]
    fn features_start_without_statistical_attributes() {
        let features = parse_topology(SQUARE, "demo", "adm1_code", "name")
            .expect("topology should parse");
        assert!(features.iter().all(|f| f.properties.is_empty()));
    }

    #[test]
    fn missing_object_is_a_distinct_error() {
        let err = parse_topology(SQUARE, "mexicoStates2", "adm1_code", "name")
            .expect_err("object is absent");
        assert_eq!(err, DataError::MissingCollection("mexicoStates2".into()));
    }

    #[test]
    fn malformed_payload_is_a_load_error() {
        let err = parse_topology("{ not json", "demo", "adm1_code", "name")
            .expect_err("payload is malformed");
        assert!(matches!(err, DataError::Load { .. }));
    }
}
