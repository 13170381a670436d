use std::collections::HashMap;

use crate::attribute::AttrValue;
use crate::record::StatRecord;
use crate::region::RegionFeature;

/// Merge statistical rows into geographic features by administrative
/// code, once per data load.
///
/// Features without a matching row are left untouched so their
/// attributes stay absent rather than zeroed; rendering treats that as
/// the neutral-color case. On a hit the record's display name replaces
/// the geographic one and each requested attribute is copied with
/// numeric coercion. Duplicate codes in `records` resolve last-one-wins.
pub fn join_records(
    features: &mut [RegionFeature],
    records: &[StatRecord],
    attributes: &[&str],
) {
    let by_code: HashMap<&str, &StatRecord> =
        records.iter().map(|r| (r.code.as_str(), r)).collect();

    for feature in features.iter_mut() {
        let Some(record) = by_code.get(feature.code.as_str()) else {
            continue;
        };
        if !record.name.is_empty() {
            feature.name = record.name.clone();
        }
        for &attribute in attributes {
            if let Some(raw) = record.raw(attribute) {
                feature
                    .properties
                    .insert(attribute.to_string(), AttrValue::coerce(raw));
            }
        }
    }
}
