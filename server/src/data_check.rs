use std::path::Path;

use tracing::{info, warn};

use coropleta_shared::{DashboardConfig, DataError, join_records, parse_stats_csv, parse_topology};

/// Load and join the local data files once at startup so a
/// misconfigured deployment fails loudly in the logs. The client
/// reports its own load failures to the user, so serving continues
/// either way.
pub fn run(data_dir: &str) {
    match check(data_dir, &DashboardConfig::default()) {
        Ok(report) => info!(
            regions = report.regions,
            records = report.records,
            matched = report.matched,
            "dashboard data validated"
        ),
        Err(e) => warn!("dashboard data check failed: {e}"),
    }
}

#[derive(Debug)]
pub(crate) struct DataReport {
    pub regions: usize,
    pub records: usize,
    pub matched: usize,
}

pub(crate) fn check(data_dir: &str, config: &DashboardConfig) -> Result<DataReport, DataError> {
    let stats = read(data_dir, crate::config::STATS_FILE, "statistics csv")?;
    let boundaries = read(data_dir, crate::config::BOUNDARY_FILE, "boundary topojson")?;

    let records = parse_stats_csv(stats.as_bytes(), &config.key_column, &config.name_column)?;
    let mut regions = parse_topology(
        &boundaries,
        &config.object_name,
        &config.key_column,
        &config.geo_name_property,
    )?;
    join_records(&mut regions, &records, &config.attribute_keys());

    Ok(DataReport {
        regions: regions.len(),
        records: records.len(),
        matched: regions.iter().filter(|r| !r.properties.is_empty()).count(),
    })
}

fn read(data_dir: &str, file: &str, resource: &str) -> Result<String, DataError> {
    let path = Path::new(data_dir).join(file);
    std::fs::read_to_string(&path).map_err(|e| DataError::load(resource, e))
}
