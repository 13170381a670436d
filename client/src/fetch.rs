use coropleta_shared::{
    DashboardConfig, DataError, RegionFeature, join_records, parse_stats_csv, parse_topology,
};

/// The joined record set the whole dashboard renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedData {
    pub regions: Vec<RegionFeature>,
}

async fn fetch_text(url: &str, resource: &str) -> Result<String, DataError> {
    let resp = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| DataError::load(resource, e))?;
    if !resp.ok() {
        return Err(DataError::load(resource, format!("HTTP {}", resp.status())));
    }
    resp.text().await.map_err(|e| DataError::load(resource, e))
}

/// Fetch the statistics CSV and the boundary TopoJSON concurrently,
/// parse both, and join the rows into the features. The load fails as a
/// whole if either resource fails; there is no retry and no partial
/// render.
pub async fn load_dashboard(config: &DashboardConfig) -> Result<LoadedData, DataError> {
    let (stats, boundaries) = futures::join!(
        fetch_text(&config.stats_url, "statistics csv"),
        fetch_text(&config.boundaries_url, "boundary topojson"),
    );
    let stats = stats?;
    let boundaries = boundaries?;

    let records = parse_stats_csv(stats.as_bytes(), &config.key_column, &config.name_column)?;
    let mut regions = parse_topology(
        &boundaries,
        &config.object_name,
        &config.key_column,
        &config.geo_name_property,
    )?;
    join_records(&mut regions, &records, &config.attribute_keys());

    Ok(LoadedData { regions })
}
