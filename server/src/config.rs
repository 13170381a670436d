pub const SERVER_PORT: u16 = 3000;
pub const CLIENT_DIST_DIR: &str = "client/dist";
pub const DEFAULT_DATA_DIR: &str = "data";

pub const STATS_FILE: &str = "mxStateStats.csv";
pub const BOUNDARY_FILE: &str = "mxStatePoly.topojson";

pub fn server_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(SERVER_PORT)
}

pub fn data_dir() -> String {
    std::env::var("COROPLETA_DATA_DIR")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())
}
