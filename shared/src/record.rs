use std::collections::HashMap;

use crate::error::DataError;

/// One row of the statistics table: the administrative code it is keyed
/// by, the display name, and every cell by column name as an untouched
/// string. Numeric coercion happens at join time, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatRecord {
    pub code: String,
    pub name: String,
    pub values: HashMap<String, String>,
}

impl StatRecord {
    pub fn raw(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }
}

/// Parse the statistics CSV. The key column must exist in the header;
/// a malformed row fails the whole load rather than being skipped.
pub fn parse_stats_csv(
    bytes: &[u8],
    key_column: &str,
    name_column: &str,
) -> Result<Vec<StatRecord>, DataError> {
    let mut reader = csv::Reader::from_reader(bytes);
    let headers = reader
        .headers()
        .map_err(|e| DataError::load("statistics csv", e))?
        .clone();
    if !headers.iter().any(|h| h == key_column) {
        return Err(DataError::load(
            "statistics csv",
            format!("missing key column \"{key_column}\""),
        ));
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| DataError::load("statistics csv", e))?;
        let mut values = HashMap::with_capacity(headers.len());
        for (header, cell) in headers.iter().zip(row.iter()) {
            values.insert(header.to_string(), cell.to_string());
        }
        let code = values.get(key_column).cloned().unwrap_or_default();
        let name = values.get(name_column).cloned().unwrap_or_default();
        records.push(StatRecord { code, name, values });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::parse_stats_csv;

    const SAMPLE: &[u8] = b"\
adm1_code,State,CrimeRate,MurderRate
MX-01,Alpha,10,1.5
MX-02,Beta,abc,0
";

    #[test]
    fn rows_keep_every_cell_as_raw_text() {
        let records = parse_stats_csv(SAMPLE, "adm1_code", "State").expect("csv should parse");
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].code, "MX-01");
        assert_eq!(records[0].name, "Alpha");
        assert_eq!(records[0].raw("CrimeRate"), Some("10"));
        assert_eq!(records[0].raw("MurderRate"), Some("1.5"));

        assert_eq!(records[1].raw("CrimeRate"), Some("abc"));
        assert_eq!(records[1].raw("MurderRate"), Some("0"));
    }

    #[test]
    fn unknown_column_reads_as_none() {
        let records = parse_stats_csv(SAMPLE, "adm1_code", "State").expect("csv should parse");
        assert_eq!(records[0].raw("Population"), None);
    }

    #[test]
    fn missing_key_column_fails_the_load() {
        let err = parse_stats_csv(b"State,CrimeRate\nAlpha,10\n", "adm1_code", "State")
            .expect_err("key column is required");
        assert!(err.to_string().contains("adm1_code"));
    }
}
