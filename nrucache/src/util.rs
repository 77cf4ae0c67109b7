use std::error::Error;
use std::fs;
use regex::Regex;

pub const SAMPLE_CONFIGS_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/sample-data/configs");
pub const SAMPLE_TRACES_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/sample-data/traces");
pub const SAMPLE_REPORTS_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/sample-data/reports");

pub struct TestCasePaths {
    pub config: String,
    pub trace: String,
    pub report: String,
}

/// Finds the sample cases. Each expected report is named `report-<trace>-<config>.rpt`, and names
/// the trace and configuration it was produced from
pub fn get_configs() -> Result<Vec<TestCasePaths>, Box<dyn Error>> {
    let mut out = Vec::new();
    let report_pattern = Regex::new(r"^report-(?P<trace>[0-9a-zA-Z_]+)-(?P<config>[0-9a-zA-Z_]+)\.rpt$")?;
    let mut file_names = Vec::new();
    for entry in fs::read_dir(SAMPLE_REPORTS_PATH)? {
        let file_name = entry?.file_name().into_string().map_err(|e| format!("Can't convert OS string ({e:?}) to standard string"))?;
        if report_pattern.is_match(&file_name) {
            file_names.push(file_name);
        }
    }
    file_names.sort();
    for file_name in file_names {
        // Get components of name
        let tokens = report_pattern.captures(&file_name).ok_or("Couldn't parse the file name".to_string())?;
        let trace = tokens.name("trace").ok_or("Couldn't get the trace file from the report file name".to_string())?.as_str();
        let config = tokens.name("config").ok_or("Couldn't get the config file from the report file name".to_string())?.as_str();
        // A config may be given in either format
        let org = format!("{SAMPLE_CONFIGS_PATH}/{config}.org");
        let config = if fs::metadata(&org).is_ok() { org } else { format!("{SAMPLE_CONFIGS_PATH}/{config}.json") };
        out.push(TestCasePaths {
            config,
            trace: format!("{SAMPLE_TRACES_PATH}/{trace}.lst"),
            report: format!("{SAMPLE_REPORTS_PATH}/{file_name}"),
        })
    }
    Ok(out)
}
