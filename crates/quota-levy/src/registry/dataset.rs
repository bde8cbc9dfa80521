use std::collections::HashSet;
use std::io::Read;

use serde::{Deserialize, Deserializer};

use crate::levy::Sector;

use super::domain::{CompanyId, CompanyProfile};

/// Sales-targeting dataset shipped with the crate.
pub const BUNDLED_COMPANIES: &str = include_str!("../../data/companies.csv");

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to parse company dataset: {0}")]
    Csv(#[from] csv::Error),
    #[error("duplicate company id {0} in dataset")]
    DuplicateId(CompanyId),
}

pub fn bundled_companies() -> Result<Vec<CompanyProfile>, DatasetError> {
    parse_companies(BUNDLED_COMPANIES.as_bytes())
}

pub fn parse_companies<R: Read>(reader: R) -> Result<Vec<CompanyProfile>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut companies = Vec::new();
    let mut seen = HashSet::new();

    for record in csv_reader.deserialize::<CompanyRow>() {
        let row = record?;
        let id = CompanyId(row.id);
        if !seen.insert(id) {
            return Err(DatasetError::DuplicateId(id));
        }
        companies.push(row.into_profile());
    }

    Ok(companies)
}

#[derive(Debug, Deserialize)]
struct CompanyRow {
    id: u64,
    name: String,
    industry: String,
    industry_code: String,
    region: String,
    sector: Sector,
    total_workers: u32,
    hired_count: u32,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    contact: Option<String>,
}

impl CompanyRow {
    fn into_profile(self) -> CompanyProfile {
        CompanyProfile {
            id: CompanyId(self.id),
            name: self.name,
            industry: self.industry,
            industry_code: self.industry_code,
            region: self.region,
            sector: self.sector,
            total_workers: self.total_workers,
            hired_count: self.hired_count,
            contact: self.contact,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|value| !value.trim().is_empty()))
}
