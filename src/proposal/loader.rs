//! Load proposals from a CSV export

use super::{LoanTerms, Proposal, ProposalError};
use csv::Reader;
use std::path::Path;

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "ProposalID")]
    proposal_id: String,
    #[serde(rename = "Principal")]
    principal: f64,
    #[serde(rename = "Installments")]
    installments: u32,
    #[serde(rename = "InstallmentValue")]
    installment_value: f64,
}

impl From<CsvRow> for Proposal {
    fn from(row: CsvRow) -> Self {
        Proposal {
            proposal_id: row.proposal_id,
            terms: LoanTerms::new(row.principal, row.installments, row.installment_value),
        }
    }
}

/// Load all proposals from a CSV file
pub fn load_proposals<P: AsRef<Path>>(path: P) -> Result<Vec<Proposal>, ProposalError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let proposals = load_proposals_from_reader(file)?;
    log::info!("loaded {} proposals from {}", proposals.len(), path.display());
    Ok(proposals)
}

/// Load proposals from any reader (e.g., string buffer, upload stream)
pub fn load_proposals_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Proposal>, ProposalError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut proposals = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        proposals.push(row.into());
    }

    Ok(proposals)
}
