use crate::error::{AccountError, Result};
use crate::model::AccountData;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read a JSON array of account records. A record's `id`, if present, is ignored.
pub fn load_account_data(path: &Path) -> Result<Vec<AccountData>> {
    let fixture_error = |message: String| AccountError::Fixture {
        path: path.to_path_buf(),
        message,
    };

    let contents = fs::read_to_string(path).map_err(|e| fixture_error(e.to_string()))?;
    let records: Vec<AccountData> =
        serde_json::from_str(&contents).map_err(|e| fixture_error(e.to_string()))?;

    debug!(path = %path.display(), count = records.len(), "Loaded account fixtures");
    Ok(records)
}
