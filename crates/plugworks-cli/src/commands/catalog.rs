//! Expected service catalog listing.

use serde::Serialize;
use tabled::Tabled;

use plugworks_core::AppError;
use plugworks_sdk::framework::SERVICE_SET;

use crate::output::{self, OutputFormat};

/// Catalog display row
#[derive(Debug, Serialize, Tabled)]
struct CatalogRow {
    /// Service key
    key: &'static str,
    /// Description
    description: &'static str,
}

/// Execute the catalog command
pub async fn execute(format: OutputFormat) -> Result<(), AppError> {
    let rows: Vec<CatalogRow> = SERVICE_SET
        .iter()
        .map(|(key, description)| CatalogRow { key, description })
        .collect();
    output::print_list(&rows, format);
    Ok(())
}
