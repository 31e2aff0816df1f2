//! Dashboard and data-management commands.
//!
//! # Usage
//!
//! ```bash
//! # Pipeline summary
//! trackflow dashboard
//!
//! # Download all data as trackflow-export-<date>.json
//! trackflow export
//!
//! # Restore a previous export
//! trackflow import trackflow-export-2026-10-18.json
//!
//! # Erase everything (asks first)
//! trackflow clear
//! ```

use std::path::{Path, PathBuf};

use dialoguer::Confirm;
use dialoguer::theme::ColorfulTheme;
use trackflow_core::ExportBundle;

use super::Store;
use crate::error::CliError;
use crate::output::{self, Output};

/// Print the dashboard summary.
pub fn dashboard(store: &Store, out: Output) -> Result<(), CliError> {
    let summary = store.dashboard_summary();
    out.emit(&summary, || output::dashboard(&summary))
}

/// Write the raw slots to `output`, or to a dated file in the working
/// directory.
pub fn export(store: &Store, output: Option<PathBuf>, out: Output) -> Result<(), CliError> {
    let bundle = store.export()?;
    let path = output.unwrap_or_else(|| {
        PathBuf::from(ExportBundle::file_name(chrono::Local::now().date_naive()))
    });
    std::fs::write(&path, bundle.to_json()?).map_err(|source| file_error(&path, source))?;

    tracing::info!(path = %path.display(), "data exported");
    out.emit(&serde_json::json!({ "path": path.display().to_string() }), || {
        format!("exported data to {}", path.display())
    })
}

/// Replace all data with a previously exported bundle.
pub fn import(store: &mut Store, path: &Path, out: Output) -> Result<(), CliError> {
    let raw = std::fs::read_to_string(path).map_err(|source| file_error(path, source))?;
    let bundle = ExportBundle::from_json(&raw)?;
    store.import(&bundle)?;

    let counts = serde_json::json!({
        "leads": store.leads().len(),
        "orders": store.orders().len(),
        "reminders": store.reminders().len(),
    });
    out.emit(&counts, || {
        format!(
            "imported {} lead(s), {} order(s), {} reminder(s)",
            store.leads().len(),
            store.orders().len(),
            store.reminders().len()
        )
    })
}

/// Erase every slot after confirmation. `assume_yes` skips the prompt.
pub fn clear(store: &mut Store, assume_yes: bool, out: Output) -> Result<(), CliError> {
    if !assume_yes && !confirm_clear()? {
        tracing::info!("clear cancelled");
        return out.emit(&serde_json::json!({ "cleared": false }), || {
            "cancelled; nothing was deleted".to_owned()
        });
    }

    store.clear_all()?;
    out.emit(&serde_json::json!({ "cleared": true }), || {
        "all data cleared".to_owned()
    })
}

fn confirm_clear() -> Result<bool, CliError> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Are you sure you want to clear all data? This action cannot be undone.")
        .default(false)
        .interact()?)
}

fn file_error(path: &Path, source: std::io::Error) -> CliError {
    CliError::File {
        path: path.display().to_string(),
        source,
    }
}
