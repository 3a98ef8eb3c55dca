//! Delimited channel report: one row per program with satellite,
//! frequency, polarization, symbol rate and the resolved provider.

use std::path::Path;

use crate::database::Database;
use crate::error::AppError;
use crate::provider::ProviderResolver;

/// Write the channel report to `target` as CSV. Returns the number of
/// data rows written.
pub fn export_channels_csv(
    db: &Database,
    resolver: &ProviderResolver,
    target: &Path,
) -> Result<usize, AppError> {
    let rows = db.channel_rows()?;

    let mut writer = csv::Writer::from_path(target)?;
    writer.write_record([
        "channel",
        "satellite",
        "frequency",
        "polarization",
        "symbol_rate",
        "network",
        "provider",
    ])?;

    let mut written = 0;
    for row in &rows {
        let provider = if row.has_usable_name() {
            row.network_name.clone().unwrap_or_else(|| {
                resolver
                    .resolve_channel_or_unknown(&row.name, &row.satellite, row.angle, row.frequency)
                    .to_string()
            })
        } else {
            String::new()
        };
        writer.write_record([
            row.name.as_str(),
            row.satellite.as_str(),
            &row.frequency.to_string(),
            &row.polarization.to_string(),
            &row.symbol_rate.map(|s| s.to_string()).unwrap_or_default(),
            row.network_name.as_deref().unwrap_or(""),
            &provider,
        ])?;
        written += 1;
    }
    writer.flush().map_err(|e| AppError::Io(e.to_string()))?;

    log::info!("Exported {} channel rows to {}", written, target.display());
    Ok(written)
}
