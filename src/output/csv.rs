use super::CsvReport;

use std::path::{Path, PathBuf};
use tracing::info;

/// Error types for writing report files
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
	#[error("CSV error: {0}")]
	Csv(#[from] ::csv::Error),

	#[error("Failed to write {path}: {source}")]
	Io {
		path: String,
		#[source]
		source: std::io::Error,
	},
}

/// Serialize a report into CSV bytes, headers first.
pub fn render_csv(report: &dyn CsvReport) -> Result<Vec<u8>, OutputError> {
	let mut writer = ::csv::Writer::from_writer(Vec::new());
	writer.write_record(report.headers())?;
	for row in report.rows() {
		writer.write_record(&row)?;
	}
	writer
		.into_inner()
		.map_err(|err| OutputError::Csv(err.into_error().into()))
}

/// Sibling of `path` the report is written to before it is moved into place.
fn staging_path(path: &Path) -> PathBuf {
	let mut staging = path.as_os_str().to_owned();
	staging.push(".partial");
	PathBuf::from(staging)
}

/// Write a report to `path`, creating missing parent directories.
///
/// The file is rendered in memory, written next to `path` and renamed over it, so
/// `path` only ever holds a complete report.
pub async fn write_csv(report: &dyn CsvReport, path: &Path) -> Result<usize, OutputError> {
	let bytes = render_csv(report)?;
	let io_error = |source| OutputError::Io {
		path: path.display().to_string(),
		source,
	};

	if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
		tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
	}

	let staging = staging_path(path);
	tokio::fs::write(&staging, &bytes).await.map_err(io_error)?;
	if let Err(source) = tokio::fs::rename(&staging, path).await {
		let _ = tokio::fs::remove_file(&staging).await;
		return Err(io_error(source));
	}

	info!("Wrote {} bytes to {}", bytes.len(), path.display());
	Ok(bytes.len())
}
