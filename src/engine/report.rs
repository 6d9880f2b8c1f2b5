use std::{
	fs,
	io::{self, Write},
	path::PathBuf,
};

use tempfile::NamedTempFile;
use tracing::info;

pub const REPORT_FILE_NAME: &str = "report.csv";

/// Saves downloaded report blobs into a directory as `report.csv`.
#[derive(Debug, Clone)]
pub struct ReportSaver {
	dir: PathBuf,
}

impl ReportSaver {
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self { dir: dir.into() }
	}

	/// Write through a temporary file in the target directory, then rename it
	/// into place. The temporary file is removed on drop if anything fails,
	/// so nothing but the finished report is left behind.
	pub fn save(&self, bytes: &[u8]) -> io::Result<PathBuf> {
		fs::create_dir_all(&self.dir)?;
		let mut staged = NamedTempFile::new_in(&self.dir)?;
		staged.write_all(bytes)?;
		staged.as_file().sync_all()?;

		let target = self.dir.join(REPORT_FILE_NAME);
		staged.persist(&target).map_err(|e| e.error)?;
		info!("saved report ({} bytes) to {:?}", bytes.len(), target);
		Ok(target)
	}

	/// Same as [`save`](Self::save) but off the UI thread.
	pub async fn save_async(&self, bytes: Vec<u8>) -> io::Result<PathBuf> {
		let saver = self.clone();
		tokio::task::spawn_blocking(move || saver.save(&bytes))
			.await
			.map_err(|e| io::Error::other(format!("task join error: {e}")))?
	}
}
