//! Local archive of fetched workspace documents.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::config::ArchiveLocation;

/// File name of an archived workspace: `structurizr-<id>-<UTC timestamp>.json`.
pub(crate) fn archive_file_name(workspace_id: i64, timestamp: DateTime<Utc>) -> String {
    format!(
        "structurizr-{workspace_id}-{}.json",
        timestamp.format("%Y%m%d%H%M%S")
    )
}

/// Writes `document` into the archive directory.
///
/// Returns the path of the archive file, or `None` when archiving is
/// disabled. The directory is created if it does not exist.
pub(crate) fn archive_workspace(
    location: &ArchiveLocation,
    workspace_id: i64,
    document: &str,
    timestamp: DateTime<Utc>,
) -> io::Result<Option<PathBuf>> {
    let Some(directory) = location.directory() else {
        debug!(workspace_id = workspace_id; "Workspace archiving is disabled");
        return Ok(None);
    };

    let path = write_archive(directory, &archive_file_name(workspace_id, timestamp), document)?;
    info!(workspace_id = workspace_id, path = path.display().to_string(); "Archived workspace");
    Ok(Some(path))
}

fn write_archive(directory: &Path, file_name: &str, document: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(directory)?;
    let path = directory.join(file_name);
    fs::write(&path, document)?;
    Ok(path)
}
