use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::harvest::error::HarvestError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    pub files: usize,
    pub size_bytes: u64,
}

impl ArchiveSummary {
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / (1024.0 * 1024.0)
    }
}

/// `<dir>.zip`, next to the directory
pub fn archive_path(dir: &Path) -> PathBuf {
    let dir: PathBuf = dir.components().collect();
    let mut name = dir.into_os_string();
    name.push(".zip");
    PathBuf::from(name)
}

/// Regular files under `dir`, in a stable order
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>, HarvestError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn write_archive(dir: &Path, target: &Path) -> Result<ArchiveSummary, HarvestError> {
    let files = list_files(dir)?;
    let mut zip = ZipWriter::new(BufWriter::new(File::create(target)?));
    let options = SimpleFileOptions::default();

    for path in &files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!("Adding {} to {}", name, target.display());

        zip.start_file(name, options)?;
        let mut source = File::open(path)?;
        std::io::copy(&mut source, &mut zip)?;
    }
    zip.finish()?;

    Ok(ArchiveSummary {
        path: target.to_path_buf(),
        files: files.len(),
        size_bytes: std::fs::metadata(target)?.len(),
    })
}

/// Write every file under `dir` into a new `<dir>.zip`.
///
/// Entries are named by file name only, so nested files with the same name
/// would collide in the archive.
pub async fn archive_directory(dir: &Path) -> Result<ArchiveSummary, HarvestError> {
    let dir = dir.to_path_buf();
    let target = archive_path(&dir);
    tokio::task::spawn_blocking(move || write_archive(&dir, &target)).await?
}
