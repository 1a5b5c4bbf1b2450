//! Point-cloud JSON files and frame directories.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};
use voxel::Point;

/// On-disk point cloud: `{ "points": [[x, y, z], ...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointCloudFile {
    pub points: Vec<Point>,
}

/// Reads a JSON point cloud.
pub fn load_point_cloud(path: &Path) -> Result<Vec<Point>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read point cloud {}", path.display()))?;
    let file: PointCloudFile = serde_json::from_str(&contents)
        .with_context(|| format!("parse point cloud json {}", path.display()))?;
    Ok(file.points)
}

/// Writes a JSON point cloud.
pub fn write_point_cloud(path: &Path, points: &[Point]) -> Result<()> {
    let file = PointCloudFile {
        points: points.to_vec(),
    };
    let json = serde_json::to_string(&file).context("serialize point cloud")?;
    fs::write(path, json).with_context(|| format!("write point cloud {}", path.display()))
}

/// File name of the `index`-th frame of an encoded stream.
#[must_use]
pub fn frame_file_name(index: usize) -> String {
    format!("frame_{index:06}.pcc")
}

/// A file found in a frame directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameEntry {
    pub path: PathBuf,
    pub size: u64,
}

/// Lists regular files in `dir`, optionally filtered by a glob on the path or
/// file name, sorted by path.
pub fn list_frames(dir: &Path, glob: Option<&str>) -> Result<Vec<FrameEntry>> {
    let pattern = glob
        .map(|value| Pattern::new(value).context("invalid glob pattern"))
        .transpose()?;

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_path = pattern.matches_path(&path);
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches_path && !matches_name {
                continue;
            }
        }
        let size = entry.metadata()?.len();
        entries.push(FrameEntry { path, size });
    }
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}
