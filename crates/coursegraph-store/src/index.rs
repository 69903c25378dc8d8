//! Content index: content id to kind and file path.
//!
//! The index is built once at startup, either by scanning the `content/`
//! tree in-process or by running an external provider command that prints
//! the same JSON shape:
//!
//! ```json
//! { "new-testament": { "typename": "course", "filepath": "content/new-testament/course.yaml" } }
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use coursegraph_core::{ContentKind, frontmatter::parse_frontmatter};
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::{Result, StoreError};

/// File extensions that can carry indexed front-matter.
const INDEXED_EXTENSIONS: &[&str] = &["yaml", "yml", "md", "mdx"];

/// Where a content item lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Kind recorded in the item's front-matter.
    pub typename: ContentKind,

    /// Path of the file, relative to the content root.
    pub filepath: PathBuf,
}

impl IndexEntry {
    pub fn new(typename: ContentKind, filepath: impl Into<PathBuf>) -> Self {
        Self {
            typename,
            filepath: filepath.into(),
        }
    }
}

/// Insertion-ordered map from content id to its index entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentIndex {
    entries: IndexMap<String, IndexEntry>,
}

/// The two front-matter keys the scan needs.
#[derive(Debug, Default, Deserialize)]
struct IndexHeader {
    #[serde(default)]
    id: Option<String>,

    #[serde(rename = "type", default)]
    typename: Option<String>,
}

impl ContentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&IndexEntry> {
        self.entries.get(id)
    }

    /// Insert or replace an entry. A replaced entry keeps its position.
    pub fn insert(&mut self, id: impl Into<String>, entry: IndexEntry) -> Option<IndexEntry> {
        self.entries.insert(id.into(), entry)
    }

    /// Remove an entry, preserving the order of the rest.
    pub fn remove(&mut self, id: &str) -> Option<IndexEntry> {
        self.entries.shift_remove(id)
    }

    /// Ids of the given kind, in insertion order.
    pub fn ids_of(&self, kind: ContentKind) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.typename == kind)
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &IndexEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse the provider JSON shape.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render the provider JSON shape.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Scan `root/content` for files whose front-matter carries an `id` and
    /// a `type`.
    ///
    /// Files are parsed in parallel; entries are inserted in path order so
    /// the result does not depend on scheduling. When two files claim the
    /// same id the later path wins.
    pub fn scan(root: &Path) -> Result<Self> {
        let content_dir = root.join("content");
        info!(dir = %content_dir.display(), "scanning content");

        if !content_dir.exists() {
            warn!(dir = %content_dir.display(), "content directory missing, index is empty");
            return Ok(Self::new());
        }

        let files = find_indexed_files(&content_dir)?;
        debug!(count = files.len(), "found candidate files");

        let found: Vec<_> = files
            .par_iter()
            .filter_map(|path| match read_header(root, path) {
                Ok(found) => found,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to read front-matter");
                    None
                }
            })
            .collect();

        let mut index = Self::new();
        for (id, entry) in found {
            if let Some(previous) = index.get(&id) {
                warn!(
                    id = %id,
                    first = %previous.filepath.display(),
                    second = %entry.filepath.display(),
                    "duplicate content id"
                );
            }
            index.insert(id, entry);
        }

        info!(entries = index.len(), "content index built");
        Ok(index)
    }

    /// Run an external provider command in `root` and parse its output.
    ///
    /// The command line is split on whitespace; no shell is involved.
    pub async fn from_provider(command: &str, root: &Path) -> Result<Self> {
        let mut parts = command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| StoreError::Provider("empty provider command".to_string()))?;

        info!(command, root = %root.display(), "running index provider");

        let output = tokio::process::Command::new(program)
            .args(parts)
            .current_dir(root)
            .stdin(std::process::Stdio::null())
            .output()
            .await
            .map_err(|e| StoreError::Provider(format!("{program}: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(StoreError::Provider(format!(
                "{program} exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let index = Self::from_json(&stdout)?;
        info!(entries = index.len(), "content index loaded from provider");
        Ok(index)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

fn find_indexed_files(content_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(content_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
    {
        let entry = entry.map_err(|e| {
            StoreError::Io(e.into_io_error().unwrap_or_else(|| {
                std::io::Error::other("filesystem loop while scanning content")
            }))
        })?;

        if entry.file_type().is_file()
            && let Some(ext) = entry.path().extension().and_then(|e| e.to_str())
            && INDEXED_EXTENSIONS.contains(&ext.to_lowercase().as_str())
        {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn read_header(root: &Path, path: &Path) -> Result<Option<(String, IndexEntry)>> {
    let raw = fs::read_to_string(path)?;
    let (header, _body): (IndexHeader, String) = parse_frontmatter(&raw, path)?;

    let (Some(id), Some(typename)) = (header.id, header.typename) else {
        debug!(path = %path.display(), "no id/type in front-matter, skipping");
        return Ok(None);
    };

    let typename: ContentKind = match typename.parse() {
        Ok(kind) => kind,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "skipping file");
            return Ok(None);
        }
    };

    let filepath = path.strip_prefix(root).unwrap_or(path).to_path_buf();
    Ok(Some((id, IndexEntry::new(typename, filepath))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, content).expect("write");
    }

    fn sample_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dir.path();
        write(
            root,
            "content/new-testament/course.yaml",
            "---\nid: new-testament\ntype: course\ntitle: New Testament\n---\n",
        );
        write(
            root,
            "content/new-testament/pages/intro.mdx",
            "---\nid: intro\ntype: page\ntitle: Intro\n---\nHello\n",
        );
        write(
            root,
            "content/new-testament/pages/notes.md",
            "just notes, no front-matter\n",
        );
        write(
            root,
            "content/.drafts/secret.mdx",
            "---\nid: secret\ntype: page\n---\n",
        );
        write(root, "content/old/course.yaml", "---\nid: old\ntype: lesson\n---\n");
        dir
    }

    #[test]
    fn test_scan_indexes_front_matter() {
        let dir = sample_tree();
        let index = ContentIndex::scan(dir.path()).expect("scan");

        assert_eq!(index.len(), 2);
        assert_eq!(
            index.get("new-testament"),
            Some(&IndexEntry::new(
                ContentKind::Course,
                "content/new-testament/course.yaml"
            ))
        );
        assert_eq!(
            index.get("intro").map(|e| e.typename),
            Some(ContentKind::Page)
        );
        assert!(index.get("secret").is_none(), "hidden dirs are skipped");
        assert!(index.get("old").is_none(), "unknown types are skipped");
    }

    #[test]
    fn test_scan_missing_content_dir() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let index = ContentIndex::scan(dir.path()).expect("scan");
        assert!(index.is_empty());
    }

    #[test]
    fn test_ids_of_keeps_insertion_order() {
        let mut index = ContentIndex::new();
        index.insert("zeta", IndexEntry::new(ContentKind::Course, "content/zeta/course.yaml"));
        index.insert("p", IndexEntry::new(ContentKind::Page, "content/zeta/pages/p.mdx"));
        index.insert("alpha", IndexEntry::new(ContentKind::Course, "content/alpha/course.yaml"));

        assert_eq!(index.ids_of(ContentKind::Course), vec!["zeta", "alpha"]);

        index.remove("zeta");
        index.insert("zeta", IndexEntry::new(ContentKind::Course, "content/zeta/course.yaml"));
        assert_eq!(index.ids_of(ContentKind::Course), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{
            "nt": { "typename": "course", "filepath": "content/nt/course.yaml" },
            "intro": { "typename": "page", "filepath": "content/nt/pages/intro.mdx" }
        }"#;

        let index = ContentIndex::from_json(json).expect("parse");
        assert_eq!(index.ids_of(ContentKind::Page), vec!["intro"]);

        let rendered = index.to_json_pretty().expect("render");
        assert!(rendered.contains("\"typename\": \"course\""));
        assert_eq!(ContentIndex::from_json(&rendered).expect("reparse"), index);
    }

    #[tokio::test]
    async fn test_provider_failure_is_reported() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let result =
            ContentIndex::from_provider("coursegraph-no-such-provider-binary", dir.path()).await;

        assert!(matches!(result, Err(StoreError::Provider(_))));
    }
}
