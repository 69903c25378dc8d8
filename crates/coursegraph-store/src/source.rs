//! Source file reader and writer.
//!
//! [`ContentStore`] owns the content root, the shared [`ContentIndex`] and
//! the per-course locks. Reads always go to disk; writes overwrite whole
//! files and update the index in place.

use std::path::{Path, PathBuf};

use coursegraph_core::{
    Config, ContentKind,
    frontmatter::{parse_frontmatter, render_frontmatter},
    validate_id,
};
use serde::{Serialize, de::DeserializeOwned};
use tokio::{fs, sync::RwLock};
use tracing::{debug, info, warn};

use crate::{
    error::{Result, StoreError},
    index::{ContentIndex, IndexEntry},
    locks::CourseLocks,
};

/// A parsed content file.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile<T> {
    /// Deserialized front-matter header.
    pub frontmatter: T,

    /// Body with surrounding whitespace trimmed.
    pub content: String,
}

/// State of one id before a write, used to undo that write.
#[derive(Debug, Clone)]
pub struct Snapshot {
    id: String,
    previous: Option<(IndexEntry, Option<Vec<u8>>)>,
}

/// Relative path of a content file.
///
/// Courses live at `content/{id}/course.yaml`; units and pages at
/// `content/{parent}/pages/{id}.mdx`.
pub fn source_path(kind: ContentKind, id: &str, parent_id: Option<&str>) -> Result<PathBuf> {
    validate_id(id)?;
    match kind {
        ContentKind::Course => Ok(Path::new("content").join(id).join("course.yaml")),
        ContentKind::Unit | ContentKind::Page => {
            let parent = parent_id
                .filter(|p| !p.is_empty())
                .ok_or_else(|| StoreError::MissingParent {
                    kind,
                    id: id.to_string(),
                })?;
            validate_id(parent)?;
            Ok(Path::new("content")
                .join(parent)
                .join("pages")
                .join(format!("{id}.mdx")))
        }
    }
}

/// File-backed content store.
#[derive(Debug)]
pub struct ContentStore {
    root: PathBuf,
    index: RwLock<ContentIndex>,
    locks: CourseLocks,
}

impl ContentStore {
    /// Create a store over `root` with an existing index.
    pub fn new(root: impl Into<PathBuf>, index: ContentIndex) -> Self {
        Self {
            root: root.into(),
            index: RwLock::new(index),
            locks: CourseLocks::new(),
        }
    }

    /// Build the index as configured and open the store.
    pub async fn open(config: &Config) -> Result<Self> {
        let root = config.content.root.clone();

        let index = match &config.index.provider {
            Some(command) => ContentIndex::from_provider(command, &root).await?,
            None => {
                let scan_root = root.clone();
                tokio::task::spawn_blocking(move || ContentIndex::scan(&scan_root))
                    .await
                    .map_err(|e| StoreError::Io(std::io::Error::other(e)))??
            }
        };

        Ok(Self::new(root, index))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn locks(&self) -> &CourseLocks {
        &self.locks
    }

    /// Current index entry for an id.
    pub async fn entry(&self, id: &str) -> Option<IndexEntry> {
        self.index.read().await.get(id).cloned()
    }

    /// Ids of one kind in index order.
    pub async fn ids_of(&self, kind: ContentKind) -> Vec<String> {
        self.index.read().await.ids_of(kind)
    }

    /// Copy of the whole index.
    pub async fn index(&self) -> ContentIndex {
        self.index.read().await.clone()
    }

    /// Read and parse the file behind `id`.
    ///
    /// Returns `None` when the id is not indexed, is indexed as another
    /// kind, or its file has disappeared.
    pub async fn read<T>(&self, id: &str, kind: ContentKind) -> Result<Option<SourceFile<T>>>
    where
        T: DeserializeOwned + Default,
    {
        let Some(entry) = self.entry(id).await.filter(|e| e.typename == kind) else {
            return Ok(None);
        };

        let path = self.root.join(&entry.filepath);
        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(id, path = %path.display(), "indexed file is missing");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let (frontmatter, content) = parse_frontmatter(&raw, &path)?;
        Ok(Some(SourceFile {
            frontmatter,
            content,
        }))
    }

    /// Serialize and write a content file, then index it.
    ///
    /// The target directory must already exist.
    pub async fn write<T: Serialize>(
        &self,
        id: &str,
        kind: ContentKind,
        frontmatter: &T,
        content: Option<&str>,
        parent_id: Option<&str>,
    ) -> Result<()> {
        let filepath = source_path(kind, id, parent_id)?;
        let output = render_frontmatter(frontmatter, content.unwrap_or_default())?;

        fs::write(self.root.join(&filepath), output).await?;
        debug!(id, kind = %kind, path = %filepath.display(), "wrote content file");

        self.index
            .write()
            .await
            .insert(id, IndexEntry::new(kind, filepath));
        Ok(())
    }

    /// Fail if `id` is already indexed as a different kind.
    pub async fn ensure_id_available(&self, id: &str, kind: ContentKind) -> Result<()> {
        match self.entry(id).await {
            Some(entry) if entry.typename != kind => Err(StoreError::IdCollision {
                id: id.to_string(),
                existing: entry.typename,
                requested: kind,
            }),
            _ => Ok(()),
        }
    }

    /// Create `content/{id}` and `content/{id}/pages`.
    pub async fn setup_course_dirs(&self, id: &str) -> Result<()> {
        validate_id(id)?;
        let pages = self.root.join("content").join(id).join("pages");
        fs::create_dir_all(&pages).await?;
        info!(course = id, "set up course directory");
        Ok(())
    }

    /// Drop `id` from the index and delete its file.
    ///
    /// The index entry is removed even when the file cannot be deleted;
    /// that failure is returned to the caller.
    pub async fn delete(&self, id: &str) -> Result<Option<IndexEntry>> {
        let Some(entry) = self.index.write().await.remove(id) else {
            return Ok(None);
        };

        let path = self.root.join(&entry.filepath);
        fs::remove_file(&path).await?;
        debug!(id, path = %path.display(), "deleted content file");
        Ok(Some(entry))
    }

    /// Capture what `id` looks like now so a following write can be undone.
    pub async fn snapshot(&self, id: &str) -> Result<Snapshot> {
        let previous = match self.entry(id).await {
            Some(entry) => {
                let bytes = match fs::read(self.root.join(&entry.filepath)).await {
                    Ok(bytes) => Some(bytes),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
                    Err(e) => return Err(e.into()),
                };
                Some((entry, bytes))
            }
            None => None,
        };

        Ok(Snapshot {
            id: id.to_string(),
            previous,
        })
    }

    /// Put `id` back the way [`snapshot`](Self::snapshot) found it.
    pub async fn restore(&self, snapshot: Snapshot) -> Result<()> {
        let Snapshot { id, previous } = snapshot;
        let current = self.entry(&id).await;

        match previous {
            Some((entry, bytes)) => {
                if let Some(current) = current
                    && current.filepath != entry.filepath
                {
                    remove_if_present(&self.root.join(&current.filepath)).await?;
                }
                if let Some(bytes) = bytes {
                    fs::write(self.root.join(&entry.filepath), bytes).await?;
                }
                self.index.write().await.insert(id.as_str(), entry);
            }
            None => {
                if let Some(current) = current {
                    remove_if_present(&self.root.join(&current.filepath)).await?;
                }
                self.index.write().await.remove(&id);
            }
        }

        info!(id = %id, "restored content after failed write");
        Ok(())
    }
}

async fn remove_if_present(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
