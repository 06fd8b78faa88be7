use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::document::DocumentFormat;
use crate::error::{LoadError, LoadResult};
use crate::story::Story;

/// Every story available to readers, keyed by title.
///
/// Built once at startup and never mutated afterwards; share it with
/// `Arc<Catalog>`.
#[derive(Debug, Clone)]
pub struct Catalog {
    stories: BTreeMap<String, Story>,
}

impl Catalog {
    /// Build a catalog from validated stories.
    pub fn from_stories(stories: impl IntoIterator<Item = Story>) -> LoadResult<Self> {
        let mut by_title = BTreeMap::new();
        for story in stories {
            if by_title.contains_key(story.title()) {
                return Err(LoadError::DuplicateTitle(story.title().to_string()));
            }
            by_title.insert(story.title().to_string(), story);
        }

        if by_title.is_empty() {
            return Err(LoadError::NoStories("story list".to_string()));
        }

        Ok(Self { stories: by_title })
    }

    /// Load every `.yaml`, `.yml` and `.json` story document in `dir`.
    ///
    /// Files are read in path order. Any unreadable, unparsable or invalid
    /// document fails the whole load.
    pub fn load_dir(dir: &Path) -> LoadResult<Self> {
        let entries = std::fs::read_dir(dir).map_err(|error| LoadError::ReadDir {
            path: dir.to_path_buf(),
            error,
        })?;

        let mut files = documents(dir, entries.map(|e| e.map(|e| e.path())))?;

        // Sort for deterministic ordering
        files.sort_by(|a, b| a.0.cmp(&b.0));

        if files.is_empty() {
            return Err(LoadError::NoStories(dir.display().to_string()));
        }

        let mut stories = Vec::with_capacity(files.len());
        for (path, format) in files {
            let source = std::fs::read_to_string(&path).map_err(|error| LoadError::ReadFile {
                path: path.clone(),
                error,
            })?;
            let document = format
                .parse(&source)
                .map_err(|message| LoadError::Parse {
                    path: path.clone(),
                    message,
                })?;
            let title = document.title.clone();
            let story = document
                .into_story()
                .map_err(|problem| LoadError::Invalid { title, problem })?;

            tracing::debug!(
                path = %path.display(),
                title = story.title(),
                pages = story.page_count(),
                "loaded story"
            );
            stories.push(story);
        }

        let catalog = Self::from_stories(stories)?;
        tracing::info!(
            dir = %dir.display(),
            stories = catalog.len(),
            "story catalog ready"
        );
        Ok(catalog)
    }

    /// Look up a story by exact title.
    pub fn get(&self, title: &str) -> Option<&Story> {
        self.stories.get(title)
    }

    /// Whether a story with this exact title exists.
    pub fn contains(&self, title: &str) -> bool {
        self.stories.contains_key(title)
    }

    /// Story titles in sorted order.
    pub fn titles(&self) -> Vec<&str> {
        self.stories.keys().map(String::as_str).collect()
    }

    /// All stories, ordered by title.
    pub fn stories(&self) -> impl Iterator<Item = &Story> {
        self.stories.values()
    }

    /// Number of stories.
    pub fn len(&self) -> usize {
        self.stories.len()
    }

    /// Always false for a successfully loaded catalog.
    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }
}

/// Story documents among `paths`, failing on the first unreadable entry.
fn documents(
    dir: &Path,
    paths: impl IntoIterator<Item = io::Result<PathBuf>>,
) -> LoadResult<Vec<(PathBuf, DocumentFormat)>> {
    let mut files = Vec::new();
    for path in paths {
        let path = path.map_err(|error| LoadError::ReadDir {
            path: dir.to_path_buf(),
            error,
        })?;
        if !path.is_file() {
            continue;
        }
        if let Some(format) = DocumentFormat::from_path(&path) {
            files.push((path, format));
        }
    }
    Ok(files)
}
