// Open-File Registry
//
// Ordered set of open files keyed by path, plus at most one active selection.
// Every operation is a synchronous read-modify-write; the file fetch that
// precedes `open` happens in the controller.

use crate::models::OpenFile;

#[derive(Debug, Clone, Default)]
pub struct OpenFileRegistry {
    /// Tab order equals first-open order
    entries: Vec<OpenFile>,
    /// Always references an existing entry when set
    active: Option<String>,
}

impl OpenFileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[OpenFile] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&OpenFile> {
        self.entries.iter().find(|f| f.path == path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn active_path(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active_entry(&self) -> Option<&OpenFile> {
        self.active.as_deref().and_then(|path| self.get(path))
    }

    /// Record freshly read content and make it active.
    /// An already-open path is refreshed in place, never duplicated.
    pub fn open(&mut self, path: &str, content: String) -> &OpenFile {
        let index = self.upsert(path, content);
        self.active = Some(path.to_string());
        log::debug!("[registry] Opened {} ({} open)", path, self.entries.len());
        &self.entries[index]
    }

    /// Store fetched content without touching the selection
    pub fn refresh(&mut self, path: &str, content: String) {
        self.upsert(path, content);
    }

    /// Generated content for a named file: append if new, replace if present,
    /// then make it active
    pub fn upsert_generated(&mut self, path: &str, content: String) -> &OpenFile {
        let index = self.upsert(path, content);
        self.active = Some(path.to_string());
        &self.entries[index]
    }

    /// Make an open entry active. Unknown paths leave the selection alone.
    pub fn activate(&mut self, path: &str) -> Option<&OpenFile> {
        if !self.contains(path) {
            return None;
        }
        self.active = Some(path.to_string());
        self.get(path)
    }

    /// Replace an entry's content without changing order or selection.
    /// Returns false if the path is not open.
    pub fn set_active_content(&mut self, path: &str, content: String) -> bool {
        match self.entries.iter_mut().find(|f| f.path == path) {
            Some(entry) => {
                entry.content = content;
                true
            }
            None => false,
        }
    }

    /// Remove an entry. Closing the active entry re-points the selection to
    /// the first remaining entry, or clears it when none remain.
    /// Returns `None` if the path was not open.
    pub fn close(&mut self, path: &str) -> Option<CloseOutcome> {
        let index = self.entries.iter().position(|f| f.path == path)?;
        let removed = self.entries.remove(index);

        let was_active = self.active.as_deref() == Some(path);
        if was_active {
            self.active = self.entries.first().map(|f| f.path.clone());
        }

        Some(CloseOutcome {
            removed,
            was_active,
            new_active: if was_active {
                self.entries.first().cloned()
            } else {
                None
            },
        })
    }

    /// Index of the written entry
    fn upsert(&mut self, path: &str, content: String) -> usize {
        match self.entries.iter().position(|f| f.path == path) {
            Some(index) => {
                self.entries[index].content = content;
                index
            }
            None => {
                self.entries.push(OpenFile {
                    path: path.to_string(),
                    content,
                });
                self.entries.len() - 1
            }
        }
    }
}

/// What `close` did to the selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseOutcome {
    pub removed: OpenFile,
    pub was_active: bool,
    /// Entry that became active, when the closed one was active and others remain
    pub new_active: Option<OpenFile>,
}
