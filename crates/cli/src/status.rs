use std::collections::BTreeMap;
use std::path::PathBuf;

use manualqa_ingest::SourceManual;

/// How the manual directory differs from what was indexed.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SourceChanges {
    pub added: Vec<PathBuf>,
    pub removed: Vec<PathBuf>,
    pub changed: Vec<PathBuf>,
}

impl SourceChanges {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

/// Compare indexed manuals with `(path, sha256)` pairs from the current directory.
pub fn diff_sources(indexed: &[SourceManual], current: &[(PathBuf, String)]) -> SourceChanges {
    let before: BTreeMap<&PathBuf, &str> =
        indexed.iter().map(|m| (&m.path, m.sha256.as_str())).collect();
    let now: BTreeMap<&PathBuf, &str> = current.iter().map(|(p, h)| (p, h.as_str())).collect();

    let mut changes = SourceChanges::default();
    for (path, hash) in &now {
        match before.get(path) {
            None => changes.added.push((*path).clone()),
            Some(old) if old != hash => changes.changed.push((*path).clone()),
            Some(_) => {}
        }
    }
    for path in before.keys() {
        if !now.contains_key(path) {
            changes.removed.push((*path).clone());
        }
    }
    changes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manual(path: &str, sha: &str) -> SourceManual {
        SourceManual {
            path: PathBuf::from(path),
            sha256: sha.into(),
            pages: 1,
            chunks: 1,
        }
    }

    #[test]
    fn unchanged_directory_has_no_changes() {
        let indexed = vec![manual("raw/a.pdf", "aa"), manual("raw/b.pdf", "bb")];
        let current = vec![
            (PathBuf::from("raw/a.pdf"), "aa".to_string()),
            (PathBuf::from("raw/b.pdf"), "bb".to_string()),
        ];
        assert!(diff_sources(&indexed, &current).is_empty());
    }

    #[test]
    fn reports_added_removed_and_changed() {
        let indexed = vec![manual("raw/a.pdf", "aa"), manual("raw/b.pdf", "bb")];
        let current = vec![
            (PathBuf::from("raw/a.pdf"), "a2".to_string()),
            (PathBuf::from("raw/c.pdf"), "cc".to_string()),
        ];
        let changes = diff_sources(&indexed, &current);
        assert_eq!(changes.changed, vec![PathBuf::from("raw/a.pdf")]);
        assert_eq!(changes.added, vec![PathBuf::from("raw/c.pdf")]);
        assert_eq!(changes.removed, vec![PathBuf::from("raw/b.pdf")]);
    }
}
