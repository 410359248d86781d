//! Display-only folder tree derived from "/"-delimited note titles.
//!
//! Rebuilt from scratch on demand — folders have no persisted identity of
//! their own. Collapse state lives in the settings set, keyed by the
//! materialized path string (segments joined with "/").

use std::collections::{HashMap, HashSet};

use torn_notes_types::{FolderView, Note, NoteLeafView, TreeEntry};

#[derive(Default)]
struct FolderBuilder {
    // Keyed by raw segment text; folder names are case-sensitive
    folders: HashMap<String, FolderBuilder>,
    notes: Vec<NoteLeafView>,
}

impl FolderBuilder {
    fn insert(&mut self, note: &Note) {
        let segments: Vec<&str> = note.title.split('/').collect();
        let mut node = self;
        for segment in &segments[..segments.len() - 1] {
            node = node.folders.entry(segment.to_string()).or_default();
        }
        let last = segments[segments.len() - 1];
        node.notes.push(NoteLeafView {
            id: note.id.clone(),
            label: if last.is_empty() {
                "Untitled".to_string()
            } else {
                last.to_string()
            },
            title: note.title.clone(),
        });
    }

    fn finish(self, path_prefix: &str, collapsed: &HashSet<String>) -> Vec<TreeEntry> {
        let mut entries: Vec<TreeEntry> = Vec::new();

        for (name, child) in self.folders {
            let path = if path_prefix.is_empty() {
                name.clone()
            } else {
                format!("{}/{}", path_prefix, name)
            };
            let child_entries = child.finish(&path, collapsed);
            entries.push(TreeEntry::Folder(FolderView {
                collapsed: collapsed.contains(&path),
                name,
                path,
                entries: child_entries,
            }));
        }

        for leaf in self.notes {
            entries.push(TreeEntry::Note(leaf));
        }

        // One merged list per level, alphabetical and case-insensitive by
        // display name, with the raw name as a deterministic tie-breaker
        entries.sort_by(|a, b| {
            let ka = entry_sort_key(a);
            let kb = entry_sort_key(b);
            ka.cmp(&kb)
        });

        entries
    }
}

fn entry_sort_key(entry: &TreeEntry) -> (String, String) {
    let name = match entry {
        TreeEntry::Folder(folder) => folder.name.as_str(),
        TreeEntry::Note(leaf) => leaf.label.as_str(),
    };
    (name.to_lowercase(), name.to_string())
}

/// Build the root-level display entries for the given snapshot.
pub fn build_tree(notes: &[Note], collapsed: &HashSet<String>) -> Vec<TreeEntry> {
    let mut root = FolderBuilder::default();
    for note in notes {
        root.insert(note);
    }
    root.finish("", collapsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str, title: &str) -> Note {
        Note {
            id: id.to_string(),
            title: title.to_string(),
            text: String::new(),
        }
    }

    fn label(entry: &TreeEntry) -> &str {
        match entry {
            TreeEntry::Folder(folder) => &folder.name,
            TreeEntry::Note(leaf) => &leaf.label,
        }
    }

    #[test]
    fn groups_by_path_segments() {
        let notes = vec![
            note("1", "A"),
            note("2", "Folder/B"),
            note("3", "Folder/C"),
        ];
        let tree = build_tree(&notes, &HashSet::new());

        assert_eq!(tree.len(), 2);
        assert_eq!(label(&tree[0]), "A");
        match &tree[1] {
            TreeEntry::Folder(folder) => {
                assert_eq!(folder.name, "Folder");
                assert_eq!(folder.path, "Folder");
                let labels: Vec<&str> = folder.entries.iter().map(label).collect();
                assert_eq!(labels, vec!["B", "C"]);
            }
            TreeEntry::Note(_) => panic!("expected a folder"),
        }
    }

    #[test]
    fn mixed_entries_sort_case_insensitively() {
        let notes = vec![
            note("1", "zeta"),
            note("2", "Alpha/inner"),
            note("3", "beta"),
        ];
        let tree = build_tree(&notes, &HashSet::new());
        let labels: Vec<&str> = tree.iter().map(label).collect();
        assert_eq!(labels, vec!["Alpha", "beta", "zeta"]);
    }

    #[test]
    fn nested_folders_carry_joined_paths() {
        let notes = vec![note("1", "a/b/c")];
        let tree = build_tree(&notes, &HashSet::new());

        let TreeEntry::Folder(a) = &tree[0] else {
            panic!("expected folder")
        };
        assert_eq!(a.path, "a");
        let TreeEntry::Folder(b) = &a.entries[0] else {
            panic!("expected folder")
        };
        assert_eq!(b.path, "a/b");
        let TreeEntry::Note(leaf) = &b.entries[0] else {
            panic!("expected leaf")
        };
        assert_eq!(leaf.label, "c");
        assert_eq!(leaf.title, "a/b/c");
    }

    #[test]
    fn collapse_state_is_looked_up_by_path() {
        let notes = vec![note("1", "Work/Todo"), note("2", "Play/Todo")];
        let mut collapsed = HashSet::new();
        collapsed.insert("Work".to_string());

        let tree = build_tree(&notes, &collapsed);
        for entry in &tree {
            let TreeEntry::Folder(folder) = entry else {
                panic!("expected folders")
            };
            assert_eq!(folder.collapsed, folder.name == "Work");
        }
    }

    #[test]
    fn folder_names_are_case_sensitive() {
        let notes = vec![note("1", "work/a"), note("2", "Work/b")];
        let tree = build_tree(&notes, &HashSet::new());
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn empty_title_becomes_untitled_leaf() {
        let notes = vec![note("1", "")];
        let tree = build_tree(&notes, &HashSet::new());
        assert_eq!(label(&tree[0]), "Untitled");
    }
}
