//! File-tree browser
//!
//! A read-only view of the workspace directory. Directory nodes list their
//! children lazily on expand; entries sort directories-first, then by name.
//! Well-known build and VCS noise is skipped, as are hidden entries unless
//! configured otherwise.

use std::path::{Path, PathBuf};

/// Directory entries never shown in the tree
const IGNORED: [&str; 4] = [".git", "node_modules", "target", "dist"];

/// One node in the tree
#[derive(Debug)]
struct TreeNode {
    name: String,
    path: PathBuf,
    is_dir: bool,
    expanded: bool,
    children: Vec<TreeNode>,
}

/// A visible row of the flattened tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRow<'a> {
    pub name: &'a str,
    pub path: &'a Path,
    pub is_dir: bool,
    pub expanded: bool,
    pub depth: usize,
}

/// What activating the cursor row did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// A file row: open this path in the editor
    OpenFile(PathBuf),
    /// A directory row was expanded or collapsed
    Toggled,
    /// Nothing under the cursor
    None,
}

/// The file-tree panel state
pub struct FileTree {
    root: TreeNode,
    /// Cursor position within the visible rows
    cursor: usize,
    /// First visible row (scroll offset)
    top: usize,
    show_hidden: bool,
}

impl FileTree {
    /// Create a tree rooted at a directory, with the root expanded
    pub fn new(root: &Path, show_hidden: bool) -> Self {
        let mut root_node = TreeNode {
            name: root.display().to_string(),
            path: root.to_path_buf(),
            is_dir: true,
            expanded: true,
            children: Vec::new(),
        };
        root_node.children = read_children(root, show_hidden);
        Self {
            root: root_node,
            cursor: 0,
            top: 0,
            show_hidden,
        }
    }

    /// Cursor position within the visible rows
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Scroll offset
    pub fn top(&self) -> usize {
        self.top
    }

    /// Flatten the expanded tree into visible rows (root itself excluded)
    pub fn visible(&self) -> Vec<VisibleRow<'_>> {
        let mut rows = Vec::new();
        for child in &self.root.children {
            flatten(child, 0, &mut rows);
        }
        rows
    }

    /// Move the cursor up
    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor down
    pub fn cursor_down(&mut self) {
        let count = self.visible().len();
        if count > 0 && self.cursor + 1 < count {
            self.cursor += 1;
        }
    }

    /// Keep the cursor row inside a window of the given height
    pub fn ensure_cursor_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.cursor < self.top {
            self.top = self.cursor;
        } else if self.cursor >= self.top + height {
            self.top = self.cursor + 1 - height;
        }
    }

    /// Activate the cursor row
    ///
    /// Directories toggle between expanded and collapsed; expanding
    /// re-reads the directory so the listing tracks the filesystem.
    /// Files return their path for the editor to open.
    pub fn activate(&mut self) -> Activation {
        let idx = self.cursor;
        let show_hidden = self.show_hidden;
        let node = match nth_visible_mut(&mut self.root, idx) {
            Some(node) => node,
            None => return Activation::None,
        };

        if node.is_dir {
            if node.expanded {
                node.expanded = false;
                node.children.clear();
            } else {
                node.children = read_children(&node.path, show_hidden);
                node.expanded = true;
            }
            self.clamp_cursor();
            Activation::Toggled
        } else {
            Activation::OpenFile(node.path.clone())
        }
    }

    /// Collapse the cursor row if it is an expanded directory
    pub fn collapse(&mut self) {
        let idx = self.cursor;
        if let Some(node) = nth_visible_mut(&mut self.root, idx) {
            if node.is_dir && node.expanded {
                node.expanded = false;
                node.children.clear();
            }
        }
        self.clamp_cursor();
    }

    /// Expand the cursor row if it is a collapsed directory
    pub fn expand(&mut self) {
        let idx = self.cursor;
        let show_hidden = self.show_hidden;
        if let Some(node) = nth_visible_mut(&mut self.root, idx) {
            if node.is_dir && !node.expanded {
                node.children = read_children(&node.path, show_hidden);
                node.expanded = true;
            }
        }
    }

    fn clamp_cursor(&mut self) {
        let count = self.visible().len();
        if count == 0 {
            self.cursor = 0;
        } else if self.cursor >= count {
            self.cursor = count - 1;
        }
    }
}

/// List a directory as tree nodes: dirs first, then by name
///
/// An unreadable directory yields an empty listing.
fn read_children(path: &Path, show_hidden: bool) -> Vec<TreeNode> {
    let entries = match std::fs::read_dir(path) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut nodes: Vec<TreeNode> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            if IGNORED.contains(&name.as_str()) {
                return None;
            }
            if !show_hidden && name.starts_with('.') {
                return None;
            }
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            Some(TreeNode {
                name,
                path: entry.path(),
                is_dir,
                expanded: false,
                children: Vec::new(),
            })
        })
        .collect();

    nodes.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });

    nodes
}

/// Append a node and its expanded descendants to the row list
fn flatten<'a>(node: &'a TreeNode, depth: usize, rows: &mut Vec<VisibleRow<'a>>) {
    rows.push(VisibleRow {
        name: &node.name,
        path: &node.path,
        is_dir: node.is_dir,
        expanded: node.expanded,
        depth,
    });
    if node.expanded {
        for child in &node.children {
            flatten(child, depth + 1, rows);
        }
    }
}

/// Find the nth visible node (preorder, root excluded)
fn nth_visible_mut<'a>(root: &'a mut TreeNode, idx: usize) -> Option<&'a mut TreeNode> {
    let mut remaining = idx;
    for child in &mut root.children {
        if let Some(found) = nth_in_subtree_mut(child, &mut remaining) {
            return Some(found);
        }
    }
    None
}

fn nth_in_subtree_mut<'a>(
    node: &'a mut TreeNode,
    remaining: &mut usize,
) -> Option<&'a mut TreeNode> {
    if *remaining == 0 {
        return Some(node);
    }
    *remaining -= 1;
    if node.expanded {
        for child in &mut node.children {
            if let Some(found) = nth_in_subtree_mut(child, remaining) {
                return Some(found);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn workspace() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::create_dir(dir.path().join("target")).unwrap();
        fs::write(dir.path().join("src/main.cpp"), "int main() {}\n").unwrap();
        fs::write(dir.path().join("src/util.cpp"), "// util\n").unwrap();
        fs::write(dir.path().join("README.md"), "# hi\n").unwrap();
        fs::write(dir.path().join(".hidden"), "\n").unwrap();
        dir
    }

    #[test]
    fn test_listing_sorted_dirs_first() {
        let dir = workspace();
        let tree = FileTree::new(dir.path(), false);
        let rows = tree.visible();
        let names: Vec<&str> = rows.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["src", "README.md"]);
        assert!(rows[0].is_dir);
        assert!(!rows[1].is_dir);
    }

    #[test]
    fn test_noise_and_hidden_filtered() {
        let dir = workspace();
        let tree = FileTree::new(dir.path(), false);
        let rows = tree.visible();
        assert!(rows.iter().all(|r| r.name != ".git"));
        assert!(rows.iter().all(|r| r.name != "target"));
        assert!(rows.iter().all(|r| r.name != ".hidden"));
    }

    #[test]
    fn test_show_hidden() {
        let dir = workspace();
        let tree = FileTree::new(dir.path(), true);
        let rows = tree.visible();
        assert!(rows.iter().any(|r| r.name == ".hidden"));
        // The ignore list still applies even with hidden entries shown
        assert!(rows.iter().all(|r| r.name != ".git"));
    }

    #[test]
    fn test_expand_and_collapse() {
        let dir = workspace();
        let mut tree = FileTree::new(dir.path(), false);
        // Cursor starts on "src"
        assert_eq!(tree.activate(), Activation::Toggled);
        let names: Vec<String> = tree
            .visible()
            .iter()
            .map(|r| r.name.to_string())
            .collect();
        assert_eq!(names, vec!["src", "main.cpp", "util.cpp", "README.md"]);
        assert_eq!(tree.visible()[1].depth, 1);

        assert_eq!(tree.activate(), Activation::Toggled);
        assert_eq!(tree.visible().len(), 2);
    }

    #[test]
    fn test_activate_file_returns_path() {
        let dir = workspace();
        let mut tree = FileTree::new(dir.path(), false);
        tree.activate(); // expand src
        tree.cursor_down(); // main.cpp
        match tree.activate() {
            Activation::OpenFile(path) => {
                assert_eq!(path, dir.path().join("src/main.cpp"));
            }
            other => panic!("expected OpenFile, got {:?}", other),
        }
    }

    #[test]
    fn test_cursor_clamped_after_collapse() {
        let dir = workspace();
        let mut tree = FileTree::new(dir.path(), false);
        tree.activate(); // expand src -> 4 rows
        tree.cursor_down();
        tree.cursor_down();
        tree.cursor_down(); // README.md (last row)
        assert_eq!(tree.cursor(), 3);
        tree.cursor_up();
        tree.cursor_up();
        tree.cursor_up(); // back on src
        tree.activate(); // collapse -> 2 rows
        assert!(tree.cursor() < tree.visible().len());
    }

    #[test]
    fn test_cursor_bounds() {
        let dir = workspace();
        let mut tree = FileTree::new(dir.path(), false);
        tree.cursor_up();
        assert_eq!(tree.cursor(), 0);
        for _ in 0..10 {
            tree.cursor_down();
        }
        assert_eq!(tree.cursor(), tree.visible().len() - 1);
    }

    #[test]
    fn test_unreadable_root_is_empty() {
        let tree = FileTree::new(Path::new("/no/such/dir"), false);
        assert!(tree.visible().is_empty());
        let mut tree = tree;
        assert_eq!(tree.activate(), Activation::None);
    }

    #[test]
    fn test_expand_rereads_directory() {
        let dir = workspace();
        let mut tree = FileTree::new(dir.path(), false);
        tree.activate(); // expand src
        tree.activate(); // collapse src
        fs::write(dir.path().join("src/new.cpp"), "\n").unwrap();
        tree.activate(); // expand again: fresh listing
        let names: Vec<&str> = tree.visible().iter().map(|r| r.name).collect();
        assert!(names.contains(&"new.cpp"));
    }

    #[test]
    fn test_scroll_tracking() {
        let dir = workspace();
        let mut tree = FileTree::new(dir.path(), false);
        tree.activate(); // 4 rows
        tree.cursor_down();
        tree.cursor_down();
        tree.cursor_down();
        tree.ensure_cursor_visible(2);
        assert_eq!(tree.top(), 2);
        tree.cursor_up();
        tree.cursor_up();
        tree.cursor_up();
        tree.ensure_cursor_visible(2);
        assert_eq!(tree.top(), 0);
    }
}
