// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Media tree enumeration.
//!
//! This module discovers the on-disk music library for the browser
//! components: the nested directory tree for the catalog sidebar and the
//! playable files of a single directory for the file table.
//!
//! Hidden entries (names starting with `.`) are excluded everywhere; files
//! are filtered by the playable extension allow-list.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Extensions of files the player can handle.
const SONG_EXTENSIONS: [&str; 2] = ["mp3", "m4a"];

/// One directory of the media tree with its nested subdirectories.
#[derive(Debug, Clone)]
pub(crate) struct DirNode {
    pub(crate) name: String,
    pub(crate) path: PathBuf,
    pub(crate) children: Vec<DirNode>,
}

/// Builds the directory tree rooted at `root`.
///
/// Children are sorted by file name. An unreadable directory contributes no
/// children rather than an error — the browser shows what it can reach.
pub(crate) fn dir_tree(root: &Path) -> DirNode {
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());

    let children = subdirectories(root).into_iter().map(|p| dir_tree(&p)).collect();

    DirNode {
        name,
        path: root.to_path_buf(),
        children,
    }
}

/// The playable, non-hidden files directly inside `dir`, sorted by name.
pub(crate) fn song_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| !is_hidden(entry.file_name().to_string_lossy().as_ref()))
        .filter(|entry| is_playable(entry.path()))
        .map(|entry| entry.into_path())
        .collect()
}

fn subdirectories(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir())
        .filter(|entry| !is_hidden(entry.file_name().to_string_lossy().as_ref()))
        .map(|entry| entry.into_path())
        .collect()
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

fn is_playable(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SONG_EXTENSIONS.contains(&ext.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn song_files_applies_the_allow_list() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("b.mp3"));
        touch(&dir.path().join("a.m4a"));
        touch(&dir.path().join("notes.txt"));
        touch(&dir.path().join("cover.jpg"));

        let files = song_files(dir.path());
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, ["a.m4a", "b.mp3"]);
    }

    #[test]
    fn hidden_files_and_directories_are_excluded() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join(".hidden.mp3"));
        touch(&dir.path().join("visible.mp3"));
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::create_dir(dir.path().join("album")).unwrap();

        assert_eq!(song_files(dir.path()).len(), 1);

        let tree = dir_tree(dir.path());
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].name, "album");
    }

    #[test]
    fn directories_are_not_listed_as_songs() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("album.mp3")).unwrap();

        assert!(song_files(dir.path()).is_empty());
    }

    #[test]
    fn tree_nests_and_sorts_children() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("b/inner")).unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();

        let tree = dir_tree(dir.path());
        let names: Vec<_> = tree.children.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(names, ["a", "b"]);
        assert_eq!(tree.children[1].children[0].name, "inner");
    }
}
