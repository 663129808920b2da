#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use flate2::Compression;
use flate2::write::GzEncoder;
use tempfile::TempDir;
use vgo::Store;

/// A tar.gz shaped like an upstream Go release: a single `go/` directory
/// whose `bin/go` prints a version line.
pub fn go_archive(version: &str) -> Vec<u8> {
    let script = format!("#!/bin/sh\necho \"go version go{version} test/amd64\"\n");
    let files = [
        ("go/bin/go", script.as_str()),
        ("go/VERSION", version),
        ("go/src/fmt/print.go", "package fmt\n"),
    ];
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (path, content) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o755);
        header.set_cksum();
        builder
            .append_data(&mut header, path, content.as_bytes())
            .unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}

/// Temp directory with an empty install root and a scratch dir.
pub fn temp_store() -> (TempDir, Store) {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("root");
    fs::create_dir_all(&root).unwrap();
    let store = Store::new(root, dir.path().join("scratch"));
    (dir, store)
}

/// Relative path -> file content for every file below `dir`.
pub fn snapshot(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    let mut files = BTreeMap::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        for entry in fs::read_dir(&current).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                pending.push(path);
            } else {
                let content = fs::read(&path).unwrap();
                files.insert(path.strip_prefix(dir).unwrap().to_path_buf(), content);
            }
        }
    }
    files
}
