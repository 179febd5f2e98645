// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use std::ffi::OsString;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// Rotates backup files `name`, `name.1`, `name.2`, ... so that at most
/// `keep` of them exist once a fresh `name` is written.
#[derive(Debug, Clone, Copy)]
pub struct FileRoller {
    keep: usize,
}

fn numbered(path: &Path, n: usize) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(format!(".{}", n));
    PathBuf::from(name)
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() != ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

fn rename_if_exists(from: &Path, to: &Path) -> io::Result<()> {
    match std::fs::rename(from, to) {
        Err(e) if e.kind() != ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

impl FileRoller {
    pub fn new(keep: usize) -> Self {
        Self { keep: keep.max(1) }
    }

    /// Frees `path` for a new backup, shifting older copies up by one and
    /// dropping the oldest.
    pub fn roll(&self, path: &Path) -> io::Result<()> {
        let numbered_copies = self.keep - 1;
        if numbered_copies == 0 {
            return remove_if_exists(path);
        }

        remove_if_exists(&numbered(path, numbered_copies))?;
        for n in (1..numbered_copies).rev() {
            rename_if_exists(&numbered(path, n), &numbered(path, n + 1))?;
        }
        rename_if_exists(path, &numbered(path, 1))
    }
}
