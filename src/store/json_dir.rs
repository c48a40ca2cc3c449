// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use super::{KvStore, StoreError};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Writes a temp file and renames it into place, without fsync.
    #[default]
    BestEffort,

    /// Also syncs the file contents and the parent directory where the platform allows.
    Durable,
}

/// `KvStore` keeping one JSON object file per namespace below `root`.
///
/// `overrides/business` lives in `<root>/overrides/business.json`. Namespace segments that are
/// not safe file names on every platform are hex-encoded with a `~` prefix.
#[derive(Debug)]
pub struct JsonDirKv {
    root: PathBuf,
    durability: WriteDurability,
    // Serializes read-modify-write cycles within this process.
    write_guard: Mutex<()>,
}

impl JsonDirKv {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), durability: WriteDurability::default(), write_guard: Mutex::new(()) }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn namespace_path(&self, namespace: &str) -> Result<PathBuf, StoreError> {
        let segments = namespace.split('/').collect::<Vec<_>>();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(StoreError::InvalidNamespace { namespace: namespace.to_owned() });
        }

        let mut path = self.root.clone();
        let (last, parents) = segments
            .split_last()
            .ok_or_else(|| StoreError::InvalidNamespace { namespace: namespace.to_owned() })?;
        for segment in parents {
            path.push(encode_file_segment(segment));
        }
        path.push(format!("{}.json", encode_file_segment(last)));
        Ok(path)
    }

    fn read_file(path: &Path) -> Result<BTreeMap<String, serde_json::Value>, StoreError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => return Err(StoreError::Io { path: path.to_path_buf(), source }),
        };
        serde_json::from_slice(&bytes)
            .map_err(|source| StoreError::Json { path: path.to_path_buf(), source })
    }
}

impl KvStore for JsonDirKv {
    fn read_all(&self, namespace: &str) -> Result<BTreeMap<String, serde_json::Value>, StoreError> {
        Self::read_file(&self.namespace_path(namespace)?)
    }

    fn write(&self, namespace: &str, key: &str, value: serde_json::Value) -> Result<(), StoreError> {
        let path = self.namespace_path(namespace)?;
        let _guard = self.write_guard.lock().expect("json dir kv lock poisoned");

        let mut entries = Self::read_file(&path)?;
        entries.insert(key.to_owned(), value);
        let contents = serde_json::to_vec_pretty(&entries)
            .map_err(|source| StoreError::Json { path: path.clone(), source })?;

        write_atomic(&self.root, &path, &contents, self.durability)
    }
}

fn encode_file_segment(segment: &str) -> String {
    if !needs_file_segment_encoding(segment) {
        return segment.to_owned();
    }

    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(1 + segment.len().saturating_mul(2));
    out.push('~');
    for &b in segment.as_bytes() {
        out.push(HEX[(b >> 4) as usize] as char);
        out.push(HEX[(b & 0x0f) as usize] as char);
    }
    out
}

fn needs_file_segment_encoding(segment: &str) -> bool {
    if segment.starts_with('~') || segment == "." || segment == ".." {
        return true;
    }
    if segment.ends_with(' ') || segment.ends_with('.') {
        return true;
    }

    let trimmed = segment.trim_end_matches([' ', '.']);
    let base = trimmed.split('.').next().unwrap_or(trimmed);
    if is_reserved_device_name(base) {
        return true;
    }

    segment.chars().any(|ch| {
        matches!(ch, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*')
            || ch <= '\u{1f}'
            || ch == '\u{7f}'
    })
}

fn is_reserved_device_name(base: &str) -> bool {
    let base = base.to_ascii_uppercase();
    if matches!(base.as_str(), "CON" | "PRN" | "AUX" | "NUL") {
        return true;
    }
    base.strip_prefix("COM")
        .or_else(|| base.strip_prefix("LPT"))
        .is_some_and(|num| matches!(num, "1" | "2" | "3" | "4" | "5" | "6" | "7" | "8" | "9"))
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
    move |source| StoreError::Io { path: path.to_path_buf(), source }
}

/// Writes `contents` to `path` via a temp file in the same directory and an atomic rename.
fn write_atomic(
    root: &Path,
    path: &Path,
    contents: &[u8],
    durability: WriteDurability,
) -> Result<(), StoreError> {
    let Some(parent) = path.parent() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no parent"),
        });
    };
    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };
    debug_assert!(path.starts_with(root));

    fs::create_dir_all(parent).map_err(io_err(parent))?;

    match fs::symlink_metadata(path) {
        Ok(md) if md.file_type().is_symlink() => {
            return Err(StoreError::SymlinkRefused { path: path.to_path_buf() });
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => return Err(StoreError::Io { path: path.to_path_buf(), source }),
    }

    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
    let tmp_path =
        parent.join(format!(".orgchart.tmp.{}.{}", file_name.to_string_lossy(), nanos));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(io_err(&tmp_path))?;
    file.write_all(contents).map_err(io_err(&tmp_path))?;
    if durability == WriteDurability::Durable {
        file.sync_all().map_err(io_err(&tmp_path))?;
    }
    drop(file);

    if let Err(source) = rename_overwrite(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io { path: path.to_path_buf(), source });
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(parent).map_err(io_err(parent))?;
            dir.sync_all().map_err(io_err(parent))?;
        }
    }

    tracing::trace!(path = %path.display(), bytes = contents.len(), "wrote store file");
    Ok(())
}
