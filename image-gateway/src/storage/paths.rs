// PathManager maps bucket names and object keys onto the filesystem backend.
//
// The path layout in the storage backend is roughly as follows:
//
//	<root>
//	└── <bucket>
//	    └── <key segment>
//	        └── ...
//	            └── <last key segment>
//	                ├── data
//	                └── meta
//
// Every key becomes a directory holding the raw object bytes (`data`) and its
// declared metadata (`meta`). Because objects live in leaf files rather than
// at the key path itself, a key may be a prefix of another key.

use std::path::{Component, Path, PathBuf};

#[derive(Clone, Debug)]
pub struct PathManager {
    root_path: PathBuf,
}

impl PathManager {
    pub fn new(root: impl AsRef<Path>) -> Self {
        PathManager {
            root_path: root.as_ref().to_path_buf(),
        }
    }

    /// Returns the path to the root of a bucket,
    /// (e.g. `<root>/<bucket>`).
    pub fn bucket_path(&self, bucket: &str) -> PathBuf {
        self.root_path.join(bucket)
    }

    /// Returns the directory of a single object,
    /// (e.g. `<root>/<bucket>/<key>`).
    ///
    /// `None` when the key has empty segments or segments that would leave
    /// the bucket directory.
    pub fn object_path(&self, bucket: &str, key: &str) -> Option<PathBuf> {
        if key.is_empty() || key.split('/').any(str::is_empty) {
            return None;
        }
        let relative = Path::new(key);
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return None;
        }
        Some(self.bucket_path(bucket).join(relative))
    }

    /// Returns the path to the data of a single object,
    /// (e.g. `<root>/<bucket>/<key>/data`).
    pub fn object_data_path(&self, bucket: &str, key: &str) -> Option<PathBuf> {
        self.object_path(bucket, key).map(|p| p.join("data"))
    }

    /// Returns the path to the metadata of a single object,
    /// (e.g. `<root>/<bucket>/<key>/meta`).
    pub fn object_meta_path(&self, bucket: &str, key: &str) -> Option<PathBuf> {
        self.object_path(bucket, key).map(|p| p.join("meta"))
    }
}
