//! Local file-system [`ImageStorage`] rooted at the upload directory.
//!
//! All access goes through a `cap-std` directory handle for
//! `<upload_dir>/pacotes`, so writes cannot escape it. Files are staged under
//! a temporary name and renamed into place, replacing any previous file.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use uuid::Uuid;

use crate::domain::PACOTES_DIR;
use crate::domain::ports::{ImageStorage, ImageStorageError};

pub struct LocalImageStorage {
    root: PathBuf,
    images: Arc<Dir>,
}

impl LocalImageStorage {
    /// Open the upload root, creating it and its `pacotes` subdirectory.
    pub fn open(root: impl AsRef<Path>) -> io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let images_path = root.join(PACOTES_DIR);
        Dir::create_ambient_dir_all(&images_path, ambient_authority())?;
        let images = Dir::open_ambient_dir(&images_path, ambient_authority())?;
        Ok(Self {
            root,
            images: Arc::new(images),
        })
    }

    /// Upload root served under `/files`.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\'])
}

fn write_replacing(dir: &Dir, name: &str, content: &[u8]) -> io::Result<()> {
    let staged = format!(".tmp-{}", Uuid::new_v4().simple());
    dir.write(&staged, content)?;
    dir.rename(&staged, dir, name).inspect_err(|_| {
        let _cleanup = dir.remove_file(&staged);
    })
}

#[async_trait]
impl ImageStorage for LocalImageStorage {
    async fn write_image(
        &self,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<(), ImageStorageError> {
        if !is_plain_file_name(file_name) {
            return Err(ImageStorageError::write(file_name, "invalid file name"));
        }
        let dir = Arc::clone(&self.images);
        let name = file_name.to_owned();
        tokio::task::spawn_blocking(move || write_replacing(&dir, &name, &content))
            .await
            .map_err(|err| ImageStorageError::write(file_name, err.to_string()))?
            .map_err(|err| ImageStorageError::write(file_name, err.to_string()))
    }
}
