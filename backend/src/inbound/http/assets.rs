//! Static file services: uploaded images under `/files` and the front-end
//! bundle for every other non-API path.

use std::path::{Path, PathBuf};

use actix_files::{Files, NamedFile};
use actix_web::dev::{ServiceRequest, ServiceResponse, fn_service};
use tracing::info;

use crate::domain::FILES_URL_PREFIX;

const INDEX_FILE: &str = "index.html";

/// Serve the upload root read-only under `/files`.
///
/// Directory listings stay disabled and dot-files, including staged writes,
/// are never served.
pub fn uploaded_files(root: impl Into<PathBuf>) -> Files {
    Files::new(FILES_URL_PREFIX, root.into())
}

/// Serve the front-end bundle from `static_dir` at `/`.
///
/// Paths without a matching file fall back to `index.html` so client-side
/// routes survive a reload. Returns `None` when the directory has no
/// `index.html`. Register it after every other service.
pub fn front_end(static_dir: &Path) -> Option<Files> {
    let index = static_dir.join(INDEX_FILE);
    if !index.is_file() {
        info!(dir = %static_dir.display(), "no front-end bundle found, skipping static files");
        return None;
    }

    let files = Files::new("/", static_dir)
        .index_file(INDEX_FILE)
        .default_handler(fn_service(move |req: ServiceRequest| {
            let index = index.clone();
            async move {
                let (req, _payload) = req.into_parts();
                let file = NamedFile::open_async(&index).await?;
                let res = file.into_response(&req);
                Ok(ServiceResponse::new(req, res))
            }
        }));
    Some(files)
}
