use crate::errors::AppError;
use std::{
    env,
    path::{Component, Path, PathBuf},
};
use tokio::fs;

pub const DEFAULT_PORT: u16 = 8080;

pub fn resolve_site_dir() -> PathBuf {
    if let Ok(path) = env::var("FOLIO_SITE_DIR") {
        return PathBuf::from(path);
    }

    PathBuf::from("site")
}

pub fn resolve_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Maps a request path onto a file below `root`. Directory requests get
/// their `index.html`; anything that would leave `root` is rejected.
pub fn asset_path(root: &Path, request: &str) -> Result<PathBuf, AppError> {
    let relative = Path::new(request.trim_start_matches('/'));
    let mut path = root.to_path_buf();
    for component in relative.components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::CurDir => {}
            _ => return Err(AppError::bad_request("invalid path")),
        }
    }

    if request.is_empty() || request.ends_with('/') {
        path.push("index.html");
    }
    Ok(path)
}

/// Reads the file at `path`, falling back to `index.html` when it names a
/// directory. Returns the path actually read along with its bytes.
pub async fn read_asset(path: &Path) -> Result<(PathBuf, Vec<u8>), AppError> {
    let path = if fs::metadata(path).await?.is_dir() {
        path.join("index.html")
    } else {
        path.to_path_buf()
    };
    let body = fs::read(&path).await?;
    Ok((path, body))
}

pub fn content_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") | Some("mjs") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("wasm") => "application/wasm",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        Some("txt") => "text/plain; charset=utf-8",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn asset_path_serves_index_for_directories() {
        let root = Path::new("/srv/site");
        assert_eq!(asset_path(root, "").unwrap(), root.join("index.html"));
        assert_eq!(asset_path(root, "/").unwrap(), root.join("index.html"));
        assert_eq!(
            asset_path(root, "projects/").unwrap(),
            root.join("projects").join("index.html")
        );
        assert_eq!(
            asset_path(root, "pkg/folio_bg.wasm").unwrap(),
            root.join("pkg").join("folio_bg.wasm")
        );
    }

    #[test]
    fn asset_path_rejects_traversal() {
        let root = Path::new("/srv/site");
        for request in ["../secret", "pkg/../../etc/passwd", "a/../b"] {
            let err = asset_path(root, request).unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn content_type_by_extension() {
        assert_eq!(content_type(Path::new("pkg/folio_bg.wasm")), "application/wasm");
        assert_eq!(content_type(Path::new("index.HTML")), "text/html; charset=utf-8");
        assert_eq!(content_type(Path::new("LICENSE")), "application/octet-stream");
    }
}
