//! Request routing: the save endpoint and static files.

use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use folio_content::{ContentStore, ProjectRecord, persist};
use serde_json::json;

use crate::http::{HttpRequest, HttpResponse};

/// Route of the save endpoint.
pub const SAVE_ROUTE: &str = "/api/save";

/// What every connection handler shares.
#[derive(Debug)]
pub struct ServerState {
    projects_path: PathBuf,
    static_root: PathBuf,
    /// In-process content store to update on save, when the server runs
    /// alongside a terminal.
    store: Option<Arc<RwLock<ContentStore>>>,
}

impl ServerState {
    pub fn new(projects_path: PathBuf, static_root: PathBuf) -> Self {
        Self {
            projects_path,
            static_root,
            store: None,
        }
    }

    /// Also replace the project list of `store` on every valid save.
    pub fn with_store(mut self, store: Arc<RwLock<ContentStore>>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn projects_path(&self) -> &Path {
        &self.projects_path
    }

    /// Route a request to its handler.
    pub fn handle(&self, req: &HttpRequest) -> HttpResponse {
        log::debug!("{} {}", req.method, req.path);
        match (req.method.as_str(), req.path.as_str()) {
            ("POST", SAVE_ROUTE) => self.save(&req.body),
            ("GET" | "HEAD", path) => self.serve_static(path),
            ("POST", _) => HttpResponse::text(404, "Not Found"),
            _ => HttpResponse::text(405, "Method Not Allowed"),
        }
    }

    /// `POST /api/save`: the body must be a JSON array of project records.
    /// Anything that would not load back at startup is refused unwritten.
    fn save(&self, body: &[u8]) -> HttpResponse {
        let projects = match serde_json::from_slice::<Vec<ProjectRecord>>(body) {
            Ok(projects) => projects,
            Err(e) => {
                log::warn!("Rejected save: {e}");
                return failure(400, "Invalid data format");
            },
        };

        // The in-memory copy keeps the edits even if the write fails.
        let written = match &self.store {
            Some(store) => {
                let mut store = store.write().unwrap_or_else(PoisonError::into_inner);
                store.replace_projects(projects);
                store.save_projects(&self.projects_path)
            },
            None => persist::write_pretty_json(&self.projects_path, &projects),
        };

        match written {
            Ok(()) => {
                log::info!("Projects saved to {}", self.projects_path.display());
                HttpResponse::json(200, &json!({"success": true, "message": "Saved successfully"}))
            },
            Err(e) => {
                log::error!("Error writing file: {e}");
                failure(500, "Failed to save file")
            },
        }
    }

    fn serve_static(&self, path: &str) -> HttpResponse {
        let Some(rel) = sanitize_path(path) else {
            log::warn!("Rejected path {path}");
            return HttpResponse::text(403, "Forbidden");
        };
        let mut full = self.static_root.join(rel);
        if full.is_dir() {
            full.push("index.html");
        }
        match std::fs::read(&full) {
            Ok(bytes) => HttpResponse::new(200, content_type_for(&full), bytes),
            Err(_) => HttpResponse::text(404, "Not Found"),
        }
    }
}

fn failure(status: u16, message: &str) -> HttpResponse {
    HttpResponse::json(status, &json!({"success": false, "message": message}))
}

/// Turn a URL path into a relative file path. `None` if it would escape
/// the static root.
fn sanitize_path(path: &str) -> Option<PathBuf> {
    let decoded = percent_decode(path)?;
    let rel = Path::new(decoded.trim_start_matches('/'));
    let mut out = PathBuf::new();
    for component in rel.components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {},
            _ => return None,
        }
    }
    Some(out)
}

/// Decode `%XX` escapes. Invalid escapes or non-UTF-8 results are refused.
fn percent_decode(path: &str) -> Option<String> {
    let bytes = path.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = path.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    let decoded = String::from_utf8(out).ok()?;
    (!decoded.contains('\\') && !decoded.contains('\0')).then_some(decoded)
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}
