pub mod check;
pub mod export;
pub mod inspect;
pub mod play;

use std::path::Path;

use wf_fiction::ContentRegistry;

/// Load content from a JSON file, or the built-in slice.
fn load_content(path: Option<&Path>) -> Result<ContentRegistry, String> {
    match path {
        Some(path) => {
            let content = ContentRegistry::from_path(path)
                .map_err(|e| format!("cannot load content: {e}"))?;
            tracing::info!(path = %path.display(), title = %content.title, "content loaded");
            Ok(content)
        }
        None => Ok(ContentRegistry::worldforge()),
    }
}
