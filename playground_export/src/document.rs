//! Standalone document assembly

use editor_core::Document;

use crate::library::{LibraryKind, LibrarySet};

/// Origins the default policy already trusts for scripts and styles
const TRUSTED_SCRIPT_ORIGINS: &[&str] = &["https://cdn.tailwindcss.com", "https://cdnjs.cloudflare.com"];
const TRUSTED_STYLE_ORIGINS: &[&str] = &["https://cdnjs.cloudflare.com", "https://fonts.googleapis.com"];

/// Baseline styles applied before the project's own
pub const RESET_CSS: &str = "* { box-sizing: border-box; }
body { background-color: #ffffff; color: #1e293b; margin: 0; padding: 0; font-family: system-ui, -apple-system, sans-serif; }
table { border-collapse: collapse; width: 100%; max-width: 100%; }
th, td { border: 1px solid #e2e8f0; padding: 12px; text-align: left; }";

/// Name used when the user gives none
pub const DEFAULT_FILE_NAME: &str = "project.html";

fn source_list(trusted: &[&str], libraries: &LibrarySet, kind: LibraryKind) -> String {
    let mut origins: Vec<String> = trusted.iter().map(|origin| origin.to_string()).collect();
    for origin in libraries.of_kind(kind).filter_map(|library| library.origin()) {
        if !origins.contains(&origin) {
            origins.push(origin);
        }
    }
    origins.join(" ")
}

/// Content-Security-Policy for an export
///
/// Scripts and styles may come from the built-in CDNs plus the origin of
/// every enabled library of the matching kind.
pub fn content_security_policy(libraries: &LibrarySet) -> String {
    format!(
        "default-src 'self' data: blob:; \
         script-src 'self' 'unsafe-inline' 'unsafe-eval' {}; \
         style-src 'self' 'unsafe-inline' {}; \
         font-src 'self' https://fonts.gstatic.com; \
         img-src 'self' data: https:;",
        source_list(TRUSTED_SCRIPT_ORIGINS, libraries, LibraryKind::Js),
        source_list(TRUSTED_STYLE_ORIGINS, libraries, LibraryKind::Css),
    )
}

/// Builds the standalone HTML document for `document`
pub fn assemble_document(document: &Document, libraries: &LibrarySet) -> String {
    let mut out = String::with_capacity(
        document.markup.len() + document.style.len() + document.script.len() + 1024,
    );

    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    out.push_str("  <meta charset=\"utf-8\">\n");
    out.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    out.push_str(&format!(
        "  <meta http-equiv=\"Content-Security-Policy\" content=\"{}\">\n",
        content_security_policy(libraries)
    ));
    out.push_str(&format!("  <style>\n{}\n  </style>\n", RESET_CSS));
    for library in libraries.of_kind(LibraryKind::Css) {
        out.push_str(&format!("  <link rel=\"stylesheet\" href=\"{}\">\n", library.url));
    }
    out.push_str(&format!("  <style>\n{}\n  </style>\n", document.style));
    out.push_str("</head>\n<body>\n");
    out.push_str(&document.markup);
    out.push('\n');
    for library in libraries.of_kind(LibraryKind::Js) {
        out.push_str(&format!("  <script src=\"{}\"></script>\n", library.url));
    }
    out.push_str(&format!("  <script>\n{}\n  </script>\n", document.script));
    out.push_str("</body>\n</html>\n");

    log::debug!(
        "assembled {} bytes with {} libraries",
        out.len(),
        libraries.len()
    );
    out
}

/// File name for a download: `.html` is appended unless present
pub fn export_file_name(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        return DEFAULT_FILE_NAME.to_string();
    }
    if name.to_ascii_lowercase().ends_with(".html") {
        name.to_string()
    } else {
        format!("{}.html", name)
    }
}
