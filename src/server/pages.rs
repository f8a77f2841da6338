// html rendering for directory, show and player pages

use crate::library::{
    generate_links, EntryKind, LibraryError, MediaEntry, PlaybackLinks, RequestPath,
    ResolvedDirectory, ResolvedFile, ServerOrigin, PLAYER_SEGMENT,
};
use crate::utils::files::{escape_html, get_mime_type};

const SITE_NAME: &str = "mserve";
const VLC_FILE_URL_HELPER: &str = "https://github.com/pepaslabs/VLCFileUrl";

/// page for a visible directory: sub-directories by title, media files with their links
pub fn directory_page(
    dir: &ResolvedDirectory,
    entries: &[MediaEntry],
    origin: &ServerOrigin,
) -> Result<String, LibraryError> {
    let mut html = page_open(dir.title());
    html.push_str(&format!("<h1>{}</h1>", breadcrumbs(&dir.url, None)));

    if let Some(title) = &dir.manifest.title {
        html.push_str(&format!("<h2>{}</h2>", escape_html(title)));
    }
    if let Some(tmdb_url) = dir.manifest.tmdb_url() {
        html.push_str(&format!(
            "<p class=\"tmdb\"><a href=\"{}\">themoviedb.org</a></p>",
            escape_html(&tmdb_url)
        ));
    }

    let mut needs_helper_note = false;
    if !entries.is_empty() {
        html.push_str("<ul class=\"listing\">");
        for entry in entries {
            match entry.kind {
                EntryKind::Directory(_) => {
                    html.push_str(&format!(
                        "<li class=\"dir\"><a href=\"{}\">{}</a></li>",
                        escape_html(&entry.url.url()),
                        escape_html(&entry.title)
                    ));
                }
                EntryKind::Media(_) => {
                    let links = generate_links(origin, &entry.url)?;
                    needs_helper_note |= links.desktop_handoff.is_some();
                    html.push_str(&format!(
                        "<li class=\"media\">{} {}</li>",
                        escape_html(&entry.title),
                        link_bar(&links)
                    ));
                }
            }
        }
        html.push_str("</ul>");
    }

    if dir.manifest.kind.is_show() || needs_helper_note {
        html.push_str(&helper_footer());
    }

    html.push_str(PAGE_CLOSE);
    Ok(html)
}

/// playback page for one file; containers the browser cannot play get links only
pub fn player_page(file: &ResolvedFile, links: &PlaybackLinks) -> String {
    let title = file.parent.manifest.title.as_deref().unwrap_or(&file.name);

    let mut html = page_open(title);
    html.push_str(&format!(
        "<h1>{}</h1>",
        breadcrumbs(&file.url, Some(PLAYER_SEGMENT))
    ));
    html.push_str(&format!("<h2>{}</h2>", escape_html(title)));

    if file.format.is_inline_playable() {
        html.push_str("<video class=\"player\" controls preload=\"auto\">");
        html.push_str(&format!(
            "<source src=\"{}\" type=\"{}\">",
            escape_html(&links.file_url),
            escape_html(&get_mime_type(&file.fs_path))
        ));
        html.push_str("</video>");
    } else {
        html.push_str("<p class=\"notice\">this file cannot be played in the browser</p>");
    }

    html.push_str(&format!("<p>{}</p>", link_bar(links)));
    if links.desktop_handoff.is_some() {
        html.push_str(&helper_footer());
    }
    html.push_str(PAGE_CLOSE);
    html
}

/// break a url path into per-segment links rooted at the site name
///
/// the last element is plain text: either `trailing` or the last path segment.
pub fn breadcrumbs(path: &RequestPath, trailing: Option<&str>) -> String {
    if path.is_root() && trailing.is_none() {
        return SITE_NAME.to_string();
    }

    let mut html = format!("<a href=\"/\">{SITE_NAME}</a>");
    let crumbs: Vec<_> = path.ancestors().collect();
    let linked = if trailing.is_some() {
        crumbs.len()
    } else {
        crumbs.len() - 1
    };

    for (index, (prefix, name)) in crumbs.iter().enumerate() {
        if index < linked {
            html.push_str(&format!(
                "&nbsp;/&nbsp;<a href=\"{}\">{}</a>",
                escape_html(&prefix.url()),
                escape_html(name)
            ));
        } else {
            html.push_str(&format!("&nbsp;/&nbsp;{}", escape_html(name)));
        }
    }

    if let Some(trailing) = trailing {
        html.push_str(&format!("&nbsp;/&nbsp;{}", escape_html(trailing)));
    }
    html
}

// [ player | vlc | vlc-file | file ]
fn link_bar(links: &PlaybackLinks) -> String {
    let mut parts = Vec::with_capacity(4);
    if let Some(player_url) = &links.player_url {
        parts.push(format!("<a href=\"{}\">player</a>", escape_html(player_url)));
    }
    parts.push(format!(
        "<a href=\"{}\">vlc</a>",
        escape_html(&links.mobile_deep_link)
    ));
    if let Some(handoff) = &links.desktop_handoff {
        parts.push(format!("<a href=\"{}\">vlc-file</a>", escape_html(handoff)));
    }
    parts.push(format!(
        "<a href=\"{}\">file</a>",
        escape_html(&links.file_url)
    ));
    format!("<span class=\"links\">[ {} ]</span>", parts.join(" | "))
}

fn helper_footer() -> String {
    format!(
        "<footer><hr>To play <code>vlc-file://</code> links, install <a href=\"{VLC_FILE_URL_HELPER}\">VLCFileUrl</a>.</footer>"
    )
}

fn page_open(title: &str) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>");
    html.push_str("<html><head>");
    html.push_str("<meta charset=\"utf-8\">");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    html.push_str(&format!(
        "<meta name=\"generator\" content=\"mserve v{}\">",
        env!("CARGO_PKG_VERSION")
    ));
    html.push_str(&format!(
        "<title>{SITE_NAME} | {}</title>",
        escape_html(title)
    ));
    html.push_str("<link rel=\"stylesheet\" href=\"/__mserve_static/style.css\">");
    html.push_str("</head><body><main>");
    html
}

const PAGE_CLOSE: &str = "</main></body></html>";
