use log::{debug, info};

use crate::errors::BrowserError;
use crate::services::ListingService;
use crate::types::{Entry, MediaKind, RenderContext};
use crate::utils::{directory_href, encode_href, escape_attr, escape_html, truncate_name};

/// Width requested for directory previews in the gallery
pub const THUMBNAIL_WIDTH: u32 = 140;

/// Renders a directory as a plain list or an image gallery
pub struct ListingComponent {
    listing_service: ListingService,
}

impl ListingComponent {
    pub fn new(listing_service: ListingService) -> Self {
        Self { listing_service }
    }

    /// Read, order and render the directory named by `ctx`
    pub fn render(&self, ctx: &RenderContext) -> Result<String, BrowserError> {
        let start_time = std::time::Instant::now();
        let entries = if ctx.is_gallery() && ctx.shuffle {
            self.listing_service.list_shuffled(&ctx.current_dir)?
        } else {
            self.listing_service.list(&ctx.current_dir)?
        };

        let html = if ctx.is_gallery() {
            render_gallery(&entries, |dir| self.listing_service.representative_image(dir))
        } else {
            render_list(&entries)
        };
        info!(
            "Rendered '{}' ({} entries) in {}ms",
            ctx.current_dir,
            entries.len(),
            start_time.elapsed().as_millis()
        );
        Ok(html)
    }
}

/// Icon plus link for every entry
pub fn render_list(entries: &[Entry]) -> String {
    let mut html = String::from("<ul class=\"listing\">\n");
    for entry in entries {
        html.push_str(&format!("  <li>{}</li>\n", icon_link(entry, false)));
    }
    html.push_str("</ul>\n");
    html
}

/// Previews for images and for directories that contain one.
///
/// `thumbnail_for` maps a directory's relative path to the relative path of
/// its representative image.
pub fn render_gallery<F>(entries: &[Entry], thumbnail_for: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut html = String::from("<ul class=\"gallery\">\n");
    for entry in entries {
        let item = if entry.is_dir {
            match thumbnail_for(&entry.relative_path) {
                Some(thumb) => {
                    debug!("Thumbnail for '{}': '{}'", entry.relative_path, thumb);
                    format!(
                        "<a href=\"{}\"><img class=\"thumb\" src=\"{}?width={}\" alt=\"\" loading=\"lazy\">{}/</a>",
                        escape_attr(&directory_href(&entry.relative_path, true)),
                        escape_attr(&encode_href(&thumb)),
                        THUMBNAIL_WIDTH,
                        escape_html(&entry.name)
                    )
                }
                None => icon_link(entry, true),
            }
        } else if entry.media_kind == MediaKind::Image {
            let href = escape_attr(&encode_href(&entry.relative_path));
            format!(
                "<a href=\"{href}\"><img class=\"photo\" src=\"{href}\" alt=\"{}\" loading=\"lazy\"></a>",
                escape_attr(&entry.name)
            )
        } else {
            icon_link(entry, true)
        };
        html.push_str(&format!("  <li>{}</li>\n", item));
    }
    html.push_str("</ul>\n");
    html
}

fn icon_link(entry: &Entry, gallery: bool) -> String {
    let display = truncate_name(&entry.name);
    if entry.is_dir {
        format!(
            "<img class=\"icon\" src=\"/assets/dir.svg\" alt=\"\"> <a href=\"{}\">{}/</a>",
            escape_attr(&directory_href(&entry.relative_path, gallery)),
            escape_html(&display)
        )
    } else {
        format!(
            "<img class=\"icon\" src=\"/assets/file.svg\" alt=\"\"> <a href=\"{}\">{}</a>",
            escape_attr(&encode_href(&entry.relative_path)),
            escape_html(&display)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RenderMode;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn entry(name: &str, is_dir: bool, kind: MediaKind) -> Entry {
        Entry {
            name: name.to_string(),
            absolute_path: PathBuf::from("/srv").join(name),
            relative_path: format!("album/{}", name),
            is_dir,
            media_kind: kind,
        }
    }

    #[test]
    fn list_keeps_order_and_marks_directories() {
        let entries = vec![
            entry("sub", true, MediaKind::Other),
            entry("a.jpg", false, MediaKind::Image),
        ];
        let html = render_list(&entries);
        let sub = html.find("href=\"/album/sub/\"").unwrap();
        let jpg = html.find("href=\"/album/a.jpg\"").unwrap();
        assert!(sub < jpg);
        assert!(html.contains(">sub/</a>"));
    }

    #[test]
    fn list_truncates_long_names_but_not_links() {
        let long = format!("{}.txt", "n".repeat(50));
        let html = render_list(&[entry(&long, false, MediaKind::Other)]);
        assert!(html.contains(&format!(">{}...</a>", "n".repeat(40))));
        assert!(html.contains(&format!("href=\"/album/{}\"", long)));
    }

    #[test]
    fn gallery_uses_thumbnails_when_available() {
        let entries = vec![
            entry("with", true, MediaKind::Other),
            entry("without", true, MediaKind::Other),
            entry("pic.png", false, MediaKind::Image),
            entry("notes.txt", false, MediaKind::Other),
        ];
        let html = render_gallery(&entries, |dir| {
            (dir == "album/with").then(|| "album/with/cover one.jpg".to_string())
        });
        assert!(html.contains("src=\"/album/with/cover%20one.jpg?width=140\""));
        assert!(html.contains("src=\"/assets/dir.svg\" alt=\"\"> <a href=\"/album/without/?gallery=true\""));
        assert!(html.contains("class=\"photo\" src=\"/album/pic.png\""));
        assert!(html.contains("src=\"/assets/file.svg\" alt=\"\"> <a href=\"/album/notes.txt\""));
    }

    #[test]
    fn names_are_escaped() {
        let html = render_list(&[entry("<b>.txt", false, MediaKind::Other)]);
        assert!(html.contains("&lt;b&gt;.txt"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn shuffled_gallery_keeps_directories_first() {
        let tmp = TempDir::new().unwrap();
        for d in ["d1", "d2"] {
            std::fs::create_dir(tmp.path().join(d)).unwrap();
        }
        for i in 0..8 {
            std::fs::write(tmp.path().join(format!("{}.txt", i)), b"x").unwrap();
        }
        let component = ListingComponent::new(ListingService::new(tmp.path().to_path_buf()));
        let ctx = RenderContext {
            root_dir: Arc::new(tmp.path().to_path_buf()),
            current_dir: String::new(),
            mode: RenderMode::Gallery,
            shuffle: true,
        };
        let html = component.render(&ctx).unwrap();
        let d1 = html.find("/d1/").unwrap();
        let d2 = html.find("/d2/").unwrap();
        let first_file = html.find(".txt").unwrap();
        assert!(d1 < d2 && d2 < first_file);
    }
}
