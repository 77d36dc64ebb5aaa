use log::debug;

use crate::types::RenderContext;
use crate::utils::{directory_href, escape_attr, escape_html};

/// Component for the header bar above a listing
pub struct NavigationComponent;

impl NavigationComponent {
    pub fn new() -> Self {
        Self
    }

    /// Mode toggle, shuffle link, up link and breadcrumbs
    pub fn build_header(&self, ctx: &RenderContext) -> String {
        debug!("Building header for '{}' (gallery: {})", ctx.current_dir, ctx.is_gallery());
        let gallery = ctx.is_gallery();

        let mut html = String::from("<nav class=\"nav\">");
        if gallery {
            html.push_str("<a href=\"?gallery=false\">View List</a>");
            html.push_str("<a href=\"?gallery=true&amp;shuffle=true\">Shuffle</a>");
        } else {
            html.push_str("<a href=\"?gallery=true\">View Gallery</a>");
        }
        if let Some(parent) = parent_dir(&ctx.current_dir) {
            html.push_str(&format!(
                "<a href=\"{}\"><img class=\"icon\" src=\"/assets/up.svg\" alt=\"\"> ..</a>",
                escape_attr(&directory_href(parent, gallery))
            ));
        }
        html.push_str("</nav>");
        html.push_str(&self.build_breadcrumbs(&ctx.current_dir, gallery));
        html
    }

    /// One link per ancestor of the current directory
    pub fn build_breadcrumbs(&self, current_dir: &str, gallery: bool) -> String {
        let mut html = format!(
            "<div class=\"crumbs\"><a href=\"{}\">/</a>",
            escape_attr(&directory_href("", gallery))
        );
        let mut walked = String::new();
        for segment in current_dir.split('/').filter(|s| !s.is_empty()) {
            if !walked.is_empty() {
                walked.push('/');
            }
            walked.push_str(segment);
            html.push_str(&format!(
                " <a href=\"{}\">{}</a> /",
                escape_attr(&directory_href(&walked, gallery)),
                escape_html(segment)
            ));
        }
        html.push_str("</div>");
        html
    }
}

impl Default for NavigationComponent {
    fn default() -> Self {
        Self::new()
    }
}

/// Parent of a normalized relative directory; `None` at the root
fn parent_dir(current: &str) -> Option<&str> {
    if current.is_empty() {
        return None;
    }
    Some(current.rsplit_once('/').map(|(parent, _)| parent).unwrap_or(""))
}
