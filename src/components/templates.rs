use crate::types::TemplateContext;
use crate::utils::escape_html;

const STYLE: &str = "body{font-family:sans-serif;margin:1em}\
.nav a{margin-right:1em}\
.crumbs{color:#666;margin:.5em 0}\
.icon{width:15px;vertical-align:middle}\
.thumb{width:140px;display:block}\
.photo{max-width:600px;width:100%;height:auto}\
.listing,.gallery{list-style:none;padding:0}\
.listing li{margin:.2em 0}\
.gallery li{margin:0 0 1em 0}";

/// Component for the HTML page shell
pub struct TemplateComponent;

impl TemplateComponent {
    pub fn new() -> Self {
        Self
    }

    /// Wrap rendered fragments into a complete document
    pub fn render_shell(&self, context: &TemplateContext) -> String {
        format!(
            "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\
<link rel=\"icon\" href=\"/favicon.ico\"><title>{}</title><style>{}</style></head>\
<body>{}<main>{}</main></body></html>",
            escape_html(&context.title),
            STYLE,
            context.header,
            context.content
        )
    }

    /// Generate a page from a title, a header bar and body content
    pub fn render_page(&self, title: &str, header: &str, content: &str) -> String {
        let context = TemplateContext {
            title: title.to_string(),
            header: header.to_string(),
            content: content.to_string(),
        };
        self.render_shell(&context)
    }
}

impl Default for TemplateComponent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_escaped_and_fragments_are_not() {
        let page = TemplateComponent::new().render_page("<a&b>", "<nav></nav>", "<ul></ul>");
        assert!(page.starts_with("<!doctype html>"));
        assert!(page.contains("<title>&lt;a&amp;b&gt;</title>"));
        assert!(page.contains("<nav></nav><main><ul></ul></main>"));
    }
}
