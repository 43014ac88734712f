//! Removal of non-article elements before parsing.

/// Elements whose content never belongs to the article body.
pub const STRIPPED_TAGS: &[&str] = &["script", "style", "nav", "footer", "header", "aside", "iframe", "noscript"];

/// Removes every [`STRIPPED_TAGS`] element (and its content) from a copy of `html`.
///
/// The rewrite is streaming; if the rewriter rejects the input the original
/// markup is returned untouched.
pub fn strip_unwanted_elements(html: &str) -> String {
    let mut output = String::new();
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings {
            element_content_handlers: STRIPPED_TAGS
                .iter()
                .map(|tag| {
                    lol_html::element!(*tag, |el| {
                        el.remove();
                        Ok(())
                    })
                })
                .collect(),
            ..Default::default()
        },
        |c: &[u8]| {
            output.push_str(&String::from_utf8_lossy(c));
        },
    );

    if rewriter.write(html.as_bytes()).is_err() {
        return html.to_string();
    }

    if rewriter.end().is_err() {
        return html.to_string();
    }

    output
}
