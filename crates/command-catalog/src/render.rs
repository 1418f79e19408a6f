//! Markdown rendering for command bodies
//!
//! Rendering is delegated to pulldown-cmark; the catalog only chooses the
//! extensions.

use pulldown_cmark::{html, Options, Parser};

/// Turns a markdown body into display markup
pub trait Renderer: Send + Sync {
    fn render(&self, markdown: &str) -> String;
}

/// HTML renderer with GitHub-style tables, strikethrough and task lists
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, markdown: &str) -> String {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS;

        let parser = Parser::new_ext(markdown, options);
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}
