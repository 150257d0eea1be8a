//! Page renderers.

mod html;

pub use html::HtmlRenderer;
