//! Renderer module — trait-based format dispatch.

pub mod html;
pub mod json;

use crate::model::ClassMap;
use crate::page::PageModel;
use crate::tree::NamespaceTree;
use anyhow::{anyhow, Result};

/// Trait for rendering one class page into a specific output format.
pub trait Renderer {
    fn render(&self, page: &PageModel) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "html" => Ok(Box::new(html::HtmlRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use html or json", format)),
    }
}

/// The navigation script: class tree data plus an empty icon map.
pub fn nav_script(tree: &NamespaceTree, classes: &ClassMap) -> Result<String> {
    let data = serde_json::to_string(&tree.to_nav(classes))?;
    Ok(format!("Docs.classData = {};Docs.icons = {{}};", data))
}
