//! JSON renderer — the resolved page model for custom rendering pipelines.

use crate::page::PageModel;
use crate::render::Renderer;
use anyhow::{Context, Result};

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, page: &PageModel) -> Result<String> {
        let mut out = serde_json::to_string_pretty(page)
            .with_context(|| format!("failed to serialize page for {}", page.class.name))?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;

    #[test]
    fn members_carry_origin() {
        let mut doc = DocNode::new(TagKind::Class);
        doc.name = Some("Foo".into());
        let mut cls = ClassAggregate::new("Foo".into(), doc);
        let mut cfg = DocNode::new(TagKind::Cfg);
        cfg.name = Some("bar".into());
        cfg.ty = Some("String".into());
        cls.cfgs.push(cfg);
        let classes: ClassMap = [("Foo".to_string(), cls)].into_iter().collect();

        let mut diags = Vec::new();
        let page = PageModel::build("Foo", &classes, false, &mut diags).unwrap();
        let out = JsonRenderer.render(&page).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["cfgs"][0]["name"], "bar");
        assert_eq!(value["cfgs"][0]["type"], "String");
        assert_eq!(value["cfgs"][0]["origin"], "Foo");
        assert_eq!(value["hierarchy"][0], "Foo");
    }
}
