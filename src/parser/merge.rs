//! Merge a parsed doc node with what can be inferred from its code.
//!
//! Tag-declared values always win; inference only fills gaps. The tag kind
//! is never changed here.

use super::infer::{infer, Inferred};
use crate::model::*;

/// Fill the unset name/type (and parameter list) of `node` from `code`.
pub fn merge(mut node: DocNode, code: &str) -> DocNode {
    let Inferred { name, ty, params } = infer(code);

    if node.name.is_none() {
        node.name = match node.kind {
            TagKind::Class => name,
            _ => name.map(|n| member_name(&n).to_string()),
        };
    }

    // a class has no value type; `Foo = function() {}` is its constructor
    if node.ty.is_none() && node.kind != TagKind::Class {
        node.ty = ty;
    }

    if matches!(node.kind, TagKind::Method | TagKind::Event) && node.params.is_empty() {
        node.params = params
            .into_iter()
            .map(|p| {
                let mut param = DocNode::new(TagKind::Param);
                param.name = Some(p);
                param.line = node.line;
                param
            })
            .collect();
    }

    node
}

/// `Ext.Panel.prototype.render` → `render`
fn member_name(full: &str) -> &str {
    full.rsplit('.').next().unwrap_or(full)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(kind: TagKind, name: Option<&str>) -> DocNode {
        let mut node = DocNode::new(kind);
        node.name = name.map(str::to_string);
        node
    }

    #[test]
    fn class_takes_full_dotted_name() {
        let merged = merge(node(TagKind::Class, None), "\nExt.form.Field = Ext.extend(Ext.Component, {");
        assert_eq!(merged.name.as_deref(), Some("Ext.form.Field"));
    }

    #[test]
    fn member_takes_last_segment() {
        let merged = merge(
            node(TagKind::Method, None),
            "\nExt.form.Field.prototype.focus = function(select) {",
        );
        assert_eq!(merged.name.as_deref(), Some("focus"));
        assert_eq!(merged.params.len(), 1);
        assert_eq!(merged.params[0].name.as_deref(), Some("select"));
    }

    #[test]
    fn tag_values_win() {
        let mut cfg = node(TagKind::Cfg, Some("title"));
        cfg.ty = Some("String".into());
        let merged = merge(cfg, "\nheading: 42,");
        assert_eq!(merged.name.as_deref(), Some("title"));
        assert_eq!(merged.ty.as_deref(), Some("String"));
    }

    #[test]
    fn type_filled_when_missing() {
        let merged = merge(node(TagKind::Property, Some("width")), "\nwidth: 100,");
        assert_eq!(merged.ty.as_deref(), Some("Number"));
    }

    #[test]
    fn class_gets_no_inferred_type() {
        let merged = merge(node(TagKind::Class, None), "\nFoo = function(config) {};");
        assert_eq!(merged.name.as_deref(), Some("Foo"));
        assert_eq!(merged.ty, None);
    }

    #[test]
    fn kind_is_never_reclassified() {
        let merged = merge(node(TagKind::Cfg, None), "\nonClick: function(e) {}");
        assert_eq!(merged.kind, TagKind::Cfg);
        assert_eq!(merged.name.as_deref(), Some("onClick"));
        assert!(merged.params.is_empty());
    }

    #[test]
    fn documented_params_are_kept() {
        let mut method = node(TagKind::Method, None);
        let mut param = DocNode::new(TagKind::Param);
        param.name = Some("documented".into());
        method.params.push(param);
        let merged = merge(method, "\nrun: function(a, b) {}");
        assert_eq!(merged.params.len(), 1);
        assert_eq!(merged.params[0].name.as_deref(), Some("documented"));
    }

    #[test]
    fn unnamed_member_stays_unnamed() {
        let merged = merge(node(TagKind::Event, None), "\n})();");
        assert_eq!(merged.name, None);
    }
}
