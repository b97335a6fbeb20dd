//! Namespace tree built from dotted class names, plus its navigation JSON.

use crate::model::ClassMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// One namespace segment. A node may name a class, have children, or both
/// (when `A.B` and `A.B.C` are both classes).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceTree {
    pub children: BTreeMap<String, NamespaceTree>,
    /// Key of the class in the [`ClassMap`] this node stands for
    pub class: Option<String>,
}

impl NamespaceTree {
    /// Build the tree for every class in the map.
    pub fn build(classes: &ClassMap) -> Self {
        let mut root = NamespaceTree::default();
        for name in classes.keys() {
            let mut node = &mut root;
            for segment in name.split('.') {
                node = node.children.entry(segment.to_string()).or_default();
            }
            node.class = Some(name.clone());
        }
        root
    }

    /// Walk the segments of a dotted name.
    pub fn find(&self, name: &str) -> Option<&NamespaceTree> {
        name.split('.')
            .try_fold(self, |node, segment| node.children.get(segment))
    }

    /// Navigation tree in the shape the page viewer expects.
    pub fn to_nav(&self, classes: &ClassMap) -> NavNode {
        NavNode {
            id: "apidocs".to_string(),
            text: "API Documentation".to_string(),
            icon_cls: "icon-docs",
            cls: None,
            href: None,
            is_class: false,
            single_click_expand: true,
            leaf: false,
            children: self.nav_children("", classes),
        }
    }

    fn nav_children(&self, prefix: &str, classes: &ClassMap) -> Vec<NavNode> {
        let mut packages = Vec::new();
        let mut leaves = Vec::new();

        for (segment, child) in &self.children {
            let path = if prefix.is_empty() {
                segment.clone()
            } else {
                format!("{}.{}", prefix, segment)
            };

            if !child.children.is_empty() {
                packages.push(NavNode {
                    id: format!("pkg-{}", path),
                    text: segment.clone(),
                    icon_cls: "icon-pkg",
                    cls: Some("package"),
                    href: None,
                    is_class: false,
                    single_click_expand: true,
                    leaf: false,
                    children: child.nav_children(&path, classes),
                });
            }

            if let Some(ref class_name) = child.class {
                let singleton = classes
                    .get(class_name)
                    .is_some_and(|cls| cls.doc.singleton);
                leaves.push(NavNode {
                    id: class_name.clone(),
                    text: segment.clone(),
                    icon_cls: if singleton { "icon-singleton" } else { "icon-cls" },
                    cls: Some("cls"),
                    href: Some(format!("{}.html", class_name)),
                    is_class: true,
                    single_click_expand: false,
                    leaf: true,
                    children: Vec::new(),
                });
            }
        }

        packages.extend(leaves);
        packages
    }
}

/// Serialized navigation node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavNode {
    pub id: String,
    pub text: String,
    pub icon_cls: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cls: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_class: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub single_click_expand: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub leaf: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavNode>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;

    fn classes(names: &[&str]) -> ClassMap {
        names
            .iter()
            .map(|name| {
                let mut doc = DocNode::new(TagKind::Class);
                doc.name = Some(name.to_string());
                (name.to_string(), ClassAggregate::new(name.to_string(), doc))
            })
            .collect()
    }

    #[test]
    fn splits_names_into_segments() {
        let tree = NamespaceTree::build(&classes(&["Ext.Panel", "Ext.form.Field"]));
        let ext = &tree.children["Ext"];
        assert_eq!(ext.class, None);
        assert_eq!(ext.children["Panel"].class.as_deref(), Some("Ext.Panel"));
        assert_eq!(
            ext.children["form"].children["Field"].class.as_deref(),
            Some("Ext.form.Field")
        );
    }

    #[test]
    fn class_can_also_be_namespace() {
        let tree = NamespaceTree::build(&classes(&["A.B", "A.B.C"]));
        let b = tree.find("A.B").unwrap();
        assert_eq!(b.class.as_deref(), Some("A.B"));
        assert_eq!(b.children["C"].class.as_deref(), Some("A.B.C"));
        assert_eq!(tree.find("A.B.C").unwrap().class.as_deref(), Some("A.B.C"));
        assert!(tree.find("A.X").is_none());
    }

    #[test]
    fn build_is_idempotent() {
        let map = classes(&["A.B", "A.B.C", "Z", "M.N"]);
        assert_eq!(NamespaceTree::build(&map), NamespaceTree::build(&map));
    }

    #[test]
    fn nav_puts_packages_before_classes() {
        let map = classes(&["Ext.Panel", "Ext.data.Store", "Ext.Button"]);
        let nav = NamespaceTree::build(&map).to_nav(&map);
        assert_eq!(nav.id, "apidocs");
        let ext = &nav.children[0];
        assert_eq!(ext.id, "pkg-Ext");
        let ids: Vec<&str> = ext.children.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["pkg-Ext.data", "Ext.Button", "Ext.Panel"]);
        assert_eq!(ext.children[1].href.as_deref(), Some("Ext.Button.html"));
    }

    #[test]
    fn nav_emits_package_and_leaf_for_collision() {
        let map = classes(&["A.B", "A.B.C"]);
        let nav = NamespaceTree::build(&map).to_nav(&map);
        let a = &nav.children[0];
        let ids: Vec<&str> = a.children.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["pkg-A.B", "A.B"]);
    }

    #[test]
    fn nav_json_shape() {
        let mut map = classes(&["Foo"]);
        map.get_mut("Foo").unwrap().doc.singleton = true;
        let nav = NamespaceTree::build(&map).to_nav(&map);
        let json = serde_json::to_value(&nav).unwrap();
        assert_eq!(json["singleClickExpand"], true);
        let leaf = &json["children"][0];
        assert_eq!(leaf["iconCls"], "icon-singleton");
        assert_eq!(leaf["isClass"], true);
        assert_eq!(leaf["leaf"], true);
        assert!(leaf.get("children").is_none());
    }
}
