//! Page model — inheritance resolution for one class page.

use crate::error::{Diagnostic, Error, Result};
use crate::model::*;
use serde::Serialize;
use std::collections::HashSet;

/// A member together with the class that declared it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedMember<'a> {
    #[serde(flatten)]
    pub node: &'a DocNode,
    pub origin: &'a str,
}

/// Own members in declaration order, then the parent's, and so on up the
/// `extends` chain.
///
/// A class reachable from itself is an [`Error::InheritanceCycle`]. A parent
/// name missing from `classes` ends the walk and records
/// [`Diagnostic::DanglingExtends`].
pub fn resolve_members<'a>(
    name: &str,
    classes: &'a ClassMap,
    diags: &mut Vec<Diagnostic>,
) -> Result<Vec<ResolvedMember<'a>>> {
    let chain = ancestry(name, classes, diags)?;
    Ok(flatten(&chain))
}

fn flatten<'a>(chain: &[&'a ClassAggregate]) -> Vec<ResolvedMember<'a>> {
    chain
        .iter()
        .flat_map(|&cls| {
            cls.all_members().map(move |node| ResolvedMember {
                node,
                origin: cls.name.as_str(),
            })
        })
        .collect()
}

/// The class followed by its known ancestors, nearest first.
fn ancestry<'a>(
    name: &str,
    classes: &'a ClassMap,
    diags: &mut Vec<Diagnostic>,
) -> Result<Vec<&'a ClassAggregate>> {
    let mut cls = classes
        .get(name)
        .ok_or_else(|| Error::UnknownClass(name.to_string()))?;
    let mut seen: HashSet<&str> = HashSet::new();
    let mut chain = Vec::new();

    loop {
        if !seen.insert(cls.name.as_str()) {
            let mut names: Vec<String> = chain
                .iter()
                .map(|c: &&ClassAggregate| c.name.clone())
                .collect();
            names.push(cls.name.clone());
            return Err(Error::InheritanceCycle { chain: names });
        }
        chain.push(cls);

        let Some(parent) = cls.extends() else {
            break;
        };
        match classes.get(parent) {
            Some(next) => cls = next,
            None => {
                diags.push(Diagnostic::DanglingExtends {
                    class: cls.name.clone(),
                    parent: parent.to_string(),
                });
                break;
            }
        }
    }
    Ok(chain)
}

/// Everything a renderer needs for one class page.
#[derive(Debug, Serialize)]
pub struct PageModel<'a> {
    #[serde(skip)]
    classes: &'a ClassMap,
    pub class: &'a ClassAggregate,
    /// Ancestor names, root first, ending with the class itself
    pub hierarchy: Vec<&'a str>,
    pub cfgs: Vec<ResolvedMember<'a>>,
    pub properties: Vec<ResolvedMember<'a>>,
    pub methods: Vec<ResolvedMember<'a>>,
    pub events: Vec<ResolvedMember<'a>>,
}

impl<'a> PageModel<'a> {
    /// Resolve members and group them per kind. A subclass member hides an
    /// inherited one of the same kind and name. `@private` members are left
    /// out unless `show_private` is set.
    pub fn build(
        name: &str,
        classes: &'a ClassMap,
        show_private: bool,
        diags: &mut Vec<Diagnostic>,
    ) -> Result<Self> {
        let chain = ancestry(name, classes, diags)?;
        let members = flatten(&chain);
        let class = chain[0];
        let hierarchy = chain.iter().rev().map(|c| c.name.as_str()).collect();

        let mut seen: HashSet<(TagKind, &str)> = HashSet::new();
        let mut page = PageModel {
            classes,
            class,
            hierarchy,
            cfgs: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            events: Vec::new(),
        };

        for member in members {
            let key = (member.node.kind, member.node.name.as_deref().unwrap_or_default());
            // a hidden private override still hides what it overrides
            if !seen.insert(key) || (member.node.private && !show_private) {
                continue;
            }
            if let Some(list) = page.members_mut(member.node.kind) {
                list.push(member);
            }
        }

        Ok(page)
    }

    /// Resolved members of one kind; empty for `Class` and `Param`.
    pub fn members(&self, kind: TagKind) -> &[ResolvedMember<'a>] {
        match kind {
            TagKind::Cfg => &self.cfgs,
            TagKind::Property => &self.properties,
            TagKind::Method => &self.methods,
            TagKind::Event => &self.events,
            TagKind::Class | TagKind::Param => &[],
        }
    }

    fn members_mut(&mut self, kind: TagKind) -> Option<&mut Vec<ResolvedMember<'a>>> {
        match kind {
            TagKind::Cfg => Some(&mut self.cfgs),
            TagKind::Property => Some(&mut self.properties),
            TagKind::Method => Some(&mut self.methods),
            TagKind::Event => Some(&mut self.events),
            TagKind::Class | TagKind::Param => None,
        }
    }

    /// Anchor of `member` on the page of `class`. The class and then its
    /// ancestors are searched, kinds in page order. `None` when no class on
    /// the chain declares it.
    pub fn member_anchor(&self, class: &str, member: &str) -> Option<String> {
        let mut visited = HashSet::new();
        let mut current = self.classes.get(class);
        while let Some(cls) = current {
            if !visited.insert(cls.name.as_str()) {
                break;
            }
            for kind in MEMBER_KINDS {
                let declared = cls
                    .members(kind)
                    .unwrap_or_default()
                    .iter()
                    .any(|m| m.name.as_deref() == Some(member));
                if declared {
                    return Some(anchor_id(kind, member));
                }
            }
            current = cls.extends().and_then(|parent| self.classes.get(parent));
        }
        None
    }
}

/// Element id of a member row: `cfg-title`, `event-destroy`.
pub fn anchor_id(kind: TagKind, name: &str) -> String {
    format!("{}-{}", kind, name)
}
