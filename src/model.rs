//! Data model for parsed documentation — format-agnostic.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Category of a documentation node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Class,
    Cfg,
    Property,
    Method,
    Event,
    Param,
}

impl TagKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TagKind::Class => "class",
            TagKind::Cfg => "cfg",
            TagKind::Property => "property",
            TagKind::Method => "method",
            TagKind::Event => "event",
            TagKind::Param => "param",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `@return {Type} text`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReturnDoc {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    pub description: String,
}

/// A single parsed and merged documentation block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocNode {
    pub kind: TagKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    pub description: String,
    /// @param sub-nodes, in declaration order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<DocNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returns: Option<ReturnDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub mixins: BTreeSet<String>,
    pub singleton: bool,
    pub private: bool,
    /// `[name]` syntax on a @param
    pub optional: bool,
    /// 1-based line of the doc comment within its unit
    #[serde(skip)]
    pub line: usize,
}

impl DocNode {
    pub fn new(kind: TagKind) -> Self {
        Self {
            kind,
            name: None,
            ty: None,
            description: String::new(),
            params: Vec::new(),
            returns: None,
            extends: None,
            mixins: BTreeSet::new(),
            singleton: false,
            private: false,
            optional: false,
            line: 0,
        }
    }

    /// Name or a `?` placeholder for diagnostics.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("?")
    }
}

/// Assembled documentation for one class. Owns its member lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassAggregate {
    pub name: String,
    /// The class-level doc node itself
    pub doc: DocNode,
    pub cfgs: Vec<DocNode>,
    pub properties: Vec<DocNode>,
    pub methods: Vec<DocNode>,
    pub events: Vec<DocNode>,
}

impl ClassAggregate {
    pub fn new(name: String, doc: DocNode) -> Self {
        Self {
            name,
            doc,
            cfgs: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn extends(&self) -> Option<&str> {
        self.doc.extends.as_deref()
    }

    /// Member list for a member kind; `None` for `Class` and `Param`.
    pub fn members(&self, kind: TagKind) -> Option<&[DocNode]> {
        match kind {
            TagKind::Cfg => Some(&self.cfgs),
            TagKind::Property => Some(&self.properties),
            TagKind::Method => Some(&self.methods),
            TagKind::Event => Some(&self.events),
            TagKind::Class | TagKind::Param => None,
        }
    }

    pub fn members_mut(&mut self, kind: TagKind) -> Option<&mut Vec<DocNode>> {
        match kind {
            TagKind::Cfg => Some(&mut self.cfgs),
            TagKind::Property => Some(&mut self.properties),
            TagKind::Method => Some(&mut self.methods),
            TagKind::Event => Some(&mut self.events),
            TagKind::Class | TagKind::Param => None,
        }
    }

    /// All members in page order, see [`MEMBER_KINDS`].
    pub fn all_members(&self) -> impl Iterator<Item = &DocNode> {
        MEMBER_KINDS
            .into_iter()
            .flat_map(move |kind| self.members(kind).unwrap_or_default())
    }
}

/// Class name → aggregate. Sorted for deterministic output.
pub type ClassMap = BTreeMap<String, ClassAggregate>;

/// Member kinds in the order pages list them.
pub const MEMBER_KINDS: [TagKind; 4] = [
    TagKind::Cfg,
    TagKind::Property,
    TagKind::Method,
    TagKind::Event,
];

/// A node that could not be attached to any class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Orphan {
    pub kind: TagKind,
    pub name: Option<String>,
    pub line: usize,
}

pub type OrphanReport = Vec<Orphan>;
