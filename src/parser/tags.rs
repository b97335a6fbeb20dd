//! Doc comment tag parser.
//!
//! Turns the inside of one `/** ... */` block into a [`DocNode`]:
//!
//! - text before the first recognized `@tag` line is the description
//! - each recognized tag line opens a section; continuation lines are
//!   appended to it until the next recognized tag
//! - tag syntax is `@tag [{Type}] [name] body`
//! - the first primary tag (`@class`, `@cfg`, `@property`, `@method`,
//!   `@event`) decides the node kind; none at all means a class

use crate::error::Diagnostic;
use crate::model::*;
use regex::Regex;
use std::sync::LazyLock;

static RE_TAG_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@([A-Za-z]\w*)\b(.*)$").unwrap());

static RE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][\w$.]*$").unwrap());

/// Recognized tags. Anything else is text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Class,
    Cfg,
    Property,
    Method,
    Event,
    Constructor,
    Type,
    Param,
    Return,
    Extends,
    Mixins,
    Singleton,
    Private,
}

impl Tag {
    fn from_name(name: &str) -> Option<Tag> {
        Some(match name {
            "class" => Tag::Class,
            "cfg" => Tag::Cfg,
            "property" => Tag::Property,
            "method" | "function" => Tag::Method,
            "event" => Tag::Event,
            "constructor" => Tag::Constructor,
            "type" => Tag::Type,
            "param" => Tag::Param,
            "return" | "returns" => Tag::Return,
            "extends" => Tag::Extends,
            "mixins" => Tag::Mixins,
            "singleton" => Tag::Singleton,
            "private" => Tag::Private,
            _ => return None,
        })
    }

    /// Tag kinds that decide what the node documents.
    fn primary_kind(self) -> Option<TagKind> {
        match self {
            Tag::Class => Some(TagKind::Class),
            Tag::Cfg => Some(TagKind::Cfg),
            Tag::Property => Some(TagKind::Property),
            Tag::Method => Some(TagKind::Method),
            Tag::Event => Some(TagKind::Event),
            _ => None,
        }
    }
}

/// One recognized tag line plus its continuation lines.
#[derive(Debug)]
struct Section {
    tag: Tag,
    /// Tag spelling as written, for diagnostics
    spelling: String,
    text: String,
    line: usize,
}

/// Result of reading `{Type}` off the front of a tag.
enum TypeRead<'a> {
    Absent(&'a str),
    Found(String, &'a str),
    Unclosed,
}

/// How a tag spells its name token, if it has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameMode {
    None,
    Plain,
    /// `name` or `[name]` / `[name=default]` for optional parameters
    Bracketed,
}

/// `[{Type}] [name] body`
#[derive(Debug, Default)]
struct Header {
    ty: Option<String>,
    name: Option<String>,
    optional: bool,
    body: String,
}

/// Parse a doc comment body into a node. `line` is where the comment opens
/// in its unit; diagnostics are reported relative to it.
pub fn parse_comment(text: &str, line: usize, diags: &mut Vec<Diagnostic>) -> DocNode {
    let (description, sections) = split_sections(text, line, diags);

    let kind = detect_kind(&sections);
    let mut node = DocNode::new(kind);
    node.line = line;

    let mut desc_parts: Vec<String> = Vec::new();
    push_text(&mut desc_parts, &description);

    let mut primary_seen = false;
    for section in &sections {
        match section.tag {
            Tag::Class | Tag::Cfg | Tag::Property | Tag::Method | Tag::Event => {
                let tag_kind = section.tag.primary_kind().unwrap_or(TagKind::Class);
                if primary_seen || tag_kind != kind {
                    diags.push(Diagnostic::MalformedTag {
                        tag: section.spelling.clone(),
                        line: section.line,
                        reason: "conflicting tag kind, kept as text",
                    });
                    push_text(&mut desc_parts, &format!("@{} {}", section.spelling, section.text));
                    continue;
                }
                primary_seen = true;
                let with_type = matches!(section.tag, Tag::Cfg | Tag::Property);
                let header = read_header(section, with_type, NameMode::Plain, diags);
                node.ty = header.ty;
                node.name = header.name;
                push_text(&mut desc_parts, &header.body);
            }
            Tag::Constructor => {
                if kind == TagKind::Method && !primary_seen {
                    primary_seen = true;
                    node.name = Some("constructor".to_string());
                }
                push_text(&mut desc_parts, &section.text);
            }
            Tag::Type => {
                let header = read_header(section, true, NameMode::None, diags);
                let ty = header.ty.or_else(|| first_word(&header.body));
                if node.ty.is_none() {
                    node.ty = ty;
                }
            }
            Tag::Param => {
                let header = read_header(section, true, NameMode::Bracketed, diags);
                let mut param = DocNode::new(TagKind::Param);
                param.line = section.line;
                param.name = header.name;
                param.ty = header.ty;
                param.optional = header.optional;
                param.description = header.body;
                node.params.push(param);
            }
            Tag::Return => {
                let header = read_header(section, true, NameMode::None, diags);
                node.returns = Some(ReturnDoc {
                    ty: header.ty,
                    description: header.body,
                });
            }
            Tag::Extends => {
                let header = read_header(section, false, NameMode::Plain, diags);
                node.extends = header.name;
                push_text(&mut desc_parts, &header.body);
            }
            Tag::Mixins => {
                let (first, rest) = section.text.split_once('\n').unwrap_or((section.text.as_str(), ""));
                node.mixins.extend(first.split_whitespace().map(str::to_string));
                push_text(&mut desc_parts, rest);
            }
            Tag::Singleton => {
                node.singleton = true;
                push_text(&mut desc_parts, &section.text);
            }
            Tag::Private => {
                node.private = true;
                push_text(&mut desc_parts, &section.text);
            }
        }
    }

    node.description = desc_parts.join("\n");
    node
}

/// Strip ` * ` decoration and split into description and tag sections.
fn split_sections(text: &str, line: usize, diags: &mut Vec<Diagnostic>) -> (String, Vec<Section>) {
    let mut description: Vec<&str> = Vec::new();
    let mut sections: Vec<Section> = Vec::new();

    for (i, raw) in text.lines().enumerate() {
        let content = strip_decoration(raw);
        let trimmed = content.trim();

        if let Some(caps) = RE_TAG_LINE.captures(trimmed) {
            let spelling = &caps[1];
            match Tag::from_name(spelling) {
                Some(tag) => {
                    sections.push(Section {
                        tag,
                        spelling: spelling.to_string(),
                        text: caps[2].trim_start().to_string(),
                        line: line + i,
                    });
                    continue;
                }
                None => diags.push(Diagnostic::UnknownTag {
                    tag: spelling.to_string(),
                    line: line + i,
                }),
            }
        }

        match sections.last_mut() {
            Some(section) => {
                section.text.push('\n');
                section.text.push_str(content);
            }
            None => description.push(content),
        }
    }

    (description.join("\n").trim().to_string(), sections)
}

/// Remove leading whitespace, one `*` and one following space.
fn strip_decoration(line: &str) -> &str {
    let line = line.trim_start();
    match line.strip_prefix('*') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => line,
    }
}

fn detect_kind(sections: &[Section]) -> TagKind {
    if let Some(kind) = sections.iter().find_map(|s| s.tag.primary_kind()) {
        return kind;
    }
    if sections.iter().any(|s| s.tag == Tag::Constructor) {
        return TagKind::Method;
    }
    TagKind::Class
}

/// Read `[{Type}] [name] body` from a section. A broken type or name
/// bracket leaves everything as body text and records a diagnostic.
fn read_header(
    section: &Section,
    with_type: bool,
    names: NameMode,
    diags: &mut Vec<Diagnostic>,
) -> Header {
    let text = section.text.trim_start();
    let malformed = |diags: &mut Vec<Diagnostic>, reason: &'static str| {
        diags.push(Diagnostic::MalformedTag {
            tag: section.spelling.clone(),
            line: section.line,
            reason,
        });
        Header {
            body: text.trim().to_string(),
            ..Default::default()
        }
    };

    let (ty, rest) = if with_type {
        match read_type(text) {
            TypeRead::Absent(rest) => (None, rest),
            TypeRead::Found(ty, rest) => (Some(ty), rest),
            TypeRead::Unclosed => return malformed(diags, "type bracket never closed"),
        }
    } else {
        (None, text)
    };

    let rest = rest.trim_start();
    let mut header = Header {
        ty,
        ..Default::default()
    };

    if names == NameMode::None {
        header.body = rest.trim().to_string();
        return header;
    }

    if names == NameMode::Bracketed && rest.starts_with('[') {
        let Some(close) = rest.find(']') else {
            return malformed(diags, "optional name bracket never closed");
        };
        let inner = &rest[1..close];
        let name = inner.split('=').next().unwrap_or(inner).trim();
        if RE_NAME.is_match(name) {
            header.name = Some(name.to_string());
            header.optional = true;
        }
        header.body = rest[close + 1..].trim().to_string();
        return header;
    }

    let token_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let token = &rest[..token_end];
    if RE_NAME.is_match(token) {
        header.name = Some(token.to_string());
        header.body = rest[token_end..].trim().to_string();
    } else {
        header.body = rest.trim().to_string();
    }
    header
}

/// Read a brace-balanced `{Type}` from the front of `text`.
fn read_type(text: &str) -> TypeRead<'_> {
    if !text.starts_with('{') {
        return TypeRead::Absent(text);
    }
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return TypeRead::Found(text[1..i].trim().to_string(), &text[i + 1..]);
                }
            }
            _ => {}
        }
    }
    TypeRead::Unclosed
}

fn first_word(text: &str) -> Option<String> {
    text.split_whitespace().next().map(str::to_string)
}

fn push_text(parts: &mut Vec<String>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        parts.push(text.to_string());
    }
}
