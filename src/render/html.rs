//! HTML renderer — standalone class page with member tables.
//!
//! Descriptions are authored as HTML inside doc comments and are emitted as
//! is, apart from `{@link Class#member text}` references which become
//! anchors. Names and types are escaped.

use crate::model::*;
use crate::page::{anchor_id, PageModel, ResolvedMember};
use crate::render::Renderer;
use anyhow::Result;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static RE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{@link\s+([\w$.]*)(?:#([\w$]+))?(?:\s+([^}]*))?\}").unwrap()
});

pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, page: &PageModel) -> Result<String> {
        let cls = page.class;
        let mut out = String::new();

        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        out.push_str("<meta charset=\"utf-8\">\n");
        out.push_str(&format!("<title>{}</title>\n", html_escape(&cls.name)));
        out.push_str("<style>\n");
        out.push_str("body { font-family: system-ui, sans-serif; max-width: 60em; margin: 2em auto; padding: 0 1em; }\n");
        out.push_str("code { background: #f4f4f4; padding: 0.15em 0.3em; border-radius: 3px; }\n");
        out.push_str("table { border-collapse: collapse; width: 100%; }\n");
        out.push_str("th, td { text-align: left; vertical-align: top; padding: 0.4em; border-bottom: 1px solid #ddd; }\n");
        out.push_str("tr.inherited { color: #666; }\n");
        out.push_str(".tag { display: inline-block; font-size: 0.75em; padding: 0.1em 0.4em; border-radius: 3px; margin-left: 0.5em; background: #dea584; }\n");
        out.push_str("</style>\n");
        out.push_str("</head>\n<body>\n");

        // Heading
        out.push_str(&format!("<h1>{}", html_escape(&cls.name)));
        if cls.doc.singleton {
            out.push_str(" <span class=\"tag\">singleton</span>");
        }
        out.push_str("</h1>\n");

        // Hierarchy, root first
        if page.hierarchy.len() > 1 {
            let links: Vec<String> = page
                .hierarchy
                .iter()
                .map(|name| {
                    if *name == cls.name {
                        format!("<strong>{}</strong>", html_escape(name))
                    } else {
                        class_link(name)
                    }
                })
                .collect();
            out.push_str(&format!(
                "<p class=\"hierarchy\">{}</p>\n",
                links.join(" &gt; ")
            ));
        }

        if !cls.doc.mixins.is_empty() {
            let links: Vec<String> = cls.doc.mixins.iter().map(|m| class_link(m)).collect();
            out.push_str(&format!("<p class=\"mixins\">Mixins: {}</p>\n", links.join(", ")));
        }

        if !cls.doc.description.is_empty() {
            out.push_str(&format!(
                "<div class=\"description\">{}</div>\n",
                expand_links(&cls.doc.description, &cls.name, page)
            ));
        }

        // Constructor documented on the class comment
        if !cls.doc.params.is_empty() {
            out.push_str("<h2>Constructor</h2>\n");
            out.push_str(&format!(
                "<p><code>new {}({})</code></p>\n",
                html_escape(&cls.name),
                param_list(&cls.doc.params)
            ));
            out.push_str(&render_params(&cls.doc.params, &cls.name, page));
        }

        for kind in MEMBER_KINDS {
            out.push_str(&render_table(kind, page));
        }

        out.push_str("</body>\n</html>\n");
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "html"
    }
}

fn table_title(kind: TagKind) -> &'static str {
    match kind {
        TagKind::Cfg => "Config Options",
        TagKind::Property => "Public Properties",
        TagKind::Method => "Public Methods",
        TagKind::Event => "Public Events",
        TagKind::Class | TagKind::Param => "Members",
    }
}

fn render_table(kind: TagKind, page: &PageModel) -> String {
    let members = page.members(kind);
    if members.is_empty() {
        return String::new();
    }
    let title = table_title(kind);
    let mut out = String::new();
    out.push_str(&format!("<h2>{}</h2>\n<table>\n", html_escape(title)));
    out.push_str(&format!(
        "<tr><th>{}</th><th>Defined By</th></tr>\n",
        html_escape(title)
    ));
    for member in members {
        out.push_str(&render_row(member, page));
    }
    out.push_str("</table>\n");
    out
}

fn render_row(member: &ResolvedMember, page: &PageModel) -> String {
    let node = member.node;
    let inherited = member.origin != page.class.name;
    let id = html_escape(&anchor_id(node.kind, node.display_name()));

    let mut out = String::new();
    out.push_str(&format!(
        "<tr id=\"{}\"{}>\n<td>",
        id,
        if inherited { " class=\"inherited\"" } else { "" }
    ));
    out.push_str(&signature(node));
    if node.private {
        out.push_str(" <span class=\"tag\">private</span>");
    }

    if !node.description.is_empty() {
        out.push_str(&format!(
            "<div class=\"description\">{}</div>",
            expand_links(&node.description, member.origin, page)
        ));
    }
    if matches!(node.kind, TagKind::Method | TagKind::Event) {
        out.push_str(&render_params(&node.params, member.origin, page));
    }
    if let Some(ref ret) = node.returns {
        out.push_str(&format!(
            "<p class=\"returns\">Returns: <code>{}</code> {}</p>",
            html_escape(ret.ty.as_deref().unwrap_or("void")),
            expand_links(&ret.description, member.origin, page)
        ));
    }
    out.push_str("</td>\n");
    out.push_str(&format!("<td>{}</td>\n</tr>\n", class_link(member.origin)));
    out
}

/// `name : Type`, `name( params ) : Return` or `name : ( params )`.
fn signature(node: &DocNode) -> String {
    let name = format!("<code>{}</code>", html_escape(node.display_name()));
    match node.kind {
        TagKind::Method => {
            let ret = node
                .returns
                .as_ref()
                .and_then(|r| r.ty.as_deref())
                .unwrap_or("void");
            format!("{}( {} ) : {}", name, param_list(&node.params), html_escape(ret))
        }
        TagKind::Event => format!("{} : ( {} )", name, param_list(&node.params)),
        _ => match node.ty {
            Some(ref ty) => format!("{} : {}", name, html_escape(ty)),
            None => name,
        },
    }
}

/// `Type a, [Type b]`
fn param_list(params: &[DocNode]) -> String {
    params
        .iter()
        .map(|p| {
            let text = match p.ty {
                Some(ref ty) => format!("{} {}", ty, p.display_name()),
                None => p.display_name().to_string(),
            };
            let text = html_escape(&text);
            if p.optional {
                format!("[{}]", text)
            } else {
                text
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_params(params: &[DocNode], context: &str, page: &PageModel) -> String {
    if params.is_empty() {
        return String::new();
    }
    let mut out = String::from("<dl class=\"params\">");
    for p in params {
        out.push_str(&format!(
            "<dt><code>{}</code> : {}{}</dt>",
            html_escape(p.display_name()),
            html_escape(p.ty.as_deref().unwrap_or("Mixed")),
            if p.optional { " (optional)" } else { "" }
        ));
        if !p.description.is_empty() {
            out.push_str(&format!("<dd>{}</dd>", expand_links(&p.description, context, page)));
        }
    }
    out.push_str("</dl>");
    out
}

fn class_link(name: &str) -> String {
    let name = html_escape(name);
    format!("<a href=\"{}.html\">{}</a>", name, name)
}

/// Replace `{@link Class#member text}` with anchors. A missing class part
/// refers to `context`. Member fragments point at the row id of the member
/// on the target page; an unknown member links to the page alone.
fn expand_links(text: &str, context: &str, page: &PageModel) -> String {
    RE_LINK
        .replace_all(text, |caps: &Captures| {
            let class = caps.get(1).map(|m| m.as_str()).filter(|s| !s.is_empty());
            let member = caps.get(2).map(|m| m.as_str());
            let label = caps.get(3).map(|m| m.as_str().trim()).filter(|s| !s.is_empty());

            let target = class.unwrap_or(context);
            let href = match member.and_then(|m| page.member_anchor(target, m)) {
                Some(anchor) => format!("{}.html#{}", target, anchor),
                None => format!("{}.html", target),
            };
            let default_label = match (class, member) {
                (Some(c), Some(m)) => format!("{}.{}", c, m),
                (None, Some(m)) => m.to_string(),
                _ => target.to_string(),
            };
            format!(
                "<a href=\"{}\">{}</a>",
                html_escape(&href),
                label.map_or(default_label, str::to_string)
            )
        })
        .into_owned()
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
