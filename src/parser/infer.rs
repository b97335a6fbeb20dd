//! Shallow signature inference from the code that follows a doc comment.
//!
//! No parsing: a handful of anchored patterns are tried against the leading
//! text of the code blob and the first match wins.

use regex::Regex;
use std::sync::LazyLock;

static RE_FUNCTION_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^function\s+([\w$]+)\s*\(([^)]*)\)").unwrap());

static RE_ASSIGN_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:var|let|const)\s+)?([\w$]+(?:\.[\w$]+)*)\s*=\s*function\b[^(]*\(([^)]*)\)")
        .unwrap()
});

static RE_PROP_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^([\w$]+|"[^"]*"|'[^']*')\s*:\s*function\b[^(]*\(([^)]*)\)"#).unwrap()
});

static RE_ASSIGN_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:var|let|const)\s+)?([\w$]+(?:\.[\w$]+)*)\s*=\s*([^=\s].*)").unwrap()
});

static RE_PROP_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^([\w$]+|"[^"]*"|'[^']*')\s*:\s*(.*)"#).unwrap());

static RE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(?:\d|\.\d)").unwrap());

static RE_BOOLEAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:true|false)\b").unwrap());

/// What could be read off the code. Every field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inferred {
    /// Full name as written, possibly dotted (`Ext.Panel`, `foo`)
    pub name: Option<String>,
    pub ty: Option<String>,
    /// Parameter identifiers when the code is a function
    pub params: Vec<String>,
}

/// Infer a name and type from the leading portion of `code`.
pub fn infer(code: &str) -> Inferred {
    let code = skip_trivia(code);

    for re in [&*RE_FUNCTION_DECL, &*RE_ASSIGN_FUNCTION, &*RE_PROP_FUNCTION] {
        if let Some(caps) = re.captures(code) {
            return Inferred {
                name: Some(unquote(&caps[1]).to_string()),
                ty: Some("Function".to_string()),
                params: split_params(&caps[2]),
            };
        }
    }

    for re in [&*RE_ASSIGN_VALUE, &*RE_PROP_VALUE] {
        if let Some(caps) = re.captures(code) {
            return Inferred {
                name: Some(unquote(&caps[1]).to_string()),
                ty: literal_type(&caps[2]).map(str::to_string),
                params: Vec::new(),
            };
        }
    }

    Inferred::default()
}

/// Skip leading whitespace and ordinary comments.
fn skip_trivia(mut code: &str) -> &str {
    loop {
        code = code.trim_start();
        if let Some(rest) = code.strip_prefix("//") {
            code = rest.find('\n').map_or("", |i| &rest[i..]);
        } else if let Some(rest) = code.strip_prefix("/*") {
            code = rest.find("*/").map_or("", |i| &rest[i + 2..]);
        } else {
            return code;
        }
    }
}

fn unquote(name: &str) -> &str {
    name.trim_matches(|c| c == '"' || c == '\'')
}

/// `a, b = 1, ...rest` → `["a", "b", "rest"]`
fn split_params(list: &str) -> Vec<String> {
    list.split(',')
        .map(|p| p.split('=').next().unwrap_or(p).trim().trim_start_matches("..."))
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Type of a literal value, if it is one.
fn literal_type(value: &str) -> Option<&'static str> {
    let value = value.trim_start();
    let ty = match value.chars().next()? {
        '"' | '\'' | '`' => "String",
        '[' => "Array",
        '{' => "Object",
        '/' => "RegExp",
        _ if RE_NUMBER.is_match(value) => "Number",
        _ if RE_BOOLEAN.is_match(value) => "Boolean",
        _ if value.starts_with("function") => "Function",
        _ => return None,
    };
    Some(ty)
}
