//! Syntactic repairs for near-JSON model output.
//!
//! Each pass walks the text with string-literal tracking so that commas, brackets
//! and URLs inside string values are never touched. Only `LinkedArrayStrings`
//! rewrites a literal, and only an array element that is nothing but a bracketed
//! link.

use once_cell::sync::Lazy;
use regex::Regex;

static LINKED_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\[(https?://[^\]\s"\\]+)\](?:\(https?://[^)\s"\\]+\))?$"#)
        .expect("invalid linked url regex")
});

const URL_SCHEMES: [&str; 2] = ["https://", "http://"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairPass {
    /// `,` directly before `}` or `]` is dropped.
    TrailingCommas,
    /// `[ https://x, ]` becomes `["https://x"]`.
    BareUrlArrays,
    /// An array element `"[https://x](https://x)"` becomes `"https://x"`.
    LinkedArrayStrings,
}

impl RepairPass {
    pub const ORDER: [RepairPass; 3] = [
        RepairPass::TrailingCommas,
        RepairPass::BareUrlArrays,
        RepairPass::LinkedArrayStrings,
    ];

    pub fn apply(&self, text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        match self {
            RepairPass::TrailingCommas => remove_trailing_commas(&chars),
            RepairPass::BareUrlArrays => quote_bare_url_arrays(&chars),
            RepairPass::LinkedArrayStrings => unwrap_linked_array_strings(&chars),
        }
    }
}

/// Applies every pass in order.
pub fn repair(text: &str) -> String {
    RepairPass::ORDER
        .iter()
        .fold(text.to_string(), |acc, pass| pass.apply(&acc))
}

/// Index one past the closing quote of the string literal opening at `start`,
/// or `chars.len()` when the literal is unterminated.
fn string_end(chars: &[char], start: usize) -> usize {
    let mut escaped = false;
    for (offset, &c) in chars[start + 1..].iter().enumerate() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            return start + offset + 2;
        }
    }
    chars.len()
}

fn skip_whitespace(chars: &[char], mut i: usize) -> usize {
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    i
}

fn starts_with_at(chars: &[char], i: usize, needle: &str) -> bool {
    let mut idx = i;
    for n in needle.chars() {
        if chars.get(idx) != Some(&n) {
            return false;
        }
        idx += 1;
    }
    true
}

fn remove_trailing_commas(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '"' => {
                let end = string_end(chars, i);
                out.extend(&chars[i..end]);
                i = end;
            }
            ',' => {
                let next = skip_whitespace(chars, i + 1);
                if !matches!(chars.get(next), Some('}') | Some(']')) {
                    out.push(',');
                }
                i += 1;
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

fn quote_bare_url_arrays(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len() + 2);
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '"' => {
                let end = string_end(chars, i);
                out.extend(&chars[i..end]);
                i = end;
            }
            '[' => match bare_url_array(chars, i) {
                Some((url, end)) => {
                    out.push_str("[\"");
                    out.push_str(&url);
                    out.push_str("\"]");
                    i = end;
                }
                None => {
                    out.push('[');
                    i += 1;
                }
            },
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

/// Matches `[ <url> ,? ]` starting at the `[` at `open`; returns the url and the
/// index after the closing `]`.
fn bare_url_array(chars: &[char], open: usize) -> Option<(String, usize)> {
    let start = skip_whitespace(chars, open + 1);
    if !URL_SCHEMES.iter().any(|s| starts_with_at(chars, start, s)) {
        return None;
    }

    let mut end = start;
    while end < chars.len()
        && !chars[end].is_whitespace()
        && !matches!(chars[end], ',' | ']' | '[' | '{' | '}' | '"' | '\\')
    {
        end += 1;
    }
    let url: String = chars[start..end].iter().collect();

    let mut i = skip_whitespace(chars, end);
    if chars.get(i) == Some(&',') {
        i = skip_whitespace(chars, i + 1);
    }
    (chars.get(i) == Some(&']')).then_some((url, i + 1))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Array,
    Object,
}

fn unwrap_linked_array_strings(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len());
    let mut stack: Vec<Container> = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '"' => {
                let end = string_end(chars, i);
                let literal: String = chars[i..end].iter().collect();
                let in_array = stack.last() == Some(&Container::Array);
                match unwrap_linked_literal(&literal).filter(|_| in_array) {
                    Some(url) => {
                        out.push('"');
                        out.push_str(&url);
                        out.push('"');
                    }
                    None => out.push_str(&literal),
                }
                i = end;
                continue;
            }
            '[' => stack.push(Container::Array),
            '{' => stack.push(Container::Object),
            ']' | '}' => {
                stack.pop();
            }
            _ => {}
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

fn unwrap_linked_literal(literal: &str) -> Option<String> {
    let inner = literal.strip_prefix('"')?.strip_suffix('"')?;
    LINKED_URL
        .captures(inner)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
