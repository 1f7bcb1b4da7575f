use crate::error::MarkupError;
use smallvec::SmallVec;

pub type Attrs = SmallVec<[(String, String); 2]>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Open { name: String, attrs: Attrs },
    Close { name: String },
    /// Trimmed, never empty.
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the token in the source.
    pub offset: usize,
}

/// Splits markup into a flat stream of tags and text.
///
/// Whitespace between tokens carries no meaning. A self-closing tag such as
/// `<layout/>` yields an `Open` immediately followed by its `Close`.
pub fn tokenize(src: &str) -> Result<Vec<Token>, MarkupError> {
    let mut tokens = Vec::new();
    let mut at = 0;

    while at < src.len() {
        let rest = &src[at..];

        if let Some(inner) = rest.strip_prefix('<') {
            let Some(len) = inner.find('>') else {
                let name = tag_name(inner).trim_start_matches('/');
                return Err(MarkupError::unclosed(name, at));
            };
            lex_tag(&inner[..len], at, &mut tokens);
            at += len + 2;
            continue;
        }

        let len = rest.find('<').unwrap_or(rest.len());
        let raw = &rest[..len];
        let text = raw.trim();
        if !text.is_empty() {
            let lead = raw.len() - raw.trim_start().len();
            tokens.push(Token {
                kind: TokenKind::Text(text.to_owned()),
                offset: at + lead,
            });
        }
        at += len;
    }

    Ok(tokens)
}

fn lex_tag(inner: &str, offset: usize, tokens: &mut Vec<Token>) {
    if let Some(name) = inner.strip_prefix('/') {
        tokens.push(Token {
            kind: TokenKind::Close {
                name: name.trim().to_owned(),
            },
            offset,
        });
        return;
    }

    let inner = inner.trim();
    let (inner, self_closing) = match inner.strip_suffix('/') {
        Some(body) => (body, true),
        None => (inner, false),
    };
    let name = tag_name(inner);
    let attrs = parse_attrs(&inner[name.len()..]);

    tokens.push(Token {
        kind: TokenKind::Open {
            name: name.to_owned(),
            attrs,
        },
        offset,
    });
    if self_closing {
        tokens.push(Token {
            kind: TokenKind::Close {
                name: name.to_owned(),
            },
            offset,
        });
    }
}

fn tag_name(inner: &str) -> &str {
    let inner = inner.trim_start();
    let end = inner.find(char::is_whitespace).unwrap_or(inner.len());
    &inner[..end]
}

/// `key="value"`, `key=value` and bare `key` (read as `"true"`).
fn parse_attrs(mut rest: &str) -> Attrs {
    let mut attrs = Attrs::new();
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            return attrs;
        }

        let key_len = rest
            .find(|c: char| c == '=' || c.is_whitespace())
            .unwrap_or(rest.len());
        let key = rest[..key_len].to_owned();
        rest = &rest[key_len..];

        let Some(after_eq) = rest.trim_start().strip_prefix('=') else {
            attrs.push((key, "true".to_owned()));
            continue;
        };
        let after_eq = after_eq.trim_start();

        let (value, consumed) = match after_eq.strip_prefix('"') {
            Some(quoted) => match quoted.find('"') {
                Some(end) => (&quoted[..end], end + 2),
                None => (quoted, after_eq.len()),
            },
            None => {
                let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
                (&after_eq[..end], end)
            }
        };
        attrs.push((key, value.to_owned()));
        rest = &after_eq[consumed..];
    }
}
