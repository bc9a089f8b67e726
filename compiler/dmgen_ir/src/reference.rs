//! Generic type reference expressions.
//!
//! Schema keys and field types are textual references such as
//! `SortedMap<AccountId, Asset>` or `iroha_data_model::Name`. This module
//! parses them into a [`TypeReference`] tree.
//!
//! # Probing
//!
//! Not every schema key is a well-formed reference (`[u8; 32]`, for example,
//! tokenizes into two top-level identifiers). [`TypeReference::parse`] is a
//! *probe*: it returns `None` for such input and callers fall back to matching
//! on the raw key. [`TypeReference::parse_detailed`] reports why parsing
//! failed without changing what the probe accepts.

use std::fmt;

use smallvec::SmallVec;

/// Parsed reference: identifier plus ordered generic arguments.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeReference {
    id: String,
    args: Vec<TypeReference>,
}

/// Why a reference string could not be parsed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseRefError {
    #[error("`<` at byte {offset} has no preceding identifier")]
    OpenWithoutHead { offset: usize },
    #[error("unbalanced `>` at byte {offset}")]
    UnbalancedClose { offset: usize },
    #[error("{depth} unclosed `<`")]
    Unclosed { depth: usize },
    #[error("expected exactly one top-level identifier, found {count}")]
    NotSingle { count: usize },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Token<'a> {
    Open,
    Close,
    Ident(&'a str),
}

impl TypeReference {
    pub fn new(id: impl Into<String>, args: Vec<TypeReference>) -> Self {
        Self {
            id: id.into(),
            args,
        }
    }

    /// Reference without generic arguments.
    pub fn plain(id: impl Into<String>) -> Self {
        Self::new(id, Vec::new())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn args(&self) -> &[TypeReference] {
        &self.args
    }

    /// Probe `src`; `None` when it is not a single well-formed reference.
    pub fn parse(src: &str) -> Option<Self> {
        Self::parse_detailed(src).ok()
    }

    /// Parse `src`, explaining failures.
    pub fn parse_detailed(src: &str) -> Result<Self, ParseRefError> {
        // Bottom of the stack is a synthetic root collecting top-level items.
        let mut stack: SmallVec<[TypeReference; 4]> = SmallVec::new();
        stack.push(TypeReference::plain("__root__"));

        for (offset, token) in tokenize(src) {
            match token {
                Token::Open => {
                    let head = stack
                        .last_mut()
                        .and_then(|top| top.args.pop())
                        .ok_or(ParseRefError::OpenWithoutHead { offset })?;
                    stack.push(head);
                }
                Token::Close => {
                    if stack.len() < 2 {
                        return Err(ParseRefError::UnbalancedClose { offset });
                    }
                    if let Some(done) = stack.pop() {
                        if let Some(parent) = stack.last_mut() {
                            parent.args.push(done);
                        }
                    }
                }
                Token::Ident(id) => {
                    if let Some(top) = stack.last_mut() {
                        top.args.push(TypeReference::plain(id));
                    }
                }
            }
        }

        if stack.len() > 1 {
            return Err(ParseRefError::Unclosed {
                depth: stack.len() - 1,
            });
        }
        let mut root = stack
            .pop()
            .ok_or(ParseRefError::NotSingle { count: 0 })?;
        match root.args.len() {
            1 => Ok(root.args.remove(0)),
            count => Err(ParseRefError::NotSingle { count }),
        }
    }
}

impl fmt::Display for TypeReference {
    /// Canonical form: `Id<Arg, Arg>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)?;
        if let Some((first, rest)) = self.args.split_first() {
            write!(f, "<{first}")?;
            for arg in rest {
                write!(f, ", {arg}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

fn is_word(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Split into `<`, `>` and identifiers (word characters joined by `::`).
///
/// Anything else is a separator. Path-qualified identifiers keep only their
/// last segment.
fn tokenize(src: &str) -> impl Iterator<Item = (usize, Token<'_>)> {
    let bytes = src.as_bytes();
    let mut pos = 0;
    std::iter::from_fn(move || {
        while pos < bytes.len() {
            let start = pos;
            match bytes[pos] {
                b'<' => {
                    pos += 1;
                    return Some((start, Token::Open));
                }
                b'>' => {
                    pos += 1;
                    return Some((start, Token::Close));
                }
                _ => {}
            }
            loop {
                if pos < bytes.len() && is_word(bytes[pos]) {
                    pos += 1;
                } else if bytes[pos..].starts_with(b"::") {
                    pos += 2;
                } else {
                    break;
                }
            }
            if pos > start {
                let word = &src[start..pos];
                let last = word.rsplit("::").next().unwrap_or(word);
                return Some((start, Token::Ident(last)));
            }
            // Separator; skip one whole char.
            pos += src[pos..].chars().next().map_or(1, char::len_utf8);
        }
        None
    })
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
