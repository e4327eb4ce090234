//! The semantic type grammar: atomic symbols, `<domain, codomain>` pairs,
//! the untyped marker `-` and the vacuous type `""`.
use super::error::TypeSyntaxError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A semantic type as a structured value.
///
/// `Untyped` and `Vacuous` only ever appear at the top level: they mark
/// placeholders (indices, traces awaiting abstraction) and semantically null
/// heads, and cannot be the domain or codomain of a function.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SemType {
    /// `-`
    Untyped,
    /// `""`
    Vacuous,
    Atom(String),
    Func(Box<SemType>, Box<SemType>),
}

impl SemType {
    pub fn atom(name: &str) -> Self {
        SemType::Atom(name.to_string())
    }

    pub fn func(domain: SemType, codomain: SemType) -> Self {
        SemType::Func(Box::new(domain), Box::new(codomain))
    }

    /// The individual type `e`.
    pub fn entity() -> Self {
        Self::atom("e")
    }

    /// The property type `<e, t>`, the only type Predicate Modification accepts.
    pub fn property() -> Self {
        Self::func(Self::entity(), Self::atom("t"))
    }

    /// Parses the textual notation. Surrounding whitespace is ignored, so
    /// `"  "` is the vacuous type.
    pub fn parse(text: &str) -> Result<Self, TypeSyntaxError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(SemType::Vacuous);
        }
        if trimmed == "-" {
            return Ok(SemType::Untyped);
        }

        let mut parser = TypeParser { src: text, pos: 0 };
        let ty = parser.parse_type()?;
        parser.skip_ws();
        if parser.pos < text.len() {
            return Err(TypeSyntaxError::TrailingInput {
                position: parser.pos,
                text: text.to_string(),
            });
        }
        Ok(ty)
    }

    pub fn domain(&self) -> Option<&SemType> {
        match self {
            SemType::Func(d, _) => Some(d),
            _ => None,
        }
    }

    pub fn codomain(&self) -> Option<&SemType> {
        match self {
            SemType::Func(_, c) => Some(c),
            _ => None,
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self, SemType::Func(..))
    }

    /// True for atoms and function types, i.e. anything Functional Application
    /// or Predicate Abstraction can consume.
    pub fn is_concrete(&self) -> bool {
        matches!(self, SemType::Atom(_) | SemType::Func(..))
    }

    /// Applies `self` as a function to `arg`, returning the codomain if `arg`
    /// is exactly the domain.
    pub fn apply_to(&self, arg: &SemType) -> Option<&SemType> {
        if is_left_prefix(arg, self) {
            self.codomain()
        } else {
            None
        }
    }
}

/// True iff `fn_type` is a function type whose domain structurally equals
/// `candidate`.
pub fn is_left_prefix(candidate: &SemType, fn_type: &SemType) -> bool {
    fn_type.domain() == Some(candidate)
}

pub fn domain_of(fn_type: &SemType) -> Option<&SemType> {
    fn_type.domain()
}

pub fn codomain_of(fn_type: &SemType) -> Option<&SemType> {
    fn_type.codomain()
}

impl fmt::Display for SemType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SemType::Untyped => write!(f, "-"),
            SemType::Vacuous => Ok(()),
            SemType::Atom(name) => write!(f, "{}", name),
            SemType::Func(d, c) => write!(f, "<{}, {}>", d, c),
        }
    }
}

impl TryFrom<String> for SemType {
    type Error = TypeSyntaxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        SemType::parse(&value)
    }
}

impl From<SemType> for String {
    fn from(ty: SemType) -> Self {
        ty.to_string()
    }
}

impl std::str::FromStr for SemType {
    type Err = TypeSyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SemType::parse(s)
    }
}

/// Recursive-descent parser over the non-placeholder part of the grammar.
struct TypeParser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> TypeParser<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn expect(&mut self, wanted: char) -> Result<(), TypeSyntaxError> {
        self.skip_ws();
        match self.peek() {
            Some(c) if c == wanted => {
                self.bump();
                Ok(())
            }
            found => Err(TypeSyntaxError::Expected {
                expected: wanted,
                found,
                position: self.pos,
                text: self.src.to_string(),
            }),
        }
    }

    fn parse_type(&mut self) -> Result<SemType, TypeSyntaxError> {
        self.skip_ws();
        match self.peek() {
            Some('<') => {
                self.bump();
                let domain = self.parse_type()?;
                self.expect(',')?;
                let codomain = self.parse_type()?;
                self.expect('>')?;
                Ok(SemType::func(domain, codomain))
            }
            Some(c) if is_atom_char(c) => {
                let start = self.pos;
                while matches!(self.peek(), Some(c) if is_atom_char(c)) {
                    self.bump();
                }
                Ok(SemType::Atom(self.src[start..self.pos].to_string()))
            }
            found => Err(TypeSyntaxError::ExpectedType {
                found,
                position: self.pos,
                text: self.src.to_string(),
            }),
        }
    }
}

fn is_atom_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\''
}
