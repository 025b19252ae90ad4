//! Parsing and canonical printing of generic type signatures.
//!
//! Debuggers describe a value's type as text such as
//! `vw::math::Vector<double, 3ul>` or `vw::math::VectorBase<vw::math::Vector<float, 0> >`.
//! [`parse`] turns that text into a [`TypeSignature`]: a qualified name, its
//! ordered template arguments and any trailing pointer/reference/array
//! modifiers. Printing a signature with [`Display`](fmt::Display) yields the
//! canonical spelling, which parses back to an equal signature.

use std::{fmt, str::FromStr};

use crate::{Error, Result};

/// One template argument: either a nested type or an integer literal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TemplateArg {
    Type(TypeSignature),
    Int(i64),
}

impl TemplateArg {
    #[inline]
    pub fn as_type(&self) -> Option<&TypeSignature> {
        match self {
            TemplateArg::Type(ty) => Some(ty),
            TemplateArg::Int(_) => None,
        }
    }

    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            TemplateArg::Type(_) => None,
            TemplateArg::Int(value) => Some(*value),
        }
    }
}

impl fmt::Display for TemplateArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateArg::Type(ty) => ty.fmt(f),
            TemplateArg::Int(value) => value.fmt(f),
        }
    }
}

/// A declarator applied after the type name, in source order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Modifier {
    Const,
    Pointer,
    Reference,
    Array(usize),
}

/// A parsed generic type signature.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeSignature {
    name: String,
    arguments: Vec<TemplateArg>,
    modifiers: Vec<Modifier>,
}

impl TypeSignature {
    /// Creates a signature with no template arguments or modifiers.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            modifiers: Vec::new(),
        }
    }

    pub fn with_argument(mut self, argument: TemplateArg) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    /// The fully qualified name, without template arguments.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The last `::` segment of the name.
    pub fn base_name(&self) -> &str {
        self.name
            .rsplit_once("::")
            .map_or(self.name.as_str(), |(_, base)| base)
    }

    /// Everything before the last `::` segment, or `""` for unqualified names.
    pub fn namespace(&self) -> &str {
        self.name.rsplit_once("::").map_or("", |(ns, _)| ns)
    }

    #[inline]
    pub fn arguments(&self) -> &[TemplateArg] {
        &self.arguments
    }

    #[inline]
    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    #[inline]
    pub fn argument(&self, index: usize) -> Option<&TemplateArg> {
        self.arguments.get(index)
    }

    #[inline]
    pub fn type_argument(&self, index: usize) -> Option<&TypeSignature> {
        self.argument(index).and_then(TemplateArg::as_type)
    }

    #[inline]
    pub fn int_argument(&self, index: usize) -> Option<i64> {
        self.argument(index).and_then(TemplateArg::as_int)
    }

    /// Returns `true` if the signature names an object type (at most `const`
    /// qualified), as opposed to a pointer, reference or array of one.
    pub fn is_object(&self) -> bool {
        self.modifiers.iter().all(|m| *m == Modifier::Const)
    }

    /// The same signature with every modifier removed.
    pub fn unqualified(&self) -> TypeSignature {
        Self {
            name: self.name.clone(),
            arguments: self.arguments.clone(),
            modifiers: Vec::new(),
        }
    }

    /// The element type of a pointer, reference or array signature.
    ///
    /// Trailing `const` qualifiers are skipped before looking at the last
    /// declarator; `None` is returned for object types.
    pub fn pointee(&self) -> Option<(Modifier, TypeSignature)> {
        let end = self
            .modifiers
            .iter()
            .rposition(|m| *m != Modifier::Const)?;
        let modifier = self.modifiers[end];
        let mut inner = self.clone();
        inner.modifiers.truncate(end);
        Some((modifier, inner))
    }
}

impl fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.arguments.is_empty() {
            f.write_str("<")?;
            for (i, argument) in self.arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                argument.fmt(f)?;
            }
            f.write_str(">")?;
        }
        for modifier in &self.modifiers {
            match modifier {
                Modifier::Const => f.write_str(" const")?,
                Modifier::Pointer => f.write_str("*")?,
                Modifier::Reference => f.write_str("&")?,
                Modifier::Array(len) => write!(f, " [{len}]")?,
            }
        }
        Ok(())
    }
}

impl FromStr for TypeSignature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

/// Parses a textual type signature.
///
/// Template arguments are split at the top nesting level only. No check is
/// made on how many arguments a name takes or of what kind; that is left to
/// the patterns in the [`Registry`](crate::Registry).
///
/// # Example
///
/// ```
/// use vw_pretty::{TemplateArg, parse};
///
/// let sig = parse("vw::math::Vector<double, 3ul>").unwrap();
/// assert_eq!(sig.name(), "vw::math::Vector");
/// assert_eq!(sig.int_argument(1), Some(3));
/// assert_eq!(sig.to_string(), "vw::math::Vector<double, 3>");
/// ```
pub fn parse(signature: &str) -> Result<TypeSignature> {
    let mut parser = Parser::new(signature);
    let ty = parser.type_signature()?;
    parser.skip_whitespace();
    if parser.pos != parser.bytes.len() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(ty)
}

/// Deepest template nesting accepted by [`parse`].
pub const MAX_NESTING: usize = 128;

struct Parser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
}

#[inline]
fn is_word_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

#[inline]
fn is_word_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            depth: 0,
        }
    }

    fn error(&self, reason: &'static str) -> Error {
        Error::malformed(self.src, self.pos, reason)
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline]
    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Reads one identifier without consuming it.
    fn peek_word(&self) -> Option<&'a str> {
        let start = self.pos;
        if !self.peek().is_some_and(is_word_start) {
            return None;
        }
        let mut end = start + 1;
        while self.bytes.get(end).copied().is_some_and(is_word_continue) {
            end += 1;
        }
        Some(&self.src[start..end])
    }

    fn type_signature(&mut self) -> Result<TypeSignature> {
        self.skip_whitespace();
        let mut modifiers = Vec::new();
        // `const T` is printed canonically as `T const`.
        if self.peek_word() == Some("const") {
            self.pos += "const".len();
            self.skip_whitespace();
            modifiers.push(Modifier::Const);
        }

        let name = self.qualified_name()?;

        self.skip_whitespace();
        let mut arguments = Vec::new();
        if self.peek() == Some(b'<') {
            if self.depth == MAX_NESTING {
                return Err(self.error("nesting too deep"));
            }
            self.pos += 1;
            self.skip_whitespace();
            if self.peek() == Some(b'>') {
                self.pos += 1;
            } else {
                self.depth += 1;
                loop {
                    arguments.push(self.template_arg()?);
                    self.skip_whitespace();
                    match self.peek() {
                        Some(b',') => self.pos += 1,
                        Some(b'>') => {
                            self.pos += 1;
                            break;
                        }
                        _ => return Err(self.error("expected `,` or `>`")),
                    }
                }
                self.depth -= 1;
            }
        }

        self.modifiers(&mut modifiers)?;

        Ok(TypeSignature {
            name,
            arguments,
            modifiers,
        })
    }

    /// `word ("::" word | " " word)*`, stopping before a `const` qualifier.
    fn qualified_name(&mut self) -> Result<String> {
        let mut name = String::new();
        loop {
            let Some(word) = self.peek_word() else {
                return Err(self.error("expected type name"));
            };
            if word == "const" && !name.is_empty() {
                break;
            }
            self.pos += word.len();
            name.push_str(word);

            if self.peek() == Some(b':') && self.peek_at(1) == Some(b':') {
                self.pos += 2;
                name.push_str("::");
                continue;
            }

            // Multi-word builtins such as `unsigned long`.
            let checkpoint = self.pos;
            self.skip_whitespace();
            match self.peek_word() {
                Some(word) if word != "const" && self.pos > checkpoint => name.push(' '),
                _ => {
                    self.pos = checkpoint;
                    break;
                }
            }
        }
        Ok(name)
    }

    fn modifiers(&mut self, modifiers: &mut Vec<Modifier>) -> Result<()> {
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(b'*') => {
                    self.pos += 1;
                    modifiers.push(Modifier::Pointer);
                }
                Some(b'&') => {
                    self.pos += 1;
                    modifiers.push(Modifier::Reference);
                }
                Some(b'[') => {
                    self.pos += 1;
                    self.skip_whitespace();
                    let len = self.digits()?;
                    self.skip_whitespace();
                    if self.peek() != Some(b']') {
                        return Err(self.error("expected `]`"));
                    }
                    self.pos += 1;
                    let len = usize::try_from(len)
                        .map_err(|_| self.error("array length out of range"))?;
                    modifiers.push(Modifier::Array(len));
                }
                _ if self.peek_word() == Some("const") => {
                    self.pos += "const".len();
                    modifiers.push(Modifier::Const);
                }
                _ => return Ok(()),
            }
        }
    }

    fn template_arg(&mut self) -> Result<TemplateArg> {
        self.skip_whitespace();
        match self.peek() {
            Some(b) if b.is_ascii_digit() => self.integer().map(TemplateArg::Int),
            Some(b'-') if self.peek_at(1).is_some_and(|b| b.is_ascii_digit()) => {
                self.integer().map(TemplateArg::Int)
            }
            Some(b',' | b'>') | None => Err(self.error("expected template argument")),
            _ => self.type_signature().map(TemplateArg::Type),
        }
    }

    fn digits(&mut self) -> Result<u64> {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(self.error("expected digits"));
        }
        self.src[start..self.pos].parse().map_err(|_| {
            Error::malformed(self.src, start, "integer literal out of range")
        })
    }

    /// A decimal literal with an optional sign and C integer suffix (`3ul`).
    fn integer(&mut self) -> Result<i64> {
        let start = self.pos;
        let negative = self.peek() == Some(b'-');
        if negative {
            self.pos += 1;
        }
        let magnitude = self.digits()?;

        let suffix_start = self.pos;
        while self.peek().is_some_and(|b| matches!(b, b'u' | b'U' | b'l' | b'L')) {
            self.pos += 1;
        }
        if self.pos - suffix_start > 3 {
            return Err(Error::malformed(self.src, suffix_start, "invalid integer suffix"));
        }

        let value = if negative {
            0i64.checked_sub_unsigned(magnitude)
        } else {
            i64::try_from(magnitude).ok()
        };
        value.ok_or_else(|| Error::malformed(self.src, start, "integer literal out of range"))
    }
}
