use std::fmt;

use crate::{TemplateArg, TypeSignature};

/// Matches the class name of a signature.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum NamePattern {
    /// The fully qualified name, e.g. `vw::math::Vector`.
    Exact(String),
    /// Any `<namespace>::<Word>Base`, the CRTP base classes.
    BaseSuffix { namespace: String },
}

impl NamePattern {
    pub fn matches(&self, signature: &TypeSignature) -> bool {
        match self {
            NamePattern::Exact(name) => signature.name() == name,
            NamePattern::BaseSuffix { namespace } => {
                signature.namespace() == namespace
                    && signature
                        .base_name()
                        .strip_suffix("Base")
                        .is_some_and(|word| {
                            !word.is_empty()
                                && word.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
                        })
            }
        }
    }
}

/// Matches one template argument.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ArgPattern {
    /// A type argument.
    Type,
    /// The literal `0`, the dynamic-size sentinel.
    Zero,
    /// A positive integer literal, a static size.
    Positive,
}

impl ArgPattern {
    pub fn matches(self, argument: &TemplateArg) -> bool {
        match (self, argument) {
            (ArgPattern::Type, TemplateArg::Type(_)) => true,
            (ArgPattern::Zero, TemplateArg::Int(n)) => *n == 0,
            (ArgPattern::Positive, TemplateArg::Int(n)) => *n > 0,
            _ => false,
        }
    }
}

/// Matches the template argument list.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ArgsPattern {
    /// At least one argument of any kind.
    NonEmpty,
    /// Exactly these arguments, in order.
    Exactly(Vec<ArgPattern>),
}

/// A name pattern plus an argument pattern. Matching is structural, on a
/// parsed [`TypeSignature`], and only object types (not pointers, references
/// or arrays) match.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SignaturePattern {
    name: NamePattern,
    args: ArgsPattern,
}

impl SignaturePattern {
    /// `name<...>` with at least one argument.
    pub fn exact(name: impl Into<String>) -> Self {
        Self {
            name: NamePattern::Exact(name.into()),
            args: ArgsPattern::NonEmpty,
        }
    }

    /// `namespace::XBase<...>` with at least one argument.
    pub fn base_suffix(namespace: impl Into<String>) -> Self {
        Self {
            name: NamePattern::BaseSuffix {
                namespace: namespace.into(),
            },
            args: ArgsPattern::NonEmpty,
        }
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = ArgPattern>) -> Self {
        self.args = ArgsPattern::Exactly(args.into_iter().collect());
        self
    }

    #[inline]
    pub fn name(&self) -> &NamePattern {
        &self.name
    }

    #[inline]
    pub fn args(&self) -> &ArgsPattern {
        &self.args
    }

    pub fn matches(&self, signature: &TypeSignature) -> bool {
        if !signature.is_object() || !self.name.matches(signature) {
            return false;
        }
        let arguments = signature.arguments();
        match &self.args {
            ArgsPattern::NonEmpty => !arguments.is_empty(),
            ArgsPattern::Exactly(patterns) => {
                patterns.len() == arguments.len()
                    && patterns.iter().zip(arguments).all(|(p, a)| p.matches(a))
            }
        }
    }
}

impl fmt::Display for SignaturePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            NamePattern::Exact(name) => f.write_str(name)?,
            NamePattern::BaseSuffix { namespace } if namespace.is_empty() => f.write_str("*Base")?,
            NamePattern::BaseSuffix { namespace } => write!(f, "{namespace}::*Base")?,
        }
        match &self.args {
            ArgsPattern::NonEmpty => f.write_str("<..>"),
            ArgsPattern::Exactly(patterns) => {
                f.write_str("<")?;
                for (i, pattern) in patterns.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(match pattern {
                        ArgPattern::Type => "T",
                        ArgPattern::Zero => "0",
                        ArgPattern::Positive => "N",
                    })?;
                }
                f.write_str(">")
            }
        }
    }
}
