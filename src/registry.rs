//! The ordered formatter table and the resolver that walks it.
//!
//! Rules are `(pattern, builder)` pairs tried in registration order; the first
//! rule whose pattern matches and whose builder succeeds wins. A builder that
//! fails only means its rule does not apply to this value, so resolution
//! continues with the next rule.
//!
//! # Example
//!
//! ```
//! use vw_pretty::{Config, Registry};
//!
//! let registry = Registry::builtin(Config::default());
//! let sig = vw_pretty::parse("vw::math::Vector<double, 0>").unwrap();
//! let rule = registry.matching_rule(&sig).unwrap();
//! assert_eq!(rule.builder().name(), "VectorDynamic");
//! ```

use std::sync::OnceLock;

use tracing::{debug, trace, warn};

use crate::{
    BBox, BinaryFunc, Config, Container, ContainerKind, Error, Indirection, Modifier, OpaqueValue,
    Result, Shape, Sizing, Storage, TypeSignature, UnaryFunc, Visualizer, parse,
};

mod pattern;

pub use pattern::{ArgPattern, ArgsPattern, NamePattern, SignaturePattern};

/// Constructs the visualizer for a matched value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Builder {
    Indirection,
    VectorBinaryFunc,
    VectorUnaryFunc,
    Container(ContainerKind),
    BBox,
}

impl Builder {
    pub const fn name(self) -> &'static str {
        match self {
            Builder::Indirection => "CRTP",
            Builder::VectorBinaryFunc => "VectorBinaryFunc",
            Builder::VectorUnaryFunc => "VectorUnaryFunc",
            Builder::Container(kind) => kind.name(),
            Builder::BBox => "BBox",
        }
    }

    fn build<V: OpaqueValue>(
        self,
        value: &V,
        registry: &Registry,
        context: Context,
    ) -> Result<Visualizer<V>> {
        Ok(match self {
            Builder::Indirection => {
                Visualizer::Indirection(Indirection::new(value, registry, context)?)
            }
            Builder::VectorBinaryFunc => Visualizer::VectorBinaryFunc(BinaryFunc::new(value)?),
            Builder::VectorUnaryFunc => Visualizer::VectorUnaryFunc(UnaryFunc::new(value)?),
            Builder::Container(kind) => Visualizer::Container(Container::new(value, kind)?),
            Builder::BBox => Visualizer::BBox(BBox::new(value, registry, context)?),
        })
    }
}

/// One entry of the formatter table.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Rule {
    pattern: SignaturePattern,
    builder: Builder,
}

impl Rule {
    #[inline]
    pub fn pattern(&self) -> &SignaturePattern {
        &self.pattern
    }

    #[inline]
    pub fn builder(&self) -> Builder {
        self.builder
    }
}

/// Where a resolution happens, relative to the value the host asked about.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Context {
    depth: usize,
    /// Set while probing the derived view of a CRTP base.
    pub(crate) probing: bool,
    /// Set while resolving a bounding-box corner; only container rules apply.
    containers_only: bool,
}

impl Context {
    const fn root() -> Self {
        Self {
            depth: 0,
            probing: false,
            containers_only: false,
        }
    }

    pub(crate) const fn probe(self) -> Self {
        Self {
            depth: self.depth + 1,
            probing: true,
            containers_only: false,
        }
    }

    pub(crate) const fn corner(self) -> Self {
        Self {
            depth: self.depth + 1,
            probing: false,
            containers_only: true,
        }
    }
}

/// An append-only, ordered list of formatter rules.
#[derive(Clone, Debug)]
pub struct Registry {
    config: Config,
    rules: Vec<Rule>,
}

impl Registry {
    /// An empty registry.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            rules: Vec::new(),
        }
    }

    /// The rules for every `vw::math` type this crate knows, in precedence
    /// order: CRTP bases, vector expressions, proxies before their owning
    /// counterparts, static before dynamic, then bounding boxes.
    pub fn builtin(config: Config) -> Self {
        let mut registry = Self::new(config);
        let q = |name: &str| registry.config.qualify(name);

        let mut rules = vec![
            (
                SignaturePattern::base_suffix(registry.config.namespace.clone()),
                Builder::Indirection,
            ),
            (
                SignaturePattern::exact(q("VectorBinaryFunc")),
                Builder::VectorBinaryFunc,
            ),
            (
                SignaturePattern::exact(q("VectorUnaryFunc")),
                Builder::VectorUnaryFunc,
            ),
        ];

        for (shape, storage) in [
            (Shape::Vector, Storage::Proxy),
            (Shape::Vector, Storage::Owning),
            (Shape::Matrix, Storage::Proxy),
            (Shape::Matrix, Storage::Owning),
        ] {
            for sizing in [Sizing::Static, Sizing::Dynamic] {
                let kind = ContainerKind::new(shape, storage, sizing);
                let size = match sizing {
                    Sizing::Static => ArgPattern::Positive,
                    Sizing::Dynamic => ArgPattern::Zero,
                };
                let args = match shape {
                    Shape::Vector => vec![ArgPattern::Type, size],
                    Shape::Matrix => vec![ArgPattern::Type, size, size],
                };
                rules.push((
                    SignaturePattern::exact(q(kind.family())).with_args(args),
                    Builder::Container(kind),
                ));
            }
        }

        rules.push((SignaturePattern::exact(q("BBox")), Builder::BBox));

        for (pattern, builder) in rules {
            registry.register(pattern, builder);
        }
        registry
    }

    /// Appends a rule after every existing one.
    ///
    /// Builders are the fixed set in [`Builder`]; a new rule can route more
    /// type names to an existing visualizer but cannot add a new kind of one.
    pub fn register(&mut self, pattern: SignaturePattern, builder: Builder) -> &mut Self {
        self.rules.push(Rule { pattern, builder });
        self
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The first rule whose pattern matches, whether or not its builder would
    /// succeed on a particular value.
    pub fn matching_rule(&self, signature: &TypeSignature) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.pattern.matches(signature))
    }

    /// Builds the visualizer for `value`, or `None` if the host should fall
    /// back to its default display.
    pub fn resolve<V: OpaqueValue>(&self, value: &V) -> Option<Visualizer<V>> {
        self.resolve_in(value, Context::root())
    }

    /// Like [`resolve`](Self::resolve), for a host that reports the type as
    /// text. When `signature` differs from the value's own type the value is
    /// cast to it first.
    pub fn resolve_signature<V: OpaqueValue>(
        &self,
        signature: &str,
        value: &V,
    ) -> Option<Visualizer<V>> {
        let parsed = match parse(signature) {
            Ok(parsed) => parsed,
            Err(error) => {
                debug!(%error, "cannot parse type signature");
                return None;
            }
        };
        if &parsed == value.signature() {
            return self.resolve(value);
        }
        match value.cast(&parsed) {
            Ok(cast) => self.resolve(&cast),
            Err(error) => {
                debug!(%error, "cannot view value as reported type");
                None
            }
        }
    }

    pub(crate) fn resolve_in<V: OpaqueValue>(
        &self,
        value: &V,
        context: Context,
    ) -> Option<Visualizer<V>> {
        let signature = value.signature();
        if context.depth > self.config.max_depth {
            warn!(%signature, depth = context.depth, "resolution depth limit reached");
            return None;
        }
        // Members such as expression operands are stored as `T const&`.
        if let Some((Modifier::Reference, referent)) = signature.pointee() {
            return match value.cast(&referent) {
                Ok(object) => self.resolve_in(&object, context),
                Err(error) => {
                    trace!(%signature, %error, "cannot follow reference");
                    None
                }
            };
        }

        for rule in &self.rules {
            if !rule.pattern.matches(signature)
                || (context.containers_only && !matches!(rule.builder, Builder::Container(_)))
            {
                continue;
            }
            match rule.builder.build(value, self, context) {
                Ok(visualizer) => {
                    debug!(rule = rule.builder.name(), %signature, "resolved visualizer");
                    return Some(visualizer);
                }
                Err(error) => {
                    trace!(rule = rule.builder.name(), %signature, %error, "rule does not apply");
                }
            }
        }
        None
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin(Config::default())
    }
}

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Installs the process-wide registry.
///
/// Must be called before the first render request; afterwards the registry is
/// read-only. Fails if a registry is already installed, including the builtin
/// one that [`global`] installs on first use.
pub fn init_global(registry: Registry) -> Result<()> {
    GLOBAL.set(registry).map_err(|_| Error::AlreadyInitialized)
}

/// The process-wide registry, the builtin one unless [`init_global`] ran first.
pub fn global() -> &'static Registry {
    GLOBAL.get_or_init(Registry::default)
}
