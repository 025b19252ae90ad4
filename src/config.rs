/// Namespace the library's types live in.
pub const DEFAULT_NAMESPACE: &str = "vw::math";

/// Default bound on nested resolution, see [`Config::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Settings shared by the registry and the tree renderer.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Config {
    /// Namespace prefix of the matched class names. Empty matches
    /// unqualified names such as `Vector<double, 3>`.
    pub namespace: String,
    /// How many values deep resolution may go before giving up. Guards
    /// against cyclic type graphs in CRTP probing and in
    /// [`render`](crate::render::render).
    pub max_depth: usize,
    /// Cap on the children the renderer expands per value. `None` shows every
    /// element.
    pub max_elements: Option<usize>,
}

impl Config {
    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    /// `namespace::name`, or just `name` without a namespace.
    pub fn qualify(&self, name: &str) -> String {
        if self.namespace.is_empty() {
            name.to_owned()
        } else {
            format!("{}::{name}", self.namespace)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_owned(),
            max_depth: DEFAULT_MAX_DEPTH,
            max_elements: None,
        }
    }
}
