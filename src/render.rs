//! A reference host: expands a value into a complete tree.
//!
//! Debuggers drive visualizers one level at a time. [`render`] does the same
//! walk eagerly, passing every child value back through the registry, which is
//! useful for tests, snapshots and hosts without an expansion model of their
//! own. Depth is bounded by [`Config::max_depth`](crate::Config::max_depth) and
//! the number of expanded children per value by
//! [`Config::max_elements`](crate::Config::max_elements).

use tracing::warn;

use crate::{Child, DisplayHint, Error, Literal, OpaqueValue, Registry, Scalar};

/// A value that has a visualizer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Node {
    pub summary: String,
    pub hint: DisplayHint,
    pub children: Vec<(String, NodeValue)>,
    /// Children left out because of the element cap.
    pub omitted: usize,
}

/// One position in a rendered tree.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NodeValue {
    Node(Node),
    Scalar(Scalar),
    Text(String),
    /// No visualizer applies; the host would show the value its default way.
    Raw { ty: String },
    Error(String),
}

impl NodeValue {
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            NodeValue::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<Scalar> {
        match self {
            NodeValue::Scalar(scalar) => Some(*scalar),
            _ => None,
        }
    }
}

/// Renders `value` and everything below it.
pub fn render<V: OpaqueValue>(registry: &Registry, value: &V) -> NodeValue {
    render_at(registry, value, 0)
}

fn render_at<V: OpaqueValue>(registry: &Registry, value: &V, depth: usize) -> NodeValue {
    let config = registry.config();
    if depth > config.max_depth {
        warn!(signature = %value.signature(), depth, "render depth limit reached");
        return NodeValue::Error(Error::DepthExceeded(config.max_depth).to_string());
    }

    let Some(visualizer) = registry.resolve(value) else {
        return match value.scalar() {
            Ok(scalar) => NodeValue::Scalar(scalar),
            Err(Error::NotScalar(_) | Error::UnknownType(_)) => NodeValue::Raw {
                ty: value.signature().to_string(),
            },
            Err(error) => NodeValue::Error(error.to_string()),
        };
    };

    let children = visualizer.children();
    let total = children.len();
    let limit = config.max_elements.unwrap_or(usize::MAX);
    let children: Vec<_> = children
        .take(limit)
        .map(|(label, child)| {
            let value = match child {
                Child::Value(child) => render_at(registry, &child, depth + 1),
                Child::Literal(Literal::Scalar(scalar)) => NodeValue::Scalar(scalar),
                Child::Literal(Literal::Text(text)) => NodeValue::Text(text),
                Child::Error(error) => NodeValue::Error(error.to_string()),
            };
            (label.to_owned(), value)
        })
        .collect();

    NodeValue::Node(Node {
        summary: visualizer.to_string(),
        hint: visualizer.display_hint(),
        omitted: total - children.len(),
        children,
    })
}
