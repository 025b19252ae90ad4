//! Tests for eager tree rendering

mod common;

use common::*;
use vw_pretty::render::{NodeValue, render};
use vw_pretty::{Config, DisplayHint, Registry, Scalar};

#[test]
fn test_render_vector() {
    let image = ImageBuilder::new().f64s(BASE, &[1.0, 2.0, 3.0]).build();
    let value = image.value(VECTOR3, BASE).unwrap();

    let tree = render(&Registry::default(), &value);
    let node = tree.as_node().unwrap();
    assert_eq!(node.summary, "Vector3");
    assert_eq!(node.hint, DisplayHint::Array);
    assert_eq!(node.omitted, 0);
    let elements: Vec<_> = node
        .children
        .iter()
        .map(|(label, value)| (label.as_str(), value.as_scalar().unwrap()))
        .collect();
    assert_eq!(
        elements,
        [
            ("", Scalar::Float(1.0)),
            ("", Scalar::Float(2.0)),
            ("", Scalar::Float(3.0)),
        ]
    );
}

#[test]
fn test_render_expression_recurses_into_operands() {
    let image = ImageBuilder::new()
        .u64(BASE, BASE + 0x100)
        .f64s(BASE + 0x100, &[1.0, -2.0, 3.0])
        .build();
    let value = image.value(UNARY, BASE).unwrap();

    let tree = render(&Registry::default(), &value);
    let node = tree.as_node().unwrap();
    assert_eq!(node.summary, "VectorUnaryFunc");
    assert_eq!(node.hint, DisplayHint::Map);

    let (label, operand) = &node.children[0];
    assert_eq!(label, "v");
    assert_eq!(operand.as_node().unwrap().summary, "Vector3");

    let (label, func) = &node.children[1];
    assert_eq!(label, "func");
    assert_eq!(
        func,
        &NodeValue::Raw {
            ty: "vw::math::ArgNegationFunctor".to_owned()
        }
    );
}

#[test]
fn test_render_bbox_with_failed_extent() {
    let image = ImageBuilder::new()
        .f64s(BASE, &[10.0])
        .u64(BASE + 0x40, 2)
        .u64(BASE + 0x48, BASE + 0x100)
        .u64(BASE + 0x58, 2)
        .u64(BASE + 0x60, BASE - 8)
        .f64s(BASE + 0x100, &[1.0, 4.0])
        .build();
    let value = image.value("vw::math::BBox<double, 0>", BASE + 0x40).unwrap();

    let tree = render(&Registry::default(), &value);
    let node = tree.as_node().unwrap();
    let labels: Vec<_> = node.children.iter().map(|(l, _)| l.as_str()).collect();
    assert_eq!(labels, ["min", "max", "width", "height"]);

    // The unreadable element shows up inline in the max corner too.
    let max = node.children[1].1.as_node().unwrap();
    assert_eq!(max.summary, "VectorX");
    assert!(matches!(max.children[0].1, NodeValue::Error(_)));
    assert_eq!(max.children[1].1, NodeValue::Scalar(Scalar::Float(10.0)));

    assert!(matches!(
        &node.children[2].1,
        NodeValue::Text(text) if text.starts_with("Failed to calc: ")
    ));
    assert_eq!(node.children[3].1, NodeValue::Scalar(Scalar::Float(6.0)));
}

#[test]
fn test_render_without_visualizer() {
    let image = ImageBuilder::new().f64s(BASE, &[2.5]).build();
    let registry = Registry::default();

    let scalar = image.value("double", BASE).unwrap();
    assert_eq!(render(&registry, &scalar), NodeValue::Scalar(Scalar::Float(2.5)));

    let opaque = image.value("std::string", BASE).unwrap();
    assert_eq!(
        render(&registry, &opaque),
        NodeValue::Raw {
            ty: "std::string".to_owned()
        }
    );
}

#[test]
fn test_render_element_cap() {
    let image = ImageBuilder::new()
        .u64(BASE, 5)
        .u64(BASE + 8, BASE + 0x100)
        .f64s(BASE + 0x100, &[0.0, 1.0, 2.0, 3.0, 4.0])
        .build();
    let value = image.value(VECTORX, BASE).unwrap();
    let registry = Registry::builtin(Config {
        max_elements: Some(2),
        ..Config::default()
    });

    let tree = render(&registry, &value);
    let node = tree.as_node().unwrap();
    assert_eq!(node.summary, "VectorX");
    assert_eq!(node.children.len(), 2);
    assert_eq!(node.omitted, 3);
}

#[test]
fn test_render_depth_limit() {
    let image = ImageBuilder::new().f64s(BASE, &[1.0, 2.0, 3.0]).build();
    let value = image.value(VECTOR3, BASE).unwrap();
    let registry = Registry::builtin(Config {
        max_depth: 0,
        ..Config::default()
    });

    let tree = render(&registry, &value);
    let node = tree.as_node().unwrap();
    assert_eq!(node.children.len(), 3);
    for (_, child) in &node.children {
        assert_eq!(
            child,
            &NodeValue::Error("nesting depth limit of 0 exceeded".to_owned())
        );
    }
}

#[cfg(feature = "serde")]
#[test]
fn test_render_serializes_to_json() {
    let image = ImageBuilder::new().f64s(BASE, &[1.0, 2.0, 4.0, 6.0]).build();
    let value = image.value("vw::math::BBox<double, 2>", BASE).unwrap();

    let tree = render(&Registry::default(), &value);
    let json = serde_json::to_value(&tree).unwrap();

    assert_eq!(json["node"]["summary"], "BBox");
    assert_eq!(json["node"]["hint"], "map");
    assert_eq!(json["node"]["omitted"], 0);
    assert_eq!(json["node"]["children"][2][0], "width");
    assert_eq!(json["node"]["children"][2][1]["scalar"], 3.0);
    assert_eq!(json["node"]["children"][0][1]["node"]["summary"], "Vector2");
    assert_eq!(json["node"]["children"][0][1]["node"]["hint"], "array");
}
