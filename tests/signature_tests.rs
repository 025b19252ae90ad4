//! Tests for type signatures through the public API

use vw_pretty::{Modifier, TemplateArg, TypeSignature, parse};

#[test]
fn test_from_str() {
    let sig: TypeSignature = "vw::math::MatrixProxy<float, 0ul, 0ul>".parse().unwrap();
    assert_eq!(sig.name(), "vw::math::MatrixProxy");
    assert_eq!(sig.int_argument(1), Some(0));
    assert_eq!(sig.int_argument(2), Some(0));
    assert_eq!(sig.type_argument(0), Some(&TypeSignature::new("float")));
}

#[test]
fn test_builder_matches_parser() {
    let built = TypeSignature::new("vw::math::VectorBase").with_argument(TemplateArg::Type(
        TypeSignature::new("vw::math::Vector")
            .with_argument(TemplateArg::Type(TypeSignature::new("double")))
            .with_argument(TemplateArg::Int(3)),
    ));
    assert_eq!(
        built,
        parse("vw::math::VectorBase<vw::math::Vector<double, 3> >").unwrap()
    );
    assert_eq!(
        built.to_string(),
        "vw::math::VectorBase<vw::math::Vector<double, 3>>"
    );
}

#[test]
fn test_whitespace_is_insignificant() {
    let a = parse("  vw::math::Vector< double ,3 >  ").unwrap();
    let b = parse("vw::math::Vector<double, 3>").unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_modifiers() {
    let sig = parse("vw::math::Vector<double, 3> const&").unwrap();
    assert_eq!(sig.modifiers(), &[Modifier::Const, Modifier::Reference]);
    assert!(!sig.is_object());

    let (modifier, referent) = sig.pointee().unwrap();
    assert_eq!(modifier, Modifier::Reference);
    assert!(referent.is_object());
    assert_eq!(referent.to_string(), "vw::math::Vector<double, 3> const");
    assert_eq!(referent.unqualified().to_string(), "vw::math::Vector<double, 3>");
}

#[test]
fn test_template_arg_display() {
    assert_eq!(TemplateArg::Int(-4).to_string(), "-4");
    assert_eq!(
        TemplateArg::Type(parse("std::pair<int, long>").unwrap()).to_string(),
        "std::pair<int, long>"
    );
}

#[test]
fn test_const_is_not_part_of_the_name() {
    let sig = parse("double const").unwrap();
    assert_eq!(sig.name(), "double");
    assert_eq!(sig.modifiers(), &[Modifier::Const]);

    let sig = parse("constant_type<int>").unwrap();
    assert_eq!(sig.name(), "constant_type");
}
