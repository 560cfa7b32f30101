//! Property-based tests for header parsing
//!
//! - every declaration line yields exactly one signature, in source order
//! - everything after the obsolete marker is flagged obsolete
//! - emitting and reloading a table resolves to the same marshaling types

use dwfbind::descriptor::ARRAY_SIZES;
use dwfbind::header::{emit_artifact, load_artifact, parse_declarations, parse_header};
use dwfbind::{BaseType, BindingRegistry, TypeDescriptor};
use proptest::prelude::*;
use std::collections::HashSet;

const RETURN_TYPES: &[&str] = &["int", "void", "unsigned int", "double", "bool"];

fn base_type() -> impl Strategy<Value = BaseType> {
    prop::sample::select(BaseType::ALL.to_vec())
}

fn descriptor() -> impl Strategy<Value = TypeDescriptor> {
    prop_oneof![
        base_type()
            .prop_filter("void by value", |b| *b != BaseType::Void)
            .prop_map(TypeDescriptor::value),
        base_type().prop_map(TypeDescriptor::pointer),
        (
            base_type().prop_filter("void array", |b| *b != BaseType::Void),
            prop::sample::select(ARRAY_SIZES.to_vec()),
        )
            .prop_map(|(base, size)| TypeDescriptor::array(base, size).unwrap()),
    ]
}

fn parameter() -> impl Strategy<Value = (String, TypeDescriptor)> {
    ("p[A-Z][a-z0-9]{0,8}", descriptor())
}

/// C spelling of one parameter, the way the vendor header writes it.
fn parameter_text(name: &str, descriptor: &TypeDescriptor) -> String {
    let base = descriptor.base.c_name();
    if descriptor.is_pointer() {
        format!("{base} *{name}")
    } else if let Some(size) = descriptor.array_size() {
        format!("{base} {name}[{size}]")
    } else {
        format!("{base} {name}")
    }
}

#[derive(Debug, Clone)]
struct Declaration {
    name: String,
    returns: &'static str,
    parameters: Vec<(String, TypeDescriptor)>,
}

impl Declaration {
    fn line(&self) -> String {
        let parameters = self
            .parameters
            .iter()
            .map(|(name, descriptor)| parameter_text(name, descriptor))
            .collect::<Vec<_>>()
            .join(", ");
        format!("DWFAPI {} {}({});", self.returns, self.name, parameters)
    }
}

fn declarations() -> impl Strategy<Value = Vec<Declaration>> {
    prop::collection::vec(
        (
            "FDwf[A-Z][a-z0-9]{0,12}",
            prop::sample::select(RETURN_TYPES.to_vec()),
            prop::collection::vec(parameter(), 0..6),
        ),
        1..20,
    )
    .prop_map(|raw| {
        let mut seen = HashSet::new();
        raw.into_iter()
            .filter(|(name, _, _)| seen.insert(name.clone()))
            .map(|(name, returns, parameters)| Declaration {
                name,
                returns,
                parameters,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_one_signature_per_declaration_in_order(
        declarations in declarations(),
        marker_at in 0usize..20,
    ) {
        let marker_at = marker_at.min(declarations.len());
        let mut text = String::from("#include <stdbool.h>\n\n");
        for (index, declaration) in declarations.iter().enumerate() {
            if index == marker_at {
                text.push_str("// OBSOLETE functions, do not use these\n");
            }
            text.push_str(&declaration.line());
            text.push('\n');
        }

        let parsed = parse_declarations(&text).unwrap();

        prop_assert_eq!(parsed.len(), declarations.len());
        for (index, (signature, declaration)) in parsed.iter().zip(&declarations).enumerate() {
            prop_assert_eq!(&signature.name, &declaration.name);
            prop_assert_eq!(signature.returns.base.c_name(), declaration.returns);
            prop_assert_eq!(signature.obsolete, index >= marker_at);

            let parameters: Vec<(String, TypeDescriptor)> = signature
                .parameters
                .iter()
                .map(|p| (p.name.clone(), p.descriptor))
                .collect();
            prop_assert_eq!(&parameters, &declaration.parameters);
        }
    }

    #[test]
    fn prop_emit_then_load_preserves_marshaling(declarations in declarations()) {
        let text = declarations
            .iter()
            .map(Declaration::line)
            .collect::<Vec<_>>()
            .join("\n");
        let table = parse_header("dwf.h", text.as_bytes(), Some("3.14.3")).unwrap();
        let reloaded = load_artifact(&emit_artifact(&table)).unwrap();

        prop_assert_eq!(&reloaded, &table);
        prop_assert_eq!(
            reloaded.resolve_with(&mut BindingRegistry::new()).unwrap(),
            table.resolve_with(&mut BindingRegistry::new()).unwrap()
        );
    }
}

#[test]
fn test_example_declaration() {
    let parsed =
        parse_declarations("DWFAPI int FDwfExample(int *pValue, unsigned char data[16]);")
            .unwrap();

    assert_eq!(parsed.len(), 1);
    let example = &parsed[0];
    assert_eq!(example.name, "FDwfExample");
    assert_eq!(example.returns, TypeDescriptor::value(BaseType::Int));
    assert_eq!(example.parameters[0].name, "pValue");
    assert_eq!(example.parameters[0].descriptor.to_string(), "int *");
    assert_eq!(example.parameters[1].name, "data");
    assert_eq!(
        example.parameters[1].descriptor.to_string(),
        "unsigned char[16]"
    );
    assert!(!example.obsolete);
}

#[test]
fn test_marker_after_three_declarations() {
    let text = "\
DWFAPI int FDwfA();
DWFAPI int FDwfB();
DWFAPI int FDwfC();
// OBSOLETE
DWFAPI int FDwfD();
DWFAPI int FDwfE();
";
    let table = parse_header("dwf.h", text.as_bytes(), None).unwrap();
    assert_eq!(table.len() - table.obsolete_count(), 3);
    assert_eq!(table.obsolete_count(), 2);
}
