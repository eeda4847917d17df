//! Property tests for path resolution and tag compilation

use docpath::{Document, ErrorKind, Mapping, PathEngine, TagExpression, Value, compile_tags};
use proptest::prelude::*;

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Boolean),
        any::<i64>().prop_map(Value::Integer),
        (-1.0e6f64..1.0e6).prop_map(Value::Float),
        "[a-z0-9 ]{0,8}".prop_map(Value::String),
    ]
}

fn tree() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Sequence),
            prop::collection::vec(("[a-z]{1,3}", inner), 0..4)
                .prop_map(|entries| Value::Mapping(entries.into_iter().collect::<Mapping>())),
        ]
    })
}

fn document() -> impl Strategy<Value = Document> {
    prop::collection::vec(("[a-z]{1,3}", tree()), 1..5).prop_map(|entries| {
        let root: Mapping = entries.into_iter().collect();
        Document::from_value(Value::Mapping(root)).expect("mapping root")
    })
}

fn path_text() -> impl Strategy<Value = String> {
    prop::collection::vec(("[a-z]{1,3}", prop::option::of(0usize..4)), 1..5).prop_map(|segments| {
        segments
            .into_iter()
            .map(|(name, index)| match index {
                Some(i) => format!("{name}[{i}]"),
                None => name,
            })
            .collect::<Vec<_>>()
            .join(".")
    })
}

/// Every path that designates a non-null value, as text
fn all_paths(map: &Mapping, prefix: &str, out: &mut Vec<(String, Value)>) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        collect(value, &path, out);
        if let Value::Sequence(items) = value {
            for (i, item) in items.iter().enumerate() {
                collect(item, &format!("{path}[{i}]"), out);
            }
        }
    }
}

fn collect(value: &Value, path: &str, out: &mut Vec<(String, Value)>) {
    if value.is_null() {
        return;
    }
    out.push((path.to_string(), value.clone()));
    if let Value::Mapping(children) = value {
        all_paths(children, path, out);
    }
}

fn tag_token() -> impl Strategy<Value = String> {
    ("~?@?", "[a-z0-9_~@]{0,6}").prop_map(|(prefix, name)| format!("{prefix}{name}"))
}

fn tag_input() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::collection::vec(tag_token(), 1..4), 0..4).prop_map(|groups| {
        groups
            .into_iter()
            .map(|tokens| tokens.join(","))
            .collect::<Vec<_>>()
            .join(" ")
    })
}

proptest! {
    #[test]
    fn resolve_is_deterministic(doc in document(), path in path_text()) {
        let engine = PathEngine::lenient();
        let first = engine.resolve(&doc, &path).unwrap();
        let second = engine.resolve(&doc, &path.clone()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn every_enumerated_path_resolves(doc in document()) {
        let mut paths = Vec::new();
        all_paths(doc.root(), "", &mut paths);

        let engine = PathEngine::new();
        for (path, expected) in paths {
            let resolved = engine.resolve(&doc, &path).unwrap().map(|v| v.into_owned());
            prop_assert_eq!(resolved, Some(expected));
        }
    }

    #[test]
    fn typed_text_never_coerces(doc in document()) {
        let mut paths = Vec::new();
        all_paths(doc.root(), "", &mut paths);

        let engine = PathEngine::new();
        for (path, value) in paths {
            match engine.get_string(&doc, &path) {
                Ok(text) => prop_assert_eq!(text.as_deref(), value.as_str()),
                Err(e) => {
                    prop_assert_eq!(e.kind(), ErrorKind::WrongType);
                    prop_assert!(value.as_str().is_none());
                }
            }
        }
    }

    #[test]
    fn throw_and_lenient_agree(doc in document(), path in path_text()) {
        match PathEngine::new().resolve(&doc, &path) {
            Ok(value) => prop_assert_eq!(PathEngine::lenient().resolve(&doc, &path).unwrap(), value),
            Err(e) => {
                prop_assert_eq!(e.kind(), ErrorKind::InvalidPath);
                prop_assert_eq!(PathEngine::lenient().resolve(&doc, &path).unwrap(), None);
            }
        }
    }

    #[test]
    fn template_matches_literal_index(doc in document(), name in "[a-z]{1,3}", index in 0usize..4) {
        let engine = PathEngine::lenient();
        let templated = engine.resolve_templated(&doc, &format!("{name}[?]"), [index]).unwrap();
        let literal = engine.resolve(&doc, &format!("{name}[{index}]")).unwrap();
        prop_assert_eq!(templated, literal);
    }

    #[test]
    fn tag_compilation_is_idempotent(input in tag_input()) {
        let once = compile_tags(&input);
        let twice = compile_tags(&once.join(" "));
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn compiled_tags_are_sigiled(input in tag_input()) {
        for clause in TagExpression::parse(&input).to_strings() {
            for tag in clause.split(',').filter(|tag| !tag.is_empty()) {
                prop_assert!(tag.starts_with('@') || tag.starts_with("~@"), "{}", tag);
            }
        }
    }
}
