//! Property-based tests using proptest

use std::path::Path;

use isoshim_core::options::{parse_archive_command_line_with, VariableValue};
use isoshim_core::variables::{eval_variables, Scope};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_parser_never_panics(
        tokens in prop::collection::vec(".*", 0..16)
    ) {
        // Should either succeed or return an error, never panic
        let result = parse_archive_command_line_with(&tokens, Path::new("/r"), false);
        prop_assert!(result.is_ok() || result.is_err());
    }

    #[test]
    fn prop_eval_never_panics(expression in ".*") {
        let _ = eval_variables(&expression, &Scope::new());
    }

    #[test]
    fn prop_eval_is_identity_without_references(expression in "[^<]*") {
        let rendered = eval_variables(&expression, &Scope::new()).unwrap();
        prop_assert_eq!(rendered, expression);
    }

    #[test]
    fn prop_eval_substitutes_bound_values(
        name in "[A-Za-z_][A-Za-z_0-9]{0,8}",
        value in "[a-zA-Z0-9_/.]{0,16}"
    ) {
        let scope: Scope =
            [(name.clone(), VariableValue::Str(value.clone()))].into_iter().collect();
        let rendered = eval_variables(&format!("<({name})"), &scope).unwrap();
        prop_assert_eq!(rendered, value);
    }

    #[test]
    fn prop_integer_coercion_round_trips(v in any::<i64>()) {
        prop_assert_eq!(VariableValue::coerce(&v.to_string()), VariableValue::Int(v));
    }

    #[test]
    fn prop_blacklist_order_and_length_preserved(
        patterns in prop::collection::vec("[a-z.*]{1,8}", 0..8)
    ) {
        let mut tokens = vec!["-s".to_owned(), "out.isolated".to_owned()];
        for p in &patterns {
            tokens.push("--blacklist".to_owned());
            tokens.push(p.clone());
        }
        let opts = parse_archive_command_line_with(&tokens, Path::new("/r"), false).unwrap();
        prop_assert_eq!(opts.blacklist, patterns);
    }
}
