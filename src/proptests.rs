//! Property-based tests for the expression pipeline.

use proptest::prelude::*;

use crate::parse::tokenize;
use crate::stack::to_postfix;
use crate::state::calculate;

// Expressions as lists of lexemes, so they can be glued with any separator
fn expr_parts() -> impl Strategy<Value = Vec<String>> {
    let leaf = prop_oneof![
        (0u32..1000).prop_map(|n| vec![n.to_string()]),
        Just(vec!["pi".to_string()]),
        (0u32..100).prop_map(|n| vec!["-".to_string(), n.to_string()]),
    ];
    leaf.prop_recursive(4, 48, 2, |inner| {
        prop_oneof![
            (inner.clone(), prop::sample::select(vec!["+", "-", "*"]), inner.clone()).prop_map(
                |(mut a, op, b)| {
                    a.push(op.to_string());
                    a.extend(b);
                    a
                }
            ),
            inner.clone().prop_map(|a| {
                let mut v = vec!["(".to_string()];
                v.extend(a);
                v.push(")".to_string());
                v
            }),
            inner.prop_map(|a| {
                let mut v = vec!["abs".to_string(), "(".to_string()];
                v.extend(a);
                v.push(")".to_string());
                v
            }),
        ]
    })
}

proptest! {
    #[test]
    fn balanced_brackets_convert(parts in expr_parts()) {
        let expr = parts.concat();
        let tokens = tokenize(&expr);
        prop_assert!(tokens.is_ok(), "{}: {:?}", expr, tokens);
        let postfix = to_postfix(&tokens.unwrap());
        prop_assert!(postfix.is_ok(), "{}: {:?}", expr, postfix);
    }

    #[test]
    fn whitespace_does_not_matter(parts in expr_parts(), sep in "[ \t]{1,3}") {
        let tight = parts.concat();
        let loose = format!("{}{}{}", sep, parts.join(sep.as_str()), sep);
        prop_assert_eq!(calculate(&tight), calculate(&loose));
    }

    #[test]
    fn trig_noise_is_zero(k in -50i32..50) {
        let v = calculate(&format!("sin({}*pi)", k));
        prop_assert_eq!(v, Ok(0.0));
    }

    #[test]
    fn cos_noise_is_zero(m in -25i32..25) {
        // cos(k*pi/2) for odd k is about 1e-16 * k in f64
        let k = 2 * m + 1;
        let v = calculate(&format!("cos({}*pi/2)", k));
        prop_assert_eq!(v, Ok(0.0));
    }
}
