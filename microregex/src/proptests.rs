//! Randomised property tests for the public `compile`/`execute` surface.
//!
//! These complement the per-stage unit tests in `parser`, `nfa`, `subset`,
//! `codegen` and `vm` by fuzzing across many patterns and haystacks rather
//! than a handful of worked examples.

use crate::{compile, execute};
use proptest::prelude::*;

/// A small grammar of patterns built only from bytes this engine treats
/// specially (`a b c . * ? | ( )` plus the digit-class escape), so random
/// compositions stay inside the supported feature set instead of drifting
/// into literal-`+`/`[`/`{` territory.
fn pattern() -> impl Strategy<Value = String> {
    let atom = prop_oneof![
        Just("a".to_string()),
        Just("b".to_string()),
        Just("c".to_string()),
        Just(".".to_string()),
        Just(r"\d".to_string()),
    ];
    atom.prop_recursive(4, 64, 4, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{a}{b}")),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({a}|{b})")),
            inner.clone().prop_map(|a| format!("{a}*")),
            inner.prop_map(|a| format!("{a}?")),
        ]
    })
}

proptest! {
    /// `execute` never reports a match longer than the haystack it was
    /// given, for any pattern this engine accepts.
    #[test]
    fn match_length_never_exceeds_haystack_len(p in pattern(), s in "[abc]{0,12}") {
        let program = compile(&p).unwrap();
        let len = execute(s.as_bytes(), &program);
        prop_assert!(len <= s.len());
    }

    /// Compiling the same pattern twice always yields byte-identical code.
    #[test]
    fn compile_is_idempotent(p in pattern()) {
        let a = compile(&p).unwrap();
        let b = compile(&p).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Repeated execution against the same program and input always
    /// returns the same answer.
    #[test]
    fn execute_is_deterministic(p in pattern(), s in "[abc]{0,12}") {
        let program = compile(&p).unwrap();
        let first = execute(s.as_bytes(), &program);
        for _ in 0..4 {
            prop_assert_eq!(execute(s.as_bytes(), &program), first);
        }
    }

    /// `a*` accepts the empty string and every string whose first run is
    /// `a`-bytes, matching the length of that run exactly.
    #[test]
    fn star_matches_leading_run(n_a in 0usize..10, suffix in "[bc]{0,5}") {
        let haystack = format!("{}{}", "a".repeat(n_a), suffix);
        let program = compile("a*").unwrap();
        prop_assert_eq!(execute(haystack.as_bytes(), &program), n_a);
    }

    /// `(x|)` and `x?` are equivalent on any haystack.
    #[test]
    fn optional_group_matches_question_mark(s in "[xy]{0,5}") {
        let a = compile("x?").unwrap();
        let b = compile("(x|)").unwrap();
        prop_assert_eq!(execute(s.as_bytes(), &a), execute(s.as_bytes(), &b));
    }

    /// `execute` on a single-byte string agrees with the underlying ASCII
    /// predicate for every class escape, across the whole byte range.
    ///
    /// The whitespace oracle here is C's `isspace` (space, `\t \n \x0B
    /// \x0C \r`), not `u8::is_ascii_whitespace` — the latter excludes the
    /// vertical tab `\x0B`, which would make this test validate the
    /// engine against the wrong ground truth for `\s`/`\S`.
    #[test]
    fn class_escapes_match_ascii_predicates(byte in any::<u8>()) {
        let haystack = [byte];
        let is_space = matches!(byte, b'\t' | b'\n' | 0x0B | 0x0C | b'\r' | b' ');
        let cases: [(&str, bool); 6] = [
            (r"\d", byte.is_ascii_digit()),
            (r"\D", !byte.is_ascii_digit()),
            (r"\w", byte.is_ascii_alphanumeric() || byte == b'_'),
            (r"\W", !(byte.is_ascii_alphanumeric() || byte == b'_')),
            (r"\s", is_space),
            (r"\S", !is_space),
        ];
        for (pattern, expect_match) in cases {
            let program = compile(pattern).unwrap();
            let matched = execute(&haystack, &program) == 1;
            prop_assert_eq!(matched, expect_match, "pattern {pattern:?} byte {byte:#x}");
        }
    }

    /// A literal concatenation only ever matches at its own length, never
    /// a prefix or suffix of a string that doesn't start with it.
    #[test]
    fn concat_rejects_non_matching_prefix(s in "[abcxyz]{0,8}") {
        let program = compile("ab").unwrap();
        let matched = execute(s.as_bytes(), &program);
        if s.starts_with("ab") {
            prop_assert_eq!(matched, 2);
        } else {
            prop_assert_eq!(matched, 0);
        }
    }
}
