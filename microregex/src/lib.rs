//!# microregex
//!
//! `microregex` is a tiny byte-oriented regular-expression engine, compiled
//! through the classical Thompson pipeline: a pattern string is parsed into
//! a postfix token stream, expanded into an NFA, determinised into a DFA by
//! subset construction, and emitted as bytecode for a small register-less
//! virtual machine.
//!
//! ## Usage
//!
//! ```rust
//! let program = microregex::compile("hs|(s|hh)s*h").unwrap();
//! assert_eq!(microregex::execute(b"sssssh", &program), 6);
//! assert_eq!(microregex::execute(b"hs", &program), 2);
//! assert_eq!(microregex::execute(b"nope", &program), 0);
//! ```
//!
//! ## Grammar
//!
//! Atoms are literal bytes, `.` (one UTF-8 character, any byte-width),
//! `\xHH` hex-byte escapes, and the character-class escapes `\d \D \w \W
//! \s \S`. Operators are grouping `( )`, alternation `|`, Kleene star `*`,
//! and optional `?`. Anything else, including `+ [ ] { }`, is a literal
//! byte — there is no counted repetition, no character class syntax, no
//! `+`, no backreferences, no anchors beyond the implicit start anchor, no
//! submatch capture, no case-insensitivity, and no Unicode properties
//! beyond `.`'s byte-width detection.
//!
//! ## Matching semantics
//!
//! [`execute`] returns the length, in bytes, of the *longest* accepted
//! prefix of the haystack, matched from its very first byte (there is no
//! implicit `.*` search — callers wanting a search across start offsets
//! must slide the window themselves). A return of `0` means either an
//! empty match or no match at all; the two are indistinguishable, exactly
//! as the engine this crate descends from behaves.
//!
//! ## Pipeline
//!
//! * [`parser`] — infix pattern to postfix token stream (shunting-yard).
//! * [`nfa`] — postfix tokens to an NFA move table (Thompson construction).
//! * [`subset`] — NFA to DFA via subset construction.
//! * [`codegen`] — DFA to VM bytecode, with forward-jump patching.
//! * [`vm`] — the bytecode interpreter.
//!
//! [`compile`] and [`compile_into`] wire these five stages together and
//! implement the buffer-growth contract a C caller of the original engine
//! would have managed by hand.

pub mod codegen;
pub mod nfa;
pub mod parser;
pub mod subset;
pub mod token;
pub mod vm;

#[cfg(test)]
mod proptests;

use thiserror::Error;

/// The only failure mode `compile_into` can report: the caller's buffer
/// was too small to hold the compiled instruction stream.
///
/// Every other failure mode the original engine's packed-integer `compile`
/// could in principle hit (malformed escapes, unbalanced parentheses) is
/// implementation-defined rather than an error per `spec.md` §7: an
/// unrecognized escape silently degrades to a literal byte, and an
/// unmatched `)` is handled the same way the parser handles any other
/// `)` it sees (see DESIGN.md's Open Question log).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CompileError {
    /// The supplied buffer cannot hold the compiled program. The field
    /// names a capacity (in `u32` cells) that is known to suffice for this
    /// particular pattern.
    #[error("buffer too small to hold compiled program, need at least {0} cells")]
    NeedsCapacity(usize),
}

/// Compiles `pattern` into the caller-supplied `buf`, returning the number
/// of `u32` cells written.
///
/// This is the low-level primitive behind [`compile`]; most callers want
/// that instead. `compile_into` never allocates more than the five
/// pipeline stages' scratch structures (all scoped to this call and
/// dropped on every exit path, including the error path) and writes the
/// final instruction stream directly into `buf`.
///
/// An empty pattern writes nothing and returns `Ok(0)`.
pub fn compile_into(pattern: &str, buf: &mut [u32]) -> Result<usize, CompileError> {
    if pattern.is_empty() {
        return Ok(0);
    }

    let postfix = parser::to_postfix(pattern.as_bytes());
    let automaton = nfa::build(&postfix);
    let dfa = subset::build(&automaton);
    let code = codegen::generate(&dfa);

    if code.len() > buf.len() {
        return Err(CompileError::NeedsCapacity(code.len()));
    }
    buf[..code.len()].copy_from_slice(&code);
    Ok(code.len())
}

/// Compiles `pattern` into an owned instruction array.
///
/// Implements the growth protocol `spec.md` §6 assigns to callers of the
/// raw C-shaped `compile` (start at `10 * pattern.len()` cells, double on
/// [`CompileError::NeedsCapacity`] and retry) so that callers of this
/// crate never have to think about it.
pub fn compile(pattern: &str) -> Result<Vec<u32>, CompileError> {
    if pattern.is_empty() {
        return Ok(Vec::new());
    }

    let mut capacity = (pattern.len() * 10).max(16);
    loop {
        let mut buf = vec![0u32; capacity];
        match compile_into(pattern, &mut buf) {
            Ok(len) => {
                buf.truncate(len);
                return Ok(buf);
            }
            Err(CompileError::NeedsCapacity(needed)) => {
                capacity = capacity.max(needed) * 2;
            }
        }
    }
}

/// Runs `program` (as produced by [`compile`]) against `haystack`,
/// returning the length in bytes of the longest accepted prefix, or `0` if
/// nothing is accepted.
pub fn execute(haystack: &[u8], program: &[u32]) -> usize {
    vm::execute(haystack, program)
}
