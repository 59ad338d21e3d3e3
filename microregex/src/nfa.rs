//! Postfix token stream to NFA move table.
//!
//! States are plain `u32` handles into a flat move list (an arena, not a
//! graph of pointers — see the crate-level design notes in `lib.rs`).
//! State `0` is always the sole accepting state and state `1` is always
//! the initial state; every other label is allocated monotonically while
//! walking the postfix stream from right to left, mirroring a stack
//! machine where each stack slot is a `(before, after)` state pair
//! denoting "the fragment built so far enters at `before` and exits at
//! `after`".

use crate::token::{MetaClass, PostfixToken};

pub const FINAL_STATE: u32 = 0;
pub const INITIAL_STATE: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NfaInput {
    Byte(u8),
    Class(MetaClass),
    Epsilon,
    /// Parenthesis boundary marker. Carries the 1-based index the source
    /// assigns submatch groups; never affects matching.
    Extract(u32),
}

#[derive(Debug, Clone, Copy)]
pub struct NfaMove {
    pub from: u32,
    pub to: u32,
    pub input: NfaInput,
}

#[derive(Debug)]
pub struct Nfa {
    pub moves: Vec<NfaMove>,
    pub state_count: u32,
}

/// Builds the NFA move table for a postfix token stream.
///
/// An empty stream produces the trivial one-state NFA: state 1 (initial)
/// is also state 0 (final) in effect, matching the empty pattern always
/// accepting the empty prefix — callers special-case an empty pattern
/// before this ever runs (see `compile`), so this is mostly defensive.
pub fn build(postfix: &[PostfixToken]) -> Nfa {
    let mut moves = Vec::with_capacity(postfix.len());
    // one (before, after) pair per unresolved fragment on the stack.
    let mut frames: Vec<(u32, u32)> = vec![(INITIAL_STATE, FINAL_STATE)];
    let mut next_label = 2u32;
    let mut next_paren = 0u32;

    for token in postfix.iter().rev() {
        match *token {
            PostfixToken::Union => {
                let top = *frames.last().unwrap();
                frames.push(top);
            }
            PostfixToken::Concat => {
                let top = frames.len() - 1;
                let z = next_label;
                next_label += 1;
                let (before, after) = frames[top];
                frames[top] = (before, z);
                frames.push((z, after));
            }
            PostfixToken::Closure => {
                let top = frames.len() - 1;
                let (before, after) = frames[top];
                let z = next_label;
                next_label += 1;
                moves.push(NfaMove {
                    from: before,
                    to: z,
                    input: NfaInput::Epsilon,
                });
                moves.push(NfaMove {
                    from: z,
                    to: after,
                    input: NfaInput::Epsilon,
                });
                frames[top] = (z, z);
            }
            PostfixToken::Extract => {
                let (before, after) = *frames.last().unwrap();
                next_paren += 1;
                moves.push(NfaMove {
                    from: before,
                    to: after,
                    input: NfaInput::Extract(next_paren),
                });
            }
            PostfixToken::Literal(byte) => {
                let (before, after) = frames.pop().unwrap();
                moves.push(NfaMove {
                    from: before,
                    to: after,
                    input: NfaInput::Byte(byte),
                });
            }
            PostfixToken::Class(class) => {
                let (before, after) = frames.pop().unwrap();
                moves.push(NfaMove {
                    from: before,
                    to: after,
                    input: NfaInput::Class(class),
                });
            }
            PostfixToken::Epsilon => {
                let (before, after) = frames.pop().unwrap();
                moves.push(NfaMove {
                    from: before,
                    to: after,
                    input: NfaInput::Epsilon,
                });
            }
        }
    }

    debug_assert_eq!(frames.len(), 1, "postfix stream must resolve to one fragment");
    Nfa {
        moves,
        state_count: next_label,
    }
}
