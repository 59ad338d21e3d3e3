//! NFA to DFA conversion via subset (powerset) construction.
//!
//! Each DFA state is the epsilon closure of a set of NFA states, keyed for
//! deduplication by that closure (a canonical sorted `Vec<u32>`) rather
//! than by the pre-closure "kernel" set the source dedups on — a
//! harmless simplification (it can only merge more states than the
//! source would, never fewer, and never changes what a pattern matches;
//! see DESIGN.md).
//!
//! A literal byte transition out of a subset inherits the destinations of
//! any character-class transition out of that same subset whose
//! predicate the byte satisfies (so a literal `d` edge also follows
//! wherever a `\d` edge out of the same state would go), matching the
//! source's metachar-inheritance behavior in `sub_afterSubset`.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use crate::nfa::{Nfa, NfaInput, FINAL_STATE, INITIAL_STATE};
use crate::token::MetaClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DfaInput {
    Byte(u8),
    Class(MetaClass),
}

#[derive(Debug, Clone, Copy)]
pub struct DfaMove {
    pub from: u32,
    pub to: u32,
    pub input: DfaInput,
}

#[derive(Debug, Clone, Copy)]
pub struct DfaState {
    pub is_final: bool,
}

#[derive(Debug)]
pub struct Dfa {
    pub states: Vec<DfaState>,
    pub moves: Vec<DfaMove>,
}

/// Follows epsilon moves transitively from `seeds` to their full closure.
fn epsilon_closure(
    seeds: &BTreeSet<u32>,
    by_state: &HashMap<u32, Vec<(NfaInput, u32)>>,
) -> BTreeSet<u32> {
    let mut set = seeds.clone();
    let mut stack: Vec<u32> = seeds.iter().copied().collect();
    while let Some(s) = stack.pop() {
        if let Some(out) = by_state.get(&s) {
            for &(input, to) in out {
                if input == NfaInput::Epsilon && set.insert(to) {
                    stack.push(to);
                }
            }
        }
    }
    set
}

pub fn build(nfa: &Nfa) -> Dfa {
    let mut by_state: HashMap<u32, Vec<(NfaInput, u32)>> = HashMap::new();
    for mv in &nfa.moves {
        by_state.entry(mv.from).or_default().push((mv.input, mv.to));
    }

    let mut pending: Vec<(Vec<u32>, bool)> = Vec::new();
    let mut moves: Vec<DfaMove> = Vec::new();
    let mut seen: HashMap<Vec<u32>, u32> = HashMap::new();
    let mut worklist: VecDeque<u32> = VecDeque::new();

    let initial_seed: BTreeSet<u32> = std::iter::once(INITIAL_STATE).collect();
    let initial_closure = epsilon_closure(&initial_seed, &by_state);
    let initial_key: Vec<u32> = initial_closure.iter().copied().collect();
    let initial_final = initial_closure.contains(&FINAL_STATE);
    seen.insert(initial_key.clone(), 0);
    pending.push((initial_key, initial_final));
    worklist.push_back(0);

    while let Some(label) = worklist.pop_front() {
        let subset: BTreeSet<u32> = pending[label as usize].0.iter().copied().collect();

        let mut byte_targets: BTreeMap<u8, BTreeSet<u32>> = BTreeMap::new();
        let mut class_targets: BTreeMap<MetaClass, BTreeSet<u32>> = BTreeMap::new();
        for &s in &subset {
            if let Some(out) = by_state.get(&s) {
                for &(input, to) in out {
                    match input {
                        NfaInput::Byte(b) => {
                            byte_targets.entry(b).or_default().insert(to);
                        }
                        NfaInput::Class(c) => {
                            class_targets.entry(c).or_default().insert(to);
                        }
                        NfaInput::Epsilon | NfaInput::Extract(_) => {}
                    }
                }
            }
        }

        for (&byte, dests) in byte_targets.iter_mut() {
            for (&class, class_dests) in class_targets.iter() {
                if class.matches(byte) {
                    dests.extend(class_dests.iter().copied());
                }
            }
        }

        for (byte, dests) in &byte_targets {
            let to = resolve_target(dests, &by_state, &mut pending, &mut seen, &mut worklist);
            moves.push(DfaMove {
                from: label,
                to,
                input: DfaInput::Byte(*byte),
            });
        }
        // Emitted in ascending `MetaClass::source_tag` order rather than
        // `class_targets`' own (enum-declaration) order, so overlapping
        // class edges out of this state are tested in the same priority
        // the source's `dfaCmp` would give them.
        let mut ordered_classes: Vec<(&MetaClass, &BTreeSet<u32>)> = class_targets.iter().collect();
        ordered_classes.sort_by_key(|(class, _)| class.source_tag());
        for (class, dests) in ordered_classes {
            let to = resolve_target(dests, &by_state, &mut pending, &mut seen, &mut worklist);
            moves.push(DfaMove {
                from: label,
                to,
                input: DfaInput::Class(*class),
            });
        }
    }

    let states = pending
        .into_iter()
        .map(|(_, is_final)| DfaState { is_final })
        .collect();
    Dfa { states, moves }
}

fn resolve_target(
    dests: &BTreeSet<u32>,
    by_state: &HashMap<u32, Vec<(NfaInput, u32)>>,
    pending: &mut Vec<(Vec<u32>, bool)>,
    seen: &mut HashMap<Vec<u32>, u32>,
    worklist: &mut VecDeque<u32>,
) -> u32 {
    let closure = epsilon_closure(dests, by_state);
    let key: Vec<u32> = closure.iter().copied().collect();
    if let Some(&label) = seen.get(&key) {
        return label;
    }
    let label = pending.len() as u32;
    let is_final = closure.contains(&FINAL_STATE);
    seen.insert(key.clone(), label);
    pending.push((key, is_final));
    worklist.push_back(label);
    label
}
