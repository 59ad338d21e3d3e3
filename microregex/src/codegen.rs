//! DFA move table to VM instruction stream, with forward-jump patching.
//!
//! Every DFA state that has at least one outgoing move gets its own code
//! block; states with none (pure sinks, most often a pattern's final
//! accepting state) are never given a block at all. A patched jump whose
//! destination has no block is redirected to the prologue's standalone
//! `ACCEPT` cell instead — "there's nowhere left to go, so what's been
//! consumed already is the match."

use std::collections::HashMap;

use crate::subset::{Dfa, DfaInput};
use crate::token::MetaClass;
use crate::vm::{class_opcode, OP_ACCEPT, OP_ACCEPTM1, OP_FAIL, OP_FRWRD, OP_JANY, OP_JEQ, OP_JMP};

/// Emits the bytecode for `dfa`. The result always starts with the
/// 3-cell prologue (`JMP`, its patched target, `ACCEPT`) and ends with a
/// trailing `FAIL` sentinel.
pub fn generate(dfa: &Dfa) -> Vec<u32> {
    let mut code = Vec::with_capacity(dfa.moves.len() * 3 + 8);

    code.push(OP_JMP);
    let initial_jump_patch = code.len();
    code.push(0);
    let accept_addr = code.len() as u32;
    code.push(OP_ACCEPT);

    let mut entry_addr: HashMap<u32, u32> = HashMap::new();
    let mut patches: Vec<(usize, u32)> = Vec::new();

    let moves = &dfa.moves;
    let mut i = 0;
    let mut first_block = true;
    while i < moves.len() {
        let from = moves[i].from;
        let mut j = i + 1;
        while j < moves.len() && moves[j].from == from {
            j += 1;
        }

        if !first_block {
            code.push(OP_FAIL);
        }
        first_block = false;

        entry_addr.insert(from, code.len() as u32);
        if dfa.states[from as usize].is_final {
            code.push(OP_ACCEPTM1);
        }
        code.push(OP_FRWRD);

        for mv in &moves[i..j] {
            match mv.input {
                DfaInput::Byte(b) => {
                    code.push(OP_JEQ);
                    code.push(b as u32);
                    patches.push((code.len(), mv.to));
                    code.push(0);
                }
                DfaInput::Class(MetaClass::Any) => {
                    code.push(OP_JANY);
                    patches.push((code.len(), mv.to));
                    code.push(0);
                }
                DfaInput::Class(class) => {
                    code.push(class_opcode(class));
                    patches.push((code.len(), mv.to));
                    code.push(0);
                }
            }
        }

        i = j;
    }
    code.push(OP_FAIL);

    for (cell, dest) in patches {
        code[cell] = entry_addr.get(&dest).copied().unwrap_or(accept_addr);
    }
    code[initial_jump_patch] = entry_addr.get(&0).copied().unwrap_or(accept_addr);

    code
}
