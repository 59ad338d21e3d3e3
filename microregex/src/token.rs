//! The token and character-class sum types shared by the parser and the
//! NFA builder.
//!
//! The original C implementation this crate is descended from packs every
//! stage's alphabet into a single `unsigned int`: operators are tagged with
//! a high bit (`OP_MIN`), and metacharacter predicates are tagged with a
//! shifted escape byte. Here each stage gets its own proper sum type
//! instead, so invalid combinations (e.g. an operator where a literal byte
//! is expected) can't be constructed at all.

/// One of the predicate classes a backslash escape (or `.`) can compile to.
///
/// `Any` is `.`; the rest come in negated/non-negated pairs matching the
/// usual `\d \D \w \W \s \S` escapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetaClass {
    Any,
    Digit,
    NotDigit,
    Word,
    NotWord,
    Space,
    NotSpace,
}

impl MetaClass {
    /// Does `byte` satisfy this predicate?
    ///
    /// `Any` matches every byte here; the multibyte-continuation-byte
    /// consumption for UTF-8 leading bytes is handled one layer up, by the
    /// VM's `JANY` opcode advancing the cursor by more than one byte.
    pub fn matches(self, byte: u8) -> bool {
        match self {
            MetaClass::Any => true,
            MetaClass::Digit => byte.is_ascii_digit(),
            MetaClass::NotDigit => !byte.is_ascii_digit(),
            MetaClass::Word => is_word_byte(byte),
            MetaClass::NotWord => !is_word_byte(byte),
            MetaClass::Space => is_space_byte(byte),
            MetaClass::NotSpace => !is_space_byte(byte),
        }
    }

    /// Parses the letter following a backslash (`d`, `D`, `w`, ...) into a
    /// class, if it names one.
    pub fn from_escape_letter(letter: u8) -> Option<MetaClass> {
        match letter {
            b'd' => Some(MetaClass::Digit),
            b'D' => Some(MetaClass::NotDigit),
            b'w' => Some(MetaClass::Word),
            b'W' => Some(MetaClass::NotWord),
            b's' => Some(MetaClass::Space),
            b'S' => Some(MetaClass::NotSpace),
            _ => None,
        }
    }

    /// The byte this class is tagged with in the original's postfix stream
    /// (`.` for `Any`, the escape letter otherwise; e.g. `\D` is `'D'`).
    ///
    /// The source packs a class token as `METACHAR | letter` and sorts DFA
    /// moves out of a shared state by ascending `input` (`dfaCmp`); since
    /// `METACHAR`'s low byte is zero, that sort reduces to ascending order
    /// by this byte among class moves. Used to order class edges the same
    /// way at codegen time, so overlapping classes out of one DFA state
    /// (`\d|\S`) are tested in the same priority the original would use.
    pub fn source_tag(self) -> u8 {
        match self {
            MetaClass::Any => b'.',
            MetaClass::NotDigit => b'D',
            MetaClass::NotSpace => b'S',
            MetaClass::NotWord => b'W',
            MetaClass::Digit => b'd',
            MetaClass::Space => b's',
            MetaClass::Word => b'w',
        }
    }
}

fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// C's `isspace`: space, form feed, newline, carriage return, horizontal
/// tab, and vertical tab. `u8::is_ascii_whitespace` is narrower — it
/// excludes `\x0B` (vertical tab) — so it isn't used here.
fn is_space_byte(byte: u8) -> bool {
    matches!(byte, b'\t' | b'\n' | 0x0B | 0x0C | b'\r' | b' ')
}

/// A single symbol of the postfix token stream produced by the parser and
/// consumed by the NFA builder.
///
/// `Extract` marks a parenthesis boundary. Submatch extraction is out of
/// scope (see `CompileError` docs and DESIGN.md); the NFA builder assigns
/// each one a paren index as it walks the stream (mirroring the source's
/// incrementing `nparen` counter) purely to keep the move shape faithful,
/// then treats it as an inert no-op that can never become part of a real
/// transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostfixToken {
    Literal(u8),
    Class(MetaClass),
    Epsilon,
    Concat,
    Union,
    Closure,
    Extract,
}

/// Infix operators that can sit on the shunting-yard operator stack.
///
/// `RParen`, `Question` and the extract-marking close-paren are handled
/// inline by the parser and never pushed here; only these four ever wait
/// on the stack for a higher-precedence neighbor to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackOp {
    LParen,
    Union,
    Concat,
    Closure,
}

impl StackOp {
    /// Relative binding strength, `LParen < Union < Concat < Closure`,
    /// mirroring the ordering `spec.md` assigns the original's packed
    /// operator constants. The shunting-yard drains in this crate compare
    /// ranks with a strict `>`, not `>=`: two operators of equal rank
    /// (e.g. back-to-back `|` alternatives) deliberately do not drain each
    /// other, which is what lets a flat chain `a|b|c` build as a flat run
    /// of `Union` tokens instead of a left-leaning tree.
    pub fn rank(self) -> u8 {
        match self {
            StackOp::LParen => 0,
            StackOp::Union => 1,
            StackOp::Concat => 2,
            StackOp::Closure => 3,
        }
    }

    pub fn to_postfix_token(self) -> PostfixToken {
        match self {
            StackOp::LParen => unreachable!("LParen is never emitted to the output stream"),
            StackOp::Union => PostfixToken::Union,
            StackOp::Concat => PostfixToken::Concat,
            StackOp::Closure => PostfixToken::Closure,
        }
    }
}
