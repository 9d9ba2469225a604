//! Built-in rule table for radare2 console output.
//!
//! The root state looks at the first character(s) of each line and pushes
//! a state for the kind of output it recognises:
//!
//! | line starts with            | state        | content                          |
//! |-----------------------------|--------------|----------------------------------|
//! | `$` (or contains ` -- `)    | `bashprompt` | shell prompt / banner            |
//! | `[`                         | `cmdprompt`  | `[0x1000]> pd 10` prompt echo    |
//! | `sys`, `usr`                | `dmoutput`   | memory map (`dm`)                |
//! | `0x`                        | `addroutput` | address listings                 |
//! | `│ ┌ └ | \ /` or space      | `pdoutput`   | visual-mode disassembly pane     |
//! | anything else but `[`       | `stroutput`  | generic string output            |
//!
//! Unmatched newlines reset the stack to root (see [`crate::scanner`]),
//! so each line is dispatched independently.
//!
//! Mnemonic and register vocabularies live in their own states and are
//! spliced into `pdoutput` by `include`; they stay reachable on their
//! own through [`Lexer::tokenize_in()`](crate::Lexer::tokenize_in).

use crate::{BuildError, Category, Lexer, RuleTableBuilder};

use crate::Category::{Comment, Function, Keyword, Number, NumberHex, Operator, Text};

/// State names declared by the table.
pub mod states {
    pub const ROOT: &str = "root";
    pub const BASH_PROMPT: &str = "bashprompt";
    pub const CMD_PROMPT: &str = "cmdprompt";
    pub const MEMORY_MAP: &str = "dmoutput";
    pub const DISASSEMBLY: &str = "pdoutput";
    pub const COMMENT: &str = "comment";
    pub const ADDRESS_LISTING: &str = "addroutput";
    pub const STRING_OUTPUT: &str = "stroutput";
    pub const STACK_OPS: &str = "stackops";
    pub const COPY_OPS: &str = "copyops";
    pub const ARITHMETIC_OPS: &str = "arithmeticops";
    pub const LOGIC_OPS: &str = "logicops";
    pub const IP_OPS: &str = "ipops";
    pub const OTHER_OPS: &str = "otherops";
    pub const REGISTERS: &str = "registers";
    pub const PSEUDOCODE: &str = "pseudocode";
}

pub const STACK_OPS: &[&str] = &["push", "pop"];

pub const COPY_OPS: &[&str] = &["mov", "movzx", "movsx", "movabs", "lea", "rdtsc"];

pub const ARITHMETIC_OPS: &[&str] = &[
    "leave", "add", "sub", "imul", "mul", "shl", "shr", "sar", "sal",
];

pub const LOGIC_OPS: &[&str] = &["and", "or", "not", "xor", "cmp", "word", "test"];

/// Control-transfer mnemonics.
pub const IP_OPS: &[&str] = &[
    "je", "jmp", "jne", "jae", "jbe", "call", "ret", "syscall",
];

/// Size specifiers, filler instructions and address-expression punctuation.
pub const OTHER_OPS: &[&str] = &[
    "in", "byte", "sbb", "clc", "nop", ".qword", "qword", "dword", "local_", "[", "h]", "]", "-",
    "+",
];

/// x86 / x86-64 register names and segment prefixes.
pub const REGISTERS: &[&str] = &[
    "rsp", "esp", "spl", "rbp", "ebp", "bpl", "rax", "eax", "ah", "al", "rbx", "ebx", "bh", "bl",
    "rcx", "ecx", "cx", "ch", "cl", "rdx", "edx", "dx", "dh", "dl", "rdi", "edi", "dil", "rsi",
    "rip", "esi", "sil", "r15", "r14", "r13", "r12", "r11", "r10", "r9", "r9d", "r8", "r8d",
    "rflags", "fs:", "gs:", "cs:",
];

/// Keywords of radare2's pseudo-decompiler output (`pdc`, `pdd`).
pub const PSEUDOCODE: &[&str] = &["var", "if", "goto"];

/// Declare the radare2 states on a fresh builder.
pub fn builder() -> RuleTableBuilder {
    let mut b = RuleTableBuilder::new(states::ROOT);

    b.state(states::ROOT)
        .rule(r"\n", Text)
        .push(r"^\$| -- ", Text, states::BASH_PROMPT)
        .push(r"^\[", Text, states::CMD_PROMPT)
        .push(r"^(?:sys|usr)", Category::String, states::MEMORY_MAP)
        .push(r"0[Xx]", Category::String, states::ADDRESS_LISTING)
        .push(r"^[|\\/┌│└ ]", Keyword, states::DISASSEMBLY)
        .push(r"^[^\[]", Text, states::STRING_OUTPUT);

    b.state(states::BASH_PROMPT).push(r".+", Text, states::BASH_PROMPT);

    b.state(states::MEMORY_MAP)
        .rule(r"[0-9.]+(?:M|K)", Keyword)
        .rule(r"0[Xx][0-9a-f]+", NumberHex)
        .rule(r"\bs\b", Text)
        .rule(r"-?[r-][w-][x-]-?", Operator)
        .rule(r"[-*/_.;\[\]]", Operator)
        .rule(r" ", Text)
        .rule(r"[A-Za-z0-9]+", Text);

    b.state(states::DISASSEMBLY)
        .rule(r"[┌│└↑─<>]", Keyword)
        .push(r"--", Text, states::STRING_OUTPUT)
        .rule(r"[-+*/&=]", Operator)
        .groups(r"(\()(var)(\))", &[Text, NumberHex, Text])
        .groups(r"(\()(fcn)(\))", &[Text, Operator, Text])
        .rule(r"local_[0-9a-z_]+", Keyword)
        .rule(r"main", Text)
        .rule(r"/|\||\\", Keyword)
        .rule(r"[.,`][=-]+[<>]", Keyword)
        .rule(r" ", Text)
        .rule(r";$", Text)
        .rule(r",", Operator)
        .push(r";", Comment, states::COMMENT)
        .rule(r"\(\)", Text)
        .groups(r"(\()(.+?)(\))", &[Text, Keyword, Text])
        .groups(
            r"([A-Za-z]{3})(\.)([A-Za-z]{3})(\.)([\w.:]+)",
            &[Keyword, Operator, Keyword, Operator, Text],
        )
        .groups(r"([A-Za-z]{3})(\.)([\w.:]+)", &[Keyword, Operator, Text])
        .groups(
            r"(0[Xx][0-9a-f]{8,})( +)([0-9a-f]+\.?)( +)",
            &[Category::String, Text, Text, Text],
        )
        .groups(
            r"^(0[Xx][0-9a-f]{8,})( +)(\.?[A-Za-z0-9]+)( +)(0[Xx][0-9a-f]{8,})",
            &[Category::String, Text, Keyword, Text, NumberHex],
        )
        .include(states::STACK_OPS)
        .include(states::COPY_OPS)
        .include(states::ARITHMETIC_OPS)
        .include(states::LOGIC_OPS)
        .include(states::IP_OPS)
        .include(states::OTHER_OPS)
        .include(states::REGISTERS)
        .include(states::PSEUDOCODE)
        .rule(r"0[Xx][0-9a-f]+", NumberHex)
        .rule(r"[0-9a-f]", Number);

    b.state(states::COMMENT).pop(r".+$", Comment);

    b.state(states::CMD_PROMPT)
        .groups(
            r"(0[xX][0-9a-f]+)(\])(>)([ \t]*)(\w+)?(.*)",
            &[NumberHex, Text, Operator, Text, Function, Text],
        )
        .rule(r".+", Text);

    b.state(states::ADDRESS_LISTING)
        .groups(
            r"([0-9a-f]{8,})([ \t]+\d+[ \t]\d+[ \t]+)([0-9A-z._]+)$",
            &[Category::String, NumberHex, Text],
        )
        .groups(
            r"([0-9a-f]{8,})([ \t]+\d+[ \t]\d+)([ \t]*->)([ \t]\d*)([ \t]*[0-9A-z._]+)$",
            &[Category::String, NumberHex, Operator, NumberHex, Text],
        )
        .groups(
            r"([0-9a-f]{8,})([ \t]{2})([0-9A-z \t]+)([ \t][ \t])(.{16})$",
            &[Category::String, Text, NumberHex, Text, Text],
        )
        .groups(
            r"([0-9a-f]+[ \t])(\d+[ \t])([0-9A-z/_ ]+)(\]>)(.+)$",
            &[Category::String, Keyword, Operator, Category::String, Text],
        )
        .groups(r"([0-9a-f]+)([ \t]*)$", &[Category::String, Text]);

    b.state(states::STRING_OUTPUT)
        .rule(r"[A-Za-z%_)<>]+", Text)
        .rule(r" ", Text)
        .rule(r"(?:0[Xx])?[0-9a-f]+", NumberHex)
        .rule(r"[.:+/=-]", Operator)
        .rule(r"\|", Keyword);

    b.state(states::PSEUDOCODE).words(PSEUDOCODE, NumberHex);
    b.state(states::REGISTERS).words(REGISTERS, Keyword);
    b.state(states::OTHER_OPS).words(OTHER_OPS, Text);
    b.state(states::STACK_OPS).words(STACK_OPS, Keyword);
    b.state(states::COPY_OPS).words(COPY_OPS, Number);
    b.state(states::LOGIC_OPS).words(LOGIC_OPS, Category::String);
    b.state(states::ARITHMETIC_OPS).words(ARITHMETIC_OPS, Operator);
    b.state(states::IP_OPS).words(IP_OPS, Function);

    b
}

/// Build the radare2 table.
///
/// Prefer [`crate::radare2()`], which builds it once per process.
pub fn lexer() -> Result<Lexer, BuildError> {
    builder().build()
}
