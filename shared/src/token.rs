use std::fmt::Display;

use phf::phf_map;

/// Token number of the first terminal; yacc reserves everything below for
/// single-character tokens.
pub const FIRST_TERMINAL: u16 = 258;

/// Terminal symbols shared by the scanner and the generated parser. The
/// discriminants are the yacc token numbers and must not be reordered.
#[rustfmt::skip]
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terminal {
    // Literals.
    NumIdentifier = 258, NumConstant, LineNumber, RemarkString, QuotedString,

    // Keywords.
    If, Then, For, To, Step, Next, On, Goto, Go,
    Input, Print, Stop, End, Rem, Let,

    // Comparison operators.
    GreaterEqual, LessEqual, NotEqual,

    // Precedence marker for unary minus, never produced by a scanner.
    UnaryMinus,
}

static KEYWORDS: phf::Map<&'static str, Terminal> = phf_map! {
    "IF"    => Terminal::If,
    "THEN"  => Terminal::Then,
    "FOR"   => Terminal::For,
    "TO"    => Terminal::To,
    "STEP"  => Terminal::Step,
    "NEXT"  => Terminal::Next,
    "ON"    => Terminal::On,
    "GOTO"  => Terminal::Goto,
    "GO"    => Terminal::Go,
    "INPUT" => Terminal::Input,
    "PRINT" => Terminal::Print,
    "STOP"  => Terminal::Stop,
    "END"   => Terminal::End,
    "REM"   => Terminal::Rem,
    "LET"   => Terminal::Let,
};

const ALL: [Terminal; 24] = [
    Terminal::NumIdentifier,
    Terminal::NumConstant,
    Terminal::LineNumber,
    Terminal::RemarkString,
    Terminal::QuotedString,
    Terminal::If,
    Terminal::Then,
    Terminal::For,
    Terminal::To,
    Terminal::Step,
    Terminal::Next,
    Terminal::On,
    Terminal::Goto,
    Terminal::Go,
    Terminal::Input,
    Terminal::Print,
    Terminal::Stop,
    Terminal::End,
    Terminal::Rem,
    Terminal::Let,
    Terminal::GreaterEqual,
    Terminal::LessEqual,
    Terminal::NotEqual,
    Terminal::UnaryMinus,
];

impl Terminal {
    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn from_code(code: u16) -> Option<Self> {
        let index = code.checked_sub(FIRST_TERMINAL)? as usize;
        ALL.get(index).copied()
    }

    /// Looks up a keyword spelling, ignoring ASCII case.
    pub fn keyword(word: &str) -> Option<Self> {
        KEYWORDS.get(word.to_ascii_uppercase().as_str()).copied()
    }

    /// The name the grammar file uses for this terminal.
    pub fn name(self) -> &'static str {
        match self {
            Terminal::NumIdentifier => "NumIdentifier",
            Terminal::NumConstant => "NumConstant",
            Terminal::LineNumber => "LineNumber",
            Terminal::RemarkString => "RemarkString",
            Terminal::QuotedString => "QuotedString",
            Terminal::If => "IF",
            Terminal::Then => "THEN",
            Terminal::For => "FOR",
            Terminal::To => "TO",
            Terminal::Step => "STEP",
            Terminal::Next => "NEXT",
            Terminal::On => "ON",
            Terminal::Goto => "GOTO",
            Terminal::Go => "GO",
            Terminal::Input => "INPUT",
            Terminal::Print => "PRINT",
            Terminal::Stop => "STOP",
            Terminal::End => "END",
            Terminal::Rem => "REM",
            Terminal::Let => "LET",
            Terminal::GreaterEqual => "GE",
            Terminal::LessEqual => "LE",
            Terminal::NotEqual => "NE",
            Terminal::UnaryMinus => "UMINUS",
        }
    }
}

impl Display for Terminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
