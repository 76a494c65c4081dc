use crate::token::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Keyword {
    Null,
    True,
    False,
}

impl Keyword {
    pub(crate) fn from_first_byte(b: u8) -> Option<Self> {
        match b {
            b'n' => Some(Self::Null),
            b't' => Some(Self::True),
            b'f' => Some(Self::False),
            _ => None,
        }
    }

    pub(crate) fn text(self) -> &'static [u8] {
        match self {
            Self::Null => b"null",
            Self::True => b"true",
            Self::False => b"false",
        }
    }

    pub(crate) fn token(self) -> Token {
        match self {
            Self::Null => Token::Null,
            Self::True => Token::True,
            Self::False => Token::False,
        }
    }

    pub(crate) fn eof_context(self) -> &'static str {
        match self {
            Self::Null => "in a 'null' token",
            Self::True => "in a 'true' token",
            Self::False => "in a 'false' token",
        }
    }
}

/// What happened after feeding one more byte into the keyword matcher?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Byte matched, but the keyword is not finished yet.
    NeedMore,
    /// Byte matched *and* it was the last byte of the keyword.
    Done,
    /// Byte did **not** match the expected byte.
    Reject,
}

/// Progress through one keyword: which keyword, and how many of its bytes
/// have been matched so far.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct LiteralMatch {
    keyword: Keyword,
    matched: u8,
}

impl LiteralMatch {
    /// Start matching after the *first* byte (`n`, `t`, or `f`) was consumed.
    pub(crate) fn after_first(keyword: Keyword) -> Self {
        Self {
            keyword,
            matched: 1,
        }
    }

    pub(crate) fn keyword(self) -> Keyword {
        self.keyword
    }

    pub(crate) fn is_complete(self) -> bool {
        usize::from(self.matched) == self.keyword.text().len()
    }

    /// The bytes matched so far.
    pub(crate) fn matched_text(self) -> &'static [u8] {
        &self.keyword.text()[..usize::from(self.matched)]
    }

    /// The bytes still to match.
    pub(crate) fn rest(self) -> &'static [u8] {
        &self.keyword.text()[usize::from(self.matched)..]
    }

    /// Give the matcher the next input byte and learn what to do next.
    pub(crate) fn step(&mut self, b: u8) -> Step {
        match self.rest().first() {
            Some(&expected) if expected == b => {
                self.matched += 1;
                if self.is_complete() {
                    Step::Done
                } else {
                    Step::NeedMore
                }
            }
            _ => Step::Reject,
        }
    }
}
