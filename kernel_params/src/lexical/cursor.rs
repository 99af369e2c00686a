//! Single-position cursor over immutable kernel source

/// Identifier characters are ASCII letters and digits only
pub fn is_alpha(b: u8) -> bool {
    b.is_ascii_alphanumeric()
}

/// Blank characters: space, tab, CR, LF
pub fn is_blank(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

/// A forward-only scanning position into the source text.
///
/// All offsets are byte offsets. The cursor never moves backwards except
/// through [`Cursor::reset`], which the value grammar uses for lookahead.
#[derive(Debug, Clone)]
pub struct Cursor<'src> {
    source: &'src str,
    pos: usize,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src str) -> Self {
        Self { source, pos: 0 }
    }

    /// Full source text the cursor was created over
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Current byte offset
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Move back to a previously observed offset
    pub fn reset(&mut self, offset: usize) {
        self.pos = offset.min(self.source.len());
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Byte at the cursor, if any
    pub fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    /// Byte `n` positions past the cursor, if any
    pub fn peek_at(&self, n: usize) -> Option<u8> {
        self.source.as_bytes().get(self.pos + n).copied()
    }

    /// Advance by `n` bytes, clamped to end of input
    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.source.len());
    }

    /// Text between `start` and the cursor
    pub fn slice_from(&self, start: usize) -> &'src str {
        self.source.get(start..self.pos).unwrap_or("")
    }

    /// Remaining input
    pub fn rest(&self) -> &'src str {
        self.source.get(self.pos..).unwrap_or("")
    }

    pub fn at_alpha(&self) -> bool {
        self.peek().is_some_and(is_alpha)
    }

    fn advance_while(&mut self, pred: impl Fn(u8) -> bool) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Skip one run of blanks; false if the cursor was not on a blank
    pub fn skip_blank(&mut self) -> bool {
        self.advance_while(is_blank) > 0
    }

    /// Skip one line or block comment; false if none starts at the cursor.
    ///
    /// A line comment also swallows the newline characters that end it. An
    /// unterminated block comment runs to end of input.
    pub fn skip_comment(&mut self) -> bool {
        match (self.peek(), self.peek_at(1)) {
            (Some(b'/'), Some(b'/')) => {
                self.advance_while(|b| b != b'\n' && b != b'\r');
                self.advance_while(|b| b == b'\n' || b == b'\r');
                true
            }
            (Some(b'/'), Some(b'*')) => {
                self.advance(2);
                match self.rest().find("*/") {
                    Some(end) => self.advance(end + 2),
                    None => self.pos = self.source.len(),
                }
                true
            }
            _ => false,
        }
    }

    fn at_comment(&self) -> bool {
        self.peek() == Some(b'/') && matches!(self.peek_at(1), Some(b'/') | Some(b'*'))
    }

    /// Skip a maximal run of non-identifier characters, stopping before an
    /// identifier character or the start of a comment
    pub fn skip_not_alpha(&mut self) -> bool {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if is_alpha(b) || self.at_comment() {
                break;
            }
            self.pos += 1;
        }
        self.pos > start
    }

    /// Consume a maximal identifier run and return it (possibly empty)
    pub fn take_alpha(&mut self) -> &'src str {
        let start = self.pos;
        self.advance_while(is_alpha);
        self.slice_from(start)
    }

    /// Consume `expected` if it is the next byte
    pub fn eat_char(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Match a keyword that is not immediately followed by an identifier
    /// character. Consumes nothing on failure.
    pub fn match_keyword(&mut self, keyword: &str) -> bool {
        if !self.rest().starts_with(keyword) {
            return false;
        }
        let end = self.pos + keyword.len();
        if self.source.as_bytes().get(end).is_some_and(|&b| is_alpha(b)) {
            return false;
        }
        self.pos = end;
        true
    }

    /// Skip comments, blanks and punctuation until an identifier character
    /// or end of input. Returns whether input remains.
    pub fn advance_to_identifier(&mut self) -> bool {
        while self.skip_comment() || self.skip_blank() || self.skip_not_alpha() {}
        !self.is_eof()
    }
}
