//! Read position over a prefix-notation input.
//!
//! Guard expressions and formulas are both consumed front to back: an operator at the head
//! takes the next complete sub-expressions that follow it. The cursor only moves forward;
//! the input itself is never modified.

/// Operator characters. They can not appear inside proposition, state or action names.
pub const RESERVED: [char; 5] = ['$', '&', '|', '~', '@'];

pub fn is_reserved(c: char) -> bool {
    RESERVED.contains(&c)
}

/// First reserved character in `name`, if any.
pub fn find_reserved(name: &str) -> Option<char> {
    name.chars().find(|&c| is_reserved(c))
}

#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Byte offset of the next unread character.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consume characters while `pred` holds and return them.
    pub fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    /// Consume a name: everything up to the next reserved character
    /// (or whitespace, when `stop_at_whitespace` is set).
    pub fn take_name(&mut self, stop_at_whitespace: bool) -> &'a str {
        self.take_while(|c| !is_reserved(c) && !(stop_at_whitespace && c.is_whitespace()))
    }

    pub fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }
}
