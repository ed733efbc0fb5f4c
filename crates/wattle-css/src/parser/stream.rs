//! A cursor over a token slice.
//!
//! [§ 5.3 Token streams](https://www.w3.org/TR/css-syntax-3/#token-streams)
//!
//! "A token stream is a struct representing a stream of tokens and/or
//! component values." Sub-streams for block contents borrow the same
//! token slice, so nested parsing never copies tokens.

use core::ops::{Deref, DerefMut};

use crate::tokenizer::{BlockType, CSSToken};

static EOF_TOKEN: CSSToken = CSSToken::EOF;

/// An opaque stream position returned by [`TokenStream::state`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamState(usize);

/// A forward cursor over a borrowed token slice.
///
/// Reading past the end yields [`CSSToken::EOF`] indefinitely.
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    tokens: &'a [CSSToken],
    position: usize,
}

impl<'a> TokenStream<'a> {
    /// Create a stream over `tokens`. A trailing EOF token is not part of
    /// the stream.
    #[must_use]
    pub fn new(tokens: &'a [CSSToken]) -> Self {
        let tokens = match tokens.split_last() {
            Some((CSSToken::EOF, rest)) => rest,
            _ => tokens,
        };
        Self {
            tokens,
            position: 0,
        }
    }

    /// The next token without consuming it.
    #[must_use]
    pub fn peek(&self) -> &'a CSSToken {
        self.tokens.get(self.position).unwrap_or(&EOF_TOKEN)
    }

    /// The token `offset` places past the next one.
    #[must_use]
    pub fn peek_at(&self, offset: usize) -> &'a CSSToken {
        self.tokens
            .get(self.position + offset)
            .unwrap_or(&EOF_TOKEN)
    }

    /// The most recently consumed token, or EOF at the start of the stream.
    #[must_use]
    pub fn previous(&self) -> &'a CSSToken {
        self.position
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
            .unwrap_or(&EOF_TOKEN)
    }

    /// Consume and return the next token.
    pub fn consume(&mut self) -> &'a CSSToken {
        let token = self.peek();
        if self.position < self.tokens.len() {
            self.position += 1;
        }
        token
    }

    /// Consume the next token and any whitespace after it.
    pub fn consume_including_whitespace(&mut self) -> &'a CSSToken {
        let token = self.consume();
        self.consume_whitespace();
        token
    }

    /// Skip whitespace tokens.
    pub fn consume_whitespace(&mut self) {
        while self.peek().is_whitespace() {
            self.position += 1;
        }
    }

    /// True once every token has been consumed.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Capture the current position.
    #[must_use]
    pub const fn state(&self) -> StreamState {
        StreamState(self.position)
    }

    /// Rewind (or advance) to a position captured by [`state`](Self::state).
    pub const fn restore(&mut self, state: StreamState) {
        self.position = state.0;
    }

    /// Start a speculative parse. The stream rewinds when the returned
    /// guard drops unless [`SavePoint::release`] is called.
    pub fn save(&mut self) -> SavePoint<'_, 'a> {
        let state = self.state();
        SavePoint {
            stream: self,
            state,
            released: false,
        }
    }

    /// The tokens not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> &'a [CSSToken] {
        self.tokens.get(self.position..).unwrap_or_default()
    }

    /// Every token the stream was created over.
    #[must_use]
    pub const fn tokens(&self) -> &'a [CSSToken] {
        self.tokens
    }

    /// Find the end of the component value starting at `start`.
    ///
    /// For a block-start token this runs to just past the matching closer,
    /// or to the end of the slice when the block is unterminated. Closers
    /// that do not match the innermost open block are ordinary tokens.
    ///
    /// The flag is true when a block was closed by its matching token.
    fn component_value_end(&self, start: usize) -> (usize, bool) {
        let Some(first) = self.tokens.get(start) else {
            return (start, false);
        };
        let Some(closer) = first.closing_token() else {
            return (start + 1, false);
        };
        let mut expected = vec![closer];
        let mut index = start + 1;
        while let Some(token) = self.tokens.get(index) {
            index += 1;
            match token.block_type() {
                BlockType::BlockStart => {
                    if let Some(closer) = token.closing_token() {
                        expected.push(closer);
                    }
                }
                BlockType::BlockEnd if expected.last() == Some(token) => {
                    let _ = expected.pop();
                    if expected.is_empty() {
                        return (index, true);
                    }
                }
                _ => {}
            }
        }
        (index, false)
    }

    /// [§ 5.4.8 Consume a component value](https://www.w3.org/TR/css-syntax-3/#consume-component-value)
    ///
    /// Consume one preserved token or a whole block (opening and closing
    /// tokens included) and return its tokens.
    pub fn consume_component_value(&mut self) -> &'a [CSSToken] {
        let start = self.position;
        let (end, _) = self.component_value_end(start);
        self.position = end;
        &self.tokens[start..end]
    }

    /// Consume the block that starts at the next token and return a stream
    /// over its contents, excluding the opening and closing tokens.
    ///
    /// If the next token does not start a block, nothing is consumed and the
    /// returned stream is empty.
    pub fn consume_block(&mut self) -> TokenStream<'a> {
        if self.peek().block_type() != BlockType::BlockStart {
            return TokenStream::new(&[]);
        }
        let start = self.position;
        let (end, closed) = self.component_value_end(start);
        self.position = end;
        let inner_end = if closed { end - 1 } else { end };
        TokenStream::new(&self.tokens[start + 1..inner_end])
    }

    /// Consume component values until the next top-level token satisfies
    /// `stop` (which is left unconsumed) or the stream ends.
    pub fn consume_until_top_level(
        &mut self,
        mut stop: impl FnMut(&CSSToken) -> bool,
    ) -> &'a [CSSToken] {
        let start = self.position;
        while !self.at_end() && !stop(self.peek()) {
            let _ = self.consume_component_value();
        }
        &self.tokens[start..self.position]
    }
}

/// A speculative-parse guard over a [`TokenStream`].
///
/// Derefs to the stream it was created from. Dropping the guard rewinds the
/// stream to where it was when the guard was created.
pub struct SavePoint<'s, 'a> {
    stream: &'s mut TokenStream<'a>,
    state: StreamState,
    released: bool,
}

impl SavePoint<'_, '_> {
    /// Keep everything consumed since the save point was taken.
    pub fn release(mut self) {
        self.released = true;
    }
}

impl<'a> Deref for SavePoint<'_, 'a> {
    type Target = TokenStream<'a>;

    fn deref(&self) -> &Self::Target {
        self.stream
    }
}

impl DerefMut for SavePoint<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.stream
    }
}

impl Drop for SavePoint<'_, '_> {
    fn drop(&mut self) {
        if !self.released {
            self.stream.restore(self.state);
        }
    }
}
