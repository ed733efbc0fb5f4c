use super::token::{BlockType, CSSToken, HashType, NumericType};

/// [§ 4.3 Tokenizer Algorithms](https://www.w3.org/TR/css-syntax-3/#tokenizer-algorithms)
///
/// A lazy CSS tokenizer. Tokens can be pulled one at a time through the
/// [`Iterator`] implementation, or collected in one pass with [`run`](Self::run).
///
/// The tokenizer also tracks the nesting of blocks it has produced so callers
/// can tell how deep inside `(`, `[`, `{` or a function the last token was.
pub struct CSSTokenizer {
    /// Preprocessed input code points
    input: Vec<char>,
    /// Index of the next code point to consume
    position: usize,
    /// Tokens collected by `run`
    tokens: Vec<CSSToken>,
    /// Closing tokens expected for every currently open block
    block_stack: Vec<CSSToken>,
    /// Set once the EOF token has been produced
    finished: bool,
}

impl CSSTokenizer {
    /// Create a tokenizer over `input`.
    ///
    /// [§ 3.3 Preprocessing the input stream](https://www.w3.org/TR/css-syntax-3/#input-preprocessing)
    ///
    /// "Replace any U+000D CARRIAGE RETURN (CR) code points, U+000C FORM FEED
    /// (FF) code points, or pairs of U+000D CARRIAGE RETURN (CR) followed by
    /// U+000A LINE FEED (LF) in input by a single U+000A LINE FEED (LF) code
    /// point. Replace any U+0000 NULL or surrogate code points in input with
    /// U+FFFD REPLACEMENT CHARACTER."
    pub fn new(input: impl AsRef<str>) -> Self {
        let mut chars = Vec::new();
        let mut source = input.as_ref().chars().peekable();
        while let Some(c) = source.next() {
            match c {
                '\r' => {
                    if source.peek() == Some(&'\n') {
                        let _ = source.next();
                    }
                    chars.push('\n');
                }
                '\x0C' => chars.push('\n'),
                '\0' => chars.push('\u{FFFD}'),
                c => chars.push(c),
            }
        }
        Self {
            input: chars,
            position: 0,
            tokens: Vec::new(),
            block_stack: Vec::new(),
            finished: false,
        }
    }

    /// Tokenize the remaining input, storing every token up to and including EOF.
    pub fn run(&mut self) {
        let produced: Vec<CSSToken> = self.by_ref().collect();
        self.tokens.extend(produced);
    }

    /// Return the collected tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<CSSToken> {
        self.tokens
    }

    /// Return a reference to the collected tokens.
    #[must_use]
    pub fn tokens(&self) -> &[CSSToken] {
        &self.tokens
    }

    /// Number of blocks open after the most recently produced token.
    #[must_use]
    pub fn block_depth(&self) -> usize {
        self.block_stack.len()
    }

    /// Keep `block_stack` in step with the token just produced.
    ///
    /// A closing token only pops when it matches the innermost open block;
    /// stray closers leave the stack untouched.
    fn track_block(&mut self, token: &CSSToken) {
        match token.block_type() {
            BlockType::BlockStart => {
                if let Some(closer) = token.closing_token() {
                    self.block_stack.push(closer);
                }
            }
            BlockType::BlockEnd => {
                if self.block_stack.last() == Some(token) {
                    let _ = self.block_stack.pop();
                }
            }
            BlockType::NotBlock => {}
        }
    }

    /// [§ 4.3.1 Consume a token](https://www.w3.org/TR/css-syntax-3/#consume-token)
    ///
    /// "This section describes how to consume a token from a stream of code
    /// points. It will return a single token of any type."
    fn consume_token(&mut self) -> CSSToken {
        // "Consume comments."
        self.consume_comments();

        // "Consume the next input code point."
        let Some(c) = self.consume() else {
            return CSSToken::EOF;
        };

        match c {
            // "Consume as much whitespace as possible. Return a <whitespace-token>."
            c if is_whitespace(c) => {
                self.consume_whitespace();
                CSSToken::Whitespace
            }
            '"' | '\'' => self.consume_string_token(c),
            '#' => self.consume_hash_or_delim(),
            '(' => CSSToken::LeftParen,
            ')' => CSSToken::RightParen,
            ',' => CSSToken::Comma,
            ':' => CSSToken::Colon,
            ';' => CSSToken::Semicolon,
            '[' => CSSToken::LeftBracket,
            ']' => CSSToken::RightBracket,
            '{' => CSSToken::LeftBrace,
            '}' => CSSToken::RightBrace,
            // "If the input stream starts with a number, reconsume the current
            // input code point, consume a numeric token, and return it."
            '+' | '.' => {
                if self.starts_number_at(self.position - 1) {
                    self.reconsume();
                    self.consume_numeric_token()
                } else {
                    CSSToken::Delim(c)
                }
            }
            '-' => self.consume_after_hyphen(),
            '<' => {
                // "If the next 3 input code points are U+0021 U+002D U+002D (!--),
                // consume them and return a <CDO-token>."
                if self.lookahead_is("!--") {
                    self.position += 3;
                    CSSToken::CDO
                } else {
                    CSSToken::Delim('<')
                }
            }
            '@' => {
                // "If the next 3 input code points would start an ident sequence,
                // consume an ident sequence, create an <at-keyword-token> with its
                // value set to the returned value, and return it."
                if self.starts_ident_at(self.position) {
                    CSSToken::AtKeyword(self.consume_ident_sequence())
                } else {
                    CSSToken::Delim('@')
                }
            }
            '\\' => {
                if is_valid_escape(Some('\\'), self.peek()) {
                    self.reconsume();
                    self.consume_ident_like_token()
                } else {
                    // "This is a parse error."
                    CSSToken::Delim('\\')
                }
            }
            c if c.is_ascii_digit() => {
                self.reconsume();
                self.consume_numeric_token()
            }
            c if is_ident_start_code_point(c) => {
                self.reconsume();
                self.consume_ident_like_token()
            }
            // "anything else"
            c => CSSToken::Delim(c),
        }
    }

    /// The U+0023 NUMBER SIGN (#) branch of "consume a token".
    fn consume_hash_or_delim(&mut self) -> CSSToken {
        // "If the next input code point is an ident code point or the next two
        // input code points are a valid escape..."
        let next_is_name = self.peek().is_some_and(is_ident_code_point)
            || is_valid_escape(self.peek(), self.peek_at(1));
        if !next_is_name {
            return CSSToken::Delim('#');
        }
        // "If the next 3 input code points would start an ident sequence, set the
        // <hash-token>'s type flag to 'id'."
        let hash_type = if self.starts_ident_at(self.position) {
            HashType::Id
        } else {
            HashType::Unrestricted
        };
        CSSToken::Hash {
            value: self.consume_ident_sequence(),
            hash_type,
        }
    }

    /// The U+002D HYPHEN-MINUS (-) branch of "consume a token".
    fn consume_after_hyphen(&mut self) -> CSSToken {
        let start = self.position - 1;
        if self.starts_number_at(start) {
            self.reconsume();
            self.consume_numeric_token()
        } else if self.lookahead_is("->") {
            self.position += 2;
            CSSToken::CDC
        } else if self.starts_ident_at(start) {
            self.reconsume();
            self.consume_ident_like_token()
        } else {
            CSSToken::Delim('-')
        }
    }

    /// [§ 4.3.2 Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comment)
    fn consume_comments(&mut self) {
        while self.lookahead_is("/*") {
            self.position += 2;
            // Unterminated comments run to EOF.
            loop {
                match self.consume() {
                    Some('*') if self.peek() == Some('/') => {
                        self.position += 1;
                        break;
                    }
                    Some(_) => {}
                    None => return,
                }
            }
        }
    }

    fn consume_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            self.position += 1;
        }
    }

    /// [§ 4.3.4 Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    fn consume_string_token(&mut self, ending_code_point: char) -> CSSToken {
        let mut value = String::new();
        loop {
            match self.consume() {
                // "ending code point: Return the <string-token>."
                // "EOF: This is a parse error. Return the <string-token>."
                None => return CSSToken::String(value),
                Some(c) if c == ending_code_point => return CSSToken::String(value),
                // "newline: This is a parse error. Reconsume the current input
                // code point, create a <bad-string-token>, and return it."
                Some('\n') => {
                    self.reconsume();
                    return CSSToken::BadString;
                }
                Some('\\') => match self.peek() {
                    None => {}
                    // An escaped newline is a line continuation.
                    Some('\n') => self.position += 1,
                    Some(_) => value.push(self.consume_escaped_code_point()),
                },
                Some(c) => value.push(c),
            }
        }
    }

    /// [§ 4.3.3 Consume a numeric token](https://www.w3.org/TR/css-syntax-3/#consume-numeric-token)
    fn consume_numeric_token(&mut self) -> CSSToken {
        let (value, int_value, numeric_type) = self.consume_number();

        if self.starts_ident_at(self.position) {
            // "Create a <dimension-token> with the same value and type flag as
            // number... Consume an ident sequence. Set the <dimension-token>'s
            // unit to the returned value."
            CSSToken::Dimension {
                value,
                int_value,
                numeric_type,
                unit: self.consume_ident_sequence(),
            }
        } else if self.peek() == Some('%') {
            self.position += 1;
            CSSToken::Percentage {
                value,
                int_value,
                numeric_type,
            }
        } else {
            CSSToken::Number {
                value,
                int_value,
                numeric_type,
            }
        }
    }

    /// [§ 4.3.4 Consume an ident-like token](https://www.w3.org/TR/css-syntax-3/#consume-ident-like-token)
    fn consume_ident_like_token(&mut self) -> CSSToken {
        let string = self.consume_ident_sequence();

        if self.peek() != Some('(') {
            return CSSToken::Ident(string);
        }
        self.position += 1;

        if !string.eq_ignore_ascii_case("url") {
            return CSSToken::Function(string);
        }

        // "While the next two input code points are whitespace, consume the
        // next input code point."
        while self.peek().is_some_and(is_whitespace) && self.peek_at(1).is_some_and(is_whitespace)
        {
            self.position += 1;
        }

        // "If the next one or two input code points are U+0022 QUOTATION MARK
        // ("), U+0027 APOSTROPHE ('), or whitespace followed by U+0022 QUOTATION
        // MARK (") or U+0027 APOSTROPHE ('), then create a <function-token>..."
        let quote_follows = |c: Option<char>| matches!(c, Some('"' | '\''));
        if quote_follows(self.peek())
            || (self.peek().is_some_and(is_whitespace) && quote_follows(self.peek_at(1)))
        {
            CSSToken::Function(string)
        } else {
            self.consume_url_token()
        }
    }

    /// [§ 4.3.6 Consume a url token](https://www.w3.org/TR/css-syntax-3/#consume-url-token)
    fn consume_url_token(&mut self) -> CSSToken {
        let mut value = String::new();
        self.consume_whitespace();

        loop {
            match self.consume() {
                Some(')') | None => return CSSToken::Url(value),
                Some(c) if is_whitespace(c) => {
                    self.consume_whitespace();
                    if matches!(self.peek(), Some(')') | None) {
                        let _ = self.consume();
                        return CSSToken::Url(value);
                    }
                    self.consume_bad_url_remnants();
                    return CSSToken::BadUrl;
                }
                Some(c) if matches!(c, '"' | '\'' | '(') || is_non_printable(c) => {
                    // "This is a parse error."
                    self.consume_bad_url_remnants();
                    return CSSToken::BadUrl;
                }
                Some('\\') => {
                    if is_valid_escape(Some('\\'), self.peek()) {
                        value.push(self.consume_escaped_code_point());
                    } else {
                        self.consume_bad_url_remnants();
                        return CSSToken::BadUrl;
                    }
                }
                Some(c) => value.push(c),
            }
        }
    }

    /// [§ 4.3.14 Consume the remnants of a bad url](https://www.w3.org/TR/css-syntax-3/#consume-remnants-of-bad-url)
    fn consume_bad_url_remnants(&mut self) {
        loop {
            match self.consume() {
                Some(')') | None => return,
                Some('\\') if is_valid_escape(Some('\\'), self.peek()) => {
                    let _ = self.consume_escaped_code_point();
                }
                Some(_) => {}
            }
        }
    }

    /// [§ 4.3.11 Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    fn consume_ident_sequence(&mut self) -> String {
        let mut result = String::new();
        while let Some(c) = self.peek() {
            if is_ident_code_point(c) {
                result.push(c);
                self.position += 1;
            } else if is_valid_escape(Some(c), self.peek_at(1)) {
                self.position += 1;
                result.push(self.consume_escaped_code_point());
            } else {
                break;
            }
        }
        result
    }

    /// Append consecutive ASCII digits to `repr`.
    fn take_digits(&mut self, repr: &mut String) {
        while let Some(c) = self.peek().filter(char::is_ascii_digit) {
            repr.push(c);
            self.position += 1;
        }
    }

    /// [§ 4.3.12 Consume a number](https://www.w3.org/TR/css-syntax-3/#consume-number)
    ///
    /// Returns the value, the exact integer value for integer-typed numbers,
    /// and the type flag.
    fn consume_number(&mut self) -> (f64, Option<i64>, NumericType) {
        // "Initially set type to 'integer'. Let repr be the empty string."
        let mut numeric_type = NumericType::Integer;
        let mut repr = String::new();

        if let Some(sign @ ('+' | '-')) = self.peek() {
            // A leading plus is valid CSS but not valid for Rust's parsers.
            if sign == '-' {
                repr.push(sign);
            }
            self.position += 1;
        }
        self.take_digits(&mut repr);

        // "If the next 2 input code points are U+002E FULL STOP (.) followed by
        // a digit, then consume them, append them to repr, set type to 'number'."
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            repr.push('.');
            self.position += 1;
            self.take_digits(&mut repr);
            numeric_type = NumericType::Number;
        }

        // "If the next 2 or 3 input code points are U+0045 LATIN CAPITAL LETTER E
        // (E) or U+0065 LATIN SMALL LETTER E (e), optionally followed by U+002D
        // HYPHEN-MINUS (-) or U+002B PLUS SIGN (+), followed by a digit..."
        if matches!(self.peek(), Some('e' | 'E')) {
            let signed = matches!(self.peek_at(1), Some('+' | '-'));
            let digit_offset = if signed { 2 } else { 1 };
            if self.peek_at(digit_offset).is_some_and(|c| c.is_ascii_digit()) {
                repr.push('e');
                if signed && self.peek_at(1) == Some('-') {
                    repr.push('-');
                }
                self.position += digit_offset;
                self.take_digits(&mut repr);
                numeric_type = NumericType::Number;
            }
        }

        let value: f64 = repr.parse().unwrap_or(0.0);
        let int_value = match numeric_type {
            NumericType::Integer => repr.parse::<i64>().ok(),
            NumericType::Number => None,
        };
        (value, int_value, numeric_type)
    }

    /// [§ 4.3.7 Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-escaped-code-point)
    ///
    /// Assumes the U+005C REVERSE SOLIDUS has already been consumed.
    fn consume_escaped_code_point(&mut self) -> char {
        let Some(first) = self.consume() else {
            // "EOF: This is a parse error. Return U+FFFD REPLACEMENT CHARACTER."
            return '\u{FFFD}';
        };
        if !first.is_ascii_hexdigit() {
            return first;
        }

        // "Consume as many hex digits as possible, but no more than 5."
        let mut code_point = first.to_digit(16).unwrap_or(0);
        for _ in 0..5 {
            let Some(digit) = self.peek().and_then(|c| c.to_digit(16)) else {
                break;
            };
            code_point = code_point * 16 + digit;
            self.position += 1;
        }
        // "If the next input code point is whitespace, consume it as well."
        if self.peek().is_some_and(is_whitespace) {
            self.position += 1;
        }
        // "If this number is zero, or is for a surrogate, or is greater than the
        // maximum allowed code point, return U+FFFD REPLACEMENT CHARACTER."
        if code_point == 0 {
            return '\u{FFFD}';
        }
        char::from_u32(code_point).unwrap_or('\u{FFFD}')
    }

    /// [§ 4.3.9 Check if three code points would start an ident sequence](https://www.w3.org/TR/css-syntax-3/#would-start-an-identifier)
    ///
    /// Looks at the code points starting at `index`.
    fn starts_ident_at(&self, index: usize) -> bool {
        let at = |offset: usize| self.input.get(index + offset).copied();
        match at(0) {
            Some('-') => {
                at(1).is_some_and(|c| is_ident_start_code_point(c) || c == '-')
                    || is_valid_escape(at(1), at(2))
            }
            Some('\\') => is_valid_escape(Some('\\'), at(1)),
            Some(c) => is_ident_start_code_point(c),
            None => false,
        }
    }

    /// [§ 4.3.10 Check if three code points would start a number](https://www.w3.org/TR/css-syntax-3/#starts-with-a-number)
    ///
    /// Looks at the code points starting at `index`.
    fn starts_number_at(&self, index: usize) -> bool {
        let digit_at = |offset: usize| {
            self.input
                .get(index + offset)
                .is_some_and(char::is_ascii_digit)
        };
        match self.input.get(index) {
            Some('+' | '-') => {
                digit_at(1) || (self.input.get(index + 1) == Some(&'.') && digit_at(2))
            }
            Some('.') => digit_at(1),
            Some(c) => c.is_ascii_digit(),
            None => false,
        }
    }

    /// True if the upcoming code points spell `text`.
    fn lookahead_is(&self, text: &str) -> bool {
        text.chars()
            .enumerate()
            .all(|(offset, c)| self.peek_at(offset) == Some(c))
    }

    fn consume(&mut self) -> Option<char> {
        let c = self.input.get(self.position).copied()?;
        self.position += 1;
        Some(c)
    }

    fn reconsume(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }
}

impl Iterator for CSSTokenizer {
    type Item = CSSToken;

    /// Produce the next token. The final item is always [`CSSToken::EOF`];
    /// after it the iterator is exhausted.
    fn next(&mut self) -> Option<CSSToken> {
        if self.finished {
            return None;
        }
        let token = self.consume_token();
        self.finished = token.is_eof();
        self.track_block(&token);
        Some(token)
    }
}

/// Tokenize `input` in one pass, including the trailing EOF token.
#[must_use]
pub fn tokenize(input: &str) -> Vec<CSSToken> {
    CSSTokenizer::new(input).collect()
}

/// [§ 4.3.8 Check if two code points are a valid escape](https://www.w3.org/TR/css-syntax-3/#starts-with-a-valid-escape)
fn is_valid_escape(first: Option<char>, second: Option<char>) -> bool {
    first == Some('\\') && second != Some('\n')
}

/// [§ 4.2 Definitions - whitespace](https://www.w3.org/TR/css-syntax-3/#whitespace)
///
/// "A newline, U+0009 CHARACTER TABULATION, or U+0020 SPACE."
fn is_whitespace(c: char) -> bool {
    matches!(c, '\n' | '\t' | ' ')
}

/// [§ 4.2 Definitions - ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
fn is_ident_start_code_point(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// [§ 4.2 Definitions - ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
fn is_ident_code_point(c: char) -> bool {
    is_ident_start_code_point(c) || c.is_ascii_digit() || c == '-'
}

/// [§ 4.2 Definitions - non-printable code point](https://www.w3.org/TR/css-syntax-3/#non-printable-code-point)
fn is_non_printable(c: char) -> bool {
    matches!(c, '\0'..='\u{8}' | '\u{b}' | '\u{e}'..='\u{1f}' | '\u{7f}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_depth_follows_matching_closers() {
        let mut tokenizer = CSSTokenizer::new("a(b[c");
        let _ = tokenizer.next();
        let _ = tokenizer.next();
        assert_eq!(tokenizer.block_depth(), 1);
        let _ = tokenizer.next();
        let _ = tokenizer.next();
        assert_eq!(tokenizer.block_depth(), 2);
    }

    #[test]
    fn stray_closer_does_not_pop() {
        let mut tokenizer = CSSTokenizer::new("(]");
        let _ = tokenizer.next();
        let _ = tokenizer.next();
        assert_eq!(tokenizer.block_depth(), 1);
    }

    #[test]
    fn crlf_is_normalized() {
        let tokens = tokenize("a\r\nb");
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[1], CSSToken::Whitespace);
    }
}
