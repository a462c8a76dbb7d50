//! Provides low-level, token-based access to the unquoting scanner.
//!
//! The [`UnquoteTokens`] iterator walks a literal and yields [`UnquotedToken`]s:
//! borrowed runs of literal text and decoded [`Escape`] descriptors. Nothing is
//! copied or allocated until the caller stores a token, so consumers can
//! inspect escapes, rewrite them, or stream the output somewhere other than a
//! `Vec`.
//!
//! The scanner is shared by every character width. The root-level functions
//! such as [`unquote8`](crate::unquote8) are thin collectors over it.
//!
//! # Example
//!
//! ```
//! use c_unquote::token::{Escape, UnquotedToken, unquote};
//!
//! let mut tokens = unquote(br#"  "tab:\t" "end""#);
//!
//! assert_eq!(tokens.next(), Some(Ok(UnquotedToken::Literal(&b"tab:"[..]))));
//! assert_eq!(tokens.next(), Some(Ok(UnquotedToken::Escape(Escape::Control(b'\t')))));
//! // Adjacent literals continue the same text.
//! assert_eq!(tokens.next(), Some(Ok(UnquotedToken::Literal(&b"end"[..]))));
//! assert_eq!(tokens.next(), None);
//! ```

use alloc::vec::Vec;
use core::{fmt, iter::FusedIterator};

use crate::{Capabilities, UnquoteError, transcode::Transcoder, unit::CodeUnit};

/// Creates a token iterator over `input` with the compiled-in
/// [`Capabilities`].
///
/// Scanning stops at the first NUL unit, if any.
#[inline]
pub fn unquote<C: CodeUnit>(input: &[C]) -> UnquoteTokens<'_, C> {
    UnquoteTokens::new(input, Capabilities::supported())
}

/// A piece of decoded literal text.
///
/// This enum is the item yielded by the [`UnquoteTokens`] iterator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnquotedToken<'a, C> {
    /// A run of the input between quotes that contains no `"` or `\`.
    Literal(&'a [C]),
    /// A decoded escape sequence.
    Escape(Escape<C>),
}

impl<C: CodeUnit> UnquotedToken<'_, C> {
    /// Appends the decoded units to `out`.
    #[inline]
    pub fn store<X: Transcoder + ?Sized>(self, out: &mut Vec<C>, transcoder: Option<&mut X>) {
        match self {
            UnquotedToken::Literal(run) => out.extend_from_slice(run),
            UnquotedToken::Escape(escape) => escape.store(out, transcoder),
        }
    }
}

/// One decoded escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape<C> {
    /// `\a`, `\b`, `\f`, `\n`, `\r`, `\t` or `\v`, holding the control byte.
    Control(u8),
    /// `\N`, `\NN` or `\NNN`.
    Octal(u32),
    /// `\x`, `\xH` or `\xHH`.
    Hex(u32),
    /// `\u` followed by up to four hex digits.
    Unicode(u16),
    /// `\U` followed by up to eight hex digits.
    UnicodeLong(u32),
    /// A backslash before any other unit: the unit itself. Covers `\\` and `\"`.
    Verbatim(C),
    /// `""` inside a literal, which stands for one `"`.
    DoubledQuote,
}

impl<C: CodeUnit> Escape<C> {
    /// Appends the decoded unit(s) to `out`.
    ///
    /// Octal and hex values are truncated to the width of `C`. Unicode values
    /// are stored by [`CodeUnit::push_unicode`], which may need `transcoder`
    /// for narrow output.
    pub fn store<X: Transcoder + ?Sized>(self, out: &mut Vec<C>, transcoder: Option<&mut X>) {
        match self {
            Escape::Control(byte) => out.push(C::from_ascii(byte)),
            Escape::Octal(value) | Escape::Hex(value) => out.push(C::truncate(value)),
            Escape::Unicode(unit) => C::push_unicode(out, unit as u32, transcoder),
            Escape::UnicodeLong(code_point) => C::push_unicode(out, code_point, transcoder),
            Escape::Verbatim(unit) => out.push(unit),
            Escape::DoubledQuote => out.push(C::QUOTE),
        }
    }
}

/// An iterator over a sequence of quoted literals that yields
/// [`UnquotedToken`]s.
///
/// Whitespace between literals is skipped and adjacent literals are joined.
/// Any other unit outside quotes makes the input invalid: the iterator yields
/// one [`UnquoteError`] and then stops. An unterminated literal simply ends
/// with the input.
#[derive(Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct UnquoteTokens<'a, C> {
    input: &'a [C],
    pos: usize,
    in_quote: bool,
    capabilities: Capabilities,
}

impl<'a, C: CodeUnit> UnquoteTokens<'a, C> {
    /// Creates a scanner over the part of `input` before its first NUL.
    #[inline]
    pub fn new(input: &'a [C], capabilities: Capabilities) -> Self {
        Self {
            input: C::terminated(input),
            pos: 0,
            in_quote: false,
            capabilities,
        }
    }

    /// The input that has not been scanned yet.
    #[inline]
    pub fn remnant(&self) -> &'a [C] {
        &self.input[self.pos..]
    }

    /// Number of units consumed so far.
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Whether the cursor is inside a quoted literal.
    #[inline]
    pub fn is_in_quote(&self) -> bool {
        self.in_quote
    }

    /// The escapes this scanner recognizes.
    #[inline]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Decodes the escape selected by `selector`, with `after` the units that
    /// follow it. Returns the escape and how many units of `after` it used.
    fn decode_escape(&self, selector: C, after: &[C]) -> (Escape<C>, usize) {
        let Some(letter) = selector.to_ascii() else {
            return (Escape::Verbatim(selector), 0);
        };

        match letter {
            b'a' => (Escape::Control(0x07), 0),
            b'b' => (Escape::Control(0x08), 0),
            b'f' => (Escape::Control(0x0C), 0),
            b'n' => (Escape::Control(b'\n'), 0),
            b'r' => (Escape::Control(b'\r'), 0),
            b't' => (Escape::Control(b'\t'), 0),
            b'v' => (Escape::Control(0x0B), 0),
            b'0'..=b'7' => {
                // The selector is the first of up to three digits.
                let (low, len) = parse_digits(after, 2, 8);
                let high = (letter - b'0') as u32;
                (Escape::Octal((high << (3 * len)) | low), len)
            }
            b'x' => {
                let (value, len) = parse_digits(after, 2, 16);
                (Escape::Hex(value), len)
            }
            b'u' if self.capabilities.unicode() => {
                let (value, len) = parse_digits(after, 4, 16);
                (Escape::Unicode(value as u16), len)
            }
            b'U' if self.capabilities.extended_unicode() => {
                let (value, len) = parse_digits(after, 8, 16);
                (Escape::UnicodeLong(value), len)
            }
            _ => (Escape::Verbatim(selector), 0),
        }
    }
}

/// Reads up to `max` leading digits of `radix`. Returns their value and count.
///
/// No digits is not an error: the value is then 0.
#[inline]
fn parse_digits<C: CodeUnit>(units: &[C], max: usize, radix: u32) -> (u32, usize) {
    let mut value = 0u32;
    let mut len = 0;
    for &unit in units.iter().take(max) {
        let Some(digit) = unit.to_ascii().and_then(|b| char::from(b).to_digit(radix)) else {
            break;
        };
        // At most 8 hex digits, so this never overflows.
        value = value * radix + digit;
        len += 1;
    }
    (value, len)
}

impl<'a, C: CodeUnit> Iterator for UnquoteTokens<'a, C> {
    type Item = Result<UnquotedToken<'a, C>, UnquoteError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let rest = self.remnant();
            let (&first, tail) = rest.split_first()?;

            if !self.in_quote {
                if first.is_space() {
                    self.pos += 1;
                } else if first == C::QUOTE {
                    self.in_quote = true;
                    self.pos += 1;
                } else {
                    let err = UnquoteError::unexpected_character(first.to_u32(), self.pos);
                    // Fuse.
                    self.pos = self.input.len();
                    return Some(Err(err));
                }
                continue;
            }

            if first == C::QUOTE {
                if tail.first() == Some(&C::QUOTE) {
                    self.pos += 2;
                    return Some(Ok(UnquotedToken::Escape(Escape::DoubledQuote)));
                }
                self.in_quote = false;
                self.pos += 1;
                continue;
            }

            if first == C::BACKSLASH {
                let Some((&selector, after)) = tail.split_first() else {
                    // Nothing left to escape.
                    self.pos = self.input.len();
                    return None;
                };
                let (escape, len) = self.decode_escape(selector, after);
                self.pos += 2 + len;
                return Some(Ok(UnquotedToken::Escape(escape)));
            }

            let len = C::find_special(rest).unwrap_or(rest.len());
            self.pos += len;
            return Some(Ok(UnquotedToken::Literal(&rest[..len])));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Every token consumes at least one unit.
        (0, Some(self.input.len() - self.pos))
    }
}

impl<C: CodeUnit> FusedIterator for UnquoteTokens<'_, C> {}

impl<C> fmt::Debug for UnquoteTokens<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnquoteTokens")
            .field("pos", &self.pos)
            .field("in_quote", &self.in_quote)
            .finish_non_exhaustive()
    }
}
