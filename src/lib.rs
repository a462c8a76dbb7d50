//! # C String Literal Unquoting
//!
//! A small, `no_std` library that turns C/C++ string literal source text back
//! into the text it denotes. It reads one or more quoted literals separated by
//! whitespace, joins them the way a C compiler joins adjacent literals, and
//! decodes every escape sequence along the way.
//!
//! The same scanner works on narrow (`u8`), UTF-16 (`u16`) and UTF-32 (`u32`)
//! text. Output has the width of the input.
//!
//! ## Key Features
//! - **Adjacent literal concatenation**: `"A" "BC"` decodes to `ABC`.
//! - **All C escapes**: `\a \b \f \n \r \t \v`, `\\`, `\"`, octal `\NNN`, hex `\xHH`,
//!   Unicode `\uXXXX` and `\UXXXXXXXX`.
//! - **Lenient decoding**: unknown escapes keep the escaped character, short
//!   octal/hex/Unicode escapes use the digits present, and an unterminated
//!   literal decodes up to the end of input.
//! - **Width-aware Unicode storage**: `\U0001F600` becomes a surrogate pair in
//!   UTF-16 and a multi-byte sequence in narrow output. The bytes used for
//!   narrow output come from a pluggable [`Transcoder`]; UTF-8 by default, legacy
//!   code pages with the `encoding` feature.
//! - **Zero-copy tokens**: the [`token`] module exposes the scanner as an
//!   iterator of borrowed literal runs and decoded escapes.
//!
//! ## Quick Start
//!
//! ```
//! use c_unquote::{try_unquote, unquote8};
//!
//! // Adjacent literals are joined and escapes decoded.
//! assert_eq!(unquote8(br#"  "Hello,\n" "world\x21"  "#), b"Hello,\nworld!");
//!
//! // Text outside quotes makes the whole input invalid, which decodes to
//! // nothing...
//! assert_eq!(unquote8(b"X"), b"");
//! // ...unless you ask for the error.
//! assert!(try_unquote(b"X").is_err());
//! ```
//!
//! ## Wide Text
//!
//! ```
//! use c_unquote::unquote16;
//!
//! let input: Vec<u16> = r#""\u3042\U0001F600""#.encode_utf16().collect();
//! let want: Vec<u16> = "あ😀".encode_utf16().collect();
//!
//! assert_eq!(unquote16(&input), want);
//! ```
//!
//! ## Cargo Features
//! - `unicode` (default): `\u` escapes.
//! - `extended-unicode` (default): `\U` escapes.
//! - `encoding`: [`transcode::CodePage`], narrow output in any `encoding_rs` encoding.
//! - `tracing`: trace-level events for rejected input and unmappable code points.
#![no_std]
#![deny(missing_docs)]

extern crate alloc;

#[cfg(test)]
extern crate std;

use alloc::{borrow::Cow, string::String, vec::Vec};
use core::{fmt, str};

// Expands to nothing unless the `tracing` feature is enabled.
macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!($($arg)*);
    };
}
#[allow(unused_imports)]
pub(crate) use trace;

pub mod token;
pub mod transcode;
pub mod unit;

use token::{UnquoteTokens, UnquotedToken};
pub use transcode::{Transcoder, Utf8};
pub use unit::{CodeUnit, WideChar};

// =============================================================================
// Capabilities
// =============================================================================

/// Which Unicode escapes the scanner recognizes.
///
/// A disabled escape is not an error: `\u` and `\U` then behave like any
/// other unknown escape and decode to the letter itself.
///
/// Flags can only be enabled if the matching Cargo feature is compiled in.
/// `\U` is never offered without `\u`.
///
/// # Example
///
/// ```
/// use c_unquote::{Capabilities, Unquoter};
///
/// let mut legacy = Unquoter::new().with_capabilities(Capabilities::LEGACY);
/// assert_eq!(legacy.unquote(br#""A\U00000042""#), b"AU00000042");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capabilities {
    unicode: bool,
    extended_unicode: bool,
}

impl Capabilities {
    /// No Unicode escapes.
    pub const NONE: Self = Self {
        unicode: false,
        extended_unicode: false,
    };

    /// `\u` only, as on platforms whose wide character is 16 bits.
    pub const LEGACY: Self = Self::NONE.with_unicode(true);

    /// Everything the enabled Cargo features provide.
    #[inline]
    pub const fn supported() -> Self {
        Self {
            unicode: cfg!(feature = "unicode"),
            extended_unicode: cfg!(feature = "extended-unicode"),
        }
    }

    /// Whether `\uXXXX` is decoded.
    #[inline]
    pub const fn unicode(self) -> bool {
        self.unicode
    }

    /// Whether `\UXXXXXXXX` is decoded.
    #[inline]
    pub const fn extended_unicode(self) -> bool {
        self.extended_unicode
    }

    /// Enables or disables `\u`. Disabling it also disables `\U`.
    #[inline]
    pub const fn with_unicode(self, enabled: bool) -> Self {
        let unicode = enabled && cfg!(feature = "unicode");
        Self {
            unicode,
            extended_unicode: self.extended_unicode && unicode,
        }
    }

    /// Enables or disables `\U`. Enabling it also enables `\u`.
    #[inline]
    pub const fn with_extended_unicode(self, enabled: bool) -> Self {
        let extended_unicode = enabled && cfg!(feature = "extended-unicode");
        Self {
            unicode: self.unicode || extended_unicode,
            extended_unicode,
        }
    }
}

impl Default for Capabilities {
    #[inline]
    fn default() -> Self {
        Self::supported()
    }
}

// =============================================================================
// Unquoter
// =============================================================================

/// A configured decoder.
///
/// Holds the [`Capabilities`] and the optional [`Transcoder`] used to store
/// Unicode escapes in narrow output. The free functions such as [`unquote8`]
/// build a fresh `Unquoter::new()` for every call; keep an `Unquoter` around
/// when you need a different configuration.
///
/// Without a transcoder, Unicode escapes are not offered for narrow output at
/// all (they decode like unknown escapes). Wide output never needs one.
///
/// # Example
///
/// ```
/// use c_unquote::Unquoter;
///
/// let mut utf8 = Unquoter::new();
/// assert_eq!(utf8.unquote(br#""\u00E9""#), "é".as_bytes());
///
/// let mut bare = Unquoter::without_transcoder();
/// assert_eq!(bare.unquote(br#""\u00E9""#), b"u00E9");
/// // Wide output is unaffected.
/// assert_eq!(bare.unquote(&[0x22u16, 0x5C, 0x75, 0x45, 0x39, 0x22]), [0xE9u16]);
/// ```
#[derive(Debug, Clone)]
pub struct Unquoter<X = Utf8> {
    transcoder: Option<X>,
    capabilities: Capabilities,
}

impl Unquoter {
    /// An unquoter with UTF-8 narrow output and all supported escapes.
    #[inline]
    pub fn new() -> Self {
        Self::with_transcoder(Utf8)
    }

    /// An unquoter without any transcoder.
    #[inline]
    pub fn without_transcoder() -> Self {
        Self {
            transcoder: None,
            capabilities: Capabilities::supported(),
        }
    }
}

impl Default for Unquoter {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<X: Transcoder> Unquoter<X> {
    /// An unquoter that stores narrow Unicode escapes with `transcoder`.
    #[inline]
    pub fn with_transcoder(transcoder: X) -> Self {
        Self {
            transcoder: Some(transcoder),
            capabilities: Capabilities::supported(),
        }
    }

    /// Replaces the capabilities.
    #[inline]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// The transcoder, if any.
    #[inline]
    pub fn transcoder(&self) -> Option<&X> {
        self.transcoder.as_ref()
    }

    /// The escapes that will be decoded for output of width `C`.
    ///
    /// ```
    /// use c_unquote::{Capabilities, Unquoter};
    ///
    /// let bare = Unquoter::without_transcoder();
    /// assert_eq!(bare.capabilities_for::<u8>(), Capabilities::NONE);
    /// assert_eq!(bare.capabilities_for::<u32>(), Capabilities::supported());
    /// ```
    pub fn capabilities_for<C: CodeUnit>(&self) -> Capabilities {
        if C::BITS == 8 && self.transcoder.is_none() {
            Capabilities::NONE
        } else {
            self.capabilities
        }
    }

    /// A token scanner over `input` with this unquoter's capabilities.
    #[inline]
    pub fn tokens<'a, C: CodeUnit>(&self, input: &'a [C]) -> UnquoteTokens<'a, C> {
        UnquoteTokens::new(input, self.capabilities_for::<C>())
    }

    /// Decodes `input`, reporting text outside quotes as an error.
    ///
    /// An empty literal and whitespace-only input both succeed with an empty
    /// result.
    ///
    /// ```
    /// use c_unquote::Unquoter;
    ///
    /// let mut unquoter = Unquoter::new();
    /// assert_eq!(unquoter.try_unquote(br#""""#), Ok(vec![]));
    ///
    /// let err = unquoter.try_unquote(br#""ok" x"#).unwrap_err();
    /// assert_eq!(err.offset(), 5);
    /// ```
    pub fn try_unquote<C: CodeUnit>(&mut self, input: &[C]) -> Result<Vec<C>, UnquoteError> {
        self.reset();

        let mut out = Vec::with_capacity(input.len());
        for token in self.tokens(input) {
            self.store(rejected(token)?, &mut out);
        }
        Ok(out)
    }

    /// Decodes `input`. Invalid input decodes to an empty result.
    #[inline]
    pub fn unquote<C: CodeUnit>(&mut self, input: &[C]) -> Vec<C> {
        self.try_unquote(input).unwrap_or_default()
    }

    /// Decodes `input`, borrowing from it when possible.
    ///
    /// Returns `Cow::Borrowed` if the input holds a single literal run without
    /// escapes (surrounding whitespace and quotes aside), and `Cow::Owned`
    /// otherwise.
    ///
    /// ```
    /// use c_unquote::Unquoter;
    /// use std::borrow::Cow;
    ///
    /// let mut unquoter = Unquoter::new();
    ///
    /// let plain = unquoter.try_unquote_cow(br#"  "plain text"  "#).unwrap();
    /// assert!(matches!(plain, Cow::Borrowed(b"plain text")));
    ///
    /// let joined = unquoter.try_unquote_cow(br#""plain" " text""#).unwrap();
    /// assert!(matches!(joined, Cow::Owned(_)));
    /// assert_eq!(joined, &b"plain text"[..]);
    /// ```
    pub fn try_unquote_cow<'a, C: CodeUnit>(
        &mut self,
        input: &'a [C],
    ) -> Result<Cow<'a, [C]>, UnquoteError> {
        self.reset();

        let mut tokens = self.tokens(input);
        let first = match tokens.next() {
            None => return Ok(Cow::Borrowed(&input[..0])),
            Some(token) => rejected(token)?,
        };
        let second = match tokens.next() {
            None => match first {
                UnquotedToken::Literal(run) => return Ok(Cow::Borrowed(run)),
                UnquotedToken::Escape(_) => None,
            },
            Some(token) => Some(rejected(token)?),
        };

        let mut out = Vec::with_capacity(input.len());
        self.store(first, &mut out);
        if let Some(second) = second {
            self.store(second, &mut out);
        }
        for token in tokens {
            self.store(rejected(token)?, &mut out);
        }
        Ok(Cow::Owned(out))
    }

    #[inline]
    fn reset(&mut self) {
        if let Some(transcoder) = self.transcoder.as_mut() {
            transcoder.reset();
        }
    }

    #[inline]
    fn store<C: CodeUnit>(&mut self, token: UnquotedToken<'_, C>, out: &mut Vec<C>) {
        token.store(out, self.transcoder.as_mut());
    }
}

#[inline]
fn rejected<T>(token: Result<T, UnquoteError>) -> Result<T, UnquoteError> {
    token.inspect_err(|_err| {
        trace!(offset = _err.offset, "rejected input: {}", _err);
    })
}

// =============================================================================
// Entry Points
// =============================================================================

/// Decodes literals of any width. Invalid input decodes to an empty result.
///
/// ```
/// assert_eq!(c_unquote::unquote(br#""A" "BC""#), b"ABC");
/// assert_eq!(c_unquote::unquote(&['"' as u32, 'A' as u32]), ['A' as u32]);
/// ```
#[inline]
pub fn unquote<C: CodeUnit>(input: &[C]) -> Vec<C> {
    Unquoter::new().unquote(input)
}

/// Decodes literals of any width, reporting invalid input as an error.
#[inline]
pub fn try_unquote<C: CodeUnit>(input: &[C]) -> Result<Vec<C>, UnquoteError> {
    Unquoter::new().try_unquote(input)
}

/// Decodes narrow literals. Unicode escapes are stored as UTF-8.
#[inline]
pub fn unquote8(input: &[u8]) -> Vec<u8> {
    unquote(input)
}

/// Decodes literals in the platform's wide character.
#[inline]
pub fn unquote_wide(input: &[WideChar]) -> Vec<WideChar> {
    unquote(input)
}

/// Decodes UTF-16 literals.
#[inline]
pub fn unquote16(input: &[u16]) -> Vec<u16> {
    unquote(input)
}

/// Decodes UTF-32 literals.
#[inline]
pub fn unquote32(input: &[u32]) -> Vec<u32> {
    unquote(input)
}

/// Decodes literal source held in a `str` into a `String`.
///
/// Fails if the input is invalid, or if the decoded bytes are not UTF-8
/// (octal and hex escapes can produce any byte).
///
/// ```
/// use c_unquote::{DecodeUtf8Error, unquote_str};
///
/// assert_eq!(unquote_str(r#""caf\u00E9 ""au lait""#).unwrap(), "café \"au lait");
/// assert!(matches!(unquote_str(r#""\377""#), Err(DecodeUtf8Error::Utf8(_))));
/// ```
pub fn unquote_str(input: &str) -> Result<String, DecodeUtf8Error> {
    let bytes = try_unquote(input.as_bytes()).map_err(DecodeUtf8Error::Unquote)?;
    String::from_utf8(bytes).map_err(|e| DecodeUtf8Error::Utf8(e.utf8_error()))
}

/// Like [`unquote_str`], but replaces invalid UTF-8 with U+FFFD.
pub fn unquote_str_lossy(input: &str) -> Result<String, UnquoteError> {
    try_unquote(input.as_bytes()).map(into_string_lossy)
}

// Keeps the allocation when the bytes are already valid UTF-8.
fn into_string_lossy(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(string) => string,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Details of a character found outside quotes.
#[derive(Copy, Eq, PartialEq, Clone, Debug)]
#[non_exhaustive]
pub struct UnexpectedCharacterError {
    /// The offending unit's value.
    pub found: u32,
}

/// The specific kind of unquoting error.
#[derive(Copy, Eq, PartialEq, Clone, Debug)]
#[non_exhaustive]
pub enum UnquoteErrorKind {
    /// A unit other than whitespace or `"` appeared outside a literal.
    UnexpectedCharacter(UnexpectedCharacterError),
}

/// The input is not a sequence of quoted literals.
///
/// Everything inside a literal is decoded leniently, so this only arises
/// from text before, between or after the literals.
#[derive(Copy, Eq, PartialEq, Clone, Debug)]
pub struct UnquoteError {
    pub(crate) kind: UnquoteErrorKind,
    pub(crate) offset: usize,
}

impl UnquoteError {
    #[inline]
    pub(crate) fn unexpected_character(found: u32, offset: usize) -> Self {
        Self {
            kind: UnquoteErrorKind::UnexpectedCharacter(UnexpectedCharacterError { found }),
            offset,
        }
    }

    /// Returns the specific kind of error that occurred.
    ///
    /// ```
    /// # use c_unquote::{try_unquote, UnquoteErrorKind};
    /// let err = try_unquote(br#""A" ;"#).unwrap_err();
    /// match err.kind() {
    ///     UnquoteErrorKind::UnexpectedCharacter(e) => assert_eq!(e.found, b';' as u32),
    ///     _ => unreachable!(),
    /// }
    /// ```
    pub fn kind(&self) -> UnquoteErrorKind {
        self.kind
    }

    /// Position of the offending unit, counted in units from the start of
    /// the input.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl fmt::Display for UnquoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            UnquoteErrorKind::UnexpectedCharacter(e) => write!(
                f,
                "invalid literal: unexpected character 0x{:02X} outside quotes at offset {}",
                e.found, self.offset
            ),
        }
    }
}

/// An error from [`unquote_str`].
#[derive(Copy, Eq, PartialEq, Clone, Debug)]
pub enum DecodeUtf8Error {
    /// The input was not a sequence of quoted literals.
    Unquote(UnquoteError),
    /// The decoded bytes were not valid UTF-8.
    Utf8(str::Utf8Error),
}

impl fmt::Display for DecodeUtf8Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeUtf8Error::Unquote(e) => fmt::Display::fmt(e, f),
            DecodeUtf8Error::Utf8(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl core::error::Error for UnquoteError {}
impl core::error::Error for DecodeUtf8Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            DecodeUtf8Error::Unquote(e) => Some(e),
            DecodeUtf8Error::Utf8(e) => Some(e),
        }
    }
}
