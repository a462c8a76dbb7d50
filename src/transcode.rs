//! Byte encodings for Unicode escapes in narrow output.
//!
//! A `\u3042` escape inside a narrow (`u8`) literal cannot be stored as one unit.
//! The [`Transcoder`] decides which bytes represent it: UTF-8 by default, or a
//! legacy code page such as Shift_JIS or windows-1252 when the `encoding`
//! feature is enabled.
//!
//! Wide outputs (`u16`, `u32`) never consult a transcoder.
//!
//! # Example
//!
//! ```
//! use c_unquote::{Unquoter, transcode::Latin1};
//!
//! let mut unquoter = Unquoter::with_transcoder(Latin1);
//! assert_eq!(unquoter.unquote(br#""caf\u00E9""#), b"caf\xE9");
//! // Outside Latin-1: replaced by `?`.
//! assert_eq!(unquoter.unquote(br#""\u20AC""#), b"?");
//! ```

use alloc::vec::Vec;

/// A byte-oriented text encoding used to store Unicode escapes in narrow
/// output.
///
/// The unquoter calls [`reset`](Transcoder::reset) at the start of every
/// decode, so an implementation that keeps state between conversions never
/// carries it from one literal into the next.
pub trait Transcoder {
    /// A human-readable name of the target encoding.
    fn encoding_name(&self) -> &str;

    /// Returns the transcoder to its initial state.
    #[inline]
    fn reset(&mut self) {}

    /// Appends the encoded form of `code_point` to `out`.
    ///
    /// `code_point` is the raw value of the escape. It may be a surrogate or
    /// lie above U+10FFFF; the implementation chooses a replacement.
    fn encode(&mut self, code_point: u32, out: &mut Vec<u8>);
}

impl<T: Transcoder + ?Sized> Transcoder for &mut T {
    #[inline]
    fn encoding_name(&self) -> &str {
        (**self).encoding_name()
    }

    #[inline]
    fn reset(&mut self) {
        (**self).reset()
    }

    #[inline]
    fn encode(&mut self, code_point: u32, out: &mut Vec<u8>) {
        (**self).encode(code_point, out)
    }
}

/// UTF-8 output. Values that are not Unicode scalar values are stored as
/// U+FFFD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Utf8;

impl Transcoder for Utf8 {
    fn encoding_name(&self) -> &str {
        "UTF-8"
    }

    #[inline]
    fn encode(&mut self, code_point: u32, out: &mut Vec<u8>) {
        let ch = char::from_u32(code_point).unwrap_or(char::REPLACEMENT_CHARACTER);
        let mut buf = [0u8; 4];
        out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
    }
}

/// ISO-8859-1 output. Anything above U+00FF becomes `?`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latin1;

impl Transcoder for Latin1 {
    fn encoding_name(&self) -> &str {
        "ISO-8859-1"
    }

    #[inline]
    fn encode(&mut self, code_point: u32, out: &mut Vec<u8>) {
        out.push(u8::try_from(code_point).unwrap_or(b'?'));
    }
}

#[cfg(feature = "encoding")]
pub use code_page::CodePage;

#[cfg(feature = "encoding")]
mod code_page {
    use alloc::vec::Vec;

    use encoding_rs::{EncoderResult, Encoding};

    use super::Transcoder;

    // Enough for one scalar value in any encoding_rs encoder, including the
    // ISO-2022-JP escape sequences on both sides of it.
    const SCRATCH_LEN: usize = 16;

    /// Output in any encoding known to `encoding_rs`, looked up by WHATWG label.
    ///
    /// Each code point is encoded as a complete, self-contained sequence. A
    /// code point the encoding cannot represent becomes `?`.
    ///
    /// Per `encoding_rs`, the UTF-16 labels produce UTF-8 output.
    ///
    /// **Requires the `encoding` feature.**
    ///
    /// # Example
    ///
    /// ```
    /// use c_unquote::{Unquoter, transcode::CodePage};
    ///
    /// let sjis = CodePage::for_label(b"shift_jis").unwrap();
    /// let mut unquoter = Unquoter::with_transcoder(sjis);
    ///
    /// // Hiragana A I U
    /// let out = unquoter.unquote(br#""\u3042\u3044\u3046""#);
    /// assert_eq!(out, b"\x82\xA0\x82\xA2\x82\xA4");
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CodePage {
        encoding: &'static Encoding,
    }

    impl CodePage {
        /// Wraps an `encoding_rs` encoding.
        pub fn new(encoding: &'static Encoding) -> Self {
            Self {
                encoding: encoding.output_encoding(),
            }
        }

        /// Looks up an encoding by label, e.g. `b"windows-1252"` or `b"sjis"`.
        pub fn for_label(label: &[u8]) -> Option<Self> {
            Encoding::for_label(label).map(Self::new)
        }

        /// The underlying encoding.
        pub fn encoding(&self) -> &'static Encoding {
            self.encoding
        }
    }

    impl Transcoder for CodePage {
        fn encoding_name(&self) -> &str {
            self.encoding.name()
        }

        fn encode(&mut self, code_point: u32, out: &mut Vec<u8>) {
            let Some(ch) = char::from_u32(code_point) else {
                crate::trace!(
                    code_point,
                    encoding = self.encoding.name(),
                    "not a scalar value"
                );
                out.push(b'?');
                return;
            };

            let mut utf8 = [0u8; 4];
            let src = ch.encode_utf8(&mut utf8);
            let mut scratch = [0u8; SCRATCH_LEN];
            let mut encoder = self.encoding.new_encoder();
            let (result, _read, written) =
                encoder.encode_from_utf8_without_replacement(src, &mut scratch, true);

            match result {
                EncoderResult::InputEmpty => out.extend_from_slice(&scratch[..written]),
                EncoderResult::Unmappable(_) => {
                    crate::trace!(
                        code_point,
                        encoding = self.encoding.name(),
                        "unmappable code point"
                    );
                    out.push(b'?');
                }
                // A single scalar always fits the scratch buffer.
                EncoderResult::OutputFull => out.push(b'?'),
            }
        }
    }

}
