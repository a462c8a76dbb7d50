//! Character widths the unquoter can operate on.
//!
//! The scanner in [`token`](crate::token) is written once against the
//! [`CodeUnit`] trait. Each implementation supplies the few width-specific
//! pieces: ASCII comparison, truncation of numeric escapes, NUL termination,
//! a fast search for the next special character, and how a decoded Unicode
//! value is stored.

use alloc::vec::Vec;
use memchr::{memchr, memchr2};

use crate::transcode::Transcoder;

/// The platform's wide character: UTF-16 on Windows, UTF-32 elsewhere.
#[cfg(windows)]
pub type WideChar = u16;

/// The platform's wide character: UTF-16 on Windows, UTF-32 elsewhere.
#[cfg(not(windows))]
pub type WideChar = u32;

mod sealed {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
}

/// A fixed-width storage element of both the input literal and the decoded
/// output.
///
/// Implemented for `u8` (narrow, byte-oriented text), `u16` (UTF-16) and
/// `u32` (UTF-32). The trait is sealed.
pub trait CodeUnit: sealed::Sealed + Copy + Eq + Send + Sync + core::fmt::Debug + 'static {
    /// Width of one unit in bits.
    const BITS: u32;
    /// The terminator.
    const NUL: Self;
    /// `"`
    const QUOTE: Self;
    /// `\`
    const BACKSLASH: Self;

    /// Widens an ASCII byte.
    fn from_ascii(byte: u8) -> Self;

    /// The unit as an ASCII byte, or `None` if it lies outside `0..0x80`.
    fn to_ascii(self) -> Option<u8>;

    /// The unit's numeric value.
    fn to_u32(self) -> u32;

    /// `value` modulo 2^[`BITS`](Self::BITS).
    fn truncate(value: u32) -> Self;

    /// Appends a code value decoded from a `\u` or `\U` escape.
    ///
    /// `transcoder` is only consulted by the narrow implementation.
    fn push_unicode<X: Transcoder + ?Sized>(
        out: &mut Vec<Self>,
        code_point: u32,
        transcoder: Option<&mut X>,
    );

    /// Whitespace allowed between literals: space, `\t`, `\n`, `\r`, `\f`, `\v`.
    #[inline]
    fn is_space(self) -> bool {
        matches!(
            self.to_ascii(),
            Some(b' ' | b'\t' | b'\n' | b'\r' | b'\x0C' | b'\x0B')
        )
    }

    /// The prefix of `units` before the first NUL.
    #[inline]
    fn terminated(units: &[Self]) -> &[Self] {
        match units.iter().position(|&u| u == Self::NUL) {
            Some(end) => &units[..end],
            None => units,
        }
    }

    /// Position of the first `"` or `\` in `units`.
    #[inline]
    fn find_special(units: &[Self]) -> Option<usize> {
        units
            .iter()
            .position(|&u| u == Self::QUOTE || u == Self::BACKSLASH)
    }
}

impl CodeUnit for u8 {
    const BITS: u32 = 8;
    const NUL: Self = 0;
    const QUOTE: Self = b'"';
    const BACKSLASH: Self = b'\\';

    #[inline(always)]
    fn from_ascii(byte: u8) -> Self {
        byte
    }

    #[inline(always)]
    fn to_ascii(self) -> Option<u8> {
        self.is_ascii().then_some(self)
    }

    #[inline(always)]
    fn to_u32(self) -> u32 {
        self as u32
    }

    #[inline(always)]
    fn truncate(value: u32) -> Self {
        value as u8
    }

    fn push_unicode<X: Transcoder + ?Sized>(
        out: &mut Vec<Self>,
        code_point: u32,
        transcoder: Option<&mut X>,
    ) {
        match transcoder {
            Some(transcoder) if code_point >= 0x80 => transcoder.encode(code_point, out),
            _ => out.push(code_point as u8),
        }
    }

    #[inline]
    fn terminated(units: &[Self]) -> &[Self] {
        match memchr(0, units) {
            Some(end) => &units[..end],
            None => units,
        }
    }

    #[inline]
    fn find_special(units: &[Self]) -> Option<usize> {
        memchr2(b'"', b'\\', units)
    }
}

impl CodeUnit for u16 {
    const BITS: u32 = 16;
    const NUL: Self = 0;
    const QUOTE: Self = b'"' as u16;
    const BACKSLASH: Self = b'\\' as u16;

    #[inline(always)]
    fn from_ascii(byte: u8) -> Self {
        byte as u16
    }

    #[inline(always)]
    fn to_ascii(self) -> Option<u8> {
        u8::try_from(self).ok().filter(u8::is_ascii)
    }

    #[inline(always)]
    fn to_u32(self) -> u32 {
        self as u32
    }

    #[inline(always)]
    fn truncate(value: u32) -> Self {
        value as u16
    }

    /// Unlike octal and hex values, a scalar above U+FFFF is not truncated but
    /// stored as a surrogate pair.
    fn push_unicode<X: Transcoder + ?Sized>(
        out: &mut Vec<Self>,
        code_point: u32,
        _transcoder: Option<&mut X>,
    ) {
        if let Ok(unit) = u16::try_from(code_point) {
            out.push(unit);
        } else if let Some(ch) = char::from_u32(code_point) {
            let mut pair = [0u16; 2];
            out.extend_from_slice(ch.encode_utf16(&mut pair));
        } else {
            out.push(code_point as u16);
        }
    }
}

impl CodeUnit for u32 {
    const BITS: u32 = 32;
    const NUL: Self = 0;
    const QUOTE: Self = b'"' as u32;
    const BACKSLASH: Self = b'\\' as u32;

    #[inline(always)]
    fn from_ascii(byte: u8) -> Self {
        byte as u32
    }

    #[inline(always)]
    fn to_ascii(self) -> Option<u8> {
        u8::try_from(self).ok().filter(u8::is_ascii)
    }

    #[inline(always)]
    fn to_u32(self) -> u32 {
        self
    }

    #[inline(always)]
    fn truncate(value: u32) -> Self {
        value
    }

    fn push_unicode<X: Transcoder + ?Sized>(
        out: &mut Vec<Self>,
        code_point: u32,
        _transcoder: Option<&mut X>,
    ) {
        out.push(code_point);
    }
}
