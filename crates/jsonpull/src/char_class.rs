//! Byte classification for the string, name and keyword decoders.
#![allow(clippy::inline_always)]

/// How a byte behaves inside a quoted string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ByteClass {
    /// Copied through unchanged.
    Plain,
    /// `"` or `'`; ends the string only if it matches the opening quote.
    Quote,
    /// `\`
    Backslash,
    /// Below U+0020.
    Control,
    /// Lead byte of a multi-byte UTF-8 sequence of the given total width.
    Utf8Lead(u8),
    /// A stray continuation byte or a lead byte that is never valid.
    Invalid,
}

static STRING_CLASS: [ByteClass; 256] = {
    let mut table = [ByteClass::Plain; 256];
    let mut i = 0;
    while i < 0x20 {
        table[i] = ByteClass::Control;
        i += 1;
    }
    table[b'"' as usize] = ByteClass::Quote;
    table[b'\'' as usize] = ByteClass::Quote;
    table[b'\\' as usize] = ByteClass::Backslash;

    // 0x80..=0xBF are continuation bytes; 0xC0 and 0xC1 could only start
    // overlong forms; 0xF5 and up would encode past U+10FFFF.
    let mut i = 0x80;
    while i < 0x100 {
        table[i] = match i {
            0xC2..=0xDF => ByteClass::Utf8Lead(2),
            0xE0..=0xEF => ByteClass::Utf8Lead(3),
            0xF0..=0xF4 => ByteClass::Utf8Lead(4),
            _ => ByteClass::Invalid,
        };
        i += 1;
    }
    table
};

#[inline(always)]
pub(crate) fn string_class(b: u8) -> ByteClass {
    STRING_CLASS[b as usize]
}

/// Whether `b` can be copied straight into a quoted field name. Raw
/// non-ASCII bytes are kept as-is and validated once the name is complete.
#[inline(always)]
pub(crate) fn is_plain_name_byte(b: u8) -> bool {
    !matches!(
        string_class(b),
        ByteClass::Quote | ByteClass::Backslash | ByteClass::Control
    )
}

/// Bytes that may start an unquoted field name.
#[inline]
pub(crate) fn is_unquoted_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$' || b >= 0x80
}

/// Bytes that may continue an unquoted field name or an unrecognized token.
#[inline]
pub(crate) fn is_identifier_byte(b: u8) -> bool {
    is_unquoted_name_start(b) || b.is_ascii_digit()
}

/// Whether `b` ends a keyword or number. Only identifier bytes run into such
/// a token and are reported against it; any other byte is left for the
/// separator check that follows the value.
#[inline(always)]
pub(crate) fn ends_value(b: u8) -> bool {
    !is_identifier_byte(b)
}
