use crate::{literal_buffer::LiteralMatch, utf8::Utf8Partial};

/// Grammatical context, changed only at token boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Major {
    /// Nothing but whitespace (and maybe a BOM) seen yet.
    Initial,
    /// At least one root value has completed.
    Root,
    ObjectFieldFirst,
    ObjectFieldNext,
    ObjectValue,
    ArrayElementFirst,
    ArrayElementNext,
}

/// Where decoding of the current token stopped when the chunk ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Minor {
    /// No token in progress.
    None,
    /// Inside a byte-order mark; the count of its bytes matched so far.
    Bom(u8),

    ValueLeadingWs,
    /// The comma before an array element was consumed.
    ValueLeadingComma,
    /// The colon after a field name was consumed.
    ValueLeadingColon,
    FieldLeadingWs,
    /// The comma before a field name was consumed.
    FieldLeadingComma,

    FieldName { quote: u8 },
    FieldNameEscape { quote: u8 },
    UnquotedFieldName,

    Keyword(LiteralMatch),
    ErrorToken,

    NumberMinus,
    NumberLeadingZero,
    NumberIntegerDigits,
    NumberFractionDigits,
    /// `e`/`E` consumed, sign not yet seen.
    NumberExponentMarker,
    NumberExponentDigits,

    String { quote: u8 },
    StringUtf8 { quote: u8, partial: Utf8Partial },
    StringEscape { quote: u8 },
}
