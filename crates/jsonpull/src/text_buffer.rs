use alloc::string::String;

/// Growable buffer for the decoded text of the string, number or error token
/// in progress. Capacity is kept between tokens.
#[derive(Debug, Default)]
pub(crate) struct TextBuffer {
    segment: String,
}

impl TextBuffer {
    pub(crate) fn new() -> Self {
        Self {
            segment: String::with_capacity(64),
        }
    }

    pub(crate) fn reset(&mut self) {
        self.segment.clear();
    }

    #[inline]
    pub(crate) fn append(&mut self, ch: char) {
        self.segment.push(ch);
    }

    /// Appends a run of ASCII bytes.
    #[inline]
    pub(crate) fn append_ascii(&mut self, bytes: &[u8]) {
        debug_assert!(bytes.is_ascii());
        self.expand(bytes.len());
        self.segment.extend(bytes.iter().map(|&b| char::from(b)));
    }

    /// Makes room for at least `additional` more bytes.
    #[inline]
    pub(crate) fn expand(&mut self, additional: usize) {
        self.segment.reserve(additional);
    }

    pub(crate) fn current_segment(&self) -> &str {
        &self.segment
    }

    /// Copies the contents out and resets the buffer.
    pub(crate) fn contents_and_reset(&mut self) -> String {
        let contents = String::from(self.current_segment());
        self.segment.clear();
        contents
    }
}
