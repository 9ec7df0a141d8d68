/// Maximum size, in bytes, of the editable file-name buffer.
pub const NAME_BUFFER_CAPACITY: usize = 255;

/// Fixed-capacity UTF-8 text buffer backing the dialog's name input.
///
/// Writes past the capacity are truncated on a char boundary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameBuffer {
    text: String,
}

impl NameBuffer {
    /// Empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents.
    pub fn set(&mut self, text: &str) {
        self.text.clear();
        self.push(text);
    }

    /// Append as much of `text` as fits.
    pub fn push(&mut self, text: &str) {
        let room = NAME_BUFFER_CAPACITY.saturating_sub(self.text.len());
        self.text.push_str(truncate_to(text, room));
    }

    /// Current contents.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Clear the contents.
    pub fn clear(&mut self) {
        self.text.clear();
    }
}

fn truncate_to(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
