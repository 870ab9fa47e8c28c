/// Append-only output of one session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputAccumulator {
    text: String,
    fragments: usize,
}

impl OutputAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment and return the cumulative text
    pub fn push(&mut self, fragment: &str) -> &str {
        self.text.push_str(fragment);
        self.fragments += 1;
        &self.text
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of fragments appended so far
    pub fn fragment_count(&self) -> usize {
        self.fragments
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn into_text(self) -> String {
        self.text
    }
}
