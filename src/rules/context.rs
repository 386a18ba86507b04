//! Locating tree nodes inside the text they were parsed from.
//!
//! Checks run over the decoded tree, but reports want file positions. The
//! context searches the original text for the chain of attribute values
//! leading to a node (`'Foo'` then `'Bar'` then `'greeting'`), which finds
//! the right occurrence even when leaf names repeat across namespaces.

use crate::issues::ResourceLocation;

pub struct FileContext<'a> {
    file_path: &'a str,
    content: &'a str,
    line_index: Vec<usize>,
}

impl<'a> FileContext<'a> {
    pub fn new(file_path: &'a str, content: &'a str) -> Self {
        Self {
            file_path,
            content,
            line_index: build_line_index(content),
        }
    }

    pub fn file_path(&self) -> &str {
        self.file_path
    }

    /// The 1-based line of text, for caret display.
    pub fn line_text(&self, line: usize) -> Option<&str> {
        if line == 0 {
            return None;
        }
        self.content.lines().nth(line - 1)
    }

    /// Find the position of a node by its chain of attribute values.
    ///
    /// Each segment is searched as a quoted attribute value after the match
    /// of the previous segment. Line and column are zero when nothing
    /// matches; positions are best-effort display information only.
    pub fn locate(&self, segments: &[&str]) -> ResourceLocation {
        let mut search_start = 0;
        let mut last_match = None;

        for segment in segments {
            let single = format!("'{}'", segment);
            let double = format!("\"{}\"", segment);
            let remaining = &self.content[search_start..];
            let hit = remaining
                .find(&single)
                .or_else(|| remaining.find(&double));
            match hit {
                Some(rel) => {
                    last_match = Some(search_start + rel);
                    search_start += rel + single.len();
                }
                None => break,
            }
        }

        match last_match {
            Some(offset) => {
                let (line, col) = self.position(offset);
                ResourceLocation::new(self.file_path, line, col)
            }
            None => ResourceLocation::new(self.file_path, 0, 0),
        }
    }

    fn position(&self, offset: usize) -> (usize, usize) {
        let line = match self.line_index.binary_search(&offset) {
            Ok(index) => index + 1,
            Err(index) => index,
        };
        (line, offset - self.line_index[line - 1] + 1)
    }
}

/// Byte offsets where each line starts; line 1 starts at offset 0.
fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}
