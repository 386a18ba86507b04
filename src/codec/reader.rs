//! Text deserialization of a resource tree.
//!
//! The reader is the strict reverse of the writer, with two deliberate
//! allowances: unknown child element kinds are skipped whole (so newer
//! writers stay readable), and stray text between elements is ignored.
//! A recognized element missing one of its required attributes fails with
//! a positioned `MalformedResource` error.

use crate::codec::escape::unescape;
use crate::error::{Error, Result};
use crate::except::{ExceptionDeclaration, ExceptionKindRegistry};
use crate::locale::LocaleTag;
use crate::tree::{Class, Method, Namespace, Project, Prompt};

pub fn decode(text: &str, registry: &ExceptionKindRegistry) -> Result<Project> {
    Reader::new(text).parse_project(registry)
}

/// One parsed start tag.
struct OpenTag {
    name: String,
    attrs: Vec<(String, String)>,
    self_closing: bool,
    offset: usize,
}

impl OpenTag {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

struct Reader<'a> {
    src: &'a str,
    pos: usize,
    line_index: Vec<usize>,
}

impl<'a> Reader<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            line_index: build_line_index(src),
        }
    }

    // ============================================================
    // Positions and errors
    // ============================================================

    fn position(&self, offset: usize) -> (usize, usize) {
        let line = match self.line_index.binary_search(&offset) {
            Ok(index) => index + 1,
            Err(index) => index,
        };
        let col = offset - self.line_index[line - 1] + 1;
        (line, col)
    }

    fn err_at(&self, offset: usize, message: impl Into<String>) -> Error {
        let (line, col) = self.position(offset);
        Error::malformed(line, col, message)
    }

    fn err_here(&self, message: impl Into<String>) -> Error {
        self.err_at(self.pos, message)
    }

    // ============================================================
    // Lexing
    // ============================================================

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Skip whitespace, comments, processing instructions and stray text.
    /// Stops at the next `<` of an element tag, or at end of input.
    fn skip_misc(&mut self) -> Result<()> {
        loop {
            self.skip_whitespace();
            if self.rest().starts_with("<!--") {
                let start = self.pos;
                match self.rest().find("-->") {
                    Some(end) => self.pos += end + 3,
                    None => return Err(self.err_at(start, "unterminated comment")),
                }
            } else if self.rest().starts_with("<?") {
                let start = self.pos;
                match self.rest().find("?>") {
                    Some(end) => self.pos += end + 2,
                    None => {
                        return Err(self.err_at(start, "unterminated processing instruction"));
                    }
                }
            } else if self.peek() == Some(b'<') || self.at_end() {
                return Ok(());
            } else {
                // Stray text between elements is ignored
                match self.rest().find('<') {
                    Some(next) => self.pos += next,
                    None => self.pos = self.src.len(),
                }
            }
        }
    }

    fn read_name(&mut self) -> Result<String> {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b':' || b == b'.' {
                self.pos += 1;
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err(self.err_here("expected a name"));
        }
        Ok(self.src[start..self.pos].to_string())
    }

    fn expect(&mut self, b: u8) -> Result<()> {
        if self.peek() == Some(b) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.err_here(format!("expected '{}'", b as char)))
        }
    }

    /// Read a start tag. The caller has already established `pos` is at a
    /// `<` that is not `</`, a comment or a processing instruction.
    fn read_open_tag(&mut self) -> Result<OpenTag> {
        let offset = self.pos;
        self.expect(b'<')?;
        let name = self.read_name()?;
        let mut attrs = Vec::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(b'/') => {
                    self.pos += 1;
                    self.expect(b'>')?;
                    return Ok(OpenTag {
                        name,
                        attrs,
                        self_closing: true,
                        offset,
                    });
                }
                Some(b'>') => {
                    self.pos += 1;
                    return Ok(OpenTag {
                        name,
                        attrs,
                        self_closing: false,
                        offset,
                    });
                }
                Some(_) => {
                    let attr_name = self.read_name()?;
                    self.skip_whitespace();
                    self.expect(b'=')?;
                    self.skip_whitespace();
                    let value = self.read_quoted_value()?;
                    attrs.push((attr_name, value));
                }
                None => return Err(self.err_here("unexpected end of input inside a tag")),
            }
        }
    }

    fn read_quoted_value(&mut self) -> Result<String> {
        let quote = match self.peek() {
            Some(q @ (b'\'' | b'"')) => q,
            _ => return Err(self.err_here("expected a quoted attribute value")),
        };
        self.pos += 1;
        let start = self.pos;
        match self.rest().find(quote as char) {
            Some(end) => {
                let raw = &self.src[start..start + end];
                self.pos = start + end + 1;
                unescape(raw).map_err(|message| self.err_at(start, message))
            }
            None => Err(self.err_at(start, "unterminated attribute value")),
        }
    }

    /// Read text content up to the next `<` and unescape it.
    fn read_text(&mut self) -> Result<String> {
        let start = self.pos;
        match self.rest().find('<') {
            Some(end) => {
                let raw = &self.src[start..start + end];
                self.pos = start + end;
                unescape(raw).map_err(|message| self.err_at(start, message))
            }
            None => Err(self.err_at(start, "unexpected end of input inside an element")),
        }
    }

    fn read_close_tag(&mut self) -> Result<String> {
        self.expect(b'<')?;
        self.expect(b'/')?;
        let name = self.read_name()?;
        self.skip_whitespace();
        self.expect(b'>')?;
        Ok(name)
    }

    /// Skip a whole element, including any nested children.
    fn skip_element(&mut self, open: &OpenTag) -> Result<()> {
        if open.self_closing {
            return Ok(());
        }
        let mut depth = 1usize;
        while depth > 0 {
            self.skip_misc()?;
            if self.at_end() {
                return Err(self.err_at(
                    open.offset,
                    format!("element '{}' is never closed", open.name),
                ));
            }
            if self.rest().starts_with("</") {
                self.read_close_tag()?;
                depth -= 1;
            } else {
                let child = self.read_open_tag()?;
                if !child.self_closing {
                    depth += 1;
                }
            }
        }
        Ok(())
    }

    // ============================================================
    // Attribute helpers
    // ============================================================

    fn require_attr(&self, open: &OpenTag, name: &str) -> Result<String> {
        open.attr(name).map(str::to_string).ok_or_else(|| {
            self.err_at(
                open.offset,
                format!(
                    "element '{}' is missing required attribute '{}'",
                    open.name, name
                ),
            )
        })
    }

    fn culture_attr(&self, open: &OpenTag, name: &str) -> Result<LocaleTag> {
        let raw = self.require_attr(open, name)?;
        LocaleTag::parse(&raw).map_err(|e| self.err_at(open.offset, e.to_string()))
    }

    // ============================================================
    // Element grammar
    // ============================================================

    fn parse_project(mut self, registry: &ExceptionKindRegistry) -> Result<Project> {
        self.skip_misc()?;
        if self.at_end() {
            return Err(self.err_here("empty document"));
        }
        let open = self.read_open_tag()?;
        if open.name != "project" {
            return Err(self.err_at(
                open.offset,
                format!("expected root element 'project', found '{}'", open.name),
            ));
        }
        let name = self.require_attr(&open, "name")?;
        let mut project =
            Project::new(name).map_err(|e| self.err_at(open.offset, e.to_string()))?;

        if !open.self_closing {
            loop {
                self.skip_misc()?;
                if self.at_end() {
                    return Err(self.err_at(open.offset, "element 'project' is never closed"));
                }
                if self.rest().starts_with("</") {
                    self.close_of(&open)?;
                    break;
                }
                let child = self.read_open_tag()?;
                match child.name.as_str() {
                    "settings" => self.parse_settings(&child, &mut project)?,
                    "namespace" => {
                        let namespace = self.parse_namespace(&child, registry)?;
                        project.add_namespace(namespace);
                    }
                    _ => self.skip_element(&child)?,
                }
            }
        }
        Ok(project)
    }

    fn close_of(&mut self, open: &OpenTag) -> Result<()> {
        let offset = self.pos;
        let name = self.read_close_tag()?;
        if name != open.name {
            return Err(self.err_at(
                offset,
                format!("expected '</{}>', found '</{}>'", open.name, name),
            ));
        }
        Ok(())
    }

    /// Run `handle` over every child element of `open` until its close tag.
    fn each_child(
        &mut self,
        open: &OpenTag,
        mut handle: impl FnMut(&mut Self, OpenTag) -> Result<()>,
    ) -> Result<()> {
        if open.self_closing {
            return Ok(());
        }
        loop {
            self.skip_misc()?;
            if self.at_end() {
                return Err(self.err_at(
                    open.offset,
                    format!("element '{}' is never closed", open.name),
                ));
            }
            if self.rest().starts_with("</") {
                self.close_of(open)?;
                return Ok(());
            }
            let child = self.read_open_tag()?;
            handle(self, child)?;
        }
    }

    fn parse_settings(&mut self, open: &OpenTag, project: &mut Project) -> Result<()> {
        self.each_child(open, |reader, child| match child.name.as_str() {
            "defaultCulture" => {
                let tag = reader.culture_attr(&child, "name")?;
                project.settings.set_default(tag);
                reader.skip_element(&child)
            }
            "languages" => reader.each_child(&child, |reader, entry| match entry.name.as_str() {
                "language" => {
                    let tag = reader.culture_attr(&entry, "name")?;
                    let display_name = reader.text_content(&entry)?;
                    project.settings.declare_language(tag, display_name);
                    Ok(())
                }
                "translation" => {
                    let source = reader.culture_attr(&entry, "name")?;
                    let substitute = reader.culture_attr(&entry, "alias")?;
                    project.settings.set_alias(source, substitute);
                    reader.skip_element(&entry)
                }
                _ => reader.skip_element(&entry),
            }),
            _ => reader.skip_element(&child),
        })
    }

    /// The text body of an element that holds character content.
    fn text_content(&mut self, open: &OpenTag) -> Result<String> {
        if open.self_closing {
            return Ok(String::new());
        }
        let text = self.read_text()?;
        self.close_of(open)?;
        Ok(text)
    }

    fn parse_namespace(
        &mut self,
        open: &OpenTag,
        registry: &ExceptionKindRegistry,
    ) -> Result<Namespace> {
        let name = self.require_attr(open, "name")?;
        let mut namespace =
            Namespace::new(name).map_err(|e| self.err_at(open.offset, e.to_string()))?;
        namespace.comment = open.attr("comment").map(str::to_string);

        self.each_child(open, |reader, child| match child.name.as_str() {
            "namespace" => {
                let inner = reader.parse_namespace(&child, registry)?;
                namespace.add_namespace(inner);
                Ok(())
            }
            "class" => {
                let class = reader.parse_class(&child, registry)?;
                namespace.add_class(class);
                Ok(())
            }
            _ => reader.skip_element(&child),
        })?;
        Ok(namespace)
    }

    fn parse_class(&mut self, open: &OpenTag, registry: &ExceptionKindRegistry) -> Result<Class> {
        let name = self.require_attr(open, "name")?;
        let mut class = Class::new(name).map_err(|e| self.err_at(open.offset, e.to_string()))?;
        class.comment = open.attr("comment").map(str::to_string);

        self.each_child(open, |reader, child| match child.name.as_str() {
            "method" => {
                let method = reader.parse_method(&child, registry)?;
                class.add_method(method);
                Ok(())
            }
            _ => reader.skip_element(&child),
        })?;
        Ok(class)
    }

    fn parse_method(&mut self, open: &OpenTag, registry: &ExceptionKindRegistry) -> Result<Method> {
        let name = self.require_attr(open, "name")?;
        let mut method = Method::new(name).map_err(|e| self.err_at(open.offset, e.to_string()))?;
        method.comment = open.attr("comment").map(str::to_string);

        self.each_child(open, |reader, child| match child.name.as_str() {
            "prompt" => {
                let prompt = reader.parse_prompt(&child)?;
                method.add_prompt(prompt);
                Ok(())
            }
            "exception" => {
                let declaration = reader.parse_exception(&child, registry)?;
                method.add_exception(declaration);
                Ok(())
            }
            _ => reader.skip_element(&child),
        })?;
        Ok(method)
    }

    fn parse_prompt(&mut self, open: &OpenTag) -> Result<Prompt> {
        let id = self.require_attr(open, "id")?;
        let mut prompt = Prompt::new(id).map_err(|e| self.err_at(open.offset, e.to_string()))?;
        prompt.comment = open.attr("comment").map(str::to_string);

        self.each_child(open, |reader, child| match child.name.as_str() {
            "data" => {
                let culture = reader.culture_attr(&child, "culture")?;
                let text = reader.text_content(&child)?;
                prompt.set_text(culture, text);
                Ok(())
            }
            _ => reader.skip_element(&child),
        })?;
        Ok(prompt)
    }

    fn parse_exception(
        &mut self,
        open: &OpenTag,
        registry: &ExceptionKindRegistry,
    ) -> Result<ExceptionDeclaration> {
        let kind = self.require_attr(open, "type")?;
        let id = self.require_attr(open, "id")?;
        let mut declaration = ExceptionDeclaration::new(id, kind, registry)
            .map_err(|e| self.err_at(open.offset, e.to_string()))?;
        declaration.comment = open.attr("comment").map(str::to_string);

        self.each_child(open, |reader, child| match child.name.as_str() {
            "data" => {
                let culture = reader.culture_attr(&child, "culture")?;
                let text = reader.text_content(&child)?;
                declaration.set_text(culture, text);
                Ok(())
            }
            _ => reader.skip_element(&child),
        })?;
        Ok(declaration)
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
