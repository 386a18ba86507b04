//! Text serialization of a resource tree.
//!
//! Elements mirror the tree one to one and appear in insertion order.
//! Attribute values use single quotes; both attributes and leaf text go
//! through the five-entity escape.

use crate::codec::escape::escape;
use crate::except::ExceptionDeclaration;
use crate::locale::TranslationTable;
use crate::tree::{EntrySet, Method, Namespace, Project, Prompt};

pub fn encode(project: &Project) -> String {
    let mut w = Writer::new();
    w.project(project);
    w.out
}

struct Writer {
    out: String,
    depth: usize,
}

impl Writer {
    fn new() -> Self {
        Self {
            out: String::new(),
            depth: 0,
        }
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn comment_attr(comment: &Option<String>) -> String {
        match comment {
            Some(text) => format!(" comment='{}'", escape(text)),
            None => String::new(),
        }
    }

    fn project(&mut self, project: &Project) {
        self.line(&format!("<project name='{}'>", escape(project.name())));
        self.depth += 1;
        if !project.settings.is_empty() {
            self.settings(&project.settings);
        }
        for namespace in project.namespaces() {
            self.namespace(namespace);
        }
        self.depth -= 1;
        self.line("</project>");
    }

    fn settings(&mut self, table: &TranslationTable) {
        self.line("<settings>");
        self.depth += 1;
        if let Some(default) = table.default_locale() {
            self.line(&format!("<defaultCulture name='{}'/>", default));
        }
        if !table.languages().is_empty() || !table.aliases().is_empty() {
            self.line(&format!("<languages count='{}'>", table.languages().len()));
            self.depth += 1;
            for language in table.languages() {
                self.line(&format!(
                    "<language name='{}'>{}</language>",
                    language.tag,
                    escape(&language.display_name)
                ));
            }
            for (source, substitute) in table.aliases() {
                self.line(&format!(
                    "<translation name='{}' alias='{}'/>",
                    source, substitute
                ));
            }
            self.depth -= 1;
            self.line("</languages>");
        }
        self.depth -= 1;
        self.line("</settings>");
    }

    fn namespace(&mut self, namespace: &Namespace) {
        let attrs = format!(
            "name='{}'{}",
            escape(namespace.name()),
            Self::comment_attr(&namespace.comment)
        );
        if namespace.namespaces().is_empty() && namespace.classes().is_empty() {
            self.line(&format!("<namespace {}/>", attrs));
            return;
        }
        self.line(&format!("<namespace {}>", attrs));
        self.depth += 1;
        for child in namespace.namespaces() {
            self.namespace(child);
        }
        for class in namespace.classes() {
            let class_attrs = format!(
                "name='{}'{}",
                escape(class.name()),
                Self::comment_attr(&class.comment)
            );
            if class.methods().is_empty() {
                self.line(&format!("<class {}/>", class_attrs));
                continue;
            }
            self.line(&format!("<class {}>", class_attrs));
            self.depth += 1;
            for method in class.methods() {
                self.method(method);
            }
            self.depth -= 1;
            self.line("</class>");
        }
        self.depth -= 1;
        self.line("</namespace>");
    }

    fn method(&mut self, method: &Method) {
        let attrs = format!(
            "name='{}'{}",
            escape(method.name()),
            Self::comment_attr(&method.comment)
        );
        if method.prompts().is_empty() && method.exceptions().is_empty() {
            self.line(&format!("<method {}/>", attrs));
            return;
        }
        self.line(&format!("<method {}>", attrs));
        self.depth += 1;
        for prompt in method.prompts() {
            self.prompt(prompt);
        }
        for declaration in method.exceptions() {
            self.exception(declaration);
        }
        self.depth -= 1;
        self.line("</method>");
    }

    fn prompt(&mut self, prompt: &Prompt) {
        let attrs = format!(
            "id='{}'{}",
            escape(prompt.name()),
            Self::comment_attr(&prompt.comment)
        );
        if prompt.entries().is_empty() {
            self.line(&format!("<prompt {}/>", attrs));
            return;
        }
        self.line(&format!("<prompt {}>", attrs));
        self.depth += 1;
        self.data(prompt.entries());
        self.depth -= 1;
        self.line("</prompt>");
    }

    fn exception(&mut self, declaration: &ExceptionDeclaration) {
        let attrs = format!(
            "type='{}' id='{}'{}",
            escape(declaration.kind()),
            escape(declaration.id()),
            Self::comment_attr(&declaration.comment)
        );
        if declaration.entries().is_empty() {
            self.line(&format!("<exception {}/>", attrs));
            return;
        }
        self.line(&format!("<exception {}>", attrs));
        self.depth += 1;
        self.data(declaration.entries());
        self.depth -= 1;
        self.line("</exception>");
    }

    fn data(&mut self, entries: &EntrySet) {
        for entry in entries.iter() {
            if entry.text.is_empty() {
                self.line(&format!("<data culture='{}'/>", entry.locale));
                continue;
            }
            let line = format!(
                "<data culture='{}'>{}</data>",
                entry.locale,
                escape(&entry.text)
            );
            self.line(&line);
        }
    }
}
