use std::fmt::Write as _;

use crate::{Green, GreenElement, GreenNode, GreenToken, GreenTrivia, GreenWalker, walk_node};

impl GreenElement {
    /// Renders the tree one element per line, indented by depth.
    ///
    /// Each line reads `KIND@full_width`, then the text for leaves, then
    /// markers for missing elements, skipped text, and the element's own
    /// diagnostics and annotations.
    pub fn debug_dump(&self) -> String {
        let mut dump = DebugDump::default();
        self.accept_walker(&mut dump);
        dump.out
    }
}

#[derive(Default)]
struct DebugDump {
    out: String,
    depth: usize,
    side: &'static str,
}

impl DebugDump {
    fn line<G: Green>(&mut self, element: &G, text: Option<&str>) {
        let indent = "  ".repeat(self.depth);
        let (side, kind, width) = (self.side, element.kind(), element.full_width());
        let _ = write!(self.out, "{indent}{side}{kind:?}@{width:?}");
        if let Some(text) = text {
            let _ = write!(self.out, " {text:?}");
        }
        if element.is_missing() {
            self.out.push_str(" missing");
        }
        if element.contains_skipped_text() {
            self.out.push_str(" skipped");
        }
        if !element.diagnostics().is_empty() {
            let codes: Vec<_> =
                element.diagnostics().iter().map(|d| d.code().to_string()).collect();
            let _ = write!(self.out, " diagnostics=[{}]", codes.join(", "));
        }
        if !element.annotations().is_empty() {
            let _ = write!(self.out, " annotations={}", element.annotations().len());
        }
        self.out.push('\n');
    }
}

impl GreenWalker for DebugDump {
    fn visit_node(&mut self, node: &GreenNode) {
        self.line(node, None);
        self.depth += 1;
        walk_node(self, node);
        self.depth -= 1;
    }

    fn visit_token(&mut self, token: &GreenToken) {
        self.line(token, Some(token.text()));
        self.depth += 1;
        let sides = [("leading ", token.leading_trivia()), ("trailing ", token.trailing_trivia())];
        for (side, trivia) in sides {
            self.side = side;
            for trivia in trivia {
                self.visit_trivia(trivia);
            }
        }
        self.side = "";
        self.depth -= 1;
    }

    fn visit_trivia(&mut self, trivia: &GreenTrivia) {
        self.line(trivia, Some(trivia.text()));
    }
}
