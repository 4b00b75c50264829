use std::sync::Once;

use tracing_subscriber::EnvFilter;
use verdant_syntax::SyntaxKind::*;
use verdant_syntax::wire::{self, ReadError, ReaderRegistry, WireConfig, WriteError};
use verdant_syntax::{
    DiagnosticCode, Green as _, GreenElement, GreenNode, GreenToken, GreenTrivia, SyntaxAnnotation,
    SyntaxDiagnostic, SyntaxNode, TextRange, TextSize,
};

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn ws() -> GreenTrivia {
    GreenTrivia::new(WHITESPACE_TRIVIA, " ")
}

fn nl() -> GreenTrivia {
    GreenTrivia::new(END_OF_LINE_TRIVIA, "\n")
}

fn diagnostic(code: u16, width: u32) -> SyntaxDiagnostic {
    SyntaxDiagnostic::error(DiagnosticCode(code), TextSize::new(0), TextSize::new(width))
}

/// `fun f(a) {\n  return a + 1;\n}` with an overlay on a few elements.
fn program() -> GreenNode {
    let name = GreenToken::with_trivia(IDENT, "f", Vec::new(), Vec::new());
    let params = GreenNode::new(
        PARAM_LIST,
        vec![
            GreenToken::new(LEFT_PAREN, "(").into(),
            GreenToken::new(IDENT, "a").into(),
            GreenToken::with_trivia(RIGHT_PAREN, ")", Vec::new(), vec![ws()]).into(),
        ],
    );

    let ret = GreenToken::with_trivia(RETURN_KW, "return", vec![nl(), ws(), ws()], vec![ws()]);
    let lhs = GreenNode::new(
        NAME_REF,
        vec![GreenToken::with_trivia(IDENT, "a", Vec::new(), vec![ws()]).into()],
    );
    let plus = GreenToken::with_trivia(PLUS, "+", Vec::new(), vec![ws()]);
    let one = GreenToken::new(NUMBER, "1")
        .with_annotations(vec![SyntaxAnnotation::with_data("rename", "one")]);
    let rhs = GreenNode::new(LITERAL, vec![one.into()]);
    let binary = GreenNode::new(BINARY_EXPR, vec![lhs.into(), plus.into(), rhs.into()])
        .with_diagnostics(vec![diagnostic(7, 5).with_argument("i32")]);
    let stmt = GreenNode::new(
        RETURN_STMT,
        vec![ret.into(), binary.into(), GreenToken::new(SEMICOLON, ";").into()],
    );

    let body = GreenNode::new(
        BLOCK,
        vec![
            GreenToken::new(LEFT_BRACE, "{").into(),
            stmt.into(),
            GreenToken::with_trivia(RIGHT_BRACE, "}", vec![nl()], Vec::new()).into(),
        ],
    );
    let fun = GreenNode::new(
        FUNCTION,
        vec![
            GreenToken::with_trivia(FUN_KW, "fun", Vec::new(), vec![ws()]).into(),
            name.into(),
            params.into(),
            body.into(),
        ],
    );
    GreenNode::new(MODULE, vec![fun.into(), GreenToken::missing(EOF).into()])
}

#[test]
fn round_trip_is_bit_exact() {
    init_tracing();
    let tree = program();
    let bytes = wire::to_bytes(&tree).unwrap();
    let read = wire::from_bytes(&bytes).unwrap();

    assert!(read.is_equivalent_to(&GreenElement::from(tree.clone())));
    assert_eq!(read.to_full_string(), "fun f(a) {\n  return a + 1;\n}");
    assert_eq!(read.to_full_string(), tree.to_full_string());
    assert_eq!(read.flags(), tree.flags());
    assert_eq!(wire::to_bytes(&read).unwrap(), bytes);
}

#[test]
fn round_trip_keeps_overlays() {
    init_tracing();
    let tree = program();
    let read = wire::from_bytes(&wire::to_bytes(&tree).unwrap()).unwrap();
    let root = SyntaxNode::new_root(read.as_node().unwrap().clone());

    let diagnostics = root.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    let (range, diagnostic) = &diagnostics[0];
    assert_eq!(*range, TextRange::new(TextSize::new(20), TextSize::new(25)));
    assert_eq!(diagnostic.code(), DiagnosticCode(7));
    assert_eq!(&*diagnostic.arguments()[0], "i32");

    let annotated = root.annotated_elements("rename");
    assert_eq!(annotated.len(), 1);
    let (range, element) = &annotated[0];
    assert_eq!(*range, TextRange::new(TextSize::new(24), TextSize::new(25)));
    let annotation = &element.annotations()[0];
    assert_eq!(annotation.data(), Some("one"));

    let original = SyntaxNode::new_root(tree);
    let (_, original_element) = &original.annotated_elements("rename")[0];
    assert_eq!(annotation, &original_element.annotations()[0]);
}

#[test]
fn undeduplicated_streams_read_the_same() {
    init_tracing();
    let tree = program();
    let config = WireConfig { dedupe_strings: false, ..WireConfig::default() };
    let mut plain: Vec<u8> = Vec::new();
    wire::write_tree(&mut plain, &tree, &config).unwrap();
    let deduped = wire::to_bytes(&tree).unwrap();
    assert!(plain.len() > deduped.len());

    let read = wire::from_bytes(&plain).unwrap();
    assert_eq!(wire::to_bytes(&read).unwrap(), deduped);
}

#[test]
fn strings_over_the_limit_are_refused() {
    init_tracing();
    let tree = GreenToken::new(STRING, "\"a long string literal\"");
    let config = WireConfig { max_string_len: 8, ..WireConfig::default() };

    let mut sink: Vec<u8> = Vec::new();
    let err = wire::write_tree(&mut sink, &tree, &config).unwrap_err();
    assert!(matches!(err, WriteError::StringTooLong { len: 23, limit: 8 }));

    let bytes = wire::to_bytes(&tree).unwrap();
    let err = wire::read_tree(&mut &bytes[..], ReaderRegistry::standard(), &config).unwrap_err();
    assert!(matches!(err, ReadError::StringTooLong { len: 23, limit: 8 }));
}

#[test]
fn deep_trees_respect_the_configured_depth() {
    init_tracing();
    let mut tree = GreenNode::new(PAREN_EXPR, vec![GreenToken::new(NUMBER, "1").into()]);
    for _ in 0..9 {
        tree = GreenNode::new(PAREN_EXPR, vec![tree.into()]);
    }
    let bytes = wire::to_bytes(&tree).unwrap();

    let shallow = WireConfig { max_depth: 8, ..WireConfig::default() };
    let err = wire::read_tree(&mut &bytes[..], ReaderRegistry::standard(), &shallow).unwrap_err();
    assert!(matches!(err, ReadError::TooDeep(8)));

    let enough = WireConfig { max_depth: 11, ..WireConfig::default() };
    let read = wire::read_tree(&mut &bytes[..], ReaderRegistry::standard(), &enough).unwrap();
    assert!(read.is_equivalent_to(&GreenElement::from(tree)));
}

#[test]
fn truncated_streams_fail_with_io_errors() {
    init_tracing();
    let bytes = wire::to_bytes(&program()).unwrap();
    for len in [0, 3, 5, 7, bytes.len() - 1] {
        let err = wire::from_bytes(&bytes[..len]).unwrap_err();
        assert!(matches!(err, ReadError::Io(_)), "{len}: {err}");
    }
}
