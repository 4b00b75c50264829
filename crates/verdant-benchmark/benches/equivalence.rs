use std::hint::black_box;

use codspeed_criterion_compat::{BenchmarkId, Criterion, criterion_group, criterion_main};
use verdant_syntax::SyntaxKind::*;
use verdant_syntax::{Green as _, GreenElement, GreenNode, GreenToken, GreenTrivia};

/// A call with `width` arguments nested `depth` levels deep.
fn calls(depth: usize, width: usize) -> GreenNode {
    let space = GreenTrivia::new(WHITESPACE_TRIVIA, " ");
    let mut inner = GreenNode::new(LITERAL, vec![GreenToken::new(NUMBER, "0").into()]);
    for level in 0..depth {
        let mut args: Vec<GreenElement> = vec![GreenToken::new(LEFT_PAREN, "(").into()];
        for arg in 0..width {
            if arg > 0 {
                args.push(
                    GreenToken::with_trivia(COMMA, ",", Vec::new(), vec![space.clone()]).into(),
                );
            }
            args.push(inner.clone().into());
        }
        args.push(GreenToken::new(RIGHT_PAREN, ")").into());

        let callee =
            GreenNode::new(NAME_REF, vec![GreenToken::new(IDENT, &format!("f{level}")).into()]);
        inner =
            GreenNode::new(CALL_EXPR, vec![callee.into(), GreenNode::new(ARG_LIST, args).into()]);
    }
    inner
}

fn benchmark_equivalence(c: &mut Criterion) {
    let mut group = c.benchmark_group("Equivalence Benchmark");

    for depth in [3, 6] {
        // Separate allocations, so no pointer shortcut applies.
        let left = calls(depth, 3);
        let right = calls(depth, 3);

        group.bench_with_input(
            BenchmarkId::new("is_equivalent_to", depth),
            &(left, right),
            |b, (left, right)| {
                b.iter(|| black_box(left.is_equivalent_to(right)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_equivalence);
criterion_main!(benches);
