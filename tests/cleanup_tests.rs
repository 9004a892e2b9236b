use pretty_assertions::assert_eq;
use rstest::rstest;
use sharpcraft::domain::cleanup::{curly, missing_curly, new_line, run_all, white_space};
use sharpcraft::domain::syntax::SyntaxTree;
use sharpcraft::infrastructure::csharp::parser::parse_compilation_unit;

const SAMPLE: &str = "class C\n{\n    void M()\n    {\n        if (a) b();\n        else if (c) d();\n        else e();\n\n\n\n        while (x)\n            if (y) z();\n    }\n  \n}\n";

#[rstest]
#[case::missing_curly(missing_curly)]
#[case::white_space(white_space)]
#[case::new_line(new_line)]
#[case::curly(curly)]
#[case::all(run_all)]
fn every_pass_is_idempotent(#[case] pass: fn(&SyntaxTree) -> SyntaxTree) {
    let tree = parse_compilation_unit(SAMPLE, &[]);
    let once = pass(&tree);
    let twice = pass(&once);
    assert_eq!(once.text(), twice.text());
}

#[test]
fn blank_line_runs_collapse() {
    let tree = run_all(&parse_compilation_unit(SAMPLE, &[]));
    assert!(!tree.text().contains("\n\n\n"), "{}", tree.text());
}

#[test]
fn nested_embedded_statements_all_get_blocks() {
    let tree = missing_curly(&parse_compilation_unit(SAMPLE, &[]));
    let opens = tree.text().matches('{').count();
    let closes = tree.text().matches('}').count();
    assert_eq!(opens, closes);
    // b(), d(), e() and z() were bare; the else-if chain keeps its shape.
    assert_eq!(opens, SAMPLE.matches('{').count() + 4, "{}", tree.text());
}
