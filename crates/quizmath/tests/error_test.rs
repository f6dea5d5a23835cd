use quizmath::{LatexError, parse_latex};

const PROBLEMS: [(&str, &str); 12] = [
    ("x^", "2: expected {, got EOF"),
    (r"\frac{1}", "8: expected {, got EOF"),
    (r"\sqrt+", "5: expected {, got Operator(+)"),
    ("{x", r#"2: expected "}", got EOF"#),
    ("(x+1", r#"4: expected ")", got EOF"#),
    ("_1", "0: '_' without a preceding expression"),
    ("a&b", "1: unexpected token: Ampersand(&)"),
    (
        r"\left x\right)",
        r#"6: expected a delimiter after "\left", got Identifier(x)"#,
    ),
    (
        r"\left(x\right x",
        r#"14: expected a delimiter after "\right", got Identifier(x)"#,
    ),
    (r"\left(x", r#"7: expected "\right", got EOF"#),
    (
        r"\table[lq]{a}",
        r#"7: expected column specification, got "lq""#,
    ),
    (r"\table[l{a}", r#"8: expected column specification, got "{""#),
];

fn parse_err(latex: &str) -> LatexError {
    match parse_latex(latex) {
        Ok(node) => panic!("problem `{latex}` did not return an error: {node:?}"),
        Err(err) => *err,
    }
}

#[test]
fn messages() {
    for (problem, expected) in PROBLEMS {
        assert_eq!(parse_err(problem).to_string(), expected, "{problem}");
    }
}

#[test]
fn spans_lie_within_the_source() {
    for (problem, _) in PROBLEMS {
        let error = parse_err(problem);
        assert!(error.0.start <= error.0.end, "{problem}");
        assert!(error.0.end <= problem.len(), "{problem}");
    }
}

#[test]
fn html() {
    let error = parse_err("x^");
    assert_eq!(
        error.to_html("x^"),
        "<i>Error: expected {, got EOF in: x^</i>"
    );
    let error = parse_err("a<b&c");
    assert_eq!(
        error.to_html("a<b&c"),
        "<i>Error: unexpected token: Ampersand(&amp;) in: a&lt;b&amp;c</i>"
    );
}

#[test]
fn reports() {
    for (problem, _) in PROBLEMS {
        let error = parse_err(problem);
        let report = error.to_report("<input>", false);
        let mut buf = Vec::new();
        report
            .write(("<input>", ariadne::Source::from(problem)), &mut buf)
            .expect("failed to write report");
        let output = String::from_utf8(buf).expect("report should be valid UTF-8");
        assert!(output.contains(&error.error_message()), "{output}");
        assert!(output.contains("<input>"), "{output}");
    }
}
