use super::*;

fn kinds<'a>(tokens: &[Token<'a>]) -> Vec<(&'a str, TokenKind)> {
    tokens.iter().map(|t| (t.text, t.kind)).collect()
}

fn joined(tokens: &[Token<'_>]) -> String {
    tokens.iter().map(|t| t.text).collect()
}

#[test]
fn function_signature_is_classified() {
    let tokens = classify("def forward(self, idx, targets=None):");
    assert_eq!(
        kinds(&tokens),
        vec![
            ("def", TokenKind::Keyword),
            (" ", TokenKind::Plain),
            ("forward", TokenKind::Plain),
            ("(", TokenKind::Plain),
            ("self", TokenKind::Constant),
            (",", TokenKind::Plain),
            (" ", TokenKind::Plain),
            ("idx", TokenKind::Plain),
            (",", TokenKind::Plain),
            (" ", TokenKind::Plain),
            ("targets", TokenKind::Plain),
            ("=", TokenKind::Plain),
            ("None", TokenKind::Constant),
            (")", TokenKind::Plain),
            (":", TokenKind::Plain),
        ]
    );
}

#[test]
fn numbers_decorators_and_comments() {
    let t = classify("@torch.no_grad()");
    assert_eq!(t[0].kind, TokenKind::Decorator);
    assert_eq!(t[0].text, "@torch");

    let t = classify("n_layer = 36");
    assert_eq!(t.last().unwrap().kind, TokenKind::Number);

    // The dot is a delimiter, so a float is three fragments.
    let t = classify("dropout = 0.2");
    assert_eq!(
        kinds(&t[4..]),
        vec![
            ("0", TokenKind::Number),
            (".", TokenKind::Plain),
            ("2", TokenKind::Number),
        ]
    );

    let t = classify("    # keep frequent");
    assert_eq!(t[0].text, "    ");
    assert_eq!(t[1], Token {
        text: "#",
        kind: TokenKind::Comment
    });
}

#[test]
fn keyword_beats_later_rules() {
    // "in" is a keyword even though nothing else would match it.
    assert_eq!(classify("in")[0].kind, TokenKind::Keyword);
    // Identifiers that merely contain a keyword stay plain.
    assert_eq!(classify("index")[0].kind, TokenKind::Plain);
    assert_eq!(classify("elif")[0].kind, TokenKind::Keyword);
}

#[test]
fn single_word_string_is_highlighted() {
    let t = classify("dataset = 'shakespeare_char'");
    assert_eq!(t.last().unwrap().kind, TokenKind::String);
}

#[test]
fn multi_word_string_loses_highlighting_per_fragment() {
    // Classification is per fragment, not per line: the opening and closing halves of a
    // spaced literal are not quoted on their own, so neither half is a String.
    let t = classify("print('hello world')");
    let texts: Vec<&str> = t.iter().map(|t| t.text).collect();
    assert_eq!(texts, vec!["print", "(", "'hello", " ", "world'", ")"]);
    assert!(t.iter().all(|t| t.kind != TokenKind::String));
}

#[test]
fn concatenation_reproduces_any_line() {
    let lines = [
        "",
        " ",
        "x",
        "loss = F.cross_entropy(logits.view(-1, logits.size(-1)), targets.view(-1))",
        "\tif  iter_num % eval_interval == 0 and master_process:",
        "    \"\"\"docstring\"\"\"  ",
        "a→b ✓ {[<>]} */+-",
        "@dataclass\r",
    ];
    for line in lines {
        let tokens = classify(line);
        assert_eq!(joined(&tokens), line);
        assert!(tokens.iter().all(|t| !t.text.is_empty()));
    }
}

#[test]
fn block_keeps_line_structure() {
    let code = "import torch\n\nclass GPT:";
    let lines = highlight_block(code);
    assert_eq!(lines.len(), 3);
    assert!(lines[1].is_empty());
    assert_eq!(lines[2][0].kind, TokenKind::Keyword);
}

#[test]
fn palette_is_stable() {
    assert_eq!(TokenKind::Keyword.color().to_hex(), "#c586c0");
    assert_eq!(TokenKind::Plain.color().to_hex(), "#d4d4d4");
}
