//! CoNLL-style serialization of annotated documents.
//!
//! One token per line, tab-separated: ID, FORM, LEMMA, UPOS, XPOS, FEATS,
//! HEAD, DEPREL, DEPS. FEATS joins `Name=Value` pairs with `|` in the order
//! of [`UNIVERSAL_FEATURES`]; HEAD is 1-based with `0` for root; XPOS and
//! DEPS are always `_`. Sentences are separated by a blank line and each
//! document starts with a `# newdoc id = <id>` comment.
//!
//! The format carries no character offsets, so the reader reconstructs the
//! document text by joining forms with single spaces and assigns byte spans
//! accordingly. Reading is lenient: comment lines are ignored, token lines
//! with non-integer IDs (multi-word ranges, empty nodes) are skipped
//! silently, and otherwise malformed token lines are skipped with a logged
//! warning.

use crate::annotation::{Annotation, DependencyEdge, Sentence, Token, UNIVERSAL_FEATURES};
use crate::error::Result;

const NEWDOC_PREFIX: &str = "# newdoc id =";

/// Serialize a document to CoNLL text.
#[must_use]
pub fn write_document(annotation: &Annotation) -> String {
    let mut out = String::new();
    out.push_str(NEWDOC_PREFIX);
    out.push(' ');
    out.push_str(annotation.doc_id());
    out.push('\n');
    for sentence in annotation.sentences() {
        for (i, (token, dep)) in sentence.tokens().iter().zip(sentence.deps()).enumerate() {
            let upos = if token.upos().is_empty() { "X" } else { token.upos() };
            let lemma = if token.lemma().is_empty() { "_" } else { token.lemma() };
            let deprel = if dep.deprel().is_empty() { "_" } else { dep.deprel() };
            let head = dep.head().map_or(0, |h| h + 1);
            out.push_str(&format!(
                "{}\t{}\t{}\t{}\t_\t{}\t{}\t{}\t_\n",
                i + 1,
                token.form(),
                lemma,
                upos,
                format_feats(token),
                head,
                deprel,
            ));
        }
        out.push('\n');
    }
    out
}

fn format_feats(token: &Token) -> String {
    let pairs: Vec<String> = UNIVERSAL_FEATURES
        .iter()
        .filter_map(|name| {
            token
                .feat(name)
                .filter(|value| !value.is_empty())
                .map(|value| format!("{name}={value}"))
        })
        .collect();
    if pairs.is_empty() {
        "_".to_string()
    } else {
        pairs.join("|")
    }
}

/// Parse a CoNLL document back into an [`Annotation`].
///
/// Spans are byte offsets into the reconstructed (space-joined) text.
pub fn parse_document(input: &str) -> Result<Annotation> {
    let mut doc_id = String::from("0");
    let mut text = String::new();
    let mut sentences = Vec::new();
    let mut tokens: Vec<Token> = Vec::new();
    let mut deps: Vec<DependencyEdge> = Vec::new();

    for (line_no, line) in input.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            flush_sentence(&mut tokens, &mut deps, &mut sentences)?;
            continue;
        }
        if let Some(rest) = line.strip_prefix(NEWDOC_PREFIX) {
            doc_id = rest.trim().to_string();
            continue;
        }
        if line.starts_with('#') {
            continue;
        }
        match parse_token_line(line, &mut text) {
            TokenLine::Token(token, dep) => {
                tokens.push(token);
                deps.push(dep);
            }
            TokenLine::Skip => {}
            TokenLine::Malformed(reason) => {
                log::warn!("skipping malformed CoNLL line {line_no}: {reason}");
            }
        }
    }
    flush_sentence(&mut tokens, &mut deps, &mut sentences)?;

    Ok(Annotation::new(doc_id, text, sentences))
}

enum TokenLine {
    Token(Token, DependencyEdge),
    Skip,
    Malformed(&'static str),
}

fn parse_token_line(line: &str, text: &mut String) -> TokenLine {
    let cols: Vec<&str> = line.split('\t').collect();
    if cols.len() < 8 {
        return TokenLine::Malformed("expected at least 8 tab-separated columns");
    }
    // Multi-word ranges ("1-2") and empty nodes ("1.1") are not tokens.
    if cols[0].parse::<usize>().is_err() {
        return TokenLine::Skip;
    }
    let head = match cols[6] {
        "0" | "-1" | "_" => None,
        value => match value.parse::<usize>() {
            Ok(n) if n >= 1 => Some(n - 1),
            _ => return TokenLine::Malformed("HEAD is not a non-negative integer"),
        },
    };

    let form = cols[1];
    if !text.is_empty() {
        text.push(' ');
    }
    let start = text.len();
    text.push_str(form);
    let end = text.len();

    let lemma = if cols[2] == "_" { "" } else { cols[2] };
    let deprel = if cols[7] == "_" { "" } else { cols[7] };
    let mut token = Token::new(form, lemma, cols[3], start, end);
    if cols[5] != "_" {
        for pair in cols[5].split('|') {
            if let Some((name, value)) = pair.split_once('=') {
                token = token.with_feat(name, value);
            }
        }
    }
    let dep = match head {
        Some(h) => DependencyEdge::to_parent(h, deprel),
        None => DependencyEdge::root(deprel),
    };
    TokenLine::Token(token, dep)
}

fn flush_sentence(
    tokens: &mut Vec<Token>,
    deps: &mut Vec<DependencyEdge>,
    sentences: &mut Vec<Sentence>,
) -> Result<()> {
    if tokens.is_empty() {
        deps.clear();
        return Ok(());
    }
    let sentence = Sentence::new(std::mem::take(tokens), std::mem::take(deps))?;
    sentences.push(sentence);
    Ok(())
}
