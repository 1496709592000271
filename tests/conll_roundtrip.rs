//! On-disk CoNLL interchange tests.

use std::fs;

use razbor::prelude::*;
use razbor::{parse_document, write_document};

fn fixture() -> Annotation {
    let sentence = Sentence::new(
        vec![
            Token::new("Мама", "мама", "NOUN", 0, 8)
                .with_feat("Animacy", "Anim")
                .with_feat("Case", "Nom"),
            Token::new("мыла", "мыть", "VERB", 9, 17)
                .with_feat("Aspect", "Imp")
                .with_feat("Tense", "Past"),
            Token::new("раму", "рама", "NOUN", 18, 26).with_feat("Case", "Acc"),
            Token::new(".", ".", "PUNCT", 26, 27),
        ],
        vec![
            DependencyEdge::to_parent(1, "nsubj"),
            DependencyEdge::root("root"),
            DependencyEdge::to_parent(1, "obj"),
            DependencyEdge::to_parent(1, "punct"),
        ],
    )
    .unwrap();
    Annotation::new("washing", "Мама мыла раму.", vec![sentence])
}

const GOLDEN: &str = "# newdoc id = washing
1	Мама	мама	NOUN	_	Animacy=Anim|Case=Nom	2	nsubj	_
2	мыла	мыть	VERB	_	Aspect=Imp|Tense=Past	0	root	_
3	раму	рама	NOUN	_	Case=Acc	2	obj	_
4	.	.	PUNCT	_	_	2	punct	_

";

#[test]
fn golden_document_text() {
    assert_eq!(write_document(&fixture()), GOLDEN);
}

#[test]
fn survives_a_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("washing.conll");
    fs::write(&path, write_document(&fixture())).unwrap();

    let reparsed = parse_document(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(reparsed.doc_id(), "washing");
    assert_eq!(reparsed.text(), "Мама мыла раму .");

    let sentence = &reparsed.sentences()[0];
    assert_eq!(sentence.len(), 4);
    assert_eq!(sentence.token(0).unwrap().feat("Case"), Some("Nom"));
    assert_eq!(sentence.token(1).unwrap().feat("Tense"), Some("Past"));
    assert_eq!(sentence.dep(0).unwrap().head(), Some(1));
    assert_eq!(sentence.dep(1).unwrap().head(), None);
    assert_eq!(sentence.dep(3).unwrap().deprel(), "punct");
}

#[test]
fn reparsed_spans_address_the_reconstructed_text() {
    let reparsed = parse_document(&write_document(&fixture())).unwrap();
    let text = reparsed.text().to_string();
    for token in reparsed.flat_tokens() {
        assert_eq!(&text[token.start()..token.end()], token.form());
    }
}

#[test]
fn writing_is_deterministic_after_a_round_trip() {
    let once = parse_document(GOLDEN).unwrap();
    assert_eq!(write_document(&once), GOLDEN);
}
