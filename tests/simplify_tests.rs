use bibtex_simplifier::{
    AbbrevMode, DiscardWarnings, Error, Simplifier, VenueDictionary, WarningLog,
};
use pretty_assertions::assert_eq;

fn simplifier() -> Simplifier {
    Simplifier::new(VenueDictionary::load_default().unwrap())
}

const ICLR_ENTRY: &str = r#"@inproceedings{k, title={Efficient Estimation of Word Representations in Vector Space}, author="A and B", booktitle="Proceedings of the 1st International Conference on Learning Representations", year="2013", url="https://arxiv.org/abs/1301.3781"}"#;

#[test]
fn default_dictionary_loads_from_resources() {
    let dict = VenueDictionary::load_default().unwrap();
    assert!(!dict.is_empty());
    assert_eq!(
        dict.lookup("International Conference on Learning Representations"),
        Some("ICLR")
    );
    assert_eq!(
        dict.lookup("Transactions of the Association for Computational Linguistics"),
        Some("TACL")
    );
}

#[test]
fn inproceedings_with_dictionary_abbreviation() {
    let mut log = WarningLog::new();
    let out = simplifier().simplify(ICLR_ENTRY, None, &mut log).unwrap();

    assert_eq!(
        out,
        "@inproceedings{k,\n\
         \x20   title = {{Efficient Estimation of Word Representations in Vector Space}},\n\
         \x20   author = \"A and\n      B\",\n\
         \x20   booktitle = \"Proc. of ICLR\",\n\
         \x20   booktitle = \"Proceedings of the 1st International Conference on Learning Representations\",\n\
         \x20   year = \"2013\",\n\
         \x20   url = \"https://arxiv.org/abs/1301.3781\",\n\
         }"
    );
    assert!(log.is_empty(), "unexpected warnings: {:?}", log.messages());
}

#[test]
fn abbreviation_mode_coverage() {
    let s = simplifier();

    let both = s.simplify(ICLR_ENTRY, None, &mut DiscardWarnings).unwrap();
    assert_eq!(both.matches("booktitle = ").count(), 2);
    let short_pos = both.find("Proc. of ICLR").unwrap();
    let long_pos = both.find("Proceedings of the 1st").unwrap();
    assert!(short_pos < long_pos, "short line must come first");

    let short = s
        .clone()
        .with_mode(AbbrevMode::Short)
        .simplify(ICLR_ENTRY, None, &mut DiscardWarnings)
        .unwrap();
    assert_eq!(short.matches("booktitle = ").count(), 1);
    assert!(short.contains("booktitle = \"Proc. of ICLR\","));

    let long = s
        .clone()
        .with_mode(AbbrevMode::Long)
        .simplify(ICLR_ENTRY, None, &mut DiscardWarnings)
        .unwrap();
    assert_eq!(long.matches("booktitle = ").count(), 1);
    assert!(long.contains(
        "booktitle = \"Proceedings of the 1st International Conference on Learning Representations\","
    ));
}

#[test]
fn rerender_is_idempotent_in_every_mode() {
    for mode in [AbbrevMode::Short, AbbrevMode::Long, AbbrevMode::Both] {
        let s = simplifier().with_mode(mode);
        let once = s.simplify(ICLR_ENTRY, None, &mut DiscardWarnings).unwrap();
        let twice = s.simplify(&once, None, &mut DiscardWarnings).unwrap();
        assert_eq!(once, twice, "mode {mode:?} is not idempotent");
    }
}

#[test]
fn journal_volume_clause_is_stripped_before_lookup() {
    let raw = r#"@article{p, title={a paper about embeddings}, author={A}, journal={Transactions of the Association for Computational Linguistics, Volume 4}, year={2016}}"#;
    let out = simplifier().simplify(raw, None, &mut DiscardWarnings).unwrap();

    assert!(out.contains("journal = \"TACL\","));
    assert!(out.contains(
        "journal = \"Transactions of the Association for Computational Linguistics\","
    ));
    assert!(!out.contains("Volume 4"));
    assert!(out.contains("title = {{A Paper About Embeddings}},"));
}

#[test]
fn single_word_venue_never_duplicates() {
    let raw = r#"@article{n, title={a finding}, author={A}, journal={Nature}, year={2024}}"#;
    for mode in [AbbrevMode::Short, AbbrevMode::Long, AbbrevMode::Both] {
        let out = simplifier()
            .with_mode(mode)
            .simplify(raw, None, &mut DiscardWarnings)
            .unwrap();
        assert_eq!(out.matches("journal = ").count(), 1, "mode {mode:?}");
        assert!(out.contains("journal = \"Nature\","));
    }
}

#[test]
fn slack_pasted_url_is_cleaned() {
    let raw = r#"@article{g, title={a title}, author={A}, journal={Nature}, url={<https://aclanthology.org/D14-1162/|https://aclanthology.org/D14-1162/>}}"#;
    let out = simplifier().simplify(raw, None, &mut DiscardWarnings).unwrap();
    assert!(out.contains("url = \"https://aclanthology.org/D14-1162\","));
}

#[test]
fn latex_title_keeps_braces_and_quotes() {
    let raw = r#"@inproceedings{t, title = {A Title with {\a} LaTeX command}, author = {Author Name}, booktitle = {Conference}, year = {2024}}"#;
    let mut log = WarningLog::new();
    let out = simplifier().simplify(raw, None, &mut log).unwrap();

    assert!(out.contains(r#"title = "A Title with {\a} LaTeX command","#));
    assert!(!out.contains("title = {{"));
    assert_eq!(log.len(), 1);
    assert!(log.messages()[0].contains(r"{\a}"));
}

#[test]
fn malformed_block_is_skipped_but_document_continues() {
    let raw = "@article{bad, title = {Unclosed,\n  author = {Someone}\n\n% comment lines here\n% more comments\n\n@article{good,\n  title = {a study of things},\n  author = {Jane Doe},\n  journal = {Nature},\n  year = {2024}\n}\n";
    let mut log = WarningLog::new();
    let out = simplifier().simplify(raw, None, &mut log).unwrap();

    // comments survive verbatim, malformed entry is gone, good entry renders
    assert!(out.contains("% comment lines here\n% more comments\n"));
    assert!(!out.contains("Unclosed"));
    assert!(out.contains("@article{good,"));
    assert!(out.contains("title = {{A Study of Things}},"));

    assert_eq!(log.len(), 1);
    assert!(log.messages()[0].contains("@article{bad, title = {Unclosed,"));
}

#[test]
fn passthrough_text_is_byte_identical() {
    let raw = format!("Check this out:\n{ICLR_ENTRY}\nthanks!");
    let out = simplifier().simplify(&raw, None, &mut DiscardWarnings).unwrap();
    assert!(out.starts_with("Check this out:\n@inproceedings{k,"));
    assert!(out.ends_with("}\nthanks!"));
}

#[test]
fn duplicate_field_keeps_longest_value() {
    let raw = r#"@inproceedings{d, title={a title}, author={A}, booktitle={Venue}, booktitle={Proceedings of the 1st International Conference on Learning Representations}, year={2013}}"#;
    let out = simplifier().simplify(raw, None, &mut DiscardWarnings).unwrap();
    assert!(out.contains("booktitle = \"Proc. of ICLR\","));
    assert!(!out.contains("\"Venue\""));
}

#[test]
fn arxiv_entry_renders_minimal_article() {
    let raw = r#"@misc{vaswani2017, title={Attention Is All You Need}, author={Ashish Vaswani and Noam Shazeer}, eprint={1706.03762}, year={2017}, url={https://arxiv.org/abs/1706.03762}}"#;
    let out = simplifier().simplify(raw, None, &mut DiscardWarnings).unwrap();

    assert_eq!(
        out,
        "@article{vaswani2017,\n\
         \x20   title = {{Attention Is All You Need}},\n\
         \x20   author = \"Ashish Vaswani and Noam Shazeer\",\n\
         \x20   journal = \"arXiv:1706.03762\",\n\
         \x20   year = \"2017\",\n\
         \x20   url = \"https://arxiv.org/abs/1706.03762\",\n\
         }"
    );
}

#[test]
fn arxiv_detection_outranks_article_type() {
    let raw = r#"@article{x, title={a title}, author={A}, journal={arXiv preprint arXiv:1234.5678}, eprint={1234.5678}, year={2020}}"#;
    let out = simplifier().simplify(raw, None, &mut DiscardWarnings).unwrap();
    assert!(out.contains("journal = \"arXiv:1234.5678\","));
    // the arXiv renderer has no volume/pages slots
    assert!(!out.contains("journal = \"arXiv preprint"));
}

#[test]
fn arxiv_rerender_is_idempotent() {
    let raw = r#"@misc{m, title={Attention Is All You Need}, author={A}, eprint={1706.03762}, year={2017}}"#;
    let s = simplifier();
    let once = s.simplify(raw, None, &mut DiscardWarnings).unwrap();
    let twice = s.simplify(&once, None, &mut DiscardWarnings).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn lowercase_arxiv_url_does_not_reroute_conference_paper() {
    // ICLR_ENTRY carries an arxiv.org URL but no `arXiv` token
    let out = simplifier()
        .simplify(ICLR_ENTRY, None, &mut DiscardWarnings)
        .unwrap();
    assert!(out.starts_with("@inproceedings{k,"));
}

#[test]
fn unsupported_entry_type_is_fatal() {
    let raw = r#"@book{b, title={T}, author={A}, publisher={P}, year={2000}}"#;
    let err = simplifier()
        .simplify(raw, None, &mut DiscardWarnings)
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedEntryType(ty) if ty == "book"));
}

#[test]
fn missing_required_fields_all_named() {
    let raw = r#"@article{m, title={T}, year={2000}}"#;
    let err = simplifier()
        .simplify(raw, None, &mut DiscardWarnings)
        .unwrap_err();
    match err {
        Error::MissingRequiredField { entry_type, fields } => {
            assert_eq!(entry_type, "article");
            assert_eq!(fields, ["author", "journal"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn initials_fallback_warns_once() {
    let raw = r#"@inproceedings{w, title={a title}, author={A}, booktitle={Workshop on Wonderful Widgets}, year={2024}}"#;
    let mut log = WarningLog::new();
    let out = simplifier().simplify(raw, None, &mut log).unwrap();

    assert!(out.contains("booktitle = \"Proc. of WWW\","));
    assert!(out.contains("booktitle = \"Workshop on Wonderful Widgets\","));
    assert_eq!(log.len(), 1);
    assert!(log.messages()[0].contains("WWW"));
}

#[test]
fn new_key_override_applies_to_single_entry() {
    let out = simplifier()
        .simplify(ICLR_ENTRY, Some("mikolov2013"), &mut DiscardWarnings)
        .unwrap();
    assert!(out.starts_with("@inproceedings{mikolov2013,"));
}

#[test]
fn new_key_with_multiple_entries_is_invalid() {
    let raw = format!("{ICLR_ENTRY}\n\n{ICLR_ENTRY}");
    let err = simplifier()
        .simplify(&raw, Some("k2"), &mut DiscardWarnings)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn directives_pass_through_untouched() {
    let raw = format!(
        "@comment{{internal note}}\n@string{{acl = \"ACL\"}}\n{ICLR_ENTRY}"
    );
    let out = simplifier().simplify(&raw, None, &mut DiscardWarnings).unwrap();
    assert!(out.starts_with("@comment{internal note}\n@string{acl = \"ACL\"}\n"));
}

#[test]
fn prose_only_document_is_no_entries() {
    let err = simplifier()
        .simplify("no citations here, sorry", None, &mut DiscardWarnings)
        .unwrap_err();
    assert!(matches!(err, Error::NoEntriesFound));
}
