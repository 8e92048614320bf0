// src/fixtures.rs
// Realistic citation inputs shared by benches (via include!) and examples.

/// Conference paper as exported by the ACL Anthology, with a
/// Slack-mangled URL
pub static INPROCEEDINGS_ENTRY: &str = r#"@inproceedings{mikolov2013efficient,
    title = {Efficient Estimation of Word Representations in Vector Space},
    author = "Tomas Mikolov and Kai Chen and Greg Corrado and Jeffrey Dean",
    booktitle = "Proceedings of the 1st International Conference on Learning Representations",
    pages = "1--12",
    year = "2013",
    url = "<https://arxiv.org/abs/1301.3781|https://arxiv.org/abs/1301.3781>"
}"#;

/// Journal article with a volume-suffixed venue and duplicate fields
/// from a hand-merged export
pub static ARTICLE_ENTRY: &str = r#"@article{bojanowski2017enriching,
    title = {Enriching Word Vectors with Subword Information},
    author = {Piotr Bojanowski and Edouard Grave and Armand Joulin and Tomas Mikolov},
    journal = {Transactions of the Association for Computational Linguistics, Volume 5},
    journal = {TACL},
    volume = {5},
    pages = {135--146},
    year = {2017}
}"#;

/// arXiv preprint under a misc tag
pub static ARXIV_ENTRY: &str = r#"@misc{vaswani2017attention,
    title = {Attention Is All You Need},
    author = {Ashish Vaswani and Noam Shazeer and Niki Parmar},
    eprint = {1706.03762},
    archivePrefix = {arXiv},
    year = {2017},
    url = {https://arxiv.org/abs/1706.03762}
}"#;

/// A chat message: prose, two entries, a comment line between them
pub static MIXED_DOCUMENT: &str = r#"here are the two refs we discussed:

@inproceedings{pennington2014glove,
    title = {{GloVe}: Global Vectors for Word Representation},
    author = "Jeffrey Pennington and Richard Socher and Christopher Manning",
    booktitle = "Proceedings of the 2014 Conference on Empirical Methods in Natural Language Processing (EMNLP)",
    pages = "1532--1543",
    year = "2014",
    url = "https://aclanthology.org/D14-1162/"
}

% the second one is a journal paper
@article{hochreiter1997long,
    title = {Long Short-Term Memory},
    author = {Sepp Hochreiter and J{\"u}rgen Schmidhuber},
    journal = {Neural Computation},
    volume = {9},
    number = {8},
    pages = {1735--1780},
    year = {1997}
}
"#;

/// Venue pairs matching the shipped `resources/venue_names.json` subset
/// that the fixtures above exercise
pub fn fixture_venues() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "International Conference on Learning Representations",
            "ICLR",
        ),
        (
            "Conference on Empirical Methods in Natural Language Processing",
            "EMNLP",
        ),
        (
            "Transactions of the Association for Computational Linguistics",
            "TACL",
        ),
        ("Neural Computation", "Neural Computation"),
    ]
}
