/*!
 * Common test utilities for the chapterize test suite
 */

#![allow(dead_code)]

use std::fmt::Write as _;

/// A well-formed CJK novel: `n` chapters with title lines and short bodies
pub fn cjk_chaptered_doc(n: usize) -> String {
    let mut doc = String::new();
    for i in 1..=n {
        writeln!(doc, "第{}章 风起云涌", i).unwrap();
        writeln!(doc, "这一章的正文讲述了主角的一段经历。情节在这里徐徐展开。").unwrap();
        doc.push('\n');
    }
    doc
}

/// A well-formed English novel: `n` "Chapter N" sections with bodies
pub fn english_chaptered_doc(n: usize) -> String {
    let mut doc = String::new();
    for i in 1..=n {
        writeln!(doc, "Chapter {} The Long Road", i).unwrap();
        writeln!(
            doc,
            "The body of this chapter follows the hero through another stretch of the journey."
        )
        .unwrap();
        doc.push('\n');
    }
    doc
}

/// A bare table of contents: `n` title lines, no bodies
pub fn toc_doc(n: usize) -> String {
    let mut doc = String::new();
    for i in 1..=n {
        writeln!(doc, "第{}章 风起云涌", i).unwrap();
    }
    doc
}

/// `n` prose paragraphs separated by blank lines, none of them title-shaped
pub fn paragraph_doc(n: usize) -> String {
    let mut doc = String::new();
    for i in 0..n {
        writeln!(
            doc,
            "Paragraph body number {} wanders on without any chapter heading in sight, \
             filling its lines with unremarkable prose.",
            (b'a' + (i % 26) as u8) as char
        )
        .unwrap();
        doc.push('\n');
    }
    doc
}

/// A single continuous block of sentences: no titles, no blank lines,
/// padded to exactly `len` chars
pub fn long_prose_block(len: usize) -> String {
    const SENTENCE: &str = "The quick brown fox jumps over the lazy dog and keeps running. ";
    let mut doc = String::new();
    while doc.chars().count() < len {
        doc.push_str(SENTENCE);
    }
    doc.chars().take(len).collect()
}
