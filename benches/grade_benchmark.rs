//! Benchmarks for docgrade grading performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks grade synthetic presentations built in memory.

use std::io::{Cursor, Write};

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const NS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;

/// Creates a presentation with the given number of slides.
fn create_test_deck(slide_count: usize) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    let ids: String = (1..=slide_count)
        .map(|i| format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 255 + i, i))
        .collect();
    let rels: String = (1..=slide_count)
        .map(|i| {
            format!(
                r#"<Relationship Id="rId{i}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{i}.xml"/>"#
            )
        })
        .collect();

    writer.start_file("ppt/presentation.xml", options).unwrap();
    write!(writer, r#"<p:presentation {NS}><p:sldIdLst>{ids}</p:sldIdLst></p:presentation>"#).unwrap();
    writer.start_file("ppt/_rels/presentation.xml.rels", options).unwrap();
    write!(writer, "<Relationships>{}</Relationships>", rels).unwrap();

    for i in 1..=slide_count {
        writer
            .start_file(format!("ppt/slides/slide{}.xml", i), options)
            .unwrap();
        write!(
            writer,
            r#"<p:sld {NS}><p:cSld><p:spTree><p:nvGrpSpPr/><p:grpSpPr/>
              <p:sp><p:nvSpPr><p:cNvPr id="2" name="Title"/><p:cNvSpPr/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="9144000" cy="1143000"/></a:xfrm></p:spPr>
                <p:txBody><a:bodyPr/><a:p><a:r><a:t>Slide {i}</a:t></a:r></a:p></p:txBody></p:sp>
              <p:sp><p:nvSpPr><p:cNvPr id="3" name="Content"/><p:cNvSpPr/><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr><p:spPr><a:xfrm><a:off x="0" y="1143000"/><a:ext cx="9144000" cy="5000000"/></a:xfrm></p:spPr>
                <p:txBody><a:bodyPr/>
                  <a:p><a:pPr lvl="0"><a:buChar char="•"/></a:pPr><a:r><a:rPr sz="2400"/><a:t>Point one</a:t></a:r></a:p>
                  <a:p><a:pPr lvl="1"><a:buChar char="-"/></a:pPr><a:r><a:rPr sz="2000"/><a:t>Detail</a:t></a:r></a:p>
                </p:txBody></p:sp>
            </p:spTree></p:cSld>
            <p:transition spd="med"><p:fade/></p:transition></p:sld>"#
        )
        .unwrap();
    }

    writer.finish().unwrap().into_inner()
}

/// Benchmark container detection.
fn bench_detection(c: &mut Criterion) {
    let deck = create_test_deck(1);
    let junk = b"Not an office document, just random text content";

    c.bench_function("detect_zip", |b| {
        b.iter(|| docgrade::detect::is_zip_bytes(black_box(&deck)));
    });

    c.bench_function("reject_non_zip", |b| {
        b.iter(|| docgrade::grade_bytes(black_box(junk), "junk.pptx").is_err());
    });
}

/// Benchmark feature extraction and grading at various sizes.
fn bench_grading(c: &mut Criterion) {
    let mut group = c.benchmark_group("grading");
    let grader = docgrade::Grader::new();

    for slide_count in [1, 10, 50].iter() {
        let data = create_test_deck(*slide_count);

        group.bench_function(format!("extract_{}_slides", slide_count), |b| {
            b.iter(|| grader.extract(black_box(&data), "deck.pptx").unwrap());
        });

        group.bench_function(format!("grade_{}_slides", slide_count), |b| {
            b.iter(|| grader.grade_bytes(black_box(&data), "deck.pptx").unwrap());
        });
    }

    group.finish();
}

/// Benchmark scoring an already extracted feature set.
fn bench_scoring(c: &mut Criterion) {
    let grader = docgrade::Grader::new();
    let features = grader.extract(&create_test_deck(10), "deck.pptx").unwrap();
    let rubric = grader.rubric_for(&features).unwrap();

    c.bench_function("score_10_slides", |b| {
        b.iter(|| grader.score(black_box(&features), &rubric, "deck"));
    });
}

criterion_group!(benches, bench_detection, bench_grading, bench_scoring);
criterion_main!(benches);
