//! End-to-end equation processing over whole documents.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use proptest::prelude::*;
use tempfile::TempDir;
use tola_stem::hash::content_id;
use tola_stem::prelude::*;

// =============================================================================
// Test engine
// =============================================================================

/// Records engine creation and every wrapped input it is asked to parse.
#[derive(Default)]
struct Calls {
    options: Vec<EngineOptions>,
    inputs: Vec<String>,
}

struct EchoEngine {
    options: EngineOptions,
    calls: Rc<RefCell<Calls>>,
}

impl MathEngine for EchoEngine {
    fn parse(&self, input: &str) -> Result<EngineOutput, EngineError> {
        self.calls.borrow_mut().inputs.push(input.to_owned());
        if input.contains(r"\undefined") {
            return Err(EngineError::new(r"Undefined control sequence \undefined"));
        }
        let data = match self.options.format {
            ImageFormat::Svg => format!("<svg data-ppi=\"{}\">{input}</svg>", self.options.ppi),
            ImageFormat::Png => format!("PNG {input}"),
        };
        Ok(EngineOutput {
            data: data.into_bytes(),
            width: 12.0 * input.chars().count() as f64,
            height: 30.0,
        })
    }
}

fn processor() -> (
    StemProcessor<impl Fn(&EngineOptions) -> Result<EchoEngine, EngineError>>,
    Rc<RefCell<Calls>>,
) {
    let calls = Rc::new(RefCell::new(Calls::default()));
    let shared = Rc::clone(&calls);
    let processor = StemProcessor::new(move |options: &EngineOptions| {
        shared.borrow_mut().options.push(*options);
        Ok(EchoEngine {
            options: *options,
            calls: Rc::clone(&shared),
        })
    });
    (processor, calls)
}

fn pdf_document(out: &TempDir) -> Document {
    Document::new("pdf").attr("imagesoutdir", out.path().to_string_lossy())
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn png_block_equation_becomes_centered_image() {
    let out = tempfile::tempdir().unwrap();
    let (processor, _) = processor();
    let mut doc = pdf_document(&out).block(StemBlock::new("x^2"));

    processor.run(&mut doc).unwrap();

    let expected = out.path().join(format!("{}.png", content_id("$$x^2$$")));
    let image = doc.blocks[0].as_image().expect("stem block replaced by image");
    assert_eq!(PathBuf::from(image.target()), expected);
    assert_eq!(image.alt(), Some("$$x^2$$"));
    assert_eq!(image.align(), Some("center"));
    assert_eq!(image.width(), Some("84"));
    assert_eq!(image.height(), Some("30"));
    assert_eq!(fs::read_to_string(&expected).unwrap(), "PNG $$x^2$$");
}

#[test]
fn html_prose_escapes_special_characters_before_rendering() {
    let out = tempfile::tempdir().unwrap();
    let (processor, calls) = processor();
    let mut doc = Document::new("html5")
        .attr("imagesoutdir", out.path().to_string_lossy())
        .block(Paragraph::new("area is stem:[pi r^2] when stem:[r < 1]"));

    processor.run(&mut doc).unwrap();

    assert_eq!(calls.borrow().inputs, vec!["$pi r^2$", "$r &lt; 1$"]);
    let text = doc.blocks[0].as_paragraph().unwrap().text();
    let first = out.path().join(format!("{}.png", content_id("$pi r^2$")));
    assert!(
        text.starts_with(&format!("area is image:{}[width=96,height=30]", first.display())),
        "unexpected text: {text}"
    );
}

#[test]
fn non_html_prose_keeps_special_characters() {
    let out = tempfile::tempdir().unwrap();
    let (processor, calls) = processor();
    let mut doc = pdf_document(&out).block(Paragraph::new("stem:[r < 1]"));
    processor.run(&mut doc).unwrap();
    assert_eq!(calls.borrow().inputs, vec!["$r < 1$"]);
}

#[test]
fn svg_uses_72_ppi_and_sizes_itself() {
    let out = tempfile::tempdir().unwrap();
    let (processor, calls) = processor();
    let mut doc = pdf_document(&out)
        .attr("mathematical-format", "svg")
        .attr("mathematical-ppi", "150")
        .block(StemBlock::new("e^{i pi}"));

    processor.run(&mut doc).unwrap();

    assert_eq!(calls.borrow().options[0].ppi, 72.0);
    let image = doc.blocks[0].as_image().unwrap();
    assert!(image.target().ends_with(".svg"));
    assert_eq!(image.width(), None);
    assert_eq!(image.height(), None);
    assert_eq!(file_names(out.path()).len(), 1);
}

#[test]
fn unknown_format_falls_back_to_png_with_configured_ppi() {
    let out = tempfile::tempdir().unwrap();
    let (processor, calls) = processor();
    let mut doc = pdf_document(&out)
        .attr("mathematical-format", "jpg")
        .attr("mathematical-ppi", "150")
        .block(StemBlock::new("a"));

    processor.run(&mut doc).unwrap();

    assert_eq!(
        calls.borrow().options,
        vec![EngineOptions { format: ImageFormat::Png, ppi: 150.0 }]
    );
    assert!(doc.blocks[0].as_image().unwrap().target().ends_with(".png"));
}

#[test]
fn inline_mode_embeds_markup_and_writes_nothing() {
    let out = tempfile::tempdir().unwrap();
    let (processor, _) = processor();
    let mut doc = pdf_document(&out)
        .attr("mathematical-format", "svg")
        .attr("mathematical-inline", "")
        .block(StemBlock::new("x").with_id("eq-x").with_title("Identity"))
        .block(List::new(ListKind::Unordered).item(ListItem::new("item stem:[y]")));

    let report = processor.run(&mut doc).unwrap();

    assert_eq!(report, ProcessReport { rendered: 2, written: 0, documents: 1 });
    let pass = doc.blocks[0].as_pass().unwrap();
    assert_eq!(
        pass.content,
        r#"<div class="stemblock"> <svg data-ppi="72">$$x$$</svg> </div>"#
    );
    assert_eq!(pass.title.as_deref(), Some("Identity"));
    let item = &doc.blocks[1].as_list().unwrap().items[0];
    assert_eq!(
        item.text.as_deref(),
        Some(r#"item pass:[<span class="steminline"> <svg data-ppi="72">$y$</svg> </span>]"#)
    );
    assert!(file_names(out.path()).is_empty());
}

// =============================================================================
// Naming
// =============================================================================

#[test]
fn explicit_id_always_resolves_to_the_same_path() {
    let out = tempfile::tempdir().unwrap();
    let (processor, _) = processor();
    let mut doc = pdf_document(&out)
        .block(StemBlock::new("a + b").with_id("sum"))
        .block(Section::new(1, "More").child(StemBlock::new("a - b").with_id("sum")));

    processor.run(&mut doc).unwrap();

    let first = doc.blocks[0].as_image().unwrap();
    let second = doc.blocks[1].as_section().unwrap().blocks[0].as_image().unwrap();
    assert_eq!(first.target(), second.target());
    assert!(first.target().ends_with("sum.png"));
    assert_eq!(first.id.as_deref(), Some("sum"));
    // Last write wins.
    assert_eq!(fs::read_to_string(first.target()).unwrap(), "PNG $$a - b$$");
}

#[test]
fn identical_inline_equations_share_one_artifact() {
    let out = tempfile::tempdir().unwrap();
    let (processor, calls) = processor();
    let mut doc = pdf_document(&out)
        .block(Paragraph::new("first stem:[x+y]"))
        .block(Table::new().body_row(vec![Cell::new("cell stem:[x+y]")]))
        .block(Section::new(1, "Title stem:[x+y]"));

    let report = processor.run(&mut doc).unwrap();

    assert_eq!(report.rendered, 3);
    assert_eq!(report.written, 3);
    assert_eq!(calls.borrow().inputs.len(), 3);
    assert_eq!(file_names(out.path()), vec![format!("{}.png", content_id("$x+y$"))]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_same_block_content_same_target(body in "[a-z0-9^_+= ]{0,12}[a-z0-9]") {
        let out = tempfile::tempdir().unwrap();
        let (processor, _) = processor();
        let mut doc = pdf_document(&out)
            .block(StemBlock::new(body.clone()))
            .block(Compound::new(CompoundKind::Example).child(StemBlock::new(body.clone())));

        processor.run(&mut doc).unwrap();

        let first = doc.blocks[0].as_image().unwrap().target().to_owned();
        let nested = doc.blocks[1].as_compound().unwrap().blocks[0].as_image().unwrap();
        prop_assert_eq!(first.as_str(), nested.target());
        let expected = format!("{}.png", content_id(&format!("$${body}$$")));
        prop_assert!(first.ends_with(&expected));
    }
}

// =============================================================================
// Tables and nesting
// =============================================================================

#[test]
fn literal_cells_are_never_touched() {
    let out = tempfile::tempdir().unwrap();
    let (processor, calls) = processor();
    let mut doc = pdf_document(&out).block(
        Table::new().body_row(vec![Cell::styled(CellStyle::Literal, "stem:[x^2]")]),
    );

    let report = processor.run(&mut doc).unwrap();

    assert_eq!(report.rendered, 0);
    assert!(calls.borrow().inputs.is_empty());
    let cell = &doc.blocks[0].as_table().unwrap().rows.body[0][0];
    assert_eq!(cell.text.as_deref(), Some("stem:[x^2]"));
    assert!(file_names(out.path()).is_empty());
}

#[test]
fn asciidoc_cells_run_the_full_walk() {
    let out = tempfile::tempdir().unwrap();
    let (processor, calls) = processor();
    let parent = pdf_document(&out);
    let inner = Document::nested(&parent)
        .block(StemBlock::new("inner"))
        .block(Paragraph::new("prose stem:[p]"))
        .block(Table::new().foot_row(vec![Cell::asciidoc(
            Document::new("pdf")
                .attr("imagesoutdir", out.path().to_string_lossy())
                .block(Section::new(1, "Deep stem:[d]")),
        )]));
    let mut doc = parent.block(Table::new().body_row(vec![Cell::asciidoc(inner)]));

    let report = processor.run(&mut doc).unwrap();

    assert_eq!(report.documents, 3);
    assert_eq!(report.rendered, 3);
    assert_eq!(calls.borrow().options.len(), 3);

    let inner = doc.blocks[0].as_table().unwrap().rows.body[0][0].inner.as_deref().unwrap();
    assert!(inner.blocks[0].is_image());
    assert!(inner.blocks[1].as_paragraph().unwrap().text().starts_with("prose image:"));
    let deep = inner.blocks[2].as_table().unwrap().rows.foot[0][0].inner.as_deref().unwrap();
    assert!(deep.blocks[0].as_section().unwrap().title().unwrap().starts_with("Deep image:"));
}

// =============================================================================
// Escapes, failures and the pipeline
// =============================================================================

#[test]
fn escaped_macros_lose_their_backslash() {
    let out = tempfile::tempdir().unwrap();
    let (processor, calls) = processor();
    let mut doc = pdf_document(&out)
        .block(Paragraph::new(r"type \stem:[x] to get stem:[x]"))
        .block(Paragraph::new(r"only \latexmath:[y] here"));

    processor.run(&mut doc).unwrap();

    let first = doc.blocks[0].as_paragraph().unwrap().text();
    assert!(first.starts_with("type stem:[x] to get image:"), "{first}");
    let second = doc.blocks[1].as_paragraph().unwrap().text();
    assert_eq!(second, "only latexmath:[y] here");
    assert_eq!(calls.borrow().inputs, vec!["$x$"]);
}

#[test]
fn render_failure_aborts_the_document() {
    let out = tempfile::tempdir().unwrap();
    let (processor, _) = processor();
    let mut doc = pdf_document(&out)
        .block(Paragraph::new(r"bad stem:[\undefined]"))
        .block(Section::new(1, "Later stem:[z]"));

    let err = processor.run(&mut doc).unwrap_err();

    match err {
        StemError::Engine { input, .. } => assert_eq!(input, r"$\undefined$"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(doc.blocks[1].as_section().unwrap().title(), Some("Later stem:[z]"));
}

#[test]
fn unwritable_output_directory_is_fatal() {
    let out = tempfile::tempdir().unwrap();
    let blocker = out.path().join("occupied");
    fs::write(&blocker, b"").unwrap();
    let (processor, _) = processor();
    let mut doc = Document::new("pdf")
        .attr("imagesoutdir", blocker.join("images").to_string_lossy())
        .block(StemBlock::new("x"));

    let err = processor.run(&mut doc).unwrap_err();
    assert!(matches!(err, StemError::CreateDir { .. }));
}

#[test]
fn pipeline_runs_only_for_pdf() {
    let out = tempfile::tempdir().unwrap();
    let (processor, calls) = processor();

    let html = Pipeline::new(Document::new("html5").block(StemBlock::new("x")))
        .pipe(&processor)
        .unwrap()
        .into_inner();
    assert!(html.blocks[0].is_stem());
    assert!(calls.borrow().options.is_empty());

    let pdf = Pipeline::new(pdf_document(&out).block(StemBlock::new("x")))
        .pipe_if(processor.applies_to(&Document::new("pdf")), &processor)
        .unwrap()
        .into_inner();
    assert!(pdf.blocks[0].is_image());
    assert_eq!(pdf.collect_stats().image_count, 1);
}

#[test]
fn images_follow_outdir_and_imagesdir() {
    let root = tempfile::tempdir().unwrap();
    let (processor, _) = processor();
    let mut doc = Document::new("pdf")
        .with_base_dir(root.path())
        .with_to_dir("site")
        .attr("imagesdir", "img")
        .block(StemBlock::new("x"));

    processor.run(&mut doc).unwrap();

    let dir = root.path().join("site").join("img");
    assert_eq!(file_names(&dir), vec![format!("{}.png", content_id("$$x$$"))]);
}
