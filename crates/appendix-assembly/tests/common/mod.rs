//! Shared fixtures: tagged PDFs and converters that stand in for LibreOffice.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use appendix_assembly::{AssemblyObserver, AssemblyPhase};
use appendix_convert::{ConvertError, DocumentConverter};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

/// A document of `pages` pages tagged `"{tag}:{index}"`.
pub fn tagged_document(tag: &str, pages: usize) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut kids = Vec::new();
    for index in 0..pages {
        let label = format!("{tag}:{index}");
        let content = Content {
            operations: vec![Operation::new("BT", vec![]), Operation::new("ET", vec![])],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Tag" => Object::string_literal(label),
        });
        kids.push(Object::Reference(page_id));
    }
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

pub fn write_tagged(dir: &Path, name: &str, tag: &str, pages: usize) -> PathBuf {
    let path = dir.join(name);
    tagged_document(tag, pages)
        .save(&path)
        .expect("save fixture");
    path
}

/// Tags of every page of the PDF at `path`, in page order.
pub fn page_tags(path: &Path) -> Vec<String> {
    let doc = Document::load(path).expect("load output");
    doc.get_pages()
        .values()
        .map(|&id| {
            let page = doc.get_object(id).unwrap().as_dict().unwrap();
            match page.get(b"Tag").unwrap() {
                Object::String(bytes, _) => String::from_utf8_lossy(bytes).into_owned(),
                other => panic!("unexpected tag object {other:?}"),
            }
        })
        .collect()
}

fn stem(path: &Path) -> String {
    path.file_stem().unwrap().to_string_lossy().into_owned()
}

/// Produces a PDF tagged with the input's file stem: one page for title
/// pages, two pages for anything else. Optionally fails on one input.
#[derive(Default)]
pub struct TaggingConverter {
    fail_on: Option<String>,
    inputs: Mutex<Vec<String>>,
}

impl TaggingConverter {
    pub fn failing_on(stem: &str) -> Self {
        Self {
            fail_on: Some(stem.to_string()),
            ..Self::default()
        }
    }

    /// File stems converted so far, in call order.
    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

impl DocumentConverter for TaggingConverter {
    fn convert(&self, input: &Path, destination: &Path) -> Result<(), ConvertError> {
        let tag = stem(input);
        self.inputs.lock().unwrap().push(tag.clone());
        if self.fail_on.as_deref() == Some(tag.as_str()) {
            return Err(ConvertError::failed(input, "simulated failure"));
        }
        let pages = if tag.starts_with("title_") { 1 } else { 2 };
        tagged_document(&tag, pages)
            .save(destination)
            .map_err(|error| ConvertError::failed(input, error.to_string()))?;
        Ok(())
    }
}

/// A converter whose program cannot be started.
pub struct MissingTool;

impl DocumentConverter for MissingTool {
    fn convert(&self, _input: &Path, _destination: &Path) -> Result<(), ConvertError> {
        Err(ConvertError::ToolUnavailable {
            program: "soffice".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        })
    }
}

/// Answers the location question with a fixed value and records phases.
pub struct FixedLocation {
    pub location: Option<PathBuf>,
    pub phases: Vec<AssemblyPhase>,
    pub asked_with: Option<PathBuf>,
}

impl FixedLocation {
    pub fn new(location: Option<PathBuf>) -> Self {
        Self {
            location,
            phases: Vec::new(),
            asked_with: None,
        }
    }
}

impl AssemblyObserver for FixedLocation {
    fn phase(&mut self, phase: AssemblyPhase) {
        self.phases.push(phase);
    }

    fn output_location(&mut self, suggested: &Path) -> Option<PathBuf> {
        self.asked_with = Some(suggested.to_path_buf());
        self.location.clone()
    }
}

/// True when `dir` has no entries.
pub fn is_empty_dir(dir: &Path) -> bool {
    std::fs::read_dir(dir).unwrap().next().is_none()
}
