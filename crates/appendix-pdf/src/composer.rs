//! Document composition.
//!
//! Each append clones the source document, renumbers its objects past the
//! ids already in use, and moves every non-structural object into the output.
//! Catalogs, page-tree nodes and outlines of the sources are dropped; the
//! composer writes a single catalog and a flat page tree when it finishes.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use tracing::{debug, warn};

use crate::error::{PdfError, Result};
use crate::source::SourcePdf;

/// Page attributes that a page may inherit from its ancestors.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Object types that belong to a source's document structure.
const STRUCTURAL: [&[u8]; 4] = [b"Catalog", b"Pages", b"Outlines", b"Outline"];

/// Builds a new PDF from pages of other PDFs, in append order.
pub struct PdfComposer {
    document: Document,
    pages_id: ObjectId,
    pages: Vec<ObjectId>,
}

impl Default for PdfComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfComposer {
    pub fn new() -> Self {
        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();
        Self {
            document,
            pages_id,
            pages: Vec::new(),
        }
    }

    /// Pages appended so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Append every page of `source` in natural order.
    pub fn append_document(&mut self, source: &SourcePdf) -> Result<usize> {
        let all: Vec<usize> = (0..source.page_count()).collect();
        self.import(source, &all)
    }

    /// Append the pages at zero-based `indices`, in the order given.
    ///
    /// Indices past the end of `source` are skipped. Returns the number of
    /// pages appended.
    pub fn append_pages(&mut self, source: &SourcePdf, indices: &[usize]) -> Result<usize> {
        let available = source.page_count();
        let (kept, skipped): (Vec<usize>, Vec<usize>) =
            indices.iter().copied().partition(|&index| index < available);
        if !skipped.is_empty() {
            warn!(
                path = %source.path().display(),
                available,
                ?skipped,
                "skipping pages past the end of the source"
            );
        }
        self.import(source, &kept)
    }

    fn import(&mut self, source: &SourcePdf, indices: &[usize]) -> Result<usize> {
        let mut document = source.document().clone();
        document.renumber_objects_with(self.document.max_id + 1);

        let page_ids: Vec<ObjectId> = document.get_pages().into_values().collect();
        if page_ids.len() != source.page_count() {
            return Err(PdfError::malformed(
                source.path(),
                "page tree changed while renumbering",
            ));
        }
        let selected: Vec<ObjectId> = indices.iter().map(|&index| page_ids[index]).collect();

        let mut pages = Vec::with_capacity(selected.len());
        for &page_id in &selected {
            let page = materialize_page(&document, page_id, self.pages_id).ok_or_else(|| {
                PdfError::malformed(
                    source.path(),
                    format!("page object {page_id:?} is not a dictionary"),
                )
            })?;
            pages.push((page_id, page));
        }

        let all_pages: BTreeSet<ObjectId> = page_ids.into_iter().collect();
        let max_id = document.max_id;
        for (id, object) in document.objects {
            if all_pages.contains(&id) || is_structural(&object) {
                continue;
            }
            self.document.objects.insert(id, object);
        }
        for (id, page) in pages {
            self.document.objects.insert(id, Object::Dictionary(page));
        }
        self.document.max_id = self.document.max_id.max(max_id);
        self.pages.extend(&selected);

        debug!(
            path = %source.path().display(),
            appended = selected.len(),
            total = self.pages.len(),
            "pages appended"
        );
        Ok(selected.len())
    }

    /// Close the page tree and return the composed document.
    pub fn finish(mut self) -> Document {
        let kids: Vec<Object> = self.pages.iter().map(|&id| Object::Reference(id)).collect();
        let count = kids.len() as i64;
        self.document.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.document.trailer.set("Root", catalog_id);
        self.document.compress();
        self.document
    }

    /// Finish and serialize into `writer`. Returns the page count.
    pub fn write_to<W: Write>(self, writer: &mut W) -> Result<usize> {
        let pages = self.pages.len();
        let mut document = self.finish();
        document.save_to(writer).map_err(PdfError::Write)?;
        Ok(pages)
    }

    /// Finish and write to `path`. Returns the page count.
    pub fn save(self, path: &Path) -> Result<usize> {
        let mut writer = BufWriter::new(File::create(path)?);
        let pages = self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(pages)
    }
}

fn is_structural(object: &Object) -> bool {
    object
        .as_dict()
        .ok()
        .and_then(|dict| dict.get(b"Type").ok())
        .and_then(|kind| kind.as_name().ok())
        .is_some_and(|kind| STRUCTURAL.iter().any(|&structural| structural == kind))
}

/// Copy of the page dictionary, re-parented under `parent`, with inherited
/// attributes resolved from the source page tree.
fn materialize_page(
    document: &Document,
    page_id: ObjectId,
    parent: ObjectId,
) -> Option<Dictionary> {
    let mut page = document.get_object(page_id).ok()?.as_dict().ok()?.clone();
    for key in INHERITABLE {
        if page.has(key) {
            continue;
        }
        if let Some(value) = inherited(document, &page, key) {
            page.set(key, value);
        }
    }
    page.set("Parent", parent);
    Some(page)
}

fn inherited(document: &Document, page: &Dictionary, key: &[u8]) -> Option<Object> {
    let mut node_ref = page.get(b"Parent").ok()?.as_reference().ok()?;
    // Bounded walk; malformed trees can contain cycles.
    for _ in 0..64 {
        let node = document.get_object(node_ref).ok()?.as_dict().ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
        node_ref = node.get(b"Parent").ok()?.as_reference().ok()?;
    }
    None
}
