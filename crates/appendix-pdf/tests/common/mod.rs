//! Fixture PDFs whose pages carry a `/Tag` string, so tests can follow pages
//! through composition.

use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

/// A document of `pages` pages tagged `"{tag}:{index}"`. Resources and
/// MediaBox live on the page tree root, so pages depend on inheritance.
pub fn tagged_document(tag: &str, pages: usize) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let mut kids = Vec::new();
    for index in 0..pages {
        let label = format!("{tag}:{index}");
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), Object::Integer(24)]),
                Operation::new("Td", vec![Object::Integer(72), Object::Integer(720)]),
                Operation::new("Tj", vec![Object::string_literal(label.clone())]),
                Operation::new("ET", vec![]),
            ],
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
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(595),
                Object::Integer(842),
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

/// A three-page document tagged `"{tag}:{index}"` whose pages sit under an
/// intermediate Pages node. Resources live on the intermediate node while
/// MediaBox and `Rotate 90` live on the root.
pub fn nested_document(tag: &str) -> Document {
    let mut doc = Document::with_version("1.5");
    let root_id = doc.new_object_id();
    let inner_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let kids: Vec<Object> = (0..3)
        .map(|index| {
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => inner_id,
                "Tag" => Object::string_literal(format!("{tag}:{index}")),
            });
            Object::Reference(page_id)
        })
        .collect();
    doc.objects.insert(
        inner_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Parent" => root_id,
            "Kids" => kids,
            "Count" => 3,
            "Resources" => resources_id,
        }),
    );
    doc.objects.insert(
        root_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(inner_id)],
            "Count" => 3,
            "Rotate" => 90,
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
        "Pages" => root_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Write a tagged document to `dir/name` and return its path.
pub fn write_tagged(dir: &Path, name: &str, tag: &str, pages: usize) -> PathBuf {
    let path = dir.join(name);
    tagged_document(tag, pages)
        .save(&path)
        .expect("save fixture");
    path
}

/// Tags of every page, in page order.
pub fn page_tags(doc: &Document) -> Vec<String> {
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
