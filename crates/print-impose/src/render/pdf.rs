//! lopdf-backed page source and sheet renderer
//!
//! Each source page becomes a Form XObject in the output document, created
//! once and reused by every placement of that page. Sheets are assembled in
//! memory and turned into output pages by [`PdfSheetRenderer::finish`].

use std::collections::HashMap;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::layout::PageBox;
use crate::transform::Transform;
use crate::types::{ImposeError, Result};

use super::{PageGeometrySource, SheetRenderer};

/// Inheritable page attributes are searched this many levels up the page tree
const MAX_INHERIT_DEPTH: usize = 32;

// =============================================================================
// Page Source
// =============================================================================

/// The pages of a loaded document, in reading order
#[derive(Debug, Clone)]
pub struct PdfPageSource {
    document: Document,
    pages: Vec<ObjectId>,
}

impl PdfPageSource {
    pub fn new(document: Document) -> Result<Self> {
        let pages: Vec<ObjectId> = document.get_pages().values().copied().collect();
        if pages.is_empty() {
            return Err(ImposeError::NoPages);
        }
        Ok(Self { document, pages })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn pages(&self) -> &[ObjectId] {
        &self.pages
    }

    /// One box per page, sized from its MediaBox
    pub fn page_boxes(&self) -> Result<Vec<PageBox>> {
        self.pages
            .iter()
            .map(|page| {
                let (width, height) = self.page_size(page)?;
                PageBox::new(width, height)
            })
            .collect()
    }
}

impl PageGeometrySource for PdfPageSource {
    type Page = ObjectId;

    fn page_size(&self, page: &ObjectId) -> Result<(f32, f32)> {
        let (_, _, width, height) = media_box(&self.document, *page)?;
        Ok((width, height))
    }
}

/// MediaBox of a page as `(x0, y0, width, height)`, following inheritance
fn media_box(doc: &Document, page_id: ObjectId) -> Result<(f32, f32, f32, f32)> {
    let mut dict = doc.get_dictionary(page_id)?;
    for _ in 0..MAX_INHERIT_DEPTH {
        if let Ok(array) = dict.get(b"MediaBox").and_then(Object::as_array) {
            let coords: Vec<f32> = array.iter().filter_map(extract_number).collect();
            if let [x0, y0, x1, y1] = coords[..] {
                return Ok((x0.min(x1), y0.min(y1), (x1 - x0).abs(), (y1 - y0).abs()));
            }
            break;
        }
        match dict.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent) => dict = doc.get_dictionary(parent)?,
            Err(_) => break,
        }
    }

    log::warn!("page {:?} has no usable MediaBox, assuming US Letter", page_id);
    Ok((0.0, 0.0, DEFAULT_PAGE_DIMENSIONS.0, DEFAULT_PAGE_DIMENSIONS.1))
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

// =============================================================================
// Sheet Renderer
// =============================================================================

/// A sheet under construction
#[derive(Debug)]
struct SheetState {
    width: f32,
    height: f32,
    content: String,
    xobjects: Dictionary,
}

/// Builds an output document from sheets of merged source pages
pub struct PdfSheetRenderer<'a> {
    source: &'a Document,
    output: Document,
    sheets: Vec<SheetState>,
    /// Source object -> copied object
    object_cache: HashMap<ObjectId, ObjectId>,
    /// Source page -> Form XObject
    xobject_cache: HashMap<ObjectId, ObjectId>,
}

impl<'a> PdfSheetRenderer<'a> {
    pub fn new(source: &'a Document) -> Self {
        Self {
            source,
            output: Document::with_version("1.7"),
            sheets: Vec::new(),
            object_cache: HashMap::new(),
            xobject_cache: HashMap::new(),
        }
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Form XObject for a source page, copied into the output on first use
    fn page_xobject(&mut self, page_id: ObjectId) -> Result<ObjectId> {
        if let Some(&id) = self.xobject_cache.get(&page_id) {
            return Ok(id);
        }

        let source = self.source;
        let (x0, y0, width, height) = media_box(source, page_id)?;
        let page_dict = source.get_dictionary(page_id)?;
        let content = page_content(source, page_dict)?;

        let mut xobject_dict = Dictionary::new();
        xobject_dict.set("Type", Object::Name(b"XObject".to_vec()));
        xobject_dict.set("Subtype", Object::Name(b"Form".to_vec()));
        xobject_dict.set("FormType", Object::Integer(1));
        xobject_dict.set(
            "BBox",
            Object::Array(vec![
                Object::Real(x0),
                Object::Real(y0),
                Object::Real(x0 + width),
                Object::Real(y0 + height),
            ]),
        );
        // Draw the MediaBox origin at (0, 0) so transforms see a 0-based page
        if x0 != 0.0 || y0 != 0.0 {
            xobject_dict.set(
                "Matrix",
                Object::Array(vec![
                    Object::Integer(1),
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(1),
                    Object::Real(-x0),
                    Object::Real(-y0),
                ]),
            );
        }
        if let Ok(resources) = page_dict.get(b"Resources") {
            let copied = copy_object(&mut self.output, source, resources, &mut self.object_cache)?;
            xobject_dict.set("Resources", copied);
        }

        let id = self.output.add_object(Stream::new(xobject_dict, content));
        self.xobject_cache.insert(page_id, id);
        Ok(id)
    }

    /// Write every sheet as an output page and return the finished document
    pub fn finish(mut self) -> Result<Document> {
        let pages_tree_id = self.output.new_object_id();
        let mut page_refs = Vec::with_capacity(self.sheets.len());

        for sheet in std::mem::take(&mut self.sheets) {
            let content_id = self
                .output
                .add_object(Stream::new(Dictionary::new(), sheet.content.into_bytes()));

            let mut resources = Dictionary::new();
            resources.set("XObject", Object::Dictionary(sheet.xobjects));

            let page_dict = Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Page".to_vec())),
                ("Parent", Object::Reference(pages_tree_id)),
                (
                    "MediaBox",
                    Object::Array(vec![
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Real(sheet.width),
                        Object::Real(sheet.height),
                    ]),
                ),
                ("Contents", Object::Reference(content_id)),
                ("Resources", Object::Dictionary(resources)),
            ]);
            page_refs.push(Object::Reference(self.output.add_object(page_dict)));
        }

        let count = page_refs.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(page_refs)),
            ("Count", Object::Integer(count)),
        ]);
        self.output
            .objects
            .insert(pages_tree_id, Object::Dictionary(pages_dict));

        let catalog_id = self.output.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_tree_id)),
        ]));
        self.output.trailer.set("Root", catalog_id);

        Ok(self.output)
    }
}

impl SheetRenderer for PdfSheetRenderer<'_> {
    type Page = ObjectId;
    /// Index of the sheet in allocation order
    type Sheet = usize;

    fn allocate_sheet(&mut self, width: f32, height: f32) -> Result<usize> {
        if !(width > 0.0 && height > 0.0) {
            return Err(ImposeError::InvalidGeometry { width, height });
        }
        self.sheets.push(SheetState {
            width,
            height,
            content: String::new(),
            xobjects: Dictionary::new(),
        });
        Ok(self.sheets.len() - 1)
    }

    fn merge(&mut self, sheet: &usize, page: &ObjectId, transform: &Transform) -> Result<()> {
        if *sheet >= self.sheets.len() {
            return Err(ImposeError::Config(format!("sheet {} was never allocated", sheet)));
        }
        let xobject_id = self.page_xobject(*page)?;

        let state = &mut self.sheets[*sheet];
        let name = format!("P{}", state.xobjects.len());
        state
            .xobjects
            .set(name.as_bytes(), Object::Reference(xobject_id));
        state
            .content
            .push_str(&format!("q {} /{} Do Q\n", transform.to_pdf_operator(), name));
        Ok(())
    }
}

// =============================================================================
// Object Copying
// =============================================================================

/// Decoded content of a page, concatenating content arrays
fn page_content(doc: &Document, page_dict: &Dictionary) -> Result<Vec<u8>> {
    let refs: Vec<ObjectId> = match page_dict.get(b"Contents") {
        Ok(Object::Reference(id)) => vec![*id],
        Ok(Object::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_reference().ok())
            .collect(),
        // No content = blank page
        _ => return Ok(Vec::new()),
    };

    let mut content = Vec::new();
    for id in refs {
        if let Ok(stream) = doc.get_object(id)?.as_stream() {
            let data = stream
                .decompressed_content()
                .unwrap_or_else(|_| stream.content.clone());
            content.extend_from_slice(&data);
            content.push(b'\n');
        }
    }
    Ok(content)
}

/// Copy an object graph from `source` into `output`, following references.
///
/// Each referenced object is copied once; later references reuse the copy.
fn copy_object(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Object> {
    let copy_dict = |output: &mut Document,
                     cache: &mut HashMap<ObjectId, ObjectId>,
                     dict: &Dictionary|
     -> Result<Dictionary> {
        let mut copied = Dictionary::new();
        for (key, value) in dict.iter() {
            copied.set(key.clone(), copy_object(output, source, value, cache)?);
        }
        Ok(copied)
    };

    match obj {
        Object::Reference(id) => {
            if let Some(&new_id) = cache.get(id) {
                return Ok(Object::Reference(new_id));
            }
            // Reserve the id first so reference cycles resolve to it
            let new_id = output.new_object_id();
            cache.insert(*id, new_id);
            let copied = copy_object(output, source, source.get_object(*id)?, cache)?;
            output.objects.insert(new_id, copied);
            Ok(Object::Reference(new_id))
        }
        Object::Dictionary(dict) => Ok(Object::Dictionary(copy_dict(output, cache, dict)?)),
        Object::Array(items) => Ok(Object::Array(
            items
                .iter()
                .map(|item| copy_object(output, source, item, cache))
                .collect::<Result<Vec<_>>>()?,
        )),
        Object::Stream(stream) => {
            let dict = copy_dict(output, cache, &stream.dict)?;
            let mut copied = Stream::new(dict, stream.content.clone());
            copied.allows_compression = stream.allows_compression;
            Ok(Object::Stream(copied))
        }
        _ => Ok(obj.clone()),
    }
}
