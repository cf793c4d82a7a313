//! PDF document access using lopdf.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use crate::detect::{read_header, validate_input};
use crate::error::{Error, Result};
use crate::model::{Destination, OutlineNode, PageTarget};

use super::backend::{decode_pdf_text, DocumentHandle};

/// Guards against reference cycles and absurdly deep trees in damaged files.
const MAX_TREE_DEPTH: usize = 64;

/// Document-level information shown alongside extracted sections.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DocumentInfo {
    /// File the document was loaded from, if any
    pub path: Option<PathBuf>,

    /// Title from the document info dictionary
    pub title: Option<String>,

    /// Last modification date
    pub modified: Option<chrono::DateTime<chrono::Utc>>,

    /// PDF version (e.g., "1.7")
    pub pdf_version: String,

    /// Total number of pages
    pub page_count: u32,
}

/// A decoded PDF document.
pub struct PdfDocument {
    doc: LopdfDocument,
    pages: BTreeMap<u32, ObjectId>,
    path: Option<PathBuf>,
}

impl PdfDocument {
    /// Open and decode a PDF file.
    ///
    /// The file is validated first; any failure names the offending file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        validate_input(path)?;

        let doc = LopdfDocument::load(path)
            .map_err(|e| Error::document_load(path, load_error(e)))?;
        let mut document = Self::from_lopdf(doc);
        document.path = Some(path.to_path_buf());
        Ok(document)
    }

    /// Decode a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        read_header(data)?;
        let doc = LopdfDocument::load_mem(data).map_err(load_error)?;
        Ok(Self::from_lopdf(doc))
    }

    /// Wrap an already decoded lopdf document.
    pub fn from_lopdf(doc: LopdfDocument) -> Self {
        let pages = doc.get_pages();
        Self {
            doc,
            pages,
            path: None,
        }
    }

    /// File this document was loaded from.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read document-level information.
    pub fn info(&self) -> DocumentInfo {
        let mut info = DocumentInfo {
            path: self.path.clone(),
            pdf_version: self.doc.version.to_string(),
            page_count: self.page_count(),
            ..Default::default()
        };

        let info_dict = self
            .doc
            .trailer
            .get(b"Info")
            .ok()
            .and_then(|obj| self.deref_dict(obj));

        if let Some(dict) = info_dict {
            info.title = self
                .string_entry(dict, b"Title")
                .filter(|t| !t.trim().is_empty());
            info.modified = self
                .string_entry(dict, b"ModDate")
                .and_then(|d| parse_pdf_date(&d));
        }

        info
    }

    fn deref<'a>(&'a self, obj: &'a Object) -> Option<&'a Object> {
        let mut current = obj;
        for _ in 0..MAX_TREE_DEPTH {
            match current {
                Object::Reference(id) => current = self.doc.get_object(*id).ok()?,
                other => return Some(other),
            }
        }
        None
    }

    fn deref_dict<'a>(&'a self, obj: &'a Object) -> Option<&'a Dictionary> {
        match self.deref(obj)? {
            Object::Dictionary(dict) => Some(dict),
            Object::Stream(stream) => Some(&stream.dict),
            _ => None,
        }
    }

    fn string_entry(&self, dict: &Dictionary, key: &[u8]) -> Option<String> {
        match self.deref(dict.get(key).ok()?)? {
            Object::String(bytes, _) => Some(decode_pdf_text(bytes)),
            Object::Name(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        }
    }

    /// Walk a sibling chain starting at `first`, descending into children.
    fn read_outline_level(
        &self,
        first: &Object,
        depth: usize,
        visited: &mut HashSet<ObjectId>,
    ) -> Vec<OutlineNode> {
        let mut nodes = Vec::new();
        if depth > MAX_TREE_DEPTH {
            log::warn!("Outline nested deeper than {} levels, truncating", MAX_TREE_DEPTH);
            return nodes;
        }

        let mut next = first.as_reference().ok();
        while let Some(item_ref) = next.take() {
            if !visited.insert(item_ref) {
                log::warn!("Outline item {:?} visited twice, stopping", item_ref);
                break;
            }
            let Ok(item) = self.doc.get_dictionary(item_ref) else {
                log::warn!("Outline item {:?} is not a dictionary", item_ref);
                break;
            };

            let title = self.string_entry(item, b"Title").unwrap_or_default();
            let mut node = OutlineNode::new(title, self.item_destination(item));

            if let Ok(child) = item.get(b"First") {
                node.children = self.read_outline_level(child, depth + 1, visited);
            }
            nodes.push(node);

            next = item.get(b"Next").ok().and_then(|n| n.as_reference().ok());
        }

        nodes
    }

    /// Destination of an outline item: `/Dest`, else a GoTo action's `/D`.
    fn item_destination(&self, item: &Dictionary) -> Option<Destination> {
        if let Ok(dest) = item.get(b"Dest") {
            return self.parse_destination(dest);
        }

        let action = self.deref_dict(item.get(b"A").ok()?)?;
        let is_goto = action
            .get(b"S")
            .ok()
            .and_then(|s| s.as_name().ok())
            .map_or(true, |s| s == b"GoTo");
        if !is_goto {
            return None;
        }
        self.parse_destination(action.get(b"D").ok()?)
    }

    fn parse_destination(&self, dest: &Object) -> Option<Destination> {
        match self.deref(dest)? {
            Object::Name(name) => Some(Destination::Named(
                String::from_utf8_lossy(name).into_owned(),
            )),
            Object::String(bytes, _) => Some(Destination::Named(decode_pdf_text(bytes))),
            other => explicit_target(other).map(Destination::Explicit),
        }
    }

    /// Look up a named destination in the catalog `/Dests` dictionary.
    fn lookup_catalog_dests(&self, name: &str) -> Option<&Object> {
        let catalog = self.doc.catalog().ok()?;
        let dests = self.deref_dict(catalog.get(b"Dests").ok()?)?;
        dests.get(name.as_bytes()).ok()
    }

    /// Look up a named destination in the `/Names /Dests` name tree.
    fn lookup_name_tree(&self, name: &str) -> Option<&Object> {
        let catalog = self.doc.catalog().ok()?;
        let names = self.deref_dict(catalog.get(b"Names").ok()?)?;
        let root = self.deref_dict(names.get(b"Dests").ok()?)?;
        self.search_name_tree(root, name, 0)
    }

    fn search_name_tree<'a>(
        &'a self,
        node: &'a Dictionary,
        name: &str,
        depth: usize,
    ) -> Option<&'a Object> {
        if depth > MAX_TREE_DEPTH {
            return None;
        }

        if let Ok(Object::Array(pairs)) = node.get(b"Names") {
            for pair in pairs.chunks_exact(2) {
                let key = match self.deref(&pair[0]) {
                    Some(Object::String(bytes, _)) => decode_pdf_text(bytes),
                    _ => continue,
                };
                if key == name {
                    return Some(&pair[1]);
                }
            }
        }

        let kids = match node.get(b"Kids").ok().and_then(|k| self.deref(k)) {
            Some(Object::Array(kids)) => kids,
            _ => return None,
        };
        kids.iter()
            .filter_map(|kid| self.deref_dict(kid))
            .find_map(|kid| self.search_name_tree(kid, name, depth + 1))
    }

    /// Turn the value stored for a named destination into a page target.
    fn named_value_target(&self, value: &Object) -> Option<PageTarget> {
        match self.deref(value)? {
            Object::Dictionary(dict) => explicit_target(self.deref(dict.get(b"D").ok()?)?),
            other => explicit_target(other),
        }
    }
}

/// First element of an explicit destination array.
fn explicit_target(dest: &Object) -> Option<PageTarget> {
    let array = dest.as_array().ok()?;
    match array.first()? {
        Object::Reference((num, generation)) => Some(PageTarget::Reference(*num, *generation)),
        Object::Integer(index) => u32::try_from(*index).ok().map(PageTarget::Index),
        _ => None,
    }
}

fn load_error(err: lopdf::Error) -> Error {
    match err {
        lopdf::Error::Decryption(_) => Error::Encrypted,
        _ => Error::from(err),
    }
}

impl DocumentHandle for PdfDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn outline(&self) -> Option<Vec<OutlineNode>> {
        let catalog = self.doc.catalog().ok()?;
        let outlines = self.deref_dict(catalog.get(b"Outlines").ok()?)?;
        let first = outlines.get(b"First").ok()?;

        let mut visited = HashSet::new();
        let nodes = self.read_outline_level(first, 0, &mut visited);
        if nodes.is_empty() {
            None
        } else {
            Some(nodes)
        }
    }

    fn resolve_destination(&self, destination: &Destination) -> Result<PageTarget> {
        match destination {
            Destination::Explicit(target) => Ok(target.clone()),
            Destination::Named(name) => self
                .lookup_catalog_dests(name)
                .and_then(|v| self.named_value_target(v))
                .or_else(|| {
                    self.lookup_name_tree(name)
                        .and_then(|v| self.named_value_target(v))
                })
                .ok_or_else(|| Error::Destination(format!("named destination '{}'", name))),
        }
    }

    fn page_index(&self, target: &PageTarget) -> Result<u32> {
        match target {
            PageTarget::Reference(num, generation) => self
                .pages
                .iter()
                .find(|(_, id)| **id == (*num, *generation))
                .map(|(page_num, _)| page_num - 1)
                .ok_or_else(|| {
                    Error::Destination(format!("object {} {} R is not a page", num, generation))
                }),
            PageTarget::Index(index) if *index < self.page_count() => Ok(*index),
            PageTarget::Index(index) => Err(Error::PageOutOfRange(
                index.saturating_add(1),
                self.page_count(),
            )),
        }
    }

    fn page_text(&self, page_number: u32) -> Result<String> {
        if !self.pages.contains_key(&page_number) {
            return Err(Error::PageOutOfRange(page_number, self.page_count()));
        }
        self.doc
            .extract_text(&[page_number])
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page_number, e)))
    }
}

/// Parse a PDF date (`D:YYYYMMDDHHmmSS...`); missing fields take their minimum.
fn parse_pdf_date(s: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    use chrono::TimeZone;

    let digits = s.strip_prefix("D:").unwrap_or(s);
    let field = |start: usize, default: u32| {
        digits
            .get(start..start + 2)
            .and_then(|f| f.parse::<u32>().ok())
            .unwrap_or(default)
    };

    let year: i32 = digits.get(0..4)?.parse().ok()?;
    let stamp = chrono::NaiveDate::from_ymd_opt(year, field(4, 1), field(6, 1))?
        .and_hms_opt(field(8, 0), field(10, 0), field(12, 0))?;
    Some(chrono::Utc.from_utc_datetime(&stamp))
}
