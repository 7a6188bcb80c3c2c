//! lopdf-based PDF parsing backend.
//!
//! Implements [`PdfBackend`] using the [lopdf](https://crates.io/crates/lopdf)
//! crate for PDF document parsing. This is the default backend for
//! pdf2transcript.

use std::collections::HashMap;

use crate::backend::{PageText, PdfBackend};
use crate::content::extract_runs;
use crate::error::BackendError;
use crate::font::{CMap, FontDecoder, encoding_for_cmap};

/// Page size assumed when a page carries no usable /MediaBox (A4 points).
const FALLBACK_MEDIA_BOX: (f64, f64, f64, f64) = (0.0, 0.0, 595.28, 841.89);

/// A parsed PDF document backed by lopdf.
pub struct LopdfDocument {
    /// The underlying lopdf document.
    inner: lopdf::Document,
    /// Cached ordered list of page ObjectIds (indexed by 0-based page number).
    page_ids: Vec<lopdf::ObjectId>,
}

impl LopdfDocument {
    /// Access the underlying lopdf document.
    pub fn inner(&self) -> &lopdf::Document {
        &self.inner
    }
}

impl std::fmt::Debug for LopdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LopdfDocument")
            .field("page_count", &self.page_ids.len())
            .finish_non_exhaustive()
    }
}

/// A reference to a single page within a [`LopdfDocument`].
#[derive(Debug, Clone, Copy)]
pub struct LopdfPage {
    /// The lopdf object ID for this page.
    pub object_id: lopdf::ObjectId,
    /// The 0-based page index.
    pub index: usize,
}

/// The lopdf-based PDF backend.
///
/// # Example
///
/// ```ignore
/// use pdf2transcript_parse::lopdf_backend::LopdfBackend;
/// use pdf2transcript_parse::PdfBackend;
///
/// let doc = LopdfBackend::open(pdf_bytes)?;
/// let count = LopdfBackend::page_count(&doc);
/// let page = LopdfBackend::get_page(&doc, 0)?;
/// ```
pub struct LopdfBackend;

/// Convert a lopdf numeric object (Integer or Real) to f64.
fn object_to_f64(obj: &lopdf::Object) -> Result<f64, BackendError> {
    match obj {
        lopdf::Object::Integer(i) => Ok(*i as f64),
        lopdf::Object::Real(f) => Ok(f64::from(*f)),
        _ => Err(BackendError::Parse(format!("expected number, got {obj:?}"))),
    }
}

/// Look up a key in the page dictionary, walking up the page tree
/// (via /Parent) if the key is not found on the page itself.
///
/// Returns `None` if the key is not found anywhere in the tree.
fn resolve_inherited<'a>(
    doc: &'a lopdf::Document,
    page_id: lopdf::ObjectId,
    key: &[u8],
) -> Result<Option<&'a lopdf::Object>, BackendError> {
    let mut current_id = page_id;
    loop {
        let dict = doc
            .get_object(current_id)
            .and_then(|o| o.as_dict())
            .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))?;

        if let Ok(value) = dict.get(key) {
            return Ok(Some(value));
        }

        match dict.get(b"Parent") {
            Ok(parent_obj) => {
                current_id = parent_obj
                    .as_reference()
                    .map_err(|e| BackendError::Parse(format!("invalid /Parent reference: {e}")))?;
            }
            Err(_) => return Ok(None),
        }
    }
}

/// Resolve an indirect reference, returning the referenced object.
fn resolve_ref<'a>(doc: &'a lopdf::Document, obj: &'a lopdf::Object) -> &'a lopdf::Object {
    match obj {
        lopdf::Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// The page's /MediaBox as `(x0, y0, x1, y1)`, if present and well formed.
fn page_media_box(
    doc: &lopdf::Document,
    page_id: lopdf::ObjectId,
) -> Result<Option<(f64, f64, f64, f64)>, BackendError> {
    let obj = match resolve_inherited(doc, page_id, b"MediaBox")? {
        Some(obj) => resolve_ref(doc, obj),
        None => return Ok(None),
    };
    let array = obj
        .as_array()
        .map_err(|e| BackendError::Parse(format!("MediaBox is not an array: {e}")))?;
    if array.len() != 4 {
        return Err(BackendError::Parse(format!(
            "expected 4-element MediaBox, got {} elements",
            array.len()
        )));
    }
    let x0 = object_to_f64(resolve_ref(doc, &array[0]))?;
    let y0 = object_to_f64(resolve_ref(doc, &array[1]))?;
    let x1 = object_to_f64(resolve_ref(doc, &array[2]))?;
    let y1 = object_to_f64(resolve_ref(doc, &array[3]))?;
    Ok(Some((x0, y0, x1, y1)))
}

/// Decode a content stream, decompressing if needed.
fn decode_content_stream(stream: &lopdf::Stream) -> Result<Vec<u8>, BackendError> {
    if stream.dict.get(b"Filter").is_ok() {
        stream
            .decompressed_content()
            .map_err(|e| BackendError::Content(format!("failed to decompress content stream: {e}")))
    } else {
        Ok(stream.content.clone())
    }
}

/// Get the content stream bytes from a page dictionary.
///
/// Handles both single stream references and arrays of stream references.
/// A page with no /Contents entry yields empty bytes.
fn page_content_bytes(
    doc: &lopdf::Document,
    page_dict: &lopdf::Dictionary,
) -> Result<Vec<u8>, BackendError> {
    let contents_obj = match page_dict.get(b"Contents") {
        Ok(obj) => obj,
        Err(_) => return Ok(Vec::new()),
    };

    match contents_obj {
        lopdf::Object::Reference(id) => {
            let obj = doc
                .get_object(*id)
                .map_err(|e| BackendError::Parse(format!("failed to resolve /Contents: {e}")))?;
            let stream = obj
                .as_stream()
                .map_err(|e| BackendError::Parse(format!("/Contents is not a stream: {e}")))?;
            decode_content_stream(stream)
        }
        lopdf::Object::Stream(stream) => decode_content_stream(stream),
        lopdf::Object::Array(arr) => {
            let mut content = Vec::new();
            for item in arr {
                let stream = resolve_ref(doc, item).as_stream().map_err(|e| {
                    BackendError::Parse(format!("/Contents array item is not a stream: {e}"))
                })?;
                let bytes = decode_content_stream(stream)?;
                if !content.is_empty() {
                    content.push(b' ');
                }
                content.extend_from_slice(&bytes);
            }
            Ok(content)
        }
        _ => Err(BackendError::Parse(
            "/Contents is not a reference or array".to_string(),
        )),
    }
}

/// Build a [`FontDecoder`] for each font in the page's /Resources.
///
/// A font with an embedded /ToUnicode stream decodes through its CMap; one
/// with a predefined CJK /Encoding name decodes through `encoding_rs`; all
/// others fall back to WinAnsi. A font whose CMap fails to parse also falls
/// back to WinAnsi rather than failing the page.
fn page_font_decoders(
    doc: &lopdf::Document,
    page_id: lopdf::ObjectId,
) -> Result<HashMap<Vec<u8>, FontDecoder>, BackendError> {
    let mut decoders = HashMap::new();

    let resources = match resolve_inherited(doc, page_id, b"Resources")? {
        Some(obj) => match resolve_ref(doc, obj).as_dict() {
            Ok(dict) => dict,
            Err(_) => return Ok(decoders),
        },
        None => return Ok(decoders),
    };

    let font_dict = match resources.get(b"Font") {
        Ok(obj) => match resolve_ref(doc, obj).as_dict() {
            Ok(dict) => dict,
            Err(_) => return Ok(decoders),
        },
        Err(_) => return Ok(decoders),
    };

    for (name, font_obj) in font_dict.iter() {
        let font = match resolve_ref(doc, font_obj).as_dict() {
            Ok(dict) => dict,
            Err(_) => continue,
        };
        decoders.insert(name.to_vec(), font_decoder(doc, font));
    }

    Ok(decoders)
}

/// Pick the decoder for one font dictionary.
fn font_decoder(doc: &lopdf::Document, font: &lopdf::Dictionary) -> FontDecoder {
    if let Ok(to_unicode) = font.get(b"ToUnicode") {
        if let Ok(stream) = resolve_ref(doc, to_unicode).as_stream() {
            if let Ok(data) = decode_content_stream(stream) {
                if let Ok(cmap) = CMap::parse(&data) {
                    if !cmap.is_empty() {
                        return FontDecoder::ToUnicode(cmap);
                    }
                }
            }
        }
    }

    if let Ok(encoding_obj) = font.get(b"Encoding") {
        if let Ok(name) = resolve_ref(doc, encoding_obj).as_name() {
            let name = String::from_utf8_lossy(name);
            if let Some(encoding) = encoding_for_cmap(&name) {
                return FontDecoder::Cjk(encoding);
            }
        }
    }

    FontDecoder::WinAnsi
}

impl PdfBackend for LopdfBackend {
    type Document = LopdfDocument;
    type Page = LopdfPage;
    type Error = BackendError;

    fn open(bytes: &[u8]) -> Result<Self::Document, Self::Error> {
        let inner = lopdf::Document::load_mem(bytes)
            .map_err(|e| BackendError::Parse(format!("failed to parse PDF: {e}")))?;

        // No password support; refuse rather than extract garbage.
        if inner.is_encrypted() {
            return Err(BackendError::Parse(
                "document is encrypted; password-protected PDFs are not supported".to_string(),
            ));
        }

        // get_pages returns BTreeMap<u32, ObjectId> with 1-based keys
        let pages_map = inner.get_pages();
        let page_ids: Vec<lopdf::ObjectId> = pages_map.values().copied().collect();

        #[cfg(feature = "tracing")]
        tracing::debug!(pages = page_ids.len(), "opened PDF document");

        Ok(LopdfDocument { inner, page_ids })
    }

    fn page_count(doc: &Self::Document) -> usize {
        doc.page_ids.len()
    }

    fn get_page(doc: &Self::Document, index: usize) -> Result<Self::Page, Self::Error> {
        if index >= doc.page_ids.len() {
            return Err(BackendError::Parse(format!(
                "page index {index} out of range (0..{})",
                doc.page_ids.len()
            )));
        }
        Ok(LopdfPage {
            object_id: doc.page_ids[index],
            index,
        })
    }

    fn page_width(doc: &Self::Document, page: &Self::Page) -> Result<Option<f64>, Self::Error> {
        Ok(page_media_box(&doc.inner, page.object_id)?.map(|(x0, _, x1, _)| x1 - x0))
    }

    fn page_text(doc: &Self::Document, page: &Self::Page) -> Result<PageText, Self::Error> {
        let inner = &doc.inner;

        let page_dict = inner
            .get_object(page.object_id)
            .and_then(|o| o.as_dict())
            .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))?;

        let media_box =
            page_media_box(inner, page.object_id)?.unwrap_or(FALLBACK_MEDIA_BOX);
        let fonts = page_font_decoders(inner, page.object_id)?;
        let content_bytes = page_content_bytes(inner, page_dict)?;

        let runs = match lopdf::content::Content::decode(&content_bytes) {
            Ok(content) => extract_runs(&content, &fonts, media_box),
            Err(_) => Vec::new(),
        };

        if !runs.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::debug!(page = page.index, runs = runs.len(), "extracted text runs");
            return Ok(PageText::Runs(runs));
        }

        // No positioned run came out of the content stream; fall back to
        // lopdf's flat text extraction so the page is not silently dropped.
        let raw = inner
            .extract_text(&[(page.index + 1) as u32])
            .unwrap_or_default();
        #[cfg(feature = "tracing")]
        tracing::debug!(page = page.index, chars = raw.len(), "raw text fallback");
        Ok(PageText::Raw(raw))
    }
}
