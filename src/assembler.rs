use log::debug;

use crate::content::page_program;
use crate::layout::{PageLayout, fit};
use crate::{Dictionary, Document, Error, Object, Result, Stream, dictionary};

/// Name under which each page's image XObject is registered in that page's
/// resource dictionary.
const IMAGE_NAME: &str = "I1";

/// An already-rasterized, already-encoded image ready to embed.
///
/// `data` must be a complete standalone DCT (JPEG) codestream for an
/// 8-bit-per-channel RGB raster. It is embedded verbatim; this crate never
/// decodes, inspects or re-encodes it.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Document {
    /// Assemble a document with one page per input image, in input order.
    ///
    /// Object ids are fixed: 1 is the Catalog, 2 the Pages node, then three
    /// consecutive ids per image for its XObject, content stream and page.
    /// An empty input list is rejected; any invalid image aborts the whole
    /// build with no partial document.
    pub fn assemble(images: Vec<RasterImage>, layout: &PageLayout) -> Result<Document> {
        if images.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut document = Document::new();
        let catalog_id = document.new_object_id();
        let pages_id = document.new_object_id();

        let mut kids: Vec<Object> = Vec::with_capacity(images.len());
        for image in images {
            let placement = fit(image.width, image.height, layout)?;
            debug!(
                "page {}: {}x{} image placed at ({}, {}), scale {}",
                kids.len() + 1,
                image.width,
                image.height,
                placement.x,
                placement.y,
                placement.scale
            );

            let image_id = document.add_object(Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => image.width,
                    "Height" => image.height,
                    "ColorSpace" => "DeviceRGB",
                    "BitsPerComponent" => 8,
                    "Filter" => "DCTDecode",
                },
                image.data,
            ));

            let program = page_program(&placement, IMAGE_NAME).encode()?;
            let content_id = document.add_object(Stream::new(Dictionary::new(), program));

            let page_id = document.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), layout.width.into(), layout.height.into()],
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "XObject" => dictionary! {
                        IMAGE_NAME => image_id,
                    },
                },
            });
            kids.push(page_id.into());
        }

        let page_count = kids.len() as i64;
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count,
            }),
        );
        document.objects.insert(
            catalog_id,
            Object::Dictionary(dictionary! {
                "Type" => "Catalog",
                "Pages" => pages_id,
            }),
        );

        debug!(
            "assembled {} pages into {} objects",
            page_count,
            document.objects.len()
        );
        Ok(document)
    }
}

/// Assemble and render in one call, returning the final byte buffer.
pub fn assemble_pdf(images: Vec<RasterImage>, layout: &PageLayout) -> Result<Vec<u8>> {
    Document::assemble(images, layout)?.to_bytes()
}
