use crate::{Error, Result};

/// Page geometry in PDF user-space units (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl Default for PageLayout {
    /// A4 page with a 20-unit margin on every side.
    fn default() -> PageLayout {
        PageLayout {
            width: 595.28,
            height: 841.89,
            margin: 20.0,
        }
    }
}

/// Where an image lands on its page, in user-space units.
///
/// `width`, `height`, `x` and `y` are rounded to two decimal places; `scale`
/// is kept unrounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub scale: f64,
    pub width: f64,
    pub height: f64,
    pub x: f64,
    pub y: f64,
}

/// Fit an image into the page content box, preserving aspect ratio and
/// centering the result.
///
/// There is no upper clamp on the scale: an image smaller than the content
/// box is stretched to fill it.
pub fn fit(image_width: u32, image_height: u32, page: &PageLayout) -> Result<Placement> {
    if image_width == 0 || image_height == 0 {
        return Err(Error::InvalidDimensions(format!(
            "image is {}x{} pixels",
            image_width, image_height
        )));
    }
    let content_width = page.width - 2.0 * page.margin;
    let content_height = page.height - 2.0 * page.margin;
    if content_width <= 0.0 || content_height <= 0.0 {
        return Err(Error::InvalidDimensions(format!(
            "page box {}x{} leaves no room inside margin {}",
            page.width, page.height, page.margin
        )));
    }

    let scale = (content_width / f64::from(image_width)).min(content_height / f64::from(image_height));
    let width = round2(f64::from(image_width) * scale);
    let height = round2(f64::from(image_height) * scale);
    let x = round2((page.width - width) / 2.0);
    let y = round2((page.height - height) / 2.0);

    Ok(Placement {
        scale,
        width,
        height,
        x,
        y,
    })
}

// Round half-up to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
