// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::err::RasterError;
use crate::style::StyleContext;
use crate::svg::SvgDocument;
use resvg::{tiny_skia, usvg};
use std::path::Path;
use tracing::{debug, instrument};

/// Parses `doc`, renders it at its own pixel size and writes a PNG to `path`.
///
/// The font database of `style` is shared with the parser, so the fonts are loaded
/// once per run rather than once per image.
#[instrument(level = "debug", skip_all, fields(path = %path.display(), width = doc.width(), height = doc.height()))]
pub fn rasterize(doc: &SvgDocument, style: &StyleContext, path: &Path) -> Result<(), RasterError> {
    let mut options = usvg::Options::default();
    options.fontdb = style.fontdb().clone();
    if let Some(family) = style.primary_family() {
        options.font_family = family.to_owned();
    }

    let tree = usvg::Tree::from_str(doc.as_str(), &options)?;
    let mut pixmap =
        tiny_skia::Pixmap::new(doc.width(), doc.height()).ok_or(RasterError::Allocation {
            width: doc.width(),
            height: doc.height(),
        })?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    pixmap.save_png(path).map_err(|e| RasterError::Encode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    debug!("PNG written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleConfigBuilder;
    use crate::svg::{Stroke, SvgCanvas};
    use dock_viz_core::color::{EMPTY_CELL, Rgba};

    fn style() -> StyleContext {
        StyleContext::new(StyleConfigBuilder::new().load_system_fonts(false).build())
    }

    #[test]
    fn writes_png_with_document_size() {
        let style = style();
        let mut canvas = SvgCanvas::new(&style, 40.0, 24.0);
        canvas.rect(2.0, 2.0, 36.0, 20.0, EMPTY_CELL, Some(Stroke::new(Rgba::BLACK, 1.0)));
        let doc = canvas.finish();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cell.png");
        rasterize(&doc, &style, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let width = u32::from_be_bytes(bytes[16..20].try_into().unwrap());
        let height = u32::from_be_bytes(bytes[20..24].try_into().unwrap());
        assert_eq!((width, height), (40, 24));
    }

    #[test]
    fn missing_directory_is_an_encode_error() {
        let style = style();
        let doc = SvgCanvas::new(&style, 4.0, 4.0).finish();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent").join("x.png");
        let err = rasterize(&doc, &style, &path).unwrap_err();
        assert!(matches!(err, RasterError::Encode { .. }));
    }
}
