//! PNG output through resvg.

use std::path::Path;

use log::debug;

use crate::{Result, VizError};

/// Rasterize an SVG document into a pixmap at its declared size.
///
/// System fonts are loaded so `<text>` elements render; with no fonts
/// installed text is silently dropped rather than failing.
pub fn render_pixmap(svg: &str) -> Result<tiny_skia::Pixmap> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| VizError::Svg(e.to_string()))?;
    let size = tree.size().to_int_size();
    debug!("Rasterizing SVG at {}x{}", size.width(), size.height());

    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height()).ok_or_else(|| {
        VizError::Render(format!(
            "cannot allocate {}x{} pixmap",
            size.width(),
            size.height()
        ))
    })?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    Ok(pixmap)
}

/// Rasterize an SVG document and save it as PNG.
pub fn rasterize_png<P: AsRef<Path>>(svg: &str, path: P) -> Result<()> {
    let pixmap = render_pixmap(svg)?;
    let png = pixmap
        .encode_png()
        .map_err(|e| VizError::Encode(e.to_string()))?;
    std::fs::write(path, png)?;
    Ok(())
}
