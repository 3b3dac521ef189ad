use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use torbo_icon::icon_gen::{RasterSize, ICONSET_DIR};

fn main() -> Result<()> {
    let iconset = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("dist").join(ICONSET_DIR));

    println!("Checking iconset: {}", iconset.display());

    for size in RasterSize::ALL {
        verify_icon(&iconset, size)?;
    }
    for size in RasterSize::ALL {
        verify_retina_alias(&iconset, size)?;
    }

    println!("\n✓ Iconset is complete");
    Ok(())
}

fn verify_icon(iconset: &Path, size: RasterSize) -> Result<()> {
    let path = iconset.join(size.file_name());
    let img = image::open(&path)
        .with_context(|| format!("Failed to decode {}", path.display()))?;

    let s = size.px();
    if img.width() != s || img.height() != s {
        bail!(
            "{} is {}x{}, expected {s}x{s}",
            path.display(),
            img.width(),
            img.height()
        );
    }
    if img.color() != image::ColorType::Rgba8 {
        bail!("{} is {:?}, expected Rgba8", path.display(), img.color());
    }

    let rgba = img.to_rgba8();
    let corner = rgba.get_pixel(0, 0);
    let center = rgba.get_pixel(s / 2, s / 2);
    if corner[3] != 0 {
        bail!("{}: corner should be transparent, got {:?}", path.display(), corner);
    }
    if center[3] != 255 {
        bail!("{}: center should be opaque, got {:?}", path.display(), center);
    }

    println!("  ✓ {} ({s}x{s})", size.file_name());
    Ok(())
}

fn verify_retina_alias(iconset: &Path, size: RasterSize) -> Result<()> {
    let (Some(source), Some(alias)) = (size.retina_source(), size.retina_file_name()) else {
        return Ok(());
    };
    let alias_path = iconset.join(&alias);
    let source_path = iconset.join(source.file_name());
    let alias_bytes = std::fs::read(&alias_path)
        .with_context(|| format!("Failed to read {}", alias_path.display()))?;
    let source_bytes = std::fs::read(&source_path)
        .with_context(|| format!("Failed to read {}", source_path.display()))?;

    if alias_bytes != source_bytes {
        bail!("{alias} differs from {}", source.file_name());
    }

    println!("  ✓ {alias} == {}", source.file_name());
    Ok(())
}
