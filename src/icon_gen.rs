use crate::contents_json::{write_contents_json, ImageEntry};
use crate::{orb, png};
use anyhow::{Context, Result};
use std::{
    fs::create_dir_all,
    io::Write,
    path::{Path, PathBuf},
};

/// Directory name of the generated iconset, inside the output directory
pub const ICONSET_DIR: &str = "TorboBase.iconset";

/// Directory name of the asset catalog slot written with `--asset-catalog`
pub const APPICONSET_DIR: &str = "AppIcon.appiconset";

/// Driver options; `main.rs` fills this from the command line
#[derive(Debug, Clone)]
pub struct Args {
    pub output: PathBuf,
    pub asset_catalog: bool,
}

/// The fixed set of resolutions the icon is rendered at
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RasterSize {
    S16,
    S32,
    S64,
    S128,
    S256,
    S512,
    S1024,
}

impl RasterSize {
    /// Every size, smallest first
    pub const ALL: [RasterSize; 7] = [
        RasterSize::S16,
        RasterSize::S32,
        RasterSize::S64,
        RasterSize::S128,
        RasterSize::S256,
        RasterSize::S512,
        RasterSize::S1024,
    ];

    /// Edge length in pixels
    pub const fn px(self) -> u32 {
        match self {
            RasterSize::S16 => 16,
            RasterSize::S32 => 32,
            RasterSize::S64 => 64,
            RasterSize::S128 => 128,
            RasterSize::S256 => 256,
            RasterSize::S512 => 512,
            RasterSize::S1024 => 1024,
        }
    }

    /// `icon_{S}x{S}.png`
    pub fn file_name(self) -> String {
        let s = self.px();
        format!("icon_{s}x{s}.png")
    }

    /// `icon_{S}x{S}@2x.png`, for the sizes macOS has a retina slot for
    pub fn retina_file_name(self) -> Option<String> {
        self.retina_source()?;
        let s = self.px();
        Some(format!("icon_{s}x{s}@2x.png"))
    }

    /// The size whose file backs this size's `@2x` slot
    pub fn retina_source(self) -> Option<RasterSize> {
        match self {
            RasterSize::S16 => Some(RasterSize::S32),
            RasterSize::S32 => Some(RasterSize::S64),
            RasterSize::S128 => Some(RasterSize::S256),
            RasterSize::S256 => Some(RasterSize::S512),
            RasterSize::S512 => Some(RasterSize::S1024),
            RasterSize::S64 | RasterSize::S1024 => None,
        }
    }
}

pub fn generate_icons(args: Args) -> Result<()> {
    let iconset = generate_iconset(&args.output)?;

    if args.asset_catalog {
        generate_asset_catalog(&iconset, &args.output)?;
    }

    println!("\n  Iconset ready: {}", iconset.display());
    println!("  Run:  iconutil -c icns {ICONSET_DIR} -o AppIcon.icns");
    Ok(())
}

/// Render every size into `<out_dir>/TorboBase.iconset` and add the `@2x`
/// aliases. Returns the iconset path.
pub fn generate_iconset(out_dir: &Path) -> Result<PathBuf> {
    let iconset = out_dir.join(ICONSET_DIR);
    create_dir_all(&iconset)
        .with_context(|| format!("Can't create iconset directory {}", iconset.display()))?;
    log::info!("writing iconset to {}", iconset.display());

    for size in RasterSize::ALL {
        let s = size.px();
        print!("  {s}x{s} ... ");
        std::io::stdout().flush()?;

        let data = render_png(size)?;
        let path = iconset.join(size.file_name());
        std::fs::write(&path, &data)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::debug!("{}: {} bytes", path.display(), data.len());

        println!("✓");
    }

    write_retina_aliases(&iconset)?;
    Ok(iconset)
}

/// Render and encode one size
pub fn render_png(size: RasterSize) -> Result<Vec<u8>> {
    let s = size.px();
    let pixels = orb::render(s);
    png::encode(s, s, &pixels).with_context(|| format!("Failed to encode {s}x{s} PNG"))
}

/// Copy `icon_{2S}x{2S}.png` onto `icon_{S}x{S}@2x.png`. Sources that are
/// missing are skipped.
fn write_retina_aliases(iconset: &Path) -> Result<()> {
    for size in RasterSize::ALL {
        let (Some(source), Some(alias)) = (size.retina_source(), size.retina_file_name()) else {
            continue;
        };
        let src = iconset.join(source.file_name());
        if !src.exists() {
            log::warn!("skipping {alias}: {} is missing", src.display());
            continue;
        }
        let dst = iconset.join(&alias);
        std::fs::copy(&src, &dst).with_context(|| {
            format!("Failed to copy {} to {}", src.display(), dst.display())
        })?;
        log::debug!("{} -> {}", src.display(), dst.display());
    }
    Ok(())
}

/// Lay the iconset out as an asset catalog slot with its Contents.json
pub fn generate_asset_catalog(iconset: &Path, out_dir: &Path) -> Result<PathBuf> {
    println!("Generating {APPICONSET_DIR}...");
    let catalog = out_dir.join(APPICONSET_DIR);
    create_dir_all(&catalog)
        .with_context(|| format!("Can't create {}", catalog.display()))?;

    let mut images = Vec::new();
    for size in RasterSize::ALL {
        let Some(retina) = size.retina_file_name() else {
            continue;
        };
        for (filename, scale) in [(size.file_name(), 1), (retina, 2)] {
            let src = iconset.join(&filename);
            std::fs::copy(&src, catalog.join(&filename))
                .with_context(|| format!("Failed to copy {}", src.display()))?;
            images.push(ImageEntry::mac(filename, size.px(), scale));
        }
    }

    write_contents_json(&catalog, images)?;
    println!("✓ Generated {APPICONSET_DIR}/Contents.json");
    Ok(catalog)
}
