use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use torbo_icon::icon_gen;

#[derive(Debug, Parser)]
#[clap(
    name = "torbo-icon",
    about = "Render the Torbo Base orb icon into a macOS iconset"
)]
struct Args {
    /// Output directory. The iconset is created inside it.
    /// Defaults to `../dist` next to the executable.
    #[clap(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Also write an AppIcon.appiconset with Contents.json
    #[clap(long)]
    asset_catalog: bool,

    /// Log more detail (-v info, -vv debug)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    icon_gen::generate_icons(icon_gen::Args {
        output: args.output.unwrap_or_else(default_output_dir),
        asset_catalog: args.asset_catalog,
    })
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

/// `<dir of executable>/../dist`, or `./dist` when the executable path is unknown
fn default_output_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("..").join("dist")))
        .unwrap_or_else(|| PathBuf::from("dist"))
}
