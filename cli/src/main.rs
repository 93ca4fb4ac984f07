//! msvg CLI - multi-page SVG viewer and packer

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use msvg::{
    detect_kind_from_path, JsonFormat, PackOptions, RenderOptions, RenderResult, ZoomConfig,
    ZoomController,
};

#[derive(Parser)]
#[command(name = "msvg")]
#[command(version)]
#[command(about = "View, inspect and pack multi-page SVG (MSVG) documents", long_about = None)]
struct Cli {
    /// Input MSVG or SVG file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output HTML file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a document to a standalone HTML viewer
    #[command(alias = "html")]
    View {
        /// Input MSVG or SVG file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (next to the input if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Viewer title
        #[arg(long, default_value = "MSVG Viewer")]
        title: String,

        #[command(flatten)]
        layout: LayoutArgs,

        #[command(flatten)]
        zoom: ZoomArgs,
    },

    /// Render a document to JSON
    Json {
        /// Input MSVG or SVG file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Show document information
    Info {
        /// Input MSVG or SVG file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Pack numbered SVG files from a directory into one MSVG file
    Pack {
        /// Directory holding the SVG files
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Output file
        #[arg(short, long, value_name = "FILE", default_value = "output.msvg")]
        output: PathBuf,

        /// Extension of input files
        #[arg(long, default_value = "svg")]
        extension: String,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct LayoutArgs {
    /// Display width of every page
    #[arg(long, env = "MSVG_PAGE_WIDTH", default_value_t = msvg::render::DEFAULT_PAGE_WIDTH)]
    page_width: f64,

    /// Page height when no usable viewBox is declared
    #[arg(long, env = "MSVG_DEFAULT_PAGE_HEIGHT", default_value_t = msvg::render::DEFAULT_PAGE_HEIGHT)]
    default_height: f64,

    /// Do not add the SVG namespace to page roots without one
    #[arg(long)]
    no_svg_namespace: bool,
}

impl LayoutArgs {
    fn render_options(&self) -> RenderOptions {
        RenderOptions::new()
            .with_page_width(self.page_width)
            .with_default_page_height(self.default_height)
            .with_svg_namespace(!self.no_svg_namespace)
    }
}

#[derive(Args)]
struct ZoomArgs {
    /// Smallest zoom factor
    #[arg(long, env = "MSVG_MIN_ZOOM", default_value_t = 0.2)]
    min_zoom: f64,

    /// Largest zoom factor
    #[arg(long, env = "MSVG_MAX_ZOOM", default_value_t = 3.0)]
    max_zoom: f64,

    /// Zoom change per button press or wheel tick
    #[arg(long, env = "MSVG_ZOOM_STEP", default_value_t = 0.01)]
    zoom_step: f64,
}

impl ZoomArgs {
    fn config(&self) -> ZoomConfig {
        ZoomConfig::new()
            .with_bounds(self.min_zoom, self.max_zoom)
            .with_step(self.zoom_step)
    }
}

impl Default for ZoomArgs {
    fn default() -> Self {
        let config = ZoomConfig::default();
        Self {
            min_zoom: config.min_scale,
            max_zoom: config.max_scale,
            zoom_step: config.step,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::View {
            input,
            output,
            title,
            layout,
            zoom,
        }) => cmd_view(
            &input,
            output.as_deref(),
            layout.render_options().with_title(title),
            zoom.config(),
        ),
        Some(Commands::Json {
            input,
            output,
            compact,
            layout,
        }) => cmd_json(&input, output.as_deref(), compact, &layout.render_options()),
        Some(Commands::Info { input, json }) => cmd_info(&input, json),
        Some(Commands::Pack {
            input,
            output,
            extension,
        }) => cmd_pack(&input, &output, &extension),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: render the input to HTML
            if let Some(input) = cli.input {
                cmd_view(
                    &input,
                    cli.output.as_deref(),
                    RenderOptions::default(),
                    ZoomArgs::default().config(),
                )
            } else {
                println!("{}", "Usage: msvg <FILE> [OUTPUT]".yellow());
                println!("       msvg --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// `slides.msvg` becomes `slides.html` in the same directory.
fn default_html_path(input: &Path) -> PathBuf {
    input.with_extension("html")
}

fn report_result(result: &RenderResult) {
    match result {
        RenderResult::Pages { pages } => {
            for page in pages {
                if let Some(warning) = page.warning() {
                    println!("{}: {}", "Warning".yellow().bold(), warning);
                }
            }
        }
        RenderResult::Failure { kind, message } => {
            println!("{} ({}): {}", "Not rendered".red().bold(), kind, message);
        }
    }
}

fn cmd_view(
    input: &Path,
    output: Option<&Path>,
    render_options: RenderOptions,
    zoom: ZoomConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_html_path(input));

    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Reading file...");
    let data = fs::read(input)?;
    log::debug!("read {} bytes from {}", data.len(), input.display());
    pb.inc(1);

    pb.set_message("Rendering pages...");
    let result = msvg::render_bytes_with_options(&data, &render_options)?;
    if let Some(kind) = result.failure_kind() {
        log::warn!("{} not rendered: {}", input.display(), kind);
    }
    pb.inc(1);

    pb.set_message("Writing viewer...");
    let html = msvg::render::to_html(&result, &render_options, &zoom);
    fs::write(&output, html)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    report_result(&result);
    println!(
        "{} {} ({} pages)",
        "Saved to".green(),
        output.display(),
        result.page_count()
    );

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    render_options: &RenderOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = msvg::render_file_with_options(input, render_options)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = msvg::render::to_json(&result, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path, as_json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let kind = detect_kind_from_path(input).ok();
    let result = msvg::render_file(input)?;
    let zoom = ZoomController::for_pages(result.pages(), ZoomConfig::default());

    if as_json {
        let summary = serde_json::json!({
            "file": input.display().to_string(),
            "kind": kind,
            "page_count": result.page_count(),
            "stack_height": zoom.original_total_height(),
            "warnings": result.warnings(),
            "failure": result.failure_kind(),
            "message": result.failure_message(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    match kind {
        Some(kind) => println!("{}: {}", "Format".bold(), kind),
        None => println!("{}: {}", "Format".bold(), "not markup".dimmed()),
    }

    if let RenderResult::Failure { kind, message } = &result {
        println!("{}: {}", "Status".bold(), kind.to_string().red());
        println!("{}", message);
        return Ok(());
    }

    println!("{}: {}", "Pages".bold(), result.page_count());
    println!("{}: {}", "Stack height".bold(), zoom.original_total_height());

    println!();
    println!("{}", "Pages".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for page in result.pages() {
        let size = format!("{} x {}", page.width(), page.height());
        match page.warning() {
            Some(warning) => println!("  {:>3}  {}  {}", page.number(), size, warning.yellow()),
            None => println!("  {:>3}  {}", page.number(), size),
        }
    }

    Ok(())
}

fn cmd_pack(input: &Path, output: &Path, extension: &str) -> Result<(), Box<dyn std::error::Error>> {
    let options = PackOptions::new().with_extension(extension);
    log::debug!(
        "packing .{} files from {} into {}",
        options.extension,
        input.display(),
        output.display()
    );
    let packed = msvg::pack::pack_to_file(input, output, &options)?;

    for path in &packed.skipped {
        println!("{} {}", "Skipped".yellow(), path.display());
    }
    for (i, name) in packed.pages.iter().enumerate() {
        let branch = if i + 1 == packed.pages.len() { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), name);
    }
    println!(
        "\n{} {} written ({} pages)",
        "Done!".green().bold(),
        output.display(),
        packed.page_count()
    );

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "msvg".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Multi-page SVG viewer and packer");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_html_path() {
        assert_eq!(
            default_html_path(Path::new("deck/slides.msvg")),
            PathBuf::from("deck/slides.html")
        );
    }

    #[test]
    fn test_zoom_args_default_matches_config() {
        assert_eq!(ZoomArgs::default().config(), ZoomConfig::default());
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["msvg", "json", "a.msvg", "--compact"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Json { compact: true, .. })));

        let cli = Cli::try_parse_from(["msvg", "html", "a.msvg", "--page-width", "600"]).unwrap();
        match cli.command {
            Some(Commands::View { layout, .. }) => assert_eq!(layout.render_options().page_width, 600.0),
            _ => panic!("expected view command"),
        }
    }

    #[test]
    fn test_cmd_pack_writes_container() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("2.svg"), "<svg id=\"two\"/>").unwrap();
        fs::write(dir.path().join("1.svg"), "<?xml version=\"1.0\"?>\n<svg id=\"one\"/>").unwrap();
        let output = dir.path().join("out.msvg");

        cmd_pack(dir.path(), &output, "svg").unwrap();

        let packed = fs::read_to_string(&output).unwrap();
        assert!(packed.find("one").unwrap() < packed.find("two").unwrap());
        assert_eq!(msvg::render(&packed).page_count(), 2);
    }

    #[test]
    fn test_cmd_view_writes_failure_page() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("photo.svg");
        fs::write(&input, r#"<svg><image href="data:image/png;base64,AA"/></svg>"#).unwrap();

        cmd_view(&input, None, RenderOptions::default(), ZoomConfig::default()).unwrap();

        let html = fs::read_to_string(dir.path().join("photo.html")).unwrap();
        assert!(html.contains("Rendering Error:"));
    }
}
