//! Wren CLI
//!
//! Loads a document, renders it, and prints or saves the result.
//!
//! - `wren page.html`                       # Render, print a summary
//! - `wren --dump-layout https://example.com` # Print the box tree
//! - `wren -o out.png --scroll 300 page.html` # Save a screenshot

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use wren_browser::{
    FontdueFontMetrics, NetworkFetcher, RenderedDocument, Renderer, SystemFonts, load,
};
use wren_common::warning::warning_count;
use wren_css::{FontCache, LayoutOptions};
use wren_html::print_tree;

/// Wren: render markup and stylesheets to a display list
#[derive(Parser, Debug)]
#[command(name = "wren")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the markup tree
    wren --dump-dom ./index.html

    # Print the display list as JSON
    wren --dump-display-list https://example.com

    # Screenshot the second screenful
    wren -o page.png --scroll 600 https://example.com
"#)]
struct Cli {
    /// Path to a markup file, or a URL (http, https, file, data)
    #[arg(value_name = "FILE|URL")]
    address: String,

    /// Viewport width in pixels
    #[arg(long, default_value = "800")]
    width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value = "600")]
    height: u32,

    /// Vertical scroll offset for the screenshot, clamped to the page
    #[arg(long, default_value = "0")]
    scroll: f32,

    /// Save a screenshot of the viewport to this file (PNG)
    #[arg(short = 'o', long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the markup tree
    #[arg(long)]
    dump_dom: bool,

    /// Print the box tree with computed geometry
    #[arg(long)]
    dump_layout: bool,

    /// Print the display list as JSON
    #[arg(long)]
    dump_display_list: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    #[allow(clippy::cast_precision_loss)]
    let options = LayoutOptions {
        viewport_width: cli.width as f32,
        viewport_height: cli.height as f32,
        ..LayoutOptions::default()
    };

    let system_fonts = SystemFonts::load();
    let fonts = FontCache::new(FontdueFontMetrics::new(&system_fonts));
    let address = to_address(&cli.address)?;
    let document = load(&address, &NetworkFetcher, &fonts, &options)
        .with_context(|| format!("could not render {}", cli.address))?;
    log::debug!("{} font faces measured", fonts.cached_faces());

    if cli.dump_dom {
        heading("Markup Tree");
        print_tree(&document.tree, document.tree.root(), 0);
    }

    if cli.dump_layout {
        heading("Layout Tree");
        print!("{}", document.layout.describe(&document.tree));
    }

    if cli.dump_display_list {
        let json = serde_json::to_string_pretty(&document.display_list)
            .context("failed to serialize display list")?;
        println!("{json}");
    }

    if let Some(ref output) = cli.output {
        screenshot(&document, &system_fonts, cli.scroll, output)?;
        println!("Screenshot saved to: {}", output.display().green());
    }

    if !(cli.dump_dom || cli.dump_layout || cli.dump_display_list) {
        print_summary(&document);
    }

    Ok(())
}

/// Turn a command-line argument into a URL. Anything without a scheme is
/// treated as a local path.
fn to_address(arg: &str) -> Result<String> {
    if arg.contains("://") || arg.starts_with("data:") {
        return Ok(arg.to_string());
    }
    let path = Path::new(arg)
        .canonicalize()
        .with_context(|| format!("no such file: {arg}"))?;
    Ok(format!("file://{}", path.display()))
}

/// Render the viewport at `scroll` to a PNG.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn screenshot(
    document: &RenderedDocument,
    fonts: &SystemFonts,
    scroll: f32,
    output: &Path,
) -> Result<()> {
    let mut page = document.page();
    page.set_scroll(scroll);

    let options = page.options();
    let mut renderer = Renderer::new(
        options.viewport_width as u32,
        options.viewport_height as u32,
        fonts,
    );
    renderer.render(&page);
    renderer.save(output)
}

fn print_summary(document: &RenderedDocument) {
    heading("Document");
    println!("{} nodes", document.tree.len());
    println!("{} boxes", document.layout.boxes().len());
    println!("{} display commands", document.display_list.len());
    println!("{:.1}px tall", document.layout.height());

    if !document.issues.is_empty() {
        heading("Parse Issues");
        for issue in &document.issues {
            println!("  - {} ({})", issue.message, issue.kind.dimmed());
        }
    }

    let warnings = warning_count();
    if warnings > 0 {
        println!("\n{} distinct warnings", warnings.yellow());
    }
}

fn heading(title: &str) {
    println!("\n{}", format!("=== {title} ===").bold().cyan());
}
