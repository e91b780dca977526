//! readme-composer - compose a project README from fixed sections.
//!
//! # Usage
//!
//! ```bash
//! readme-composer
//! readme-composer --hide roadmap --set "license=Apache-2.0"
//! readme-composer --print > README.md
//! readme-composer --write --output-dir docs
//! ```

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;

use readme_composer::app::App;
use readme_composer::composer::{DirectoryExporter, DocumentState, export_to_file};
use readme_composer::config::{
    ConfigFlags, PreviewMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, save_config_flags,
};
use readme_composer::preview::{ComrakRenderer, MarkdownRenderer};
use readme_composer::sections::{SECTIONS, SectionAssignment, SectionId};

/// Compose a README from fixed sections in the terminal
#[derive(Parser, Debug)]
#[command(name = "readme-composer", version, about, long_about = None)]
struct Cli {
    /// Start with a section excluded (repeatable)
    #[arg(long, value_name = "SECTION")]
    hide: Vec<SectionId>,

    /// Seed a section's text; `\n` in TEXT becomes a newline (repeatable)
    #[arg(long, value_name = "SECTION=TEXT")]
    set: Vec<SectionAssignment>,

    /// Print the composed Markdown to stdout and exit
    #[arg(long)]
    print: bool,

    /// Print the rendered HTML to stdout and exit
    #[arg(long)]
    html: bool,

    /// Save README.md into the output directory and exit
    #[arg(long)]
    write: bool,

    /// Directory README.md is saved into
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// What the preview pane starts with
    #[arg(long, value_enum)]
    preview: Option<PreviewMode>,

    /// List section keys in document order and exit
    #[arg(long)]
    list_sections: bool,

    /// Write log output to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

impl Cli {
    /// The flags that can be persisted with `--save`.
    fn config_flags(&self) -> ConfigFlags {
        ConfigFlags {
            hide: self.hide.clone(),
            output_dir: self.output_dir.clone(),
            preview: self.preview,
            log_file: self.log_file.clone(),
        }
    }

    const fn is_headless(&self) -> bool {
        self.print || self.html || self.write || self.list_sections
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());
    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

fn print_sections(out: &mut impl Write) -> Result<()> {
    for spec in &SECTIONS {
        let indent = if spec.is_nested() { "  " } else { "" };
        writeln!(out, "{indent}{:<18}{}", spec.key, spec.title)?;
    }
    Ok(())
}

fn run_headless(cli: &Cli, document: &DocumentState, output_dir: &Path) -> Result<()> {
    let mut out = std::io::stdout().lock();
    if cli.list_sections {
        print_sections(&mut out)?;
    }
    if cli.print {
        writeln!(out, "{}", document.compose_markdown())?;
    }
    if cli.html {
        write!(out, "{}", ComrakRenderer.render(&document.compose_markdown()))?;
    }
    if cli.write {
        let mut exporter = DirectoryExporter::new(output_dir);
        let path = export_to_file(document, &mut exporter)?;
        writeln!(out, "Saved {}", path.display())?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.config_flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_deref())?;
    tracing::debug!(?effective, "effective flags");

    let document = DocumentState::seeded(&effective.hide, &cli.set);
    let output_dir = effective
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    if cli.is_headless() {
        return run_headless(&cli, &document, &output_dir);
    }

    // Run the application
    let mut app = App::new(document)
        .with_output_dir(output_dir)
        .with_preview_mode(effective.preview.unwrap_or_default())
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    app.run().context("Application error")
}
