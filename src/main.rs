//! Bean - render markdown as ANSI-formatted terminal text.
//!
//! # Usage
//!
//! ```bash
//! bean README.md
//! bean --width 72 --header-style flanked notes.md
//! cat notes.md | bean
//! bean --watch README.md
//! ```

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use bean::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use bean::perf;
use bean::render::{HeaderStyle, ListGap, Renderer};
use bean::source::Source;
use bean::terminal;
use bean::watcher::{DEFAULT_DEBOUNCE, DocumentWatcher};

/// Render markdown as ANSI-formatted terminal text
#[derive(Parser, Debug)]
#[command(name = "bean", version, about, long_about = None)]
struct Cli {
    /// Markdown file to render (standard input when omitted or `-`)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Output width in columns (defaults to the terminal width)
    #[arg(short, long, value_name = "COLUMNS")]
    width: Option<usize>,

    /// How to decorate headers
    #[arg(long, value_enum)]
    header_style: Option<HeaderStyle>,

    /// Blank lines between a paragraph and a following list
    #[arg(long, value_enum)]
    list_gap: Option<ListGap>,

    /// Wrap list items with a hanging indent
    #[arg(long)]
    wrap_lists: bool,

    /// Re-render whenever the file changes
    #[arg(long, requires = "file")]
    watch: bool,

    /// Print read and render timings to stderr
    #[arg(long)]
    perf: bool,

    /// Write render debug events to a file
    #[arg(long, value_name = "PATH")]
    render_debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn render_once(source: &Source, flags: &ConfigFlags) -> Result<String> {
    let lines = {
        let _scope = perf::scope("read");
        source.read_lines()?
    };
    perf::log_event("read.lines", lines.len().to_string());

    // Width is queried once per render, never mid-document.
    let options = flags.render_options(terminal::width);
    perf::log_event("render.width", options.width.to_string());

    let _scope = perf::scope("render");
    Ok(Renderer::new(options).render(&lines))
}

fn print_document(out: &mut impl Write, text: &str) -> io::Result<()> {
    out.write_all(text.as_bytes())?;
    if !text.is_empty() && !text.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    out.flush()
}

fn watch(source: &Source, flags: &ConfigFlags) -> Result<()> {
    let Source::File(path) = source else {
        tracing::warn!("--watch ignored when reading standard input");
        return Ok(());
    };
    let mut watcher = DocumentWatcher::new(path, DEFAULT_DEBOUNCE)
        .with_context(|| format!("Failed to watch {}", path.display()))?;

    let stdout = io::stdout();
    while watcher.wait_for_change() {
        tracing::debug!(path = %watcher.document().display(), "document changed");
        match render_once(source, flags) {
            Ok(text) => {
                let mut out = stdout.lock();
                terminal::clear_screen(&mut out)?;
                print_document(&mut out, &text)?;
            }
            // The file may be mid-save; keep the last render on screen.
            Err(err) => tracing::warn!("{err:#}"),
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

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

    perf::set_enabled(effective.perf);
    let render_debug_log_path = effective
        .render_debug_log
        .clone()
        .or_else(|| std::env::var_os("BEAN_RENDER_DEBUG_LOG").map(PathBuf::from));
    if let Err(err) = perf::set_debug_log_path(render_debug_log_path.as_deref()) {
        tracing::warn!(
            "Failed to initialize render debug log {}: {}",
            render_debug_log_path
                .as_ref()
                .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string()),
            err
        );
    }

    // Saving or clearing defaults without a document is a complete run.
    if cli.file.is_none() && (cli.save || cli.clear) {
        return Ok(());
    }

    let source = Source::from_arg(cli.file);
    let text = render_once(&source, &effective)
        .with_context(|| format!("Failed to render {}", source.name()))?;
    print_document(&mut io::stdout().lock(), &text)?;

    if effective.watch {
        watch(&source, &effective)?;
    }
    Ok(())
}
