use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use waypage::compose::{compose, render_document};
use waypage::diagnostics::TracingSink;
use waypage::types::{PostContext, RenderContext, RenderMode, Section};
use waypage::{config, input, layout, output, toc};

const PAGE_CSS: &str = include_str!("../static/page.css");

/// Shared flags for commands that read a section list.
#[derive(clap::Args, Clone)]
struct SectionArgs {
    /// JSON file with the post's sections (array, or object with `sections`)
    #[arg(long)]
    sections: PathBuf,

    /// Renderer config; a missing file means stock defaults
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,
}

#[derive(Parser)]
#[command(name = "waypage")]
#[command(about = "Compose travel-blog posts from template sections")]
#[command(long_about = "\
Compose travel-blog posts from template sections

A post is an ordered list of sections. Each section names a template id, which
resolves to a section kind through versioned alias tables. The page layout is
chosen once from the full section list, placeholder content is filtered out,
and a table of contents is built from the rendered headings.

Section file:

  [
    { \"id\": \"s1\", \"templateId\": \"hero\", \"position\": 0,
      \"data\": { \"title\": \"Three Days in Porto\" } },
    { \"id\": \"s2\", \"templateId\": \"faq\", \"position\": 1, \"isActive\": true,
      \"data\": { \"faqs\": [{ \"question\": \"...\", \"answer\": \"...\" }] } }
  ]

Logging goes to stderr and follows RUST_LOG (default: waypage=info).

Run 'waypage gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compose a post into a standalone HTML document
    Render {
        #[command(flatten)]
        input: SectionArgs,
        /// JSON file with the post context (title, excerpt, slug, author)
        #[arg(long)]
        post: Option<PathBuf>,
        /// Active locale
        #[arg(long, default_value = "en")]
        lang: String,
        /// Show diagnostic blocks for dropped sections
        #[arg(long)]
        dev: bool,
        /// Write the document here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the statically extracted table of contents as JSON
    Toc {
        /// JSON file with the post's sections
        #[arg(long)]
        sections: PathBuf,
    },
    /// Print which layout the post would use
    Classify {
        #[command(flatten)]
        input: SectionArgs,
    },
    /// List every known template id grouped by section kind
    Templates {
        /// Renderer config whose aliases are merged over the built-in tables
        #[arg(long, default_value = "config.toml")]
        config: PathBuf,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "waypage=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Render {
            input,
            post,
            lang,
            dev,
            output,
        } => {
            let mut renderer_config = config::load_config(&input.config)?;
            if dev {
                renderer_config.mode = RenderMode::Development;
            }
            let sections = input::load_sections(&input.sections)?;
            let post = match post {
                Some(path) => input::load_post(&path)?,
                None => fallback_post(&input.sections),
            };
            let ctx = RenderContext::new(post, lang, renderer_config.mode);
            let registry = renderer_config.registry();

            tracing::info!(sections = sections.len(), mode = ?ctx.mode, "composing post");
            let page = compose(&sections, &ctx, &registry, &renderer_config, &TracingSink);
            let document = render_document(&page, &ctx, PAGE_CSS).into_string();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, document)?;
                    output::print_render_output(&page, &sections, Some(&path));
                }
                None => print!("{}", document),
            }
        }
        Command::Toc { sections } => {
            let sections = input::load_sections(&sections)?;
            let entries = toc::extract_headings(&sections);
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        Command::Classify { input } => {
            let renderer_config = config::load_config(&input.config)?;
            let sections: Vec<Section> = input::load_sections(&input.sections)?;
            let decision = layout::classify(
                &sections,
                &renderer_config.registry(),
                &renderer_config.layout.extra_html_template_ids,
            );
            output::print_classify_output(&decision, &sections);
        }
        Command::Templates { config } => {
            let renderer_config = config::load_config(&config)?;
            output::print_templates_output(&renderer_config.registry());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Post context when no `--post` file is given: the title comes from the
/// sections file name.
fn fallback_post(sections_path: &Path) -> PostContext {
    let slug = sections_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    PostContext {
        title: slug.replace(['-', '_'], " "),
        slug,
        ..Default::default()
    }
}
