use clap::{Parser, Subcommand};
use metahead::config::SiteConfig;
use metahead::engine::Seo;
use metahead::imaging::RustBackend;
use metahead::subject::MapSubject;
use std::path::PathBuf;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "metahead")]
#[command(about = "Templated SEO/OpenGraph meta tag renderer")]
#[command(long_about = "\
Templated SEO/OpenGraph meta tag renderer

Renders the <head> metadata block for one subject (a page, a post, a
product) from per-tag markup templates and value providers. Ships with a
default tag set — title, og:title, og:image plus its derived type/width/
height/alt tags — all overridable.

Config (metahead.toml):

  root_path = \"/var/www/site\"        # filesystem root
  base_url = \"https://example.com/\"  # public URL the root maps to
  fallback_images = \"assets/og\"      # optional og:image fallback dir

  [og_image]
  width = 1200                       # og:image target box (defaults)
  height = 630
  upscaling = true

Subject (subject.json): a flat JSON object; scalar fields become subject
fields, e.g. {\"title\": \"Hello World\"}.

Set RUST_LOG=metahead=debug to watch value resolution.")]
#[command(version = version_string())]
struct Cli {
    /// Path to the site config
    #[arg(long, default_value = "metahead.toml", global = true)]
    config: PathBuf,

    /// Path to the subject JSON file (omit for an empty subject)
    #[arg(long, global = true)]
    subject: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the full head block (or a single tag with --tag)
    Render {
        /// Render only this tag
        #[arg(long)]
        tag: Option<String>,
    },
    /// Show each registered tag with its template and rendered output
    Inspect,
}

fn build_engine(cli: &Cli) -> Result<Seo, Box<dyn std::error::Error>> {
    let config = SiteConfig::load(&cli.config)?;
    let subject = match &cli.subject {
        Some(path) => MapSubject::from_json(&std::fs::read_to_string(path)?)?,
        None => MapSubject::new(),
    };
    Ok(Seo::new(config, Rc::new(RustBackend::new()), Rc::new(subject)))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let seo = build_engine(&cli)?;

    match cli.command {
        Command::Render { tag } => match tag {
            Some(tag) => println!("{}", seo.render_tag(&tag)?),
            None => println!("{}", seo.render()?),
        },
        Command::Inspect => {
            for tag in seo.tags() {
                println!("{tag}");
                println!("    Template: {}", seo.markup(tag));
                println!("    Rendered: {}", seo.render_tag(tag)?);
            }
        }
    }

    Ok(())
}
