//! Site Blueprint CLI
//!
//! Usage:
//!   site-blueprint [OPTIONS] <COMMAND>
//!
//! Commands:
//!   render      Render one page of a blueprint to stdout
//!   check       Report blueprint defects
//!   build       Export every page as static HTML
//!   serve       Serve pages from a blueprint over HTTP
//!   components  List registered component names

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};

use site_blueprint::build::{build_site, BuildOptions};
use site_blueprint::config::SiteConfig;
use site_blueprint::serve::serve_site;
use site_blueprint::{parse, ComponentRegistry, Site, Theme};

#[derive(Parser)]
#[command(name = "site-blueprint")]
#[command(about = "Render marketing sites from declarative JSON blueprints")]
struct Cli {
    /// Site configuration (defaults to ./site.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log resolution details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render one page of a blueprint to stdout
    Render {
        /// Blueprint JSON file (`-` for stdin)
        blueprint: PathBuf,

        /// Requested path
        #[arg(short, long, default_value = "/")]
        path: String,

        /// Theme file for color tokens (TOML format)
        #[arg(short, long)]
        theme: Option<PathBuf>,

        /// Annotate components with their blueprint descriptors
        #[arg(short, long)]
        debug: bool,

        /// Emit body content only, without the document wrapper
        #[arg(long)]
        fragment: bool,
    },

    /// Report unknown components, invalid props and broken internal links
    Check {
        /// Blueprint JSON file (`-` for stdin)
        blueprint: PathBuf,
    },

    /// Export every page as static HTML
    Build {
        /// Blueprint JSON file
        blueprint: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Remove the output directory first
        #[arg(long)]
        clean: bool,

        /// Theme file for color tokens (TOML format)
        #[arg(short, long)]
        theme: Option<PathBuf>,
    },

    /// Serve pages from a blueprint over HTTP
    Serve {
        /// Blueprint JSON file
        blueprint: PathBuf,

        #[arg(short, long)]
        port: Option<u16>,

        #[arg(short, long)]
        interface: Option<String>,

        /// Theme file for color tokens (TOML format)
        #[arg(short, long)]
        theme: Option<PathBuf>,
    },

    /// List registered component names
    Components,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(level));

    let config = match SiteConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => fail(&format!("Error loading config: {}", error_chain(&e))),
    };

    match cli.command {
        Command::Render {
            blueprint,
            path,
            theme,
            debug,
            fragment,
        } => {
            let html = config
                .render
                .html_config()
                .with_debug(debug || config.render.debug)
                .with_standalone(!fragment);
            let site = load_site(&blueprint, &config, theme.as_deref()).with_html(html);
            let page = site.render(&path);
            print!("{}", page.html);
        }
        Command::Check { blueprint } => {
            let site = load_site(&blueprint, &config, None);
            let warnings = site.lint();
            for warning in &warnings {
                eprintln!("{}", warning);
            }
            if !warnings.is_empty() {
                eprintln!("{} warning(s)", warnings.len());
                std::process::exit(1);
            }
            let components: usize = site.blueprint.pages.iter().map(|p| p.components().count()).sum();
            println!(
                "ok: {} pages, {} components",
                site.blueprint.pages.len(),
                components
            );
        }
        Command::Build {
            blueprint,
            output,
            clean,
            theme,
        } => {
            let site = load_site(&blueprint, &config, theme.as_deref())
                .with_html(config.render.html_config());
            let mut options = BuildOptions::from(&config.build);
            if let Some(output) = output {
                options.output = output;
            }
            options.clean |= clean;

            match build_site(&site, &options) {
                Ok(report) => println!(
                    "wrote {} files ({} bytes) to {}",
                    report.files.len(),
                    report.bytes,
                    options.output.display()
                ),
                Err(e) => fail(&format!("Error: {}", error_chain(&e))),
            }
        }
        Command::Serve {
            blueprint,
            port,
            interface,
            theme,
        } => {
            let site = load_site(&blueprint, &config, theme.as_deref())
                .with_html(config.render.html_config());
            for warning in site.lint() {
                log::warn!("{}", warning);
            }

            let mut serve = config.serve.clone();
            if let Some(port) = port {
                serve.port = port;
            }
            if let Some(interface) = interface {
                serve.interface = interface;
            }

            if let Err(e) = serve_site(Arc::new(site), &serve) {
                fail(&format!("Error: {}", error_chain(&e)));
            }
        }
        Command::Components => {
            for name in ComponentRegistry::builtin().names() {
                println!("{}", name);
            }
        }
    }
}

/// Read, parse and theme a blueprint, exiting with a report on failure
fn load_site(path: &Path, config: &SiteConfig, theme: Option<&Path>) -> Site {
    let (source, filename) = if path == Path::new("-") {
        let mut buffer = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buffer) {
            fail(&format!("Error reading from stdin: {}", e));
        }
        (buffer, "<stdin>".to_string())
    } else {
        match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => fail(&format!("Error reading file '{}': {}", path.display(), e)),
        }
    };

    let blueprint = match parse(&source) {
        Ok(blueprint) => blueprint,
        Err(e) => {
            eprint!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
    };

    let theme = match theme.or(config.render.theme.as_deref()) {
        Some(path) => match Theme::from_file(path) {
            Ok(theme) => theme,
            Err(e) => fail(&format!("Error loading theme '{}': {}", path.display(), e)),
        },
        None => Theme::default(),
    };

    Site::new(blueprint).with_theme(theme)
}

/// Display an error followed by its sources
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}
