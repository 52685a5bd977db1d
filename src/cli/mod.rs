use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{load_file_config, resolve_config_path, FileConfig};
use crate::core::package::PackageId;
use crate::error::{DepictError, Result};
use crate::graph::collect::{collect, Collection};
use crate::graph::viz;
use crate::graph::DependencyGraph;
use crate::render::{Graphviz, ImageFormat};
use crate::source::traits::MetadataSource;
use crate::source::{source_for, SourceId, ToolPaths};
use crate::util::output;

const DEFAULT_MAX_DEPTH: usize = 3;

#[derive(Parser, Debug)]
#[command(name = "depict")]
#[command(about = "Package dependency tree imager", long_about = None)]
pub struct Cli {
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub no_color: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Render(RenderArgs),
    Show(ShowArgs),
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    #[arg(short = 'p', long)]
    pub package: String,
    #[arg(short = 'o', long)]
    pub output: PathBuf,
    #[arg(short = 'd', long)]
    pub max_depth: Option<usize>,
    #[arg(short = 's', long)]
    pub source: Option<String>,
    #[arg(short = 'f', long)]
    pub format: Option<String>,
    #[arg(long)]
    pub graphviz: Option<PathBuf>,
    #[arg(long)]
    pub pip: Option<PathBuf>,
    #[arg(long)]
    pub apt_cache: Option<PathBuf>,
    #[arg(short = 'y', long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    #[arg(short = 'p', long)]
    pub package: String,
    #[arg(short = 'd', long)]
    pub max_depth: Option<usize>,
    #[arg(short = 's', long)]
    pub source: Option<String>,
    #[arg(short = 'f', long, default_value = "tree")]
    pub format: String,
    #[arg(long)]
    pub pip: Option<PathBuf>,
    #[arg(long)]
    pub apt_cache: Option<PathBuf>,
}

pub fn run() {
    let cli = Cli::parse();
    if cli.no_color {
        console::set_colors_enabled(false);
    }
    if let Err(err) = dispatch(cli) {
        output::error(&err.to_string());
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<()> {
    let file = load_config(cli.config)?;
    match cli.command {
        Commands::Render(args) => handle_render(args, &file),
        Commands::Show(args) => handle_show(args, &file),
    }
}

fn load_config(flag: Option<PathBuf>) -> Result<FileConfig> {
    match resolve_config_path(flag)? {
        Some(path) => Ok(load_file_config(&path)?),
        None => Ok(FileConfig::default()),
    }
}

fn handle_render(args: RenderArgs, file: &FileConfig) -> Result<()> {
    let source_id = resolve_source(args.source.as_deref(), file)?;
    let max_depth = resolve_max_depth(args.max_depth, file);
    let tools = resolve_tools(args.pip, args.apt_cache, file);
    let graphviz = resolve_graphviz(args.graphviz, file);
    let format = resolve_image_format(args.format.as_deref(), file)?;

    if args.output.exists() && !args.yes {
        let prompt = format!("Overwrite existing file {}?", args.output.display());
        let confirmed = output::confirm(&prompt, false)
            .map_err(|err| DepictError::Other(anyhow::Error::new(err)))?;
        if !confirmed {
            output::info("aborted; existing file left untouched");
            return Ok(());
        }
    }

    let root = PackageId::new(args.package);
    let source = source_for(&source_id, &tools);
    let collection = collect(source.as_ref(), &root, max_depth)?;
    report_missing(&collection, source.as_ref());

    output::render_op(&format!(
        "{} -T{} -> {}",
        graphviz.display(),
        format.as_str(),
        args.output.display()
    ));
    let renderer = Graphviz::new(graphviz, format);
    renderer.render(&collection.graph, &args.output)?;

    println!(
        "dependency graph for '{}' written to {}",
        root.as_str(),
        args.output.display()
    );
    Ok(())
}

fn handle_show(args: ShowArgs, file: &FileConfig) -> Result<()> {
    let source_id = resolve_source(args.source.as_deref(), file)?;
    let max_depth = resolve_max_depth(args.max_depth, file);
    let tools = resolve_tools(args.pip, args.apt_cache, file);

    let root = PackageId::new(args.package);
    let source = source_for(&source_id, &tools);
    let collection = collect(source.as_ref(), &root, max_depth)?;
    report_missing(&collection, source.as_ref());

    let graph = &collection.graph;
    match args.format.to_ascii_lowercase().as_str() {
        "tree" => {
            print!("{}", viz::render_tree(&graph.root, &graph.edges));
            Ok(())
        }
        "flat" => {
            print!("{}", viz::render_flat(&graph.root, &graph.edges));
            Ok(())
        }
        "dot" => {
            print!("{}", viz::render_dot(&graph.root, &graph.edges));
            Ok(())
        }
        "json" => {
            println!(
                "{}",
                serde_json::to_string_pretty(&graph_to_json(graph))
                    .map_err(|err| DepictError::Other(anyhow::Error::new(err)))?
            );
            Ok(())
        }
        other => Err(DepictError::Other(anyhow::anyhow!(format!(
            "unknown show format '{}'",
            other
        )))),
    }
}

fn report_missing(collection: &Collection, source: &dyn MetadataSource) {
    for package in &collection.missing {
        output::warn(&format!(
            "package '{}' not found by {}; treating it as a leaf",
            package.as_str(),
            source.id()
        ));
    }
}

fn graph_to_json(graph: &DependencyGraph) -> serde_json::Value {
    let mut edges = serde_json::Map::new();
    let mut parents: Vec<&PackageId> = graph.edges.keys().collect();
    parents.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    for parent in parents {
        let children: Vec<serde_json::Value> = graph.edges[parent]
            .iter()
            .map(|child| serde_json::Value::String(child.as_str().to_string()))
            .collect();
        edges.insert(
            parent.as_str().to_string(),
            serde_json::Value::Array(children),
        );
    }
    serde_json::json!({
        "root": graph.root.as_str(),
        "edges": edges,
    })
}

fn parse_source(input: &str) -> Result<SourceId> {
    match input.to_ascii_lowercase().as_str() {
        "pip" => Ok(SourceId::Pip),
        "apt" => Ok(SourceId::Apt),
        _ => Err(DepictError::Other(anyhow::anyhow!(format!(
            "unknown metadata source '{}'",
            input
        )))),
    }
}

fn parse_image_format(input: &str) -> Result<ImageFormat> {
    match input.to_ascii_lowercase().as_str() {
        "png" => Ok(ImageFormat::Png),
        "svg" => Ok(ImageFormat::Svg),
        _ => Err(DepictError::Other(anyhow::anyhow!(format!(
            "unknown image format '{}'",
            input
        )))),
    }
}

fn resolve_source(flag: Option<&str>, file: &FileConfig) -> Result<SourceId> {
    if let Some(input) = flag {
        return parse_source(input);
    }
    if let Some(input) = file.defaults.as_ref().and_then(|d| d.source.as_deref()) {
        return parse_source(input);
    }
    Ok(SourceId::Pip)
}

fn resolve_max_depth(flag: Option<usize>, file: &FileConfig) -> usize {
    flag.or_else(|| file.defaults.as_ref().and_then(|d| d.max_depth))
        .unwrap_or(DEFAULT_MAX_DEPTH)
}

fn resolve_image_format(flag: Option<&str>, file: &FileConfig) -> Result<ImageFormat> {
    if let Some(input) = flag {
        return parse_image_format(input);
    }
    if let Some(input) = file.defaults.as_ref().and_then(|d| d.format.as_deref()) {
        return parse_image_format(input);
    }
    Ok(ImageFormat::Png)
}

fn resolve_graphviz(flag: Option<PathBuf>, file: &FileConfig) -> PathBuf {
    flag.or_else(|| {
        file.tools
            .as_ref()
            .and_then(|t| t.graphviz.as_ref())
            .map(PathBuf::from)
    })
    .unwrap_or_else(|| PathBuf::from("dot"))
}

fn resolve_tools(
    pip: Option<PathBuf>,
    apt_cache: Option<PathBuf>,
    file: &FileConfig,
) -> ToolPaths {
    let tools = file.tools.as_ref();
    ToolPaths {
        pip: pip
            .or_else(|| tools.and_then(|t| t.pip.as_ref()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("pip")),
        apt_cache: apt_cache
            .or_else(|| tools.and_then(|t| t.apt_cache.as_ref()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("apt-cache")),
    }
}
