//! CLI for MuseViz - multi-perspective concept visualization.

use clap::{Args, Parser, Subcommand, ValueEnum};
use museviz::{
    GeminiModel, GeminiProvider, ImageEditor, ImageFormat, ImageProvider, Session, SessionPhase,
    Style, DEFAULT_PERSPECTIVES,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "museviz")]
#[command(about = "Generate and edit multi-perspective concept galleries via the Gemini API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a gallery: one image per perspective
    Gallery(GalleryArgs),

    /// Apply an edit instruction to an existing image
    Edit(EditArgs),

    /// List available styles and the default perspectives
    Styles,
}

#[derive(Args)]
struct GalleryArgs {
    /// The concept description to visualize
    description: String,

    /// Art-direction style
    #[arg(short, long, value_enum, default_value = "realistic")]
    style: StyleArg,

    /// Perspective label (repeatable; defaults to the standard four)
    #[arg(short, long = "perspective")]
    perspectives: Vec<String>,

    /// Directory to write the generated images into
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Gemini model variant
    #[arg(long, value_enum, default_value = "flash")]
    model: ModelArg,
}

#[derive(Args)]
struct EditArgs {
    /// Path to the image to edit
    input: PathBuf,

    /// Free-text edit instruction
    instruction: String,

    /// Output file path (defaults to edited.<ext>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Gemini model variant
    #[arg(long, value_enum, default_value = "flash")]
    model: ModelArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StyleArg {
    Realistic,
    Sketch,
    Surreal,
    Cinematic,
    Fantasy,
    #[value(name = "line-art")]
    LineArt,
}

impl From<StyleArg> for Style {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Realistic => Style::Realistic,
            StyleArg::Sketch => Style::Sketch,
            StyleArg::Surreal => Style::Surreal,
            StyleArg::Cinematic => Style::Cinematic,
            StyleArg::Fantasy => Style::Fantasy,
            StyleArg::LineArt => Style::LineArt,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModelArg {
    Flash,
    Pro,
}

impl From<ModelArg> for GeminiModel {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Flash => GeminiModel::FlashImage,
            ModelArg::Pro => GeminiModel::ProImage,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Gallery(args) => {
            generate_gallery(args, cli.json).await?;
        }
        Commands::Edit(args) => {
            edit_image(args, cli.json).await?;
        }
        Commands::Styles => {
            list_styles(cli.json)?;
        }
    }

    Ok(())
}

fn build_provider(model: ModelArg) -> anyhow::Result<Arc<dyn ImageProvider>> {
    let provider = GeminiProvider::builder().model(model.into()).build()?;
    Ok(Arc::new(provider))
}

/// Turns a perspective label into a filename-safe fragment.
fn slug(label: &str) -> String {
    label
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

async fn generate_gallery(args: GalleryArgs, json_output: bool) -> anyhow::Result<()> {
    let provider = build_provider(args.model)?;
    let mut session = Session::new(provider);

    let perspectives: Vec<String> = if args.perspectives.is_empty() {
        DEFAULT_PERSPECTIVES.iter().map(|p| p.to_string()).collect()
    } else {
        args.perspectives.clone()
    };

    let outcome = session
        .generate_with_perspectives(&args.description, args.style.into(), &perspectives)
        .await;

    if let Err(e) = outcome {
        if let SessionPhase::Failed { message } = session.phase() {
            eprintln!("{message}");
        }
        anyhow::bail!(e);
    }

    std::fs::create_dir_all(&args.out_dir)?;

    let mut saved = Vec::with_capacity(session.results().len());
    for (i, result) in session.results().iter().enumerate() {
        let ext = ImageFormat::from_mime(&result.mime_type)
            .map(|f| f.extension())
            .unwrap_or("png");
        let path = args
            .out_dir
            .join(format!("{}_{}.{}", i + 1, slug(&result.perspective), ext));
        std::fs::write(&path, result.image.decode()?)?;
        saved.push((result, path));
    }

    if json_output {
        let entries: Vec<_> = saved
            .iter()
            .map(|(result, path)| {
                serde_json::json!({
                    "id": result.id,
                    "perspective": result.perspective,
                    "mime_type": result.mime_type,
                    "output": path.display().to_string(),
                })
            })
            .collect();
        let summary = serde_json::json!({
            "type": "gallery",
            "success": true,
            "style": Style::from(args.style).as_str(),
            "images": entries,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Generated {} images ({} style):",
            saved.len(),
            Style::from(args.style)
        );
        for (result, path) in &saved {
            println!("  {} -> {}", result.perspective, path.display());
        }
    }

    Ok(())
}

async fn edit_image(args: EditArgs, json_output: bool) -> anyhow::Result<()> {
    let provider = build_provider(args.model)?;
    let editor = ImageEditor::new(provider);

    let bytes = std::fs::read(&args.input)?;
    let mime_type = ImageFormat::from_magic_bytes(&bytes)
        .map(|f| f.mime_type())
        .unwrap_or("image/png");

    let original = museviz::DataUrl::from_bytes(mime_type, &bytes);
    let edited = editor.edit(&original, &args.instruction).await?;

    let ext = ImageFormat::from_mime(&edited.mime_type)
        .map(|f| f.extension())
        .unwrap_or("png");
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("edited.{ext}")));

    let replacement = edited.image.decode()?;
    std::fs::write(&output, &replacement)?;

    if json_output {
        let summary = serde_json::json!({
            "type": "edit",
            "success": true,
            "output": output.display().to_string(),
            "mime_type": edited.mime_type,
            "size_bytes": replacement.len(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Edited image: {} ({} bytes, {})",
            output.display(),
            replacement.len(),
            edited.mime_type
        );
    }

    Ok(())
}

fn list_styles(json_output: bool) -> anyhow::Result<()> {
    if json_output {
        let summary = serde_json::json!({
            "styles": Style::ALL.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
            "perspectives": DEFAULT_PERSPECTIVES,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Styles:");
        for style in Style::ALL {
            println!("  {}", style);
        }
        println!("\nDefault perspectives (gallery order):");
        for perspective in DEFAULT_PERSPECTIVES {
            println!("  {}", perspective);
        }
    }

    Ok(())
}
