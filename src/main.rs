use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use docfs::{extract_from, Arg, Backend, PlainFormatter, Renderer, SiteConfig};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docfs", version, about = "Browse the layered site tree and cut code snippets")]
struct Cli {
    /// Directory with the site's own pages [default: ./_content or ../../_content]
    #[arg(long, env = "DOCFS_CONTENT")]
    content: Option<PathBuf>,

    /// Go root directory
    #[arg(long, env = "GOROOT")]
    goroot: Option<PathBuf>,

    /// ZIP archive layered below the content directory (repeatable)
    #[arg(long = "archive")]
    archives: Vec<PathBuf>,

    /// Directory loaded into memory, layered below the archives (repeatable)
    #[arg(long = "snapshot")]
    snapshots: Vec<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a file
    Cat { path: String },

    /// List a directory
    Ls {
        #[arg(default_value = ".")]
        path: String,
        #[arg(long)]
        json: bool,
    },

    /// Show a file's metadata as JSON
    Stat { path: String },

    /// Extract a snippet: [START [END]] [LINE] [HLmarker]
    Snippet {
        file: String,
        args: Vec<Arg>,
        #[arg(long, value_enum, default_value_t = Output::Text)]
        output: Output,
    },

    /// Print the resolved configuration
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum Output {
    Text,
    Json,
    Code,
    Play,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    if let Command::Config = cli.command {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let fs = config.open().context("Failed to assemble site filesystem")?;
    run(cli.command, &fs)
}

fn run(command: Command, fs: &impl Backend) -> Result<()> {
    let mut stdout = std::io::stdout().lock();

    match command {
        Command::Cat { path } => {
            let data = fs.read(&path)?;
            stdout.write_all(&data)?;
        }
        Command::Ls { path, json } => {
            let entries = fs.read_dir(&path)?;
            if json {
                writeln!(stdout, "{}", serde_json::to_string_pretty(&entries)?)?;
            } else {
                for entry in entries {
                    let suffix = if entry.is_dir { "/" } else { "" };
                    writeln!(stdout, "{}{}", entry.name, suffix)?;
                }
            }
        }
        Command::Stat { path } => {
            let file = fs.open(&path)?;
            writeln!(stdout, "{}", serde_json::to_string_pretty(file.metadata())?)?;
        }
        Command::Snippet { file, args, output } => match output {
            Output::Text => {
                let excerpt = extract_from(fs, &file, &args)?;
                stdout.write_all(&excerpt.text)?;
            }
            Output::Json => {
                let excerpt = extract_from(fs, &file, &args)?;
                writeln!(stdout, "{}", serde_json::to_string_pretty(&excerpt)?)?;
            }
            Output::Code => {
                let renderer = Renderer::new(fs, PlainFormatter);
                write!(stdout, "{}", renderer.code(&file, &args))?;
            }
            Output::Play => {
                let renderer = Renderer::new(fs, PlainFormatter);
                write!(stdout, "{}", renderer.play(&file, &args))?;
            }
        },
        Command::Config => {}
    }

    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<SiteConfig> {
    let content = match &cli.content {
        Some(dir) => dir.clone(),
        None => {
            let cwd = std::env::current_dir().context("Failed to read working directory")?;
            SiteConfig::default_content_dir(&cwd)
        }
    };

    let mut config = SiteConfig::new(content);
    for archive in &cli.archives {
        config = config.with_archive(archive);
    }
    for dir in &cli.snapshots {
        config = config.with_snapshot(dir);
    }
    if let Some(goroot) = &cli.goroot {
        config = config.with_goroot(goroot);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet(words: &[&str]) -> (String, Vec<Arg>, Output) {
        let cli = Cli::try_parse_from(["docfs", "snippet"].iter().chain(words)).unwrap();
        match cli.command {
            Command::Snippet { file, args, output } => (file, args, output),
            _ => panic!("expected the snippet command"),
        }
    }

    #[test]
    fn test_snippet_options_after_locators() {
        let (file, args, output) = snippet(&["f.go", "/a/", "--output", "json"]);
        assert_eq!(file, "f.go");
        assert_eq!(args, vec![Arg::Str("/a/".into())]);
        assert!(matches!(output, Output::Json));
    }

    #[test]
    fn test_snippet_locator_words() {
        let (_, args, output) = snippet(&["--output", "play", "f.go", "/a/", "$", "3", "HLx"]);
        assert_eq!(
            args,
            vec![
                Arg::Str("/a/".into()),
                Arg::Str("$".into()),
                Arg::Int(3),
                Arg::Str("HLx".into()),
            ]
        );
        assert!(matches!(output, Output::Play));
    }

    #[test]
    fn test_layer_flags() {
        let cli = Cli::try_parse_from([
            "docfs",
            "--content",
            "site",
            "--archive",
            "a.zip",
            "--snapshot",
            "extra",
            "config",
        ])
        .unwrap();
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.content_dir, PathBuf::from("site"));
        assert_eq!(config.archives, vec![PathBuf::from("a.zip")]);
        assert_eq!(config.snapshots, vec![PathBuf::from("extra")]);
    }
}
