use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use playlist_config::{IdStrategy, PlaylistConfig};
use playlist_core::history::Hydration;
use playlist_core::{render_playlist, run_shell, PlaylistEditor};

/// A playlist editor with undo/redo and persisted state.
#[derive(Parser, Debug)]
#[command(name = "playlist", version, about)]
struct Cli {
    /// Config file (defaults to `playlist.json` next to the executable).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the playlist database.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Storage key of the playlist to edit.
    #[arg(long, global = true)]
    key: Option<String>,

    /// How new song ids are generated.
    #[arg(long, global = true)]
    ids: Option<IdStrategy>,

    /// Keep everything in memory; nothing is read from or written to disk.
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the playlist.
    List,
    /// Add a song to the end of the playlist.
    Add { title: String },
    /// Remove the song at a position shown by `list` (starting at 1).
    ///
    /// Ids are regenerated on every start, so one-shot removal goes by
    /// position; `shell` also accepts ids.
    Remove { position: usize },
    /// Remove every song.
    Clear,
    /// Edit interactively; undo/redo are available within the session.
    Shell,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(PlaylistConfig::config_path);
    let mut config = PlaylistConfig::load_or_create(&config_path);
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.display().to_string();
    }
    if let Some(key) = &cli.key {
        config.storage_key = key.clone();
    }
    if let Some(ids) = cli.ids {
        config.id_strategy = ids;
    }
    config.sanitize();

    tracing::info!(key = %config.storage_key, "Starting playlist");

    let mut editor = PlaylistEditor::open(&config, cli.ephemeral)?;
    if let Hydration::Discarded(e) = editor.hydration() {
        eprintln!("warning: saved playlist could not be read and was reset ({e})");
    }

    match cli.command.unwrap_or(Commands::List) {
        Commands::List => println!("{}", render_playlist(editor.songs())),
        Commands::Add { title } => {
            let song = editor.add_song(&title)?;
            println!("added {} [{}]", song.title(), song.id());
        }
        Commands::Remove { position } => match editor.remove_at(position) {
            Some(song) => println!("removed {}. {}", position, song.title()),
            None => anyhow::bail!(
                "no song at position {position} (playlist has {})",
                editor.songs().len()
            ),
        },
        Commands::Clear => {
            editor.clear();
            println!("playlist cleared");
        }
        Commands::Shell => {
            let stdin = std::io::stdin();
            run_shell(
                &mut editor,
                stdin.lock(),
                std::io::stdout(),
                config.echo_after_edit,
            )?;
        }
    }

    editor.unmount();
    Ok(())
}
