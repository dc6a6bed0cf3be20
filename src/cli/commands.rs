use clap::{Parser, Subcommand};

use crate::entity::DEFAULT_COLOR_HEX;

#[derive(Parser, Debug)]
#[command(name = "notepad")]
#[command(version, about = "Colored, tagged notes kept in a document collection")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new notepad project in the current directory
    Init {
        /// Name of the note collection
        #[arg(long, default_value = "notes")]
        collection: String,
    },

    /// Add a new note
    Add {
        /// Note title (must not already be used by another note)
        title: String,

        /// Note content
        #[arg(long, short = 'c', conflicts_with = "stdin")]
        content: Option<String>,

        /// Display color as #RRGGBB or #AARRGGBB
        #[arg(long, default_value = DEFAULT_COLOR_HEX)]
        color: String,

        /// Tags (repeatable, or comma-separated)
        #[arg(long = "tag", short = 't')]
        tags: Vec<String>,

        /// Read content from stdin
        #[arg(long)]
        stdin: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all notes
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single note
    Show {
        /// Note ID or a unique prefix of it
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Edit a note; fields not given keep their current values
    Edit {
        /// Note ID or a unique prefix of it
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New content
        #[arg(long, short = 'c', conflicts_with = "stdin")]
        content: Option<String>,

        /// New display color
        #[arg(long)]
        color: Option<String>,

        /// Replace all tags (repeatable, or comma-separated)
        #[arg(long = "tag", short = 't', conflicts_with = "clear_tags")]
        tags: Vec<String>,

        /// Remove all tags
        #[arg(long)]
        clear_tags: bool,

        /// Read new content from stdin
        #[arg(long)]
        stdin: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a note
    Delete {
        /// Note ID or a unique prefix of it
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Search notes by title, content, or tag (case-insensitive)
    Search {
        /// Text to look for; empty matches everything
        #[arg(default_value = "")]
        query: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
