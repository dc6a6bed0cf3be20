use clap::Parser;
use notepad::cli::{
    handle_add, handle_delete, handle_edit, handle_init, handle_list, handle_search, handle_show,
    Cli, Commands, EditArgs, NewNoteArgs,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Logs go to stderr so --json output on stdout stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { collection } => handle_init(collection),
        Commands::Add {
            title,
            content,
            color,
            tags,
            stdin,
            json,
        } => {
            handle_add(NewNoteArgs {
                title,
                content,
                color,
                tags,
                stdin,
                json,
            })
            .await
        }
        Commands::List { json } => handle_list(json).await,
        Commands::Show { id, json } => handle_show(id, json).await,
        Commands::Edit {
            id,
            title,
            content,
            color,
            tags,
            clear_tags,
            stdin,
            json,
        } => {
            handle_edit(EditArgs {
                id,
                title,
                content,
                color,
                tags,
                clear_tags,
                stdin,
                json,
            })
            .await
        }
        Commands::Delete { id, force } => handle_delete(id, force).await,
        Commands::Search { query, json } => handle_search(query, json).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
