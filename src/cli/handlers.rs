use std::env;
use std::io::{self, Read};
use std::path::PathBuf;

use crate::config::StoreConfig;
use crate::controller::{NoteController, SubmitOutcome};
use crate::entity::{is_valid_hex, Note, NoteDraft};
use crate::error::{NotepadError, Result};
use crate::storage::{LoroCollection, NoteStore, NOTEPAD_DIR};

/// Input for `notepad add`.
#[derive(Debug, Default)]
pub struct NewNoteArgs {
    pub title: String,
    pub content: Option<String>,
    pub color: String,
    pub tags: Vec<String>,
    pub stdin: bool,
    pub json: bool,
}

/// Input for `notepad edit`.
#[derive(Debug, Default)]
pub struct EditArgs {
    pub id: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub color: Option<String>,
    pub tags: Vec<String>,
    pub clear_tags: bool,
    pub stdin: bool,
    pub json: bool,
}

/// Find the project root by looking for .notepad/ or .git/
fn find_project_root() -> PathBuf {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut current = cwd.as_path();
    loop {
        if current.join(NOTEPAD_DIR).exists() || current.join(".git").exists() {
            return current.to_path_buf();
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return cwd,
        }
    }
}

async fn open_controller() -> Result<NoteController<LoroCollection>> {
    let root = find_project_root();
    let config = StoreConfig::load(&root.join(NOTEPAD_DIR))?;
    let collection = LoroCollection::open(&root, &config)?;

    NoteController::connect(NoteStore::new(collection)).await
}

fn read_stdin() -> Result<String> {
    let mut content = String::new();
    io::stdin().read_to_string(&mut content)?;
    Ok(content)
}

fn print_note_line(note: &Note) {
    let tags = if note.tags.is_empty() {
        String::new()
    } else {
        format!("  #{}", note.tags.join(" #"))
    };
    println!(
        "  {} [{}] {}{}",
        note.short_id(),
        note.display_color(),
        note.title,
        tags
    );
}

fn print_note_detail(note: &Note) {
    println!("ID:      {}", note.id);
    println!("Title:   {}", note.title);
    if is_valid_hex(&note.color_hex) {
        println!("Color:   {}", note.color_hex);
    } else {
        println!(
            "Color:   {} (stored value '{}' is not a color)",
            note.display_color(),
            note.color_hex
        );
    }
    if !note.tags.is_empty() {
        println!("Tags:    {}", note.tags.join(", "));
    }
    if !note.content.is_empty() {
        println!();
        println!("{}", note.content);
    }
}

pub fn handle_init(collection: String) -> Result<()> {
    let root = env::current_dir()?;
    let config = StoreConfig::with_collection(collection);

    let store = LoroCollection::init(&root, &config)?;
    config.save(store.notepad_dir())?;

    println!(
        "Initialized notepad project in {} (collection '{}')",
        root.display(),
        store.collection_name()
    );
    Ok(())
}

pub async fn handle_add(args: NewNoteArgs) -> Result<()> {
    let controller = open_controller().await?;

    let mut draft = NoteDraft::new(args.title);
    draft.color_hex = args.color;
    draft.tags = args.tags;
    if args.stdin {
        draft.content = read_stdin()?;
    } else if let Some(content) = args.content {
        draft.content = content;
    }

    match controller.submit(draft, None).await? {
        SubmitOutcome::Created(id) => {
            let note = controller.resolve(&id)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&note)?);
            } else {
                println!("Created note ({}) - {}", note.short_id(), note.title);
            }
        }
        // Duplicate titles are skipped without output.
        SubmitOutcome::DuplicateTitle | SubmitOutcome::Updated => {}
    }

    Ok(())
}

pub async fn handle_list(json: bool) -> Result<()> {
    let controller = open_controller().await?;
    let notes = controller.notes();

    if json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
    } else if notes.is_empty() {
        println!("No notes yet.");
    } else {
        println!("Notes ({}):\n", notes.len());
        for note in &notes {
            print_note_line(note);
        }
    }

    Ok(())
}

pub async fn handle_show(id: String, json: bool) -> Result<()> {
    let controller = open_controller().await?;
    let note = controller.resolve(&id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        print_note_detail(&note);
    }

    Ok(())
}

pub async fn handle_edit(args: EditArgs) -> Result<()> {
    let controller = open_controller().await?;
    let existing = controller.resolve(&args.id)?;

    let mut draft = NoteDraft::from_note(&existing);
    if let Some(title) = args.title {
        draft.title = title;
    }
    if args.stdin {
        draft.content = read_stdin()?;
    } else if let Some(content) = args.content {
        draft.content = content;
    }
    if let Some(color) = args.color {
        draft.color_hex = color;
    }
    if args.clear_tags {
        draft.tags.clear();
    } else if !args.tags.is_empty() {
        draft.tags = args.tags;
    }

    controller.submit(draft, Some(&existing.id)).await?;
    let updated = controller.resolve(&existing.id)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&updated)?);
    } else {
        println!("Updated note ({}) - {}", updated.short_id(), updated.title);
    }

    Ok(())
}

pub async fn handle_delete(id: String, force: bool) -> Result<()> {
    let controller = open_controller().await?;
    let note = controller.resolve(&id)?;

    // Confirm deletion unless --force is used
    if !force {
        eprintln!("Delete note ({}) - {}? [y/N] ", note.short_id(), note.title);

        if atty::is(atty::Stream::Stdin) {
            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Cancelled.");
                return Ok(());
            }
        } else {
            return Err(NotepadError::ConfirmationRequired);
        }
    }

    controller.delete_note(&note.id).await?;

    println!("Deleted note ({}) - {}", note.short_id(), note.title);
    Ok(())
}

pub async fn handle_search(query: String, json: bool) -> Result<()> {
    let controller = open_controller().await?;
    let results = controller.filtered(&query);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else if results.is_empty() {
        println!("No notes match '{}'.", query);
    } else {
        println!("Notes matching '{}':\n", query);
        for note in &results {
            print_note_line(note);
        }
    }

    Ok(())
}
