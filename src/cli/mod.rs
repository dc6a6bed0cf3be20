mod commands;
mod handlers;

pub use commands::{Cli, Commands};
pub use handlers::{
    handle_add, handle_delete, handle_edit, handle_init, handle_list, handle_search, handle_show,
    EditArgs, NewNoteArgs,
};
