//! Persisted user data for the utility tools.

mod notes;
mod todo;

pub use notes::NoteBook;
pub use todo::TodoList;
