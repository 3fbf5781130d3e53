pub mod editor;
pub mod forms;
