pub mod file_io;
pub mod glob_expand;
pub mod location;
