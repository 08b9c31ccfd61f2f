//! Line-oriented file helpers shared by the store and the index.

mod atomic;

pub use atomic::{append_line, atomic_write_lines, file_exists, read_lines};
