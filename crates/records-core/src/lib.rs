//! Records Core - flat-file record store with a derived name index.
//!
//! Records `(id, name, age)` live one per line in a data file. A second file
//! maps `name → id` and is regenerated in full from the data file after every
//! mutation. Name lookups narrow candidate ids through that index and then
//! resolve them against the data file.
//!
//! # Example
//!
//! ```rust,ignore
//! use records_core::{Console, RecordStore};
//!
//! #[tokio::main]
//! async fn main() -> records_core::Result<()> {
//!     let store = RecordStore::builder("./db").build();
//!     store.initialize().await?;
//!
//!     store.add(4, "Ali", 35).await?;
//!     let lines = store.search("Ali").await?;
//!     println!("{}", lines.join("\n"));
//!
//!     // Or, with user-facing status lines instead of errors:
//!     let console = Console::new(store);
//!     println!("{}", console.remove("Ali").await);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod console;
pub mod error;
pub mod fs;
pub mod index;
pub mod record;
pub mod search;
pub mod store;

pub use config::{PathsConfig, RemoveMatch, StoreConfig};
pub use console::Console;
pub use error::{Operation, Result, StoreError};
pub use index::{IndexBuilder, IndexEntry};
pub use record::Record;
pub use store::{RecordStore, RecordStoreBuilder};
