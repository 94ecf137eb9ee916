use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

/// A corpus source, read at most once over the lifetime of a corpus model.
///
/// Either a path to a readable text file or an already-open reader. The
/// sentence splitter accepts arbitrary text chunks whose boundaries carry
/// no semantic meaning, so the whole source is handed over as one chunk.
pub(crate) enum Source {
	Path(PathBuf),
	Reader(Box<dyn Read>),
}

impl Source {
	/// Consumes the source and returns its entire text content.
	pub(crate) fn read_all(self) -> io::Result<String> {
		let mut contents = String::new();
		match self {
			Source::Path(path) => {
				File::open(path)?.read_to_string(&mut contents)?;
			}
			Source::Reader(mut reader) => {
				reader.read_to_string(&mut contents)?;
			}
		}
		Ok(contents)
	}
}
