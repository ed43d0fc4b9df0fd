use std::io::{Cursor, Write};

use flate2::Compression;
use flate2::write::GzEncoder;
use tar::{Builder, EntryType, Header};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

enum Entry {
    File { path: String, content: Vec<u8>, mode: u32 },
    Dir { path: String, mode: u32 },
}

/// Builds zip archives and gzip-compressed tarballs for extraction tests.
#[derive(Default)]
pub struct ArchiveBuilder {
    entries: Vec<Entry>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(self, path: &str, content: impl AsRef<[u8]>) -> Self {
        self.file_with_mode(path, content, 0o644)
    }

    pub fn file_with_mode(mut self, path: &str, content: impl AsRef<[u8]>, mode: u32) -> Self {
        self.entries.push(Entry::File {
            path: path.to_string(),
            content: content.as_ref().to_vec(),
            mode,
        });
        self
    }

    /// Empty directory entry; `path` must end with `/`.
    pub fn dir_with_mode(mut self, path: &str, mode: u32) -> Self {
        self.entries.push(Entry::Dir { path: path.to_string(), mode });
        self
    }

    pub fn finish_zip(self) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for entry in &self.entries {
            match entry {
                Entry::File { path, content, mode } => {
                    let options = SimpleFileOptions::default().unix_permissions(*mode);
                    writer.start_file(path.as_str(), options).unwrap();
                    writer.write_all(content).unwrap();
                }
                Entry::Dir { path, mode } => {
                    let options = SimpleFileOptions::default().unix_permissions(*mode);
                    writer.add_directory(path.as_str(), options).unwrap();
                }
            }
        }
        writer.finish().unwrap().into_inner()
    }

    pub fn finish_tar_gz(self) -> Vec<u8> {
        let encoder = GzEncoder::new(Vec::new(), Compression::default());
        let mut builder = Builder::new(encoder);
        for entry in &self.entries {
            let mut header = Header::new_gnu();
            match entry {
                Entry::File { path, content, mode } => {
                    header.set_size(content.len() as u64);
                    header.set_mode(*mode);
                    builder.append_data(&mut header, path, content.as_slice()).unwrap();
                }
                Entry::Dir { path, mode } => {
                    header.set_entry_type(EntryType::Directory);
                    header.set_size(0);
                    header.set_mode(*mode);
                    builder.append_data(&mut header, path, std::io::empty()).unwrap();
                }
            }
        }
        builder.into_inner().unwrap().finish().unwrap()
    }
}
