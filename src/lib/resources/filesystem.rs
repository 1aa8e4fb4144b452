//! Module implementing loaders for files on the filesystem.

use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use super::Loader;


/// Loader for files from given directory.
///
/// A resource named `foo` is the file `foo.<ext>` in the loader's directory,
/// for the first of the loader's extensions that such a file exists for.
#[derive(Debug)]
pub struct FileLoader {
    directory: PathBuf,
    extensions: Vec<String>,
}

impl FileLoader {
    /// Create a loader which only loads files
    /// that have one of the extensions given.
    pub fn for_extensions<D: AsRef<Path>, I, S>(directory: D, extensions: I) -> Self
        where I: IntoIterator<Item=S>, S: ToString
    {
        FileLoader{
            directory: directory.as_ref().to_owned(),
            extensions: extensions.into_iter()
                .map(|e| e.to_string().trim().to_lowercase())
                .collect(),
        }
    }

    #[inline]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Resolve the path of the file for given resource name.
    pub fn resolve(&self, name: &str) -> io::Result<PathBuf> {
        if name.is_empty() || name.contains(|c: char| c == '/' || c == '\\') {
            return Err(io::Error::new(io::ErrorKind::InvalidInput,
                format!("invalid resource name `{}`", name)));
        }
        for ext in &self.extensions {
            let path = self.directory.join(format!("{}.{}", name, ext));
            trace!("Looking for resource `{}` at {}", name, path.display());
            if path.is_file() {
                return Ok(path);
            }
        }
        Err(io::Error::new(io::ErrorKind::NotFound,
            format!("resource `{}` not found in {}", name, self.directory.display())))
    }
}

impl Loader for FileLoader {
    type Item = File;
    type Err = io::Error;

    fn load<'n>(&self, name: &'n str) -> Result<Self::Item, Self::Err> {
        let path = self.resolve(name)?;
        fs::OpenOptions::new().read(true).open(path)
    }
}


/// Wrapper around FileLoader that loads the entire content of the files.
#[derive(Debug)]
pub struct BytesLoader {
    inner: FileLoader,
}

impl BytesLoader {
    #[inline]
    pub fn new(inner: FileLoader) -> Self {
        BytesLoader{inner}
    }

    #[inline]
    pub fn file_loader(&self) -> &FileLoader {
        &self.inner
    }
}

impl Loader for BytesLoader {
    type Item = Vec<u8>;
    type Err = io::Error;

    /// Load a file resource as its byte content.
    fn load<'n>(&self, name: &'n str) -> Result<Self::Item, Self::Err> {
        let file = self.inner.load(name)?;

        let mut bytes = match file.metadata() {
            Ok(stat) => Vec::with_capacity(stat.len() as usize),
            Err(e) => {
                warn!("Failed to stat file of resource `{}` to obtain its size: {}",
                    name, e);
                Vec::new()
            },
        };

        let mut reader = BufReader::new(file);
        reader.read_to_end(&mut bytes)?;
        debug!("Loaded {} bytes of resource `{}`", bytes.len(), name);
        Ok(bytes)
    }
}
