//! Puzzle inputs read from local files

use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Where puzzle inputs come from
#[derive(Debug, Clone)]
pub enum InputSource {
    /// `{dir}/{year}_day{day:02}.txt`, or `..._example.txt` when `example` is set
    Directory { dir: PathBuf, example: bool },
    /// One file used for whichever day is run
    File(PathBuf),
}

impl InputSource {
    /// Path the input for a year/day is expected at
    pub fn path(&self, year: u16, day: u8) -> PathBuf {
        match self {
            InputSource::Directory { dir, example: false } => {
                dir.join(format!("{}_day{:02}.txt", year, day))
            }
            InputSource::Directory { dir, example: true } => {
                dir.join(format!("{}_day{:02}_example.txt", year, day))
            }
            InputSource::File(path) => path.clone(),
        }
    }

    /// Read the input for a year/day
    pub fn read(&self, year: u16, day: u8) -> Result<String, InputError> {
        let path = self.path(year, day);
        log::debug!("reading {}/{:02} input from {}", year, day, path.display());
        match fs::read_to_string(&path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(InputError::Missing(path)),
            Err(source) => Err(InputError::Io { path, source }),
        }
    }

    pub fn is_single_file(&self) -> bool {
        matches!(self, InputSource::File(_))
    }
}
