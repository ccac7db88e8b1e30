// Source: https://stackoverflow.com/questions/45882329/read-large-files-line-by-line-in-rust
use std::{
    fs::File,
    io::{self, prelude::*},
    path::Path,
    rc::Rc,
};

/// Line iterator reusing a single buffer while the previous line is no longer borrowed.
pub struct TextReader {
    reader: io::BufReader<File>,
    buf: Rc<String>,
}

impl TextReader {
    pub fn open(path: impl AsRef<Path>, capacity: usize) -> io::Result<Self> {
        let file = File::open(path)?;
        let reader = io::BufReader::with_capacity(capacity, file);

        Ok(Self { reader, buf: Rc::new(String::with_capacity(1024)) })
    }
}

impl Iterator for TextReader {
    type Item = io::Result<Rc<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        let buf = match Rc::get_mut(&mut self.buf) {
            Some(buf) => {
                buf.clear();
                buf
            }
            // the caller kept the previous line alive
            None => {
                self.buf = Rc::new(String::with_capacity(1024));
                Rc::make_mut(&mut self.buf)
            }
        };

        self.reader
            .read_line(buf)
            .map(|u| if u == 0 { None } else { Some(Rc::clone(&self.buf)) })
            .transpose()
    }
}
