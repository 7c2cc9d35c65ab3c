//! Submitted form data.

use bytes::Bytes;

/// A file received in a `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Client-supplied file name.
    pub file_name: String,
    /// Declared content type of the part, if any.
    pub content_type: Option<String>,
    /// File contents.
    pub data: Bytes,
}

impl UploadedFile {
    /// Creates a new uploaded file.
    pub fn new(
        file_name: impl Into<String>,
        content_type: Option<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            data: data.into(),
        }
    }

    /// Returns the size of the file in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Returns whether this is the empty part browsers send when no file was chosen.
    pub fn is_empty_selection(&self) -> bool {
        self.file_name.is_empty() && self.data.is_empty()
    }
}

/// One submitted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    /// A plain text value.
    Text(String),
    /// An uploaded file.
    File(UploadedFile),
}

impl FormPart {
    /// Returns the text value, if this part is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::File(_) => None,
        }
    }
}

impl From<&str> for FormPart {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FormPart {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<UploadedFile> for FormPart {
    fn from(value: UploadedFile) -> Self {
        Self::File(value)
    }
}

/// Raw submitted values in submission order.
///
/// A name may repeat; [`FormData::get`] returns the last value submitted for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, FormPart)>,
}

impl FormData {
    /// Creates empty form data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value.
    pub fn append(&mut self, name: impl Into<String>, part: impl Into<FormPart>) {
        self.entries.push((name.into(), part.into()));
    }

    /// Builder method to append a value.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, part: impl Into<FormPart>) -> Self {
        self.append(name, part);
        self
    }

    /// Returns the last value submitted for `name`.
    pub fn get(&self, name: &str) -> Option<&FormPart> {
        self.entries
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, part)| part)
    }

    /// Returns the last value for `name` if it is text.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FormPart::as_text)
    }

    /// Returns every value submitted for `name`, in order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FormPart> + 'a {
        self.entries
            .iter()
            .filter(move |(key, _)| key == name)
            .map(|(_, part)| part)
    }

    /// Iterates over all entries in submission order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormPart)> {
        self.entries.iter().map(|(key, part)| (key.as_str(), part))
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no values were submitted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, FormPart)> for FormData {
    fn from_iter<I: IntoIterator<Item = (String, FormPart)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_value_wins() {
        let data = FormData::new().with("tag", "a").with("other", "x").with("tag", "b");
        assert_eq!(data.text("tag"), Some("b"));
        let all: Vec<_> = data.get_all("tag").filter_map(FormPart::as_text).collect();
        assert_eq!(all, ["a", "b"]);
        assert_eq!(data.len(), 3);
    }

    #[test]
    fn test_file_part_is_not_text() {
        let file = UploadedFile::new("a.txt", Some("text/plain".into()), &b"hi"[..]);
        let data = FormData::new().with("upload", file);
        assert!(data.text("upload").is_none());
        assert!(matches!(data.get("upload"), Some(FormPart::File(f)) if f.size() == 2));
    }

    #[test]
    fn test_empty_selection() {
        assert!(UploadedFile::new("", None, Bytes::new()).is_empty_selection());
        assert!(!UploadedFile::new("a.txt", None, Bytes::new()).is_empty_selection());
    }
}
