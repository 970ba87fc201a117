//! Enrollment record and attachment handles

use super::schema::Field;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Handle to a user-selected file. Contents are only read when the
/// enrollment is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Display name (the file name component of the path)
    pub name: String,
    pub path: PathBuf,
}

impl Attachment {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Build a handle from a path, using its file name for display
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::new(name, path)
    }

    fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
    }

    /// MIME type sent with the multipart part
    pub fn content_type(&self) -> &'static str {
        match self.extension().as_deref() {
            Some("pdf") => "application/pdf",
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            Some("bmp") => "image/bmp",
            Some("svg") => "image/svg+xml",
            Some("tif") | Some("tiff") => "image/tiff",
            Some("heic") => "image/heic",
            _ => "application/octet-stream",
        }
    }

    /// Whether the file chooser accepts this file (images or PDFs)
    pub fn is_accepted(&self) -> bool {
        let content_type = self.content_type();
        content_type == "application/pdf" || content_type.starts_with("image/")
    }
}

/// All values collected by the enrollment wizard, across every step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormRecord {
    pub name: String,
    pub email: String,
    pub date_of_birth: Option<NaiveDate>,
    pub address: String,
    pub education: String,
    pub files: Vec<Attachment>,
}

impl FormRecord {
    /// Mutable access to a free-text value, `None` for the date and file fields
    pub fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Name => Some(&mut self.name),
            Field::Email => Some(&mut self.email),
            Field::Address => Some(&mut self.address),
            Field::Education => Some(&mut self.education),
            Field::DateOfBirth | Field::Files => None,
        }
    }

    /// Read a free-text value, `None` for the date and file fields
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => Some(&self.name),
            Field::Email => Some(&self.email),
            Field::Address => Some(&self.address),
            Field::Education => Some(&self.education),
            Field::DateOfBirth | Field::Files => None,
        }
    }

    /// Replace the whole file selection
    pub fn set_files(&mut self, files: Vec<Attachment>) {
        self.files = files;
    }

    pub fn file_names(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_uses_file_name() {
        let attachment = Attachment::from_path("/tmp/uploads/transcript.pdf");
        assert_eq!(attachment.name, "transcript.pdf");
        assert_eq!(attachment.path, PathBuf::from("/tmp/uploads/transcript.pdf"));
    }

    #[test]
    fn test_content_type_by_extension() {
        assert_eq!(Attachment::from_path("a.PDF").content_type(), "application/pdf");
        assert_eq!(Attachment::from_path("b.jpg").content_type(), "image/jpeg");
        assert_eq!(Attachment::from_path("c.png").content_type(), "image/png");
        assert_eq!(
            Attachment::from_path("notes.txt").content_type(),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_only_images_and_pdfs_are_accepted() {
        assert!(Attachment::from_path("scan.pdf").is_accepted());
        assert!(Attachment::from_path("photo.jpeg").is_accepted());
        assert!(!Attachment::from_path("resume.docx").is_accepted());
        assert!(!Attachment::from_path("no_extension").is_accepted());
    }

    #[test]
    fn test_default_record_is_empty() {
        let record = FormRecord::default();
        assert!(record.name.is_empty());
        assert!(record.date_of_birth.is_none());
        assert!(record.files.is_empty());
    }

    #[test]
    fn test_text_accessors_skip_structured_fields() {
        let mut record = FormRecord::default();
        record.text_mut(Field::Address).unwrap().push_str("1 Main St");
        assert_eq!(record.text(Field::Address), Some("1 Main St"));
        assert!(record.text_mut(Field::DateOfBirth).is_none());
        assert!(record.text(Field::Files).is_none());
    }

    #[test]
    fn test_set_files_replaces_selection() {
        let mut record = FormRecord::default();
        record.set_files(vec![
            Attachment::from_path("a.pdf"),
            Attachment::from_path("b.jpg"),
        ]);
        record.set_files(vec![Attachment::from_path("c.png")]);
        assert_eq!(record.file_names(), vec!["c.png"]);
    }
}
