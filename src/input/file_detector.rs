//! File type detection by extension, content type or magic bytes

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Text,
    Markdown,
    Docx,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "txt" | "text" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            // legacy binary .doc has no OOXML body
            "docx" => FileType::Docx,
            _ => FileType::Unknown,
        }
    }

    pub fn from_content_type(content_type: &str) -> Self {
        // drop parameters such as "; charset=utf-8"
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase();

        match mime.as_str() {
            "application/pdf" => FileType::Pdf,
            "text/plain" => FileType::Text,
            "text/markdown" | "text/x-markdown" => FileType::Markdown,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                FileType::Docx
            }
            _ => FileType::Unknown,
        }
    }

    /// Guess from the leading bytes of a document
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(b"%PDF") {
            return FileType::Pdf;
        }

        if bytes.starts_with(b"PK") {
            let head = &bytes[..bytes.len().min(1024)];
            if head.windows(5).any(|w| w == b"word/") {
                return FileType::Docx;
            }
            return FileType::Unknown;
        }

        if std::str::from_utf8(bytes).is_ok() {
            FileType::Text
        } else {
            FileType::Unknown
        }
    }

    /// Declared content type first, magic bytes when it is missing or unknown
    pub fn detect(content_type: Option<&str>, bytes: &[u8]) -> Self {
        match content_type.map(Self::from_content_type) {
            Some(FileType::Unknown) | None => Self::sniff(bytes),
            Some(file_type) => file_type,
        }
    }
}
