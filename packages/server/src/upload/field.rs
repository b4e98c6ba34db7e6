/// Image extensions accepted for picture fields.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Image and document extensions accepted for every other field.
const DOCUMENT_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "pdf", "doc", "docx",
];

/// Maximum number of gallery images in one request.
const MAX_GALLERY_FILES: usize = 50;

/// A multipart file field and the storage rules that apply to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadField {
    ProfilePicture,
    ConceptNote,
    ResearchProposal,
    ThesisReport,
    GalleryImages,
    /// Any field name not listed above.
    Misc,
}

impl UploadField {
    pub const ALL: [UploadField; 6] = [
        UploadField::ProfilePicture,
        UploadField::ConceptNote,
        UploadField::ResearchProposal,
        UploadField::ThesisReport,
        UploadField::GalleryImages,
        UploadField::Misc,
    ];

    pub fn from_name(name: &str) -> Self {
        match name {
            "profilePicture" => Self::ProfilePicture,
            "conceptNote" => Self::ConceptNote,
            "researchProposal" => Self::ResearchProposal,
            "thesisReport" => Self::ThesisReport,
            "galleryImages" => Self::GalleryImages,
            _ => Self::Misc,
        }
    }

    /// Sub-directory of the upload root the field's files are written to.
    pub fn directory(self) -> &'static str {
        match self {
            Self::ProfilePicture => "profile-pictures",
            Self::ConceptNote => "concept-notes",
            Self::ResearchProposal => "research-proposals",
            Self::ThesisReport => "thesis-reports",
            Self::GalleryImages => "gallery",
            Self::Misc => "misc",
        }
    }

    pub fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            Self::ProfilePicture | Self::GalleryImages => IMAGE_EXTENSIONS,
            _ => DOCUMENT_EXTENSIONS,
        }
    }

    /// Case-insensitive extension check.
    pub fn allows(self, extension: &str) -> bool {
        let extension = extension.to_ascii_lowercase();
        self.allowed_extensions().contains(&extension.as_str())
    }

    /// Maximum number of files per request, `None` when unbounded.
    pub fn max_files(self) -> Option<usize> {
        match self {
            Self::GalleryImages => Some(MAX_GALLERY_FILES),
            Self::Misc => None,
            _ => Some(1),
        }
    }
}
