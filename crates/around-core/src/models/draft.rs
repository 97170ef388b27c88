use super::GeoPosition;

/// Raw image attached to a new post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), bytes }
    }
}

/// A post being submitted; consumed by a single submission
#[derive(Debug, Clone, PartialEq)]
pub struct NewPostDraft {
    pub position: GeoPosition,
    pub message: String,
    pub image: ImageUpload,
}

impl NewPostDraft {
    pub fn new(position: GeoPosition, message: impl Into<String>, image: ImageUpload) -> Self {
        Self { position, message: message.into(), image }
    }
}
