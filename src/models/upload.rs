/// A locally picked file waiting to be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpload {
    pub content: Vec<u8>,
    pub display_name: String,
}

impl PendingUpload {
    pub fn new(display_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self { content, display_name: display_name.into() }
    }
}
