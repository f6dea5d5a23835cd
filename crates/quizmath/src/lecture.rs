/// Identifies the lecture a text belongs to.
///
/// Resources referenced from a lecture's texts, like images, are resolved relative to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LectureRef {
    id: String,
}

impl LectureRef {
    pub fn new(id: impl Into<String>) -> Self {
        LectureRef { id: id.into() }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The URL under which the image `name` of this lecture is served.
    pub fn image_url(&self, name: &str) -> String {
        format!("/image/{}/{name}", self.id)
    }
}
