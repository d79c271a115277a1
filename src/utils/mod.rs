mod preview;

pub use preview::preview;

pub trait TextUtil {
    /// Char-counted preview of a body text. `None` when the text already
    /// fits within `max` characters.
    fn preview(&self, max: usize) -> Option<String>;
}

impl TextUtil for str {
    fn preview(&self, max: usize) -> Option<String> {
        preview(self, max)
    }
}
