pub mod markdown;
pub mod pdf;

pub use markdown::render_markdown;
pub use pdf::PdfRenderer;
