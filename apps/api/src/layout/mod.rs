// Page layout estimation: font metrics and A4 page fill.
// Pure CPU work over already-rendered text; cheap enough to run inline in handlers.

pub mod font_metrics;
pub mod page_fill;

pub use font_metrics::{FontFamily, PageConfig};
pub use page_fill::{analyze_page_fill, Column, PageFillReport, PageFillVerdict, TextBlock};
