mod line;
mod rectangle;
mod text;

pub use line::{Line, Options as LineOptions};
pub use rectangle::{Options as RectangleOptions, Rectangle};
pub use text::{Alignment, FontFamily, FontWeight, Options as TextOptions, Text};
