pub mod error;
pub mod gemini;
pub mod stability;
pub mod traits;
pub mod util;

pub use error::AiError;
pub use gemini::Gemini;
pub use stability::Stability;
pub use traits::{ContentModel, GeneratedImage, ImageModel, ImageRequest, Part};
pub use util::{preview, strip_code_blocks, truncate_to_char_boundary};
