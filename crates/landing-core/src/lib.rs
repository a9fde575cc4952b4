pub mod blob;
pub mod color;
pub mod constants;
pub mod easing;
pub mod parallax;
pub mod path;
pub mod scroll;
pub mod timeline;
pub mod viewbox;

pub use blob::*;
pub use color::*;
pub use easing::*;
pub use parallax::*;
pub use path::*;
pub use scroll::*;
pub use timeline::*;
pub use viewbox::*;
