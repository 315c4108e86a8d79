pub mod f32;
pub mod io;
pub mod mask;
pub mod traits;
pub mod vec3;

pub use self::f32::ImageF32;
pub use self::mask::ImageBool;
pub use self::traits::{ImageView, ImageViewMut, Rows};
pub use self::vec3::ImageVec3;
