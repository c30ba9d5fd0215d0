//! Configuration section definitions.
//!
//! Each module corresponds to a section in `notepost.toml`:
//!
//! | Module     | TOML Section   | Purpose                                  |
//! |------------|----------------|------------------------------------------|
//! | `platform` | `[platform]`   | Article API location and request headers |
//! | `login`    | `[login]`      | Browser login over WebDriver             |
//! | `post`     | `[post]`       | Article file and publish mode            |
//! | `render`   | `[render]`     | Markdown renderer selection              |

mod login;
mod platform;
mod post;
mod render;

pub use login::LoginConfig;
pub use platform::PlatformConfig;
pub use post::PostConfig;
pub use render::RenderConfig;
