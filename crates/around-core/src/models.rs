pub mod credential;
pub mod draft;
pub mod position;
pub mod post;
pub mod state;
pub mod topic;

pub use credential::AuthCredential;
pub use draft::{ImageUpload, NewPostDraft};
pub use position::{GeoOptions, GeoPosition, Viewport};
pub use post::{Post, PostKind, PostLocation};
pub use state::{DiscoveryState, DiscoveryStatus};
pub use topic::{Endpoint, Topic};
