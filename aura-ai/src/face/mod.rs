//! Face handling: detector handle, landmark analysis, presence gate

pub mod detector;
pub mod extractor;
pub mod landmarks;
pub mod mesh_client;
pub mod validator;

pub use detector::{FaceDetector, FaceMesh, FaceMeshLoader};
pub use extractor::LandmarkExtractor;
pub use mesh_client::HttpFaceMeshLoader;
pub use validator::FaceValidator;
