/// Database access layer
///
/// Repository structs own a handle to the shared pool; one pool per process.
pub mod generation_repo;
pub mod movie_repo;
pub mod profile_repo;

pub use generation_repo::{GenerationRepository, GenerationStore};
pub use movie_repo::MovieRepository;
pub use profile_repo::{ProfileRepository, ProfileStore};
