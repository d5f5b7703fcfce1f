/// HTTP request handlers
pub mod generations;
pub mod movies;
pub mod profiles;

pub use generations::{delete_generation, generate, generate_gen4, list_generations};
pub use movies::{get_movie, list_movies};
pub use profiles::{add_user, get_user};
