mod error;
pub use error::Error;

pub mod eisner;
pub use eisner::EisnerDecoder;

mod proj;
pub use proj::{
    projectivize_conll, projectivize_parents, projectivize_parents_checked, EisnerProjectivizer,
    Projectivize,
};
