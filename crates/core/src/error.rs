use thiserror::Error;

use crate::geometry::GeometryError;
use crate::model::{ProblemError, SettingsError};
use crate::verify::InputError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Problem(#[from] ProblemError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
