use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error(transparent)]
    Database(#[from] surrealdb::Error),
    #[error("no {0} record was returned after create")]
    NotCreated(&'static str),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
