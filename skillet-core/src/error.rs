use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("name cannot be empty")]
    EmptyName,

    #[error("serving size must be positive, got {0}")]
    NonPositiveServingSize(f64),

    #[error("servings used must be positive, got {0}")]
    NonPositiveServingsUsed(f64),

    #[error("{field} cannot be negative, got {value}")]
    NegativeMacro { field: &'static str, value: f64 },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("recipe servings must be at least 1")]
    InvalidServings,
}
