//! Runtime errors of compiled programs.
//!
//! Constructors are `#[cold]` free functions so the hot evaluation paths
//! stay small. Names carried by errors are always the names as written in
//! the document, never their canonical form.

/// Result of evaluating a statement or expression.
pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("Undefined variable: \"${name}\".")]
    UndefinedVariable { name: String },

    #[error("Function {function} is missing argument ${param}.")]
    MissingArgument { function: String, param: String },

    #[error("Function {function} takes {expected} arguments but {given} were passed.")]
    TooManyArguments {
        function: String,
        expected: usize,
        given: usize,
    },

    #[error("Function {function} finished without @return.")]
    MissingReturn { function: String },

    #[error(
        "Base-level rules cannot contain the parent-selector-referencing character '&': \"{selector}\"."
    )]
    ParentRefAtRoot { selector: String },

    #[error("Invalid CSS: expected selector.")]
    EmptySelector,

    #[error("Stack level too deep: more than {depth} nested function calls.")]
    StackOverflow { depth: usize },
}

// Variable and Function Errors

/// Undefined variable.
#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::UndefinedVariable {
        name: name.to_string(),
    }
}

/// Required parameter without argument or default.
#[cold]
pub fn missing_argument(function: &str, param: &str) -> EvalError {
    EvalError::MissingArgument {
        function: function.to_string(),
        param: param.to_string(),
    }
}

#[cold]
pub fn too_many_arguments(function: &str, expected: usize, given: usize) -> EvalError {
    EvalError::TooManyArguments {
        function: function.to_string(),
        expected,
        given,
    }
}

#[cold]
pub fn missing_return(function: &str) -> EvalError {
    EvalError::MissingReturn {
        function: function.to_string(),
    }
}

/// Call depth limit reached.
#[cold]
pub fn stack_overflow(depth: usize) -> EvalError {
    EvalError::StackOverflow { depth }
}

// Selector Errors

#[cold]
pub fn parent_ref_at_root(selector: &str) -> EvalError {
    EvalError::ParentRefAtRoot {
        selector: selector.to_string(),
    }
}

#[cold]
pub fn empty_selector() -> EvalError {
    EvalError::EmptySelector
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn undefined_variable_keeps_written_name() {
        let err = undefined_variable("main-color");
        assert_eq!(
            err,
            EvalError::UndefinedVariable {
                name: "main-color".to_string()
            }
        );
        assert_eq!(err.to_string(), "Undefined variable: \"$main-color\".");
    }

    #[test]
    fn arity_messages() {
        assert_eq!(
            missing_argument("scale", "factor").to_string(),
            "Function scale is missing argument $factor."
        );
        assert_eq!(
            too_many_arguments("scale", 1, 3).to_string(),
            "Function scale takes 1 arguments but 3 were passed."
        );
    }

    #[test]
    fn parent_ref_message_names_selector() {
        let message = parent_ref_at_root("&:hover").to_string();
        assert!(message.contains("\"&:hover\""), "{message}");
    }
}
