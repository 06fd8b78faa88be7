use std::path::PathBuf;

/// Alias for `Result<T, LoadError>`.
pub type LoadResult<T> = Result<T, LoadError>;

/// Alias for `Result<T, StoryError>`.
pub type StoryResult<T> = Result<T, StoryError>;

/// Errors raised while building the story catalog. All of them are fatal:
/// an empty or malformed catalog makes the service meaningless.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The story directory could not be listed.
    #[error("cannot read story directory {path}: {error}")]
    ReadDir {
        /// Directory that was being listed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        error: std::io::Error,
    },

    /// A story document could not be read.
    #[error("cannot read {path}: {error}")]
    ReadFile {
        /// Document path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        error: std::io::Error,
    },

    /// A story document is not valid YAML/JSON or has the wrong shape.
    #[error("cannot parse {path}: {message}")]
    Parse {
        /// Document path.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// No story documents were found.
    #[error("no stories found in {0}")]
    NoStories(String),

    /// Two stories share the same title.
    #[error("duplicate story title: \"{0}\"")]
    DuplicateTitle(String),

    /// A story failed structural validation.
    #[error("story \"{title}\" is invalid: {problem}")]
    Invalid {
        /// Title of the offending story.
        title: String,
        /// What is wrong with it.
        problem: ValidationProblem,
    },
}

/// A structural defect in a single story.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationProblem {
    /// The story title is empty.
    #[error("title is empty")]
    EmptyTitle,

    /// There is no page named `start`.
    #[error("missing \"start\" page")]
    MissingStart,

    /// Two pages share a name.
    #[error("page \"{0}\" is defined more than once")]
    DuplicatePage(String),

    /// An option points at a page that does not exist.
    #[error("option \"{option}\" on page \"{page}\" leads to unknown page \"{target}\"")]
    DanglingOption {
        /// Page holding the option.
        page: String,
        /// Option label.
        option: String,
        /// Missing target page.
        target: String,
    },

    /// A page has neither options nor an ending, so a reader would be stuck.
    #[error("page \"{0}\" has neither options nor an ending")]
    DeadEnd(String),

    /// A page has both options and an ending.
    #[error("page \"{0}\" has both options and an ending")]
    OptionsAndEnding(String),
}

/// Lookup failures inside a single story.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoryError {
    /// The page does not exist. Unreachable for a validated story.
    #[error("page \"{page}\" not found in story \"{story}\"")]
    UnknownPage {
        /// Story title.
        story: String,
        /// Requested page name.
        page: String,
    },

    /// No option on the page has exactly this text.
    #[error("\"{choice}\" is not an option on page \"{page}\"")]
    InvalidChoice {
        /// Page the choice was made on.
        page: String,
        /// Text the user sent.
        choice: String,
    },
}
