use around_core::error::AroundError;
use console::style;
use std::fmt;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), context: None, suggestions: Vec::new(), help_command: None }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Print a command failure to stderr
pub fn report(error: anyhow::Error) {
    match error.downcast::<CliError>() {
        Ok(cli_error) => cli_error.display(),
        Err(error) => from_anyhow(error).display(),
    }
}

/// Create error for a missing auth token
pub fn missing_token() -> CliError {
    CliError::new("No auth token")
        .with_context("The backend requires a token and none is stored for this session.")
        .with_suggestion("Store a token: around token <TOKEN>")
        .with_suggestion("Or pass one for a single command: --token <TOKEN>")
        .with_help("Run: around token --help")
}

/// Create error for an unknown device location
pub fn location_unknown() -> CliError {
    CliError::new("Location unknown")
        .with_context("No location has been recorded for this session yet.")
        .with_suggestion("Locate this device: around start")
        .with_suggestion("Or give a position: around start --at LAT,LON")
        .with_help("Run: around start --help")
}

/// Create error for a failed geolocation attempt
pub fn geolocation_failed(message: &str) -> CliError {
    CliError::new(message.to_string())
        .with_context("The device position could not be determined.")
        .with_suggestion("Give a position: around start --at LAT,LON")
        .with_suggestion("Or configure a service: --geolocation-url http://ip-api.com/json")
        .with_suggestion("Or retry: around start --retries 2")
        .with_help("Run: around start --help")
}

/// Create error for a failed nearby query
pub fn discovery_failed(message: &str) -> CliError {
    CliError::new("Failed to load posts")
        .with_context(format!("The backend rejected the query.\n\nResponse: {}", message))
        .with_suggestion("Check the token: around token")
        .with_suggestion("Check the backend URL: around config")
}

/// Create error for an unreachable backend
pub fn backend_unreachable(reason: &str) -> CliError {
    CliError::new("Cannot reach the backend")
        .with_context(format!("Error: {}", reason))
        .with_suggestion("Check that the backend is running")
        .with_suggestion("Set the URL: --api-root http://host:port or AROUND_API_ROOT")
        .with_help("Run: around config")
}

/// Create error for a missing image file
pub fn image_not_found(path: &str) -> CliError {
    CliError::new("Image file not found")
        .with_context(format!("The specified image does not exist.\n\nPath: {}", path))
        .with_suggestion("Check the file path and try again")
        .with_help("Run: around post --help")
}

/// Create error for a rejected post
pub fn post_failed(reason: &str) -> CliError {
    CliError::new("Failed to create a post")
        .with_context(format!("Reason: {}", reason))
        .with_suggestion("Check the token: around token")
        .with_suggestion("Check that the image is a supported format")
}

/// Create error for invalid configuration
pub fn invalid_config(key: &str, reason: &str) -> CliError {
    CliError::new(format!("Invalid configuration: {}", key))
        .with_context(format!("Configuration value is invalid.\n\nReason: {}", reason))
        .with_suggestion("Check .around/config.toml for syntax errors")
        .with_suggestion("Or inspect effective values: around config")
        .with_help("Run: around config")
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: anyhow::Error) -> CliError {
    if let Some(around) = error.chain().find_map(|e| e.downcast_ref::<AroundError>()) {
        match around {
            AroundError::LocationUnknown => return location_unknown(),
            AroundError::ConfigInvalid { key, reason } => return invalid_config(key, reason),
            AroundError::Transport { reason } => return backend_unreachable(reason),
            AroundError::Ingest { reason } => return post_failed(reason),
            _ => {}
        }
    }

    let message = format!("{:#}", error);
    if message.contains("Permission denied") {
        CliError::new("Permission denied")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check file permissions")
            .with_suggestion("Or use another state file: --state <PATH>")
    } else {
        CliError::new(message)
    }
}
