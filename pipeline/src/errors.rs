use error_set::error_set;

error_set!{
    PipelineError = InputError || OutputError || ToolError;
    InputError = {
        #[display("Input file not found: {path}")]
        InputNotFound{path: String},
        #[display("Failed to read input file {path}: {reason}")]
        InputUnreadable{path: String, reason: String},
        #[display("Input file {path} has no 'Year' column")]
        MissingYearColumn{path: String},
        #[display("Invalid number in {path} (line {line}, column '{column}'): '{value}'")]
        InvalidNumber{path: String, line: u64, column: String, value: String},
        #[display("Invalid configuration: {reason}")]
        InvalidConfig{reason: String},
    };
    OutputError = {
        #[display("Failed to write {path}: {reason}")]
        OutputUnwritable{path: String, reason: String},
    };
    ToolError = {
        #[display("Could not launch external tool {executable}: {reason}")]
        ExternalToolMissing{executable: String, reason: String},
        #[display("External tool failed ({status})\nStandard Output: {stdout}\nStandard Error: {stderr}")]
        ExternalToolFailure{status: String, stdout: String, stderr: String},
    };
}

impl PipelineError {
    /// Process exit code reported by the binary for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            PipelineError::InputNotFound { .. }
            | PipelineError::InputUnreadable { .. }
            | PipelineError::MissingYearColumn { .. }
            | PipelineError::InvalidNumber { .. }
            | PipelineError::InvalidConfig { .. } => 3,
            PipelineError::OutputUnwritable { .. } => 1,
            PipelineError::ExternalToolMissing { .. } => 4,
            PipelineError::ExternalToolFailure { .. } => 5,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_map_to_input_exit_code() {
        let error: PipelineError = InputError::InputNotFound { path: "sheep.csv".to_string() }.into();
        assert_eq!(error.exit_code(), 3);
        let error: PipelineError = InputError::InvalidNumber {
            path: "sheep.csv".to_string(),
            line: 3,
            column: "Suffolk".to_string(),
            value: "".to_string(),
        }.into();
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn tool_errors_are_distinguished() {
        let missing: PipelineError = ToolError::ExternalToolMissing {
            executable: "ppttc".to_string(),
            reason: "not found".to_string(),
        }.into();
        let failed: PipelineError = ToolError::ExternalToolFailure {
            status: "exit code 1".to_string(),
            stdout: String::new(),
            stderr: "bad template".to_string(),
        }.into();
        assert_eq!(missing.exit_code(), 4);
        assert_eq!(failed.exit_code(), 5);
        assert!(failed.to_string().contains("bad template"));
    }

    #[test]
    fn invalid_number_message_names_line_and_column() {
        let error = InputError::InvalidNumber {
            path: "sheep.csv".to_string(),
            line: 7,
            column: "Merino".to_string(),
            value: "ten".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("line 7"));
        assert!(message.contains("Merino"));
        assert!(message.contains("ten"));
    }
}
