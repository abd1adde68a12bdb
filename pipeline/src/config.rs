use std::path::{Component, Path, PathBuf};

use crate::chart::DEFAULT_CHART_NAME;
use crate::errors::InputError;
use crate::records::BlankCellPolicy;
use crate::thinkcell::DEFAULT_EXECUTABLE;

#[derive(Debug, Clone, clap::Args)]
pub struct InputArgs {
    /// CSV file with a `Year` column and one column per category
    #[clap(short, long, env = "PPTTC_INPUT", default_value = "sheep.csv")]
    pub input: PathBuf,

    /// Presentation template referenced by the generated document
    #[clap(short, long, env = "PPTTC_TEMPLATE", default_value = "Herd_Growth.pptx")]
    pub template: String,

    /// Name of the chart element in the template
    #[clap(short, long, env = "PPTTC_CHART_NAME", default_value = DEFAULT_CHART_NAME)]
    pub chart_name: String,

    /// How empty category fields are handled
    #[clap(short, long, env = "PPTTC_BLANK_CELLS", value_enum, default_value_t = BlankCellPolicy::Reject)]
    pub blank_cells: BlankCellPolicy,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ConvertArgs {
    #[clap(flatten)]
    pub input: InputArgs,

    /// Where the generated `.ppttc` document is written
    #[clap(short, long, env = "PPTTC_FILE", default_value = "Herd_Data_in_JSON.ppttc")]
    pub ppttc: PathBuf,
}

#[derive(Debug, Clone, clap::Args)]
pub struct GenerateArgs {
    #[clap(flatten)]
    pub convert: ConvertArgs,

    /// Presentation produced by the external tool
    #[clap(short, long, env = "PPTTC_OUTPUT", default_value = "Final_Sheep_Presentation.pptx")]
    pub output: PathBuf,

    /// Location of the think-cell `ppttc` executable
    #[clap(short, long, env = "PPTTC_EXECUTABLE", default_value = DEFAULT_EXECUTABLE)]
    pub executable: PathBuf,
}


impl InputArgs {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            template: "Herd_Growth.pptx".to_string(),
            chart_name: DEFAULT_CHART_NAME.to_string(),
            blank_cells: BlankCellPolicy::default(),
        }
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if !self.input.exists() {
            return Err(InputError::InputNotFound { path: self.input.display().to_string() });
        }
        if self.template.trim().is_empty() {
            return Err(invalid("template path must not be empty"));
        }
        if self.chart_name.trim().is_empty() {
            return Err(invalid("chart name must not be empty"));
        }
        Ok(())
    }
}

impl ConvertArgs {
    pub fn validate(&self) -> Result<(), InputError> {
        self.input.validate()?;
        if same_file(&self.ppttc, &self.input.input) {
            return Err(invalid("ppttc file would overwrite the input file"));
        }
        Ok(())
    }
}

impl GenerateArgs {
    pub fn validate(&self) -> Result<(), InputError> {
        self.convert.validate()?;
        if same_file(&self.output, &self.convert.input.input)
            || same_file(&self.output, &self.convert.ppttc) {
            return Err(invalid("output presentation must differ from the input and ppttc files"));
        }
        Ok(())
    }
}

/// Compares where two paths point, not how they are spelled.
fn same_file(a: &Path, b: &Path) -> bool {
    resolve(a) == resolve(b)
}

/// The target may not exist yet, so only its directory is canonicalized when needed.
fn resolve(path: &Path) -> PathBuf {
    if let Ok(canonical) = std::fs::canonicalize(path) {
        return canonical;
    }
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    match (std::fs::canonicalize(parent), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => normalize_lexically(path),
    }
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

fn invalid(reason: &str) -> InputError {
    InputError::InvalidConfig { reason: reason.to_string() }
}
