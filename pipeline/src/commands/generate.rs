use crate::commands::convert::convert;
use crate::config::GenerateArgs;
use crate::errors::PipelineError;
use crate::thinkcell::ExternalTool;

pub fn generate(args: &GenerateArgs) -> Result<(), PipelineError> {
    args.validate()?;
    convert(&args.convert)?;
    let tool = ExternalTool::new(&args.executable);
    tool.run(&args.convert.ppttc, &args.output)?
        .into_result()?;
    log::info!("Presentation written to {}", args.output.display());
    Ok(())
}
