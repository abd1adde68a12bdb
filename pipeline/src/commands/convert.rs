use crate::chart::{build_chart_document, write_ppttc_file, PpttcFile};
use crate::config::{ConvertArgs, InputArgs};
use crate::errors::{InputError, PipelineError};
use crate::records::load_year_records;

/// Loads the CSV and builds the document without touching the disk.
pub fn build_ppttc(args: &InputArgs) -> Result<PpttcFile, InputError> {
    let records = load_year_records(&args.input, args.blank_cells)?;
    let document = build_chart_document(&records, &args.template, &args.chart_name);
    Ok(PpttcFile::from(document))
}

pub fn convert(args: &ConvertArgs) -> Result<PpttcFile, PipelineError> {
    args.validate()?;
    log::info!("Converting {} to {}", args.input.input.display(), args.ppttc.display());
    let ppttc = build_ppttc(&args.input)?;
    write_ppttc_file(&args.ppttc, &ppttc)?;
    Ok(ppttc)
}
