use prettytable::{Cell, Row, Table};

use crate::chart::ChartTable;
use crate::commands::convert::build_ppttc;
use crate::config::InputArgs;
use crate::errors::PipelineError;

pub fn preview(args: &InputArgs) -> Result<(), PipelineError> {
    args.validate()?;
    let ppttc = build_ppttc(args)?;
    for document in ppttc.documents() {
        println!("Template: {}", document.template);
        for chart in &document.data {
            println!("Chart: {}", chart.name);
            render_table(&chart.table).printstd();
        }
    }
    Ok(())
}

/// The spacer row is left out; it only matters to think-cell.
pub fn render_table(chart: &ChartTable) -> Table {
    let mut table = Table::new();
    let mut rows = chart.rows().iter();
    if let Some(header) = rows.next() {
        table.set_titles(Row::new(
            header.iter().map(|cell| Cell::new(cell.to_string().as_str())).collect()
        ));
    }
    for row in rows.skip(1) {
        table.add_row(Row::new(
            row.iter().map(|cell| Cell::new(cell.to_string().as_str())).collect()
        ));
    }
    table
}
