use anyhow::{Context, Result};

use spectroscopy::db::{self, HttpFetcher};
use spectroscopy::export;

use super::ionization::destination;
use super::runtime;
use crate::cli::{FilterArgs, GlobalOptions};
use crate::config::{build_filter_query, load_database_config};
use crate::display::{Context as DisplayContext, Progress, print_transmission_summary};
use crate::io::write_output;

const TOTAL_STEPS: u8 = 2;

pub fn run(args: FilterArgs, global: &GlobalOptions, ctx: DisplayContext) -> Result<()> {
    let query = build_filter_query(&args)?;
    let formula = query.validate()?;
    let config = load_database_config(global.config.as_deref())?;
    let fetcher = HttpFetcher::new(&config.client)?;

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Querying Henke filter calculator");
    let curve = runtime()?
        .block_on(db::henke::filter_transmission(&fetcher, &config.henke, &query))
        .with_context(|| format!("Filter transmission query for {} failed", query.formula))?;
    let (min, max) = query.scan.bounds();
    progress.complete_step(
        "Querying Henke filter calculator",
        &[
            format!(
                "{formula}, {} µm, {} atoms per formula unit",
                query.thickness_um,
                formula.atom_count()
            ),
            format!("{min} – {max} {} in {} points", query.scan.axis().unit(), query.points),
        ],
    );

    if ctx.interactive {
        print_transmission_summary(&query, &curve);
    }

    progress.step("Writing output");
    let format = write_output(global, |out, format| {
        export::write_transmission(out, &curve, format)?;
        Ok(())
    })?;
    progress.complete_step("Writing output", &[destination(global, format)]);

    progress.finish();
    Ok(())
}
