use anyhow::{Context, Result, bail};

use spectroscopy::db::{self, HttpFetcher};
use spectroscopy::{Element, Ion, export};

use super::runtime;
use crate::cli::{GlobalOptions, IonizationArgs};
use crate::config::load_database_config;
use crate::display::{Context as DisplayContext, Progress, print_ionization_summary};
use crate::io::write_output;

const TOTAL_STEPS: u8 = 2;

pub fn run(args: IonizationArgs, global: &GlobalOptions, ctx: DisplayContext) -> Result<()> {
    let (element, charge) = resolve_target(&args.element, args.charge)?;
    let ion = charge.map(|c| Ion::new(element, c)).transpose()?;
    let config = load_database_config(global.config.as_deref())?;
    let fetcher = HttpFetcher::new(&config.client)?;

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Querying NIST ASD");
    let target = ion.map_or_else(|| element.to_string(), |i| i.to_string());
    let rows = runtime()?
        .block_on(async {
            match ion {
                Some(ion) => db::nist::ionization_energy(&fetcher, &config.nist, ion)
                    .await
                    .map(|row| vec![row]),
                None => db::nist::ionization_energies(&fetcher, &config.nist, element).await,
            }
        })
        .with_context(|| format!("Ionization energy query for {target} failed"))?;
    progress.complete_step(
        "Querying NIST ASD",
        &[
            config.nist.ionization_url.clone(),
            format!("{} row(s) for {}", rows.len(), element.name()),
        ],
    );

    if ctx.interactive {
        print_ionization_summary(&rows);
    }

    progress.step("Writing output");
    let format = write_output(global, |out, format| {
        export::write_ionization(out, &rows, format)?;
        Ok(())
    })?;
    progress.complete_step("Writing output", &[destination(global, format)]);

    progress.finish();
    Ok(())
}

/// Accepts a symbol (`Na`), a name (`sodium`) or a spectrum (`Na IV`, `Na3+`).
fn resolve_target(input: &str, charge: Option<u32>) -> Result<(Element, Option<u32>)> {
    let input = input.trim();
    if let Some(element) = input.parse::<Element>().ok().or_else(|| Element::from_name(input)) {
        return Ok((element, charge));
    }

    let ion: Ion = input
        .parse()
        .with_context(|| format!("Unknown element or spectrum '{input}'"))?;
    let spectrum_charge = u32::from(ion.charge());
    match charge {
        Some(c) if c != spectrum_charge => {
            bail!("'{input}' has charge {spectrum_charge} but --charge {c} was given")
        }
        _ => Ok((ion.element(), Some(spectrum_charge))),
    }
}

pub(super) fn destination(global: &GlobalOptions, format: export::Format) -> String {
    match &global.output {
        Some(path) => format!("{format} → {}", path.display()),
        None => format!("{format} → stdout"),
    }
}
