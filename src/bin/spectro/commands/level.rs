use anyhow::{Context, Result};
use serde_json::{Value, json};

use spectroscopy::{ElectronConfiguration, EnergyLevel, Ion, TermSymbol};

use crate::cli::{GlobalOptions, LevelArgs};
use crate::io::{Report, write_output};

pub fn run(args: LevelArgs, global: &GlobalOptions) -> Result<()> {
    let report = describe(&args)?;
    write_output(global, |out, format| report.write(out, format))?;
    Ok(())
}

fn describe(args: &LevelArgs) -> Result<Report> {
    let ion = args
        .ion
        .as_deref()
        .map(|s| s.parse::<Ion>().with_context(|| format!("Invalid ion '{s}'")))
        .transpose()?;

    let configuration: ElectronConfiguration = match (&ion, &args.configuration) {
        (Some(ion), _) => ion.ground_configuration(),
        (None, Some(text)) => text
            .parse()
            .with_context(|| format!("Invalid configuration '{text}'"))?,
        (None, None) => anyhow::bail!("Give a configuration or --ion"),
    };

    let title = match &ion {
        Some(ion) => format!("Ground configuration of {ion}"),
        None => format!("Configuration {configuration}"),
    };
    let open: Vec<Value> = configuration
        .open_subshells()
        .map(|s| json!(s.to_string()))
        .collect();

    let mut report = Report::record(title);
    if let Some(ion) = &ion {
        report = report
            .field("ion", ion.spectrum_name())
            .field("element", ion.element().name())
            .field("charge", ion.charge());
    }
    report = report
        .field("configuration", configuration.to_string())
        .field("ascii", configuration.to_ascii())
        .field("electrons", configuration.electron_count())
        .field("open_subshells", open)
        .field("unpaired", configuration.unpaired())
        .field("hund_spin", configuration.spin().to_string())
        .field("hund_multiplicity", configuration.multiplicity())
        .field("parity", configuration.parity().name());

    if let Some(text) = &args.term {
        let term: TermSymbol = text
            .parse()
            .with_context(|| format!("Invalid term symbol '{text}'"))?;
        let level = EnergyLevel::new(configuration, term)?;
        let term = level.term();
        let j: Vec<Value> = term.possible_j().iter().map(|j| json!(j.to_string())).collect();
        report = report
            .field("level", level.to_string())
            .field("term", term.to_string())
            .field("term_ascii", term.to_ascii())
            .field("multiplet", term.multiplet_name())
            .field("S", term.spin().to_string())
            .field("L", term.l())
            .field("J", term.j().map(|j| j.to_string()))
            .field("possible_J", j)
            .field("fine_structure_levels", term.level_count());
    }

    Ok(report)
}
