//! Solve command: exact absorption probabilities for a chain file.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span};

use absorb_markov::{AbsorptionResult, solve_with_config, solve_with_steps};

use crate::cli::{OutputFormat, SolveArgs};
use crate::config;

/// JSON shape of a solved chain. Integers are strings so that values wider
/// than 64 bits survive any JSON reader.
#[derive(Debug, Serialize)]
struct SolveReport {
    absorbing_states: Vec<usize>,
    numerators: Vec<String>,
    denominator: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    expected_steps: Option<String>,
}

impl SolveReport {
    fn new(result: &AbsorptionResult, steps: Option<String>) -> Self {
        Self {
            absorbing_states: result.absorbing_states().to_vec(),
            numerators: result.numerators().iter().map(ToString::to_string).collect(),
            denominator: result.denominator().to_string(),
            expected_steps: steps,
        }
    }
}

fn render(result: &AbsorptionResult, steps: Option<String>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Plain => {
            let mut out = result.to_string();
            if let Some(s) = steps {
                out.push_str(&format!("\nexpected steps: {s}"));
            }
            Ok(out)
        }
        OutputFormat::Json => serde_json::to_string_pretty(&SolveReport::new(result, steps))
            .context("failed to serialize result"),
    }
}

/// Run the solve command.
pub fn run(args: SolveArgs) -> Result<()> {
    let _cmd = info_span!("solve").entered();

    info!(path = %args.input.display(), "reading chain file");
    let chain = config::load(&args.input)?;
    let solver = chain.solver.to_config(args.max_states, args.start);
    info!(
        n_states = chain.counts.len(),
        start = solver.start_state(),
        "chain loaded"
    );

    let (result, steps) = if args.steps {
        let (result, steps) =
            solve_with_steps(&chain.counts, &solver).context("failed to solve chain")?;
        (result, Some(steps.to_string()))
    } else {
        let result = solve_with_config(&chain.counts, &solver).context("failed to solve chain")?;
        (result, None)
    };
    info!(n_absorbing = result.len(), "chain solved");

    println!("{}", render(&result, steps, args.format)?);
    Ok(())
}
