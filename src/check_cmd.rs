//! Check command: classify states without solving.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use absorb_markov::{CanonicalForm, classify};

use crate::cli::CheckArgs;
use crate::config::{self, ChainFile};

fn summarize(form: &CanonicalForm) -> String {
    format!(
        "transient: {:?}\nabsorbing: {:?}",
        form.transient(),
        form.absorbing()
    )
}

/// Validates and classifies a loaded chain.
fn check(chain: &ChainFile, max_states: Option<usize>) -> Result<String> {
    let solver = chain.solver.to_config(max_states, None);
    let form = classify(&chain.counts, &solver).context("failed to classify chain")?;
    Ok(summarize(&form))
}

/// Run the check command.
pub fn run(args: CheckArgs) -> Result<()> {
    let _cmd = info_span!("check").entered();

    info!(path = %args.input.display(), "reading chain file");
    let chain = config::load(&args.input)?;
    println!("{}", check(&chain, args.max_states)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SolverToml;

    fn chain(counts: Vec<Vec<u64>>) -> ChainFile {
        ChainFile {
            counts,
            solver: SolverToml::default(),
        }
    }

    #[test]
    fn check_lists_states() {
        let out = check(&chain(vec![vec![0, 1, 1], vec![0, 0, 0], vec![1, 0, 0]]), None).unwrap();
        assert_eq!(out, "transient: [0, 2]\nabsorbing: [1]");
    }

    #[test]
    fn check_rejects_empty_chain() {
        let err = check(&chain(vec![]), None).unwrap_err();
        assert!(format!("{err:#}").contains("count matrix is empty"), "{err:#}");
    }

    #[test]
    fn check_rejects_oversized_chain() {
        let big = chain(vec![vec![0; 12]; 12]);
        let err = check(&big, None).unwrap_err();
        assert!(format!("{err:#}").contains("too many states"), "{err:#}");
        assert!(check(&big, Some(12)).is_ok());
    }
}
