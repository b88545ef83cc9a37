//! One end-to-end run: seed the store, evolve it, hand the fittest
//! knowledge to a swarm as beliefs, and let the swarm vote.
//!
//! This is the only place where the store and the coordinator meet. The
//! linkage is explicit: participants draw their beliefs round-robin from
//! the top `retrieve_count` units, ranked by fitness.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::info;

use eidos_memetic::{EvolutionaryStore, GenerationReport, RetrievalQuery, SortBy, StoreStatus};
use eidos_swarm::{Agent, ConsensusOutcome, Participant, SwarmCoordinator, SwarmStatus};

use crate::config::RunnerConfig;
use crate::error::RunnerError;

/// Everything a run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Store status after the last generation.
    pub store: StoreStatus,
    /// One report per generation.
    pub generations: Vec<GenerationReport>,
    /// Units offered to the swarm as beliefs, fittest first.
    pub candidates: Vec<String>,
    /// Result of the consensus round.
    pub outcome: ConsensusOutcome<String>,
    /// Whether participants were synchronized after a failed vote.
    pub synchronized: bool,
    /// Coordinator status at the end of the run.
    pub swarm: SwarmStatus,
    /// Each participant's belief at the end of the run.
    pub final_beliefs: Vec<Option<String>>,
}

/// Execute one run with `config`.
pub fn run(config: &RunnerConfig) -> Result<RunSummary, RunnerError> {
    let mut store = EvolutionaryStore::new(config.evolution.clone())?;
    for text in &config.run.seed_content {
        store.ingest_text(text);
    }
    info!(
        kernel_id = %store.kernel_id(),
        population_size = store.len(),
        "store seeded"
    );

    let mut rng = StdRng::seed_from_u64(config.run.seed);
    let mut generations = Vec::new();
    for _ in 0..config.run.generations {
        let report = store.evolve(&mut rng);
        info!(
            generation = report.generation,
            mutated = report.mutated,
            recombined = report.recombined.is_some(),
            pruned = report.pruned,
            population_size = report.population_size,
            "generation complete"
        );
        generations.push(report);
    }

    let query = RetrievalQuery::new()
        .count(config.run.retrieve_count)
        .sort_by(SortBy::Fitness);
    let candidates: Vec<String> = store
        .retrieve(&query)
        .iter()
        .map(|u| u.content().to_string())
        .collect();

    let mut agents: Vec<Agent<String>> = (0..config.swarm.participant_count)
        .map(|i| {
            let agent = Agent::new(None);
            match candidates.get(i.checked_rem(candidates.len()).unwrap_or(0)) {
                Some(belief) => agent.with_belief(belief.clone()),
                None => agent,
            }
        })
        .collect();

    let mut coordinator = SwarmCoordinator::new(config.swarm.swarm_id.clone(), &mut agents);
    let outcome =
        coordinator.achieve_consensus_by_name(&config.swarm.topic, &config.swarm.method)?;

    let mut synchronized = false;
    if !outcome.reached && config.swarm.synchronize_on_failure {
        if let Some(fittest) = candidates.first() {
            coordinator.synchronize(fittest);
            synchronized = true;
        }
    }

    let swarm = coordinator.status();
    let final_beliefs = coordinator
        .participants()
        .iter()
        .map(|a| a.belief().cloned())
        .collect();

    info!(
        swarm_id = swarm.swarm_id,
        reached = outcome.reached,
        synchronized,
        "run complete"
    );

    Ok(RunSummary {
        store: store.status(),
        generations,
        candidates,
        outcome,
        synchronized,
        swarm,
        final_beliefs,
    })
}
