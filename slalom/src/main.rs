use evodrive::genomics::{ActivationType, Dna, GeneticConfig};
use evodrive::networks::Network;
use evodrive::populations::{Cohort, EvolutionLogger, Generation, PopulationConfig, ReportingLevel};

use tracing::info;
use tracing_subscriber::EnvFilter;

use std::error::Error;
use std::fs;
use std::num::NonZeroUsize;

const GENERATIONS: usize = 50;
const TICK_BUDGET: usize = 400;
const COURSE_HALF_WIDTH: f64 = 4.0;
const GATE_HALF_WIDTH: f64 = 1.5;
const GATE_SPACING: f64 = 10.0;
const SAVE_PATH: &str = "slalom_generation.ron";
const FITNESS_CSV_PATH: &str = "slalom_fitness.csv";

/// Lateral center of gate `n`. The gates weave from side to side, so
/// driving straight ahead clips a cone sooner or later.
fn gate_center(n: usize) -> f64 {
    2.5 * (n as f64 * 0.9).sin()
}

struct Outcome {
    fitness: f64,
    gates_passed: usize,
    off_course: bool,
    out_of_ticks: bool,
}

/// Runs one agent down the slalom course until it clips a cone,
/// leaves the course, or runs out of ticks.
///
/// The controller sees the lateral offset to the next gate, the
/// normalized distance to it, and its own lateral velocity; it steers
/// and throttles through two tanh outputs.
fn drive_course(dna: &Dna) -> Outcome {
    let network = Network::from(dna);

    let mut x = 0.0;
    let mut y = 0.0;
    let mut lateral_velocity = 0.0;
    let mut gates_passed = 0;
    let mut off_course = false;
    let mut ticks = 0;

    while ticks < TICK_BUDGET {
        ticks += 1;
        let gate_x = (gates_passed + 1) as f64 * GATE_SPACING;
        let inputs = [
            (gate_center(gates_passed + 1) - y) / COURSE_HALF_WIDTH,
            (gate_x - x) / GATE_SPACING,
            lateral_velocity,
        ];
        let outputs = network.evaluate(&inputs);
        let steer = outputs[0];
        let throttle = outputs[1];

        lateral_velocity = (lateral_velocity + 0.2 * steer) * 0.9;
        y += lateral_velocity;
        x += 0.6 + 0.4 * throttle;

        if y.abs() > COURSE_HALF_WIDTH {
            off_course = true;
            break;
        }
        if x >= gate_x {
            if (gate_center(gates_passed + 1) - y).abs() > GATE_HALF_WIDTH {
                off_course = true;
                break;
            }
            gates_passed += 1;
        }
    }

    // Clipping a cone on the very last tick triggers both causes.
    Outcome {
        fitness: 1.0 + 10.0 * gates_passed as f64 + 0.1 * x,
        gates_passed,
        off_course,
        out_of_ticks: ticks == TICK_BUDGET,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let genetic_config = GeneticConfig {
        input_count: NonZeroUsize::new(3).unwrap(),
        output_count: NonZeroUsize::new(2).unwrap(),
        hidden_layer_sizes: vec![5, 4],
        output_activation: ActivationType::TanH,
        heterogeneous_hidden_activation: true,
        weight_mutation_rate: 0.05,
        activation_mutation_rate: 0.01,
        crossover_passes: 3,
        cross_activations: false,
    };
    let population_config = PopulationConfig {
        size: NonZeroUsize::new(100).unwrap(),
        new_rate: 0.05,
        elite_rate: 0.05,
        mutated_elite_rate: 0.2,
        offspring_mutation_chance: 0.5,
        breeding_pool_fraction: 0.2,
        crossover_retries: 5,
    };

    let mut cohort = Cohort::new(genetic_config, population_config);
    let mut logger = EvolutionLogger::new(ReportingLevel::Champion);

    for _ in 0..GENERATIONS {
        let outcomes: Vec<Outcome> = cohort.generation().genomes().map(drive_course).collect();
        for (agent, outcome) in outcomes.iter().enumerate() {
            // An agent can clip a cone on its very last tick; both
            // causes report and the cohort ignores the duplicate.
            if outcome.off_course {
                cohort.report_death(agent, outcome.fitness);
            }
            if outcome.out_of_ticks {
                cohort.report_death(agent, outcome.fitness);
            }
        }

        logger.log(cohort.generation());
        let stats = cohort.generation().performance();
        let best_gates = outcomes.iter().map(|o| o.gates_passed).max().unwrap_or(0);
        info!(
            generation = cohort.generation().number(),
            best = stats.best_fitness,
            average = stats.average_fitness,
            best_gates,
            "generation scored"
        );

        cohort.advance()?;
    }

    fs::write(SAVE_PATH, ron::to_string(cohort.generation())?)?;
    fs::write(FITNESS_CSV_PATH, logger.fitness_csv())?;

    // Round-trip the saved generation as a sanity check.
    let restored: Generation = ron::from_str(&fs::read_to_string(SAVE_PATH)?)?;
    info!(
        size = restored.size(),
        number = restored.number(),
        "saved generation reloaded"
    );

    Ok(())
}
